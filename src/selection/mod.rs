// Selection module - RTS-style unit selection and control groups
//
// Submodules:
// - set: Capped, ordered selection set
// - groups: Numbered control groups (uncapped snapshots)
// - observer: Observer trait and notification fan-out
// - core: SelectionCore, the operations facade tying the above together
// - drag: Click-vs-drag gesture state machine
// - picking: Ray picking and box queries over the unit registry
// - camera: Camera-backed viewport projector
// - input: Mouse and keyboard systems driving the core
// - events: Bevy event bridge for core notifications
// - audio: Selection cue playback
// - visuals: Visual feedback systems (rings, drag rectangle)

mod audio;
mod camera;
mod core;
mod drag;
mod events;
mod groups;
mod input;
mod observer;
mod picking;
mod set;
mod visuals;

use bevy::prelude::*;

use crate::constants::*;
use crate::registry::UnitRegistry;

// Re-export main types for external use
pub use self::core::SelectionCore;
pub use camera::{CameraLens, PickCamera};
pub use drag::{DragRect, DragState, PointerGesture};
pub use events::{
    notice_channel, ControlGroupSelected, ControlGroupSet, CueRequest, NoticeQueue, NoticeRelay,
    SelectionChanged, UnitDeselected, UnitSelected,
};
pub use groups::{ControlGroups, GroupSlot, InvalidGroupSlot};
pub use observer::{ObserverSet, SelectionCue, SelectionObserver};
pub use picking::{pick_at, pick_in_rect, ViewportPoint, ViewportProjector};
pub use set::SelectionSet;
pub use visuals::{DragRectVisual, SelectionRing};

// Re-export systems for app wiring
pub use audio::{cue_playback_system, load_selection_audio, SelectionAudio};
pub use events::relay_notices_system;
pub use input::{group_hotkey_system, pointer_input_system, validate_pick_camera};
pub use visuals::{drag_rect_visual_system, selection_ring_system};

// ============================================================================
// RESOURCES
// ============================================================================

/// Tunable knobs, insert before [`SelectionPlugin`] to override the defaults.
#[derive(Resource, Clone)]
pub struct SelectionConfig {
    /// Hard cap on concurrently selected units
    pub max_selected: usize,
    /// Physical pixels of pointer travel before a press becomes a box drag
    pub drag_threshold_px: f32,
    /// Linear volume for selection cue playback
    pub cue_volume: f32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_selected: MAX_SELECTED,
            drag_threshold_px: DRAG_THRESHOLD_PX,
            cue_volume: VOLUME_SELECT_CUE,
        }
    }
}

/// The selection core plus gesture state, bundled as one resource so input
/// systems borrow both coherently.
#[derive(Resource)]
pub struct SelectionContext {
    pub core: SelectionCore,
    pub drag: DragState,
}

impl FromWorld for SelectionContext {
    fn from_world(world: &mut World) -> Self {
        let config = world
            .get_resource_or_insert_with(SelectionConfig::default)
            .clone();

        // Wire the channel half into the core as an observer; the receiving
        // half becomes a resource drained by relay_notices_system.
        let (relay, queue) = notice_channel();
        world.insert_resource(queue);

        let mut core = SelectionCore::with_capacity(config.max_selected);
        core.register_observer(Box::new(relay));

        Self {
            core,
            drag: DragState::new(config.drag_threshold_px),
        }
    }
}

// ============================================================================
// PLUGIN
// ============================================================================

pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectionConfig>()
            .init_resource::<UnitRegistry>()
            .init_resource::<SelectionContext>()
            .add_event::<SelectionChanged>()
            .add_event::<UnitSelected>()
            .add_event::<UnitDeselected>()
            .add_event::<ControlGroupSet>()
            .add_event::<ControlGroupSelected>()
            .add_event::<CueRequest>()
            .add_systems(Startup, load_selection_audio)
            .add_systems(PostStartup, validate_pick_camera)
            .add_systems(
                Update,
                (
                    // Input first so a gesture's events publish the same frame
                    pointer_input_system,
                    group_hotkey_system,
                    relay_notices_system,
                    cue_playback_system,
                    selection_ring_system,
                    drag_rect_visual_system,
                )
                    .chain(),
            );
    }
}
