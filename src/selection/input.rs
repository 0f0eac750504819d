// Input systems: pointer gestures and control-group hotkeys.
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::registry::UnitRegistry;

use super::camera::{CameraLens, PickCamera};
use super::drag::{DragRect, PointerGesture};
use super::groups::GroupSlot;
use super::picking::{pick_at, pick_in_rect};
use super::{SelectionConfig, SelectionContext};

const DIGIT_KEYS: [(KeyCode, u8); 9] = [
    (KeyCode::Digit1, 1),
    (KeyCode::Digit2, 2),
    (KeyCode::Digit3, 3),
    (KeyCode::Digit4, 4),
    (KeyCode::Digit5, 5),
    (KeyCode::Digit6, 6),
    (KeyCode::Digit7, 7),
    (KeyCode::Digit8, 8),
    (KeyCode::Digit9, 9),
];

/// System: drives the pointer machine and resolves released gestures into
/// selection operations. Press, threshold tracking, release, pick and
/// mutation all happen here in order, so every operation finishes (notices
/// included) before the next input is interpreted. The right button never
/// comes through here, it belongs to the command layer.
pub fn pointer_input_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<PickCamera>>,
    registry: Res<UnitRegistry>,
    config: Res<SelectionConfig>,
    mut context: ResMut<SelectionContext>,
) {
    let Ok(window) = window_query.single() else { return };
    let Ok((camera, camera_transform)) = camera_query.single() else { return };

    // Threshold is configured in physical pixels, cursor coordinates are logical
    context
        .drag
        .set_threshold(config.drag_threshold_px / window.scale_factor());

    let cursor = window.cursor_position();
    if mouse_button.just_pressed(MouseButton::Left) {
        context.drag.on_press(cursor);
    }
    if let Some(position) = cursor {
        context.drag.track_cursor(position);
    }

    if !mouse_button.just_released(MouseButton::Left) {
        return;
    }
    let Some(gesture) = context.drag.on_release() else { return };

    let window_size = Vec2::new(window.width(), window.height());
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return;
    }

    // Modifiers count at release time, not at press
    let additive =
        keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);
    let lens = CameraLens::new(camera, camera_transform);

    match gesture {
        PointerGesture::Click(position) => {
            let hit = pick_at(&lens, &registry, position / window_size);
            if additive {
                // Additive click toggles a hit and ignores empty ground
                if let Some(unit) = hit {
                    context.core.toggle(&registry, unit);
                }
            } else {
                context.core.select_single(&registry, hit);
            }
        }
        PointerGesture::BoxDrag { start, end } => {
            let rect = DragRect::from_corners(start / window_size, end / window_size);
            let hits = pick_in_rect(&lens, &registry, &rect);
            if !hits.is_empty() {
                info!("box pick hit {} unit(s)", hits.len());
            }
            if additive {
                context.core.extend_selection(&registry, &hits);
            } else {
                context.core.select_multiple(&registry, &hits);
            }
        }
    }
}

/// System: digit keys recall control groups, Ctrl+digit stores them. Runs
/// independently of the pointer machine; a recall mid-drag leaves the drag
/// alone.
pub fn group_hotkey_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    registry: Res<UnitRegistry>,
    mut context: ResMut<SelectionContext>,
) {
    let assign =
        keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    for (key, digit) in DIGIT_KEYS {
        if !keyboard.just_pressed(key) {
            continue;
        }
        let Ok(slot) = GroupSlot::try_from(digit) else { continue };
        if assign {
            context.core.set_group(&registry, slot);
        } else {
            context.core.select_group(&registry, slot);
        }
    }
}

/// System: one-shot wiring check once startup spawning is done. The input
/// systems quietly no-op without a pick camera, so say why.
pub fn validate_pick_camera(camera_query: Query<(), With<PickCamera>>) {
    if camera_query.is_empty() {
        error!("no camera carries PickCamera, pointer selection is inert");
    }
}
