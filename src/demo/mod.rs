// Demo scene - a small battlefield driven by the selection plugin
//
// Submodules:
// - camera: RTS orbit camera rig
// - setup: Ground, lights, units, HUD
// - orders: Right-click move orders, marching, unit removal

mod camera;
mod orders;
mod setup;

use bevy::prelude::*;

pub struct DemoPlugin;

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<setup::UnitLookup>()
            .add_systems(Startup, (setup::setup_scene, setup::spawn_units))
            // Registry positions must be current before the selection systems pick
            .add_systems(
                PreUpdate,
                (setup::sync_unit_positions, setup::sync_despawned_units),
            )
            .add_systems(
                Update,
                (
                    camera::rts_camera_movement,
                    orders::move_order_system,
                    orders::march_system,
                    orders::despawn_selected_system,
                    setup::update_hud_system,
                ),
            );
    }
}
