// Right-click move orders and unit removal for the demo scene
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use bevy_rts_select::constants::*;
use bevy_rts_select::math_utils::ray_plane_y_intersection;
use bevy_rts_select::selection::ViewportProjector;
use bevy_rts_select::{CameraLens, PickCamera, SelectionContext, UnitRegistry};

use super::setup::{DemoUnit, UnitLookup};

#[derive(Component)]
pub struct MoveOrder {
    pub target: Vec3,
}

/// System: Right-click sends the current selection marching to the ground
/// point under the cursor
pub fn move_order_system(
    mut commands: Commands,
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<PickCamera>>,
    mut context: ResMut<SelectionContext>,
    registry: Res<UnitRegistry>,
    lookup: Res<UnitLookup>,
) {
    if !mouse_button_input.just_pressed(MouseButton::Right) {
        return;
    }
    let Ok(window) = window_query.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let window_size = Vec2::new(window.width(), window.height());
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return;
    }
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let lens = CameraLens::new(camera, camera_transform);
    let Some(ray) = lens.pick_ray(cursor / window_size) else {
        return;
    };
    let Some(target) = ray_plane_y_intersection(ray.origin, ray.direction.as_vec3(), 0.0) else {
        return;
    };

    // Prune dead handles so the order goes to living units only
    context.core.revalidate(&registry);
    let selected = context.core.selected().to_vec();
    if selected.is_empty() {
        return;
    }

    // Fan destinations out on a small grid so units do not stack
    for (i, unit) in selected.iter().enumerate() {
        let Some(&entity) = lookup.by_id.get(unit) else {
            continue;
        };
        let col = (i % UNIT_GRID_WIDTH) as f32 - (UNIT_GRID_WIDTH as f32 - 1.0) / 2.0;
        let row = (i / UNIT_GRID_WIDTH) as f32;
        let offset = Vec3::new(col * ORDER_SPREAD, 0.0, row * ORDER_SPREAD);
        commands.entity(entity).insert(MoveOrder {
            target: target + offset,
        });
    }

    info!(
        "move order: {} unit(s) to ({:.1}, {:.1})",
        selected.len(),
        target.x,
        target.z
    );
}

/// System: March ordered units toward their targets
pub fn march_system(
    time: Res<Time>,
    mut commands: Commands,
    mut query: Query<(Entity, &mut Transform, &MoveOrder), With<DemoUnit>>,
) {
    let delta_time = time.delta_secs();

    for (entity, mut transform, order) in query.iter_mut() {
        // March on the ground plane, ignore the target's Y
        let target = Vec3::new(order.target.x, transform.translation.y, order.target.z);
        if transform.translation.distance(target) < ARRIVAL_THRESHOLD {
            commands.entity(entity).remove::<MoveOrder>();
            continue;
        }

        let direction = (target - transform.translation).normalize_or_zero();
        transform.translation += direction * MARCH_SPEED * delta_time;
        if direction.length_squared() > 0.0 {
            transform.rotation = Quat::from_rotation_y(direction.x.atan2(direction.z));
        }
    }
}

/// System: K destroys the selected units outright. The selection is left
/// untouched so the next operation demonstrates stale-handle pruning.
pub fn despawn_selected_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut commands: Commands,
    mut registry: ResMut<UnitRegistry>,
    mut lookup: ResMut<UnitLookup>,
    context: Res<SelectionContext>,
) {
    if !keyboard_input.just_pressed(KeyCode::KeyK) {
        return;
    }

    let mut destroyed = 0;
    for &unit in context.core.selected() {
        if !registry.deregister(unit) {
            continue;
        }
        if let Some(entity) = lookup.by_id.remove(&unit) {
            commands.entity(entity).despawn();
        }
        destroyed += 1;
    }

    if destroyed > 0 {
        info!("destroyed {} selected unit(s)", destroyed);
    }
}
