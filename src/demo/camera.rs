// RTS orbit camera rig for the demo scene
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use bevy_rts_select::constants::*;

/// Orbit rig state; the camera transform is derived from it every frame.
#[derive(Component)]
pub struct RtsCamera {
    pub focus: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl RtsCamera {
    /// Rebuilds the camera transform from focus, yaw, pitch and distance.
    pub fn apply_to(&self, transform: &mut Transform) {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0);
        transform.translation = self.focus + rotation * Vec3::new(0.0, 0.0, self.distance);
        transform.rotation = rotation;
    }
}

pub fn rts_camera_movement(
    time: Res<Time>,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    mut scroll_events: EventReader<MouseWheel>,
    mut mouse_motion_events: EventReader<MouseMotion>,
    mut camera_query: Query<(&mut Transform, &mut RtsCamera)>,
) {
    let Ok((mut transform, mut rig)) = camera_query.single_mut() else {
        return;
    };

    orbit(&mut rig, &mouse_button_input, &mut mouse_motion_events);
    pan(&mut rig, &keyboard_input, time.delta_secs());
    zoom(&mut rig, &mut scroll_events);
    rig.apply_to(&mut transform);
}

/// Middle-drag orbit; the left button belongs to selection.
fn orbit(
    rig: &mut RtsCamera,
    buttons: &ButtonInput<MouseButton>,
    motion: &mut EventReader<MouseMotion>,
) {
    if !buttons.pressed(MouseButton::Middle) {
        // Drop accumulated motion so orbit does not jump on the next drag
        motion.clear();
        return;
    }
    for event in motion.read() {
        rig.yaw -= event.delta.x * CAMERA_ROTATION_SPEED;
        // Keep the look angle in RTS range
        rig.pitch = (rig.pitch - event.delta.y * CAMERA_ROTATION_SPEED).clamp(-1.5, -0.1);
    }
}

/// WASD / arrow panning, yaw-relative so it stays on the ground plane.
fn pan(rig: &mut RtsCamera, keys: &ButtonInput<KeyCode>, delta_time: f32) {
    let east = key_axis(keys, KeyCode::KeyD, KeyCode::ArrowRight)
        - key_axis(keys, KeyCode::KeyA, KeyCode::ArrowLeft);
    let south = key_axis(keys, KeyCode::KeyS, KeyCode::ArrowDown)
        - key_axis(keys, KeyCode::KeyW, KeyCode::ArrowUp);
    let movement = Vec3::new(east, 0.0, south);
    if movement == Vec3::ZERO {
        return;
    }
    rig.focus +=
        Quat::from_rotation_y(rig.yaw) * movement.normalize() * CAMERA_SPEED * delta_time;
}

fn key_axis(keys: &ButtonInput<KeyCode>, a: KeyCode, b: KeyCode) -> f32 {
    if keys.pressed(a) || keys.pressed(b) {
        1.0
    } else {
        0.0
    }
}

/// Wheel zoom toward the focus point, clamped to the rig's range.
fn zoom(rig: &mut RtsCamera, scroll: &mut EventReader<MouseWheel>) {
    for event in scroll.read() {
        let step = match event.unit {
            MouseScrollUnit::Line => event.y * CAMERA_ZOOM_SPEED,
            MouseScrollUnit::Pixel => event.y * CAMERA_ZOOM_SPEED * 0.1,
        };
        rig.distance = (rig.distance - step).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }
}
