// Bevy camera adapter for the viewport projector seam.
use bevy::prelude::*;

use super::picking::{ViewportPoint, ViewportProjector};

/// Marker for the camera the selection systems pick through. Exactly one
/// camera should carry this; startup validation complains when none does.
#[derive(Component)]
pub struct PickCamera;

/// [`ViewportProjector`] over a Bevy camera. Cheap to build per frame.
pub struct CameraLens<'a> {
    camera: &'a Camera,
    transform: &'a GlobalTransform,
}

impl<'a> CameraLens<'a> {
    pub fn new(camera: &'a Camera, transform: &'a GlobalTransform) -> Self {
        Self { camera, transform }
    }
}

impl ViewportProjector for CameraLens<'_> {
    fn project(&self, world: Vec3) -> Option<ViewportPoint> {
        let size = self.camera.logical_viewport_size()?;
        if size.x <= 0.0 || size.y <= 0.0 {
            return None;
        }
        let pixels = self.camera.world_to_viewport(self.transform, world).ok()?;
        // Distance along the view axis; cameras look down their forward dir
        let depth = (world - self.transform.translation()).dot(*self.transform.forward());
        Some(ViewportPoint {
            pos: pixels / size,
            depth,
        })
    }

    fn pick_ray(&self, viewport: Vec2) -> Option<Ray3d> {
        let size = self.camera.logical_viewport_size()?;
        self.camera
            .viewport_to_world(self.transform, viewport * size)
            .ok()
    }
}
