// Spatial queries: which unit sits under a point, which units fall in a box.
use bevy::prelude::*;

use crate::math_utils::ray_sphere_intersection;
use crate::registry::{UnitId, UnitRegistry};

use super::drag::DragRect;

/// A world position projected into normalized viewport space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportPoint {
    /// x and y in [0,1], origin top-left, y growing downward.
    pub pos: Vec2,
    /// View-space depth, positive in front of the camera.
    pub depth: f32,
}

/// Camera seam for the spatial queries. The real implementation wraps a Bevy
/// camera ([`CameraLens`]); tests supply fixed projections instead of a
/// render world.
///
/// [`CameraLens`]: super::camera::CameraLens
pub trait ViewportProjector {
    /// Projects a world position, or `None` when the projection degenerates.
    fn project(&self, world: Vec3) -> Option<ViewportPoint>;

    /// World-space ray through a normalized viewport position.
    fn pick_ray(&self, viewport: Vec2) -> Option<Ray3d>;
}

/// Resolves a point pick: casts a ray and takes the nearest collider sphere
/// it enters. Intersection distance decides, never registration order; on an
/// exact tie the earlier slot stays. When the nearest body is not selectable
/// the pick fails outright instead of grabbing whatever hides behind it.
pub fn pick_at(
    projector: &impl ViewportProjector,
    registry: &UnitRegistry,
    viewport: Vec2,
) -> Option<UnitId> {
    let ray = projector.pick_ray(viewport)?;
    let mut nearest: Option<(f32, UnitId, bool)> = None;
    for (id, record) in registry.iter() {
        let Some((distance, _)) = ray_sphere_intersection(
            ray.origin,
            ray.direction.as_vec3(),
            record.position,
            record.collider_radius,
        ) else {
            continue;
        };
        if nearest.map_or(true, |(best, _, _)| distance < best) {
            nearest = Some((distance, id, record.selectable));
        }
    }
    match nearest {
        Some((_, id, true)) => Some(id),
        _ => None,
    }
}

/// Collects every selectable unit whose center projects inside the rect,
/// in front of the camera (`depth > 0`). Bounds are inclusive, so edge
/// contacts and zero-area rects still hit. Results come back in registry
/// slot order; the capacity cutoff downstream relies on that being stable.
pub fn pick_in_rect(
    projector: &impl ViewportProjector,
    registry: &UnitRegistry,
    rect: &DragRect,
) -> Vec<UnitId> {
    let mut hits = Vec::new();
    for (id, record) in registry.iter() {
        if !record.selectable {
            continue;
        }
        let Some(point) = projector.project(record.position) else {
            continue;
        };
        if point.depth > 0.0 && rect.contains(point.pos) {
            hits.push(id);
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::UnitRecord;

    /// Fixed projection: world x/y map straight to viewport coordinates,
    /// world z is the depth. Pick rays start at the viewport point on the
    /// z = 0 plane and head toward +Z.
    struct FlatProjector;

    impl ViewportProjector for FlatProjector {
        fn project(&self, world: Vec3) -> Option<ViewportPoint> {
            if !world.is_finite() {
                return None;
            }
            Some(ViewportPoint {
                pos: world.truncate(),
                depth: world.z,
            })
        }

        fn pick_ray(&self, viewport: Vec2) -> Option<Ray3d> {
            Some(Ray3d {
                origin: Vec3::new(viewport.x, viewport.y, 0.0),
                direction: Dir3::Z,
            })
        }
    }

    /// A camera that cannot resolve anything (no viewport yet).
    struct BlindProjector;

    impl ViewportProjector for BlindProjector {
        fn project(&self, _world: Vec3) -> Option<ViewportPoint> {
            None
        }

        fn pick_ray(&self, _viewport: Vec2) -> Option<Ray3d> {
            None
        }
    }

    fn unit_at(registry: &mut UnitRegistry, position: Vec3, radius: f32) -> UnitId {
        let mut record = UnitRecord::at(position);
        record.collider_radius = radius;
        registry.register(record)
    }

    #[test]
    fn nearest_hit_wins_regardless_of_registration_order() {
        let mut registry = UnitRegistry::default();
        let far = unit_at(&mut registry, Vec3::new(0.5, 0.5, 20.0), 1.0);
        let near = unit_at(&mut registry, Vec3::new(0.5, 0.5, 5.0), 1.0);
        assert!(far.index() < near.index());
        assert_eq!(
            pick_at(&FlatProjector, &registry, Vec2::new(0.5, 0.5)),
            Some(near)
        );
    }

    #[test]
    fn exact_tie_keeps_the_earlier_slot() {
        let mut registry = UnitRegistry::default();
        let first = unit_at(&mut registry, Vec3::new(0.5, 0.5, 10.0), 1.0);
        let _second = unit_at(&mut registry, Vec3::new(0.5, 0.5, 10.0), 1.0);
        assert_eq!(
            pick_at(&FlatProjector, &registry, Vec2::new(0.5, 0.5)),
            Some(first)
        );
    }

    #[test]
    fn unselectable_nearest_blocks_the_pick() {
        let mut registry = UnitRegistry::default();
        let blocker = unit_at(&mut registry, Vec3::new(0.5, 0.5, 5.0), 1.0);
        registry.get_mut(blocker).unwrap().selectable = false;
        let _behind = unit_at(&mut registry, Vec3::new(0.5, 0.5, 20.0), 1.0);
        assert_eq!(pick_at(&FlatProjector, &registry, Vec2::new(0.5, 0.5)), None);
    }

    #[test]
    fn pick_misses_off_axis_units() {
        let mut registry = UnitRegistry::default();
        unit_at(&mut registry, Vec3::new(0.9, 0.9, 10.0), 0.05);
        assert_eq!(pick_at(&FlatProjector, &registry, Vec2::new(0.1, 0.1)), None);
    }

    #[test]
    fn no_ray_means_no_pick() {
        let mut registry = UnitRegistry::default();
        unit_at(&mut registry, Vec3::new(0.5, 0.5, 5.0), 1.0);
        assert_eq!(pick_at(&BlindProjector, &registry, Vec2::new(0.5, 0.5)), None);
        assert!(pick_in_rect(
            &BlindProjector,
            &registry,
            &DragRect::from_corners(Vec2::ZERO, Vec2::ONE)
        )
        .is_empty());
    }

    #[test]
    fn rect_hits_come_back_in_slot_order() {
        let mut registry = UnitRegistry::default();
        let a = unit_at(&mut registry, Vec3::new(0.8, 0.8, 3.0), 1.0);
        let b = unit_at(&mut registry, Vec3::new(0.2, 0.2, 9.0), 1.0);
        let c = unit_at(&mut registry, Vec3::new(0.5, 0.5, 1.0), 1.0);
        let rect = DragRect::from_corners(Vec2::ZERO, Vec2::ONE);
        assert_eq!(pick_in_rect(&FlatProjector, &registry, &rect), vec![a, b, c]);
    }

    #[test]
    fn rect_bounds_are_inclusive() {
        let mut registry = UnitRegistry::default();
        let on_corner = unit_at(&mut registry, Vec3::new(0.6, 0.6, 1.0), 1.0);
        let outside = unit_at(&mut registry, Vec3::new(0.601, 0.4, 1.0), 1.0);
        let rect = DragRect::from_corners(Vec2::new(0.4, 0.4), Vec2::new(0.6, 0.6));
        let hits = pick_in_rect(&FlatProjector, &registry, &rect);
        assert!(hits.contains(&on_corner));
        assert!(!hits.contains(&outside));
    }

    #[test]
    fn rect_requires_positive_depth() {
        let mut registry = UnitRegistry::default();
        unit_at(&mut registry, Vec3::new(0.5, 0.5, 0.0), 1.0);
        unit_at(&mut registry, Vec3::new(0.5, 0.5, -4.0), 1.0);
        let in_front = unit_at(&mut registry, Vec3::new(0.5, 0.5, 4.0), 1.0);
        let rect = DragRect::from_corners(Vec2::ZERO, Vec2::ONE);
        assert_eq!(pick_in_rect(&FlatProjector, &registry, &rect), vec![in_front]);
    }

    #[test]
    fn rect_skips_unselectable_units() {
        let mut registry = UnitRegistry::default();
        let hidden = unit_at(&mut registry, Vec3::new(0.5, 0.5, 2.0), 1.0);
        registry.get_mut(hidden).unwrap().selectable = false;
        let visible = unit_at(&mut registry, Vec3::new(0.5, 0.5, 2.0), 1.0);
        let rect = DragRect::from_corners(Vec2::ZERO, Vec2::ONE);
        assert_eq!(pick_in_rect(&FlatProjector, &registry, &rect), vec![visible]);
    }
}
