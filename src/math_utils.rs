use bevy::prelude::*;

/// Ray-sphere intersection.
/// Returns Some((distance, hit_point)) for the nearest intersection in front
/// of the origin, falling back to the exit point when the origin sits inside
/// the sphere.
pub fn ray_sphere_intersection(
    origin: Vec3,
    direction: Vec3,
    center: Vec3,
    radius: f32,
) -> Option<(f32, Vec3)> {
    let to_origin = origin - center;
    let a = direction.length_squared();
    let half_b = to_origin.dot(direction);
    let c = to_origin.length_squared() - radius * radius;
    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    // Entry point first, exit point covers rays starting inside the sphere
    for t in [(-half_b - sqrt_d) / a, (-half_b + sqrt_d) / a] {
        if t > 0.0 {
            return Some((t, origin + direction * t));
        }
    }
    None
}

/// Intersection of a ray with the horizontal plane at `plane_y`.
pub fn ray_plane_y_intersection(origin: Vec3, direction: Vec3, plane_y: f32) -> Option<Vec3> {
    if direction.y.abs() < f32::EPSILON {
        return None;
    }
    let t = (plane_y - origin.y) / direction.y;
    if t > 0.0 {
        Some(origin + direction * t)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_hit_straight_ahead() {
        let hit = ray_sphere_intersection(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 10.0), 2.0);
        let (t, point) = hit.unwrap();
        assert!((t - 8.0).abs() < 1e-5);
        assert!((point.z - 8.0).abs() < 1e-5);
    }

    #[test]
    fn sphere_miss() {
        let hit = ray_sphere_intersection(Vec3::ZERO, Vec3::Z, Vec3::new(5.0, 0.0, 10.0), 2.0);
        assert!(hit.is_none());
    }

    #[test]
    fn sphere_behind_origin_misses() {
        let hit = ray_sphere_intersection(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -10.0), 2.0);
        assert!(hit.is_none());
    }

    #[test]
    fn origin_inside_sphere_uses_exit() {
        let (t, _) = ray_sphere_intersection(Vec3::ZERO, Vec3::Z, Vec3::ZERO, 3.0).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn ground_plane_hit() {
        let hit = ray_plane_y_intersection(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 1.0), 0.0);
        let point = hit.unwrap();
        assert!((point.y).abs() < 1e-5);
        assert!((point.z - 10.0).abs() < 1e-4);
    }

    #[test]
    fn parallel_ray_misses_plane() {
        assert!(ray_plane_y_intersection(Vec3::new(0.0, 10.0, 0.0), Vec3::X, 0.0).is_none());
    }
}
