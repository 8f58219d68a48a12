// src/data_analysis/ray_intersection.rs

use glam::DVec3;

use crate::constants::PARALLEL_EPSILON;
use crate::data_input::frame_data::Frame;

/// A half-line from an eye origin along its gaze direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    pub fn point_at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Midpoint of the closest approach between two lines.
///
/// Each ray is treated as an infinite line `origin + t * direction`; the
/// directions need not be normalized. When the lines are parallel within
/// `PARALLEL_EPSILON`, the midpoint of the two origins is returned.
pub fn closest_midpoint(origin_a: DVec3, dir_a: DVec3, origin_b: DVec3, dir_b: DVec3) -> DVec3 {
    let d1 = dir_a.normalize_or_zero();
    let d2 = dir_b.normalize_or_zero();
    let w = origin_b - origin_a;

    let a = d1.dot(d1);
    let b = d1.dot(d2);
    let c = d2.dot(d2);
    let d = d1.dot(w);
    let e = d2.dot(w);

    let denominator = a * c - b * b;
    if denominator.abs() < PARALLEL_EPSILON {
        return (origin_a + origin_b) / 2.0;
    }

    let t = (d * c - b * e) / denominator;
    let u = (b * d - a * e) / denominator;

    let point_on_a = origin_a + d1 * t;
    let point_on_b = origin_b + d2 * u;
    (point_on_a + point_on_b) / 2.0
}

/// Estimated binocular convergence point for one frame.
pub fn convergence_point(frame: &Frame) -> DVec3 {
    let left = frame.left_ray();
    let right = frame.right_ray();
    closest_midpoint(left.origin, left.direction, right.origin, right.direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: DVec3, expected: DVec3) {
        assert!(
            actual.distance(expected) < 1e-9,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_intersecting_rays_meet_exactly() {
        let p = closest_midpoint(
            DVec3::ZERO,
            DVec3::X,
            DVec3::new(5.0, 5.0, 0.0),
            DVec3::new(0.0, -1.0, 0.0),
        );
        assert_close(p, DVec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_unnormalized_directions() {
        let p = closest_midpoint(
            DVec3::ZERO,
            DVec3::new(3.0, 0.0, 0.0),
            DVec3::new(5.0, 5.0, 0.0),
            DVec3::new(0.0, -0.25, 0.0),
        );
        assert_close(p, DVec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_skew_lines_midpoint() {
        // Line A along X at z=0, line B along Y at z=2; closest points are
        // (0,0,0) and (0,0,2).
        let p = closest_midpoint(
            DVec3::new(-4.0, 0.0, 0.0),
            DVec3::X,
            DVec3::new(0.0, 7.0, 2.0),
            DVec3::Y,
        );
        assert_close(p, DVec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_parallel_rays_return_origin_midpoint() {
        let a = DVec3::new(0.0, 0.0, 0.0);
        let b = DVec3::new(2.0, 4.0, 6.0);
        let dir = DVec3::new(0.0, 0.0, 1.0);
        assert_eq!(closest_midpoint(a, dir, b, dir), DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_anti_parallel_rays_return_origin_midpoint() {
        let a = DVec3::new(-1.0, 0.0, 0.0);
        let b = DVec3::new(1.0, 0.0, 0.0);
        let p = closest_midpoint(a, DVec3::Z, b, -DVec3::Z);
        assert_eq!(p, DVec3::ZERO);
    }

    #[test]
    fn test_ray_point_at() {
        let ray = Ray::new(DVec3::new(1.0, 1.0, 1.0), DVec3::new(0.0, 2.0, 0.0));
        assert_eq!(ray.point_at(1.5), DVec3::new(1.0, 4.0, 1.0));
    }
}
