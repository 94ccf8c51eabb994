//! # Primitive Building Blocks
//!
//! Low-level helpers shared by the figure generators: triangles, quads,
//! fan caps and circle loops. Degenerate triangles are dropped here, so every
//! figure built on top of these helpers is free of zero-area faces.

use super::{Point3, PointPack};

/// Per-coordinate tolerance used by [`is_equal`].
pub const POINT_EPSILON: f32 = 1e-5;

/// Fuzzy point equality: each coordinate is compared independently
/// (not a distance test).
pub fn is_equal(p1: &Point3, p2: &Point3) -> bool {
    (p1[0] - p2[0]).abs() <= POINT_EPSILON
        && (p1[1] - p2[1]).abs() <= POINT_EPSILON
        && (p1[2] - p2[2]).abs() <= POINT_EPSILON
}

/// Appends the triangle `(p1, p2, p3)` unless two of its corners coincide.
pub fn push_triangle(points: &mut PointPack, p1: Point3, p2: Point3, p3: Point3) {
    if !is_equal(&p1, &p2) && !is_equal(&p2, &p3) && !is_equal(&p3, &p1) {
        points.extend_from_slice(&[p1, p2, p3]);
    }
}

/// Returns the triangle `(p1, p2, p3)`, or nothing if it is degenerate.
pub fn triangle(p1: Point3, p2: Point3, p3: Point3) -> PointPack {
    let mut points = PointPack::with_capacity(3);
    push_triangle(&mut points, p1, p2, p3);
    points
}

/// Appends quad `p1 p2 p3 p4` split along the `p1`-`p3` diagonal into
/// `(p1, p2, p3)` and `(p3, p4, p1)`.
pub fn push_quad(points: &mut PointPack, p1: Point3, p2: Point3, p3: Point3, p4: Point3) {
    push_triangle(points, p1, p2, p3);
    push_triangle(points, p3, p4, p1);
}

/// Returns the (at most two) triangles of quad `p1 p2 p3 p4`.
pub fn quad(p1: Point3, p2: Point3, p3: Point3, p4: Point3) -> PointPack {
    let mut points = PointPack::with_capacity(6);
    push_quad(&mut points, p1, p2, p3, p4);
    points
}

/// Triangle fan from `center` to every consecutive pair of `loop_points`,
/// closing from the last point back to the first.
///
/// `is_ccw` selects the winding; caps on opposite ends of a solid use
/// opposite windings so both face outward.
pub fn side(center: Point3, loop_points: &[Point3], is_ccw: bool) -> PointPack {
    let mut points = PointPack::new();
    let Some(&last) = loop_points.last() else {
        return points;
    };

    let closing = std::iter::once((last, loop_points[0]));
    let pairs = loop_points.windows(2).map(|w| (w[0], w[1])).chain(closing);

    for (p1, p2) in pairs {
        if is_ccw {
            push_triangle(&mut points, center, p2, p1);
        } else {
            push_triangle(&mut points, center, p1, p2);
        }
    }

    points
}

/// `sides + 1` points on a circle of `radius` at height `z`; the first and
/// last point coincide.
///
/// Point `s` sits at angle `s * 2π / sides + start_angle` measured from +Y
/// towards +X (`x = r·sin`, `y = r·cos`). `start_angle` is in degrees.
pub fn circle(radius: f32, sides: u32, z: f32, start_angle: f32) -> PointPack {
    if sides == 0 {
        return PointPack::new();
    }

    let step = 2.0 * std::f32::consts::PI / sides as f32;
    let offset = start_angle.to_radians();

    (0..=sides)
        .map(|s| {
            let angle = s as f32 * step + offset;
            [radius * angle.sin(), radius * angle.cos(), z]
        })
        .collect()
}

/// Latitude bands of a sphere of `radius` whose lowest point sits at `z`.
///
/// Band `v` (of `sides_v + 1`) is a circle of radius `r·sin(θ)` at height
/// `z + r + r·cos(θ)` with `θ = v·π / sides_v`, so band 0 is the top pole.
/// Each band holds `sides_h + 1` points.
pub fn sphere_bands(radius: f32, sides_h: u32, sides_v: u32, z: f32) -> PointPack {
    if sides_v == 0 || sides_h == 0 {
        return PointPack::new();
    }

    let mut points = PointPack::with_capacity(((sides_v + 1) * (sides_h + 1)) as usize);
    for v in 0..=sides_v {
        let angle_v = v as f32 * std::f32::consts::PI / sides_v as f32;
        let h = radius + radius * angle_v.cos();
        let r = radius * angle_v.sin();
        points.extend(circle(r, sides_h, z + h, 0.0));
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_equal_is_per_coordinate() {
        assert!(is_equal(&[1.0, 2.0, 3.0], &[1.000001, 2.0, 3.0]));
        assert!(!is_equal(&[1.0, 2.0, 3.0], &[1.0, 2.001, 3.0]));
    }

    #[test]
    fn test_degenerate_triangle_dropped() {
        assert!(triangle([0.0; 3], [0.0; 3], [1.0, 0.0, 0.0]).is_empty());
        assert!(triangle([0.0; 3], [1.0, 0.0, 0.0], [0.0; 3]).is_empty());
        assert_eq!(triangle([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]).len(), 3);
    }

    #[test]
    fn test_quad_split_order() {
        let p1 = [0.0, 0.0, 0.0];
        let p2 = [1.0, 0.0, 0.0];
        let p3 = [1.0, 1.0, 0.0];
        let p4 = [0.0, 1.0, 0.0];
        assert_eq!(quad(p1, p2, p3, p4), vec![p1, p2, p3, p3, p4, p1]);
    }

    #[test]
    fn test_quad_with_coincident_corners_keeps_at_most_one_triangle() {
        let p = [0.5, 0.5, 0.0];
        let points = quad(p, p, [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]);
        assert_eq!(points.len(), 3);
        assert_eq!(points, vec![[1.0, 1.0, 0.0], [0.0, 1.0, 0.0], p]);
    }

    #[test]
    fn test_circle_closes() {
        let points = circle(2.0, 12, 1.5, 0.0);
        assert_eq!(points.len(), 13);
        assert!(is_equal(&points[0], &points[12]));
        assert!(is_equal(&points[0], &[0.0, 2.0, 1.5]));
        assert!(points.iter().all(|p| p[2] == 1.5));
    }

    #[test]
    fn test_circle_start_angle() {
        let points = circle(1.0, 4, 0.0, 90.0);
        assert!(is_equal(&points[0], &[1.0, 0.0, 0.0]));
        assert!(is_equal(&points[1], &[0.0, -1.0, 0.0]));
    }

    #[test]
    fn test_circle_without_sides_is_empty() {
        assert!(circle(1.0, 0, 0.0, 0.0).is_empty());
    }

    #[test]
    fn test_side_fan_winding_flips() {
        let ring = circle(1.0, 4, 0.0, 0.0);
        let ccw = side([0.0; 3], &ring, true);
        let cw = side([0.0; 3], &ring, false);
        // 4 real triangles, the closing one is degenerate (first == last)
        assert_eq!(ccw.len(), 12);
        assert_eq!(cw.len(), 12);
        assert_eq!(ccw[1], cw[2]);
        assert_eq!(ccw[2], cw[1]);
    }

    #[test]
    fn test_sphere_bands_layout() {
        let points = sphere_bands(1.0, 8, 4, -1.0);
        assert_eq!(points.len(), 5 * 9);
        // top pole, bottom pole
        assert!(is_equal(&points[0], &[0.0, 0.0, 1.0]));
        assert!(is_equal(&points[4 * 9], &[0.0, 0.0, -1.0]));
    }
}
