//! Figure → point list generation.

use super::figures::*;
use super::primitives::{circle, push_quad, side, sphere_bands};
use super::{Point3, PointPack};

/// Maximum angular step, in degrees, used when flattening arcs.
const ARC_STEP_DEGREES: f64 = 5.0;

/// Implemented by every figure descriptor.
pub trait Generate {
    /// Builds the figure as a flat point list.
    fn generate(&self) -> PointPack;
}

/// Generates any figure of the closed [`Figure`] set.
pub fn generate(figure: &Figure) -> PointPack {
    match figure {
        Figure::Line(f) => f.generate(),
        Figure::Stripe(f) => f.generate(),
        Figure::Tube(f) => f.generate(),
        Figure::Cube(f) => f.generate(),
        Figure::WireBox(f) => f.generate(),
        Figure::Sphere(f) => f.generate(),
        Figure::Cylinder(f) => f.generate(),
        Figure::Cone(f) => f.generate(),
        Figure::Grid(f) => f.generate(),
        Figure::Extrusion(f) => f.generate(),
        Figure::Path(f) => f.generate(),
        Figure::Fov(f) => f.generate(),
    }
}

impl Generate for FigureLine {
    fn generate(&self) -> PointPack {
        let (w, l) = (self.width / 2.0, self.length / 2.0);
        let mut points = PointPack::with_capacity(6);
        push_quad(
            &mut points,
            [-w, -l, 0.0],
            [w, -l, 0.0],
            [w, l, 0.0],
            [-w, l, 0.0],
        );
        points
    }
}

impl Generate for FigureStripe {
    fn generate(&self) -> PointPack {
        let upper = &self.upper_shape;
        let lower = &self.lower_shape;
        let sides = upper.len().min(lower.len());
        if sides == 0 {
            return PointPack::new();
        }

        let mut points = PointPack::with_capacity(sides * 6);
        for i in 1..sides {
            push_quad(&mut points, upper[i - 1], upper[i], lower[i], lower[i - 1]);
        }
        push_quad(
            &mut points,
            upper[sides - 1],
            upper[0],
            lower[0],
            lower[sides - 1],
        );

        points
    }
}

impl Generate for FigureTube {
    fn generate(&self) -> PointPack {
        let half = self.height / 2.0;
        let top: PointPack = self.shape.iter().map(|p| [p[0], p[1], half]).collect();
        let bottom: PointPack = self.shape.iter().map(|p| [p[0], p[1], -half]).collect();

        let mut points = FigureStripe::new(top.clone(), bottom.clone()).generate();
        points.extend(side([0.0, 0.0, half], &top, true));
        points.extend(side([0.0, 0.0, -half], &bottom, false));
        points
    }
}

impl Generate for FigureCube {
    fn generate(&self) -> PointPack {
        FigureCylinder {
            radius: (2.0 * self.size * self.size).sqrt() / 2.0,
            height: self.size,
            sides: 4,
            angle: 45.0,
        }
        .generate()
    }
}

impl Generate for FigureSphere {
    fn generate(&self) -> PointPack {
        let bands = sphere_bands(self.radius, self.h_sides, self.v_sides, -self.radius);
        if bands.is_empty() {
            return bands;
        }

        let row = self.h_sides as usize + 1;
        let mut points = PointPack::new();
        for v in 0..self.v_sides as usize {
            for h in 0..self.h_sides as usize {
                let ti = v * row + h;
                let bi = (v + 1) * row + h;
                push_quad(&mut points, bands[ti], bands[ti + 1], bands[bi + 1], bands[bi]);
            }
        }

        points
    }
}

impl Generate for FigureCylinder {
    fn generate(&self) -> PointPack {
        let half = self.height / 2.0;
        let top = circle(self.radius, self.sides, half, self.angle);
        let bottom = circle(self.radius, self.sides, -half, self.angle);

        let mut points = FigureStripe::new(top.clone(), bottom.clone()).generate();
        points.extend(side([0.0, 0.0, half], &top, true));
        points.extend(side([0.0, 0.0, -half], &bottom, false));
        points
    }
}

impl Generate for FigureCone {
    fn generate(&self) -> PointPack {
        let half = self.height / 2.0;
        let base = circle(self.radius, self.sides, -half, 0.0);

        let mut points = side([0.0, 0.0, half], &base, true);
        points.extend(side([0.0, 0.0, -half], &base, false));
        points
    }
}

/// Line offsets of a grid axis: `0, cell, 2·cell, ...` below `max`, then
/// `0, -cell, ...` down to `min`. Counted in whole steps so tiny cells
/// cannot stall the walk.
fn grid_lines(cell: f32, min: f32, max: f32) -> impl Iterator<Item = f32> {
    let (forward, backward) = if cell > 0.0 {
        let forward = if max > 0.0 { (max / cell).ceil() as usize } else { 0 };
        let backward = if min <= 0.0 { (-min / cell).floor() as usize + 1 } else { 0 };
        (forward, backward)
    } else {
        (0, 0)
    };

    (0..forward)
        .map(move |k| k as f32 * cell)
        .chain((0..backward).map(move |k| -(k as f32) * cell))
}

impl Generate for FigureGrid {
    fn generate(&self) -> PointPack {
        let mut points = PointPack::new();

        for x in grid_lines(self.cell_size_x, self.min_x, self.max_x) {
            points.push([x, self.min_y, 0.0]);
            points.push([x, self.max_y, 0.0]);
        }
        for y in grid_lines(self.cell_size_y, self.min_y, self.max_y) {
            points.push([self.min_x, y, 0.0]);
            points.push([self.max_x, y, 0.0]);
        }

        // border
        points.extend_from_slice(&[
            [self.max_x, self.min_y, 0.0],
            [self.max_x, self.max_y, 0.0],
            [self.min_x, self.min_y, 0.0],
            [self.min_x, self.max_y, 0.0],
            [self.max_x, self.max_y, 0.0],
            [self.min_x, self.max_y, 0.0],
            [self.max_x, self.min_y, 0.0],
            [self.min_x, self.min_y, 0.0],
        ]);

        points
    }
}

impl Generate for FigureExtrusion {
    fn generate(&self) -> PointPack {
        if let [first, second] = self.shape.as_slice() {
            let width = (first[0] - second[0]).abs();
            return FigurePath {
                path: self.path.clone(),
                width,
            }
            .generate();
        }

        self.path.clone()
    }
}

impl Generate for FigurePath {
    fn generate(&self) -> PointPack {
        let half = self.width / 2.0;
        let sections: Vec<(Point3, Point3)> = self
            .path
            .iter()
            .map(|p| ([p[0] + half, p[1], p[2]], [p[0] - half, p[1], p[2]]))
            .collect();

        let mut points = PointPack::new();
        for pair in sections.windows(2) {
            let (s1, s2) = (pair[0], pair[1]);
            push_quad(&mut points, s1.0, s2.0, s2.1, s1.1);
        }
        points
    }
}

impl Generate for FigureFov {
    fn generate(&self) -> PointPack {
        let primary_range = f64::from(self.primary_range);
        let primary_fov = f64::from(self.primary_fov);
        let secondary_range = f64::from(self.secondary_range);
        let secondary_fov = f64::from(self.secondary_fov);
        let mounting_angle = f64::from(self.mounting_angle);

        let main_start = -mounting_angle + primary_fov / 2.0 - 90.0;
        let secondary_start = -mounting_angle + secondary_fov / 2.0 - 90.0;
        let wing_sweep = -(secondary_fov - primary_fov) / 2.0;

        let mut outline = Outline::default();
        outline.line_to(0.0, 0.0);
        outline.line_to_polar(secondary_range, secondary_start);
        outline.arc(secondary_range, secondary_start, wing_sweep);
        outline.line_to_polar(primary_range, main_start);
        outline.arc(primary_range, main_start, -primary_fov);
        outline.line_to_polar(secondary_range, main_start - primary_fov);
        outline.arc(secondary_range, main_start - primary_fov, wing_sweep);
        outline.line_to(0.0, 0.0);

        let dx = -f64::from(self.mounting_point[0]);
        let dy = f64::from(self.mounting_point[1]);
        outline
            .points
            .into_iter()
            .map(|(x, y)| [(x + dx) as f32, (y + dy) as f32, 0.0])
            .collect()
    }
}

/// Flattened 2D outline in painter coordinates: an arc point at `angle`
/// degrees lies at `(r·cos, -r·sin)`.
#[derive(Default)]
struct Outline {
    points: Vec<(f64, f64)>,
}

impl Outline {
    fn line_to(&mut self, x: f64, y: f64) {
        let duplicate = self
            .points
            .last()
            .is_some_and(|&(lx, ly)| (lx - x).abs() <= 1e-9 && (ly - y).abs() <= 1e-9);
        if !duplicate {
            self.points.push((x, y));
        }
    }

    fn line_to_polar(&mut self, radius: f64, angle: f64) {
        let rad = angle.to_radians();
        self.line_to(radius * rad.cos(), -radius * rad.sin());
    }

    fn arc(&mut self, radius: f64, start: f64, sweep: f64) {
        self.line_to_polar(radius, start);
        if sweep.abs() <= 1e-9 {
            return;
        }

        let segments = (sweep.abs() / ARC_STEP_DEGREES).ceil() as u32;
        let step = sweep / f64::from(segments);
        for i in 1..=segments {
            self.line_to_polar(radius, start + step * f64::from(i));
        }
    }
}

impl Generate for FigureWireBox {
    fn generate(&self) -> PointPack {
        let s = self.size / 2.0;

        let mut points = vec![
            // bottom
            [-s, -s, -s], [-s, s, -s], [-s, s, -s], [s, s, -s],
            [s, s, -s], [s, -s, -s], [s, -s, -s], [-s, -s, -s],
            // top
            [-s, -s, s], [-s, s, s], [-s, s, s], [s, s, s],
            [s, s, s], [s, -s, s], [s, -s, s], [-s, -s, s],
            // verticals
            [-s, -s, -s], [-s, -s, s], [-s, s, -s], [-s, s, s],
            [s, s, -s], [s, s, s], [s, -s, -s], [s, -s, s],
        ];

        if self.is_crossed {
            points.extend_from_slice(&[
                [-s, -s, -s], [s, s, s], [s, -s, -s], [-s, s, s],
                [-s, s, -s], [s, -s, s], [s, s, -s], [-s, -s, s],
                // trailing zero-length pair kept for existing line-pair consumers
                [0.0, 0.0, 0.0], [0.0, 0.0, 0.0],
            ]);
        }

        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::primitives::is_equal;
    use rand::Rng;

    fn is_free_of_degenerates(points: &[Point3]) -> bool {
        points.chunks_exact(3).all(|t| {
            !is_equal(&t[0], &t[1]) && !is_equal(&t[1], &t[2]) && !is_equal(&t[2], &t[0])
        })
    }

    fn assert_close(a: Point3, b: Point3) {
        assert!(is_equal(&a, &b), "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_triangle_figures_emit_multiples_of_three() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let radius = rng.random_range(0.1..10.0);
            let height = rng.random_range(0.1..10.0);
            let sides = rng.random_range(3..48);

            let figures: Vec<Figure> = vec![
                FigureCube { size: radius }.into(),
                FigureSphere { radius, h_sides: sides, v_sides: sides / 2 + 1 }.into(),
                FigureCylinder { radius, height, sides, angle: rng.random_range(0.0..360.0) }.into(),
                FigureCone { radius, height, sides }.into(),
                FigureLine { width: radius, length: height }.into(),
                FigureTube { shape: circle(radius, sides, 0.0, 0.0), height }.into(),
                FigurePath::new([[0.0, 0.0, 0.0], [1.0, radius, 0.0], [2.0, height, 1.0]], radius).into(),
            ];

            for figure in &figures {
                let points = generate(figure);
                assert!(!points.is_empty(), "{:?}", figure);
                assert_eq!(points.len() % 3, 0, "{:?}", figure);
                assert!(is_free_of_degenerates(&points), "{:?}", figure);
            }
        }
    }

    #[test]
    fn test_cube_matches_four_sided_cylinder() {
        let cube = FigureCube { size: 1.0 }.generate();
        // 4 walls × 2 + 2 caps × 4 triangles
        assert_eq!(cube.len(), 16 * 3);

        for p in &cube {
            for c in p {
                assert!((c.abs() - 0.5).abs() < 1e-5 || c.abs() < 1e-5, "{:?}", p);
            }
        }
    }

    #[test]
    fn test_cylinder_caps_are_flat() {
        let points = FigureCylinder { radius: 1.0, height: 2.0, sides: 8, angle: 0.0 }.generate();
        // 8 walls × 2 + 2 caps × 8
        assert_eq!(points.len(), 32 * 3);
        assert!(points.iter().all(|p| (p[2].abs() - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_cone_has_apex_and_base() {
        let points = FigureCone { radius: 0.5, height: 1.0, sides: 6 }.generate();
        assert_eq!(points.len(), 12 * 3);
        assert_close(points[0], [0.0, 0.0, 0.5]);
        assert_close(points[6 * 3], [0.0, 0.0, -0.5]);
    }

    #[test]
    fn test_sphere_drops_pole_triangles() {
        let points = FigureSphere { radius: 1.0, h_sides: 8, v_sides: 4 }.generate();
        // two pole rows give one triangle per quad, the middle rows two
        assert_eq!(points.len(), (8 + 8 + 16 + 16) * 3);
        for p in &points {
            let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_without_sides_is_empty() {
        assert!(FigureSphere { radius: 1.0, h_sides: 0, v_sides: 4 }.generate().is_empty());
    }

    #[test]
    fn test_stripe_wraps_and_tolerates_mismatch() {
        let upper = vec![[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0]];
        let lower = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]];
        let points = FigureStripe::new(upper.clone(), lower.clone()).generate();
        assert_eq!(points.len(), 3 * 6);

        let short = FigureStripe::new(upper, lower[..2].to_vec()).generate();
        assert_eq!(short.len(), 2 * 6);
    }

    #[test]
    fn test_path_ribbon_offsets_along_x() {
        let points = FigurePath::new([[0.0, 0.0, 0.0], [0.0, 2.0, 0.0]], 1.0).generate();
        assert_eq!(
            points,
            vec![
                [0.5, 0.0, 0.0], [0.5, 2.0, 0.0], [-0.5, 2.0, 0.0],
                [-0.5, 2.0, 0.0], [-0.5, 0.0, 0.0], [0.5, 0.0, 0.0],
            ]
        );
    }

    #[test]
    fn test_path_with_single_point_is_empty() {
        assert!(FigurePath::new([[1.0, 1.0, 1.0]], 2.0).generate().is_empty());
    }

    #[test]
    fn test_extrusion_two_point_shape_becomes_ribbon() {
        let path = vec![[0.0, 0.0, 0.0], [0.0, 3.0, 0.0]];
        let extrusion = FigureExtrusion {
            path: path.clone(),
            shape: vec![[-1.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
        };
        assert_eq!(extrusion.generate(), FigurePath::new(path.clone(), 2.0).generate());

        let passthrough = FigureExtrusion {
            path: path.clone(),
            shape: vec![[0.0; 3]; 3],
        };
        assert_eq!(passthrough.generate(), path);
    }

    #[test]
    fn test_grid_lines_and_border() {
        let grid = FigureGrid {
            min_x: -2.0,
            max_x: 2.0,
            min_y: -1.0,
            max_y: 1.0,
            cell_size_x: 1.0,
            cell_size_y: 1.0,
        };
        let points = grid.generate();
        // x: 0,1 then 0,-1,-2; y: 0 then 0,-1; plus border
        assert_eq!(points.len(), (5 + 3) * 2 + 8);
        assert_eq!(points.len() % 2, 0);
        assert!(points.iter().all(|p| p[2] == 0.0));
    }

    #[test]
    fn test_grid_lines_past_f32_integer_precision() {
        // 1.0 stops advancing an f32 accumulator at 2^24
        let lines = grid_lines(1.0, 0.0, 20_000_000.0);
        assert_eq!(lines.count(), 20_000_000 + 1);
        assert_eq!(grid_lines(0.5, -1.0, 1.0).collect::<Vec<_>>(), vec![0.0, 0.5, 0.0, -0.5, -1.0]);
    }

    #[test]
    fn test_grid_without_cell_size_is_border_only() {
        let grid = FigureGrid {
            min_x: -1.0,
            max_x: 1.0,
            min_y: -1.0,
            max_y: 1.0,
            cell_size_x: 0.0,
            cell_size_y: -1.0,
        };
        assert_eq!(grid.generate().len(), 8);
    }

    #[test]
    fn test_wire_box_edges() {
        let plain = FigureWireBox { size: 2.0, is_crossed: false }.generate();
        assert_eq!(plain.len(), 24);
        assert!(plain.iter().flatten().all(|c| c.abs() == 1.0));

        let crossed = FigureWireBox { size: 2.0, is_crossed: true }.generate();
        assert_eq!(crossed.len(), 34);
        assert_eq!(crossed[32], [0.0; 3]);
        assert_eq!(crossed[33], [0.0; 3]);
    }

    #[test]
    fn test_fov_outline_starts_and_ends_at_mount() {
        let fov = FigureFov {
            mounting_point: [1.0, 2.0],
            mounting_angle: 0.0,
            primary_range: 10.0,
            primary_fov: 30.0,
            secondary_range: 5.0,
            secondary_fov: 90.0,
        };
        let points = fov.generate();
        assert!(points.len() > 8);
        assert_close(points[0], [-1.0, 2.0, 0.0]);
        assert_close(*points.last().unwrap(), [-1.0, 2.0, 0.0]);
        assert!(points.iter().all(|p| p[2] == 0.0));

        let max_reach = points
            .iter()
            .map(|p| ((p[0] + 1.0).powi(2) + (p[1] - 2.0).powi(2)).sqrt())
            .fold(0.0f32, f32::max);
        assert!((max_reach - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_fov_points_forward_along_y() {
        let fov = FigureFov {
            mounting_point: [0.0, 0.0],
            mounting_angle: 0.0,
            primary_range: 10.0,
            primary_fov: 20.0,
            secondary_range: 4.0,
            secondary_fov: 60.0,
        };
        let points = fov.generate();
        // the primary arc is centered on painter angle -90°, i.e. +y
        let far = points
            .iter()
            .copied()
            .max_by(|a, b| a[1].total_cmp(&b[1]))
            .unwrap();
        assert!((far[1] - 10.0).abs() < 1e-3);
        assert!(far[0].abs() < 1e-3);
    }

    #[test]
    fn test_line_figure_is_centered_rectangle() {
        let points = FigureLine { width: 2.0, length: 4.0 }.generate();
        assert_eq!(points.len(), 6);
        assert_close(points[0], [-1.0, -2.0, 0.0]);
        assert_close(points[2], [1.0, 2.0, 0.0]);
    }
}
