//! # Projections
//!
//! Orthographic and perspective projections. Each keeps its own parameters
//! and a cached matrix that is rebuilt whenever a parameter changes, so the
//! camera can switch between them without losing state.
//!
//! Matrices use OpenGL clip space (depth -1..1). Render drivers targeting
//! wgpu premultiply [`OPENGL_TO_WGPU_MATRIX`](super::OPENGL_TO_WGPU_MATRIX).

use cgmath::{ortho, perspective, Deg, Matrix4, SquareMatrix, Vector3};

/// Which projection a camera renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionType {
    Orthographic,
    #[default]
    Perspective,
}

impl ProjectionType {
    pub fn toggled(self) -> Self {
        match self {
            ProjectionType::Orthographic => ProjectionType::Perspective,
            ProjectionType::Perspective => ProjectionType::Orthographic,
        }
    }
}

/// Box projection with independent bounds per axis and a per-axis scale.
///
/// The horizontal bounds are stretched by the viewport ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicProjection {
    min_x: f32,
    max_x: f32,
    min_y: f32,
    max_y: f32,
    min_z: f32,
    max_z: f32,
    ratio: f32,
    scale: Vector3<f32>,
    matrix: Matrix4<f32>,
}

impl OrthographicProjection {
    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32, min_z: f32, max_z: f32) -> Self {
        let mut projection = Self {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
            ratio: 1.0,
            scale: Vector3::new(1.0, 1.0, 1.0),
            matrix: Matrix4::identity(),
        };
        projection.recalc();
        projection
    }

    pub fn set(&mut self, min_x: f32, max_x: f32, min_y: f32, max_y: f32, min_z: f32, max_z: f32) {
        self.min_x = min_x;
        self.max_x = max_x;
        self.min_y = min_y;
        self.max_y = max_y;
        self.min_z = min_z;
        self.max_z = max_z;
        self.recalc();
    }

    pub fn bounds(&self) -> [f32; 6] {
        [
            self.min_x, self.max_x, self.min_y, self.max_y, self.min_z, self.max_z,
        ]
    }

    pub fn set_ratio(&mut self, ratio: f32) {
        self.ratio = ratio;
        self.recalc();
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
        self.recalc();
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        self.matrix
    }

    /// World units per screen pixel; independent of the viewing distance.
    pub fn coefficient(&self, width: f32) -> f32 {
        (self.max_x - self.min_x) * self.ratio * self.scale.x / width
    }

    fn recalc(&mut self) {
        let s = self.scale;
        self.matrix = ortho(
            self.min_x * self.ratio * s.x,
            self.max_x * self.ratio * s.x,
            self.min_y * s.y,
            self.max_y * s.y,
            self.min_z * s.z,
            self.max_z * s.z,
        );
    }
}

/// Perspective projection with a vertical field of view in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveProjection {
    fov: f32,
    near: f32,
    far: f32,
    ratio: f32,
    matrix: Matrix4<f32>,
}

impl PerspectiveProjection {
    pub fn new(fov: f32, near: f32, far: f32) -> Self {
        let mut projection = Self {
            fov,
            near,
            far,
            ratio: 1.0,
            matrix: Matrix4::identity(),
        };
        projection.recalc();
        projection
    }

    pub fn set(&mut self, fov: f32, near: f32, far: f32) {
        self.fov = fov;
        self.near = near;
        self.far = far;
        self.recalc();
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn set_ratio(&mut self, ratio: f32) {
        self.ratio = ratio;
        self.recalc();
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        self.matrix
    }

    /// World units per screen pixel at `distance` from the eye.
    pub fn coefficient(&self, distance: f32, width: f32) -> f32 {
        distance * (self.fov.to_radians() / 2.0).tan() * self.ratio / width
    }

    fn recalc(&mut self) {
        self.matrix = perspective(Deg(self.fov), self.ratio, self.near, self.far);
    }
}

/// Either projection, for callers that do not care which one is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Orthographic(OrthographicProjection),
    Perspective(PerspectiveProjection),
}

impl Projection {
    pub fn projection_type(&self) -> ProjectionType {
        match self {
            Projection::Orthographic(_) => ProjectionType::Orthographic,
            Projection::Perspective(_) => ProjectionType::Perspective,
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        match self {
            Projection::Orthographic(p) => p.matrix(),
            Projection::Perspective(p) => p.matrix(),
        }
    }

    pub fn ratio(&self) -> f32 {
        match self {
            Projection::Orthographic(p) => p.ratio(),
            Projection::Perspective(p) => p.ratio(),
        }
    }

    pub fn set_ratio(&mut self, ratio: f32) {
        match self {
            Projection::Orthographic(p) => p.set_ratio(ratio),
            Projection::Perspective(p) => p.set_ratio(ratio),
        }
    }

    /// World units per screen pixel; `distance` is ignored by orthographic.
    pub fn coefficient(&self, distance: f32, width: f32) -> f32 {
        match self {
            Projection::Orthographic(p) => p.coefficient(width),
            Projection::Perspective(p) => p.coefficient(distance, width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn approx(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() <= eps * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn test_orthographic_coefficient_ignores_distance() {
        let mut rng = rand::rng();
        let mut ortho = OrthographicProjection::new(-150.0, 150.0, -50.0, 250.0, 0.0, 250.0);
        ortho.set_ratio(1.5);
        let projection = Projection::Orthographic(ortho);

        for _ in 0..50 {
            let width = rng.random_range(1.0..4000.0);
            let d1 = rng.random_range(0.0..1000.0);
            let d2 = rng.random_range(0.0..1000.0);
            assert_eq!(
                projection.coefficient(d1, width),
                projection.coefficient(d2, width)
            );
        }
        assert!(approx(projection.coefficient(0.0, 450.0), 1.0, 1e-6));
    }

    #[test]
    fn test_perspective_coefficient_is_linear_in_distance() {
        let mut rng = rand::rng();
        let mut perspective = PerspectiveProjection::new(45.0, 0.1, 400.0);
        perspective.set_ratio(1.25);

        for _ in 0..50 {
            let width = rng.random_range(1.0..4000.0);
            let d = rng.random_range(0.01..500.0);
            let k = rng.random_range(0.1..10.0);
            let base = perspective.coefficient(d, width);
            assert!(approx(perspective.coefficient(d * k, width), base * k, 1e-4));
        }
    }

    #[test]
    fn test_perspective_coefficient_uses_half_fov() {
        let perspective = PerspectiveProjection::new(90.0, 0.1, 100.0);
        // tan(45deg) == 1
        assert!(approx(perspective.coefficient(10.0, 10.0), 1.0, 1e-5));
    }

    #[test]
    fn test_orthographic_scale_changes_matrix() {
        let mut ortho = OrthographicProjection::new(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
        let before = ortho.matrix();
        ortho.set_scale(Vector3::new(2.0, 2.0, 1.0));
        assert_ne!(before, ortho.matrix());
        assert!(approx(ortho.coefficient(2.0), 2.0, 1e-6));
    }

    #[test]
    fn test_ratio_recalculates_matrix() {
        let mut perspective = PerspectiveProjection::new(45.0, 0.1, 400.0);
        let before = perspective.matrix();
        perspective.set_ratio(2.0);
        assert_eq!(perspective.ratio(), 2.0);
        assert_ne!(before, perspective.matrix());
    }
}
