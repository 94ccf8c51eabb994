//! # Scene Camera
//!
//! A yaw/pitch camera over a Z-up world with switchable projections,
//! range-limited state and screen/world conversions.
//!
//! Angles are in degrees. Yaw is measured in the XY plane from +X, pitch is
//! the elevation of the view direction. `zoom` scales the view matrix
//! uniformly, `scale` stretches the orthographic volume per axis.
//!
//! Every public mutator leaves exactly one change notification: the new
//! projection x view matrix is stored for [`Camera::take_change`] and handed
//! to the listener installed with [`Camera::set_listener`], if any. The
//! listener runs inside the mutator and must not mutate the camera.

use cgmath::{
    EuclideanSpace, InnerSpace, Matrix4, Point3, SquareMatrix, Vector3, Vector4, Zero,
};

use super::camera_utils::CameraUniform;
use super::projection::{OrthographicProjection, PerspectiveProjection, Projection, ProjectionType};
use super::range::RangeLimits;
use crate::gfx::defaults;

/// Components below this magnitude are treated as zero when intersecting
/// screen rays with a Z plane.
const FUZZY_EPSILON: f32 = 1e-5;

/// Minimum Z separation forced between the near and far unprojected points.
const MIN_RAY_DEPTH: f32 = 0.001;

/// Receives the projection x view matrix after each camera change.
pub type CameraListener = Box<dyn FnMut(&Matrix4<f32>)>;

/// Direction for [`Camera::move_direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementDirection {
    /// Along the view direction, scaled by the camera speed.
    Forward,
    Right,
    Up,
    /// Along the screen-up direction flattened onto the XY plane.
    XYForward,
}

/// Initial camera state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub position: Vector3<f32>,
    pub world_up: Vector3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
    pub sensitivity: f32,
    pub zoom: f32,
    pub scale: Vector3<f32>,
    pub projection_type: ProjectionType,
    pub perspective: PerspectiveProjection,
    pub ortho: OrthographicProjection,
    pub limits: RangeLimits,
}

impl Default for CameraSettings {
    fn default() -> Self {
        defaults::cameras::default_settings()
    }
}

pub struct Camera {
    position: Vector3<f32>,
    world_up: Vector3<f32>,
    front: Vector3<f32>,
    right: Vector3<f32>,
    up: Vector3<f32>,
    xy_front: Vector3<f32>,
    /// Eye position relative to `look_point`.
    look: Vector3<f32>,
    look_point: Vector3<f32>,

    yaw: f32,
    pitch: f32,
    speed: f32,
    sensitivity: f32,
    zoom: f32,
    scale: Vector3<f32>,

    view: Matrix4<f32>,
    projection_type: ProjectionType,
    perspective: PerspectiveProjection,
    ortho: OrthographicProjection,
    limits: RangeLimits,
    viewport: (i32, i32),

    pending_change: Option<Matrix4<f32>>,
    change_count: u64,
    listener: Option<CameraListener>,
}

impl Camera {
    pub fn new(settings: CameraSettings) -> Self {
        let mut camera = Self {
            position: settings.position,
            world_up: settings.world_up,
            front: Vector3::unit_y(),
            right: Vector3::unit_x(),
            up: Vector3::unit_z(),
            xy_front: Vector3::unit_y(),
            look: Vector3::zero(),
            look_point: Vector3::zero(),
            yaw: settings.yaw,
            pitch: settings.pitch,
            speed: settings.speed,
            sensitivity: settings.sensitivity,
            zoom: settings.zoom,
            scale: settings.scale,
            view: Matrix4::identity(),
            projection_type: settings.projection_type,
            perspective: settings.perspective,
            ortho: settings.ortho,
            limits: settings.limits,
            viewport: (1, 1),
            pending_change: None,
            change_count: 0,
            listener: None,
        };
        camera.update(true, true);
        camera
    }

    // ----- accessors -----

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn world_up(&self) -> Vector3<f32> {
        self.world_up
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn xy_front(&self) -> Vector3<f32> {
        self.xy_front
    }

    /// Vector from the look point to the eye.
    pub fn look(&self) -> Vector3<f32> {
        self.look
    }

    /// World point under the viewport center on the `z = 0` plane.
    pub fn look_point(&self) -> Vector3<f32> {
        self.look_point
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn zoom_factor(&self) -> f32 {
        self.zoom
    }

    pub fn scale_factor(&self) -> Vector3<f32> {
        self.scale
    }

    pub fn limits(&self) -> &RangeLimits {
        &self.limits
    }

    pub fn viewport(&self) -> (i32, i32) {
        self.viewport
    }

    pub fn projection_type(&self) -> ProjectionType {
        self.projection_type
    }

    pub fn perspective(&self) -> &PerspectiveProjection {
        &self.perspective
    }

    pub fn ortho(&self) -> &OrthographicProjection {
        &self.ortho
    }

    /// The active projection.
    pub fn projection(&self) -> Projection {
        match self.projection_type {
            ProjectionType::Orthographic => Projection::Orthographic(self.ortho),
            ProjectionType::Perspective => Projection::Perspective(self.perspective),
        }
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.projection_type {
            ProjectionType::Orthographic => self.ortho.matrix(),
            ProjectionType::Perspective => self.perspective.matrix(),
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view
    }

    /// Projection x view.
    pub fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view
    }

    /// World units per screen pixel at the camera height.
    pub fn projection_coefficient(&self) -> f32 {
        let width = self.viewport.0.max(1) as f32;
        self.projection().coefficient(self.position.z, width)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform::from_camera(self)
    }

    // ----- change notification -----

    /// Installs the listener called once per public mutator.
    pub fn set_listener(&mut self, listener: impl FnMut(&Matrix4<f32>) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// Consumes the pending notification, returning the latest matrix.
    pub fn take_change(&mut self) -> Option<Matrix4<f32>> {
        self.pending_change.take()
    }

    /// Number of notifications emitted so far.
    pub fn change_count(&self) -> u64 {
        self.change_count
    }

    fn notify(&mut self) {
        let matrix = self.transformation();
        self.pending_change = Some(matrix);
        self.change_count += 1;
        if let Some(listener) = self.listener.as_mut() {
            listener(&matrix);
        }
    }

    // ----- movement -----

    /// Moves along `direction`. Right, up and XY-forward moves are scaled by
    /// the projection coefficient so `delta` is measured in screen pixels.
    pub fn move_direction(&mut self, direction: MovementDirection, delta: f32) {
        let k = self.projection_coefficient();
        match direction {
            MovementDirection::XYForward => self.move_xy_front(delta * k),
            MovementDirection::Forward => self.move_front(self.speed * delta),
            MovementDirection::Right => self.move_right(delta * k),
            MovementDirection::Up => self.move_up(delta * k),
        }
    }

    pub fn move_front(&mut self, delta: f32) {
        self.move_by(self.front * delta);
    }

    pub fn move_xy_front(&mut self, delta: f32) {
        self.move_by(self.xy_front * delta);
    }

    pub fn move_up(&mut self, delta: f32) {
        self.move_by(self.up * delta);
    }

    pub fn move_right(&mut self, delta: f32) {
        self.move_by(self.right * delta);
    }

    pub fn move_by(&mut self, delta: Vector3<f32>) {
        self.position += delta;
        self.update(false, true);
        self.notify();
    }

    /// Shifts the eye so the XY projection of `point` becomes the look point.
    pub fn focus(&mut self, point: Vector3<f32>) {
        let mut delta = point - self.look_point;
        delta.z = 0.0;
        self.position += delta;
        self.update(false, true);
        self.notify();
    }

    // ----- rotation -----

    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.apply_rotation(delta_yaw, delta_pitch);
        self.notify();
    }

    /// Rotation by pointer deltas, scaled by the sensitivity.
    pub fn rotate_pixels(&mut self, delta_x: i32, delta_y: i32) {
        self.rotate(
            delta_x as f32 * self.sensitivity,
            delta_y as f32 * self.sensitivity,
        );
    }

    /// Orbits around the look point: rotates, then moves the eye by the
    /// change of the front vector scaled by the look distance.
    pub fn rotate_around(&mut self, delta_yaw: f32, delta_pitch: f32) {
        let old_front = self.front;
        self.apply_rotation(delta_yaw, delta_pitch);
        self.position -= (self.front - old_front) * self.look.magnitude();
        self.update(false, false);
        self.notify();
    }

    pub fn rotate_around_pixels(&mut self, delta_x: i32, delta_y: i32) {
        self.rotate_around(
            delta_x as f32 * self.sensitivity,
            delta_y as f32 * self.sensitivity,
        );
    }

    fn apply_rotation(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch += delta_pitch;
        self.update(true, false);
    }

    // ----- zoom and scale -----

    pub fn zoom(&mut self, delta: f32) {
        self.zoom -= delta * self.sensitivity;
        self.update(false, false);
        self.notify();
    }

    /// Adds to the orthographic scale.
    pub fn scale(&mut self, delta: Vector3<f32>) {
        self.scale += delta * self.sensitivity;
        self.update(false, false);
        self.notify();
    }

    // ----- setters -----

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
        self.update(false, true);
        self.notify();
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.update(true, false);
        self.notify();
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
        self.update(true, false);
        self.notify();
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
        self.update(true, false);
        self.notify();
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
        self.update(false, false);
        self.notify();
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }

    pub fn set_limits(&mut self, limits: RangeLimits) {
        self.limits = limits;
        self.update(false, true);
        self.notify();
    }

    /// Replaces the perspective parameters. The viewport ratio is kept.
    pub fn set_perspective(&mut self, perspective: PerspectiveProjection) {
        let ratio = self.perspective.ratio();
        self.perspective = perspective;
        self.perspective.set_ratio(ratio);
        self.calculate_view_matrix();
        self.notify();
    }

    /// Replaces the orthographic parameters. The viewport ratio and camera
    /// scale are kept.
    pub fn set_ortho(&mut self, ortho: OrthographicProjection) {
        let ratio = self.ortho.ratio();
        self.ortho = ortho;
        self.ortho.set_ratio(ratio);
        self.ortho.set_scale(self.scale);
        self.calculate_view_matrix();
        self.notify();
    }

    pub fn set_projection_type(&mut self, projection_type: ProjectionType) {
        self.projection_type = projection_type;
        self.update(false, false);
        self.notify();
    }

    pub fn switch_projection(&mut self) {
        self.set_projection_type(self.projection_type.toggled());
    }

    /// Sets the viewport size in pixels; a zero height is treated as one.
    pub fn set_viewport(&mut self, width: i32, height: i32) {
        let ratio = width as f32 / height.max(1) as f32;
        self.perspective.set_ratio(ratio);
        self.ortho.set_ratio(ratio);
        self.viewport = (width, height);
        self.update(false, true);
        self.notify();
    }

    /// Copies the state of `other`, keeping this camera's viewport ratios,
    /// listener and world up vector.
    pub fn reset_to(&mut self, other: &Camera) {
        let ortho_ratio = self.ortho.ratio();
        let perspective_ratio = self.perspective.ratio();

        self.position = other.position;
        self.look_point = other.look_point;
        self.yaw = other.yaw;
        self.pitch = other.pitch;
        self.zoom = other.zoom;
        self.speed = other.speed;
        self.sensitivity = other.sensitivity;
        self.ortho = other.ortho;
        self.perspective = other.perspective;
        self.limits = other.limits;
        self.scale = other.scale;
        self.projection_type = other.projection_type;

        self.ortho.set_ratio(ortho_ratio);
        self.perspective.set_ratio(perspective_ratio);

        self.update(true, true);
        self.notify();
    }

    // ----- conversions -----

    /// Unprojects a pixel (top-left origin) at normalized depth `depth`
    /// (0 = near plane, 1 = far plane).
    pub fn to_world_coordinates(&self, screen_x: i32, screen_y: i32, depth: f32) -> Vector3<f32> {
        let (width, height) = (self.viewport.0.max(1) as f32, self.viewport.1.max(1) as f32);
        let x = screen_x as f32;
        let y = height - screen_y as f32;

        let ndc = Vector4::new(x / width * 2.0 - 1.0, y / height * 2.0 - 1.0, depth * 2.0 - 1.0, 1.0);
        let inverse = self
            .transformation()
            .invert()
            .unwrap_or_else(Matrix4::identity);

        let mut world = inverse * ndc;
        if world.w == 0.0 {
            world.w = 1.0;
        }
        world.truncate() / world.w
    }

    pub fn to_world_points(&self, screen_points: &[(i32, i32)], depth: f32) -> Vec<[f32; 3]> {
        screen_points
            .iter()
            .map(|&(x, y)| self.to_world_coordinates(x, y, depth).into())
            .collect()
    }

    /// Intersects the screen ray through a pixel with the plane `z = world_z`.
    ///
    /// Rays nearly parallel to the plane are bent slightly downwards. Axes
    /// along which the ray does not move fall back to additive offsets.
    pub fn to_world_xy(&self, screen_x: i32, screen_y: i32, world_z: f32) -> Vector3<f32> {
        let near = self.to_world_coordinates(screen_x, screen_y, 0.0);
        let mut far = self.to_world_coordinates(screen_x, screen_y, 1.0);

        if far.z > near.z - MIN_RAY_DEPTH {
            far.z = near.z - MIN_RAY_DEPTH;
        }

        let dir = far - near;
        let t = if is_fuzzy_zero(dir.z) {
            world_z - near.z
        } else {
            (world_z - near.z) / dir.z
        };

        let x = if is_fuzzy_zero(dir.x) {
            t + near.x
        } else {
            t * dir.x + near.x
        };
        let y = if is_fuzzy_zero(dir.y) {
            t + near.y
        } else {
            t * dir.y + near.y
        };

        Vector3::new(x, y, world_z)
    }

    pub fn to_world_xy_points(&self, screen_points: &[(i32, i32)], world_z: f32) -> Vec<[f32; 3]> {
        screen_points
            .iter()
            .map(|&(x, y)| self.to_world_xy(x, y, world_z).into())
            .collect()
    }

    /// Clip-space XY of a world point: projection x view applied, but not
    /// divided by `w` and not mapped to pixels. See
    /// [`project_to_viewport`](Self::project_to_viewport) for pixels.
    pub fn to_screen_coordinates(&self, world_point: Vector3<f32>) -> (f32, f32) {
        let clip = self.transformation() * world_point.extend(1.0);
        (clip.x, clip.y)
    }

    /// Pixel position (top-left origin) of a world point, the inverse of
    /// [`to_world_coordinates`](Self::to_world_coordinates). `None` for
    /// points on the eye plane.
    pub fn project_to_viewport(&self, world_point: Vector3<f32>) -> Option<(f32, f32)> {
        let clip = self.transformation() * world_point.extend(1.0);
        if is_fuzzy_zero(clip.w) {
            return None;
        }
        let (width, height) = (self.viewport.0.max(1) as f32, self.viewport.1.max(1) as f32);
        let x = (clip.x / clip.w + 1.0) / 2.0 * width;
        let y = (clip.y / clip.w + 1.0) / 2.0 * height;
        Some((x, height - y))
    }

    // ----- internals -----

    fn update(&mut self, use_angles: bool, update_look: bool) {
        self.check_range_limits();

        if use_angles {
            let yaw = self.yaw.to_radians();
            let pitch = self.pitch.to_radians();

            self.front = Vector3::new(
                yaw.cos() * pitch.cos(),
                yaw.sin() * pitch.cos(),
                pitch.sin(),
            )
            .normalize();

            let right = self.front.cross(self.world_up);
            self.right = if right.magnitude2() > 1e-10 {
                right.normalize()
            } else {
                // Looking straight along the world up: derive right from yaw.
                Vector3::new(yaw.sin(), -yaw.cos(), 0.0)
            };
            self.up = self.right.cross(self.front).normalize();

            let xy_move = self.front + self.up;
            self.xy_front = Vector3::new(xy_move.x, xy_move.y, 0.0);
        }

        self.calculate_view_matrix();

        if update_look {
            self.look_point = self.to_world_xy(self.viewport.0 / 2, self.viewport.1 / 2, 0.0);
            self.look = self.position - self.look_point;
        }

        self.ortho.set_scale(self.scale);
    }

    fn calculate_view_matrix(&mut self) {
        let eye = Point3::from_vec(self.position);
        self.view = Matrix4::look_at_rh(eye, eye + self.front, self.up)
            * Matrix4::from_scale(self.zoom);
    }

    fn check_range_limits(&mut self) {
        let limits = self.limits;
        self.pitch = limits.pitch.clamp(self.pitch);
        self.yaw = limits.yaw.clamp(self.yaw);
        self.zoom = limits.zoom.clamp(self.zoom);
        self.position.x = limits.x.clamp(self.position.x);
        self.position.y = limits.y.clamp(self.position.y);
        self.position.z = limits.z.clamp(self.position.z);
        self.scale.x = limits.scale.clamp(self.scale.x);
        self.scale.y = limits.scale.clamp(self.scale.y);
        self.scale.z = limits.scale.clamp(self.scale.z);
    }
}

fn is_fuzzy_zero(value: f32) -> bool {
    value.abs() <= FUZZY_EPSILON
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

/// Clones the camera state. The listener and any pending notification stay
/// with the original.
impl Clone for Camera {
    fn clone(&self) -> Self {
        Self {
            position: self.position,
            world_up: self.world_up,
            front: self.front,
            right: self.right,
            up: self.up,
            xy_front: self.xy_front,
            look: self.look,
            look_point: self.look_point,
            yaw: self.yaw,
            pitch: self.pitch,
            speed: self.speed,
            sensitivity: self.sensitivity,
            zoom: self.zoom,
            scale: self.scale,
            view: self.view,
            projection_type: self.projection_type,
            perspective: self.perspective,
            ortho: self.ortho,
            limits: self.limits,
            viewport: self.viewport,
            pending_change: None,
            change_count: 0,
            listener: None,
        }
    }
}

impl std::fmt::Debug for Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Camera")
            .field("position", &self.position)
            .field("yaw", &self.yaw)
            .field("pitch", &self.pitch)
            .field("zoom", &self.zoom)
            .field("scale", &self.scale)
            .field("projection_type", &self.projection_type)
            .field("viewport", &self.viewport)
            .field("look_point", &self.look_point)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::range::Range;
    use std::cell::Cell;
    use std::rc::Rc;

    fn top_down_camera(position: Vector3<f32>) -> Camera {
        let mut settings = CameraSettings::default();
        settings.position = position;
        settings.pitch = -90.0;
        settings.limits = RangeLimits::unlimited();
        let mut camera = Camera::new(settings);
        camera.set_viewport(800, 600);
        camera
    }

    #[test]
    fn test_default_camera_state() {
        let camera = Camera::default();
        assert_eq!(camera.position(), Vector3::new(0.0, -50.0, 100.0));
        assert_eq!(camera.yaw(), 90.0);
        assert_eq!(camera.pitch(), -45.0);
        assert_eq!(camera.projection_type(), ProjectionType::Perspective);
        assert!((camera.front().magnitude() - 1.0).abs() < 1e-5);
        assert!(camera.front().y > 0.0 && camera.front().z < 0.0);
        assert!((camera.right() - Vector3::unit_x()).magnitude() < 1e-5);
    }

    #[test]
    fn test_yaw_is_clamped_to_limits() {
        let mut camera = Camera::default();
        camera.set_yaw(400.0);
        assert_eq!(camera.yaw(), 360.0);
        camera.set_yaw(-10.0);
        assert_eq!(camera.yaw(), 0.0);
    }

    #[test]
    fn test_pitch_and_position_are_clamped() {
        let mut camera = Camera::default();
        camera.rotate(0.0, 100.0);
        assert_eq!(camera.pitch(), 0.0);
        camera.set_position(Vector3::new(500.0, -500.0, 0.0));
        assert_eq!(camera.position(), Vector3::new(150.0, -50.0, 0.2));
    }

    #[test]
    fn test_scale_range_applies_to_every_axis() {
        let mut settings = CameraSettings::default();
        settings.limits.scale = Range::new(0.5, 2.0);
        let mut camera = Camera::new(settings);
        camera.set_scale(Vector3::new(0.1, 1.0, 5.0));
        assert_eq!(camera.scale_factor(), Vector3::new(0.5, 1.0, 2.0));
        assert_eq!(camera.ortho().scale(), camera.scale_factor());
    }

    #[test]
    fn test_zoom_subtracts_scaled_delta() {
        let mut camera = Camera::default();
        camera.set_zoom(5.0);
        camera.set_sensitivity(2.0);
        camera.zoom(1.0);
        assert_eq!(camera.zoom_factor(), 3.0);
        camera.zoom(10.0);
        assert_eq!(camera.zoom_factor(), 1.0);
    }

    #[test]
    fn test_viewport_center_maps_to_point_below_eye() {
        let camera = top_down_camera(Vector3::new(0.0, 0.0, 10.0));
        let center = camera.to_world_xy(400, 300, 0.0);
        assert!(center.x.abs() < 0.05, "{:?}", center);
        assert!(center.y.abs() < 0.05, "{:?}", center);
        assert_eq!(center.z, 0.0);

        let look_point = camera.look_point();
        assert!(look_point.x.abs() < 0.05 && look_point.y.abs() < 0.05);
        assert!((camera.look().z - 10.0).abs() < 0.05);
    }

    #[test]
    fn test_to_world_xy_inverts_projection_at_ground_plane() {
        let camera = top_down_camera(Vector3::new(0.0, 0.0, 50.0));
        for &(x, y) in &[(3.0_f32, 4.0_f32), (-10.0, 7.5), (12.0, -9.0)] {
            let (px, py) = camera
                .project_to_viewport(Vector3::new(x, y, 0.0))
                .unwrap_or((f32::NAN, f32::NAN));
            let back = camera.to_world_xy(px.round() as i32, py.round() as i32, 0.0);
            assert!((back.x - x).abs() < 0.1, "x: {} vs {}", back.x, x);
            assert!((back.y - y).abs() < 0.1, "y: {} vs {}", back.y, y);
        }
    }

    #[test]
    fn test_screen_y_grows_downwards() {
        let camera = top_down_camera(Vector3::new(0.0, 0.0, 50.0));
        let top = camera.to_world_xy(400, 0, 0.0);
        let bottom = camera.to_world_xy(400, 599, 0.0);
        assert!(top.y > bottom.y);
    }

    #[test]
    fn test_to_screen_coordinates_is_not_divided_by_w() {
        let camera = top_down_camera(Vector3::new(0.0, 0.0, 50.0));
        let point = Vector3::new(5.0, 5.0, 0.0);
        let clip = camera.transformation() * point.extend(1.0);
        assert_eq!(camera.to_screen_coordinates(point), (clip.x, clip.y));
        assert!(clip.w > 1.0);
    }

    #[test]
    fn test_batched_conversions_match_single_calls() {
        let camera = top_down_camera(Vector3::new(0.0, 0.0, 20.0));
        let points = [(0, 0), (100, 200), (799, 599)];
        let xy = camera.to_world_xy_points(&points, 1.0);
        let world = camera.to_world_points(&points, 0.5);
        for (i, &(x, y)) in points.iter().enumerate() {
            let single: [f32; 3] = camera.to_world_xy(x, y, 1.0).into();
            assert_eq!(xy[i], single);
            let single: [f32; 3] = camera.to_world_coordinates(x, y, 0.5).into();
            assert_eq!(world[i], single);
        }
    }

    #[test]
    fn test_switching_projection_preserves_parameters() {
        let mut camera = Camera::default();
        camera.set_perspective(PerspectiveProjection::new(60.0, 1.0, 100.0));
        let perspective = *camera.perspective();
        let perspective_matrix = camera.projection_matrix();

        camera.switch_projection();
        assert_eq!(camera.projection_type(), ProjectionType::Orthographic);
        assert_eq!(camera.projection_matrix(), camera.ortho().matrix());

        camera.switch_projection();
        assert_eq!(camera.projection_type(), ProjectionType::Perspective);
        assert_eq!(*camera.perspective(), perspective);
        assert_eq!(camera.projection_matrix(), perspective_matrix);
    }

    #[test]
    fn test_set_viewport_updates_ratios_and_guards_zero_height() {
        let mut camera = Camera::default();
        camera.set_viewport(800, 400);
        assert_eq!(camera.perspective().ratio(), 2.0);
        assert_eq!(camera.ortho().ratio(), 2.0);

        camera.set_viewport(640, 0);
        assert_eq!(camera.perspective().ratio(), 640.0);
        assert!(camera.transformation().x.x.is_finite());
        assert!(camera.look_point().x.is_finite());
    }

    #[test]
    fn test_focus_keeps_height_and_orientation() {
        let mut camera = top_down_camera(Vector3::new(0.0, 0.0, 30.0));
        let front = camera.front();
        camera.focus(Vector3::new(10.0, -5.0, 99.0));
        assert!((camera.position().z - 30.0).abs() < 1e-5);
        assert_eq!(camera.front(), front);
        assert!((camera.look_point().x - 10.0).abs() < 0.1);
        assert!((camera.look_point().y + 5.0).abs() < 0.1);
    }

    #[test]
    fn test_rotate_around_keeps_look_distance() {
        let mut settings = CameraSettings::default();
        settings.limits = RangeLimits::unlimited();
        let mut camera = Camera::new(settings);
        camera.set_viewport(800, 600);
        let distance = camera.look().magnitude();

        camera.rotate_around(10.0, 0.0);
        assert_eq!(camera.yaw(), 100.0);
        let after = camera.position() - camera.look_point();
        assert!((after.magnitude() - distance).abs() / distance < 0.05);
    }

    #[test]
    fn test_move_right_scales_with_projection_coefficient() {
        let mut camera = Camera::default();
        camera.set_viewport(800, 600);
        let k = camera.projection_coefficient();
        let start = camera.position();
        camera.move_direction(MovementDirection::Right, 10.0);
        let moved = camera.position() - start;
        assert!((moved.magnitude() - 10.0 * k).abs() < 1e-4);
        assert!((moved.normalize() - camera.right()).magnitude() < 1e-4);
    }

    #[test]
    fn test_forward_move_uses_speed() {
        let mut camera = Camera::default();
        camera.set_speed(2.0);
        let start = camera.position();
        camera.move_direction(MovementDirection::Forward, 3.0);
        assert!(((camera.position() - start).magnitude() - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_each_mutator_notifies_once() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();

        let mut camera = Camera::default();
        camera.set_listener(move |_| seen.set(seen.get() + 1));
        let before = camera.change_count();

        camera.rotate_around(5.0, -5.0);
        assert_eq!(calls.get(), 1);
        camera.set_viewport(100, 100);
        camera.move_by(Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(calls.get(), 3);
        assert_eq!(camera.change_count() - before, 3);

        assert_eq!(camera.take_change(), Some(camera.transformation()));
        assert_eq!(camera.take_change(), None);
    }

    #[test]
    fn test_reset_to_keeps_viewport_ratio() {
        let initial = Camera::default();
        let mut camera = Camera::default();
        camera.set_viewport(1000, 500);
        camera.rotate(20.0, -10.0);
        camera.set_zoom(3.0);

        camera.reset_to(&initial);
        assert_eq!(camera.yaw(), initial.yaw());
        assert_eq!(camera.pitch(), initial.pitch());
        assert_eq!(camera.zoom_factor(), 1.0);
        assert_eq!(camera.perspective().ratio(), 2.0);
    }
}
