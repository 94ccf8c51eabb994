//! # Camera Manipulators
//!
//! Pointer gestures mapped to camera operations. The host forwards its
//! window events (positions in pixels, top-left origin) together with the
//! camera they should drive:
//!
//! - left drag pans along the ground, middle drag pans in the view plane,
//!   right drag orbits the look point, the wheel zooms;
//! - Ctrl + left drag zooms to the dragged rectangle on release;
//! - Shift + left drag only tracks a selection rectangle, which the host
//!   turns into a picking request before calling `mouse_release`.

use cgmath::{InnerSpace, Vector3};
use winit::event::MouseButton;
use winit::keyboard::ModifiersState;

use super::camera::{Camera, MovementDirection};
use super::projection::ProjectionType;

/// Wheel delta of one notch.
pub const DEFAULT_ZOOM_SENSITIVITY: f32 = 120.0;

/// Integer screen rectangle. `right` and `bottom` are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized rectangle spanned by two corners.
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Self {
        Self::new(
            a.0.min(b.0),
            a.1.min(b.1),
            (b.0 - a.0).abs(),
            (b.1 - a.1).abs(),
        )
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self) -> i32 {
        self.x + self.width - 1
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }

    pub fn center(&self) -> (i32, i32) {
        (
            (self.left() + self.right()) / 2,
            (self.top() + self.bottom()) / 2,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Pointer tracking shared by all manipulators.
#[derive(Debug, Clone)]
pub struct ManipulatorState {
    initial_camera: Camera,
    current: (i32, i32),
    pressed: (i32, i32),
    rect_zoom_mode: bool,
    rect_selection_mode: bool,
    drag_mode: bool,
}

impl ManipulatorState {
    pub fn new(initial_camera: &Camera) -> Self {
        Self {
            initial_camera: initial_camera.clone(),
            current: (0, 0),
            pressed: (0, 0),
            rect_zoom_mode: false,
            rect_selection_mode: false,
            drag_mode: false,
        }
    }

    pub fn initial_camera(&self) -> &Camera {
        &self.initial_camera
    }

    /// Last pointer position seen by `mouse_move` or `mouse_press`.
    pub fn current(&self) -> (i32, i32) {
        self.current
    }

    /// Position of the last button press.
    pub fn pressed(&self) -> (i32, i32) {
        self.pressed
    }

    pub fn is_rect_zoom_mode(&self) -> bool {
        self.rect_zoom_mode
    }

    pub fn is_rect_selection_mode(&self) -> bool {
        self.rect_selection_mode
    }

    /// Set once the pointer moved with a button held.
    pub fn is_drag_mode(&self) -> bool {
        self.drag_mode
    }

    /// Rectangle between the press position and the current position.
    pub fn drag_rect(&self) -> ScreenRect {
        ScreenRect::from_corners(self.pressed, self.current)
    }

    /// Forces rectangle zoom for the next left drag regardless of modifiers.
    pub fn set_rect_zoom_mode(&mut self, enabled: bool) {
        self.rect_zoom_mode = enabled;
    }

    /// Forces rectangle selection for the next left drag regardless of
    /// modifiers.
    pub fn set_rect_selection_mode(&mut self, enabled: bool) {
        self.rect_selection_mode = enabled;
    }
}

/// Maps pointer gestures to camera operations.
///
/// Implementors provide the gesture operations; pointer bookkeeping comes
/// from the provided methods.
pub trait Manipulator {
    fn state(&self) -> &ManipulatorState;

    fn state_mut(&mut self) -> &mut ManipulatorState;

    fn focus(&mut self, point: Vector3<f32>, camera: &mut Camera);

    /// Left drag by a pointer delta.
    fn move_by(&mut self, dx: i32, dy: i32, camera: &mut Camera);

    /// Middle drag by a pointer delta.
    fn shift(&mut self, dx: i32, dy: i32, camera: &mut Camera);

    /// Right drag by a pointer delta.
    fn rotate(&mut self, dx: i32, dy: i32, camera: &mut Camera);

    /// Wheel rotation in eighths of a degree.
    fn zoom(&mut self, delta: i32, camera: &mut Camera);

    fn zoom_rect(&mut self, rect: ScreenRect, camera: &mut Camera);

    fn mouse_press(
        &mut self,
        x: i32,
        y: i32,
        button: MouseButton,
        modifiers: ModifiersState,
        _camera: &mut Camera,
    ) {
        let state = self.state_mut();
        state.pressed = (x, y);
        state.current = (x, y);

        let left = button == MouseButton::Left;
        state.rect_zoom_mode = (modifiers == ModifiersState::CONTROL || state.rect_zoom_mode) && left;
        state.rect_selection_mode =
            (modifiers == ModifiersState::SHIFT || state.rect_selection_mode) && left;
    }

    fn mouse_release(&mut self, camera: &mut Camera) {
        if self.state().rect_zoom_mode {
            let rect = self.state().drag_rect();
            self.zoom_rect(rect, camera);
        }

        let state = self.state_mut();
        state.drag_mode = false;
        state.rect_zoom_mode = false;
        state.rect_selection_mode = false;
    }

    /// Pointer motion; `button` is the single button held, if any.
    fn mouse_move(&mut self, x: i32, y: i32, button: Option<MouseButton>, camera: &mut Camera) {
        let (dx, dy) = {
            let state = self.state_mut();
            let delta = (x - state.current.0, y - state.current.1);
            state.current = (x, y);
            delta
        };

        let state = self.state();
        if state.rect_selection_mode || state.rect_zoom_mode {
            return;
        }

        match button {
            Some(MouseButton::Left) => self.move_by(dx, dy, camera),
            Some(MouseButton::Right) => self.rotate(dx, dy, camera),
            Some(MouseButton::Middle) => self.shift(dx, dy, camera),
            _ => return,
        }
        self.state_mut().drag_mode = true;
    }

    fn wheel(&mut self, delta: i32, camera: &mut Camera) {
        self.zoom(delta, camera);
    }

    /// Restores the camera captured when the manipulator was created.
    fn reset(&self, camera: &mut Camera) {
        camera.reset_to(self.state().initial_camera());
    }
}

/// Ground-plane navigation with orbit and rectangle zoom.
#[derive(Debug, Clone)]
pub struct StandardManipulator {
    state: ManipulatorState,
    zoom_sensitivity: f32,
}

impl StandardManipulator {
    pub fn new(initial_camera: &Camera) -> Self {
        Self {
            state: ManipulatorState::new(initial_camera),
            zoom_sensitivity: DEFAULT_ZOOM_SENSITIVITY,
        }
    }

    pub fn with_zoom_sensitivity(mut self, zoom_sensitivity: f32) -> Self {
        self.zoom_sensitivity = zoom_sensitivity;
        self
    }

    pub fn zoom_sensitivity(&self) -> f32 {
        self.zoom_sensitivity
    }
}

impl Manipulator for StandardManipulator {
    fn state(&self) -> &ManipulatorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ManipulatorState {
        &mut self.state
    }

    fn focus(&mut self, point: Vector3<f32>, camera: &mut Camera) {
        camera.focus(point);
    }

    fn move_by(&mut self, dx: i32, dy: i32, camera: &mut Camera) {
        camera.move_direction(MovementDirection::Right, -dx as f32);
        camera.move_direction(MovementDirection::XYForward, dy as f32);
    }

    fn shift(&mut self, dx: i32, dy: i32, camera: &mut Camera) {
        camera.move_direction(MovementDirection::Right, -dx as f32);
        camera.move_direction(MovementDirection::Up, dy as f32);
    }

    fn rotate(&mut self, dx: i32, dy: i32, camera: &mut Camera) {
        camera.rotate_around_pixels(-dx, -dy);
    }

    fn zoom(&mut self, delta: i32, camera: &mut Camera) {
        match camera.projection_type() {
            ProjectionType::Perspective => {
                let dy = delta as f32 / self.zoom_sensitivity;
                let min_z = camera.limits().z.min;
                let z = camera.position().z;
                // Moving in is blocked once the eye sits on the lower Z limit.
                if (z <= min_z && dy < 0.0) || z > min_z {
                    camera.move_direction(MovementDirection::Forward, dy);
                }
            }
            ProjectionType::Orthographic => {
                let dy = -(delta as f32) / (self.zoom_sensitivity * 10.0);
                camera.scale(Vector3::new(dy, dy, 0.0));
            }
        }
    }

    fn zoom_rect(&mut self, rect: ScreenRect, camera: &mut Camera) {
        if rect.is_empty() {
            return;
        }

        let (screen_w, screen_h) = camera.viewport();
        let (center_x, center_y) = rect.center();

        let rect_center = camera.to_world_xy(center_x, center_y, 0.0);
        let delta_position = rect_center - camera.look_point();

        match camera.projection_type() {
            ProjectionType::Perspective => {
                let world_size = |a: (i32, i32), b: (i32, i32)| {
                    (camera.to_world_xy(a.0, a.1, 0.0) - camera.to_world_xy(b.0, b.1, 0.0)).magnitude()
                };

                let (rect_size, screen_size) = if rect.width > rect.height {
                    (
                        world_size((rect.left(), center_y), (rect.right(), center_y)),
                        world_size((0, screen_h / 2), (screen_w, screen_h / 2)),
                    )
                } else {
                    (
                        world_size((center_x, rect.top()), (center_x, rect.bottom())),
                        world_size((screen_w / 2, 0), (screen_w / 2, screen_h)),
                    )
                };

                if screen_size <= f32::EPSILON {
                    return;
                }

                let look_distance = camera.look().magnitude();
                let distance = rect_size * look_distance / screen_size;
                camera.move_front(look_distance - distance);
            }
            ProjectionType::Orthographic => {
                let k = if rect.width > rect.height {
                    rect.width as f32 / screen_w.max(1) as f32
                } else {
                    rect.height as f32 / screen_h.max(1) as f32
                };
                let scale = camera.scale_factor();
                camera.set_scale(Vector3::new(scale.x * k, scale.y * k, scale.z));
            }
        }

        camera.move_by(delta_position);
    }
}

/// Ignores every gesture.
#[derive(Debug, Clone)]
pub struct FixedManipulator {
    state: ManipulatorState,
}

impl FixedManipulator {
    pub fn new(initial_camera: &Camera) -> Self {
        Self {
            state: ManipulatorState::new(initial_camera),
        }
    }
}

impl Manipulator for FixedManipulator {
    fn state(&self) -> &ManipulatorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ManipulatorState {
        &mut self.state
    }

    fn focus(&mut self, _point: Vector3<f32>, _camera: &mut Camera) {}

    fn move_by(&mut self, _dx: i32, _dy: i32, _camera: &mut Camera) {}

    fn shift(&mut self, _dx: i32, _dy: i32, _camera: &mut Camera) {}

    fn rotate(&mut self, _dx: i32, _dy: i32, _camera: &mut Camera) {}

    fn zoom(&mut self, _delta: i32, _camera: &mut Camera) {}

    fn zoom_rect(&mut self, _rect: ScreenRect, _camera: &mut Camera) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_800x600() -> Camera {
        let mut camera = Camera::default();
        camera.set_viewport(800, 600);
        camera
    }

    #[test]
    fn test_screen_rect_edges() {
        let rect = ScreenRect::new(10, 20, 5, 4);
        assert_eq!(rect.right(), 14);
        assert_eq!(rect.bottom(), 23);
        assert_eq!(rect.center(), (12, 21));
        assert_eq!(ScreenRect::from_corners((15, 3), (5, 9)), ScreenRect::new(5, 3, 10, 6));
        assert!(ScreenRect::new(0, 0, 0, 5).is_empty());
    }

    #[test]
    fn test_ctrl_left_press_enters_rect_zoom() {
        let mut camera = camera_800x600();
        let mut manipulator = StandardManipulator::new(&camera);

        manipulator.mouse_press(10, 10, MouseButton::Left, ModifiersState::CONTROL, &mut camera);
        assert!(manipulator.state().is_rect_zoom_mode());
        assert!(!manipulator.state().is_rect_selection_mode());

        manipulator.mouse_release(&mut camera);
        assert!(!manipulator.state().is_rect_zoom_mode());

        manipulator.mouse_press(10, 10, MouseButton::Right, ModifiersState::CONTROL, &mut camera);
        assert!(!manipulator.state().is_rect_zoom_mode());
    }

    #[test]
    fn test_selection_drag_leaves_camera_alone() {
        let mut camera = camera_800x600();
        let mut manipulator = StandardManipulator::new(&camera);
        let start = camera.position();

        manipulator.mouse_press(100, 100, MouseButton::Left, ModifiersState::SHIFT, &mut camera);
        manipulator.mouse_move(150, 130, Some(MouseButton::Left), &mut camera);

        assert!(manipulator.state().is_rect_selection_mode());
        assert_eq!(manipulator.state().drag_rect(), ScreenRect::new(100, 100, 50, 30));
        assert_eq!(camera.position(), start);
        assert!(!manipulator.state().is_drag_mode());
    }

    #[test]
    fn test_left_drag_pans_camera() {
        let mut camera = camera_800x600();
        let mut manipulator = StandardManipulator::new(&camera);
        let start = camera.position();

        manipulator.mouse_press(100, 100, MouseButton::Left, ModifiersState::empty(), &mut camera);
        manipulator.mouse_move(90, 100, Some(MouseButton::Left), &mut camera);

        assert!(manipulator.state().is_drag_mode());
        assert!(camera.position().x > start.x);
        assert!((camera.position().z - start.z).abs() < 1e-4);
    }

    #[test]
    fn test_hover_move_only_tracks_pointer() {
        let mut camera = camera_800x600();
        let mut manipulator = StandardManipulator::new(&camera);
        let start = camera.position();

        manipulator.mouse_move(40, 50, None, &mut camera);
        assert_eq!(manipulator.state().current(), (40, 50));
        assert_eq!(camera.position(), start);
    }

    #[test]
    fn test_wheel_moves_forward_in_perspective() {
        let mut camera = camera_800x600();
        let mut manipulator = StandardManipulator::new(&camera);
        let start = camera.position();

        manipulator.wheel(120, &mut camera);
        let moved = camera.position() - start;
        assert!((moved.magnitude() - 1.0).abs() < 1e-4);
        assert!(moved.dot(camera.front()) > 0.0);
    }

    #[test]
    fn test_wheel_in_is_blocked_at_lower_z_limit() {
        let mut camera = camera_800x600();
        camera.set_position(Vector3::new(0.0, 0.0, 0.0));
        let mut manipulator = StandardManipulator::new(&camera);
        let bottom = camera.position();
        assert_eq!(bottom.z, 0.2);

        manipulator.wheel(120, &mut camera);
        assert_eq!(camera.position(), bottom);

        manipulator.wheel(-120, &mut camera);
        assert!(camera.position().z > bottom.z);
    }

    #[test]
    fn test_wheel_scales_in_ortho() {
        let mut camera = camera_800x600();
        camera.set_projection_type(ProjectionType::Orthographic);
        let mut manipulator = StandardManipulator::new(&camera);

        manipulator.wheel(120, &mut camera);
        let scale = camera.scale_factor();
        assert!((scale.x - 0.9).abs() < 1e-6);
        assert!((scale.y - 0.9).abs() < 1e-6);
        assert_eq!(scale.z, 1.0);
    }

    #[test]
    fn test_rect_zoom_in_ortho_scales_by_rect_share() {
        let mut camera = camera_800x600();
        camera.set_projection_type(ProjectionType::Orthographic);
        let mut manipulator = StandardManipulator::new(&camera);

        manipulator.mouse_press(200, 250, MouseButton::Left, ModifiersState::CONTROL, &mut camera);
        manipulator.mouse_move(600, 350, Some(MouseButton::Left), &mut camera);
        manipulator.mouse_release(&mut camera);

        assert!((camera.scale_factor().x - 0.5).abs() < 1e-6);
        assert!((camera.scale_factor().y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rect_zoom_in_perspective_moves_closer() {
        let mut camera = camera_800x600();
        let mut manipulator = StandardManipulator::new(&camera);
        let distance = camera.look().magnitude();

        manipulator.zoom_rect(ScreenRect::new(300, 250, 200, 100), &mut camera);
        assert!(camera.look().magnitude() < distance);
    }

    #[test]
    fn test_reset_restores_initial_camera() {
        let mut camera = camera_800x600();
        let manipulator = StandardManipulator::new(&camera);
        let initial = camera.position();

        camera.rotate(30.0, -20.0);
        camera.move_by(Vector3::new(5.0, 5.0, 5.0));
        manipulator.reset(&mut camera);

        assert_eq!(camera.position(), initial);
        assert_eq!(camera.yaw(), 90.0);
        assert_eq!(camera.pitch(), -45.0);
    }

    #[test]
    fn test_fixed_manipulator_ignores_gestures() {
        let mut camera = camera_800x600();
        let mut manipulator = FixedManipulator::new(&camera);
        let start = camera.position();

        manipulator.mouse_press(0, 0, MouseButton::Left, ModifiersState::empty(), &mut camera);
        manipulator.mouse_move(50, 50, Some(MouseButton::Left), &mut camera);
        manipulator.mouse_move(80, 10, Some(MouseButton::Right), &mut camera);
        manipulator.wheel(240, &mut camera);
        manipulator.mouse_release(&mut camera);

        assert_eq!(camera.position(), start);
        assert_eq!(camera.yaw(), 90.0);
    }
}
