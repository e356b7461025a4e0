//! Free-fly camera
//!
//! Angles are stored in degrees so the overlay sliders can edit them in
//! place without conversion.

use glam::{Mat3, Mat4, Vec2, Vec3};

/// Pitch never reaches straight up or down to keep the basis well defined.
const PITCH_LIMIT: f32 = 89.0;

/// Input state feeding the camera each frame
#[derive(Debug, Clone, Default)]
pub struct CameraInput {
    /// Movement keys (WASD, QE for down/up)
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,

    /// Mouse delta since last frame (in pixels)
    pub mouse_delta: Vec2,

    /// Whether mouse look is active (right mouse button held)
    pub mouse_look_active: bool,
}

impl CameraInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset per-frame deltas (call after update)
    pub fn reset_deltas(&mut self) {
        self.mouse_delta = Vec2::ZERO;
    }
}

/// Free-fly camera with yaw/pitch orientation
///
/// Fields are public so the overlay panels can edit them directly.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Horizontal angle in degrees; -90 looks down -Z
    pub yaw: f32,
    /// Vertical angle in degrees, clamped to the pitch limit
    pub pitch: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Movement speed in units per second
    pub move_speed: f32,
    /// Look sensitivity in degrees per pixel of mouse travel
    pub look_sensitivity: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            yaw: -90.0,
            pitch: 0.0,
            fov: 60.0,
            move_speed: 5.0,
            look_sensitivity: 0.1,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit view direction derived from yaw and pitch
    pub fn forward(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize()
    }

    /// Orthonormal camera basis with right, up and forward as columns
    pub fn rotation(&self) -> Mat3 {
        let forward = self.forward();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward).normalize();
        Mat3::from_cols(right, up, forward)
    }

    /// Advance the camera by one frame of input
    pub fn update(&mut self, input: &CameraInput, dt: f32) {
        let forward = self.forward();
        let right = forward.cross(Vec3::Y).normalize();
        let step = self.move_speed * dt;

        if input.forward {
            self.position += forward * step;
        }
        if input.backward {
            self.position -= forward * step;
        }
        if input.right {
            self.position += right * step;
        }
        if input.left {
            self.position -= right * step;
        }
        if input.up {
            self.position += Vec3::Y * step;
        }
        if input.down {
            self.position -= Vec3::Y * step;
        }

        if input.mouse_look_active {
            self.yaw += input.mouse_delta.x * self.look_sensitivity;
            self.pitch -= input.mouse_delta.y * self.look_sensitivity;
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    /// Perspective projection with the Y axis flipped for Vulkan clip space
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        let mut proj = Mat4::perspective_rh(self.fov.to_radians(), aspect, 0.01, 1000.0);
        proj.y_axis.y *= -1.0;
        proj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_vec3_near(a: Vec3, b: Vec3) {
        assert!((a - b).length() < EPSILON, "{a} != {b}");
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = Camera::default();
        assert_vec3_near(camera.forward(), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn movement_follows_view_direction() {
        let mut camera = Camera::default();
        let mut input = CameraInput::new();
        input.forward = true;

        camera.update(&input, 0.5);

        // 5 units/s for half a second along -Z
        assert_vec3_near(camera.position, Vec3::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn vertical_movement_ignores_pitch() {
        let mut camera = Camera::default();
        camera.pitch = 45.0;
        let mut input = CameraInput::new();
        input.up = true;

        camera.update(&input, 1.0);

        assert_vec3_near(camera.position, Vec3::new(0.0, 5.0, 3.0));
    }

    #[test]
    fn mouse_look_requires_modifier() {
        let mut camera = Camera::default();
        let mut input = CameraInput::new();
        input.mouse_delta = Vec2::new(120.0, -40.0);

        camera.update(&input, 0.016);
        assert_eq!(camera.yaw, -90.0);
        assert_eq!(camera.pitch, 0.0);

        input.mouse_look_active = true;
        camera.update(&input, 0.016);
        assert!((camera.yaw - -78.0).abs() < EPSILON);
        assert!((camera.pitch - 4.0).abs() < EPSILON);
    }

    #[test]
    fn pitch_clamps_at_vertical() {
        let mut camera = Camera::default();
        let mut input = CameraInput::new();
        input.mouse_look_active = true;

        input.mouse_delta = Vec2::new(0.0, -10_000.0);
        camera.update(&input, 0.016);
        assert_eq!(camera.pitch, PITCH_LIMIT);

        input.mouse_delta = Vec2::new(0.0, 10_000.0);
        camera.update(&input, 0.016);
        assert_eq!(camera.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn rotation_basis_is_orthonormal() {
        let mut camera = Camera::default();
        camera.yaw = 37.0;
        camera.pitch = -12.0;

        let basis = camera.rotation();
        let (right, up, forward) = (basis.x_axis, basis.y_axis, basis.z_axis);
        assert!((right.length() - 1.0).abs() < EPSILON);
        assert!((up.length() - 1.0).abs() < EPSILON);
        assert!((forward.length() - 1.0).abs() < EPSILON);
        assert!(right.dot(up).abs() < EPSILON);
        assert!(right.dot(forward).abs() < EPSILON);
        assert!(up.dot(forward).abs() < EPSILON);
    }

    #[test]
    fn projection_flips_y_for_vulkan() {
        let camera = Camera::default();
        let proj = camera.projection_matrix(16.0 / 9.0);
        assert!(proj.y_axis.y < 0.0);
    }

    #[test]
    fn view_matrix_centers_on_position() {
        let camera = Camera::default();
        let view = camera.view_matrix();
        assert_vec3_near(view.transform_point3(camera.position), Vec3::ZERO);
    }
}
