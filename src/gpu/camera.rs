//! Camera for the point-cloud presets.

use glam::{Mat4, Vec3};

/// Fixed perspective camera.
///
/// The defaults place the eye one unit in front of the origin on +z, looking
/// down -z with a 75° vertical field of view. The cloud moves, the camera
/// does not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            eye: Vec3::Z,
            target: Vec3::ZERO,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    /// Perspective projection for a viewport aspect ratio (width / height).
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), aspect.max(1e-3), self.near, self.far)
    }

    /// Combined projection and view for a viewport aspect ratio.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_eye_on_positive_z() {
        let camera = Camera::new();
        assert_eq!(camera.eye, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn test_view_moves_origin_in_front() {
        let camera = Camera::new();
        let origin_in_view = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!(origin_in_view.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));
    }

    #[test]
    fn test_projection_keeps_center_centered() {
        let camera = Camera::new();
        let clip = camera.view_projection(16.0 / 9.0) * Vec3::ZERO.extend(1.0);
        assert!(clip.x.abs() < 1e-6 && clip.y.abs() < 1e-6);
        assert!(clip.w > 0.0);
    }

    #[test]
    fn test_points_behind_eye_are_clipped() {
        let camera = Camera::new();
        let clip = camera.view_projection(1.0) * Vec3::new(0.0, 0.0, 2.0).extend(1.0);
        assert!(clip.w < 0.0);
    }
}
