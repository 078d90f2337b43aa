//! Math utilities and types
//!
//! Provides the nalgebra aliases used by the UI tree together with the small
//! set of 2D affine builders that element transforms are composed from.
//! Every UI transform is a 4x4 matrix acting on the XY plane so it can be
//! uploaded to a shader constant buffer unchanged.

pub use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (used for RGBA colors)
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Builders for planar affine transforms embedded in 4x4 matrices
pub mod affine {
    use super::{Mat4, Vec2, Vec3};

    /// Translation in the XY plane
    pub fn translation(offset: Vec2) -> Mat4 {
        Mat4::new_translation(&Vec3::new(offset.x, offset.y, 0.0))
    }

    /// Rotation about the Z axis (radians, clockwise in Y-down screen space)
    pub fn rotation(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    /// Non-uniform scale in the XY plane
    pub fn scaling(scale: Vec2) -> Mat4 {
        Mat4::new_nonuniform_scaling(&Vec3::new(scale.x, scale.y, 1.0))
    }

    /// `T(origin) * R(angle) * S(scale)`
    pub fn compose(origin: Vec2, angle: f32, scale: Vec2) -> Mat4 {
        translation(origin) * rotation(angle) * scaling(scale)
    }

    /// Exact inverse of [`compose`], built from the inverted factors.
    ///
    /// A zero scale component yields non-finite entries; callers get
    /// non-finite points back, which fail every bounds check.
    pub fn compose_inverse(origin: Vec2, angle: f32, scale: Vec2) -> Mat4 {
        scaling(Vec2::new(1.0 / scale.x, 1.0 / scale.y)) * rotation(-angle) * translation(-origin)
    }

    /// Pixel space (origin top-left, Y down) to clip space (origin center, Y up)
    pub fn world_to_screen(width: f32, height: f32) -> Mat4 {
        Mat4::new(
            2.0 / width, 0.0, 0.0, -1.0,
            0.0, -2.0 / height, 0.0, 1.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Apply a transform to a point in the XY plane
    pub fn transform_point(matrix: &Mat4, point: Vec2) -> Vec2 {
        let p = matrix.transform_point(&nalgebra::Point3::new(point.x, point.y, 0.0));
        Vec2::new(p.x, p.y)
    }
}

/// Math utility functions
pub mod utils {
    use super::Vec4;

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Component-wise color interpolation, `t` clamped to `[0, 1]`
    pub fn lerp_color(from: &Vec4, to: &Vec4, t: f32) -> Vec4 {
        from.lerp(to, t.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compose_inverse_round_trip() {
        let origin = Vec2::new(120.0, -35.0);
        let forward = affine::compose(origin, 0.7, Vec2::new(2.0, 0.5));
        let inverse = affine::compose_inverse(origin, 0.7, Vec2::new(2.0, 0.5));

        let p = Vec2::new(13.0, 42.0);
        let back = affine::transform_point(&inverse, affine::transform_point(&forward, p));
        assert_relative_eq!(back.x, p.x, epsilon = 1e-3);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-3);
    }

    #[test]
    fn test_world_to_screen_corners() {
        let m = affine::world_to_screen(800.0, 600.0);
        let top_left = affine::transform_point(&m, Vec2::new(0.0, 0.0));
        let bottom_right = affine::transform_point(&m, Vec2::new(800.0, 600.0));

        assert_relative_eq!(top_left.x, -1.0);
        assert_relative_eq!(top_left.y, 1.0);
        assert_relative_eq!(bottom_right.x, 1.0);
        assert_relative_eq!(bottom_right.y, -1.0);
    }

    #[test]
    fn test_lerp_color_clamps() {
        let from = Vec4::new(0.0, 0.0, 0.0, 1.0);
        let to = Vec4::new(1.0, 0.5, 0.0, 1.0);
        assert_relative_eq!(utils::lerp_color(&from, &to, 0.5).x, 0.5);
        assert_relative_eq!(utils::lerp_color(&from, &to, 3.0).y, 0.5);
        assert_relative_eq!(utils::lerp(2.0, 4.0, 0.25), 2.5);
    }
}
