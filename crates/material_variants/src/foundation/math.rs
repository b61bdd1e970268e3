//! Math utilities and types
//!
//! Provides the vector and matrix types used by material descriptors and
//! uniform values, plus the 2-D affine helpers behind UV transforms.

pub use nalgebra::{Matrix3, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 2-D affine matrix helpers operating in homogeneous 3x3 form
pub mod affine {
    use super::{Mat3, Vec2};

    /// Rotation by `radians` embedded as the linear part of an affine matrix
    pub fn rotation(radians: f32) -> Mat3 {
        Mat3::new_rotation(radians)
    }

    /// Diagonal affine scaling matrix
    pub fn scale(factors: Vec2) -> Mat3 {
        Mat3::new_nonuniform_scaling(&factors)
    }

    /// Affine translation matrix carrying `offset` in its last column
    pub fn translation(offset: Vec2) -> Mat3 {
        Mat3::new_translation(&offset)
    }

    /// Compose `rotation * scale * translation`
    pub fn rotation_scale_translation(radians: f32, factors: Vec2, offset: Vec2) -> Mat3 {
        rotation(radians) * scale(factors) * translation(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_translation_has_offset_in_last_column() {
        let m = affine::translation(Vec2::new(0.5, 0.25));
        let expected = Mat3::new(
            1.0, 0.0, 0.5,
            0.0, 1.0, 0.25,
            0.0, 0.0, 1.0,
        );
        assert_relative_eq!(m, expected, epsilon = EPSILON);
    }

    #[test]
    fn test_quarter_turn_rotation() {
        let m = affine::rotation(FRAC_PI_2);
        let expected = Mat3::new(
            0.0, -1.0, 0.0,
            1.0, 0.0, 0.0,
            0.0, 0.0, 1.0,
        );
        assert_relative_eq!(m, expected, epsilon = EPSILON);
    }

    #[test]
    fn test_composition_order() {
        // Translation is applied first, then scale, then rotation
        let m = affine::rotation_scale_translation(0.0, Vec2::new(2.0, 3.0), Vec2::new(1.0, 1.0));
        let expected = Mat3::new(
            2.0, 0.0, 2.0,
            0.0, 3.0, 3.0,
            0.0, 0.0, 1.0,
        );
        assert_relative_eq!(m, expected, epsilon = EPSILON);
    }

    #[test]
    fn test_identity_inputs_give_identity() {
        let m = affine::rotation_scale_translation(0.0, Vec2::new(1.0, 1.0), Vec2::zeros());
        assert_relative_eq!(m, Mat3::identity(), epsilon = EPSILON);
    }
}
