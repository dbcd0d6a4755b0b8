//! Dimensional spaces actors can live in
//!
//! The transform, actor, and scene code is written once against [`Space`];
//! [`Planar`] drives 2D scenes with 3x3 matrices and [`Spatial`] drives 3D
//! scenes with 4x4 matrices.

use crate::foundation::math::{Mat3, Mat3Ext, Mat4, Mat4Ext, Vec2, Vec3, VectorExt};
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Sub};

/// Vector and matrix vocabulary for one dimensionality
pub trait Space: 'static + Copy + Debug + Default {
    /// Position / velocity vector
    type Vector: Copy
        + Debug
        + PartialEq
        + Add<Output = Self::Vector>
        + Sub<Output = Self::Vector>
        + Mul<f32, Output = Self::Vector>
        + AddAssign;

    /// Affine transform matrix
    type Matrix: Copy + Debug + PartialEq + Mul<Output = Self::Matrix>;

    /// Identity transform
    fn identity() -> Self::Matrix;

    /// Zero vector
    fn zero() -> Self::Vector;

    /// Scale factors that leave a transform unchanged
    fn unit_scale() -> Self::Vector;

    /// Translation factor
    fn translation(position: Self::Vector) -> Self::Matrix;

    /// Rotation factor in the XY plane
    fn rotation(radians: f32) -> Self::Matrix;

    /// Scale factor
    fn scale(factors: Self::Vector) -> Self::Matrix;

    /// Translation column of an affine matrix
    fn translation_of(matrix: &Self::Matrix) -> Self::Vector;

    /// Direction of the matrix's first basis column, normalized
    fn forward_of(matrix: &Self::Matrix) -> Self::Vector;

    /// Euclidean norm
    fn magnitude(vector: &Self::Vector) -> f32;

    /// Unit vector, or zero for a zero-length input
    fn normalized_or_zero(vector: &Self::Vector) -> Self::Vector;

    /// Heading of a vector in the XY plane, `atan2(y, x)`
    fn heading(vector: &Self::Vector) -> f32;

    /// Rotation factor that turns the first basis column toward `direction`,
    /// or `None` when the direction gives no heading and the current rotation
    /// should be kept.
    ///
    /// The rotation factories are transposed relative to the textbook
    /// rotation, hence the negated heading.
    fn facing(direction: &Self::Vector) -> Option<Self::Matrix> {
        if Self::magnitude(direction) > 0.0 {
            Some(Self::rotation(-Self::heading(direction)))
        } else {
            None
        }
    }

    /// Distance between two points
    fn distance(a: &Self::Vector, b: &Self::Vector) -> f32 {
        Self::magnitude(&(*b - *a))
    }
}

/// Two-dimensional space (3x3 affine matrices)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Planar;

/// Three-dimensional space (4x4 affine matrices)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spatial;

impl Space for Planar {
    type Vector = Vec2;
    type Matrix = Mat3;

    fn identity() -> Mat3 {
        Mat3::identity()
    }

    fn zero() -> Vec2 {
        Vec2::zeros()
    }

    fn unit_scale() -> Vec2 {
        Vec2::new(1.0, 1.0)
    }

    fn translation(position: Vec2) -> Mat3 {
        Mat3::create_translation(position)
    }

    fn rotation(radians: f32) -> Mat3 {
        Mat3::create_rotation(radians)
    }

    fn scale(factors: Vec2) -> Mat3 {
        Mat3::create_scale(factors.x, factors.y)
    }

    fn translation_of(matrix: &Mat3) -> Vec2 {
        matrix.translation_column()
    }

    fn forward_of(matrix: &Mat3) -> Vec2 {
        Vec2::new(matrix[(0, 0)], matrix[(1, 0)]).normalized_or_zero()
    }

    fn magnitude(vector: &Vec2) -> f32 {
        vector.magnitude()
    }

    fn normalized_or_zero(vector: &Vec2) -> Vec2 {
        vector.normalized_or_zero()
    }

    fn heading(vector: &Vec2) -> f32 {
        vector.y.atan2(vector.x)
    }
}

impl Space for Spatial {
    type Vector = Vec3;
    type Matrix = Mat4;

    fn identity() -> Mat4 {
        Mat4::identity()
    }

    fn zero() -> Vec3 {
        Vec3::zeros()
    }

    fn unit_scale() -> Vec3 {
        Vec3::new(1.0, 1.0, 1.0)
    }

    fn translation(position: Vec3) -> Mat4 {
        Mat4::create_translation(position)
    }

    fn rotation(radians: f32) -> Mat4 {
        Mat4::create_rotation_z(radians)
    }

    fn scale(factors: Vec3) -> Mat4 {
        Mat4::create_scale(factors.x, factors.y, factors.z)
    }

    fn translation_of(matrix: &Mat4) -> Vec3 {
        matrix.translation_column()
    }

    fn forward_of(matrix: &Mat4) -> Vec3 {
        Vec3::new(matrix[(0, 0)], matrix[(1, 0)], matrix[(2, 0)]).normalized_or_zero()
    }

    fn magnitude(vector: &Vec3) -> f32 {
        vector.magnitude()
    }

    fn normalized_or_zero(vector: &Vec3) -> Vec3 {
        vector.normalized_or_zero()
    }

    fn heading(vector: &Vec3) -> f32 {
        vector.y.atan2(vector.x)
    }

    /// Facing only turns about Z; motion with no XY component (straight
    /// along Z) leaves the rotation set by the caller alone.
    fn facing(direction: &Vec3) -> Option<Mat4> {
        if direction.x == 0.0 && direction.y == 0.0 {
            None
        } else {
            Some(Self::rotation(-Self::heading(direction)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_facing_turns_forward_toward_direction() {
        let directions = [
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(-3.0, 4.0),
            Vec2::new(-1.0, -1.0),
        ];

        for direction in directions {
            let facing = Planar::facing(&direction).unwrap();
            assert_relative_eq!(Planar::forward_of(&facing), direction.normalized_or_zero(), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_spatial_facing_uses_xy_heading() {
        let facing = Spatial::facing(&Vec3::new(0.0, 2.0, 0.0)).unwrap();
        assert_relative_eq!(Spatial::forward_of(&facing), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_no_heading_keeps_rotation() {
        assert!(Planar::facing(&Vec2::zeros()).is_none());
        assert!(Spatial::facing(&Vec3::new(0.0, 0.0, 3.0)).is_none());
        assert!(Spatial::facing(&Vec3::new(0.5, 0.0, 3.0)).is_some());
    }

    #[test]
    fn test_distance() {
        assert_relative_eq!(Planar::distance(&Vec2::new(1.0, 1.0), &Vec2::new(4.0, 5.0)), 5.0);
        assert_relative_eq!(Spatial::distance(&Vec3::zeros(), &Vec3::new(0.0, 0.0, -2.0)), 2.0);
    }
}
