//! Math utilities and types
//!
//! Vector and matrix types for the actor transform hierarchy, backed by
//! nalgebra. Matrices are affine and keep the translation in the last column;
//! a point is transformed as a column vector with an implicit homogeneous
//! coordinate of 1.
//!
//! Rotation factories keep the handedness the scene was authored against:
//! `create_rotation(θ)` is
//!
//! ```text
//! [ cosθ  sinθ  0 ]
//! [-sinθ  cosθ  0 ]
//! [  0     0    1 ]
//! ```
//!
//! which is the transpose of the textbook counter-clockwise rotation. Code
//! that turns an actor toward a heading negates the angle to compensate.

pub use nalgebra::{Matrix3, Matrix4, SVector, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 affine matrix for 2D transforms
pub type Mat3 = Matrix3<f32>;

/// 4x4 affine matrix for 3D transforms
pub type Mat4 = Matrix4<f32>;

/// Vector helpers shared by every fixed-size float vector
pub trait VectorExt: Sized {
    /// Unit vector in the same direction, or the zero vector when the
    /// magnitude is zero.
    fn normalized_or_zero(&self) -> Self;

    /// Euclidean distance to another point
    fn distance_to(&self, other: &Self) -> f32;
}

impl<const D: usize> VectorExt for SVector<f32, D> {
    fn normalized_or_zero(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            Self::zeros()
        } else {
            self / magnitude
        }
    }

    fn distance_to(&self, other: &Self) -> f32 {
        (other - self).magnitude()
    }
}

/// Affine factories and accessors for 2D transform matrices
pub trait Mat3Ext {
    /// Translation by `position`
    fn create_translation(position: Vec2) -> Mat3;

    /// Rotation by `radians` in the module's handedness
    fn create_rotation(radians: f32) -> Mat3;

    /// Non-uniform scale
    fn create_scale(x: f32, y: f32) -> Mat3;

    /// The translation column
    fn translation_column(&self) -> Vec2;

    /// Transform a point (homogeneous w = 1)
    fn apply_point(&self, point: Vec2) -> Vec2;

    /// Transform a direction (homogeneous w = 0, translation ignored)
    fn apply_vector(&self, vector: Vec2) -> Vec2;

    /// Whether the bottom row is `[0, 0, 1]`
    fn is_affine(&self) -> bool;
}

impl Mat3Ext for Mat3 {
    #[rustfmt::skip]
    fn create_translation(position: Vec2) -> Mat3 {
        Mat3::new(
            1.0, 0.0, position.x,
            0.0, 1.0, position.y,
            0.0, 0.0, 1.0,
        )
    }

    #[rustfmt::skip]
    fn create_rotation(radians: f32) -> Mat3 {
        let (sin, cos) = radians.sin_cos();
        Mat3::new(
            cos, sin, 0.0,
            -sin, cos, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    #[rustfmt::skip]
    fn create_scale(x: f32, y: f32) -> Mat3 {
        Mat3::new(
            x, 0.0, 0.0,
            0.0, y, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    fn translation_column(&self) -> Vec2 {
        Vec2::new(self[(0, 2)], self[(1, 2)])
    }

    fn apply_point(&self, point: Vec2) -> Vec2 {
        let result = self * Vec3::new(point.x, point.y, 1.0);
        Vec2::new(result.x, result.y)
    }

    fn apply_vector(&self, vector: Vec2) -> Vec2 {
        let result = self * Vec3::new(vector.x, vector.y, 0.0);
        Vec2::new(result.x, result.y)
    }

    fn is_affine(&self) -> bool {
        self[(2, 0)] == 0.0 && self[(2, 1)] == 0.0 && self[(2, 2)] == 1.0
    }
}

/// Affine factories and accessors for 3D transform matrices
pub trait Mat4Ext {
    /// Translation by `position`
    fn create_translation(position: Vec3) -> Mat4;

    /// Rotation about the X axis, same handedness as the 2D rotation
    fn create_rotation_x(radians: f32) -> Mat4;

    /// Rotation about the Y axis, same handedness as the 2D rotation
    fn create_rotation_y(radians: f32) -> Mat4;

    /// Rotation about the Z axis; identical to the 2D rotation in the XY plane
    fn create_rotation_z(radians: f32) -> Mat4;

    /// Non-uniform scale
    fn create_scale(x: f32, y: f32, z: f32) -> Mat4;

    /// The translation column
    fn translation_column(&self) -> Vec3;

    /// Transform a point (homogeneous w = 1)
    fn apply_point(&self, point: Vec3) -> Vec3;

    /// Transform a direction (homogeneous w = 0, translation ignored)
    fn apply_vector(&self, vector: Vec3) -> Vec3;

    /// Whether the bottom row is `[0, 0, 0, 1]`
    fn is_affine(&self) -> bool;
}

impl Mat4Ext for Mat4 {
    #[rustfmt::skip]
    fn create_translation(position: Vec3) -> Mat4 {
        Mat4::new(
            1.0, 0.0, 0.0, position.x,
            0.0, 1.0, 0.0, position.y,
            0.0, 0.0, 1.0, position.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    #[rustfmt::skip]
    fn create_rotation_x(radians: f32) -> Mat4 {
        let (sin, cos) = radians.sin_cos();
        Mat4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, cos, sin, 0.0,
            0.0, -sin, cos, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    #[rustfmt::skip]
    fn create_rotation_y(radians: f32) -> Mat4 {
        let (sin, cos) = radians.sin_cos();
        Mat4::new(
            cos, 0.0, -sin, 0.0,
            0.0, 1.0, 0.0, 0.0,
            sin, 0.0, cos, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    #[rustfmt::skip]
    fn create_rotation_z(radians: f32) -> Mat4 {
        let (sin, cos) = radians.sin_cos();
        Mat4::new(
            cos, sin, 0.0, 0.0,
            -sin, cos, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    #[rustfmt::skip]
    fn create_scale(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::new(
            x, 0.0, 0.0, 0.0,
            0.0, y, 0.0, 0.0,
            0.0, 0.0, z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    fn translation_column(&self) -> Vec3 {
        Vec3::new(self[(0, 3)], self[(1, 3)], self[(2, 3)])
    }

    fn apply_point(&self, point: Vec3) -> Vec3 {
        let result = self * Vec4::new(point.x, point.y, point.z, 1.0);
        Vec3::new(result.x, result.y, result.z)
    }

    fn apply_vector(&self, vector: Vec3) -> Vec3 {
        let result = self * Vec4::new(vector.x, vector.y, vector.z, 0.0);
        Vec3::new(result.x, result.y, result.z)
    }

    fn is_affine(&self) -> bool {
        self[(3, 0)] == 0.0 && self[(3, 1)] == 0.0 && self[(3, 2)] == 0.0 && self[(3, 3)] == 1.0
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}
