//! Per-actor transform node
//!
//! A node keeps its translation, rotation, and scale as separate factor
//! matrices and derives two matrices from them:
//!
//! ```text
//! local  = translation * rotation * scale
//! global = parent.global * local      (or world * local for a root)
//! ```
//!
//! A point is therefore scaled first, then rotated, then translated. Setting a
//! factor replaces it; rotations never accumulate.

use super::space::{Planar, Space, Spatial};
use crate::foundation::math::{Mat4, Mat4Ext, Vec2, Vec3};

/// Translation/rotation/scale factors with derived local and global matrices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformNode<S: Space> {
    translation: S::Matrix,
    rotation: S::Matrix,
    scale: S::Matrix,
    local: S::Matrix,
    global: S::Matrix,
}

impl<S: Space> Default for TransformNode<S> {
    fn default() -> Self {
        Self {
            translation: S::identity(),
            rotation: S::identity(),
            scale: S::identity(),
            local: S::identity(),
            global: S::identity(),
        }
    }
}

impl<S: Space> TransformNode<S> {
    /// Identity node
    pub fn new() -> Self {
        Self::default()
    }

    /// Node translated to `position`, with local/global already derived
    pub fn from_position(position: S::Vector) -> Self {
        let mut node = Self::default();
        node.set_translation(position);
        node.update_local_transform();
        node.global = node.local;
        node
    }

    /// Replace the translation factor
    pub fn set_translation(&mut self, position: S::Vector) {
        self.translation = S::translation(position);
    }

    /// Replace the rotation factor with a rotation in the XY plane
    pub fn set_rotation(&mut self, radians: f32) {
        self.rotation = S::rotation(radians);
    }

    /// Replace the rotation factor with an arbitrary matrix
    pub fn set_rotation_matrix(&mut self, rotation: S::Matrix) {
        self.rotation = rotation;
    }

    /// Replace the scale factor
    pub fn set_scale(&mut self, factors: S::Vector) {
        self.scale = S::scale(factors);
    }

    /// Recompute `local = translation * rotation * scale`.
    ///
    /// Must run after factor changes and before the global transform is
    /// refreshed.
    pub fn update_local_transform(&mut self) {
        self.local = self.translation * self.rotation * self.scale;
    }

    /// Recompute the global transform from the parent's current global
    /// transform, or from the scene's world transform for a root node.
    pub fn update_global_transform(&mut self, parent_global: Option<&S::Matrix>, world: &S::Matrix) {
        self.global = match parent_global {
            Some(parent) => *parent * self.local,
            None => *world * self.local,
        };
    }

    /// Position relative to the parent.
    ///
    /// Read from the translation factor, which always equals the translation
    /// column of `local` once it is refreshed, so a position written this
    /// frame is visible immediately.
    pub fn local_position(&self) -> S::Vector {
        S::translation_of(&self.translation)
    }

    /// Overwrite the local position (translation factor only)
    pub fn set_local_position(&mut self, position: S::Vector) {
        self.set_translation(position);
    }

    /// Position in scene space as of the last global refresh
    pub fn global_position(&self) -> S::Vector {
        S::translation_of(&self.global)
    }

    /// Facing direction read off the global transform's first basis column
    pub fn forward(&self) -> S::Vector {
        S::forward_of(&self.global)
    }

    /// Translation factor
    pub fn translation(&self) -> &S::Matrix {
        &self.translation
    }

    /// Rotation factor
    pub fn rotation(&self) -> &S::Matrix {
        &self.rotation
    }

    /// Scale factor
    pub fn scale(&self) -> &S::Matrix {
        &self.scale
    }

    /// Local transform as of the last refresh
    pub fn local(&self) -> &S::Matrix {
        &self.local
    }

    /// Global transform as of the last refresh
    pub fn global(&self) -> &S::Matrix {
        &self.global
    }
}

impl TransformNode<Planar> {
    /// Replace the scale factor with separate x/y factors
    pub fn set_scale_xy(&mut self, x: f32, y: f32) {
        self.set_scale(Vec2::new(x, y));
    }
}

impl TransformNode<Spatial> {
    /// Replace the rotation factor with a rotation about the X axis
    pub fn set_rotation_x(&mut self, radians: f32) {
        self.rotation = Mat4::create_rotation_x(radians);
    }

    /// Replace the rotation factor with a rotation about the Y axis
    pub fn set_rotation_y(&mut self, radians: f32) {
        self.rotation = Mat4::create_rotation_y(radians);
    }

    /// Replace the rotation factor with a rotation about the Z axis
    pub fn set_rotation_z(&mut self, radians: f32) {
        self.rotation = Mat4::create_rotation_z(radians);
    }

    /// Replace the scale factor with separate x/y/z factors
    pub fn set_scale_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.set_scale(Vec3::new(x, y, z));
    }
}
