//! Object placement in world space.
//!
//! A [`Transform`] stores translation, rotation (as angle around an axis) and
//! non-uniform scale and turns them into a model matrix on demand. Shaders need
//! a separate normal matrix so lighting stays correct under non-uniform scale.

use std::ops::Mul;

use cgmath::{Deg, InnerSpace, Matrix, Matrix3, Matrix4, Rad, SquareMatrix, Vector3, Zero};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f32>,
    pub angle: Rad<f32>,
    pub axis: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    /// Identity transformation (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            translation: Vector3::zero(),
            angle: Rad(0.0),
            axis: Vector3::unit_y(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn from_translation(translation: impl Into<Vector3<f32>>) -> Self {
        Self {
            translation: translation.into(),
            ..Self::new()
        }
    }

    pub fn with_rotation(mut self, angle: impl Into<Rad<f32>>, axis: impl Into<Vector3<f32>>) -> Self {
        self.angle = angle.into();
        self.axis = axis.into();
        self
    }

    pub fn with_scale(mut self, scale: impl Into<Vector3<f32>>) -> Self {
        self.scale = scale.into();
        self
    }

    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vector3::new(scale, scale, scale))
    }

    pub fn rotate(&mut self, delta: impl Into<Rad<f32>>) {
        self.angle += delta.into();
        // Keep the angle bounded for long-running animations.
        self.angle.0 %= std::f32::consts::TAU;
    }

    fn rotation(&self) -> Matrix4<f32> {
        if self.axis.magnitude2() <= f32::EPSILON || self.angle.0 == 0.0 {
            Matrix4::identity()
        } else {
            Matrix4::from_axis_angle(self.axis.normalize(), self.angle)
        }
    }

    /// `translation * rotation * scale`
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation)
            * self.rotation()
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Inverse transpose of the upper 3x3 of the model matrix. Falls back to the
    /// identity for a degenerate (zero-scale) transform.
    pub fn normal_matrix(&self) -> Matrix3<f32> {
        normal_matrix(&self.to_matrix())
    }
}

pub fn normal_matrix(model: &Matrix4<f32>) -> Matrix3<f32> {
    let upper = Matrix3::from_cols(model.x.truncate(), model.y.truncate(), model.z.truncate());
    upper
        .invert()
        .map(|inverse| inverse.transpose())
        .unwrap_or_else(Matrix3::identity)
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vector3<f32>> for Transform {
    fn from(translation: Vector3<f32>) -> Self {
        Transform::from_translation(translation)
    }
}

/// Parent-child composition: the result places `rhs` relative to `self`.
impl Mul<&Transform> for &Transform {
    type Output = Matrix4<f32>;

    fn mul(self, rhs: &Transform) -> Self::Output {
        self.to_matrix() * rhs.to_matrix()
    }
}

impl Mul<Transform> for Transform {
    type Output = Matrix4<f32>;

    fn mul(self, rhs: Transform) -> Self::Output {
        &self * &rhs
    }
}

/// Degrees are the unit demo code thinks in.
pub fn deg(angle: f32) -> Rad<f32> {
    Deg(angle).into()
}
