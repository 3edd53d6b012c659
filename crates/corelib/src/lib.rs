//! Core types shared by the decoder crates: math re-exports, Transform, errors.

pub use glam::{EulerRot, Mat3, Mat4, Quat, Vec3, Vec4, vec3};

use thiserror::Error;

pub mod transform;

pub use transform::Transform;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A float slice had a component count the operation cannot handle.
    #[error("expected {expected} components, got {actual}")]
    ComponentCount { expected: &'static str, actual: usize },
}

pub type CoreResult<T> = Result<T, CoreError>;
