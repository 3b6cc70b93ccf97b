//! Error and tolerance types shared by the checked matrix operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for the checked matrix operations.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Mat44Error {
    /// The matrix determinant is zero, non-finite or within tolerance of zero.
    #[error("Matrix is singular or near-singular (determinant = {determinant})")]
    SingularMatrix {
        /// Determinant that triggered the rejection.
        determinant: f32,
    },

    /// The rotation axis has (near) zero length and cannot be normalized.
    #[error("Rotation axis is degenerate (length = {length})")]
    DegenerateAxis {
        /// Euclidean length of the supplied axis.
        length: f32,
    },

    /// The rotation angle is NaN or infinite.
    #[error("Rotation angle must be finite, got {0}")]
    NonFiniteAngle(f32),
}

/// Numeric tolerances used by the checked matrix operations.
///
/// Deserializes from a partial JSON object; missing fields take their default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// A matrix whose `|det|` is less than or equal to this value is treated as singular.
    pub singular: f32,
    /// An axis whose length is less than or equal to this value is treated as degenerate.
    pub axis: f32,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            singular: 1e-6,
            axis: 1e-8,
        }
    }
}
