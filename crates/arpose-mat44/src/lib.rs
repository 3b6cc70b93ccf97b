#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Fallible matrix operations.
pub mod checked;

/// Core matrix operations.
pub mod ops;

/// Camera pose extraction from model-view transforms.
pub mod pose;

mod matrix;
mod types;

pub use matrix::Matrix44;
pub use pose::CameraPose;
pub use types::{Mat44Error, Tolerance};
