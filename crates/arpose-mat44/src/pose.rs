//! Camera outputs extracted from tracked model-view transforms.

use serde::{Deserialize, Serialize};

use crate::{checked, Mat44Error, Matrix44, Tolerance};

/// Camera outputs derived from a tracked model-view transform.
///
/// These are the values handed to the host application for each tracked result: three
/// position scalars and sixteen orientation scalars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Camera position with the y and z axes flipped into the host view convention.
    pub position: [f32; 3],
    /// Full 4x4 orientation transform, column-major.
    pub orientation: Matrix44,
}

impl CameraPose {
    /// Extract the camera outputs directly from a model-view transform.
    ///
    /// The position is `(m[12], -m[13], -m[14])` and the orientation is the model-view
    /// matrix unchanged.
    pub fn from_model_view(model_view: &Matrix44) -> Self {
        let [tx, ty, tz] = model_view.translation();
        let pose = Self {
            position: [tx, -ty, -tz],
            orientation: *model_view,
        };
        log::debug!("camera position: {:?}", pose.position);
        pose
    }

    /// Extract the camera outputs from the inverse-transpose of a model-view transform.
    ///
    /// # Errors
    ///
    /// [`Mat44Error::SingularMatrix`] when the model-view matrix cannot be inverted.
    pub fn from_inverse_model_view(
        model_view: &Matrix44,
        tol: &Tolerance,
    ) -> Result<Self, Mat44Error> {
        let inv_transposed = checked::try_inverse(model_view, tol)?.transpose();
        Ok(Self::from_model_view(&inv_transposed))
    }

    /// The sixteen orientation scalars, column-major.
    #[inline]
    pub fn orientation_scalars(&self) -> [f32; 16] {
        self.orientation.to_cols_array()
    }

    /// Returns `true` if neither the position nor the orientation carries `inf`/`NaN`.
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|v| v.is_finite()) && self.orientation.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_from_model_view() {
        let mut mv = ops::rotation_matrix(30.0, 0.0, 1.0, 0.0);
        ops::translate_pose(1.0, 2.0, 3.0, Some(&mut mv));
        let pose = CameraPose::from_model_view(&mv);
        assert_eq!(pose.position, [mv.0[12], -mv.0[13], -mv.0[14]]);
        assert_eq!(pose.orientation_scalars(), mv.0);
        assert!(pose.is_finite());
    }

    #[test]
    fn test_from_inverse_model_view() -> Result<(), Box<dyn std::error::Error>> {
        let mv = ops::translation_matrix(1.0, 2.0, 3.0);
        let pose = CameraPose::from_inverse_model_view(&mv, &Tolerance::default())?;
        // the inverse translation ends up in the bottom row after the transpose
        let o = pose.orientation;
        assert_abs_diff_eq!(o.get(3, 0), -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(o.get(3, 1), -2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(o.get(3, 2), -3.0, epsilon = 1e-6);
        assert_eq!(pose.position, [0.0, 0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn test_from_inverse_model_view_singular() {
        let res = CameraPose::from_inverse_model_view(&Matrix44::ZERO, &Tolerance::default());
        assert!(matches!(res, Err(Mat44Error::SingularMatrix { .. })));
    }

    #[test]
    fn test_nan_pose_detected() {
        let mv = ops::rotation_matrix(10.0, 0.0, 0.0, 0.0);
        assert!(!CameraPose::from_model_view(&mv).is_finite());
    }
}
