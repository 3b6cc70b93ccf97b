//! Fallible versions of the operations whose unchecked form can produce `inf`/`NaN`.

use crate::{ops, Mat44Error, Matrix44, Tolerance};

/// Compute the inverse of a matrix, rejecting singular input.
///
/// # Arguments
///
/// * `m` - The matrix to invert.
/// * `tol` - `tol.singular` is the smallest accepted `|det|` (exclusive).
///
/// # Errors
///
/// [`Mat44Error::SingularMatrix`] when the determinant is non-finite or `|det| <= tol.singular`.
pub fn try_inverse(m: &Matrix44, tol: &Tolerance) -> Result<Matrix44, Mat44Error> {
    let determinant = ops::determinant(m);
    if !determinant.is_finite() || determinant.abs() <= tol.singular {
        log::debug!("try_inverse: rejecting matrix with determinant {determinant}");
        return Err(Mat44Error::SingularMatrix { determinant });
    }
    Ok(ops::inverse(m))
}

/// Build a rotation matrix, rejecting a degenerate axis or a non-finite angle.
///
/// # Errors
///
/// * [`Mat44Error::NonFiniteAngle`] when `angle` is NaN or infinite.
/// * [`Mat44Error::DegenerateAxis`] when the axis length is `<= tol.axis` or a component
///   is not finite.
pub fn try_rotation_matrix(
    angle: f32,
    x: f32,
    y: f32,
    z: f32,
    tol: &Tolerance,
) -> Result<Matrix44, Mat44Error> {
    if !angle.is_finite() {
        log::debug!("try_rotation_matrix: rejecting angle {angle}");
        return Err(Mat44Error::NonFiniteAngle(angle));
    }
    // same precision as the normalization in `ops::rotation_matrix`
    let (dx, dy, dz) = (x as f64, y as f64, z as f64);
    let length = (dx * dx + dy * dy + dz * dz).sqrt();
    if !length.is_finite() || length <= tol.axis as f64 {
        log::debug!("try_rotation_matrix: rejecting axis ({x}, {y}, {z})");
        return Err(Mat44Error::DegenerateAxis {
            length: length as f32,
        });
    }
    Ok(ops::rotation_matrix(angle, x, y, z))
}

/// Rotate a pose in place, leaving it untouched when the rotation is invalid.
///
/// See [`ops::rotate_pose`] and [`try_rotation_matrix`].
pub fn try_rotate_pose(
    angle: f32,
    x: f32,
    y: f32,
    z: f32,
    pose: &mut Matrix44,
    tol: &Tolerance,
) -> Result<(), Mat44Error> {
    let rotation = try_rotation_matrix(angle, x, y, z, tol)?;
    ops::multiply_assign(pose, &rotation);
    Ok(())
}
