//! Matrix44 primitives: identity, transpose, determinant, inverse, rotation and composition.
//!
//! None of these functions guard against degenerate input. A singular matrix passed to
//! [`inverse`] or a zero-length axis passed to [`rotation_matrix`] produces `inf`/`NaN`
//! entries that propagate through every later computation. Use the [`crate::checked`]
//! variants to get an explicit error instead.

use crate::Matrix44;

// Row/column indices left over after removing the one at the array position.
const REMAINING: [[usize; 3]; 4] = [[1, 2, 3], [0, 2, 3], [0, 1, 3], [0, 1, 2]];

/// Identity transform: all zeros except flat indices 0, 5, 10 and 15.
#[inline]
pub fn identity() -> Matrix44 {
    Matrix44::IDENTITY
}

/// Transpose a matrix.
///
/// # Arguments
///
/// * `m` - The matrix to transpose.
///
/// # Returns
///
/// A new matrix with `out(r, c) = m(c, r)`.
pub fn transpose(m: &Matrix44) -> Matrix44 {
    let mut out = Matrix44::ZERO;
    for i in 0..4 {
        for j in 0..4 {
            out.0[i * 4 + j] = m.0[i + 4 * j];
        }
    }
    out
}

/// Compute the determinant of a matrix.
///
/// Uses the fully expanded 24-term Leibniz formula, so the amount of work does not depend
/// on the input and there is no pivoting.
///
/// Singular matrices give `0.0`, or a value close to it after rounding.
pub fn determinant(m: &Matrix44) -> f32 {
    let a = &m.0;
    // mRC is the entry at row R, column C
    let (m00, m10, m20, m30) = (a[0], a[1], a[2], a[3]);
    let (m01, m11, m21, m31) = (a[4], a[5], a[6], a[7]);
    let (m02, m12, m22, m32) = (a[8], a[9], a[10], a[11]);
    let (m03, m13, m23, m33) = (a[12], a[13], a[14], a[15]);

    m00 * m11 * m22 * m33 - m00 * m11 * m23 * m32 - m00 * m12 * m21 * m33
        + m00 * m12 * m23 * m31
        + m00 * m13 * m21 * m32
        - m00 * m13 * m22 * m31
        - m01 * m10 * m22 * m33
        + m01 * m10 * m23 * m32
        + m01 * m12 * m20 * m33
        - m01 * m12 * m23 * m30
        - m01 * m13 * m20 * m32
        + m01 * m13 * m22 * m30
        + m02 * m10 * m21 * m33
        - m02 * m10 * m23 * m31
        - m02 * m11 * m20 * m33
        + m02 * m11 * m23 * m30
        + m02 * m13 * m20 * m31
        - m02 * m13 * m21 * m30
        - m03 * m10 * m21 * m32
        + m03 * m10 * m22 * m31
        + m03 * m11 * m20 * m32
        - m03 * m11 * m22 * m30
        - m03 * m12 * m20 * m31
        + m03 * m12 * m21 * m30
}

/// Determinant of the 3x3 submatrix obtained by deleting `row` and `col`.
#[inline]
fn minor(a: &[f32; 16], row: usize, col: usize) -> f32 {
    let [r0, r1, r2] = REMAINING[row];
    let [c0, c1, c2] = REMAINING[col];
    let e = |r: usize, c: usize| a[c * 4 + r];

    e(r0, c0) * (e(r1, c1) * e(r2, c2) - e(r1, c2) * e(r2, c1))
        - e(r0, c1) * (e(r1, c0) * e(r2, c2) - e(r1, c2) * e(r2, c0))
        + e(r0, c2) * (e(r1, c0) * e(r2, c1) - e(r1, c1) * e(r2, c0))
}

/// Compute the inverse of a matrix as `adj(m) / det(m)`.
///
/// Every entry of the adjugate is one signed 3x3 minor, so the cost is one determinant
/// plus sixteen minors regardless of the input.
///
/// PRECONDITION: `determinant(m) != 0`. Singular input is not detected and yields
/// `inf`/`NaN` entries. See [`crate::checked::try_inverse`] for the guarded version.
pub fn inverse(m: &Matrix44) -> Matrix44 {
    let inv_det = 1.0 / determinant(m);

    let mut out = Matrix44::ZERO;
    for row in 0..4 {
        for col in 0..4 {
            // adj(row, col) is the cofactor at (col, row)
            let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
            out.set(row, col, sign * minor(&m.0, col, row) * inv_det);
        }
    }
    out
}

/// Build a rotation matrix around an arbitrary axis using Rodrigues' formula.
///
/// # Arguments
///
/// * `angle` - The rotation angle in degrees, counter-clockwise about the axis.
/// * `x`, `y`, `z` - The rotation axis. It does not need to be normalized.
///
/// # Returns
///
/// A homogeneous rotation matrix with zero translation.
///
/// PRECONDITION: the axis is non-zero. A zero axis yields `NaN` in the upper-left 3x3
/// block. See [`crate::checked::try_rotation_matrix`] for the guarded version.
///
/// Example:
///
/// ```
/// use arpose_mat44::ops::rotation_matrix;
///
/// let r = rotation_matrix(90.0, 0.0, 0.0, 1.0);
/// let p = r.transform([1.0, 0.0, 0.0, 1.0]);
/// assert!(p[0].abs() < 1e-6 && (p[1] - 1.0).abs() < 1e-6);
/// ```
pub fn rotation_matrix(angle: f32, x: f32, y: f32, z: f32) -> Matrix44 {
    // trigonometry in double precision, narrowed once at the end
    let (s, c) = (angle as f64).to_radians().sin_cos();
    let t = 1.0 - c;

    let (x, y, z) = (x as f64, y as f64, z as f64);
    let length = (x * x + y * y + z * z).sqrt();
    let (x, y, z) = (x / length, y / length, z / length);

    let m00 = c + x * x * t;
    let m11 = c + y * y * t;
    let m22 = c + z * z * t;

    let m10 = x * y * t + z * s;
    let m01 = x * y * t - z * s;

    let m20 = x * z * t - y * s;
    let m02 = x * z * t + y * s;

    let m21 = y * z * t + x * s;
    let m12 = y * z * t - x * s;

    Matrix44::from_cols_array([
        m00 as f32, m10 as f32, m20 as f32, 0.0, //
        m01 as f32, m11 as f32, m21 as f32, 0.0, //
        m02 as f32, m12 as f32, m22 as f32, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Translation matrix: identity with flat indices 12, 13 and 14 set to `x`, `y` and `z`.
pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix44 {
    let mut m = Matrix44::IDENTITY;
    m.0[12] = x;
    m.0[13] = y;
    m.0[14] = z;
    m
}

/// Scale matrix with diagonal `(x, y, z, 1)`.
pub fn scale_matrix(x: f32, y: f32, z: f32) -> Matrix44 {
    let mut m = Matrix44::IDENTITY;
    m.0[0] = x;
    m.0[5] = y;
    m.0[10] = z;
    m
}

/// Compute the matrix product `a * b`.
///
/// The product is accumulated in a scratch buffer. The in-place variants
/// [`multiply_assign`] and [`premultiply_assign`] rely on this.
pub fn multiply(a: &Matrix44, b: &Matrix44) -> Matrix44 {
    let mut tmp = [0.0f32; 16];
    for i in 0..4 {
        for j in 0..4 {
            let mut acc = 0.0;
            for k in 0..4 {
                acc += a.0[k * 4 + i] * b.0[j * 4 + k];
            }
            tmp[j * 4 + i] = acc;
        }
    }
    Matrix44(tmp)
}

/// Compute `a * b` and write it to a caller-supplied buffer.
#[inline]
pub fn multiply_into(a: &Matrix44, b: &Matrix44, out: &mut Matrix44) {
    *out = multiply(a, b);
}

/// Compute `a * b` and store the result back into `a`.
///
/// This is the aliased form `multiply(a, b, out = a)` used for pose composition.
#[inline]
pub fn multiply_assign(a: &mut Matrix44, b: &Matrix44) {
    let tmp = multiply(a, b);
    *a = tmp;
}

/// Compute `a * b` and store the result back into `b`.
#[inline]
pub fn premultiply_assign(a: &Matrix44, b: &mut Matrix44) {
    let tmp = multiply(a, b);
    *b = tmp;
}

/// Rotate a pose in place: `pose = pose * rotation_matrix(angle, x, y, z)`.
///
/// Does nothing when `pose` is `None`.
pub fn rotate_pose(angle: f32, x: f32, y: f32, z: f32, pose: Option<&mut Matrix44>) {
    let Some(pose) = pose else {
        log::trace!("rotate_pose: no pose supplied, skipping");
        return;
    };
    let rotation = rotation_matrix(angle, x, y, z);
    multiply_assign(pose, &rotation);
}

/// Translate a pose in place: `pose = pose * translation_matrix(x, y, z)`.
///
/// Does nothing when `pose` is `None`.
pub fn translate_pose(x: f32, y: f32, z: f32, pose: Option<&mut Matrix44>) {
    let Some(pose) = pose else {
        log::trace!("translate_pose: no pose supplied, skipping");
        return;
    };
    // only the last column changes
    for r in 0..4 {
        pose.0[12 + r] += pose.0[r] * x + pose.0[4 + r] * y + pose.0[8 + r] * z;
    }
}

/// Scale a pose in place: `pose = pose * scale_matrix(x, y, z)`.
///
/// Does nothing when `pose` is `None`.
pub fn scale_pose(x: f32, y: f32, z: f32, pose: Option<&mut Matrix44>) {
    let Some(pose) = pose else {
        log::trace!("scale_pose: no pose supplied, skipping");
        return;
    };
    for r in 0..4 {
        pose.0[r] *= x;
        pose.0[4 + r] *= y;
        pose.0[8 + r] *= z;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_mat_eq(a: &Matrix44, b: &Matrix44, eps: f32) {
        for i in 0..16 {
            assert_abs_diff_eq!(a.0[i], b.0[i], epsilon = eps);
        }
    }

    fn sample() -> Matrix44 {
        Matrix44::from_rows([
            [2.0, 0.0, 1.0, 3.0],
            [1.0, 3.0, 0.0, -1.0],
            [0.0, 1.0, 4.0, 2.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    #[test]
    fn test_identity() {
        let m = identity();
        for (i, v) in m.0.iter().enumerate() {
            let expected = if matches!(i, 0 | 5 | 10 | 15) { 1.0 } else { 0.0 };
            assert_eq!(*v, expected);
        }
    }

    #[test]
    fn test_transpose() {
        let m = sample();
        let t = transpose(&m);
        for r in 0..4 {
            for c in 0..4 {
                assert_eq!(t.get(r, c), m.get(c, r));
            }
        }
        assert_eq!(transpose(&t), m);
    }

    #[test]
    fn test_determinant_identity() {
        assert_eq!(determinant(&identity()), 1.0);
    }

    #[test]
    fn test_determinant_known_value() {
        // upper-left block [[2,0,1],[1,3,0],[0,1,4]] has determinant 25
        assert_abs_diff_eq!(determinant(&sample()), 25.0, epsilon = 1e-5);
    }

    #[test]
    fn test_determinant_duplicated_row() {
        let m = Matrix44::from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, -6.0, 7.0, 8.0],
            [1.0, 2.0, 3.0, 4.0],
            [0.5, 0.0, 2.0, 1.0],
        ]);
        assert_abs_diff_eq!(determinant(&m), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_determinant_zero_row() {
        let mut m = sample();
        for c in 0..4 {
            m.set(2, c, 0.0);
        }
        assert_eq!(determinant(&m), 0.0);
    }

    #[test]
    fn test_determinant_row_scaling() {
        let m = sample();
        let mut scaled = m;
        for c in 0..4 {
            scaled.set(1, c, m.get(1, c) * 3.0);
        }
        assert_abs_diff_eq!(determinant(&scaled), 3.0 * determinant(&m), epsilon = 1e-4);
    }

    #[test]
    fn test_determinant_matches_glam() {
        let m = Matrix44::from_rows([
            [4.0, 7.0, 2.0, 3.0],
            [0.0, 5.0, 0.0, 1.0],
            [1.0, 0.0, 3.0, 0.0],
            [2.0, 6.0, 0.0, 8.0],
        ]);
        let g: glam::Mat4 = m.into();
        assert_abs_diff_eq!(determinant(&m), g.determinant(), epsilon = 1e-3);
    }

    #[test]
    fn test_inverse() {
        let m = sample();
        let inv = inverse(&m);
        assert_mat_eq(&multiply(&m, &inv), &identity(), 1e-5);
        assert_mat_eq(&multiply(&inv, &m), &identity(), 1e-5);
    }

    #[test]
    fn test_inverse_translation() {
        let inv = inverse(&translation_matrix(1.0, -2.0, 3.0));
        assert_mat_eq(&inv, &translation_matrix(-1.0, 2.0, -3.0), 1e-6);
    }

    #[test]
    fn test_inverse_singular_is_not_finite() {
        let m = Matrix44::from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [2.0, 4.0, 6.0, 8.0],
            [0.0, 1.0, 0.0, 1.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert!(!inverse(&m).is_finite());
    }

    #[test]
    fn test_rotation_matrix_z90() {
        let r = rotation_matrix(90.0, 0.0, 0.0, 1.0);
        let p = r.transform([1.0, 0.0, 0.0, 1.0]);
        assert_abs_diff_eq!(p[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p[1], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p[2], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p[3], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_matrix_z90_via_multiply() {
        // the point (1, 0, 0, 1) as the first column of an otherwise empty matrix
        let point = Matrix44::from_cols([
            [1.0, 0.0, 0.0, 1.0],
            [0.0; 4],
            [0.0; 4],
            [0.0; 4],
        ]);
        let rotated = multiply(&rotation_matrix(90.0, 0.0, 0.0, 1.0), &point);
        let p = rotated.col(0);
        assert_abs_diff_eq!(p[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p[1], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p[2], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p[3], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_matrix_matches_glam() {
        let r = rotation_matrix(30.0, 1.0, 2.0, -0.5);
        let axis = glam::Vec3::new(1.0, 2.0, -0.5).normalize();
        let g = glam::Mat4::from_axis_angle(axis, 30f32.to_radians());
        assert_mat_eq(&r, &Matrix44::from(g), 1e-6);
    }

    #[test]
    fn test_rotation_matrix_unnormalized_axis() {
        let a = rotation_matrix(45.0, 0.0, 10.0, 0.0);
        let b = rotation_matrix(45.0, 0.0, 1.0, 0.0);
        assert_mat_eq(&a, &b, 1e-7);
    }

    #[test]
    fn test_rotation_matrix_zero_and_full_turn() {
        assert_mat_eq(&rotation_matrix(0.0, 1.0, 1.0, 0.0), &identity(), 1e-7);
        assert_mat_eq(&rotation_matrix(360.0, 1.0, 1.0, 0.0), &identity(), 1e-6);
    }

    #[test]
    fn test_rotation_matrix_zero_axis_is_nan() {
        let r = rotation_matrix(45.0, 0.0, 0.0, 0.0);
        assert!(r.0[0].is_nan());
        assert_eq!(r.0[15], 1.0);
    }

    #[test]
    fn test_multiply_order() {
        let a = rotation_matrix(90.0, 0.0, 0.0, 1.0);
        let b = translation_matrix(1.0, 0.0, 0.0);
        // translate then rotate vs rotate then translate
        let ab = multiply(&a, &b).col(3);
        let ba = multiply(&b, &a).col(3);
        for (v, e) in ab.iter().zip([0.0, 1.0, 0.0, 1.0]) {
            assert_abs_diff_eq!(*v, e, epsilon = 1e-6);
        }
        for (v, e) in ba.iter().zip([1.0, 0.0, 0.0, 1.0]) {
            assert_abs_diff_eq!(*v, e, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_multiply_assign_aliasing() {
        let a = sample();
        let b = rotation_matrix(33.0, 1.0, 0.0, 1.0);

        let mut fresh = Matrix44::ZERO;
        multiply_into(&a, &b, &mut fresh);

        let mut in_place = a;
        multiply_assign(&mut in_place, &b);
        assert_eq!(in_place, fresh);

        let mut rhs = b;
        premultiply_assign(&a, &mut rhs);
        assert_eq!(rhs, fresh);
    }

    #[test]
    fn test_multiply_assign_self() {
        let a = sample();
        let mut m = a;
        multiply_assign(&mut m, &a);
        assert_eq!(m, multiply(&a, &a));
    }

    #[test]
    fn test_rotate_pose() {
        let mut pose = translation_matrix(0.0, 0.0, -5.0);
        let expected = multiply(&pose, &rotation_matrix(45.0, 0.0, 1.0, 0.0));
        rotate_pose(45.0, 0.0, 1.0, 0.0, Some(&mut pose));
        assert_eq!(pose, expected);
    }

    #[test]
    fn test_rotate_pose_none() {
        // nothing to observe besides not panicking
        rotate_pose(45.0, 0.0, 1.0, 0.0, None);
        translate_pose(1.0, 2.0, 3.0, None);
        scale_pose(1.0, 2.0, 3.0, None);
    }

    #[test]
    fn test_translate_pose() {
        let mut pose = rotation_matrix(90.0, 0.0, 0.0, 1.0);
        let expected = multiply(&pose, &translation_matrix(1.0, 2.0, 3.0));
        translate_pose(1.0, 2.0, 3.0, Some(&mut pose));
        assert_mat_eq(&pose, &expected, 1e-6);
    }

    #[test]
    fn test_scale_pose() {
        let mut pose = sample();
        let expected = multiply(&pose, &scale_matrix(2.0, 0.5, -1.0));
        scale_pose(2.0, 0.5, -1.0, Some(&mut pose));
        assert_mat_eq(&pose, &expected, 1e-6);
    }
}
