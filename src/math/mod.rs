//! Element mechanics: local stiffness and coordinate transforms

pub mod sparse;

use nalgebra::{DMatrix, DVector, Matrix3, SMatrix, SVector, Vector3};

use crate::elements::ElementProperty;

pub use sparse::{sparse_matvec, SparseLuSolver, SparseMatrixBuilder};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Vec3 = Vector3<f64>;

/// 12x12 matrix for element stiffness
pub type Mat12 = SMatrix<f64, 12, 12>;
/// 12-element vector for element forces/displacements
pub type Vec12 = SVector<f64, 12>;

/// Relative tolerance below which the orientation vector is treated as
/// parallel to the element axis
const COLLINEAR_TOL: f64 = 1e-10;

/// Why a local frame could not be built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    ZeroLength,
    NonFinite,
    Collinear,
}

/// Compute the local stiffness matrix for a 3D Euler-Bernoulli beam
///
/// DOF order per node: [u, v, w, θx, θy, θz], node 0 then node 1.
pub fn beam_local_stiffness(prop: &ElementProperty, length: f64) -> Mat12 {
    let l = length;
    let l2 = l * l;
    let l3 = l2 * l;

    let ea_l = prop.ea / l;
    let gj_l = prop.gj / l;

    let eiy_l3 = prop.eiy / l3;
    let eiy_l2 = prop.eiy / l2;
    let eiy_l = prop.eiy / l;

    let eiz_l3 = prop.eiz / l3;
    let eiz_l2 = prop.eiz / l2;
    let eiz_l = prop.eiz / l;

    #[rustfmt::skip]
    let data = [
        // Row 0: axial at node 0
        ea_l,      0.0,          0.0,           0.0,    0.0,           0.0,          -ea_l,     0.0,          0.0,           0.0,    0.0,           0.0,
        // Row 1: shear Fy at node 0
        0.0,       12.0*eiz_l3,  0.0,           0.0,    0.0,           6.0*eiz_l2,   0.0,       -12.0*eiz_l3, 0.0,           0.0,    0.0,           6.0*eiz_l2,
        // Row 2: shear Fz at node 0
        0.0,       0.0,          12.0*eiy_l3,   0.0,    -6.0*eiy_l2,   0.0,          0.0,       0.0,          -12.0*eiy_l3,  0.0,    -6.0*eiy_l2,   0.0,
        // Row 3: torsion at node 0
        0.0,       0.0,          0.0,           gj_l,   0.0,           0.0,          0.0,       0.0,          0.0,           -gj_l,  0.0,           0.0,
        // Row 4: moment My at node 0
        0.0,       0.0,          -6.0*eiy_l2,   0.0,    4.0*eiy_l,     0.0,          0.0,       0.0,          6.0*eiy_l2,    0.0,    2.0*eiy_l,     0.0,
        // Row 5: moment Mz at node 0
        0.0,       6.0*eiz_l2,   0.0,           0.0,    0.0,           4.0*eiz_l,    0.0,       -6.0*eiz_l2,  0.0,           0.0,    0.0,           2.0*eiz_l,
        // Row 6: axial at node 1
        -ea_l,     0.0,          0.0,           0.0,    0.0,           0.0,          ea_l,      0.0,          0.0,           0.0,    0.0,           0.0,
        // Row 7: shear Fy at node 1
        0.0,       -12.0*eiz_l3, 0.0,           0.0,    0.0,           -6.0*eiz_l2,  0.0,       12.0*eiz_l3,  0.0,           0.0,    0.0,           -6.0*eiz_l2,
        // Row 8: shear Fz at node 1
        0.0,       0.0,          -12.0*eiy_l3,  0.0,    6.0*eiy_l2,    0.0,          0.0,       0.0,          12.0*eiy_l3,   0.0,    6.0*eiy_l2,    0.0,
        // Row 9: torsion at node 1
        0.0,       0.0,          0.0,           -gj_l,  0.0,           0.0,          0.0,       0.0,          0.0,           gj_l,   0.0,           0.0,
        // Row 10: moment My at node 1
        0.0,       0.0,          -6.0*eiy_l2,   0.0,    2.0*eiy_l,     0.0,          0.0,       0.0,          6.0*eiy_l2,    0.0,    4.0*eiy_l,     0.0,
        // Row 11: moment Mz at node 1
        0.0,       6.0*eiz_l2,   0.0,           0.0,    0.0,           2.0*eiz_l,    0.0,       -6.0*eiz_l2,  0.0,           0.0,    0.0,           4.0*eiz_l,
    ];

    Mat12::from_row_slice(&data)
}

/// Element length, rejecting coincident or non-finite end points
pub fn element_length(p0: &Vec3, p1: &Vec3) -> Result<f64, FrameError> {
    let length = (p1 - p0).norm();
    if !length.is_finite() {
        return Err(FrameError::NonFinite);
    }
    if length == 0.0 {
        return Err(FrameError::ZeroLength);
    }
    Ok(length)
}

/// Build the 3x3 direction cosine matrix of an element
///
/// Rows are the local axes in global coordinates:
/// - x along p0 → p1
/// - z = x × normal
/// - y = z × x, which equals the normalized `normal` whenever `normal` is
///   perpendicular to the element
pub fn rotation_matrix(p0: &Vec3, p1: &Vec3, normal: &Vec3) -> Result<Mat3, FrameError> {
    element_length(p0, p1)?;
    let x = (p1 - p0).normalize();

    let n_len = normal.norm();
    if !n_len.is_finite() {
        return Err(FrameError::NonFinite);
    }
    if n_len == 0.0 {
        return Err(FrameError::Collinear);
    }

    let z = x.cross(&(normal / n_len));
    let z_len = z.norm();
    if z_len < COLLINEAR_TOL {
        return Err(FrameError::Collinear);
    }
    let z = z / z_len;
    let y = z.cross(&x);

    Ok(Mat3::from_rows(&[x.transpose(), y.transpose(), z.transpose()]))
}

/// Build the 12x12 block-diagonal transformation from a 3x3 rotation
pub fn transformation_matrix(r: &Mat3) -> Mat12 {
    let mut t = Mat12::zeros();
    for block in 0..4 {
        let offset = block * 3;
        t.fixed_view_mut::<3, 3>(offset, offset).copy_from(r);
    }
    t
}

/// Report values below `epsilon` in magnitude as exactly zero
#[inline]
pub fn round_small(value: f64, epsilon: f64) -> f64 {
    if value.abs() < epsilon {
        0.0
    } else {
        value
    }
}
