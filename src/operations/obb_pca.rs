use crate::error::{OperationError, Result};
use crate::geometry::Obb;
use crate::math::eigen_3d::symmetric_eigen_3d;
use crate::math::{Matrix3, Point3, Vector3, TOLERANCE};

/// Computes an oriented bounding box from the principal axes of a point
/// cloud.
///
/// A single pass builds the covariance matrix of the centered points; its
/// eigenvectors become the box axes directly. This is O(n) with a small
/// constant and no combinatorial search, but the eigenvectors align with
/// the directions of maximum spread, not minimum bounding area. The
/// resulting box can be substantially looser (empirically up to ~4x the
/// area) than [`compute_obb`](crate::operations::compute_obb).
///
/// # Errors
///
/// Returns [`OperationError::EmptyPointSet`] if `points` is empty.
pub fn compute_pca_obb(points: &[Point3]) -> Result<Obb> {
    if points.is_empty() {
        return Err(OperationError::EmptyPointSet.into());
    }

    let centroid = centroid(points);
    let cov = covariance(points, &centroid);
    let (_, basis) = symmetric_eigen_3d(&cov);
    let (u_dir, v_dir) = orthonormal_axes(&basis);

    Obb::fit_from_axes(u_dir, v_dir, points)
}

/// The mean of all points.
fn centroid(points: &[Point3]) -> Point3 {
    #[allow(clippy::cast_precision_loss)]
    let normalizer = 1.0 / points.len() as f64;

    let mut sum = Vector3::zeros();
    for p in points {
        sum += p.coords;
    }

    Point3::origin() + sum * normalizer
}

/// The covariance matrix of the centered points, normalized by the point
/// count. Symmetric by construction.
fn covariance(points: &[Point3], centroid: &Point3) -> Matrix3 {
    #[allow(clippy::cast_precision_loss)]
    let normalizer = 1.0 / points.len() as f64;

    let mut cov = Matrix3::zeros();
    for p in points {
        let d = p - centroid;
        cov += d * (d * normalizer).transpose();
    }

    cov
}

/// Extracts a clean axis pair from the accumulated eigenvector basis.
///
/// The Jacobi iteration can leave the basis measurably non-orthogonal
/// after many rotations, so the axes are re-normalized and the third
/// re-derived from a cross product. Falls back to the world axes when
/// the basis has collapsed.
fn orthonormal_axes(basis: &Matrix3) -> (Vector3, Vector3) {
    let e0 = basis.column(0).into_owned();
    let e1 = basis.column(1).into_owned();

    let u_len = e0.norm();
    if u_len < TOLERANCE {
        return (Vector3::x(), Vector3::y());
    }
    let u_dir = e0 / u_len;

    let w_dir = u_dir.cross(&e1);
    if w_dir.norm() < TOLERANCE {
        return (Vector3::x(), Vector3::y());
    }
    let w_dir = w_dir.normalize();
    let v_dir = w_dir.cross(&u_dir);

    (u_dir, v_dir)
}
