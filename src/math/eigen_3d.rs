use super::{Matrix3, Vector3, TOLERANCE};

/// Maximum number of cyclic sweeps over the off-diagonal pairs.
const MAX_SWEEPS: usize = 50;

/// Convergence threshold on the summed off-diagonal magnitudes.
const OFF_DIAGONAL_EPS: f64 = 1e-10;

/// Off-diagonal index pairs visited by one cyclic sweep.
const PAIRS: [(usize, usize); 3] = [(0, 1), (0, 2), (1, 2)];

/// Computes the eigen-decomposition of a symmetric 3x3 matrix by cyclic
/// Jacobi rotation.
///
/// Returns the eigenvalues together with a matrix whose columns are the
/// matching eigenvectors. Sweeps stop once the off-diagonal mass drops
/// below a small threshold; the sweep count is capped, so the routine
/// always terminates.
///
/// Only the symmetric part of `m` is meaningful. Callers in this crate
/// pass covariance matrices, which are symmetric by construction.
#[must_use]
pub fn symmetric_eigen_3d(m: &Matrix3) -> (Vector3, Matrix3) {
    let mut a = *m;
    let mut basis = Matrix3::identity();

    for _ in 0..MAX_SWEEPS {
        if off_diagonal_sum(&a) < OFF_DIAGONAL_EPS {
            break;
        }

        for &(p, q) in &PAIRS {
            if a[(p, q)].abs() < OFF_DIAGONAL_EPS {
                continue;
            }

            let denom = a[(q, q)] - a[(p, p)];
            let t = if denom.abs() < TOLERANCE {
                1.0
            } else {
                a[(p, q)] / denom
            };
            let c = 1.0 / (1.0 + t * t).sqrt();
            let s = t * c;

            let rotation = plane_rotation(p, q, c, s);
            a = rotation.transpose() * a * rotation;
            basis *= rotation;
        }
    }

    (Vector3::new(a[(0, 0)], a[(1, 1)], a[(2, 2)]), basis)
}

/// Builds the Givens rotation acting on the (p, q) coordinate plane.
fn plane_rotation(p: usize, q: usize, c: f64, s: f64) -> Matrix3 {
    let mut r = Matrix3::identity();
    r[(p, p)] = c;
    r[(q, q)] = c;
    r[(p, q)] = s;
    r[(q, p)] = -s;
    r
}

/// Sum of absolute off-diagonal entries (upper triangle; the matrix stays
/// symmetric under the two-sided rotations).
fn off_diagonal_sum(a: &Matrix3) -> f64 {
    a[(0, 1)].abs() + a[(0, 2)].abs() + a[(1, 2)].abs()
}
