use crate::error::{OperationError, Result};
use crate::geometry::BoundingSphere;
use crate::math::{Point3, Vector3};

/// Computes a bounding sphere of a point cloud.
///
/// The sphere is centered on the centroid with the maximum point distance
/// as radius. This is a fast approximation of the minimum enclosing
/// sphere, not the optimum.
///
/// # Errors
///
/// Returns [`OperationError::EmptyPointSet`] if `points` is empty.
pub fn compute_bounding_sphere(points: &[Point3]) -> Result<BoundingSphere> {
    if points.is_empty() {
        return Err(OperationError::EmptyPointSet.into());
    }

    #[allow(clippy::cast_precision_loss)]
    let normalizer = 1.0 / points.len() as f64;
    let mut sum = Vector3::zeros();
    for p in points {
        sum += p.coords;
    }
    let center = Point3::origin() + sum * normalizer;

    let mut radius_sq: f64 = 0.0;
    for p in points {
        radius_sq = radius_sq.max((p - center).norm_squared());
    }

    Ok(BoundingSphere::new(center, radius_sq.sqrt()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn rejects_empty_input() {
        assert!(compute_bounding_sphere(&[]).is_err());
    }

    #[test]
    fn single_point_has_zero_radius() {
        let p = Point3::new(2.0, -1.0, 4.0);
        let sphere = compute_bounding_sphere(&[p]).unwrap();

        assert!((sphere.center - p).norm() < TOL);
        assert!(sphere.radius < TOL);
    }

    #[test]
    fn symmetric_pair_centers_on_midpoint() {
        let points = [Point3::new(-3.0, 0.0, 0.0), Point3::new(3.0, 0.0, 0.0)];
        let sphere = compute_bounding_sphere(&points).unwrap();

        assert!((sphere.center - Point3::origin()).norm() < TOL);
        assert!((sphere.radius - 3.0).abs() < TOL, "r={}", sphere.radius);
    }

    #[test]
    fn contains_every_input_point() {
        let points = [
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(-4.0, 0.5, 2.0),
            Point3::new(2.0, -3.0, 1.0),
            Point3::new(0.0, 0.0, -5.0),
        ];
        let sphere = compute_bounding_sphere(&points).unwrap();

        for p in &points {
            assert!(sphere.contains(p), "{p} outside sphere");
        }
    }
}
