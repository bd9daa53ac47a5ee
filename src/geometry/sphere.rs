use crate::math::{Point3, TOLERANCE};

/// A bounding sphere.
#[derive(Debug, Clone, Copy)]
pub struct BoundingSphere {
    /// Center of the sphere.
    pub center: Point3,
    /// Radius of the sphere, non-negative.
    pub radius: f64,
}

impl BoundingSphere {
    /// Creates a sphere from a center and radius.
    ///
    /// A negative radius is clamped to zero.
    #[must_use]
    pub fn new(center: Point3, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Checks if a point lies inside the sphere, within tolerance.
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        (point - self.center).norm() <= self.radius + TOLERANCE
    }

    /// Checks if two spheres overlap, within tolerance.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        (other.center - self.center).norm() <= self.radius + other.radius + TOLERANCE
    }
}
