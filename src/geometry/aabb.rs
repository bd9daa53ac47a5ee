use crate::error::{OperationError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Computes the tight axis-aligned box of a point set.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::EmptyPointSet`] if `points` is empty.
    pub fn from_points(points: &[Point3]) -> Result<Self> {
        let (first, rest) = points
            .split_first()
            .ok_or(OperationError::EmptyPointSet)?;

        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Ok(Self { min, max })
    }

    /// Returns the center point of the box.
    #[must_use]
    pub fn center(&self) -> Point3 {
        self.min + (self.max - self.min) / 2.0
    }

    /// Returns the edge lengths of the box.
    #[must_use]
    pub fn extents(&self) -> Vector3 {
        self.max - self.min
    }

    /// Returns half the edge lengths of the box.
    #[must_use]
    pub fn half_extents(&self) -> Vector3 {
        self.extents() / 2.0
    }

    /// Relative surface-area score of the box.
    ///
    /// `ex*ey + ey*ez + ez*ex` over the full extents. Used only to compare
    /// boxes against each other; the constant factor to the true surface
    /// area is dropped.
    #[must_use]
    pub fn area_score(&self) -> f64 {
        let e = self.extents();
        e.x * e.y + e.y * e.z + e.z * e.x
    }

    /// Checks if a point lies inside the box, within tolerance.
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        point.x >= self.min.x - TOLERANCE
            && point.y >= self.min.y - TOLERANCE
            && point.z >= self.min.z - TOLERANCE
            && point.x <= self.max.x + TOLERANCE
            && point.y <= self.max.y + TOLERANCE
            && point.z <= self.max.z + TOLERANCE
    }

    /// Checks if two boxes overlap, within tolerance.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x + TOLERANCE
            && self.max.x >= other.min.x - TOLERANCE
            && self.min.y <= other.max.y + TOLERANCE
            && self.max.y >= other.min.y - TOLERANCE
            && self.min.z <= other.max.z + TOLERANCE
            && self.max.z >= other.min.z - TOLERANCE
    }

    /// Returns the smallest box enclosing both `self` and `other`.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        Self {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// Returns the box expanded by `margin` on every side.
    #[must_use]
    pub fn grown(&self, margin: f64) -> Self {
        let m = Vector3::new(margin, margin, margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }
}
