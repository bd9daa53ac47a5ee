use crate::error::{OperationError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Aabb, Frame};

/// An oriented bounding box: an orthonormal frame at the box center plus
/// non-negative half-extents along the frame axes.
///
/// A half-extent of zero describes a valid degenerate box (the enclosed
/// points were coplanar, collinear, or coincident), not an error.
#[derive(Debug, Clone)]
pub struct Obb {
    frame: Frame,
    half_extents: Vector3,
}

impl Obb {
    /// Creates a box from a frame and half-extents.
    ///
    /// Negative half-extent components are clamped to zero.
    #[must_use]
    pub fn new(frame: Frame, half_extents: Vector3) -> Self {
        Self {
            frame,
            half_extents: half_extents.map(|e| e.max(0.0)),
        }
    }

    /// The world-aligned box equivalent to an AABB.
    #[must_use]
    pub fn from_aabb(aabb: &Aabb) -> Self {
        Self {
            frame: Frame::world(aabb.center()),
            half_extents: aabb.half_extents(),
        }
    }

    /// Fits a box with the given orientation to a point set.
    ///
    /// `u_dir` and `v_dir` define the box orientation the way
    /// [`Frame::new`] does; the third axis is their cross product. Every
    /// point is projected onto the axes and the box takes the exact
    /// min/max span along each.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::EmptyPointSet`] if `points` is empty, or
    /// a geometry error if the directions are degenerate.
    pub fn fit_from_axes(u_dir: Vector3, v_dir: Vector3, points: &[Point3]) -> Result<Self> {
        if points.is_empty() {
            return Err(OperationError::EmptyPointSet.into());
        }

        let basis = Frame::new(Point3::origin(), u_dir, v_dir)?;
        let u = *basis.u_dir();
        let v = *basis.v_dir();
        let w = *basis.w_dir();

        let mut min = Vector3::repeat(f64::INFINITY);
        let mut max = Vector3::repeat(f64::NEG_INFINITY);
        for p in points {
            let proj = Vector3::new(p.coords.dot(&u), p.coords.dot(&v), p.coords.dot(&w));
            min.x = min.x.min(proj.x);
            min.y = min.y.min(proj.y);
            min.z = min.z.min(proj.z);
            max.x = max.x.max(proj.x);
            max.y = max.y.max(proj.y);
            max.z = max.z.max(proj.z);
        }

        let mid = (min + max) / 2.0;
        let center = Point3::origin() + u * mid.x + v * mid.y + w * mid.z;
        let frame = Frame::new(center, u, v)?;

        Ok(Self::new(frame, (max - min) / 2.0))
    }

    /// Returns the frame holding the box center and axes.
    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Returns the center point of the box.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        self.frame.origin()
    }

    /// Returns the half-extents along the frame axes.
    #[must_use]
    pub fn half_extents(&self) -> &Vector3 {
        &self.half_extents
    }

    /// Relative surface-area score of the box.
    ///
    /// `8 * (hx*hy + hy*hz + hz*hx)`, proportional to the true surface
    /// area. Consistent across all box comparisons in this crate.
    #[must_use]
    pub fn area(&self) -> f64 {
        let h = &self.half_extents;
        8.0 * (h.x * h.y + h.y * h.z + h.z * h.x)
    }

    /// Volume of the box.
    #[must_use]
    pub fn volume(&self) -> f64 {
        let h = &self.half_extents;
        8.0 * h.x * h.y * h.z
    }

    /// Checks if any half-extent is zero, within tolerance.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.half_extents.x < TOLERANCE
            || self.half_extents.y < TOLERANCE
            || self.half_extents.z < TOLERANCE
    }

    /// Checks if a point lies inside the box, within tolerance.
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        let local = self.frame.to_local(point);
        local.x.abs() <= self.half_extents.x + TOLERANCE
            && local.y.abs() <= self.half_extents.y + TOLERANCE
            && local.z.abs() <= self.half_extents.z + TOLERANCE
    }

    /// Returns the eight corner points of the box.
    #[must_use]
    pub fn corners(&self) -> [Point3; 8] {
        let c = *self.frame.origin();
        let u = self.frame.u_dir() * self.half_extents.x;
        let v = self.frame.v_dir() * self.half_extents.y;
        let w = self.frame.w_dir() * self.half_extents.z;

        [
            c - u - v - w,
            c + u - v - w,
            c - u + v - w,
            c + u + v - w,
            c - u - v + w,
            c + u - v + w,
            c - u + v + w,
            c + u + v + w,
        ]
    }

    /// Returns the tight axis-aligned box enclosing this box.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        let u = self.frame.u_dir();
        let v = self.frame.v_dir();
        let w = self.frame.w_dir();
        let h = &self.half_extents;

        let reach = Vector3::new(
            u.x.abs() * h.x + v.x.abs() * h.y + w.x.abs() * h.z,
            u.y.abs() * h.x + v.y.abs() * h.y + w.y.abs() * h.z,
            u.z.abs() * h.x + v.z.abs() * h.y + w.z.abs() * h.z,
        );
        let center = *self.frame.origin();

        Aabb {
            min: center - reach,
            max: center + reach,
        }
    }

    /// Checks if two oriented boxes overlap.
    ///
    /// Separating-axis test over the 15 candidate axes: the three face
    /// normals of each box and the nine pairwise edge cross products.
    /// Touching boxes count as overlapping.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let axes_a = [
            *self.frame.u_dir(),
            *self.frame.v_dir(),
            *self.frame.w_dir(),
        ];
        let axes_b = [
            *other.frame.u_dir(),
            *other.frame.v_dir(),
            *other.frame.w_dir(),
        ];
        let corners_a = self.corners();
        let corners_b = other.corners();

        for axis in &axes_a {
            if separated_on_axis(axis, &corners_a, &corners_b) {
                return false;
            }
        }
        for axis in &axes_b {
            if separated_on_axis(axis, &corners_a, &corners_b) {
                return false;
            }
        }
        for a in &axes_a {
            for b in &axes_b {
                let axis = a.cross(b);
                // Parallel edge pairs yield no new separating direction.
                if axis.norm_squared() < TOLERANCE {
                    continue;
                }
                if separated_on_axis(&axis, &corners_a, &corners_b) {
                    return false;
                }
            }
        }

        true
    }
}

/// Projects both corner sets onto `axis` and checks for disjoint intervals.
fn separated_on_axis(axis: &Vector3, a: &[Point3; 8], b: &[Point3; 8]) -> bool {
    let (min_a, max_a) = project_corners(a, axis);
    let (min_b, max_b) = project_corners(b, axis);
    max_a < min_b - TOLERANCE || max_b < min_a - TOLERANCE
}

/// Projects corners onto an axis and returns (min, max).
fn project_corners(corners: &[Point3; 8], axis: &Vector3) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for c in corners {
        let proj = c.coords.dot(axis);
        min = min.min(proj);
        max = max.max(proj);
    }
    (min, max)
}
