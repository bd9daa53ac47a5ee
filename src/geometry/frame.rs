use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// An origin point with a right-handed orthonormal axis triple.
///
/// `w_dir` is `u_dir × v_dir`. The frame expresses positions and
/// orientations of oriented boxes: local coordinates of a world point are
/// its offsets from `origin` along the three axes.
#[derive(Debug, Clone)]
pub struct Frame {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    w_dir: Vector3,
}

impl Frame {
    /// Creates a frame from an origin and two direction vectors.
    ///
    /// The directions are normalized and `v_dir` is re-derived as
    /// `w_dir × u_dir`, so the stored triple is exactly orthonormal even
    /// when the inputs carry floating-point drift.
    ///
    /// # Errors
    ///
    /// Returns an error if either direction is zero-length or the two are
    /// parallel (no usable plane).
    pub fn new(origin: Point3, u_dir: Vector3, v_dir: Vector3) -> Result<Self> {
        let u_len = u_dir.norm();
        if u_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let v_len = v_dir.norm();
        if v_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }

        let u_dir = u_dir / u_len;
        let v_dir = v_dir / v_len;

        let w_dir = u_dir.cross(&v_dir);
        let w_len = w_dir.norm();
        if w_len < TOLERANCE {
            return Err(GeometryError::Degenerate("frame axes are parallel".into()).into());
        }
        let w_dir = w_dir / w_len;

        // Re-derive v so u, v, w are mutually perpendicular.
        let v_dir = w_dir.cross(&u_dir);

        Ok(Self {
            origin,
            u_dir,
            v_dir,
            w_dir,
        })
    }

    /// Creates a frame from an origin and a single axis direction.
    ///
    /// The remaining two axes are chosen perpendicular to `u_dir` via a
    /// reference vector that is guaranteed not to be parallel to it.
    ///
    /// # Errors
    ///
    /// Returns an error if `u_dir` is zero-length.
    pub fn from_axis(origin: Point3, u_dir: Vector3) -> Result<Self> {
        let len = u_dir.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let u_dir = u_dir / len;

        // Choose a reference vector not parallel to the axis
        let reference = if u_dir.x.abs() < 0.9 {
            Vector3::new(1.0, 0.0, 0.0)
        } else {
            Vector3::new(0.0, 1.0, 0.0)
        };

        let v_dir = u_dir.cross(&reference).normalize();
        let w_dir = u_dir.cross(&v_dir);

        Ok(Self {
            origin,
            u_dir,
            v_dir,
            w_dir,
        })
    }

    /// The canonical world-aligned frame at `origin`.
    #[must_use]
    pub fn world(origin: Point3) -> Self {
        Self {
            origin,
            u_dir: Vector3::x(),
            v_dir: Vector3::y(),
            w_dir: Vector3::z(),
        }
    }

    /// Returns the origin point of the frame.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the U axis direction.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the V axis direction.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Returns the W axis direction (`u_dir × v_dir`).
    #[must_use]
    pub fn w_dir(&self) -> &Vector3 {
        &self.w_dir
    }

    /// Coordinates of a world point expressed in this frame.
    #[must_use]
    pub fn to_local(&self, point: &Point3) -> Vector3 {
        let d = point - self.origin;
        Vector3::new(
            d.dot(&self.u_dir),
            d.dot(&self.v_dir),
            d.dot(&self.w_dir),
        )
    }

    /// World position of frame-local coordinates.
    #[must_use]
    pub fn to_world(&self, local: &Vector3) -> Point3 {
        self.origin + self.u_dir * local.x + self.v_dir * local.y + self.w_dir * local.z
    }
}
