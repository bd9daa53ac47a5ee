use crate::error::Result;
use crate::geometry::{Aabb, Frame, Obb};
use crate::math::{Point3, Vector3, TOLERANCE};

/// Number of fixed sampling axes.
const AXIS_COUNT: usize = 7;

/// Number of extremal sample points: one minimum and one maximum per axis.
const SAMPLE_COUNT: usize = 2 * AXIS_COUNT;

/// Projection axes for extremal-point sampling: the canonical axes plus
/// the four cube body-diagonals. Deliberately not unit length; only
/// projection comparisons along each individual axis matter.
const SAMPLE_AXES: [Vector3; AXIS_COUNT] = [
    Vector3::new(1.0, 0.0, 0.0),
    Vector3::new(0.0, 1.0, 0.0),
    Vector3::new(0.0, 0.0, 1.0),
    Vector3::new(1.0, 1.0, 1.0),
    Vector3::new(1.0, 1.0, -1.0),
    Vector3::new(1.0, -1.0, 1.0),
    Vector3::new(-1.0, 1.0, 1.0),
];

/// Computes a near-optimal oriented bounding box of a point cloud.
///
/// Runs the di-tetrahedron heuristic: extremal points along a fixed set of
/// sampling axes seed two tetrahedra sharing a base triangle that
/// approximates the cloud's diameter; the tetrahedra faces supply candidate
/// box orientations, scored on the extremal sample alone. The best
/// candidate is then refit against the full point set, and the plain
/// axis-aligned box is returned instead whenever it scores no worse;
/// the heuristic does not dominate it for every input.
///
/// Degenerate clouds (single point, collinear, coplanar) produce valid
/// boxes with zero half-extent along the flat directions.
///
/// # Errors
///
/// Returns [`crate::error::OperationError::EmptyPointSet`] if `points` is
/// empty.
pub fn compute_obb(points: &[Point3]) -> Result<Obb> {
    let aligned = Obb::from_aabb(&Aabb::from_points(points)?);

    let sample = extremal_points(points);
    let tetra = build_di_tetrahedron(&sample);
    let Some((u_dir, v_dir)) = best_candidate_axes(&sample, &tetra) else {
        return Ok(aligned);
    };

    let refined = Obb::fit_from_axes(u_dir, v_dir, points)?;

    // Ties favor the axis-aligned box.
    if aligned.area() <= refined.area() {
        Ok(aligned)
    } else {
        Ok(refined)
    }
}

/// The five di-tetrahedron points: a base triangle plus up to two apex
/// points on opposite sides of its plane.
struct DiTetrahedron {
    base: [Point3; 3],
    apexes: Option<(Point3, Point3)>,
}

/// Projects the cloud onto the sampling axes and keeps, per axis, the
/// first point attaining the minimum and the first attaining the maximum
/// projection.
///
/// Strict comparisons keep the selection deterministic: a later point with
/// an equal projection never displaces the first one found.
fn extremal_points(points: &[Point3]) -> [Point3; SAMPLE_COUNT] {
    let mut min_proj = [f64::INFINITY; AXIS_COUNT];
    let mut max_proj = [f64::NEG_INFINITY; AXIS_COUNT];
    let mut sample = [points[0]; SAMPLE_COUNT];

    for p in points {
        for (i, axis) in SAMPLE_AXES.iter().enumerate() {
            let proj = p.coords.dot(axis);
            if proj < min_proj[i] {
                min_proj[i] = proj;
                sample[i] = *p;
            }
            if proj > max_proj[i] {
                max_proj[i] = proj;
                sample[AXIS_COUNT + i] = *p;
            }
        }
    }

    sample
}

fn build_di_tetrahedron(sample: &[Point3; SAMPLE_COUNT]) -> DiTetrahedron {
    let (p0, p1) = farthest_axis_pair(sample);
    let p2 = farthest_from_line(sample, &p0, &p1);
    let base = [p0, p1, p2];
    let apexes = apex_points(sample, &base);

    DiTetrahedron { base, apexes }
}

/// The (min, max) axis pair with the largest squared separation. This
/// bounds the cloud's diameter from below.
fn farthest_axis_pair(sample: &[Point3; SAMPLE_COUNT]) -> (Point3, Point3) {
    let mut best = f64::NEG_INFINITY;
    let mut pair = (sample[0], sample[AXIS_COUNT]);

    for i in 0..AXIS_COUNT {
        let dist_sq = (sample[AXIS_COUNT + i] - sample[i]).norm_squared();
        if dist_sq > best {
            best = dist_sq;
            pair = (sample[i], sample[AXIS_COUNT + i]);
        }
    }

    pair
}

/// The sample point with the largest squared perpendicular distance to the
/// line through `p0` and `p1`.
///
/// For a collinear sample this returns a point on the line (possibly `p0`
/// itself); the degenerate base triangle is handled by the caller.
fn farthest_from_line(sample: &[Point3; SAMPLE_COUNT], p0: &Point3, p1: &Point3) -> Point3 {
    let dir = p1 - p0;
    let dir_len_sq = dir.norm_squared();

    let mut best = f64::NEG_INFINITY;
    let mut farthest = *p0;
    for p in sample {
        let offset = p - p0;
        let dist_sq = if dir_len_sq < TOLERANCE {
            offset.norm_squared()
        } else {
            offset.cross(&dir).norm_squared() / dir_len_sq
        };
        if dist_sq > best {
            best = dist_sq;
            farthest = *p;
        }
    }

    farthest
}

/// Apex points with extremal projection onto the base-triangle normal, or
/// `None` when the base is degenerate (zero area within tolerance).
///
/// For well-formed input the two apexes lie on opposite sides of the base
/// plane, completing the two tetrahedra.
fn apex_points(sample: &[Point3; SAMPLE_COUNT], base: &[Point3; 3]) -> Option<(Point3, Point3)> {
    let normal = (base[1] - base[0]).cross(&(base[2] - base[0]));
    if normal.norm() < TOLERANCE {
        return None;
    }

    let mut min_proj = f64::INFINITY;
    let mut max_proj = f64::NEG_INFINITY;
    let mut q0 = base[0];
    let mut q1 = base[0];
    for p in sample {
        let proj = p.coords.dot(&normal);
        if proj < min_proj {
            min_proj = proj;
            q0 = *p;
        }
        if proj > max_proj {
            max_proj = proj;
            q1 = *p;
        }
    }

    Some((q0, q1))
}

/// Searches the candidate triangles for the orientation whose box around
/// the extremal sample has the smallest area score.
///
/// Returns the `(u_dir, v_dir)` pair of the winning frame, or `None` when
/// no candidate yields a usable frame (single-point cloud).
fn best_candidate_axes(
    sample: &[Point3; SAMPLE_COUNT],
    tetra: &DiTetrahedron,
) -> Option<(Vector3, Vector3)> {
    let [p0, p1, p2] = tetra.base;

    let Some((q0, q1)) = tetra.apexes else {
        // Degenerate base: the sample is (near-)collinear. Align the box
        // with the longest span instead of giving up.
        return collinear_axes(&p0, &p1);
    };

    // The shared base plus the three side faces of each tetrahedron.
    let triangles: [[Point3; 3]; 7] = [
        [p0, p1, p2],
        [p0, p1, q0],
        [p1, p2, q0],
        [p2, p0, q0],
        [p0, p1, q1],
        [p1, p2, q1],
        [p2, p0, q1],
    ];

    let mut best_score = f64::INFINITY;
    let mut best_axes = None;
    for tri in &triangles {
        score_triangle(sample, tri, &mut best_score, &mut best_axes);
    }

    best_axes
}

/// Scores the three orthonormal frames spanned by a candidate triangle's
/// edges and keeps the best frame seen so far.
///
/// Strict improvement only: the first frame attaining a given score wins.
fn score_triangle(
    sample: &[Point3; SAMPLE_COUNT],
    tri: &[Point3; 3],
    best_score: &mut f64,
    best_axes: &mut Option<(Vector3, Vector3)>,
) {
    let normal = (tri[1] - tri[0]).cross(&(tri[2] - tri[0]));
    let normal_len = normal.norm();
    if normal_len < TOLERANCE {
        // Zero-area triangle: no usable frame.
        return;
    }
    let w_dir = normal / normal_len;

    for r in 0..3 {
        let a = tri[r];
        let b = tri[(r + 1) % 3];
        // Edges of a non-degenerate triangle are non-zero.
        let u_dir = (b - a).normalize();
        let v_dir = w_dir.cross(&u_dir);

        let score = sample_area_score(sample, &u_dir, &v_dir, &w_dir);
        if score < *best_score {
            *best_score = score;
            *best_axes = Some((u_dir, v_dir));
        }
    }
}

/// Area score of the sample's spans along an orthonormal axis triple.
fn sample_area_score(
    sample: &[Point3; SAMPLE_COUNT],
    u_dir: &Vector3,
    v_dir: &Vector3,
    w_dir: &Vector3,
) -> f64 {
    let mut min = Vector3::repeat(f64::INFINITY);
    let mut max = Vector3::repeat(f64::NEG_INFINITY);

    for p in sample {
        let proj = Vector3::new(
            p.coords.dot(u_dir),
            p.coords.dot(v_dir),
            p.coords.dot(w_dir),
        );
        min.x = min.x.min(proj.x);
        min.y = min.y.min(proj.y);
        min.z = min.z.min(proj.z);
        max.x = max.x.max(proj.x);
        max.y = max.y.max(proj.y);
        max.z = max.z.max(proj.z);
    }

    let e = max - min;
    e.x * e.y + e.y * e.z + e.z * e.x
}

/// Axes for a (near-)collinear cloud: `u` along the dominant segment, the
/// companions chosen perpendicular via a reference vector.
fn collinear_axes(p0: &Point3, p1: &Point3) -> Option<(Vector3, Vector3)> {
    let dir = p1 - p0;
    if dir.norm() < TOLERANCE {
        // Single-point cloud; the axis-aligned box is already exact.
        return None;
    }

    let frame = Frame::from_axis(Point3::origin(), dir).ok()?;
    Some((*frame.u_dir(), *frame.v_dir()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use nalgebra::{Rotation3, Unit};

    const TOL: f64 = 1e-9;

    fn sorted_half_extents(obb: &Obb) -> [f64; 3] {
        let h = obb.half_extents();
        let mut sorted = [h.x, h.y, h.z];
        sorted.sort_by(f64::total_cmp);
        sorted
    }

    fn assert_contains_all(obb: &Obb, points: &[Point3]) {
        for p in points {
            assert!(obb.contains(p), "{p} outside computed box");
        }
    }

    /// Corner points of a box with the given half-dimensions, centered at
    /// the origin and axis-aligned.
    fn box_corners(hx: f64, hy: f64, hz: f64) -> Vec<Point3> {
        let mut corners = Vec::with_capacity(8);
        for dx in [-hx, hx] {
            for dy in [-hy, hy] {
                for dz in [-hz, hz] {
                    corners.push(Point3::new(dx, dy, dz));
                }
            }
        }
        corners
    }

    #[test]
    fn rejects_empty_input() {
        assert!(compute_obb(&[]).is_err());
    }

    #[test]
    fn single_point_is_a_zero_box() {
        let p = Point3::new(3.0, -1.0, 2.0);
        let obb = compute_obb(&[p]).unwrap();

        assert!((obb.center() - p).norm() < TOL);
        assert!(obb.half_extents().norm() < TOL);
        assert!(obb.is_degenerate());
    }

    #[test]
    fn two_points_align_with_the_segment() {
        let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 3.0, 6.0)];
        let obb = compute_obb(&points).unwrap();

        let h = sorted_half_extents(&obb);
        assert!(h[0] < TOL, "h={h:?}");
        assert!(h[1] < TOL, "h={h:?}");
        assert!((h[2] - 3.5).abs() < TOL, "h={h:?}");

        assert!((obb.center() - Point3::new(1.0, 1.5, 3.0)).norm() < TOL);

        // The box's long axis follows the segment direction.
        let dir = Vector3::new(2.0, 3.0, 6.0) / 7.0;
        assert!(obb.frame().u_dir().dot(&dir).abs() > 1.0 - TOL);
        assert_contains_all(&obb, &points);
    }

    #[test]
    fn axis_aligned_cube_falls_back_to_aabb() {
        let points: Vec<Point3> = box_corners(5.0, 5.0, 5.0)
            .iter()
            .map(|p| p + Vector3::new(5.0, 5.0, 5.0))
            .collect();
        let obb = compute_obb(&points).unwrap();

        assert!((obb.center() - Point3::new(5.0, 5.0, 5.0)).norm() < TOL);
        assert!((obb.half_extents() - Vector3::new(5.0, 5.0, 5.0)).norm() < TOL);

        // Score matches the axis-aligned box exactly.
        let aligned = Obb::from_aabb(&Aabb::from_points(&points).unwrap());
        assert!((obb.area() - aligned.area()).abs() < TOL);
        assert_contains_all(&obb, &points);
    }

    #[test]
    fn coplanar_rectangle_is_flat_along_one_axis() {
        // A 4x2 rectangle in the XY plane, rotated 30 degrees in-plane.
        let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), 30_f64.to_radians());
        let points: Vec<Point3> = [(-2.0, -1.0), (2.0, -1.0), (2.0, 1.0), (-2.0, 1.0)]
            .iter()
            .map(|&(x, y)| rot * Point3::new(x, y, 0.0))
            .collect();
        let obb = compute_obb(&points).unwrap();

        let h = sorted_half_extents(&obb);
        assert!(h[0] < TOL, "h={h:?}");
        assert!((h[1] - 1.0).abs() < TOL, "h={h:?}");
        assert!((h[2] - 2.0).abs() < TOL, "h={h:?}");

        let flat_axes = [obb.half_extents().x, obb.half_extents().y, obb.half_extents().z]
            .iter()
            .filter(|&&e| e < TOL)
            .count();
        assert_eq!(flat_axes, 1);
        assert_contains_all(&obb, &points);
    }

    #[test]
    fn rotated_thin_box_recovers_dimensions() {
        // Points on the surface of a 100x10x1 box rotated 37 degrees
        // about Z: corners, edge midpoints, and face centers.
        let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), 37_f64.to_radians());
        let mut points = Vec::new();
        for dx in [-50.0, 0.0, 50.0] {
            for dy in [-5.0, 0.0, 5.0] {
                for dz in [-0.5, 0.0, 0.5] {
                    if dx == 0.0 && dy == 0.0 && dz == 0.0 {
                        continue;
                    }
                    points.push(rot * Point3::new(dx, dy, dz));
                }
            }
        }
        let obb = compute_obb(&points).unwrap();

        let h = sorted_half_extents(&obb);
        assert!((h[0] - 0.5).abs() < 1e-6, "h={h:?}");
        assert!((h[1] - 5.0).abs() < 1e-6, "h={h:?}");
        assert!((h[2] - 50.0).abs() < 1e-6, "h={h:?}");

        // The recovered long axis matches the rotated X direction.
        let long_dir = rot * Vector3::x();
        let axes = [
            *obb.frame().u_dir(),
            *obb.frame().v_dir(),
            *obb.frame().w_dir(),
        ];
        let best_dot = axes
            .iter()
            .map(|a| a.dot(&long_dir).abs())
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(best_dot > 1.0 - 1e-9, "best_dot={best_dot}");

        // Far tighter than the axis-aligned fallback.
        let aligned = Obb::from_aabb(&Aabb::from_points(&points).unwrap());
        assert!(obb.area() < aligned.area() / 5.0);
        assert_contains_all(&obb, &points);
    }

    #[test]
    fn never_scores_worse_than_the_aabb() {
        let scattered = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 5.0, 2.0),
            Point3::new(-3.0, 2.0, 8.0),
            Point3::new(4.0, 4.0, 4.0),
            Point3::new(2.0, -1.0, 3.0),
            Point3::new(5.0, 2.0, -2.0),
            Point3::new(-2.0, -3.0, 1.0),
            Point3::new(0.0, 6.0, 5.0),
        ];
        let collinear = [
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 2.5, 0.5),
            Point3::new(3.0, 4.0, 1.0),
        ];
        let pair = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];

        for points in [&scattered[..], &collinear[..], &pair[..]] {
            let obb = compute_obb(points).unwrap();
            let aligned = Obb::from_aabb(&Aabb::from_points(points).unwrap());
            assert!(
                obb.area() <= aligned.area() + TOL,
                "dito {} vs aabb {}",
                obb.area(),
                aligned.area()
            );
            assert_contains_all(&obb, points);
        }
    }

    #[test]
    fn rigid_motion_preserves_box_dimensions() {
        let points = box_corners(50.0, 5.0, 0.5);
        let obb = compute_obb(&points).unwrap();

        let rot = Rotation3::from_axis_angle(
            &Unit::new_normalize(Vector3::new(1.0, 2.0, 3.0)),
            25_f64.to_radians(),
        );
        let shift = Vector3::new(3.0, -2.0, 5.0);
        let moved: Vec<Point3> = points.iter().map(|p| rot * p + shift).collect();
        let moved_obb = compute_obb(&moved).unwrap();

        let h = sorted_half_extents(&obb);
        let moved_h = sorted_half_extents(&moved_obb);
        for i in 0..3 {
            assert!(
                (h[i] - moved_h[i]).abs() < 1e-9,
                "h={h:?} moved={moved_h:?}"
            );
        }
        assert!((obb.volume() - moved_obb.volume()).abs() < 1e-9);
        assert!((moved_obb.center() - Point3::from(shift)).norm() < 1e-9);
        assert_contains_all(&moved_obb, &moved);
    }
}
