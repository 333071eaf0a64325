//! Flat vertex-deform buffers.
//!
//! A buffer mirrors every editable point field in point order: `x, y, radius` for straight
//! points and `x, y, in_x, in_y, out_x, out_y` for cubic points.

use crate::PathPoint;

const STRAIGHT_STRIDE: usize = 3;
const CUBIC_STRIDE: usize = 6;

fn stride(point: &PathPoint) -> usize {
    match point {
        PathPoint::Straight(_) => STRAIGHT_STRIDE,
        PathPoint::Cubic(_) => CUBIC_STRIDE,
    }
}

/// Number of floats a buffer for `points` holds.
pub fn vertex_deform_len(points: &[PathPoint]) -> usize {
    points.iter().map(stride).sum()
}

/// Captures the current point fields into a new buffer.
pub fn read_vertex_deform(points: &[PathPoint]) -> Vec<f32> {
    let mut out = Vec::with_capacity(vertex_deform_len(points));
    for point in points {
        match point {
            PathPoint::Straight(s) => {
                out.extend_from_slice(&[s.translation[0], s.translation[1], s.radius]);
            }
            PathPoint::Cubic(c) => {
                out.extend_from_slice(&[
                    c.translation[0],
                    c.translation[1],
                    c.in_point[0],
                    c.in_point[1],
                    c.out_point[0],
                    c.out_point[1],
                ]);
            }
        }
    }
    out
}

/// Writes `values` back onto `points`.
///
/// # Panics
///
/// Panics if `values` does not match the layout of `points`; a partial write would shift
/// values into unrelated fields.
pub fn apply_vertex_deform(points: &mut [PathPoint], values: &[f32]) {
    let expected = vertex_deform_len(points);
    assert_eq!(
        values.len(),
        expected,
        "vertex deform buffer has {} values but the point layout needs {expected}",
        values.len()
    );

    let mut read = 0usize;
    for point in points.iter_mut() {
        match point {
            PathPoint::Straight(s) => {
                let v = &values[read..read + STRAIGHT_STRIDE];
                s.translation = [v[0], v[1]];
                s.radius = v[2];
                read += STRAIGHT_STRIDE;
            }
            PathPoint::Cubic(c) => {
                let v = &values[read..read + CUBIC_STRIDE];
                c.translation = [v[0], v[1]];
                c.in_point = [v[2], v[3]];
                c.out_point = [v[4], v[5]];
                read += CUBIC_STRIDE;
            }
        }
    }
}
