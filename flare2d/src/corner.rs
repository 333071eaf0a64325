use crate::math::{length, scale_and_add, sub};
use crate::{CubicPoint, PathPoint};

/// Bezier circular-arc approximation factor used for rounded corners.
///
/// The exact quarter-circle value is `0.55228475`; authored content is tuned against `0.55`.
pub const ARC_CONSTANT: f32 = 0.55;

const INV_ARC_CONSTANT: f32 = 1.0 - ARC_CONSTANT;

/// Replaces every rounded straight corner with a pair of cubic points.
///
/// Open contours never round their endpoints. Contours with fewer than three points and corners
/// with a zero-length adjacent edge pass through unchanged.
pub fn expand_corners(points: &[PathPoint], closed: bool) -> Vec<PathPoint> {
    let count = points.len();
    let mut out: Vec<PathPoint> = Vec::with_capacity(count);
    if count == 0 {
        return out;
    }

    // Previous point of the output being built; seeded with the wrap-around neighbor.
    let mut previous: Option<PathPoint> = if closed { points.last().cloned() } else { None };

    for (i, point) in points.iter().enumerate() {
        let PathPoint::Straight(straight) = point else {
            out.push(point.clone());
            previous = Some(point.clone());
            continue;
        };

        let is_open_endpoint = !closed && (i == 0 || i == count - 1);
        if straight.radius <= 0.0 || is_open_endpoint || count < 3 {
            out.push(point.clone());
            previous = Some(point.clone());
            continue;
        }

        let Some(prev) = previous.as_ref() else {
            out.push(point.clone());
            previous = Some(point.clone());
            continue;
        };
        let next = &points[(i + 1) % count];

        let prev_pos = match prev {
            PathPoint::Cubic(c) => c.out_point,
            PathPoint::Straight(s) => s.translation,
        };
        let next_pos = match next {
            PathPoint::Cubic(c) => c.in_point,
            PathPoint::Straight(s) => s.translation,
        };
        let pos = straight.translation;

        let to_prev = sub(prev_pos, pos);
        let to_prev_length = length(to_prev);
        let to_next = sub(next_pos, pos);
        let to_next_length = length(to_next);
        if to_prev_length <= 0.0 || to_next_length <= 0.0 {
            log::trace!("skipping corner rounding at point {i}: zero-length edge");
            out.push(point.clone());
            previous = Some(point.clone());
            continue;
        }
        let to_prev = [to_prev[0] / to_prev_length, to_prev[1] / to_prev_length];
        let to_next = [to_next[0] / to_next_length, to_next[1] / to_next_length];

        let render_radius = to_prev_length.min(to_next_length.min(straight.radius));

        let translation = scale_and_add(pos, to_prev, render_radius);
        out.push(PathPoint::Cubic(CubicPoint::new(
            translation,
            translation,
            scale_and_add(pos, to_prev, INV_ARC_CONSTANT * render_radius),
        )));

        let translation = scale_and_add(pos, to_next, render_radius);
        let second = PathPoint::Cubic(CubicPoint::new(
            translation,
            scale_and_add(pos, to_next, INV_ARC_CONSTANT * render_radius),
            translation,
        ));
        out.push(second.clone());
        previous = Some(second);
    }

    out
}
