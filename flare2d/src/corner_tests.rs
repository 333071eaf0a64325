use crate::{ARC_CONSTANT, PathPoint, expand_corners};
use proptest::prelude::*;

fn assert_approx(actual: f32, expected: f32) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= 1.0e-4,
        "expected {expected}, got {actual} (diff {diff})"
    );
}

fn assert_vec_approx(actual: [f32; 2], expected: [f32; 2]) {
    assert_approx(actual[0], expected[0]);
    assert_approx(actual[1], expected[1]);
}

fn square(radius: f32) -> Vec<PathPoint> {
    vec![
        PathPoint::straight(0.0, 0.0, radius),
        PathPoint::straight(10.0, 0.0, radius),
        PathPoint::straight(10.0, 10.0, radius),
        PathPoint::straight(0.0, 10.0, radius),
    ]
}

fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}

#[test]
fn sharp_closed_path_passes_through_unchanged() {
    let points = square(0.0);
    assert_eq!(expand_corners(&points, true), points);
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(expand_corners(&[], true).is_empty());
}

#[test]
fn rounded_closed_square_expands_every_corner() {
    let out = expand_corners(&square(2.0), true);
    assert_eq!(out.len(), 8);
    assert!(out.iter().all(|p| matches!(p, PathPoint::Cubic(_))));

    let inv = 1.0 - ARC_CONSTANT;

    // Corner (0,0): previous neighbor is (0,10), next is (10,0).
    let first = &out[0];
    assert_vec_approx(first.translation(), [0.0, 2.0]);
    assert_vec_approx(first.in_point().unwrap(), [0.0, 2.0]);
    assert_vec_approx(first.out_point().unwrap(), [0.0, inv * 2.0]);

    let second = &out[1];
    assert_vec_approx(second.translation(), [2.0, 0.0]);
    assert_vec_approx(second.in_point().unwrap(), [inv * 2.0, 0.0]);
    assert_vec_approx(second.out_point().unwrap(), [2.0, 0.0]);

    // Corner (10,0) measures toward the previous synthesized point's out control.
    assert_vec_approx(out[2].translation(), [8.0, 0.0]);
    assert_vec_approx(out[2].out_point().unwrap(), [10.0 - inv * 2.0, 0.0]);
    assert_vec_approx(out[3].translation(), [10.0, 2.0]);
}

#[test]
fn open_path_never_rounds_endpoints() {
    let points = vec![
        PathPoint::straight(0.0, 0.0, 5.0),
        PathPoint::straight(10.0, 0.0, 5.0),
        PathPoint::straight(10.0, 10.0, 5.0),
    ];
    let out = expand_corners(&points, false);
    assert_eq!(out.len(), 4);
    assert_eq!(out[0], points[0]);
    assert_eq!(out[3], points[2]);
    assert!(matches!(out[1], PathPoint::Cubic(_)));
    assert!(matches!(out[2], PathPoint::Cubic(_)));
}

#[test]
fn radius_is_clamped_to_adjacent_edge_lengths() {
    let points = vec![
        PathPoint::straight(0.0, 0.0, 0.0),
        PathPoint::straight(3.0, 0.0, 100.0),
        PathPoint::straight(3.0, 10.0, 0.0),
    ];
    let out = expand_corners(&points, false);
    assert_eq!(out.len(), 4);
    assert_vec_approx(out[1].translation(), [0.0, 0.0]);
    assert_vec_approx(out[2].translation(), [3.0, 3.0]);
}

#[test]
fn next_cubic_neighbor_is_measured_to_its_in_control() {
    let points = vec![
        PathPoint::straight(0.0, 0.0, 0.0),
        PathPoint::straight(10.0, 0.0, 2.0),
        PathPoint::cubic([10.0, 10.0], [10.0, 4.0], [10.0, 12.0]),
    ];
    let out = expand_corners(&points, false);
    assert_eq!(out.len(), 4);
    assert_vec_approx(out[2].translation(), [10.0, 2.0]);
    assert_vec_approx(out[2].in_point().unwrap(), [10.0, (1.0 - ARC_CONSTANT) * 2.0]);
    assert_eq!(out[3], points[2]);
}

#[test]
fn cubic_points_never_round() {
    let points = vec![
        PathPoint::cubic([0.0, 0.0], [-1.0, 0.0], [1.0, 0.0]),
        PathPoint::cubic([10.0, 0.0], [9.0, 0.0], [11.0, 0.0]),
        PathPoint::cubic([5.0, 5.0], [6.0, 5.0], [4.0, 5.0]),
    ];
    assert_eq!(expand_corners(&points, true), points);
}

#[test]
fn zero_length_edge_skips_rounding() {
    let points = vec![
        PathPoint::straight(0.0, 0.0, 0.0),
        PathPoint::straight(0.0, 0.0, 5.0),
        PathPoint::straight(10.0, 0.0, 0.0),
    ];
    let out = expand_corners(&points, false);
    assert_eq!(out, points);

    let all_same = vec![
        PathPoint::straight(1.0, 1.0, 5.0),
        PathPoint::straight(1.0, 1.0, 5.0),
        PathPoint::straight(1.0, 1.0, 5.0),
    ];
    let out = expand_corners(&all_same, true);
    assert_eq!(out, all_same);
    assert!(
        out.iter()
            .all(|p| p.translation().iter().all(|v| v.is_finite()))
    );
}

#[test]
fn one_or_two_point_paths_skip_rounding() {
    let one = vec![PathPoint::straight(4.0, 4.0, 3.0)];
    assert_eq!(expand_corners(&one, true), one);

    let two = vec![
        PathPoint::straight(0.0, 0.0, 3.0),
        PathPoint::straight(10.0, 0.0, 3.0),
    ];
    assert_eq!(expand_corners(&two, true), two);
    assert_eq!(expand_corners(&two, false), two);
}

fn corner_points(
    prev: [f32; 2],
    corner: [f32; 2],
    next: [f32; 2],
    radius: f32,
) -> Vec<PathPoint> {
    vec![
        PathPoint::straight(prev[0], prev[1], 0.0),
        PathPoint::straight(corner[0], corner[1], radius),
        PathPoint::straight(next[0], next[1], 0.0),
    ]
}

fn coord() -> impl Strategy<Value = [f32; 2]> {
    [-50.0f32..50.0, -50.0f32..50.0]
}

proptest! {
    #[test]
    fn render_radius_never_exceeds_edges_or_authored_radius(
        prev in coord(),
        corner in coord(),
        next in coord(),
        radius in 0.01f32..80.0,
    ) {
        let points = corner_points(prev, corner, next, radius);
        let out = expand_corners(&points, false);
        if distance(prev, corner) == 0.0 || distance(next, corner) == 0.0 {
            prop_assert_eq!(out, points);
            return Ok(());
        }
        prop_assert_eq!(out.len(), 4);

        let bound = distance(prev, corner)
            .min(distance(next, corner))
            .min(radius);
        let tolerance = 1.0e-3 * (1.0 + bound);
        for synthesized in &out[1..3] {
            let d = distance(synthesized.translation(), corner);
            prop_assert!(
                (d - bound).abs() <= tolerance,
                "synthesized point at {} but render radius is {}",
                d,
                bound
            );
        }
    }

    #[test]
    fn zero_radius_paths_are_left_alone(
        points in prop::collection::vec(coord(), 0..12),
        closed in any::<bool>(),
    ) {
        let points: Vec<PathPoint> = points
            .into_iter()
            .map(|[x, y]| PathPoint::straight(x, y, 0.0))
            .collect();
        prop_assert_eq!(expand_corners(&points, closed), points);
    }
}
