use crate::{BoneWeight, CubicPoint, CubicWeights, Mat2D, PathPoint, PointType, StraightPoint};

fn assert_approx(actual: f32, expected: f32) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= 1.0e-5,
        "expected {expected}, got {actual} (diff {diff})"
    );
}

fn weight(bone: usize, weight: f32) -> BoneWeight {
    BoneWeight { bone, weight }
}

fn weighted_straight(x: f32, y: f32, weights: Vec<BoneWeight>) -> PathPoint {
    PathPoint::Straight(StraightPoint {
        translation: [x, y],
        radius: 1.5,
        weights: Some(weights),
    })
}

#[test]
fn point_without_weights_has_no_skinned_result() {
    let bones = [Mat2D::IDENTITY, Mat2D::from_translation(5.0, 0.0)];
    assert_eq!(
        PathPoint::straight(1.0, 1.0, 0.0).skin(&Mat2D::IDENTITY, &bones),
        None
    );
    assert_eq!(
        PathPoint::cubic([0.0, 0.0], [1.0, 1.0], [2.0, 2.0]).skin(&Mat2D::IDENTITY, &bones),
        None
    );
}

#[test]
fn single_bone_moves_point_and_keeps_radius() {
    let bones = [Mat2D::IDENTITY, Mat2D::from_translation(5.0, 0.0)];
    let point = weighted_straight(1.0, 2.0, vec![weight(1, 1.0)]);
    let skinned = point.skin(&Mat2D::IDENTITY, &bones).unwrap();
    assert_eq!(skinned.translation(), [6.0, 2.0]);
    assert_eq!(skinned.radius(), Some(1.5));
    // The source point is untouched.
    assert_eq!(point.translation(), [1.0, 2.0]);
}

#[test]
fn weights_blend_bone_matrices_linearly() {
    let bones = [
        Mat2D::IDENTITY,
        Mat2D::from_translation(10.0, 0.0),
        Mat2D::from_translation(0.0, 10.0),
    ];
    let point = weighted_straight(0.0, 0.0, vec![weight(1, 0.5), weight(2, 0.5)]);
    let skinned = point.skin(&Mat2D::IDENTITY, &bones).unwrap();
    assert_approx(skinned.translation()[0], 5.0);
    assert_approx(skinned.translation()[1], 5.0);
}

#[test]
fn world_transform_applies_before_bones() {
    let bones = [Mat2D::IDENTITY, Mat2D::from_scale(2.0, 2.0)];
    let world = Mat2D::from_translation(1.0, 0.0);
    let point = weighted_straight(1.0, 1.0, vec![weight(1, 1.0)]);
    let skinned = point.skin(&world, &bones).unwrap();
    assert_eq!(skinned.translation(), [4.0, 2.0]);
}

#[test]
fn zero_weights_and_unknown_bones_are_ignored() {
    let bones = [Mat2D::IDENTITY, Mat2D::from_translation(3.0, 0.0)];
    let point = weighted_straight(
        1.0,
        1.0,
        vec![weight(1, 1.0), weight(0, 0.0), weight(7, 0.5)],
    );
    let skinned = point.skin(&Mat2D::IDENTITY, &bones).unwrap();
    assert_eq!(skinned.translation(), [4.0, 1.0]);
}

#[test]
fn cubic_controls_use_their_own_weights() {
    let bones = [
        Mat2D::IDENTITY,
        Mat2D::from_translation(1.0, 0.0),
        Mat2D::from_translation(0.0, 1.0),
    ];
    let point = PathPoint::Cubic(CubicPoint {
        point_type: PointType::Mirrored,
        translation: [0.0, 0.0],
        in_point: [-1.0, 0.0],
        out_point: [1.0, 0.0],
        weights: Some(CubicWeights {
            translation: vec![weight(0, 1.0)],
            in_point: vec![weight(1, 1.0)],
            out_point: vec![weight(2, 1.0)],
        }),
    });
    let skinned = point.skin(&Mat2D::IDENTITY, &bones).unwrap();
    assert_eq!(skinned.point_type(), PointType::Mirrored);
    assert_eq!(skinned.translation(), [0.0, 0.0]);
    assert_eq!(skinned.in_point(), Some([0.0, 0.0]));
    assert_eq!(skinned.out_point(), Some([1.0, 1.0]));
}

#[test]
fn point_type_decoding() {
    assert_eq!(PointType::from_u8(0), Some(PointType::Straight));
    assert_eq!(PointType::from_u8(3), Some(PointType::Disconnected));
    assert_eq!(PointType::from_u8(4), None);
    assert!(!PointType::Straight.is_cubic());
    assert!(PointType::Asymmetric.is_cubic());
}
