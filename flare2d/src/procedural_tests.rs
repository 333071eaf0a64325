use crate::{
    ARC_CONSTANT, Aabb, MAX_PROCEDURAL_POINTS, Mat2D, Path, PathPoint, Procedural, Skin,
    SkinnedBone, path_obb,
};

fn assert_approx(actual: f32, expected: f32) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= 1.0e-4,
        "expected {expected}, got {actual} (diff {diff})"
    );
}

#[test]
fn rectangle_is_centered_and_closed() {
    let path = Path::procedural(Procedural::Rectangle {
        width: 20.0,
        height: 10.0,
        radius: 0.0,
    });
    assert!(path.is_closed());
    assert_eq!(
        path.points().into_owned(),
        vec![
            PathPoint::straight(-10.0, -5.0, 0.0),
            PathPoint::straight(10.0, -5.0, 0.0),
            PathPoint::straight(10.0, 5.0, 0.0),
            PathPoint::straight(-10.0, 5.0, 0.0),
        ]
    );
}

#[test]
fn rounded_rectangle_expands_to_eight_cubics() {
    let path = Path::procedural(Procedural::Rectangle {
        width: 20.0,
        height: 10.0,
        radius: 2.0,
    });
    let points = path.render_points(&Mat2D::IDENTITY, None);
    assert_eq!(points.len(), 8);
    assert!(points.iter().all(|p| matches!(p, PathPoint::Cubic(_))));
    assert_eq!(path_obb(&points), Aabb::new(-10.0, -5.0, 10.0, 5.0));
}

#[test]
fn ellipse_handles_stay_inside_its_box() {
    let path = Path::procedural(Procedural::Ellipse {
        width: 8.0,
        height: 4.0,
    });
    let points = path.points();
    assert_eq!(points.len(), 4);
    assert_eq!(points[0].translation(), [0.0, -2.0]);
    assert_eq!(points[0].out_point(), Some([4.0 * ARC_CONSTANT, -2.0]));
    assert_eq!(path_obb(&points), Aabb::new(-4.0, -2.0, 4.0, 2.0));
}

#[test]
fn triangle_points_up() {
    let points = Procedural::Triangle {
        width: 6.0,
        height: 4.0,
    }
    .points();
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].translation(), [0.0, -2.0]);
    assert_eq!(points[1].translation(), [3.0, 2.0]);
    assert_eq!(points[2].translation(), [-3.0, 2.0]);
}

#[test]
fn polygon_starts_at_top() {
    let points = Procedural::Polygon {
        width: 10.0,
        height: 10.0,
        sides: 6,
    }
    .points();
    assert_eq!(points.len(), 6);
    assert_approx(points[0].translation()[0], 0.0);
    assert_approx(points[0].translation()[1], -5.0);
    for p in &points {
        let [x, y] = p.translation();
        assert_approx((x * x + y * y).sqrt(), 5.0);
    }
}

#[test]
fn star_alternates_outer_and_inner_radius() {
    let points = Procedural::Star {
        width: 10.0,
        height: 10.0,
        points: 5,
        inner_radius: 0.4,
    }
    .points();
    assert_eq!(points.len(), 10);
    for (i, p) in points.iter().enumerate() {
        let [x, y] = p.translation();
        let expected = if i % 2 == 0 { 5.0 } else { 2.0 };
        assert_approx((x * x + y * y).sqrt(), expected);
    }
}

#[test]
fn resizing_reports_changes() {
    let mut p = Procedural::Ellipse {
        width: 1.0,
        height: 1.0,
    };
    assert!(p.set_width(2.0));
    assert!(!p.set_width(2.0));
    assert!(p.set_height(3.0));
    assert_eq!(p.width(), 2.0);
    assert_eq!(p.height(), 3.0);
}

#[test]
fn procedural_paths_are_never_skinned() {
    let path = Path::procedural(Procedural::Triangle {
        width: 2.0,
        height: 2.0,
    })
    .with_skin(Skin::new(vec![SkinnedBone {
        node: crate::Scene::new().root(),
        inverse_bind: Mat2D::IDENTITY,
    }]));
    assert!(!path.is_connected_to_bones());
    let bones = [Mat2D::IDENTITY, Mat2D::from_translation(9.0, 9.0)];
    assert_eq!(
        path.deformed_points(&Mat2D::IDENTITY, Some(&bones)),
        path.points().into_owned()
    );
}

#[test]
fn oversized_sources_generate_no_points() {
    let star = Procedural::Star {
        width: 10.0,
        height: 10.0,
        points: u32::MAX / 2 + 1,
        inner_radius: 0.5,
    };
    assert_eq!(star.point_count(), None);
    assert!(star.points().is_empty());

    let polygon = Procedural::Polygon {
        width: 10.0,
        height: 10.0,
        sides: u32::MAX,
    };
    assert_eq!(polygon.point_count(), None);
    assert!(polygon.points().is_empty());

    let largest = Procedural::Polygon {
        width: 10.0,
        height: 10.0,
        sides: MAX_PROCEDURAL_POINTS,
    };
    assert_eq!(largest.points().len(), MAX_PROCEDURAL_POINTS as usize);
    let path = Path::procedural(star);
    assert!(path_obb(&path.points()).is_empty());
}
