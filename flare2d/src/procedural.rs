//! Parametric path sources sized by a width and height, centered on the path origin.

use crate::PathPoint;
use crate::corner::ARC_CONSTANT;
use std::f32::consts::{FRAC_PI_2, PI};

/// Largest point count a procedural source generates. Sources asking for more produce no points.
pub const MAX_PROCEDURAL_POINTS: u32 = 4096;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Procedural {
    Rectangle {
        width: f32,
        height: f32,
        /// Radius applied to all four corners.
        radius: f32,
    },
    Ellipse {
        width: f32,
        height: f32,
    },
    Triangle {
        width: f32,
        height: f32,
    },
    Polygon {
        width: f32,
        height: f32,
        sides: u32,
    },
    Star {
        width: f32,
        height: f32,
        points: u32,
        /// Inner radius as a fraction of the outer radius.
        inner_radius: f32,
    },
}

impl Procedural {
    pub fn width(&self) -> f32 {
        match *self {
            Self::Rectangle { width, .. }
            | Self::Ellipse { width, .. }
            | Self::Triangle { width, .. }
            | Self::Polygon { width, .. }
            | Self::Star { width, .. } => width,
        }
    }

    pub fn height(&self) -> f32 {
        match *self {
            Self::Rectangle { height, .. }
            | Self::Ellipse { height, .. }
            | Self::Triangle { height, .. }
            | Self::Polygon { height, .. }
            | Self::Star { height, .. } => height,
        }
    }

    /// Returns `true` when the value changed.
    pub fn set_width(&mut self, value: f32) -> bool {
        match self {
            Self::Rectangle { width, .. }
            | Self::Ellipse { width, .. }
            | Self::Triangle { width, .. }
            | Self::Polygon { width, .. }
            | Self::Star { width, .. } => replace_if_changed(width, value),
        }
    }

    /// Returns `true` when the value changed.
    pub fn set_height(&mut self, value: f32) -> bool {
        match self {
            Self::Rectangle { height, .. }
            | Self::Ellipse { height, .. }
            | Self::Triangle { height, .. }
            | Self::Polygon { height, .. }
            | Self::Star { height, .. } => replace_if_changed(height, value),
        }
    }

    /// Number of points [`Procedural::points`] generates, or `None` past
    /// [`MAX_PROCEDURAL_POINTS`].
    pub fn point_count(&self) -> Option<u32> {
        let count = match *self {
            Self::Rectangle { .. } | Self::Ellipse { .. } => 4,
            Self::Triangle { .. } => 3,
            Self::Polygon { sides, .. } => sides,
            Self::Star { points, .. } => points.checked_mul(2)?,
        };
        (count <= MAX_PROCEDURAL_POINTS).then_some(count)
    }

    pub fn points(&self) -> Vec<PathPoint> {
        let Some(count) = self.point_count() else {
            log::warn!("procedural path exceeds {MAX_PROCEDURAL_POINTS} points; generating none");
            return Vec::new();
        };
        match *self {
            Self::Rectangle {
                width,
                height,
                radius,
            } => {
                let hw = width / 2.0;
                let hh = height / 2.0;
                vec![
                    PathPoint::straight(-hw, -hh, radius),
                    PathPoint::straight(hw, -hh, radius),
                    PathPoint::straight(hw, hh, radius),
                    PathPoint::straight(-hw, hh, radius),
                ]
            }
            Self::Ellipse { width, height } => {
                let rx = (width / 2.0).max(0.0);
                let ry = (height / 2.0).max(0.0);
                let cx = rx * ARC_CONSTANT;
                let cy = ry * ARC_CONSTANT;
                vec![
                    PathPoint::cubic([0.0, -ry], [-cx, -ry], [cx, -ry]),
                    PathPoint::cubic([rx, 0.0], [rx, -cy], [rx, cy]),
                    PathPoint::cubic([0.0, ry], [cx, ry], [-cx, ry]),
                    PathPoint::cubic([-rx, 0.0], [-rx, cy], [-rx, -cy]),
                ]
            }
            Self::Triangle { width, height } => {
                let hw = width / 2.0;
                let hh = height / 2.0;
                vec![
                    PathPoint::straight(0.0, -hh, 0.0),
                    PathPoint::straight(hw, hh, 0.0),
                    PathPoint::straight(-hw, hh, 0.0),
                ]
            }
            Self::Polygon {
                width,
                height,
                sides,
            } => {
                let rx = width / 2.0;
                let ry = height / 2.0;
                let step = 2.0 * PI / sides.max(1) as f32;
                (0..count)
                    .map(|i| {
                        let angle = -FRAC_PI_2 + step * i as f32;
                        PathPoint::straight(angle.cos() * rx, angle.sin() * ry, 0.0)
                    })
                    .collect()
            }
            Self::Star {
                width,
                height,
                points,
                inner_radius,
            } => {
                let rx = width / 2.0;
                let ry = height / 2.0;
                let ix = rx * inner_radius;
                let iy = ry * inner_radius;
                let step = PI / points.max(1) as f32;
                (0..count)
                    .map(|i| {
                        let angle = -FRAC_PI_2 + step * i as f32;
                        let (sx, sy) = if i % 2 == 0 { (rx, ry) } else { (ix, iy) };
                        PathPoint::straight(angle.cos() * sx, angle.sin() * sy, 0.0)
                    })
                    .collect()
            }
        }
    }
}

fn replace_if_changed(slot: &mut f32, value: f32) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
