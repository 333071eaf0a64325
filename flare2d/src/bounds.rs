use crate::{Mat2D, PathPoint};

/// Bounding box as `(min_x, min_y, max_x, max_y)`.
///
/// [`Aabb::EMPTY`] uses inverted infinities (`min > max`) so that folding any point or box into
/// it yields that point or box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    pub const EMPTY: Self = Self {
        min_x: f32::INFINITY,
        min_y: f32::INFINITY,
        max_x: f32::NEG_INFINITY,
        max_y: f32::NEG_INFINITY,
    };

    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn include_point(&mut self, p: [f32; 2]) {
        self.min_x = self.min_x.min(p[0]);
        self.min_y = self.min_y.min(p[1]);
        self.max_x = self.max_x.max(p[0]);
        self.max_y = self.max_y.max(p[1]);
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the box by `amount` on every side.
    pub fn padded(&self, amount: f32) -> Self {
        Self {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }

    /// Corners in `(min,min) (max,min) (max,max) (min,max)` order.
    pub fn corners(&self) -> [[f32; 2]; 4] {
        [
            [self.min_x, self.min_y],
            [self.max_x, self.min_y],
            [self.max_x, self.max_y],
            [self.min_x, self.max_y],
        ]
    }

    /// Transforms the four corners and returns their axis-aligned extrema.
    pub fn transformed(&self, m: &Mat2D) -> Self {
        let mut out = Self::EMPTY;
        for corner in self.corners() {
            out.include_point(m.transform_point(corner));
        }
        out
    }
}

/// Object-space bounds of a point list.
///
/// Cubic handles are included as-is, which bounds the curve conservatively rather than tightly.
pub fn path_obb(points: &[PathPoint]) -> Aabb {
    let mut out = Aabb::EMPTY;
    for point in points {
        out.include_point(point.translation());
        if let PathPoint::Cubic(cubic) = point {
            out.include_point(cubic.in_point);
            out.include_point(cubic.out_point);
        }
    }
    out
}
