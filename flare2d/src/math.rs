/// 2x3 affine matrix.
///
/// Maps a point as `x' = a * x + b * y + tx`, `y' = c * x + d * y + ty`, the same layout the
/// bone world transforms use.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mat2D {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Mat2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat2D {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    const ZERO: Self = Self {
        a: 0.0,
        b: 0.0,
        c: 0.0,
        d: 0.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn new(a: f32, b: f32, c: f32, d: f32, tx: f32, ty: f32) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    pub fn from_translation(x: f32, y: f32) -> Self {
        Self {
            tx: x,
            ty: y,
            ..Self::IDENTITY
        }
    }

    pub fn from_scale(sx: f32, sy: f32) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    /// Counter-clockwise rotation, in radians.
    pub fn from_rotation(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            a: cos,
            b: -sin,
            c: sin,
            d: cos,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Builds `translation * rotation * scale`, the usual node local transform.
    pub fn from_components(x: f32, y: f32, rotation: f32, scale_x: f32, scale_y: f32) -> Self {
        Self::from_translation(x, y)
            .multiply(&Self::from_rotation(rotation))
            .multiply(&Self::from_scale(scale_x, scale_y))
    }

    /// `self * other`: the result applies `other` first, then `self`.
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            tx: self.a * other.tx + self.b * other.ty + self.tx,
            ty: self.c * other.tx + self.d * other.ty + self.ty,
        }
    }

    pub fn determinant(&self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    /// Returns `None` for singular matrices.
    pub fn invert(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            tx: (self.b * self.ty - self.d * self.tx) * inv,
            ty: (self.c * self.tx - self.a * self.ty) * inv,
        })
    }

    pub fn transform_point(&self, p: [f32; 2]) -> [f32; 2] {
        [
            self.a * p[0] + self.b * p[1] + self.tx,
            self.c * p[0] + self.d * p[1] + self.ty,
        ]
    }

    /// Linear blend of matrices: `sum(weight * matrix)`.
    ///
    /// Entries with a non-positive weight or an out-of-range bone index are skipped.
    pub(crate) fn blend<'a>(
        palette: &[Self],
        weights: impl IntoIterator<Item = &'a crate::BoneWeight>,
    ) -> Self {
        let mut out = Self::ZERO;
        for w in weights {
            if w.weight <= 0.0 {
                continue;
            }
            let Some(m) = palette.get(w.bone) else {
                continue;
            };
            out.a += m.a * w.weight;
            out.b += m.b * w.weight;
            out.c += m.c * w.weight;
            out.d += m.d * w.weight;
            out.tx += m.tx * w.weight;
            out.ty += m.ty * w.weight;
        }
        out
    }
}

pub(crate) fn sub(a: [f32; 2], b: [f32; 2]) -> [f32; 2] {
    [a[0] - b[0], a[1] - b[1]]
}

pub(crate) fn length(v: [f32; 2]) -> f32 {
    (v[0] * v[0] + v[1] * v[1]).sqrt()
}

pub(crate) fn scale_and_add(origin: [f32; 2], dir: [f32; 2], scale: f32) -> [f32; 2] {
    [origin[0] + dir[0] * scale, origin[1] + dir[1] * scale]
}

#[cfg(feature = "glam")]
mod glam_interop {
    use super::Mat2D;

    impl From<glam::Affine2> for Mat2D {
        fn from(m: glam::Affine2) -> Self {
            // glam stores columns: x_axis = (a, c), y_axis = (b, d).
            Self {
                a: m.matrix2.x_axis.x,
                b: m.matrix2.y_axis.x,
                c: m.matrix2.x_axis.y,
                d: m.matrix2.y_axis.y,
                tx: m.translation.x,
                ty: m.translation.y,
            }
        }
    }

    impl From<Mat2D> for glam::Affine2 {
        fn from(m: Mat2D) -> Self {
            glam::Affine2::from_cols_array(&[m.a, m.c, m.b, m.d, m.tx, m.ty])
        }
    }

    impl Mat2D {
        pub fn transform_vec2(&self, v: glam::Vec2) -> glam::Vec2 {
            glam::Vec2::from(self.transform_point(v.into()))
        }
    }
}
