use crate::Mat2D;

/// Authored point type, as stored in asset data.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum PointType {
    #[default]
    Straight,
    Mirrored,
    Asymmetric,
    Disconnected,
}

impl PointType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Straight),
            1 => Some(Self::Mirrored),
            2 => Some(Self::Asymmetric),
            3 => Some(Self::Disconnected),
            _ => None,
        }
    }

    pub fn is_cubic(self) -> bool {
        !matches!(self, Self::Straight)
    }
}

/// Influence of one bone on one vector. `bone` indexes the skin's matrix palette.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoneWeight {
    pub bone: usize,
    pub weight: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StraightPoint {
    pub translation: [f32; 2],
    /// Corner radius; `0.0` keeps the corner sharp.
    pub radius: f32,
    pub weights: Option<Vec<BoneWeight>>,
}

/// Bone weights for the three vectors of a cubic point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CubicWeights {
    pub translation: Vec<BoneWeight>,
    pub in_point: Vec<BoneWeight>,
    pub out_point: Vec<BoneWeight>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CubicPoint {
    pub point_type: PointType,
    pub translation: [f32; 2],
    /// Incoming control point, in the same space as `translation`.
    pub in_point: [f32; 2],
    /// Outgoing control point, in the same space as `translation`.
    pub out_point: [f32; 2],
    pub weights: Option<CubicWeights>,
}

impl CubicPoint {
    pub fn new(translation: [f32; 2], in_point: [f32; 2], out_point: [f32; 2]) -> Self {
        Self {
            point_type: PointType::Asymmetric,
            translation,
            in_point,
            out_point,
            weights: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PathPoint {
    Straight(StraightPoint),
    Cubic(CubicPoint),
}

impl PathPoint {
    pub fn straight(x: f32, y: f32, radius: f32) -> Self {
        Self::Straight(StraightPoint {
            translation: [x, y],
            radius,
            weights: None,
        })
    }

    pub fn cubic(translation: [f32; 2], in_point: [f32; 2], out_point: [f32; 2]) -> Self {
        Self::Cubic(CubicPoint::new(translation, in_point, out_point))
    }

    pub fn point_type(&self) -> PointType {
        match self {
            Self::Straight(_) => PointType::Straight,
            Self::Cubic(c) => c.point_type,
        }
    }

    pub fn translation(&self) -> [f32; 2] {
        match self {
            Self::Straight(s) => s.translation,
            Self::Cubic(c) => c.translation,
        }
    }

    pub fn set_translation(&mut self, translation: [f32; 2]) {
        match self {
            Self::Straight(s) => s.translation = translation,
            Self::Cubic(c) => c.translation = translation,
        }
    }

    pub fn radius(&self) -> Option<f32> {
        match self {
            Self::Straight(s) => Some(s.radius),
            Self::Cubic(_) => None,
        }
    }

    pub fn in_point(&self) -> Option<[f32; 2]> {
        match self {
            Self::Straight(_) => None,
            Self::Cubic(c) => Some(c.in_point),
        }
    }

    pub fn out_point(&self) -> Option<[f32; 2]> {
        match self {
            Self::Straight(_) => None,
            Self::Cubic(c) => Some(c.out_point),
        }
    }

    pub fn has_weights(&self) -> bool {
        match self {
            Self::Straight(s) => s.weights.is_some(),
            Self::Cubic(c) => c.weights.is_some(),
        }
    }

    /// Deforms the point by the bone palette.
    ///
    /// Each vector is mapped into world space by `world` and then by the weight-blended bone
    /// matrix. Returns `None` when the point has no bone weights; the caller keeps the
    /// unskinned point in that case.
    pub fn skin(&self, world: &Mat2D, bones: &[Mat2D]) -> Option<PathPoint> {
        let skin_vector = |v: [f32; 2], weights: &[BoneWeight]| {
            let blended = Mat2D::blend(bones, weights);
            blended.transform_point(world.transform_point(v))
        };

        match self {
            Self::Straight(s) => {
                let weights = s.weights.as_deref()?;
                Some(Self::Straight(StraightPoint {
                    translation: skin_vector(s.translation, weights),
                    radius: s.radius,
                    weights: s.weights.clone(),
                }))
            }
            Self::Cubic(c) => {
                let weights = c.weights.as_ref()?;
                Some(Self::Cubic(CubicPoint {
                    point_type: c.point_type,
                    translation: skin_vector(c.translation, weights.translation.as_slice()),
                    in_point: skin_vector(c.in_point, weights.in_point.as_slice()),
                    out_point: skin_vector(c.out_point, weights.out_point.as_slice()),
                    weights: c.weights.clone(),
                }))
            }
        }
    }
}
