//! Path point reader for binary asset data.
//!
//! The reader is IO-free: it operates on an in-memory byte slice. Layout, big-endian:
//!
//! - `u16` point count
//! - per point: `u8` point type, `f32 x`, `f32 y`, then
//!   - straight: `f32 radius`, plus one weight block when connected to bones
//!   - cubic: `f32 in_x, in_y, out_x, out_y`, plus three weight blocks (translation, in, out)
//!     when connected to bones
//!
//! A weight block is eight `f32`s: four bone palette indices followed by their four weights.

use crate::{BoneWeight, CubicPoint, CubicWeights, Error, PathPoint, PointType, StraightPoint};
use byteorder::{BigEndian, ByteOrder};

const WEIGHTS_PER_VECTOR: usize = 4;

#[derive(Clone, Debug)]
struct BinaryInput<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

impl<'a> BinaryInput<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, cursor: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.cursor)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
        if self.remaining() < len {
            return Err(Error::BinaryParse {
                message: format!("unexpected EOF at byte {}", self.cursor),
            });
        }
        let out = &self.bytes[self.cursor..self.cursor + len];
        self.cursor += len;
        Ok(out)
    }

    fn read_u8(&mut self) -> Result<u8, Error> {
        Ok(self.take(1)?[0])
    }

    fn read_u16_be(&mut self) -> Result<u16, Error> {
        Ok(BigEndian::read_u16(self.take(2)?))
    }

    fn read_f32_be(&mut self) -> Result<f32, Error> {
        Ok(BigEndian::read_f32(self.take(4)?))
    }

    fn read_vec2(&mut self) -> Result<[f32; 2], Error> {
        Ok([self.read_f32_be()?, self.read_f32_be()?])
    }

    fn read_weights(&mut self) -> Result<Vec<BoneWeight>, Error> {
        let mut bones = [0.0f32; WEIGHTS_PER_VECTOR];
        for bone in &mut bones {
            *bone = self.read_f32_be()?;
        }
        let mut out = Vec::with_capacity(WEIGHTS_PER_VECTOR);
        for bone in bones {
            let weight = self.read_f32_be()?;
            if weight <= 0.0 {
                continue;
            }
            if !(bone >= 0.0 && bone.is_finite()) {
                return Err(Error::BinaryParse {
                    message: format!("invalid bone index {bone}"),
                });
            }
            out.push(BoneWeight {
                bone: bone as usize,
                weight,
            });
        }
        Ok(out)
    }
}

/// Reads a point list. `connected_to_bones` selects whether weight blocks are present.
///
/// An unknown point type is fatal: the asset is corrupt and loading must stop.
pub fn read_path_points(bytes: &[u8], connected_to_bones: bool) -> Result<Vec<PathPoint>, Error> {
    let mut input = BinaryInput::new(bytes);
    let count = input.read_u16_be()? as usize;
    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        points.push(read_point(&mut input, connected_to_bones)?);
    }
    Ok(points)
}

fn read_point(input: &mut BinaryInput<'_>, connected_to_bones: bool) -> Result<PathPoint, Error> {
    let raw_type = input.read_u8()?;
    let point_type = PointType::from_u8(raw_type).ok_or(Error::InvalidPointType { value: raw_type })?;
    let translation = input.read_vec2()?;

    if point_type == PointType::Straight {
        let radius = input.read_f32_be()?;
        let weights = if connected_to_bones {
            Some(input.read_weights()?)
        } else {
            None
        };
        return Ok(PathPoint::Straight(StraightPoint {
            translation,
            radius,
            weights,
        }));
    }

    let in_point = input.read_vec2()?;
    let out_point = input.read_vec2()?;
    let weights = if connected_to_bones {
        Some(CubicWeights {
            translation: input.read_weights()?,
            in_point: input.read_weights()?,
            out_point: input.read_weights()?,
        })
    } else {
        None
    };
    Ok(PathPoint::Cubic(CubicPoint {
        point_type,
        translation,
        in_point,
        out_point,
        weights,
    }))
}
