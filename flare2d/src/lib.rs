//! Geometry core for a 2D vector animation runtime.
//!
//! Maintains a scene of shapes and paths, derives render-ready point lists (bone skinning,
//! rounded-corner expansion) and computes bounds in object, shape and world space. This crate is
//! renderer-agnostic: tessellation and GPU submission live elsewhere.

#![forbid(unsafe_code)]

mod bounds;
mod corner;
mod deform;
mod error;
mod math;
mod path;
mod point;
mod procedural;
mod scene;
mod shape;
mod skin;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "binary")]
pub mod binary;

pub use bounds::*;
pub use corner::*;
pub use deform::*;
pub use error::*;
pub use math::Mat2D;
pub use path::*;
pub use point::*;
pub use procedural::*;
pub use scene::*;
pub use shape::*;
pub use skin::*;

#[cfg(test)]
mod corner_tests;


#[cfg(test)]
mod point_tests;


#[cfg(test)]
mod procedural_tests;
