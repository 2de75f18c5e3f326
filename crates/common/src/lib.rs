//! Shared value types: vectors, colors, grid coordinates and colored quads.
//!
//! # Invariants
//! - Every type here is an immutable `Copy` value; operations return new values.

mod quad;
mod types;

pub use quad::{FLOATS_PER_QUAD, Quad, VERTICES_PER_QUAD};
pub use types::{CellCoord, Color, Vector3f};
