//! Labyrinth kernel: maze grid generation, quad emission, buffer flattening
//! and per-frame camera motion.
//!
//! # Invariants
//! - The outer ring of the grid is always closed.
//! - A fixed seed reproduces the same grid and start cell on every platform.
//! - Vertex and color buffers stay index-aligned, 18 floats per quad each.
//! - The motion step is pure with respect to its input snapshot and delta.

mod error;
pub mod labyrinth;
pub mod mesh;
pub mod motion;
pub mod rng;

pub use error::LabyrinthError;
pub use labyrinth::{CELL_SIZE, EmitOptions, Labyrinth, LabyrinthConfig, MAX_DIMENSION, MIN_DIMENSION};
pub use mesh::MeshBuffers;
pub use motion::{CameraState, MotionConfig};
pub use rng::{FIXED_SEED, MazeRng, SeedPolicy};
