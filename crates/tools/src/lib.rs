//! Developer Tooling: read-only labyrinth inspection.
//!
//! # Invariants
//! - Tools never mutate the labyrinth.

mod inspector;

pub use inspector::{MazeInspector, MazeSummary};
