//! Input mapping: logical key presses become held-key flags, and the flags
//! become two direction signals read by the motion step.
//!
//! # Invariants
//! - Direction signals are always in `{-1, 0, 1}` and are recomputed on every event.
//! - The frame loop reads an [`InputSnapshot`] by value; nothing is shared with the event source.

pub mod action;

pub use action::{Action, InputSnapshot, InputState, Key};
