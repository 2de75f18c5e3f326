//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene and the view; they never mutate either.
//! - The scene's vertex and color buffers are built once and stay immutable.
//!
//! A text renderer ships here for headless use; the GPU backend lives in
//! `labyrinth-render-wgpu` and consumes the same [`RenderScene`].

mod renderer;

pub use renderer::{RenderScene, RenderView, Renderer, TextRenderer};
