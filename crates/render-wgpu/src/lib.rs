//! wgpu render backend for the labyrinth.
//!
//! Uploads the scene's position and color buffers once and draws them with a
//! single call per frame, seen through a first-person camera.
//!
//! # Invariants
//! - Renderer never mutates the scene or the camera.
//! - GPU buffers are written once at construction; only the uniform changes per frame.

mod camera;
mod gpu;
mod shaders;

pub use camera::FirstPersonCamera;
pub use gpu::WgpuRenderer;
