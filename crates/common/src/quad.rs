use crate::types::{Color, Vector3f};

/// Vertices emitted per quad (two triangles).
pub const VERTICES_PER_QUAD: usize = 6;

/// Floats emitted per quad for either the position or the color buffer.
pub const FLOATS_PER_QUAD: usize = VERTICES_PER_QUAD * 3;

/// Corner indices of the two triangles, both fanning out from corner 0.
const TRIANGLES: [[usize; 3]; 2] = [[0, 1, 2], [0, 2, 3]];

/// A planar rectangle with a uniform color.
///
/// Corners are `origin`, `origin + v1`, `origin + v1 + v2` and `origin + v2`,
/// computed once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    corners: [Vector3f; 4],
    color: Color,
}

impl Quad {
    pub fn new(origin: Vector3f, v1: Vector3f, v2: Vector3f, color: Color) -> Self {
        Self {
            corners: [origin, origin + v1, origin + v1 + v2, origin + v2],
            color,
        }
    }

    pub fn corners(&self) -> &[Vector3f; 4] {
        &self.corners
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Positions of the six triangle vertices, three floats each.
    pub fn vertices(&self) -> [f32; FLOATS_PER_QUAD] {
        let mut out = [0.0; FLOATS_PER_QUAD];
        let corners = TRIANGLES.iter().flatten().map(|&i| self.corners[i]);
        for (slot, corner) in out.chunks_exact_mut(3).zip(corners) {
            slot.copy_from_slice(&corner.to_array());
        }
        out
    }

    /// The quad color repeated once per emitted vertex.
    pub fn colors(&self) -> [f32; FLOATS_PER_QUAD] {
        let mut out = [0.0; FLOATS_PER_QUAD];
        for slot in out.chunks_exact_mut(3) {
            slot.copy_from_slice(&self.color.to_array());
        }
        out
    }
}
