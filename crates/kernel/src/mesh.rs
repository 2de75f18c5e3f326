use labyrinth_common::{FLOATS_PER_QUAD, Quad};

/// Flat, index-aligned position and color buffers for a single draw call.
///
/// Both buffers hold three floats per vertex and six vertices per quad, so
/// `vertices.len() == colors.len() == quad_count * 18`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub vertices: Vec<f32>,
    pub colors: Vec<f32>,
}

impl MeshBuffers {
    /// Concatenate quads in order.
    pub fn from_quads(quads: &[Quad]) -> Self {
        let mut vertices = Vec::with_capacity(quads.len() * FLOATS_PER_QUAD);
        let mut colors = Vec::with_capacity(quads.len() * FLOATS_PER_QUAD);
        for quad in quads {
            vertices.extend_from_slice(&quad.vertices());
            colors.extend_from_slice(&quad.colors());
        }
        Self { vertices, colors }
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_QUAD
    }

    /// Number of vertices (not floats).
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_common::{Color, Vector3f};

    #[test]
    fn empty_input_gives_empty_buffers() {
        let mesh = MeshBuffers::from_quads(&[]);
        assert!(mesh.is_empty());
        assert_eq!(mesh.quad_count(), 0);
    }

    #[test]
    fn buffers_concatenate_in_order() {
        let a = Quad::new(Vector3f::ZERO, Vector3f::X, Vector3f::Z, Color::GREEN);
        let b = Quad::new(Vector3f::Y, Vector3f::X, Vector3f::Y, Color::YELLOW);
        let mesh = MeshBuffers::from_quads(&[a, b]);

        assert_eq!(mesh.quad_count(), 2);
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.colors.len(), mesh.vertices.len());
        assert_eq!(&mesh.vertices[..FLOATS_PER_QUAD], &a.vertices());
        assert_eq!(&mesh.vertices[FLOATS_PER_QUAD..], &b.vertices());
        assert_eq!(&mesh.colors[FLOATS_PER_QUAD..], &b.colors());
    }
}
