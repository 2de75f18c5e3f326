use labyrinth_common::Vector3f;
use labyrinth_kernel::{CameraState, EmitOptions, Labyrinth, LabyrinthError, MeshBuffers};

/// Everything a renderer needs from a generated labyrinth.
#[derive(Debug, Clone)]
pub struct RenderScene {
    pub mesh: MeshBuffers,
    /// World extent along x.
    pub width: f32,
    /// World extent along z.
    pub height: f32,
    /// Camera spawn point.
    pub spawn: Vector3f,
    /// Text form of the grid, `X` open and `.` closed.
    pub layout: String,
}

impl RenderScene {
    /// Build the scene from a filled labyrinth. Fails if it has no start cell.
    pub fn from_labyrinth(
        labyrinth: &Labyrinth,
        options: EmitOptions,
    ) -> Result<Self, LabyrinthError> {
        let spawn = labyrinth.start_position()?;
        let mesh = labyrinth.mesh_with(options);
        tracing::info!(
            quads = mesh.quad_count(),
            vertices = mesh.vertex_count(),
            "render scene built"
        );
        Ok(Self {
            mesh,
            width: labyrinth.width(),
            height: labyrinth.height(),
            spawn,
            layout: labyrinth.to_string(),
        })
    }
}

/// Camera view handed to a renderer each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    pub eye: Vector3f,
    /// Degrees around +Y; 0 looks down -Z.
    pub heading: f32,
}

impl From<&CameraState> for RenderView {
    fn from(camera: &CameraState) -> Self {
        Self {
            eye: camera.position,
            heading: camera.heading,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of `scene` from `view`.
    fn render(&self, scene: &RenderScene, view: &RenderView) -> Self::Output;
}

/// Text renderer for the CLI and tests: grid layout plus camera readout.
#[derive(Debug, Default)]
pub struct TextRenderer;

impl TextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, scene: &RenderScene, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Labyrinth ({:.2} x {:.2}, {} quads) ===\n",
            scene.width,
            scene.height,
            scene.mesh.quad_count()
        ));
        out.push_str(&scene.layout);
        out.push_str(&format!(
            "Spawn: ({:.3}, {:.3}, {:.3})\n",
            scene.spawn.x, scene.spawn.y, scene.spawn.z
        ));
        out.push_str(&format!(
            "Camera: eye=({:.3}, {:.3}, {:.3}) heading={:.1}\n",
            view.eye.x, view.eye.y, view.eye.z, view.heading
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_kernel::SeedPolicy;

    fn scene() -> RenderScene {
        let mut lab = Labyrinth::new(10, 10, SeedPolicy::Fixed).unwrap();
        lab.fill_randomly().unwrap();
        RenderScene::from_labyrinth(&lab, EmitOptions::default()).unwrap()
    }

    #[test]
    fn scene_carries_buffers_and_extent() {
        let scene = scene();
        assert_eq!(scene.mesh.vertices.len(), scene.mesh.colors.len());
        assert_eq!(scene.mesh.quad_count(), 109);
        assert!((scene.width - 1.0).abs() < 1e-6);
        assert!((scene.height - 1.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_labyrinth_has_no_scene() {
        let mut lab = Labyrinth::new(3, 3, SeedPolicy::Fixed).unwrap();
        let _ = lab.fill_randomly();
        assert_eq!(
            RenderScene::from_labyrinth(&lab, EmitOptions::default()).unwrap_err(),
            LabyrinthError::DegenerateMaze
        );
    }

    #[test]
    fn text_renderer_shows_layout_and_camera() {
        let scene = scene();
        let camera = CameraState::at(scene.spawn);
        let output = TextRenderer::new().render(&scene, &RenderView::from(&camera));

        assert!(output.contains("109 quads"));
        assert!(output.contains(".....XXXX."));
        assert!(output.contains("Spawn: (0.550, 0.050, -0.350)"));
        assert!(output.contains("heading=0.0"));
    }
}
