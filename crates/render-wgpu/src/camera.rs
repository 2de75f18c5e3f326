use glam::Mat4;
use labyrinth_render::RenderView;

/// Half-height of the near plane, in world units.
const NEAR_HALF_HEIGHT: f32 = 0.03;

/// Projection parameters for the first-person view.
///
/// Position and heading come from the [`RenderView`] each frame; this type
/// only owns what the window shape and clipping planes decide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstPersonCamera {
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        let near = 0.03;
        Self {
            fov: 2.0 * (NEAR_HALF_HEIGHT / near).atan(),
            aspect: 800.0 / 600.0,
            near,
            far: 2.0,
        }
    }
}

impl FirstPersonCamera {
    /// Rotate the world by the heading about +Y, after moving the eye to the origin.
    pub fn view_matrix(&self, view: &RenderView) -> Mat4 {
        Mat4::from_rotation_y(view.heading.to_radians()) * Mat4::from_translation(-view.eye)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self, view: &RenderView) -> Mat4 {
        self.projection_matrix() * self.view_matrix(view)
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }
}
