use labyrinth_common::Vector3f;
use labyrinth_input::InputSnapshot;

/// Turning speed in degrees per second.
pub const DEFAULT_ANGULAR_SPEED: f32 = 90.0;
/// Walking speed in world units per second.
pub const DEFAULT_MOVEMENT_SPEED: f32 = 0.2;
/// Walking speed of the earlier, slower tuning.
pub const LEGACY_MOVEMENT_SPEED: f32 = 0.05;

/// Speeds used by [`CameraState::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionConfig {
    pub angular_speed: f32,
    pub movement_speed: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            angular_speed: DEFAULT_ANGULAR_SPEED,
            movement_speed: DEFAULT_MOVEMENT_SPEED,
        }
    }
}

impl MotionConfig {
    /// The slower walking speed of the first tuning.
    pub fn legacy() -> Self {
        Self {
            angular_speed: DEFAULT_ANGULAR_SPEED,
            movement_speed: LEGACY_MOVEMENT_SPEED,
        }
    }
}

/// First-person camera: a position and a heading around +Y in degrees.
///
/// Heading 0 looks down -Z. Positive heading turns toward +X.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraState {
    pub position: Vector3f,
    pub heading: f32,
}

impl CameraState {
    pub fn at(position: Vector3f) -> Self {
        Self {
            position,
            heading: 0.0,
        }
    }

    /// Unit vector the camera walks along, in the XZ plane.
    pub fn forward(&self) -> Vector3f {
        let radians = (self.heading - 90.0).to_radians();
        Vector3f::new(radians.cos(), 0.0, radians.sin())
    }

    /// Advance by `delta` seconds: turn first, then walk along the new heading.
    pub fn step(&mut self, input: InputSnapshot, delta: f32, config: &MotionConfig) {
        if input.rotation_direction != 0 {
            self.heading += -config.angular_speed * f32::from(input.rotation_direction) * delta;
        }
        if input.movement_direction != 0 {
            let distance = config.movement_speed * f32::from(input.movement_direction) * delta;
            self.position += self.forward() * distance;
        }
    }
}
