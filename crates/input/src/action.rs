/// A logical key delivered by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Quit,
    Left,
    Right,
    Up,
    Down,
}

/// A discrete command produced by input, as opposed to a held-key flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Close the application. Emitted when the quit key is released.
    Quit,
}

/// Direction signals for one frame.
///
/// `rotation_direction` is +1 while turning left, -1 while turning right.
/// `movement_direction` is +1 while moving forward, -1 while moving back.
/// Opposing keys held together cancel to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub rotation_direction: i8,
    pub movement_direction: i8,
}

impl InputSnapshot {
    /// True when neither signal asks for any motion.
    pub fn is_idle(&self) -> bool {
        self.rotation_direction == 0 && self.movement_direction == 0
    }
}

/// Held-key flags plus the direction signals derived from them.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    snapshot: InputSnapshot,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a press or release of `key` and recompute the direction signals.
    pub fn apply(&mut self, key: Key, pressed: bool) -> Option<Action> {
        match key {
            Key::Quit => {
                if !pressed {
                    tracing::debug!("quit requested");
                    return Some(Action::Quit);
                }
            }
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
            Key::Up => self.up = pressed,
            Key::Down => self.down = pressed,
        }
        self.snapshot = InputSnapshot {
            rotation_direction: signal(self.left, self.right),
            movement_direction: signal(self.up, self.down),
        };
        None
    }

    pub fn rotation_direction(&self) -> i8 {
        self.snapshot.rotation_direction
    }

    pub fn movement_direction(&self) -> i8 {
        self.snapshot.movement_direction
    }

    /// Copy of the current signals, taken once per frame by the update loop.
    pub fn snapshot(&self) -> InputSnapshot {
        self.snapshot
    }

    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Quit => false,
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Up => self.up,
            Key::Down => self.down,
        }
    }
}

fn signal(positive: bool, negative: bool) -> i8 {
    i8::from(positive) - i8::from(negative)
}
