use serde::{Deserialize, Serialize};

/// 3D point or direction in world units.
///
/// Addition, subtraction and scaling all produce new values, so a vector can
/// serve as an origin and as an accumulator without aliasing.
pub use glam::Vec3 as Vector3f;

/// RGB color with components nominally in `[0, 1]`. Values are not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// A (row, column) cell position in the maze grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: usize,
    pub column: usize,
}

impl CellCoord {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_ops_return_new_values() {
        let origin = Vector3f::new(1.0, 2.0, 3.0);
        let moved = origin + Vector3f::new(0.5, 0.0, -1.0);
        assert_eq!(origin, Vector3f::new(1.0, 2.0, 3.0));
        assert_eq!(moved, Vector3f::new(1.5, 2.0, 2.0));
        assert_eq!(moved - origin, Vector3f::new(0.5, 0.0, -1.0));
        assert_eq!(origin * 2.0, Vector3f::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn color_is_not_clamped() {
        let c = Color::new(1.5, -0.25, 0.5);
        assert_eq!(c.to_array(), [1.5, -0.25, 0.5]);
    }

    #[test]
    fn named_colors() {
        assert_eq!(Color::GREEN.to_array(), [0.0, 1.0, 0.0]);
        assert_eq!(Color::BLUE.to_array(), [0.0, 0.0, 1.0]);
        assert_eq!(Color::YELLOW.to_array(), [1.0, 1.0, 0.0]);
    }

    #[test]
    fn cell_coord_orders_row_major() {
        let a = CellCoord::new(1, 8);
        let b = CellCoord::new(2, 1);
        assert!(a < b);
        assert_eq!(a.to_string(), "(1, 8)");
    }
}
