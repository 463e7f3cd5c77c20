//! The active falling piece

use crate::geometry::Coord;
use crate::tetromino::{RotationTable, Shape};
use ratatui::style::Color;

/// One tetromino instance: its rotation table, which state it is in, and the
/// single colour shared by every state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    shape: Shape,
    rotations: RotationTable,
    rotation: usize,
    color: Color,
}

impl Piece {
    /// Create a piece in its first rotation state
    pub fn new(shape: Shape, color: Color) -> Self {
        Self {
            shape,
            rotations: shape.rotations(),
            rotation: 0,
            color,
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Index of the current rotation state
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn rotation_count(&self) -> usize {
        self.rotations.len()
    }

    /// Relative cells of the current state
    pub fn current_cells(&self) -> [Coord; 4] {
        self.rotations[self.rotation]
    }

    /// Relative cells of the state `apply_rotation` would move to
    pub fn next_rotation_cells(&self) -> [Coord; 4] {
        self.rotations[self.next_index()]
    }

    /// Advance to the next rotation state, wrapping past the last one
    pub fn apply_rotation(&mut self) {
        self.rotation = self.next_index();
    }

    /// Absolute board cells with the piece anchored at `anchor`
    pub fn cells_at(&self, anchor: Coord) -> [Coord; 4] {
        self.current_cells().map(|p| p + anchor)
    }

    fn next_index(&self) -> usize {
        (self.rotation + 1) % self.rotations.len()
    }
}
