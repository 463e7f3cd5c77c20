//! Tetromino definitions, rotation tables, and the colour palette
//!
//! Rotation is a fixed lookup per shape. Coordinates are (x, y) offsets from
//! the piece anchor with y growing downward.

use crate::geometry::Coord;
use ratatui::style::Color;

/// The same four cells, one entry per rotation state
pub type RotationTable = &'static [[Coord; 4]];

const fn c(x: i32, y: i32) -> Coord {
    Coord::new(x, y)
}

const O_STATES: [[Coord; 4]; 1] = [[c(0, 0), c(1, 0), c(0, 1), c(1, 1)]];

const I_STATES: [[Coord; 4]; 2] = [
    [c(0, 0), c(1, 0), c(2, 0), c(3, 0)],
    [c(0, 0), c(0, 1), c(0, 2), c(0, 3)],
];

const L_STATES: [[Coord; 4]; 4] = [
    [c(0, 1), c(1, 1), c(2, 1), c(2, 0)],
    [c(0, 0), c(0, 1), c(0, 2), c(1, 2)],
    [c(0, 0), c(0, 1), c(1, 0), c(2, 0)],
    [c(0, 0), c(1, 0), c(1, 1), c(1, 2)],
];

const J_STATES: [[Coord; 4]; 4] = [
    [c(0, 0), c(0, 1), c(1, 1), c(2, 1)],
    [c(0, 0), c(1, 0), c(0, 1), c(0, 2)],
    [c(0, 0), c(1, 0), c(2, 0), c(2, 1)],
    [c(0, 2), c(1, 2), c(1, 1), c(1, 0)],
];

const Z_STATES: [[Coord; 4]; 2] = [
    [c(0, 0), c(1, 0), c(1, 1), c(2, 1)],
    [c(0, 1), c(1, 1), c(1, 0), c(0, 2)],
];

const S_STATES: [[Coord; 4]; 2] = [
    [c(0, 1), c(1, 1), c(1, 0), c(2, 0)],
    [c(0, 0), c(0, 1), c(1, 1), c(1, 2)],
];

const T_STATES: [[Coord; 4]; 4] = [
    [c(0, 1), c(1, 1), c(1, 0), c(2, 1)],
    [c(0, 0), c(0, 1), c(0, 2), c(1, 1)],
    [c(0, 0), c(1, 0), c(2, 0), c(1, 1)],
    [c(0, 1), c(1, 0), c(1, 1), c(1, 2)],
];

/// The 7 tetromino shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    O,
    I,
    L,
    J,
    Z,
    S,
    T,
}

/// Every shape, in draw order
pub const SHAPES: [Shape; 7] = [
    Shape::O,
    Shape::I,
    Shape::L,
    Shape::J,
    Shape::Z,
    Shape::S,
    Shape::T,
];

impl Shape {
    /// Ordered rotation states for this shape
    pub fn rotations(&self) -> RotationTable {
        match self {
            Shape::O => &O_STATES,
            Shape::I => &I_STATES,
            Shape::L => &L_STATES,
            Shape::J => &J_STATES,
            Shape::Z => &Z_STATES,
            Shape::S => &S_STATES,
            Shape::T => &T_STATES,
        }
    }
}

/// Colour of an empty cell
pub const BACKGROUND: Color = Color::Rgb(0x56, 0x56, 0x56);

/// Colour given to full rows while the clear animation runs
pub const HIGHLIGHT: Color = Color::Red;

/// Piece colours. A piece draws one of the first `palette_size` entries.
pub const PALETTE: [Color; 17] = [
    Color::Rgb(0xff, 0xd3, 0x00),
    Color::Rgb(0xde, 0x38, 0xc8),
    Color::Rgb(0x65, 0x2e, 0xc7),
    Color::Rgb(0x33, 0x13, 0x5c),
    Color::Rgb(0x13, 0xca, 0x91),
    Color::Rgb(0xff, 0x94, 0x72),
    Color::Rgb(0x35, 0x21, 0x2a),
    Color::Rgb(0xff, 0x8b, 0x8b),
    Color::Rgb(0x28, 0xcf, 0x75),
    Color::Rgb(0x00, 0xa9, 0xfe),
    Color::Rgb(0x04, 0x00, 0x5e),
    Color::Rgb(0x12, 0x00, 0x52),
    Color::Rgb(0x27, 0x28, 0x22),
    Color::Rgb(0xf9, 0x26, 0x72),
    Color::Rgb(0x66, 0xd9, 0xef),
    Color::Rgb(0xa6, 0xe2, 0x2e),
    Color::Rgb(0xfd, 0x97, 0x1f),
];
