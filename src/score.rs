//! Score tracking
//!
//! Every cleared square is worth a fixed number of points; there are no
//! combo, level, or drop bonuses.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total rows cleared this game
    pub rows: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `rows` cleared rows of `columns` squares each; returns the new
    /// total
    pub fn add_clear(&mut self, rows: usize, columns: usize, per_square: u64) -> u64 {
        self.points += (rows * columns) as u64 * per_square;
        self.rows += rows as u32;
        self.points
    }
}
