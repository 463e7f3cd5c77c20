//! Read-only view of the board with the active piece drawn on top

use crate::board::Board;
use crate::engine::Phase;
use crate::geometry::Coord;
use crate::tetromino::BACKGROUND;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotCell {
    pub occupied: bool,
    pub color: Color,
}

impl SnapshotCell {
    const EMPTY: SnapshotCell = SnapshotCell {
        occupied: false,
        color: BACKGROUND,
    };
}

/// Owned copy of everything a renderer needs. Building one never touches
/// engine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Top row first
    pub rows: Vec<Vec<SnapshotCell>>,
    pub score: u64,
    pub phase: Phase,
}

impl Snapshot {
    pub(crate) fn capture(
        board: &Board,
        overlay: Option<([Coord; 4], Color)>,
        score: u64,
        phase: Phase,
    ) -> Self {
        let mut rows: Vec<Vec<SnapshotCell>> = board
            .rows_iter()
            .map(|row| {
                row.iter()
                    .map(|cell| SnapshotCell {
                        occupied: cell.is_filled(),
                        color: cell.color_or(BACKGROUND),
                    })
                    .collect()
            })
            .collect();

        if let Some((cells, color)) = overlay {
            for p in cells {
                if board.contains(p.x, p.y) {
                    rows[p.y as usize][p.x as usize] = SnapshotCell {
                        occupied: true,
                        color,
                    };
                }
            }
        }

        Self { rows, score, phase }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Cell at column `x`, row `y`; off-board reads as empty
    pub fn cell(&self, x: usize, y: usize) -> SnapshotCell {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(SnapshotCell::EMPTY)
    }
}
