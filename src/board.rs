//! Game board representation and row clearing

use crate::error::BoardError;
use ratatui::style::Color;

/// Default board dimensions
pub const DEFAULT_COLUMNS: usize = 10;
pub const DEFAULT_ROWS: usize = 16;

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    /// Display colour, with empty cells shown as `background`
    pub fn color_or(&self, background: Color) -> Color {
        match self {
            Cell::Empty => background,
            Cell::Filled(color) => *color,
        }
    }
}

/// The game board. Row 0 is the top; dimensions never change after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: usize,
    rows: usize,
    /// Row-major, `rows * columns` long
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS, DEFAULT_ROWS)
    }
}

impl Board {
    /// Create a new empty board
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![Cell::Empty; columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Whether (x, y) lies on the board
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.columns && (y as usize) < self.rows
    }

    pub fn cell_at(&self, x: i32, y: i32) -> Result<Cell, BoardError> {
        let idx = self.index(x, y)?;
        Ok(self.cells[idx])
    }

    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) -> Result<(), BoardError> {
        let idx = self.index(x, y)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// True iff every cell of row `y` is filled. Rows off the board are
    /// never full.
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_filled()))
    }

    /// True iff row `y` holds no filled cell
    pub fn is_row_empty(&self, y: usize) -> bool {
        self.row(y)
            .is_none_or(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Indices of every full row, ascending
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.rows).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Empty every cell of row `y`
    pub fn clear_row(&mut self, y: usize) -> Result<(), BoardError> {
        let range = self.row_range(y)?;
        self.cells[range].fill(Cell::Empty);
        Ok(())
    }

    /// Recolour the filled cells of row `y`
    pub fn paint_row(&mut self, y: usize, color: Color) -> Result<(), BoardError> {
        let range = self.row_range(y)?;
        for cell in &mut self.cells[range] {
            if cell.is_filled() {
                *cell = Cell::Filled(color);
            }
        }
        Ok(())
    }

    /// Remove `cleared` rows and let everything above them fall into the gap.
    ///
    /// The result equals deleting those rows and inserting as many empty rows
    /// at the top, whatever their order, count, or adjacency. All indices are
    /// checked before the board is touched.
    pub fn compact_after_clears(&mut self, cleared: &[usize]) -> Result<(), BoardError> {
        if let Some(&bad) = cleared.iter().find(|&&y| y >= self.rows) {
            return Err(self.out_of_bounds(0, bad as i32));
        }
        if cleared.is_empty() {
            return Ok(());
        }

        // Walk bottom-up, copying every surviving row down to the write cursor
        let mut write_row = self.rows;
        for read_row in (0..self.rows).rev() {
            if cleared.contains(&read_row) {
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * self.columns;
                let dst = write_row * self.columns;
                self.cells.copy_within(src..src + self.columns, dst);
            }
        }

        // Vacated rows at the top
        self.cells[..write_row * self.columns].fill(Cell::Empty);
        Ok(())
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Iterate rows from the top
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.columns)
    }

    fn row(&self, y: usize) -> Option<&[Cell]> {
        (y < self.rows).then(|| &self.cells[y * self.columns..(y + 1) * self.columns])
    }

    fn row_range(&self, y: usize) -> Result<std::ops::Range<usize>, BoardError> {
        if y >= self.rows {
            return Err(self.out_of_bounds(0, y as i32));
        }
        Ok(y * self.columns..(y + 1) * self.columns)
    }

    fn index(&self, x: i32, y: i32) -> Result<usize, BoardError> {
        if !self.contains(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        Ok(y as usize * self.columns + x as usize)
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> BoardError {
        BoardError::OutOfBounds {
            x,
            y,
            columns: self.columns,
            rows: self.rows,
        }
    }
}
