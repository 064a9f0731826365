//! Core domain types for gridrow.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Smallest accepted board width or height.
pub const MIN_DIMENSION: usize = 3;

/// Largest accepted board width or height.
pub const MAX_DIMENSION: usize = 20;

/// Player mark placed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Mark {
    /// Player X (goes first).
    #[display("X")]
    X,
    /// Player O (goes second).
    #[display("O")]
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A single cell on the board.
///
/// Serialized as `null`, `"X"` or `"O"` so a board travels the wire as a
/// flat array of nullable symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Mark>", into = "Option<Mark>")]
pub enum Cell {
    /// No mark placed yet.
    Empty,
    /// Cell claimed by a player.
    Occupied(Mark),
}

impl From<Option<Mark>> for Cell {
    fn from(mark: Option<Mark>) -> Self {
        match mark {
            Some(mark) => Cell::Occupied(mark),
            None => Cell::Empty,
        }
    }
}

impl From<Cell> for Option<Mark> {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Occupied(mark) => Some(mark),
            Cell::Empty => None,
        }
    }
}

/// Board creation rejected because a dimension is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display(
    "board dimensions must be {}-{} on each axis, got {}x{}",
    MIN_DIMENSION,
    MAX_DIMENSION,
    width,
    height
)]
pub struct DimensionError {
    /// Requested width.
    pub width: usize,
    /// Requested height.
    pub height: usize,
}

/// Rectangular board with row-major cell storage.
///
/// `index = row * width + col`. The cell count is fixed at
/// `width * height` for the lifetime of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board, validating both dimensions.
    pub fn new(width: usize, height: usize) -> Result<Self, DimensionError> {
        let range = MIN_DIMENSION..=MAX_DIMENSION;
        if !range.contains(&width) || !range.contains(&height) {
            return Err(DimensionError { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        })
    }

    /// Board width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Board height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Gets the cell at the given index, `None` when off the board.
    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Whether `index` is an on-board, unoccupied cell.
    pub fn is_vacant(&self, index: usize) -> bool {
        matches!(self.cell(index), Some(Cell::Empty))
    }

    /// Indices of all unoccupied cells, in row-major order.
    pub fn vacancies(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(index, _)| index)
    }

    /// Overwrites the cell at `index`. Caller has already bounds-checked.
    pub(crate) fn set(&mut self, index: usize, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(index) {
            *slot = cell;
        }
    }

    /// Clears every cell back to empty.
    pub(crate) fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..self.height {
            for col in 0..self.width {
                let symbol = match self.cells[row * self.width + col] {
                    Cell::Empty => ".".to_string(),
                    Cell::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < self.width - 1 {
                    result.push('|');
                }
            }
            if row < self.height - 1 {
                result.push('\n');
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_bounds() {
        assert!(Board::new(3, 3).is_ok());
        assert!(Board::new(20, 20).is_ok());
        assert!(Board::new(2, 3).is_err());
        assert!(Board::new(3, 21).is_err());
        assert!(Board::new(0, 0).is_err());
    }

    #[test]
    fn test_cell_count_matches_dimensions() {
        let board = Board::new(4, 5).expect("valid dimensions");
        assert_eq!(board.cells().len(), 20);
        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 5);
    }

    #[test]
    fn test_vacancy_checks() {
        let mut board = Board::new(3, 3).expect("valid dimensions");
        assert!(board.is_vacant(0));
        board.set(0, Cell::Occupied(Mark::X));
        assert!(!board.is_vacant(0));
        // Off-board indices are never vacant.
        assert!(!board.is_vacant(9));
        assert_eq!(board.vacancies().count(), 8);
    }

    #[test]
    fn test_cell_wire_format() {
        let cells = vec![Cell::Empty, Cell::Occupied(Mark::X), Cell::Occupied(Mark::O)];
        let json = serde_json::to_string(&cells).expect("serializes");
        assert_eq!(json, r#"[null,"X","O"]"#);
        let back: Vec<Cell> = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, cells);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(3, 3).expect("valid dimensions");
        board.set(0, Cell::Occupied(Mark::X));
        board.set(4, Cell::Occupied(Mark::O));
        assert_eq!(board.display(), "X|.|.\n.|O|.\n.|.|.");
    }
}
