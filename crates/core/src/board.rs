//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the color
//! token (piece kind) of the piece that filled it.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows with negative y are "above the board": pieces may hang there, but
//! nothing is ever stored there.

use crate::pieces::Piece;
use crate::types::{BoardGrid, Cell, PieceKind, Shape, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

fn offset_cells(shape: &Shape, x: i8, y: i8) -> impl Iterator<Item = (i8, i8)> + '_ {
    shape
        .filled_cells()
        .map(move |(dx, dy)| (x.saturating_add(dx), y.saturating_add(dy)))
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Rebuild a board from a snapshot grid
    pub fn from_grid(grid: &BoardGrid) -> Self {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            let start = y * BOARD_WIDTH as usize;
            board.cells[start..start + BOARD_WIDTH as usize].copy_from_slice(row);
        }
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Whether `shape` with its top-left corner at (x, y) fits.
    ///
    /// Every filled cell must be inside the side walls and above the floor.
    /// Cells on the board must not overlap a filled cell; cells above the top
    /// (negative y) are never checked for overlap.
    pub fn is_valid_position(&self, shape: &Shape, x: i8, y: i8) -> bool {
        self.cells_fit(offset_cells(shape, x, y))
    }

    /// Whether `piece` fits where it stands
    pub fn fits(&self, piece: &Piece) -> bool {
        self.cells_fit(piece.cells())
    }

    fn cells_fit(&self, cells: impl IntoIterator<Item = (i8, i8)>) -> bool {
        cells.into_iter().all(|(px, py)| {
            if px < 0 || px >= BOARD_WIDTH as i8 || py >= BOARD_HEIGHT as i8 {
                return false;
            }
            py < 0 || !self.is_occupied(px, py)
        })
    }

    /// Write `kind` into every board cell covered by `shape` at (x, y).
    ///
    /// Cells above the board are dropped. Returns the number of cells written.
    pub fn commit(&mut self, shape: &Shape, x: i8, y: i8, kind: PieceKind) -> usize {
        self.fill_cells(offset_cells(shape, x, y), kind)
    }

    /// Commit `piece` at its current position
    pub fn lock(&mut self, piece: &Piece) -> usize {
        self.fill_cells(piece.cells(), piece.kind)
    }

    fn fill_cells(&mut self, cells: impl IntoIterator<Item = (i8, i8)>, kind: PieceKind) -> usize {
        cells
            .into_iter()
            .filter(|&(px, py)| py >= 0 && self.set(px, py, Some(kind)))
            .count()
    }

    /// Clear all full rows and return how many were removed.
    ///
    /// Rows above each cleared row shift down and empty rows fill in at the
    /// top, so the height never changes. Two-pointer compaction, bottom-up,
    /// without allocation.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut cleared = 0;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                // This row is not full, move it down to the write position
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Clear the remaining rows at the top
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared
    }

    /// Number of filled cells on the board
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Copy into a row-major 2D grid (snapshot form)
    pub fn rows(&self) -> BoardGrid {
        let mut grid = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        for (y, row) in grid.iter_mut().enumerate() {
            let start = y * BOARD_WIDTH as usize;
            row.copy_from_slice(&self.cells[start..start + BOARD_WIDTH as usize]);
        }
        grid
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> Shape {
        Shape::from_rows(&[&[1, 1, 1, 1]]).unwrap()
    }

    fn fill_row(board: &mut Board, y: i8) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, Some(PieceKind::I));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_valid_position_walls_and_floor() {
        let board = Board::new();
        assert!(board.is_valid_position(&bar(), 0, 0));
        assert!(board.is_valid_position(&bar(), 6, 19));
        assert!(!board.is_valid_position(&bar(), -1, 0));
        assert!(!board.is_valid_position(&bar(), 7, 0));
        assert!(!board.is_valid_position(&bar(), 0, 20));
    }

    #[test]
    fn test_valid_position_ignores_occupancy_above_board() {
        let mut board = Board::new();
        fill_row(&mut board, 0);
        let vertical = Shape::from_rows(&[&[1], &[1]]).unwrap();

        // Both cells above the top: fine even though row 0 is full.
        assert!(board.is_valid_position(&vertical, 4, -2));
        // Lower cell lands on the full row.
        assert!(!board.is_valid_position(&vertical, 4, -1));
    }

    #[test]
    fn test_valid_position_detects_overlap() {
        let mut board = Board::new();
        board.set(5, 10, Some(PieceKind::T));
        assert!(!board.is_valid_position(&bar(), 3, 10));
        assert!(board.is_valid_position(&bar(), 6, 10));
    }

    #[test]
    fn test_commit_drops_cells_above_board() {
        let mut board = Board::new();
        let vertical = Shape::from_rows(&[&[1], &[1], &[1], &[1]]).unwrap();
        let written = board.commit(&vertical, 2, -2, PieceKind::I);
        assert_eq!(written, 2);
        assert_eq!(board.get(2, 0), Some(Some(PieceKind::I)));
        assert_eq!(board.get(2, 1), Some(Some(PieceKind::I)));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_piece_fits_and_locks_at_its_cells() {
        let mut board = Board::new();
        let landed = Piece::new(PieceKind::O).shifted(0, 18);
        assert!(board.fits(&landed));

        board.set(5, 19, Some(PieceKind::T));
        assert!(!board.fits(&landed));
        assert!(!board.fits(&landed.shifted(6, -18)));

        let hanging = Piece::new(PieceKind::O).shifted(0, -1);
        assert!(board.fits(&hanging));
        assert_eq!(board.lock(&hanging), 2);
        assert_eq!(board.get(4, 0), Some(Some(PieceKind::O)));
        assert_eq!(board.get(5, 0), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_clear_full_rows_compacts_down() {
        let mut board = Board::new();
        fill_row(&mut board, 19);
        fill_row(&mut board, 17);
        board.set(0, 18, Some(PieceKind::O));
        board.set(3, 16, Some(PieceKind::S));

        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.get(0, 19), Some(Some(PieceKind::O)));
        assert_eq!(board.get(3, 18), Some(Some(PieceKind::S)));
        assert_eq!(board.filled_count(), 2);
        assert_eq!(board.clear_full_rows(), 0);
    }

    #[test]
    fn test_grid_roundtrip() {
        let mut board = Board::new();
        board.set(0, 0, Some(PieceKind::I));
        board.set(9, 19, Some(PieceKind::L));
        let grid = board.rows();
        assert_eq!(grid[0][0], Some(PieceKind::I));
        assert_eq!(grid[19][9], Some(PieceKind::L));
        assert_eq!(Board::from_grid(&grid), board);
    }
}
