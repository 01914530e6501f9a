//! Grid module - the settled-cell surface
//!
//! Row-major flat storage for cache locality; coordinates are (x, y) with
//! x growing rightward and y growing downward. The grid is mutated only by
//! `merge` and the line sweep.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Piece;
use crate::types::Cell;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Flat cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new all-empty grid
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        let start = y * self.width as usize;
        let end = start + self.width as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Iterate rows top to bottom as cell slices
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    /// Flat view of the cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of filled cells on the whole grid
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Collision test for a tentatively positioned piece: vertical overflow
    /// first, then settled-cell overlap. The horizontal bounds clause is a
    /// hardening on top of the command-level pre-checks, which remain the
    /// primary guard (see DESIGN.md).
    pub fn collides(&self, piece: &Piece) -> bool {
        if piece.bottommost_y() > self.height as i8 {
            return true;
        }
        if piece.x < 0 || piece.rightmost_x() > self.width as i8 {
            return true;
        }
        piece
            .cell_offsets()
            .any(|(dx, dy)| self.is_occupied(piece.x + dx, piece.y + dy))
    }

    /// Transfer a landed piece's occupied cells into the settled grid
    pub fn merge(&mut self, piece: &Piece) {
        for (dx, dy) in piece.cell_offsets() {
            self.set(piece.x + dx, piece.y + dy, Some(piece.kind));
        }
        debug!(kind = ?piece.kind, x = piece.x, y = piece.y, "piece merged into grid");
    }

    /// Sweep every full row top to bottom, compacting immediately after
    /// each hit, and return the cleared row indices in scan order.
    ///
    /// Compaction shifts the rows above a cleared row down by one, toward
    /// row 0. Row 0 itself is left in place, so it ends up equal to the new
    /// row 1 until fresh content lands there.
    pub fn sweep_full_rows(&mut self) -> Vec<usize> {
        let mut cleared = Vec::new();
        for y in 0..self.height as usize {
            if self.is_row_full(y) {
                cleared.push(y);
                self.shift_rows_down_to(y);
            }
        }
        cleared
    }

    /// Copy row r-1 into row r for r descending from `y` to 1
    fn shift_rows_down_to(&mut self, y: usize) {
        let width = self.width as usize;
        for row in (1..=y).rev() {
            let src = (row - 1) * width;
            let dst = row * width;
            // copy_within handles the row-by-row move without allocation
            self.cells.copy_within(src..src + width, dst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(10, 20);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(9, 0), Some(9));
        assert_eq!(grid.index(0, 1), Some(10));
        assert_eq!(grid.index(9, 19), Some(199));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(10, 0), None);
        assert_eq!(grid.index(0, 20), None);
    }

    #[test]
    fn test_grid_respects_runtime_dimensions() {
        let grid = Grid::new(6, 12);
        assert_eq!(grid.width(), 6);
        assert_eq!(grid.height(), 12);
        assert_eq!(grid.cells().len(), 72);
        assert_eq!(grid.get(5, 11), Some(None));
        assert_eq!(grid.get(6, 0), None);
        assert_eq!(grid.get(0, 12), None);
    }

    #[test]
    fn test_sweep_shifts_rows_toward_row_zero() {
        let mut grid = Grid::new(3, 4);

        // Marker cell at row 1, full row at row 2
        grid.set(0, 1, Some(PieceKind::T));
        for x in 0..3 {
            grid.set(x, 2, Some(PieceKind::I));
        }

        let cleared = grid.sweep_full_rows();
        assert_eq!(cleared, vec![2]);

        // The marker moved from row 1 down into row 2
        assert_eq!(grid.get(0, 2), Some(Some(PieceKind::T)));
        assert_eq!(grid.get(1, 2), Some(None));
        // Row 3, below the cleared row, is untouched
        assert_eq!(grid.get(0, 3), Some(None));
    }

    #[test]
    fn test_sweep_leaves_row_zero_as_duplicate() {
        let mut grid = Grid::new(3, 4);

        grid.set(2, 0, Some(PieceKind::L));
        for x in 0..3 {
            grid.set(x, 1, Some(PieceKind::I));
        }

        let cleared = grid.sweep_full_rows();
        assert_eq!(cleared, vec![1]);

        // Row 0 content was copied into row 1 and row 0 keeps its own copy
        assert_eq!(grid.get(2, 1), Some(Some(PieceKind::L)));
        assert_eq!(grid.get(2, 0), Some(Some(PieceKind::L)));
    }

    #[test]
    fn test_sweep_reports_multiple_rows_in_scan_order() {
        let mut grid = Grid::new(3, 5);
        for x in 0..3 {
            grid.set(x, 2, Some(PieceKind::I));
            grid.set(x, 4, Some(PieceKind::I));
        }

        let cleared = grid.sweep_full_rows();
        assert_eq!(cleared, vec![2, 4]);
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn test_merge_writes_exactly_the_piece_cells() {
        let mut grid = Grid::new(10, 20);
        let mut piece = Piece::new(PieceKind::O, 4, 18);
        piece.deactivate();

        grid.merge(&piece);

        assert_eq!(grid.filled_count(), 4);
        assert_eq!(grid.get(4, 18), Some(Some(PieceKind::O)));
        assert_eq!(grid.get(5, 18), Some(Some(PieceKind::O)));
        assert_eq!(grid.get(4, 19), Some(Some(PieceKind::O)));
        assert_eq!(grid.get(5, 19), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_collides_at_bottom_boundary() {
        let grid = Grid::new(10, 20);

        // I piece resting on the floor: bottommost row index 19
        let piece = Piece::new(PieceKind::I, 0, 19);
        assert!(!grid.collides(&piece));

        // One row further is out of the grid
        let piece = Piece::new(PieceKind::I, 0, 20);
        assert!(grid.collides(&piece));
    }

    #[test]
    fn test_collides_with_settled_cells() {
        let mut grid = Grid::new(10, 20);
        grid.set(4, 10, Some(PieceKind::T));

        let piece = Piece::new(PieceKind::O, 4, 10);
        assert!(grid.collides(&piece));

        let piece = Piece::new(PieceKind::O, 6, 10);
        assert!(!grid.collides(&piece));
    }

    #[test]
    fn test_collides_checks_horizontal_bounds() {
        let grid = Grid::new(10, 20);

        let piece = Piece::new(PieceKind::I, 7, 0);
        assert!(grid.collides(&piece));

        let mut piece = Piece::new(PieceKind::I, 0, 0);
        piece.x = -1;
        assert!(grid.collides(&piece));
    }
}
