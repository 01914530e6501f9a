//! Piece module - tetromino shape state and rotation
//!
//! A piece owns its shape matrix (the minimal bounding box for its current
//! orientation), its position in board coordinates, and its active flag.
//! It has no knowledge of the board: legality of any mutation is decided by
//! `core::game`, which applies tentative changes and reverts them on
//! rejection.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Shape matrix: row-major boolean bounding box, at most 4x4.
/// Row and column counts swap on rotation (the I piece is 1x4 / 4x1).
pub type ShapeMatrix = ArrayVec<ArrayVec<bool, 4>, 4>;

fn shape_from_rows(rows: &[&[u8]]) -> ShapeMatrix {
    rows.iter()
        .map(|row| row.iter().map(|&cell| cell != 0).collect())
        .collect()
}

/// Canonical spawn-orientation layout for a piece kind
pub fn canonical_shape(kind: PieceKind) -> ShapeMatrix {
    match kind {
        PieceKind::I => shape_from_rows(&[&[1, 1, 1, 1]]),
        PieceKind::O => shape_from_rows(&[&[1, 1], &[1, 1]]),
        PieceKind::T => shape_from_rows(&[&[1, 1, 1], &[0, 1, 0]]),
        PieceKind::S => shape_from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
        PieceKind::Z => shape_from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
        PieceKind::J => shape_from_rows(&[&[1, 0, 0], &[1, 1, 1]]),
        PieceKind::L => shape_from_rows(&[&[0, 0, 1], &[1, 1, 1]]),
    }
}

/// A falling (or queued) tetromino
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    shape: ShapeMatrix,
    /// Shape-matrix origin in board coordinates. Directly settable: the
    /// caller applies tentative translations and reverts them itself.
    pub x: i8,
    pub y: i8,
    active: bool,
}

impl Piece {
    /// Create a piece of the given kind at the given origin
    pub fn new(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            shape: canonical_shape(kind),
            x,
            y,
            active: true,
        }
    }

    pub fn shape(&self) -> &ShapeMatrix {
        &self.shape
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark the piece as landed. Idempotent; a deactivated piece is
    /// discarded after its cells are merged into the grid.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Rotate the shape matrix 90 degrees clockwise.
    /// Geometric only: bounds and collisions are the caller's problem, and
    /// the caller must be prepared to revert.
    pub fn rotate_cw(&mut self) {
        let rows = self.shape.len();
        let cols = self.shape[0].len();
        let mut rotated = ShapeMatrix::new();
        for r in 0..cols {
            let mut row = ArrayVec::new();
            for c in 0..rows {
                row.push(self.shape[rows - 1 - c][r]);
            }
            rotated.push(row);
        }
        self.shape = rotated;
    }

    /// Rotate the shape matrix 90 degrees anticlockwise
    pub fn rotate_ccw(&mut self) {
        let rows = self.shape.len();
        let cols = self.shape[0].len();
        let mut rotated = ShapeMatrix::new();
        for r in 0..cols {
            let mut row = ArrayVec::new();
            for c in 0..rows {
                row.push(self.shape[c][cols - 1 - r]);
            }
            rotated.push(row);
        }
        self.shape = rotated;
    }

    /// One past the rightmost occupied column, in board coordinates
    pub fn rightmost_x(&self) -> i8 {
        let mut rightmost = 0;
        for row in &self.shape {
            for (cx, &filled) in row.iter().enumerate() {
                if filled {
                    rightmost = rightmost.max(cx as i8 + 1);
                }
            }
        }
        self.x + rightmost
    }

    /// One past the bottommost occupied row, in board coordinates
    pub fn bottommost_y(&self) -> i8 {
        let mut bottommost = 0;
        for (ry, row) in self.shape.iter().enumerate() {
            if row.iter().any(|&filled| filled) {
                bottommost = ry as i8 + 1;
            }
        }
        self.y + bottommost
    }

    /// Offsets of every occupied cell relative to the piece origin
    pub fn cell_offsets(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape.iter().enumerate().flat_map(|(ry, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &filled)| filled)
                .map(move |(cx, _)| (cx as i8, ry as i8))
        })
    }

    /// Number of occupied cells (always 4 for the canonical shapes)
    pub fn occupied_count(&self) -> usize {
        self.cell_offsets().count()
    }
}
