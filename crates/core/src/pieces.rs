//! Pieces module - the seven tetromino shapes and matrix rotation
//!
//! Every kind spawns with a fixed matrix. Rotation is a plain 90° clockwise
//! turn of that matrix with no wall kicks: if the turned matrix does not fit
//! at the current origin, the rotation is refused.

use arrayvec::ArrayVec;

use crate::rng::PieceSource;
use crate::types::{PieceKind, Shape, BOARD_WIDTH, MAX_SHAPE_SIZE};

const I_SHAPE: Shape = Shape::from_grid(1, 4, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]);
const O_SHAPE: Shape = Shape::from_grid(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const T_SHAPE: Shape = Shape::from_grid(2, 3, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const S_SHAPE: Shape = Shape::from_grid(2, 3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const Z_SHAPE: Shape = Shape::from_grid(2, 3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]);
const J_SHAPE: Shape = Shape::from_grid(2, 3, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const L_SHAPE: Shape = Shape::from_grid(2, 3, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);

/// Absolute board cells covered by a piece
pub type PieceCells = ArrayVec<(i8, i8), { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }>;

/// Spawn matrix for a piece kind
pub fn spawn_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

/// Column a shape spawns in: centred, rounding toward the left wall
pub fn spawn_x(shape: &Shape) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (shape.cols() / 2) as i8
}

/// Rotate a shape 90° clockwise.
///
/// `out[c][rows - 1 - r] = in[r][c]`; rows and columns swap and the input is
/// left untouched.
pub fn rotate(shape: &Shape) -> Shape {
    let rows = shape.rows() as usize;
    let cols = shape.cols() as usize;
    let mut out = Shape::blank(shape.cols(), shape.rows());
    for r in 0..rows {
        for c in 0..cols {
            if shape.is_filled(r, c) {
                out.set(c, rows - 1 - r, true);
            }
        }
    }
    out
}

/// A falling piece: kind, current matrix and the board position of its top-left cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece of `kind` at its spawn position
    pub fn new(kind: PieceKind) -> Self {
        let shape = spawn_shape(kind);
        Self {
            kind,
            shape,
            x: spawn_x(&shape),
            y: 0,
        }
    }

    /// Draw a kind from `source` and place it at the spawn position
    pub fn spawn(source: &mut PieceSource) -> Self {
        Self::new(source.draw())
    }

    /// Same piece shifted by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece, same origin, matrix turned clockwise
    pub fn rotated(&self) -> Self {
        Self {
            shape: rotate(&self.shape),
            ..*self
        }
    }

    /// Board coordinates of every filled cell (may include negative y)
    pub fn cells(&self) -> PieceCells {
        self.shape
            .filled_cells()
            .map(|(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
            .collect()
    }
}
