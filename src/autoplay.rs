//! Headless autoplayer.
//!
//! Picks a placement for the current piece (number of clockwise turns and a
//! target column) and turns it into the sequence of moves that gets it
//! there: rotate in place, shift column by column, hard drop. Candidates are
//! simulated on a copy of the board exactly as the engine would apply them,
//! so a plan only contains moves the engine accepts.

use crate::core::{Board, Piece};
use crate::types::{GameSnapshot, MoveType, BOARD_WIDTH};

/// Where to put the current piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Clockwise quarter turns, 0..=3
    pub rotations: u8,
    /// Column of the piece origin after shifting
    pub x: i8,
    /// Board evaluation after the drop (higher is better)
    pub score: i32,
}

/// Follow the rotate/shift/drop path; `None` if any step is blocked.
fn simulate(board: &Board, piece: Piece, rotations: u8, target_x: i8) -> Option<Piece> {
    let fits = |p: &Piece| board.fits(p);

    let mut p = piece;
    for _ in 0..rotations {
        let turned = p.rotated();
        if !fits(&turned) {
            return None;
        }
        p = turned;
    }

    while p.x != target_x {
        let step = if target_x > p.x { 1 } else { -1 };
        let shifted = p.shifted(step, 0);
        if !fits(&shifted) {
            return None;
        }
        p = shifted;
    }

    while fits(&p.shifted(0, 1)) {
        p = p.shifted(0, 1);
    }
    Some(p)
}

/// Column heights, holes and bumpiness folded into one number.
fn evaluate(board: &Board, cleared: usize) -> i32 {
    let width = BOARD_WIDTH as i8;
    let height = board.height() as i8;

    let mut heights = [0i32; BOARD_WIDTH as usize];
    let mut holes = 0i32;
    for x in 0..width {
        let mut seen_top = false;
        for y in 0..height {
            if board.is_occupied(x, y) {
                if !seen_top {
                    heights[x as usize] = (height - y) as i32;
                    seen_top = true;
                }
            } else if seen_top {
                holes += 1;
            }
        }
    }

    let aggregate: i32 = heights.iter().sum();
    let bumpiness: i32 = heights.windows(2).map(|w| (w[0] - w[1]).abs()).sum();

    76 * cleared as i32 - 51 * aggregate - 36 * holes - 18 * bumpiness
}

/// Best reachable placement for the snapshot's current piece
pub fn best_placement(snapshot: &GameSnapshot) -> Option<Placement> {
    if !snapshot.playable() {
        return None;
    }
    let piece: Piece = snapshot.current_piece?.into();
    let board = Board::from_grid(&snapshot.board);

    let mut best: Option<Placement> = None;
    for rotations in 0..4u8 {
        for x in 0..BOARD_WIDTH as i8 {
            let Some(landed) = simulate(&board, piece, rotations, x) else {
                continue;
            };

            let mut after = board.clone();
            after.lock(&landed);
            let cleared = after.clear_full_rows();
            let score = evaluate(&after, cleared);

            if best.map_or(true, |b| score > b.score) {
                best = Some(Placement { rotations, x, score });
            }
        }
    }
    best
}

/// Moves that carry out `placement`, ending with a hard drop
pub fn plan_moves(snapshot: &GameSnapshot, placement: Placement) -> Vec<MoveType> {
    let Some(piece) = snapshot.current_piece else {
        return Vec::new();
    };

    let mut moves = vec![MoveType::Rotate; placement.rotations as usize];
    let shift = placement.x - piece.x;
    let step = if shift > 0 {
        MoveType::MoveRight
    } else {
        MoveType::MoveLeft
    };
    moves.extend(std::iter::repeat(step).take(shift.unsigned_abs() as usize));
    moves.push(MoveType::HardDrop);
    moves
}
