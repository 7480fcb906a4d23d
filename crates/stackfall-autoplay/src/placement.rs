//! Candidate placements and drop simulation.

use std::iter;

use arrayvec::ArrayVec;
use serde::Serialize;
use stackfall_engine::{Board, FallingPiece};

/// Number of distinct clockwise rotation counts tried per piece.
pub const ROTATION_COUNT: usize = 4;

/// Where to put the falling piece: rotate clockwise `rotation` times from its
/// current orientation, then move its anchor to column `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Placement {
    pub rotation: u8,
    pub x: i32,
}

impl Placement {
    /// Placement used when no candidate fits: unrotated, anchored at the
    /// board's center column.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const FALLBACK: Self = Self {
        rotation: 0,
        x: (Board::WIDTH / 2) as i32,
    };
}

/// The piece in each of its four rotations, in rotation-count order.
#[must_use]
pub fn rotations(piece: &FallingPiece) -> ArrayVec<FallingPiece, ROTATION_COUNT> {
    iter::successors(Some(*piece), |p| Some(p.rotated_clockwise()))
        .take(ROTATION_COUNT)
        .collect()
}

/// Enumerates every placement of `piece` in rotation-then-x order.
///
/// Each candidate is the rotated piece anchored at row 0 and a column where
/// the rotated shape lies within the board's width.
pub fn candidates(piece: &FallingPiece) -> impl Iterator<Item = (Placement, FallingPiece)> + use<> {
    iter::zip(0.., rotations(piece)).flat_map(|(rotation, rotated)| {
        let max_x = Board::WIDTH - rotated.shape().width();
        (0..=max_x).map(move |x| {
            let x = i32::try_from(x).unwrap_or(i32::MAX);
            let candidate = FallingPiece::new(rotated.kind(), rotated.shape(), x, 0);
            (Placement { rotation, x }, candidate)
        })
    })
}

/// Row the piece comes to rest at when dropped straight down from its
/// current row, or `None` if it already collides there.
#[must_use]
pub fn landing_row(board: &Board, piece: &FallingPiece) -> Option<i32> {
    if board.is_colliding(piece) {
        return None;
    }
    let mut landed = *piece;
    loop {
        let next = landed.shifted(0, 1);
        if board.is_colliding(&next) {
            return Some(landed.y());
        }
        landed = next;
    }
}

/// Drops `piece` straight down on a copy of `board` and returns the result.
///
/// Returns `None` when the piece collides at its starting row. Full rows are
/// left in place; the simulated board is only used for scoring.
#[must_use]
pub fn simulate_drop(board: &Board, piece: &FallingPiece) -> Option<Board> {
    let y = landing_row(board, piece)?;
    let mut board = board.clone();
    board.fill_piece(&piece.shifted(0, y - piece.y()));
    Some(board)
}
