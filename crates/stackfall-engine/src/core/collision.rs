use super::{board::Board, shape::Shape};

/// Returns whether `shape` placed with its top-left corner at `(x, y)` overlaps
/// the board's walls, its floor or an occupied cell.
///
/// Rows above the board (negative `y`) never collide with blocks, so pieces may
/// partially spawn above the visible area. The function is pure and may be
/// called with any hypothetical shape and position.
///
/// # Example
///
/// ```
/// use stackfall_engine::{Board, PieceKind, collides};
///
/// let board = Board::new();
/// let i = PieceKind::I.base_shape();
///
/// assert!(!collides(&board, &i, 0, 0));
/// assert!(collides(&board, &i, -1, 0));
/// assert!(collides(&board, &i, 7, 0));
/// assert!(!collides(&board, &i, 0, -3));
/// ```
#[must_use]
pub fn collides(board: &Board, shape: &Shape, x: i32, y: i32) -> bool {
    shape.occupied_cells().any(|(dx, dy)| {
        let Ok(col) = usize::try_from(x + dx) else {
            return true;
        };
        if col >= Board::WIDTH {
            return true;
        }
        let Ok(row) = usize::try_from(y + dy) else {
            return false;
        };
        row >= Board::HEIGHT || board.block(col, row).is_occupied()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{board::Block, piece::PieceKind};

    #[test]
    fn test_empty_board_inside_bounds() {
        let board = Board::new();
        for kind in PieceKind::ALL {
            let shape = kind.base_shape();
            assert!(!collides(&board, &shape, 0, 0), "{kind:?}");
        }
    }

    #[test]
    fn test_left_and_right_walls() {
        let board = Board::new();
        let o = PieceKind::O.base_shape();
        assert!(collides(&board, &o, -1, 5));
        assert!(!collides(&board, &o, 8, 5));
        assert!(collides(&board, &o, 9, 5));
    }

    #[test]
    fn test_floor() {
        let board = Board::new();
        let o = PieceKind::O.base_shape();
        assert!(!collides(&board, &o, 0, 18));
        assert!(collides(&board, &o, 0, 19));
    }

    #[test]
    fn test_rows_above_board_do_not_collide() {
        let mut board = Board::new();
        board.fill_row(0, Block::Piece(PieceKind::I));
        let vertical_i = PieceKind::I.base_shape().rotated_clockwise();
        // fully above the board
        assert!(!collides(&board, &vertical_i, 4, -4));
        // bottom cell reaches row 0
        assert!(collides(&board, &vertical_i, 4, -3));
    }

    #[test]
    fn test_overlap_with_locked_block() {
        let mut board = Board::new();
        board.set_block(5, 10, Block::Piece(PieceKind::Z));
        let t = PieceKind::T.base_shape();
        // T cells: (1,0), (0,1), (1,1), (2,1)
        assert!(collides(&board, &t, 4, 10));
        assert!(collides(&board, &t, 4, 9));
        assert!(!collides(&board, &t, 6, 9));
        assert!(!collides(&board, &t, 4, 8));
        // the empty top-left corner of the T matrix sits on the block
        assert!(!collides(&board, &t, 5, 10));
    }
}
