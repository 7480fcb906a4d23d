use std::{cell::OnceCell, iter};

use stackfall_engine::Board;

/// Surface features of a board, computed on first use and cached.
#[derive(Debug)]
pub struct BoardAnalysis {
    board: Board,
    column_heights: OnceCell<[usize; Board::WIDTH]>,
    column_occupied_cells: OnceCell<[usize; Board::WIDTH]>,
    max_height: OnceCell<usize>,
    num_holes: OnceCell<usize>,
    bumpiness: OnceCell<usize>,
}

impl BoardAnalysis {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self {
            board: board.clone(),
            column_heights: OnceCell::new(),
            column_occupied_cells: OnceCell::new(),
            max_height: OnceCell::new(),
            num_holes: OnceCell::new(),
            bumpiness: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Height of every column: distance from its topmost occupied cell to the
    /// floor, 0 for an empty column.
    #[must_use]
    pub fn column_heights(&self) -> &[usize; Board::WIDTH] {
        self.column_heights
            .get_or_init(|| std::array::from_fn(|x| self.board.column_height(x)))
    }

    #[must_use]
    pub fn column_occupied_cells(&self) -> &[usize; Board::WIDTH] {
        self.column_occupied_cells.get_or_init(|| {
            let mut counts = [0; Board::WIDTH];
            for row in self.board.rows() {
                for (count, block) in iter::zip(&mut counts, row) {
                    if block.is_occupied() {
                        *count += 1;
                    }
                }
            }
            counts
        })
    }

    #[must_use]
    pub fn max_height(&self) -> usize {
        *self
            .max_height
            .get_or_init(|| self.column_heights().iter().copied().max().unwrap_or(0))
    }

    /// Number of empty cells with at least one occupied cell above them in
    /// the same column.
    #[must_use]
    pub fn num_holes(&self) -> usize {
        *self.num_holes.get_or_init(|| {
            iter::zip(self.column_heights(), self.column_occupied_cells())
                .map(|(h, occ)| h - occ)
                .sum()
        })
    }

    /// Sum of absolute height differences between adjacent columns.
    #[must_use]
    pub fn bumpiness(&self) -> usize {
        *self.bumpiness.get_or_init(|| {
            self.column_heights()
                .windows(2)
                .map(|w| w[0].abs_diff(w[1]))
                .sum()
        })
    }
}
