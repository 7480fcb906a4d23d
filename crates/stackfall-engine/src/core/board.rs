use std::{fmt, str::FromStr};

use super::piece::{FallingPiece, PieceKind};

const WIDTH: usize = 10;
const HEIGHT: usize = 20;

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// Unoccupied cell.
    #[default]
    Empty,
    /// Cell locked by a piece; the kind carries the cell's color.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    #[must_use]
    pub fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    fn as_char(self) -> char {
        match self {
            Block::Empty => '.',
            Block::Piece(kind) => kind.as_char(),
        }
    }
}

type BoardRow = [Block; WIDTH];

const EMPTY_ROW: BoardRow = [Block::Empty; WIDTH];

/// The playfield: a fixed 10×20 grid of [`Block`]s.
///
/// Row 0 is the top of the board and row 19 the bottom. The grid is a
/// fixed-size array, so its dimensions cannot change after creation.
///
/// # Text form
///
/// `Board` implements [`Display`](fmt::Display) and [`FromStr`] using one line
/// per row, `.` for empty cells and the piece letter for occupied ones. When
/// parsing, fewer than 20 lines may be given; they are aligned to the bottom of
/// the board.
///
/// ```
/// use stackfall_engine::Board;
///
/// let mut board: Board = "IIIIIIIIII\nOO.OOOOOOO".parse().unwrap();
/// assert_eq!(board.clear_lines(), 1);
/// assert!(board.is_occupied(0, 19));
/// assert!(!board.is_occupied(2, 19));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = WIDTH;
    pub const HEIGHT: usize = HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; HEIGHT],
    };

    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Returns the block at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the board.
    #[must_use]
    pub fn block(&self, x: usize, y: usize) -> Block {
        self.rows[y][x]
    }

    pub fn set_block(&mut self, x: usize, y: usize, block: Block) {
        self.rows[y][x] = block;
    }

    /// Fills every cell of row `y` with `block`.
    pub fn fill_row(&mut self, y: usize, block: Block) {
        self.rows[y] = [block; WIDTH];
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Block; WIDTH]> {
        self.rows.iter()
    }

    /// Returns whether the cell at signed coordinates is occupied.
    ///
    /// Coordinates outside the grid (including rows above it) are never occupied.
    #[must_use]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        cell_index(x, y).is_some_and(|(x, y)| self.rows[y][x].is_occupied())
    }

    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows[y].iter().all(|b| b.is_occupied())
    }

    /// Returns whether `piece` overlaps a wall, the floor or a locked block.
    #[must_use]
    pub fn is_colliding(&self, piece: &FallingPiece) -> bool {
        super::collision::collides(self, &piece.shape(), piece.x(), piece.y())
    }

    /// Writes the piece's cells into the board.
    ///
    /// Cells above the top of the board (negative rows) are dropped.
    pub fn fill_piece(&mut self, piece: &FallingPiece) {
        self.fill_piece_as(piece, Block::Piece(piece.kind()));
    }

    /// Like [`Self::fill_piece`], but writes `block` instead of the piece's own block.
    pub fn fill_piece_as(&mut self, piece: &FallingPiece, block: Block) {
        for (x, y) in piece.occupied_positions() {
            if let Some((x, y)) = cell_index(x, y) {
                self.rows[y][x] = block;
            }
        }
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows are scanned bottom-to-top. Remaining rows keep their relative order
    /// and one empty row is inserted at the top for each removed row.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..HEIGHT).rev() {
            if self.is_row_full(y) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(EMPTY_ROW);
        count
    }

    /// Height of column `x`: distance from its topmost occupied cell to the
    /// bottom of the board, or 0 if the column is empty.
    #[must_use]
    pub fn column_height(&self, x: usize) -> usize {
        self.rows
            .iter()
            .position(|row| row[x].is_occupied())
            .map_or(0, |top| HEIGHT - top)
    }
}

fn cell_index(x: i32, y: i32) -> Option<(usize, usize)> {
    let x = usize::try_from(x).ok().filter(|&x| x < WIDTH)?;
    let y = usize::try_from(y).ok().filter(|&y| y < HEIGHT)?;
    Some((x, y))
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for block in row {
                write!(f, "{}", block.as_char())?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("board has {_0} rows, at most {HEIGHT} allowed")]
    TooManyRows(#[error(not(source))] usize),
    #[display("row {row} has {width} cells, expected {WIDTH}")]
    RowWidth { row: usize, width: usize },
    #[display("invalid cell {cell:?} in row {row}")]
    InvalidCell { row: usize, cell: char },
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if lines.len() > HEIGHT {
            return Err(ParseBoardError::TooManyRows(lines.len()));
        }

        let mut board = Self::EMPTY;
        let offset = HEIGHT - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != WIDTH {
                return Err(ParseBoardError::RowWidth { row: i, width });
            }
            for (x, cell) in line.chars().enumerate() {
                board.rows[offset + i][x] = match cell {
                    '.' => Block::Empty,
                    c => Block::Piece(
                        PieceKind::from_char(c)
                            .ok_or(ParseBoardError::InvalidCell { row: i, cell: c })?,
                    ),
                };
            }
        }
        Ok(board)
    }
}
