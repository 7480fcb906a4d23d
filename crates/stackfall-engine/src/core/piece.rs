use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{board::Board, shape::Shape};

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// Every piece kind, in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Returns the spawn orientation of this piece.
    #[must_use]
    pub const fn base_shape(self) -> Shape {
        BASE_SHAPES[self as usize]
    }

    /// Returns the display color of this piece.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            PieceKind::I => Color::rgb(0x00, 0xf0, 0xf0),
            PieceKind::O => Color::rgb(0xf0, 0xf0, 0x00),
            PieceKind::T => Color::rgb(0xa0, 0x00, 0xf0),
            PieceKind::S => Color::rgb(0x00, 0xf0, 0x00),
            PieceKind::Z => Color::rgb(0xf0, 0x00, 0x00),
            PieceKind::J => Color::rgb(0x00, 0x00, 0xf0),
            PieceKind::L => Color::rgb(0xf0, 0xa0, 0x00),
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

const BASE_SHAPES: [Shape; PieceKind::LEN] = [
    // I-piece
    Shape::from_rows([[1, 1, 1, 1]]),
    // O-piece
    Shape::from_rows([[1, 1], [1, 1]]),
    // T-piece
    Shape::from_rows([[0, 1, 0], [1, 1, 1]]),
    // S-piece
    Shape::from_rows([[0, 1, 1], [1, 1, 0]]),
    // Z-piece
    Shape::from_rows([[1, 1, 0], [0, 1, 1]]),
    // J-piece
    Shape::from_rows([[1, 0, 0], [1, 1, 1]]),
    // L-piece
    Shape::from_rows([[0, 0, 1], [1, 1, 1]]),
];

/// 24-bit RGB color of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The piece currently under player control.
///
/// Position is the top-left corner of the shape's matrix in board coordinates.
/// `y` may be negative while part of the piece is still above the board.
/// Like [`Shape`], falling pieces are immutable values: movement and rotation
/// return new pieces, and the session decides whether to keep them.
///
/// # Example
///
/// ```
/// use stackfall_engine::{FallingPiece, PieceKind};
///
/// let piece = FallingPiece::spawn(PieceKind::I);
/// assert_eq!((piece.x(), piece.y()), (3, 0));
///
/// let moved = piece.shifted(-1, 0);
/// assert_eq!(moved.x(), 2);
/// assert_eq!(piece.x(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallingPiece {
    kind: PieceKind,
    shape: Shape,
    x: i32,
    y: i32,
}

impl FallingPiece {
    /// Creates a piece of `kind` in its base orientation at the spawn position.
    #[must_use]
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = kind.base_shape();
        Self::new(kind, shape, Self::spawn_x(shape), 0)
    }

    #[must_use]
    pub const fn new(kind: PieceKind, shape: Shape, x: i32, y: i32) -> Self {
        Self { kind, shape, x, y }
    }

    /// Horizontal anchor that centers `shape` on the board.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn spawn_x(shape: Shape) -> i32 {
        (Board::WIDTH / 2) as i32 - (shape.width() / 2) as i32
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    #[must_use]
    pub const fn rotated_clockwise(&self) -> Self {
        Self {
            shape: self.shape.rotated_clockwise(),
            ..*self
        }
    }

    /// Returns the absolute board coordinates of the occupied cells.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let (x, y) = (self.x, self.y);
        self.shape
            .occupied_cells()
            .map(move |(dx, dy)| (x + dx, y + dy))
    }
}
