/// Occupancy matrix of a piece in one rotation.
///
/// A shape is a rectangular 0/1 matrix of at most 4×4 cells, packed into a
/// 16-bit mask (row-major, 4 bits per row). Shapes are plain `Copy` values:
/// rotating returns a new shape and never touches the original, so a falling
/// piece can never alias the catalog template it was created from.
///
/// # Example
///
/// ```
/// use stackfall_engine::Shape;
///
/// let t = Shape::from_rows([[0, 1, 0], [1, 1, 1]]);
/// let rotated = t.rotated_clockwise();
///
/// assert_eq!(rotated, Shape::from_rows([[1, 0], [1, 1], [1, 0]]));
/// assert_eq!((rotated.width(), rotated.height()), (2, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    mask: u16,
}

const ROW_BITS: usize = 4;

impl Shape {
    /// Largest width or height a shape can have.
    pub const MAX_SIZE: usize = 4;

    /// Builds a shape from rows of 0/1 values (any non-zero value is occupied).
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or larger than [`Self::MAX_SIZE`].
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W > 0 && W <= Self::MAX_SIZE);
        assert!(H > 0 && H <= Self::MAX_SIZE);
        let mut mask = 0;
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                if rows[y][x] != 0 {
                    mask |= 1 << (y * ROW_BITS + x);
                }
                x += 1;
            }
            y += 1;
        }
        Self {
            width: W as u8,
            height: H as u8,
            mask,
        }
    }

    #[must_use]
    pub const fn width(self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub const fn height(self) -> usize {
        self.height as usize
    }

    /// Returns whether the cell at column `dx`, row `dy` of the matrix is occupied.
    ///
    /// Cells outside the matrix are never occupied.
    #[must_use]
    pub const fn is_occupied(self, dx: usize, dy: usize) -> bool {
        dx < self.width() && dy < self.height() && self.mask & (1 << (dy * ROW_BITS + dx)) != 0
    }

    /// Number of occupied cells (4 for every tetromino).
    #[must_use]
    pub const fn cell_count(self) -> u32 {
        self.mask.count_ones()
    }

    /// Returns the occupied cells as `(dx, dy)` offsets from the top-left corner.
    pub fn occupied_cells(self) -> impl Iterator<Item = (i32, i32)> {
        (0..self.height).flat_map(move |dy| {
            (0..self.width)
                .filter(move |&dx| self.is_occupied(usize::from(dx), usize::from(dy)))
                .map(move |dx| (i32::from(dx), i32::from(dy)))
        })
    }

    /// Rotates the matrix 90° clockwise (transpose, then reverse each row).
    ///
    /// The result is `height × width` of the original.
    #[must_use]
    pub const fn rotated_clockwise(self) -> Self {
        let (w, h) = (self.width(), self.height());
        let mut mask = 0;
        let mut y = 0;
        while y < w {
            let mut x = 0;
            while x < h {
                if self.is_occupied(y, h - 1 - x) {
                    mask |= 1 << (y * ROW_BITS + x);
                }
                x += 1;
            }
            y += 1;
        }
        Self {
            width: self.height,
            height: self.width,
            mask,
        }
    }

    /// Applies [`Self::rotated_clockwise`] `count` times.
    #[must_use]
    pub const fn rotated_clockwise_n(self, count: u8) -> Self {
        let mut shape = self;
        let mut i = 0;
        while i < count % 4 {
            shape = shape.rotated_clockwise();
            i += 1;
        }
        shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_dimensions() {
        let i = Shape::from_rows([[1, 1, 1, 1]]);
        assert_eq!(i.width(), 4);
        assert_eq!(i.height(), 1);
        assert_eq!(i.cell_count(), 4);

        let s = Shape::from_rows([[0, 1, 1], [1, 1, 0]]);
        assert!(!s.is_occupied(0, 0));
        assert!(s.is_occupied(1, 0));
        assert!(s.is_occupied(0, 1));
        assert!(!s.is_occupied(2, 1));
        // outside the matrix
        assert!(!s.is_occupied(3, 0));
        assert!(!s.is_occupied(0, 2));
    }

    #[test]
    fn test_occupied_cells_row_major() {
        let j = Shape::from_rows([[1, 0, 0], [1, 1, 1]]);
        let cells: Vec<_> = j.occupied_cells().collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_rotate_i_becomes_vertical() {
        let i = Shape::from_rows([[1, 1, 1, 1]]);
        let rotated = i.rotated_clockwise();
        assert_eq!(rotated, Shape::from_rows([[1], [1], [1], [1]]));
    }

    #[test]
    fn test_rotate_l_clockwise() {
        let l = Shape::from_rows([[0, 0, 1], [1, 1, 1]]);
        assert_eq!(
            l.rotated_clockwise(),
            Shape::from_rows([[1, 0], [1, 0], [1, 1]])
        );
    }

    #[test]
    fn test_rotation_is_four_cycle() {
        let shapes = [
            Shape::from_rows([[1, 1, 1, 1]]),
            Shape::from_rows([[1, 1], [1, 1]]),
            Shape::from_rows([[0, 1, 0], [1, 1, 1]]),
            Shape::from_rows([[0, 1, 1], [1, 1, 0]]),
            Shape::from_rows([[1, 1, 0], [0, 1, 1]]),
            Shape::from_rows([[1, 0, 0], [1, 1, 1]]),
            Shape::from_rows([[0, 0, 1], [1, 1, 1]]),
        ];
        for shape in shapes {
            let half = shape.rotated_clockwise().rotated_clockwise();
            assert_eq!(half.rotated_clockwise().rotated_clockwise(), shape);
            assert_eq!(shape.rotated_clockwise_n(4), shape);
            assert_eq!(shape.rotated_clockwise_n(2), half);
            assert_eq!(half.cell_count(), shape.cell_count());
        }
    }

    #[test]
    fn test_rotation_leaves_original_untouched() {
        let t = Shape::from_rows([[0, 1, 0], [1, 1, 1]]);
        let copy = t;
        let _rotated = t.rotated_clockwise();
        assert_eq!(t, copy);
    }
}
