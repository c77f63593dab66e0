//! Shape module - binary shape matrices and rotation
//!
//! A shape is a small row-major matrix of occupied/empty flags. The seven
//! tetrominoes are stored in their spawn orientation; every other orientation
//! is produced by [`Shape::rotated`].

/// Largest supported matrix side (the I piece needs 4x4).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Binary shape matrix, `rows x cols`, at most 4x4.
///
/// `Copy`, so rotating or handing a shape to the next player never aliases the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

/// Build a square shape from a 0/1 matrix at compile time.
const fn matrix<const N: usize>(m: [[u8; N]; N]) -> Shape {
    let mut bits = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
    let mut r = 0;
    while r < N {
        let mut c = 0;
        while c < N {
            bits[r][c] = m[r][c] != 0;
            c += 1;
        }
        r += 1;
    }
    Shape {
        rows: N as u8,
        cols: N as u8,
        bits,
    }
}

const I_SHAPE: Shape = matrix([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]);
const O_SHAPE: Shape = matrix([[1, 1], [1, 1]]);
const T_SHAPE: Shape = matrix([[0, 0, 0], [1, 1, 1], [0, 1, 0]]);
const J_SHAPE: Shape = matrix([[0, 1, 0], [0, 1, 0], [1, 1, 0]]);
const L_SHAPE: Shape = matrix([[0, 1, 0], [0, 1, 0], [0, 1, 1]]);
const S_SHAPE: Shape = matrix([[0, 1, 1], [1, 1, 0], [0, 0, 0]]);
const Z_SHAPE: Shape = matrix([[1, 1, 0], [0, 1, 1], [0, 0, 0]]);

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// Returns `None` when the matrix is empty, ragged, or larger than 4x4.
    ///
    /// # Examples
    ///
    /// ```
    /// use dropstack_core::Shape;
    ///
    /// let bar = Shape::from_rows(&[[1u8, 1, 1]]).unwrap();
    /// assert_eq!((bar.rows(), bar.cols()), (1, 3));
    /// assert_eq!(bar.rotated().cols(), 1);
    ///
    /// assert!(Shape::from_rows(&[[1u8; 5]]).is_none());
    /// ```
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.as_ref().len();
        if height == 0 || width == 0 || height > MAX_SHAPE_SIZE || width > MAX_SHAPE_SIZE {
            return None;
        }

        let mut bits = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return None;
            }
            for (c, &v) in row.iter().enumerate() {
                bits[r][c] = v != 0;
            }
        }

        Some(Self {
            rows: height as u8,
            cols: width as u8,
            bits,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Whether the matrix cell at (row, col) is occupied; false outside the matrix.
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.bits[row][col]
    }

    /// Occupied cells as (row, col) offsets from the top-left anchor, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows()).flat_map(move |r| {
            (0..self.cols())
                .filter(move |&c| self.bits[r][c])
                .map(move |c| (r as i8, c as i8))
        })
    }

    /// Number of occupied cells
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// Rotate 90° clockwise: transpose, then reverse each row.
    ///
    /// A `rows x cols` shape becomes `cols x rows`.
    pub fn rotated(&self) -> Self {
        let rows = self.rows();
        let cols = self.cols();
        let mut bits = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, out_row) in bits.iter_mut().enumerate().take(cols) {
            for (c, out) in out_row.iter_mut().enumerate().take(rows) {
                // transpose: t[r][c] = bits[c][r]; reversed row: t[r][rows - 1 - c]
                *out = self.bits[rows - 1 - c][r];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }
}

/// The seven canonical tetrominoes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Spawn-orientation matrix
    pub fn shape(self) -> Shape {
        match self {
            ShapeKind::I => I_SHAPE,
            ShapeKind::O => O_SHAPE,
            ShapeKind::T => T_SHAPE,
            ShapeKind::J => J_SHAPE,
            ShapeKind::L => L_SHAPE,
            ShapeKind::S => S_SHAPE,
            ShapeKind::Z => Z_SHAPE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
        }
    }
}
