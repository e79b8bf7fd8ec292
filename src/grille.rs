//! Rotating-grille transposition cipher.
//!
//! A 4x4 stencil with 4 holes is laid over a 4x4 grid. Letters are written
//! through the holes, the stencil is turned 90° clockwise, and the next 4
//! letters are written, until all 16 cells of the block are filled. The
//! ciphertext is the grid read row by row.
//!
//! The order in which cells are uncovered (the [`WriteOrder`]) depends only
//! on the grille, so it is derived once and reused for every block. Encryption
//! and decryption are exact inverses as long as the write order is a
//! permutation of the 16 cells, which [`Grille::new`] enforces.

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{CipherLabError, CipherLabResult};

/// Side length of the grille and of each block grid.
pub const GRILLE_SIZE: usize = 4;

/// Number of characters in one block (one full grid).
pub const BLOCK_SIZE: usize = GRILLE_SIZE * GRILLE_SIZE;

/// Number of holes uncovered by each rotation.
pub const HOLES_PER_ROTATION: usize = 4;

/// Number of 90° positions the grille is used in.
pub const ROTATIONS: usize = 4;

/// Filler appended to the final plaintext block.
pub const PAD_CHAR: char = 'X';

/// A position in a 4x4 grid. Ordering is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Creates a cell at `(row, col)`.
    pub const fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    /// Position of the cell when the grid is read row by row.
    pub const fn row_major_index(self) -> usize {
        self.row * GRILLE_SIZE + self.col
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Rotates a 4x4 matrix 90° clockwise: `new[c][3 - r] = old[r][c]`.
///
/// This is the only rotation used in the crate; grilles and write orders are
/// both derived through it.
pub fn rotate_clockwise<T: Copy + Default>(
    matrix: &[[T; GRILLE_SIZE]; GRILLE_SIZE],
) -> [[T; GRILLE_SIZE]; GRILLE_SIZE] {
    let mut rotated = [[T::default(); GRILLE_SIZE]; GRILLE_SIZE];
    for (r, row) in matrix.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            rotated[c][GRILLE_SIZE - 1 - r] = value;
        }
    }
    rotated
}

/// A 4x4 stencil whose holes, over 4 rotations, uncover every cell once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grille {
    holes: [[bool; GRILLE_SIZE]; GRILLE_SIZE],
}

impl Grille {
    /// The classroom grille:
    ///
    /// ```text
    /// X . . .
    /// . . . X
    /// . . X .
    /// . X . .
    /// ```
    pub const METHODOLOGY: Grille = Grille {
        holes: [
            [true, false, false, false],
            [false, false, false, true],
            [false, false, true, false],
            [false, true, false, false],
        ],
    };

    /// Creates a grille from a hole matrix (`true` = hole).
    ///
    /// # Errors
    /// Returns [`CipherLabError::InvalidGrille`] unless the matrix has exactly
    /// 4 holes and its 4 rotations uncover each of the 16 cells exactly once.
    ///
    /// # Examples
    ///
    /// ```
    /// use cipherlab::grille::Grille;
    ///
    /// let corners = [
    ///     [true, false, false, false],
    ///     [false, false, false, false],
    ///     [false, false, false, false],
    ///     [false, false, false, true],
    /// ];
    /// assert!(Grille::new(corners).is_err());
    /// ```
    pub fn new(holes: [[bool; GRILLE_SIZE]; GRILLE_SIZE]) -> CipherLabResult<Self> {
        let count = holes.iter().flatten().filter(|&&hole| hole).count();
        if count != HOLES_PER_ROTATION {
            return Err(CipherLabError::InvalidGrille);
        }
        let grille = Grille { holes };
        if !grille.write_order().is_permutation() {
            return Err(CipherLabError::InvalidGrille);
        }
        Ok(grille)
    }

    /// Creates a grille with holes at the given cells.
    ///
    /// # Errors
    /// Returns [`CipherLabError::InvalidGrille`] if a cell is outside the
    /// grid or the holes do not form a valid grille (see [`Grille::new`]).
    pub fn from_cells(cells: &[Cell]) -> CipherLabResult<Self> {
        let mut holes = [[false; GRILLE_SIZE]; GRILLE_SIZE];
        for cell in cells {
            if cell.row >= GRILLE_SIZE || cell.col >= GRILLE_SIZE || holes[cell.row][cell.col] {
                return Err(CipherLabError::InvalidGrille);
            }
            holes[cell.row][cell.col] = true;
        }
        Self::new(holes)
    }

    /// Hole cells in row-major order.
    pub fn holes(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(HOLES_PER_ROTATION);
        for (r, row) in self.holes.iter().enumerate() {
            for (c, &hole) in row.iter().enumerate() {
                if hole {
                    cells.push(Cell::new(r, c));
                }
            }
        }
        cells
    }

    /// Returns a copy turned 90° clockwise. The template is never modified.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Grille {
        Grille {
            holes: rotate_clockwise(&self.holes),
        }
    }

    /// Derives the write order: the holes of each of the 4 rotations,
    /// row-major within a rotation.
    pub fn write_order(&self) -> WriteOrder {
        let mut cells = [Cell::new(0, 0); BLOCK_SIZE];
        let mut k = 0;
        let mut current = *self;
        for _ in 0..ROTATIONS {
            // `holes()` is already row-major
            for cell in current.holes() {
                if k < BLOCK_SIZE {
                    cells[k] = cell;
                    k += 1;
                }
            }
            current = current.rotated_clockwise();
        }
        WriteOrder { cells }
    }
}

impl Default for Grille {
    fn default() -> Self {
        Grille::METHODOLOGY
    }
}

impl fmt::Display for Grille {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.holes.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let line: Vec<&str> = row.iter().map(|&h| if h { "X" } else { "." }).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// The 16 cells of a block in the order letters are written through the grille.
///
/// Cells `4r..4r + 4` are the holes exposed by rotation `r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WriteOrder {
    cells: [Cell; BLOCK_SIZE],
}

impl WriteOrder {
    /// All 16 cells in write order.
    pub fn cells(&self) -> &[Cell; BLOCK_SIZE] {
        &self.cells
    }

    /// The cell that receives the `k`-th character of a block.
    pub fn cell(&self, k: usize) -> Cell {
        self.cells[k % BLOCK_SIZE]
    }

    /// Rotation during which the `k`-th character of a block is written.
    pub const fn rotation_of(k: usize) -> usize {
        (k % BLOCK_SIZE) / HOLES_PER_ROTATION
    }

    /// The 4 cells exposed by `rotation` (0..=3).
    pub fn rotation_holes(&self, rotation: usize) -> [Cell; HOLES_PER_ROTATION] {
        let start = (rotation % ROTATIONS) * HOLES_PER_ROTATION;
        let mut holes = [Cell::new(0, 0); HOLES_PER_ROTATION];
        holes.copy_from_slice(&self.cells[start..start + HOLES_PER_ROTATION]);
        holes
    }

    /// Iterates the cells in write order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// `true` when every cell of the 4x4 grid appears exactly once.
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; BLOCK_SIZE];
        for cell in &self.cells {
            if cell.row >= GRILLE_SIZE || cell.col >= GRILLE_SIZE {
                return false;
            }
            let index = cell.row_major_index();
            if seen[index] {
                return false;
            }
            seen[index] = true;
        }
        true
    }
}

impl<'a> IntoIterator for &'a WriteOrder {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Contents of one 4x4 block. Cells are empty until written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Grid {
    cells: [[Option<char>; GRILLE_SIZE]; GRILLE_SIZE],
}

impl Grid {
    /// An empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills the grid row by row from `chars`. Cells past the end stay empty.
    pub fn fill_row_major(chars: &[char]) -> Self {
        let mut grid = Grid::new();
        for (index, &ch) in chars.iter().take(BLOCK_SIZE).enumerate() {
            grid.cells[index / GRILLE_SIZE][index % GRILLE_SIZE] = Some(ch);
        }
        grid
    }

    /// Character at `cell`, if written. Cells outside the grid read as empty.
    pub fn get(&self, cell: Cell) -> Option<char> {
        self.cells.get(cell.row)?.get(cell.col).copied().flatten()
    }

    /// Writes `ch` at `cell`. Only called with cells from a validated
    /// [`WriteOrder`].
    pub(crate) fn set(&mut self, cell: Cell, ch: char) {
        self.cells[cell.row][cell.col] = Some(ch);
    }

    /// Written characters read row by row; empty cells are skipped.
    pub fn row_major(&self) -> impl Iterator<Item = char> + '_ {
        self.cells.iter().flatten().flatten().copied()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell.unwrap_or('.'))?;
            }
        }
        Ok(())
    }
}

/// Right-pads `chars` with [`PAD_CHAR`] to a multiple of [`BLOCK_SIZE`].
pub fn pad_to_blocks(chars: &[char]) -> Vec<char> {
    let mut padded = chars.to_vec();
    let remainder = padded.len() % BLOCK_SIZE;
    if remainder != 0 {
        padded.resize(padded.len() + BLOCK_SIZE - remainder, PAD_CHAR);
    }
    padded
}

/// Grille cipher with its write order derived once.
///
/// # Examples
///
/// ```
/// use cipherlab::grille::{GrilleCipher, Grille};
///
/// let cipher = GrilleCipher::new(&Grille::METHODOLOGY);
/// let ciphertext = cipher.encrypt("ABCDEFGHIJKLMNOP");
/// assert_eq!(ciphertext, "AMIEFJNBKGCOPDHL");
/// assert_eq!(cipher.decrypt(&ciphertext), "ABCDEFGHIJKLMNOP");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrilleCipher {
    order: WriteOrder,
}

impl Default for GrilleCipher {
    fn default() -> Self {
        Self::new(&Grille::METHODOLOGY)
    }
}

impl GrilleCipher {
    /// Creates a cipher for `grille`.
    pub fn new(grille: &Grille) -> Self {
        GrilleCipher {
            order: grille.write_order(),
        }
    }

    /// The write order used for every block.
    pub fn write_order(&self) -> &WriteOrder {
        &self.order
    }

    /// Encrypts `plaintext` block by block.
    ///
    /// The final block is padded with [`PAD_CHAR`]; empty input gives empty
    /// output. Characters are transposed as given, so callers normally pass
    /// normalized text.
    pub fn encrypt(&self, plaintext: &str) -> String {
        let padded = pad_to_blocks(&plaintext.chars().collect::<Vec<_>>());
        debug!(
            chars = padded.len(),
            blocks = padded.len() / BLOCK_SIZE,
            "grille encrypt"
        );
        let mut out = String::with_capacity(padded.len());
        for (index, block) in padded.chunks(BLOCK_SIZE).enumerate() {
            let grid = self.write_block(block, |_, _, _| {});
            trace!(block = index, "grille block written");
            out.extend(grid.row_major());
        }
        out
    }

    /// Decrypts `ciphertext` block by block.
    ///
    /// Padding is kept. If the last block is short, its missing cells stay
    /// empty and are skipped, so the output is as long as the input.
    pub fn decrypt(&self, ciphertext: &str) -> String {
        let chars: Vec<char> = ciphertext.chars().collect();
        debug!(
            chars = chars.len(),
            aligned = chars.len().is_multiple_of(BLOCK_SIZE),
            "grille decrypt"
        );
        let mut out = String::with_capacity(ciphertext.len());
        for (index, block) in chars.chunks(BLOCK_SIZE).enumerate() {
            let grid = Grid::fill_row_major(block);
            out.push_str(&self.read_block(&grid, |_, _, _, _| {}));
            trace!(block = index, "grille block read");
        }
        out
    }

    /// Writes one block through the grille, calling `observe` after each
    /// placement with the position in the block, the cell and the grid so far.
    pub(crate) fn write_block(
        &self,
        block: &[char],
        mut observe: impl FnMut(usize, Cell, &Grid),
    ) -> Grid {
        let mut grid = Grid::new();
        for (k, (&cell, &ch)) in self.order.iter().zip(block).enumerate() {
            grid.set(cell, ch);
            observe(k, cell, &grid);
        }
        grid
    }

    /// Reads one block in write order, calling `observe` after each read with
    /// the position in the block, the cell, its content and the text read so far.
    pub(crate) fn read_block(
        &self,
        grid: &Grid,
        mut observe: impl FnMut(usize, Cell, Option<char>, &str),
    ) -> String {
        let mut out = String::with_capacity(BLOCK_SIZE);
        for (k, &cell) in self.order.iter().enumerate() {
            let ch = grid.get(cell);
            if let Some(ch) = ch {
                out.push(ch);
            }
            observe(k, cell, ch, &out);
        }
        out
    }
}

/// Builds the write order of `grille`.
pub fn build_write_order(grille: &Grille) -> WriteOrder {
    grille.write_order()
}

/// Encrypts `plaintext` with `grille`. See [`GrilleCipher::encrypt`].
pub fn encrypt(plaintext: &str, grille: &Grille) -> String {
    GrilleCipher::new(grille).encrypt(plaintext)
}

/// Decrypts `ciphertext` with `grille`. See [`GrilleCipher::decrypt`].
pub fn decrypt(ciphertext: &str, grille: &Grille) -> String {
    GrilleCipher::new(grille).decrypt(ciphertext)
}
