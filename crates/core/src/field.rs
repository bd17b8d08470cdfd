//! Field module - the 10x20 grid of locked cells
//!
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom).
//!
//! Collision has one deliberate asymmetry: cells above the field (y < 0) are
//! never "already locked", but they are still subject to the side walls.

use arrayvec::ArrayVec;

use crate::piece::ActivePiece;
use crate::types::{Cell, Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Number of columns as a `usize`
pub const FIELD_COLS: usize = BOARD_WIDTH as usize;

/// Number of rows as a `usize`
pub const FIELD_ROWS: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the field
const FIELD_SIZE: usize = FIELD_COLS * FIELD_ROWS;

/// Indices of rows removed by one clear, bottom to top
pub type ClearedRows = ArrayVec<usize, FIELD_ROWS>;

/// Row-major copy of the field, as handed to renderers
pub type FieldGrid = [[Cell; FIELD_COLS]; FIELD_ROWS];

/// The play field - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; FIELD_SIZE],
}

impl Field {
    /// Create a new empty field
    pub fn new() -> Self {
        Self {
            cells: [None; FIELD_SIZE],
        }
    }

    /// Build a field from text rows aligned to the bottom of the field
    ///
    /// `.` is empty, a piece letter (`I`, `O`, `T`, `S`, `Z`, `J`, `L`) locks
    /// a cell in that piece's color, and any other character locks a gray
    /// cell. Extra rows beyond the field height and extra columns are ignored.
    ///
    /// ```
    /// use blockfall_core::Field;
    ///
    /// let field = Field::from_rows(&["#########.", "IIIIIIIIII"]);
    /// assert!(field.is_row_full(19));
    /// assert!(!field.is_row_full(18));
    /// assert!(field.is_occupied(0, 18));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut field = Self::new();
        let skip = rows.len().saturating_sub(FIELD_ROWS);
        let top = FIELD_ROWS - (rows.len() - skip);
        for (i, row) in rows.iter().skip(skip).enumerate() {
            let y = (top + i) as i8;
            for (x, ch) in row.chars().take(FIELD_COLS).enumerate() {
                let cell = match ch {
                    '.' => None,
                    other => Some(
                        PieceKind::from_str(&other.to_string())
                            .map(|kind| kind.color())
                            .unwrap_or(Color::GRAY),
                    ),
                };
                field.set(x as i8, y, cell);
            }
        }
        field
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * FIELD_COLS + (x as usize))
    }

    /// Get width of the field
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the field
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and locked
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Cells of one row, left to right
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= FIELD_ROWS {
            return None;
        }
        let start = y * FIELD_COLS;
        Some(&self.cells[start..start + FIELD_COLS])
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(FIELD_COLS)
    }

    /// Whether `piece` may not occupy its position
    ///
    /// True iff any covered cell is left or right of the field, below it, or
    /// (when inside the field) already locked.
    pub fn collides(&self, piece: &ActivePiece) -> bool {
        piece.cells().iter().any(|&(x, y)| {
            x < 0
                || x >= BOARD_WIDTH as i8
                || y >= BOARD_HEIGHT as i8
                || (y >= 0 && self.is_occupied(x, y))
        })
    }

    /// Write the piece's color into every covered in-field cell
    ///
    /// Cells above the field are dropped. Returns the number of cells written.
    pub fn lock(&mut self, piece: &ActivePiece) -> usize {
        piece
            .cells()
            .iter()
            .filter(|&&(x, y)| self.set(x, y, Some(piece.color)))
            .count()
    }

    /// Clear all full rows and return the row indices that were cleared (bottom to top)
    ///
    /// Surviving rows keep their relative order and settle at the bottom; the
    /// same number of empty rows appear at the top. Two-pointer compaction,
    /// no allocation.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let mut write_y = FIELD_ROWS;

        // Scan from bottom to top
        for read_y in (0..FIELD_ROWS).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * FIELD_COLS;
                    let dst_start = write_y * FIELD_COLS;
                    self.cells
                        .copy_within(src_start..src_start + FIELD_COLS, dst_start);
                }
            }
        }

        // Everything above the last written row is vacated
        self.cells[..write_y * FIELD_COLS].fill(None);

        cleared_rows
    }

    /// Clear all full rows and return how many were removed
    pub fn clear_full_lines(&mut self) -> usize {
        self.clear_full_rows().len()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the field into a row-major grid
    pub fn write_grid(&self, out: &mut FieldGrid) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}
