use std::{fmt, iter};

use serde::{Deserialize, Serialize};

use super::{BOARD_HEIGHT, BOARD_WIDTH, piece::PieceMask};

// Full row (all playable cells occupied)
const FULL_ROW_MASK: u16 = (1 << BOARD_WIDTH) - 1;

const FILLED_CHAR: char = '#';
const EMPTY_CHAR: char = '.';

/// Single row of the grid.
///
/// Stores one row as a 16-bit mask where bit `x` is column `x`. Bits above
/// [`BOARD_WIDTH`] are never set, so a row can only hold 0/1 cells.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridRow {
    bits: u16,
}

impl GridRow {
    pub const EMPTY: Self = Self { bits: 0 };
    pub const FULL: Self = Self {
        bits: FULL_ROW_MASK,
    };

    /// Checks if every cell of the row is occupied.
    #[inline]
    #[must_use]
    pub fn is_filled(self) -> bool {
        self.bits == FULL_ROW_MASK
    }

    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Checks if the cell at column `x` is occupied.
    #[inline]
    #[must_use]
    pub fn is_cell_occupied(self, x: usize) -> bool {
        (self.bits & (1 << x)) != 0
    }

    /// Number of occupied cells in the row.
    #[inline]
    #[must_use]
    pub fn occupied_count(self) -> usize {
        self.bits.count_ones() as usize
    }

    #[inline]
    fn is_any_cell_occupied(self, x0: usize, mask: u16) -> bool {
        (self.bits & (mask << x0)) != 0
    }

    #[inline]
    fn occupy_cells(&mut self, x0: usize, mask: u16) {
        self.bits |= mask << x0;
    }

    #[inline]
    fn vacate_cells(&mut self, x0: usize, mask: u16) {
        self.bits &= !(mask << x0);
    }

    /// Iterates over the cells of the row from left to right.
    pub fn iter_cells(self) -> impl Iterator<Item = bool> {
        (0..BOARD_WIDTH).map(move |x| self.is_cell_occupied(x))
    }

    fn parse(s: &str) -> Result<Self, String> {
        let width = s.chars().count();
        if width != BOARD_WIDTH {
            return Err(format!(
                "row must have exactly {BOARD_WIDTH} cells, got {width} in '{s}'"
            ));
        }
        let mut row = Self::EMPTY;
        for (x, ch) in s.chars().enumerate() {
            match ch {
                FILLED_CHAR => row.occupy_cells(x, 0b1),
                EMPTY_CHAR => {}
                _ => return Err(format!("invalid cell character '{ch}' in row '{s}'")),
            }
        }
        Ok(row)
    }
}

impl fmt::Display for GridRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for occupied in self.iter_cells() {
            let ch = if occupied { FILLED_CHAR } else { EMPTY_CHAR };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

/// Binary occupancy grid of the playing field.
///
/// Row 0 is the top of the board and row 19 the bottom; column 0 is the left
/// edge. Pieces are written with [`fill_mask`](Self::fill_mask) and taken back
/// out with [`remove_mask`](Self::remove_mask), which is an exact undo as long
/// as the mask did not collide when it was filled.
///
/// # Example
///
/// ```
/// use ctet_engine::{Grid, PieceKind, RotationState};
///
/// let mut grid = Grid::EMPTY;
/// let mask = PieceKind::O.mask(RotationState::SPAWN).unwrap();
/// assert!(!grid.is_colliding(mask, 18, 0));
///
/// grid.fill_mask(mask, 18, 0);
/// assert!(grid.is_occupied(19, 1));
///
/// grid.remove_mask(mask, 18, 0);
/// assert_eq!(grid, Grid::EMPTY);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: [GridRow; BOARD_HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: ["..........", ..., "####.#####"] (top row first)
        serializer.collect_seq(self.rows.iter().map(ToString::to_string))
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let lines = Vec::<String>::deserialize(deserializer)?;
        if lines.len() != BOARD_HEIGHT {
            return Err(serde::de::Error::custom(format!(
                "expected {BOARD_HEIGHT} rows, got {}",
                lines.len()
            )));
        }

        let mut grid = Self::EMPTY;
        for (y, line) in lines.iter().enumerate() {
            grid.rows[y] = GridRow::parse(line)
                .map_err(|e| serde::de::Error::custom(format!("row {y}: {e}")))?;
        }
        Ok(grid)
    }
}

impl Grid {
    pub const HEIGHT: usize = BOARD_HEIGHT;
    pub const WIDTH: usize = BOARD_WIDTH;

    pub const EMPTY: Self = Self {
        rows: [GridRow::EMPTY; BOARD_HEIGHT],
    };

    #[must_use]
    pub const fn from_rows(rows: [GridRow; BOARD_HEIGHT]) -> Self {
        Self { rows }
    }

    /// Builds a grid from row-major cell values (`BOARD_HEIGHT * BOARD_WIDTH` of them).
    ///
    /// Returns `None` if the iterator does not yield exactly 200 cells.
    pub fn from_cells<I>(cells: I) -> Option<Self>
    where
        I: IntoIterator<Item = bool>,
    {
        let mut grid = Self::EMPTY;
        let mut count = 0;
        for (i, filled) in cells.into_iter().enumerate() {
            if i >= BOARD_HEIGHT * BOARD_WIDTH {
                return None;
            }
            if filled {
                grid.rows[i / BOARD_WIDTH].occupy_cells(i % BOARD_WIDTH, 0b1);
            }
            count += 1;
        }
        (count == BOARD_HEIGHT * BOARD_WIDTH).then_some(grid)
    }

    #[must_use]
    pub fn row(&self, y: usize) -> GridRow {
        self.rows[y]
    }

    pub fn rows(&self) -> impl DoubleEndedIterator<Item = GridRow> + ExactSizeIterator + '_ {
        self.rows.iter().copied()
    }

    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = bool> + '_ {
        self.rows().flat_map(GridRow::iter_cells)
    }

    /// Iterates over the cells of column `x` from top to bottom.
    pub fn column(&self, x: usize) -> impl Iterator<Item = bool> + '_ {
        self.rows().map(move |row| row.is_cell_occupied(x))
    }

    #[must_use]
    pub fn is_occupied(&self, y: usize, x: usize) -> bool {
        self.rows[y].is_cell_occupied(x)
    }

    pub fn set_cell(&mut self, y: usize, x: usize, filled: bool) {
        if filled {
            self.rows[y].occupy_cells(x, 0b1);
        } else {
            self.rows[y].vacate_cells(x, 0b1);
        }
    }

    /// Checks if `mask` placed with its top-left cell at (`top_row`, `column`)
    /// overlaps an occupied cell.
    ///
    /// The mask must fit inside the grid at that position.
    #[must_use]
    pub fn is_colliding(&self, mask: &PieceMask, top_row: usize, column: usize) -> bool {
        iter::zip(mask.row_bits(), &self.rows[top_row..])
            .any(|(bits, row)| row.is_any_cell_occupied(column, bits))
    }

    /// Sets the cells covered by `mask` at (`top_row`, `column`).
    pub fn fill_mask(&mut self, mask: &PieceMask, top_row: usize, column: usize) {
        for (bits, row) in iter::zip(mask.row_bits(), &mut self.rows[top_row..]) {
            row.occupy_cells(column, bits);
        }
    }

    /// Clears the cells covered by `mask` at (`top_row`, `column`).
    ///
    /// Undoes a preceding [`fill_mask`](Self::fill_mask) at the same position.
    pub fn remove_mask(&mut self, mask: &PieceMask, top_row: usize, column: usize) {
        for (bits, row) in iter::zip(mask.row_bits(), &mut self.rows[top_row..]) {
            row.vacate_cells(column, bits);
        }
    }

    /// Creates a `Grid` from ASCII art for testing.
    ///
    /// `'#'` is an occupied cell and `'.'` an empty one. Each line must have
    /// exactly 10 cells; up to 20 lines are accepted and they are aligned to
    /// the bottom of the board, so short fixtures describe the stack only.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert!(
            lines.len() <= BOARD_HEIGHT,
            "at most {BOARD_HEIGHT} rows allowed, got {}",
            lines.len()
        );

        let mut grid = Self::EMPTY;
        let offset = BOARD_HEIGHT - lines.len();
        for (y, line) in lines.iter().enumerate() {
            grid.rows[offset + y] = GridRow::parse(line).unwrap_or_else(|e| panic!("{e}"));
        }
        grid
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "|----TETRIS--BOARD----|")?;
        for row in &self.rows {
            write!(f, "|")?;
            for occupied in row.iter_cells() {
                write!(f, "{}", if occupied { " #" } else { "  " })?;
            }
            writeln!(f, " |")?;
        }
        write!(f, "|---------------------|")
    }
}
