//! Pure measurements over a [`Grid`].
//!
//! None of these functions mutate their input. They are the building blocks
//! of [`Board::update`](super::Board::update) and of placement scoring.
//!
//! # Row and height conventions
//!
//! Row indices grow downward (row 0 is the top). A column's *first filled
//! row* is the index of its topmost occupied cell, or [`BOARD_HEIGHT`] for an
//! empty column. A column's *height* is `BOARD_HEIGHT - first_filled_row`, so
//! an empty column has height 0 and a full column height 20.

use std::iter;

use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    grid::{Grid, GridRow},
};

/// Counts fully occupied rows in `from_row..BOARD_HEIGHT`.
///
/// `from_row` values past the bottom of the board yield 0.
#[must_use]
pub fn rows_cleared(grid: &Grid, from_row: usize) -> usize {
    grid.rows()
        .skip(from_row)
        .filter(|row| row.is_filled())
        .count()
}

/// Counts empty cells lying below the topmost occupied cell of their column.
#[must_use]
pub fn count_holes(grid: &Grid) -> usize {
    (0..BOARD_WIDTH)
        .map(|x| {
            let filled = grid.column(x).filter(|c| *c).count();
            if filled == 0 {
                return 0;
            }
            (BOARD_HEIGHT - first_filled_row(grid, x)) - filled
        })
        .sum()
}

/// Returns a copy of `grid` with every full row removed.
///
/// Remaining rows keep their relative order and sink to the bottom; the same
/// number of empty rows is inserted at the top. Rows are compacted bottom to
/// top, so adjacent full rows are all removed in a single pass.
#[must_use]
pub fn clear_filled_rows(grid: &Grid) -> Grid {
    let mut rows = [GridRow::EMPTY; BOARD_HEIGHT];
    let kept = grid.rows().rev().filter(|row| !row.is_filled());
    for (dst, row) in iter::zip(rows.iter_mut().rev(), kept) {
        *dst = row;
    }
    Grid::from_rows(rows)
}

/// Index of the topmost row containing any occupied cell, or
/// [`BOARD_HEIGHT`] if the grid is empty.
#[must_use]
pub fn max_filled_row(grid: &Grid) -> usize {
    grid.rows()
        .position(|row| !row.is_empty())
        .unwrap_or(BOARD_HEIGHT)
}

/// Depth of the shallowest column: the largest first-filled-row index over
/// all columns, where an empty column counts as [`BOARD_HEIGHT`].
///
/// Any empty column (and therefore an empty grid) yields [`BOARD_HEIGHT`].
#[must_use]
pub fn min_filled_row(grid: &Grid) -> usize {
    (0..BOARD_WIDTH)
        .map(|x| first_filled_row(grid, x))
        .max()
        .unwrap_or(BOARD_HEIGHT)
}

/// Sum of absolute height differences between the 9 pairs of adjacent columns.
#[must_use]
pub fn roughness(grid: &Grid) -> usize {
    column_heights(grid)
        .windows(2)
        .map(|pair| pair[0].abs_diff(pair[1]))
        .sum()
}

/// Index of the topmost occupied cell of column `x`, or [`BOARD_HEIGHT`].
#[must_use]
pub fn first_filled_row(grid: &Grid, x: usize) -> usize {
    grid.column(x).position(|c| c).unwrap_or(BOARD_HEIGHT)
}

/// Height of every column, left to right.
#[must_use]
pub fn column_heights(grid: &Grid) -> [usize; BOARD_WIDTH] {
    let mut heights = [0; BOARD_WIDTH];
    for (x, h) in heights.iter_mut().enumerate() {
        *h = BOARD_HEIGHT - first_filled_row(grid, x);
    }
    heights
}

/// Mean column height.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn average_height(grid: &Grid) -> f32 {
    column_heights(grid).iter().sum::<usize>() as f32 / BOARD_WIDTH as f32
}
