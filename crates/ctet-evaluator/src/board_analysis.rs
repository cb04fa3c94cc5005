//! Lazily computed metrics of a single grid.
//!
//! [`BoardAnalysis`] owns a grid and computes each metric on first access,
//! so a placement evaluator that only reads four metrics never pays for the
//! rest (column heights, average height) that the `evaluate` report prints.

use std::cell::OnceCell;

use ctet_engine::{BOARD_WIDTH, Grid, metrics};

#[derive(Debug)]
pub struct BoardAnalysis {
    grid: Grid,
    max_filled_row: OnceCell<usize>,
    min_filled_row: OnceCell<usize>,
    hole_count: OnceCell<usize>,
    roughness: OnceCell<usize>,
    column_heights: OnceCell<[usize; BOARD_WIDTH]>,
}

impl BoardAnalysis {
    #[must_use]
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            grid,
            max_filled_row: OnceCell::new(),
            min_filled_row: OnceCell::new(),
            hole_count: OnceCell::new(),
            roughness: OnceCell::new(),
            column_heights: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    #[must_use]
    pub fn max_filled_row(&self) -> usize {
        *self
            .max_filled_row
            .get_or_init(|| metrics::max_filled_row(&self.grid))
    }

    #[must_use]
    pub fn min_filled_row(&self) -> usize {
        *self
            .min_filled_row
            .get_or_init(|| metrics::min_filled_row(&self.grid))
    }

    /// `min_filled_row - max_filled_row`: how far the shallowest column sits
    /// below the tallest one.
    #[must_use]
    pub fn height_differential(&self) -> usize {
        self.min_filled_row() - self.max_filled_row()
    }

    #[must_use]
    pub fn hole_count(&self) -> usize {
        *self
            .hole_count
            .get_or_init(|| metrics::count_holes(&self.grid))
    }

    #[must_use]
    pub fn roughness(&self) -> usize {
        *self.roughness.get_or_init(|| {
            self.column_heights()
                .windows(2)
                .map(|pair| pair[0].abs_diff(pair[1]))
                .sum()
        })
    }

    #[must_use]
    pub fn column_heights(&self) -> &[usize; BOARD_WIDTH] {
        self.column_heights
            .get_or_init(|| metrics::column_heights(&self.grid))
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn average_height(&self) -> f32 {
        self.column_heights().iter().sum::<usize>() as f32 / BOARD_WIDTH as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_metrics_library() {
        let grid = Grid::from_ascii(
            r"
            .#........
            .#..##....
            ##.#.#...#
            #..#.##..#
            ",
        );
        let analysis = BoardAnalysis::from_grid(grid.clone());
        assert_eq!(analysis.max_filled_row(), metrics::max_filled_row(&grid));
        assert_eq!(analysis.min_filled_row(), metrics::min_filled_row(&grid));
        assert_eq!(analysis.hole_count(), metrics::count_holes(&grid));
        assert_eq!(analysis.roughness(), metrics::roughness(&grid));
        assert!((analysis.average_height() - metrics::average_height(&grid)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_height_differential() {
        let analysis = BoardAnalysis::from_grid(Grid::EMPTY);
        assert_eq!(analysis.height_differential(), 0);

        let analysis = BoardAnalysis::from_grid(Grid::from_ascii(
            r"
            #.........
            #.........
            ##########
            ",
        ));
        // Tallest column starts at row 17, shallowest at row 19
        assert_eq!(analysis.height_differential(), 2);
    }
}
