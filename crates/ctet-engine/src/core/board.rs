use super::{BOARD_HEIGHT, grid::Grid, metrics};

/// The committed playing field: a [`Grid`] plus derived metrics.
///
/// The metrics are only refreshed by [`update`](Self::update). Mutating the
/// grid (through [`set_cell`](Self::set_cell) or [`set_grid`](Self::set_grid))
/// leaves them stale until the owner calls `update`, so the values read back
/// always describe the last committed grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    max_filled_row: usize,
    min_filled_row: usize,
    hole_count: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grid: Grid::EMPTY,
            max_filled_row: BOARD_HEIGHT,
            min_filled_row: BOARD_HEIGHT,
            hole_count: 0,
        }
    }

    /// Creates a board from a grid with metrics already computed.
    #[must_use]
    pub fn from_grid(grid: Grid) -> Self {
        let mut board = Self {
            grid,
            ..Self::new()
        };
        board.update();
        board
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Sets one cell. Metrics are not recomputed.
    pub fn set_cell(&mut self, y: usize, x: usize, filled: bool) {
        self.grid.set_cell(y, x, filled);
    }

    /// Replaces the whole grid. Metrics are not recomputed.
    pub fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    /// Recomputes `max_filled_row`, `min_filled_row` and `hole_count` from the grid.
    pub fn update(&mut self) {
        self.max_filled_row = metrics::max_filled_row(&self.grid);
        self.min_filled_row = metrics::min_filled_row(&self.grid);
        self.hole_count = metrics::count_holes(&self.grid);
    }

    /// Topmost row containing any filled cell, or 20 if the board is empty.
    #[must_use]
    pub fn max_filled_row(&self) -> usize {
        self.max_filled_row
    }

    /// Depth of the shallowest column (see [`metrics::min_filled_row`]).
    #[must_use]
    pub fn min_filled_row(&self) -> usize {
        self.min_filled_row
    }

    #[must_use]
    pub fn hole_count(&self) -> usize {
        self.hole_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert_eq!(board.grid(), &Grid::EMPTY);
        assert_eq!(board.max_filled_row(), BOARD_HEIGHT);
        assert_eq!(board.min_filled_row(), BOARD_HEIGHT);
        assert_eq!(board.hole_count(), 0);
    }

    #[test]
    fn test_metrics_only_change_on_update() {
        let mut board = Board::new();
        board.set_cell(10, 0, true);

        // Stale until update
        assert_eq!(board.max_filled_row(), BOARD_HEIGHT);
        assert_eq!(board.hole_count(), 0);

        board.update();
        assert_eq!(board.max_filled_row(), 10);
        assert_eq!(board.min_filled_row(), BOARD_HEIGHT);
        assert_eq!(board.hole_count(), 9);
    }

    #[test]
    fn test_from_grid() {
        let grid = Grid::from_ascii(
            r"
            ..#.......
            ##########
            ",
        );
        let board = Board::from_grid(grid.clone());
        assert_eq!(board.grid(), &grid);
        assert_eq!(board.max_filled_row(), 18);
        assert_eq!(board.min_filled_row(), 19);
        assert_eq!(board.hole_count(), 0);
    }
}
