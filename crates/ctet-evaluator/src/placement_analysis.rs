//! Result of dropping one candidate placement on the working grid.
//!
//! A [`PlacementAnalysis`] records how many rows the placement completed and
//! wraps the post-clear grid in a [`BoardAnalysis`] for scoring. The working
//! grid is restored before the analysis is returned, so every candidate of a
//! search is measured against the same committed state.

use ctet_engine::{Grid, Placement, metrics};

use crate::board_analysis::BoardAnalysis;

#[derive(Debug)]
pub struct PlacementAnalysis {
    placement: Placement,
    cleared_lines: usize,
    board_analysis: BoardAnalysis,
}

impl PlacementAnalysis {
    /// Places `placement` on `working`, counts full rows from
    /// `scan_from_row` down, builds the cleared grid and undoes the placement.
    #[must_use]
    pub fn from_working_grid(working: &mut Grid, scan_from_row: usize, placement: Placement) -> Self {
        placement.place(working);
        let cleared_lines = metrics::rows_cleared(working, scan_from_row);
        let cleared = metrics::clear_filled_rows(working);
        placement.undo(working);

        Self {
            placement,
            cleared_lines,
            board_analysis: BoardAnalysis::from_grid(cleared),
        }
    }

    #[must_use]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    #[must_use]
    pub fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    #[must_use]
    pub fn board_analysis(&self) -> &BoardAnalysis {
        &self.board_analysis
    }

    /// Consumes the analysis, returning the post-clear grid.
    #[must_use]
    pub fn into_board(self) -> Grid {
        self.board_analysis.into_grid()
    }
}

#[cfg(test)]
mod tests {
    use ctet_engine::{PieceKind, RotationState};

    use super::*;

    #[test]
    fn test_clearing_placement() {
        let mut working = Grid::from_ascii(
            r"
            #####.####
            #####.####
            ",
        );
        let original = working.clone();
        let placement =
            Placement::drop_onto(&working, PieceKind::I, RotationState::new(1), 5, 18).unwrap();

        let analysis = PlacementAnalysis::from_working_grid(&mut working, 18, placement);
        assert_eq!(working, original);
        assert_eq!(analysis.cleared_lines(), 2);

        let expected = Grid::from_ascii(
            r"
            .....#....
            .....#....
            ",
        );
        assert_eq!(analysis.board_analysis().grid(), &expected);
        assert_eq!(analysis.into_board(), expected);
    }

    #[test]
    fn test_non_clearing_placement() {
        let mut working = Grid::EMPTY;
        let placement =
            Placement::drop_onto(&working, PieceKind::T, RotationState::SPAWN, 0, 20).unwrap();
        let analysis = PlacementAnalysis::from_working_grid(&mut working, 20, placement);

        assert_eq!(working, Grid::EMPTY);
        assert_eq!(analysis.cleared_lines(), 0);
        assert_eq!(analysis.board_analysis().max_filled_row(), 18);
        assert_eq!(analysis.board_analysis().hole_count(), 0);
        assert_eq!(analysis.placement().column(), 0);
    }
}
