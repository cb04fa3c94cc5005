use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    grid::Grid,
    piece::{PieceKind, PieceMask, RotationState},
};

/// Vertical extent of a mask resting on the stack.
///
/// `bottom_row` is exclusive: the mask covers rows `top_row..bottom_row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RestingPosition {
    pub top_row: usize,
    pub bottom_row: usize,
}

/// A piece mask at its resting position in a specific column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    kind: PieceKind,
    rotation: RotationState,
    mask: &'static PieceMask,
    column: usize,
    position: RestingPosition,
}

impl Placement {
    /// Drops `kind` in `rotation` at `column` onto `grid`.
    ///
    /// Returns `None` if the rotation state is invalid for the kind or if
    /// [`find_resting_row`] finds no resting position.
    #[must_use]
    pub fn drop_onto(
        grid: &Grid,
        kind: PieceKind,
        rotation: RotationState,
        column: usize,
        start_row: usize,
    ) -> Option<Self> {
        let mask = kind.mask(rotation)?;
        let position = find_resting_row(grid, mask, start_row, column)?;
        Some(Self {
            kind,
            rotation,
            mask,
            column,
            position,
        })
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    #[must_use]
    pub fn mask(&self) -> &'static PieceMask {
        self.mask
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub fn position(&self) -> RestingPosition {
        self.position
    }

    /// Writes the piece cells into `grid`.
    pub fn place(&self, grid: &mut Grid) {
        grid.fill_mask(self.mask, self.position.top_row, self.column);
    }

    /// Removes the piece cells from `grid`, undoing [`place`](Self::place).
    pub fn undo(&self, grid: &mut Grid) {
        grid.remove_mask(self.mask, self.position.top_row, self.column);
    }
}

/// Finds the lowest resting position of `mask` dropped straight down in `column`.
///
/// Top-row offsets are scanned from `start_row - height` (clamped at 0)
/// through `BOARD_HEIGHT - height`. The scan stops at the first offset where
/// the mask overlaps the grid and answers the offset before it. Callers pass
/// the board's topmost filled row as `start_row`, so the scan starts just
/// above the stack.
///
/// Returns `None` if the mask does not fit horizontally at `column` or if it
/// already overlaps the grid at the first scanned offset.
///
/// # Examples
///
/// ```
/// use ctet_engine::{Grid, PieceKind, RotationState, find_resting_row};
///
/// let grid = Grid::EMPTY;
/// let mask = PieceKind::O.mask(RotationState::SPAWN).unwrap();
/// let position = find_resting_row(&grid, mask, 20, 0).unwrap();
/// assert_eq!((position.top_row, position.bottom_row), (18, 20));
///
/// // Sticks out past the right wall
/// assert!(find_resting_row(&grid, mask, 20, 9).is_none());
/// ```
#[must_use]
pub fn find_resting_row(
    grid: &Grid,
    mask: &PieceMask,
    start_row: usize,
    column: usize,
) -> Option<RestingPosition> {
    let height = mask.height();
    if column + mask.width() > BOARD_WIDTH {
        return None;
    }

    let first = start_row.saturating_sub(height);
    let last = BOARD_HEIGHT - height;
    let mut resting = None;
    for top_row in first..=last {
        if grid.is_colliding(mask, top_row, column) {
            break;
        }
        resting = Some(top_row);
    }

    resting.map(|top_row| RestingPosition {
        top_row,
        bottom_row: top_row + height,
    })
}
