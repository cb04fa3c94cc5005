use crate::{Board, Grid, PieceKind};

use super::snapshot::{GameSnapshot, PieceQueue};

/// Game state carried between decision cycles.
///
/// Holds the committed [`Board`] with its metrics, the active piece, the held
/// piece and the upcoming queue. A cycle starts with
/// [`apply_snapshot`](Self::apply_snapshot) (or not, when the caller trusts
/// the committed state) and ends with a single [`apply_turn`](Self::apply_turn)
/// transition.
#[derive(Debug, Clone, Default)]
pub struct GameField {
    board: Board,
    active: Option<PieceKind>,
    held: Option<PieceKind>,
    queue: PieceQueue,
}

impl GameField {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Self {
        let mut field = Self::new();
        field.apply_snapshot(snapshot);
        field
    }

    /// Overwrites the field with an observed snapshot and recomputes the
    /// board metrics.
    pub fn apply_snapshot(&mut self, snapshot: &GameSnapshot) {
        for (i, filled) in snapshot.board.cells().enumerate() {
            self.board.set_cell(i / Grid::WIDTH, i % Grid::WIDTH, filled);
        }
        self.board.update();
        self.active = snapshot.active;
        self.held = snapshot.held;
        self.queue = snapshot.queue;
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active(&self) -> Option<PieceKind> {
        self.active
    }

    #[must_use]
    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    #[must_use]
    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    /// The piece that would be placed if hold is used now: the held piece,
    /// or the queue head when nothing is held.
    #[must_use]
    pub fn hold_candidate(&self) -> Option<PieceKind> {
        self.held.or(self.queue.head())
    }

    /// Ends a cycle: applies the hold swap if `use_hold`, then commits
    /// `board_after` and recomputes the metrics.
    ///
    /// After the transition `active` is the piece that was placed.
    pub fn apply_turn(&mut self, use_hold: bool, board_after: Grid) {
        if use_hold {
            self.hold();
        }
        self.board.set_grid(board_after);
        self.board.update();
    }

    fn hold(&mut self) {
        let next = self.held.or_else(|| self.queue.pop_front());
        self.held = self.active;
        self.active = next;
    }

    /// Captures the current state as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.grid().clone(),
            active: self.active,
            held: self.held,
            queue: self.queue,
        }
    }
}
