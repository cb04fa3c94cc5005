use serde::{Deserialize, Serialize};

use crate::{BOARD_HEIGHT, Grid, PieceKind, Placement, RotationState, TopOutError, core::metrics};

use super::{
    move_sequence::{MoveSequence, spawn_column},
    piece_generator::{PieceGenerator, PieceSeed},
    snapshot::GameSnapshot,
};

/// Counters for a self-played game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayStats {
    pub completed_pieces: usize,
    pub total_cleared_lines: usize,
    pub holds_used: usize,
    /// Drops by number of rows cleared at once (0 to 4).
    pub line_cleared_counter: [usize; 5],
}

impl PlayStats {
    fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }
    }
}

/// An offline game that stands in for the live game window.
///
/// Pieces come from a seeded [`PieceGenerator`], the visible queue is its
/// next five pieces, and decisions are executed exactly: the chosen piece is
/// dropped straight down in the chosen column and full rows are cleared.
#[derive(Debug, Clone)]
pub struct SelfPlayGame {
    generator: PieceGenerator,
    grid: Grid,
    active: PieceKind,
    held: Option<PieceKind>,
    stats: PlayStats,
}

impl SelfPlayGame {
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut generator = PieceGenerator::with_seed(seed);
        let active = generator.pop_next();
        Self {
            generator,
            grid: Grid::EMPTY,
            active,
            held: None,
            stats: PlayStats::default(),
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn stats(&self) -> &PlayStats {
        &self.stats
    }

    /// The state as the capture collaborator would report it.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.grid.clone(),
            active: Some(self.active),
            held: self.held,
            queue: self.generator.queue(),
        }
    }

    /// Executes one decision and spawns the next piece.
    ///
    /// Returns the number of rows cleared by the drop.
    ///
    /// # Errors
    ///
    /// Returns [`TopOutError`] if the piece cannot be dropped at the requested
    /// position or the next piece overlaps the stack at its spawn position.
    /// The game is over after either error.
    pub fn play_turn(
        &mut self,
        rotation: RotationState,
        column: usize,
        use_hold: bool,
    ) -> Result<usize, TopOutError> {
        if use_hold {
            self.hold();
        }
        self.drop_active(rotation, column)
    }

    /// Executes a move sequence the way the game would interpret its inputs.
    ///
    /// # Errors
    ///
    /// Same as [`play_turn`](Self::play_turn).
    pub fn play_moves(&mut self, moves: &MoveSequence) -> Result<usize, TopOutError> {
        if moves.uses_hold() {
            self.hold();
        }
        let (rotation, column) = moves.target(self.active);
        self.drop_active(rotation, column)
    }

    fn hold(&mut self) {
        let next = self
            .held
            .replace(self.active)
            .unwrap_or_else(|| self.generator.pop_next());
        self.active = next;
        self.stats.holds_used += 1;
    }

    fn drop_active(&mut self, rotation: RotationState, column: usize) -> Result<usize, TopOutError> {
        let start_row = metrics::max_filled_row(&self.grid);
        let placement = Placement::drop_onto(&self.grid, self.active, rotation, column, start_row)
            .ok_or(TopOutError::NoRestingPosition)?;
        placement.place(&mut self.grid);
        let cleared_lines = metrics::rows_cleared(&self.grid, 0);
        self.grid = metrics::clear_filled_rows(&self.grid);
        self.stats.complete_piece_drop(cleared_lines);

        self.active = self.generator.pop_next();
        let spawned_onto_stack = self
            .active
            .mask(RotationState::SPAWN)
            .is_some_and(|mask| self.grid.is_colliding(mask, 0, spawn_column(self.active)));
        if spawned_onto_stack {
            return Err(TopOutError::SpawnCollision);
        }
        Ok(cleared_lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([7; 16]);

    #[test]
    fn test_snapshot_matches_generator() {
        let game = SelfPlayGame::with_seed(SEED);
        let mut generator = PieceGenerator::with_seed(SEED);

        let snapshot = game.snapshot();
        assert_eq!(snapshot.active, Some(generator.pop_next()));
        assert_eq!(snapshot.held, None);
        assert_eq!(snapshot.queue, generator.queue());
        assert_eq!(snapshot.board, Grid::EMPTY);
    }

    #[test]
    fn test_play_turn_drops_piece() {
        let mut game = SelfPlayGame::with_seed(SEED);
        let kind = game.snapshot().active.unwrap();
        let height = kind.mask(RotationState::SPAWN).unwrap().height();
        let cleared = game.play_turn(RotationState::SPAWN, 0, false).unwrap();

        assert_eq!(cleared, 0);
        assert_eq!(game.grid().cells().filter(|c| *c).count(), 4);
        assert_eq!(metrics::max_filled_row(game.grid()), BOARD_HEIGHT - height);
        assert_eq!(game.stats().completed_pieces, 1);
    }

    #[test]
    fn test_hold_swaps_with_generator() {
        let mut game = SelfPlayGame::with_seed(SEED);
        let first = game.snapshot();
        game.play_turn(RotationState::SPAWN, 0, true).unwrap();

        let second = game.snapshot();
        assert_eq!(second.held, first.active);
        assert_eq!(game.stats().holds_used, 1);
        // The queue head was placed, so the active piece is the one after it
        assert_eq!(second.active, first.queue.slots()[1]);
    }

    #[test]
    fn test_play_moves_matches_play_turn() {
        let mut by_turn = SelfPlayGame::with_seed(SEED);
        let mut by_moves = SelfPlayGame::with_seed(SEED);
        for (rotation, column, use_hold) in [(0, 0, false), (1, 4, true), (0, 5, false)] {
            let rotation = RotationState::new(rotation);
            let kind = if use_hold {
                by_moves.snapshot().queue.head().unwrap()
            } else {
                by_moves.snapshot().active.unwrap()
            };
            let moves = MoveSequence::from_decision(kind, rotation, column, use_hold);
            assert_eq!(
                by_turn.play_turn(rotation, column, use_hold),
                by_moves.play_moves(&moves)
            );
            assert_eq!(by_turn.grid(), by_moves.grid());
        }
        assert_eq!(by_turn.stats(), by_moves.stats());
    }

    #[test]
    fn test_stacking_in_one_column_tops_out() {
        let mut game = SelfPlayGame::with_seed(SEED);
        let result =
            (0..100).try_for_each(|_| game.play_turn(RotationState::SPAWN, 0, false).map(|_| ()));
        assert!(result.is_err());
        assert!(game.stats().completed_pieces < 100);
    }
}
