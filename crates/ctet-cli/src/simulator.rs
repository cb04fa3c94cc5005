use ctet_engine::{GameSnapshot, MoveSequence, PieceSeed, PlayStats, SelfPlayGame};

use crate::{schema::summary::GameEnd, sink::MoveSink, source::SnapshotSource};

/// Offline stand-in for the game window.
///
/// Serves snapshots of a [`SelfPlayGame`] and executes the move sequences it
/// receives as keystrokes, until the game tops out or the piece limit is
/// reached.
#[derive(Debug)]
pub struct Simulator {
    game: SelfPlayGame,
    max_pieces: usize,
    end: Option<GameEnd>,
}

impl Simulator {
    pub fn new(seed: PieceSeed, max_pieces: usize) -> Self {
        Self {
            game: SelfPlayGame::with_seed(seed),
            max_pieces,
            end: None,
        }
    }

    pub fn stats(&self) -> &PlayStats {
        self.game.stats()
    }

    pub fn end(&self) -> Option<GameEnd> {
        self.end
    }

    /// Ends the game early; the first reason recorded is kept.
    pub fn stop(&mut self, reason: GameEnd) {
        self.end.get_or_insert(reason);
    }
}

impl SnapshotSource for Simulator {
    fn next_snapshot(&mut self) -> anyhow::Result<Option<GameSnapshot>> {
        if self.end.is_none() && self.game.stats().completed_pieces >= self.max_pieces {
            self.stop(GameEnd::PieceLimit);
        }
        if self.end.is_some() {
            return Ok(None);
        }
        Ok(Some(self.game.snapshot()))
    }
}

impl MoveSink for Simulator {
    fn send(&mut self, moves: &MoveSequence) -> anyhow::Result<()> {
        match self.game.play_moves(moves) {
            Ok(cleared_lines) => {
                if cleared_lines > 0 {
                    tracing::debug!(cleared_lines, "lines cleared");
                }
            }
            Err(err) => {
                tracing::warn!(
                    %moves,
                    completed_pieces = self.game.stats().completed_pieces,
                    "game over: {err}"
                );
                self.stop(err.into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ctet_engine::{PieceKind, RotationState};

    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([3; 16]);

    #[test]
    fn test_piece_limit() {
        let mut simulator = Simulator::new(SEED, 2);
        for column in [0, 5] {
            let snapshot = simulator.next_snapshot().unwrap().unwrap();
            let kind = snapshot.active.unwrap();
            let moves = MoveSequence::from_decision(kind, RotationState::SPAWN, column, false);
            simulator.send(&moves).unwrap();
        }
        assert!(simulator.next_snapshot().unwrap().is_none());
        assert_eq!(simulator.end(), Some(GameEnd::PieceLimit));
        assert_eq!(simulator.stats().completed_pieces, 2);
    }

    #[test]
    fn test_top_out_ends_game() {
        let mut simulator = Simulator::new(SEED, usize::MAX);
        while let Some(snapshot) = simulator.next_snapshot().unwrap() {
            let kind = snapshot.active.unwrap_or(PieceKind::O);
            let moves = MoveSequence::from_decision(kind, RotationState::SPAWN, 0, false);
            simulator.send(&moves).unwrap();
        }
        assert!(matches!(
            simulator.end(),
            Some(GameEnd::NoRestingPosition | GameEnd::SpawnCollision)
        ));

        simulator.stop(GameEnd::NoLegalPlacement);
        assert_ne!(simulator.end(), Some(GameEnd::NoLegalPlacement));
    }
}
