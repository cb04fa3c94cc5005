use std::io::Write as _;

use anyhow::Context;
use ctet_engine::MoveSequence;

use crate::util::Output;

/// Receives the input sequence chosen for each cycle.
pub trait MoveSink {
    fn send(&mut self, moves: &MoveSequence) -> anyhow::Result<()>;
}

impl<T> MoveSink for &mut T
where
    T: MoveSink + ?Sized,
{
    fn send(&mut self, moves: &MoveSequence) -> anyhow::Result<()> {
        (**self).send(moves)
    }
}

impl<T> MoveSink for Option<T>
where
    T: MoveSink,
{
    fn send(&mut self, moves: &MoveSequence) -> anyhow::Result<()> {
        match self {
            Some(sink) => sink.send(moves),
            None => Ok(()),
        }
    }
}

/// Sends to both sinks, the first one first.
impl<A, B> MoveSink for (A, B)
where
    A: MoveSink,
    B: MoveSink,
{
    fn send(&mut self, moves: &MoveSequence) -> anyhow::Result<()> {
        self.0.send(moves)?;
        self.1.send(moves)
    }
}

/// One sequence per line, flushed immediately so a reader on the other end
/// of a pipe sees each decision as soon as it is made.
impl MoveSink for Output {
    fn send(&mut self, moves: &MoveSequence) -> anyhow::Result<()> {
        writeln!(self, "{moves}")
            .and_then(|()| self.flush())
            .with_context(|| format!("Failed to write moves to {}", self.display_path()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use ctet_engine::{PieceKind, RotationState};

    use super::*;

    /// Collects sequences in memory.
    impl MoveSink for Vec<MoveSequence> {
        fn send(&mut self, moves: &MoveSequence) -> anyhow::Result<()> {
            self.push(moves.clone());
            Ok(())
        }
    }

    #[test]
    fn test_pair_and_option_forward() {
        let moves = MoveSequence::from_decision(PieceKind::O, RotationState::SPAWN, 0, false);
        let mut first = Vec::new();
        let mut second = Vec::new();
        (&mut first, Some(&mut second)).send(&moves).unwrap();
        (&mut first, None::<&mut Vec<MoveSequence>>).send(&moves).unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(second, vec![moves]);
    }
}
