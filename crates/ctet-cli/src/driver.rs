//! The per-cycle control loop shared by `decide` and `simulate`.
//!
//! One cycle: apply the captured snapshot, search, emit the input sequence,
//! commit the winning board, and append the committed state to the debug log.

use ctet_engine::{GameField, GameSnapshot};
use ctet_evaluator::turn_evaluator::{TurnEvaluator, TurnPlan};

use crate::{record::DebugLogWriter, sink::MoveSink, source::SnapshotSource};

#[derive(Debug)]
pub struct Driver<'a> {
    evaluator: TurnEvaluator<'a>,
    field: GameField,
    log: Option<DebugLogWriter>,
}

impl<'a> Driver<'a> {
    pub fn new(evaluator: TurnEvaluator<'a>, log: Option<DebugLogWriter>) -> Self {
        Self {
            evaluator,
            field: GameField::new(),
            log,
        }
    }

    pub fn run_cycle<S>(&mut self, snapshot: &GameSnapshot, sink: &mut S) -> anyhow::Result<TurnPlan>
    where
        S: MoveSink + ?Sized,
    {
        self.field.apply_snapshot(snapshot);
        let plan = self.evaluator.play_turn(&mut self.field)?;
        sink.send(&plan.move_sequence())?;
        if let Some(log) = &mut self.log {
            log.write(self.field.snapshot())?;
        }
        Ok(plan)
    }

    /// Runs cycles until `source` is exhausted, returning the number of
    /// decisions made.
    pub fn run<S>(&mut self, source: &mut dyn SnapshotSource, sink: &mut S) -> anyhow::Result<usize>
    where
        S: MoveSink + ?Sized,
    {
        let mut cycles = 0;
        while let Some(snapshot) = source.next_snapshot()? {
            self.run_cycle(&snapshot, sink)?;
            cycles += 1;
        }
        Ok(cycles)
    }

    pub fn finish(self) -> anyhow::Result<()> {
        if let Some(log) = self.log {
            log.finish()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ctet_engine::{Grid, MoveSequence, PieceKind, PieceQueue};
    use ctet_evaluator::placement_evaluator::HeuristicPlacementEvaluator;

    use super::*;

    struct Snapshots(Vec<GameSnapshot>);

    impl SnapshotSource for Snapshots {
        fn next_snapshot(&mut self) -> anyhow::Result<Option<GameSnapshot>> {
            Ok((!self.0.is_empty()).then(|| self.0.remove(0)))
        }
    }

    fn driver() -> Driver<'static> {
        Driver::new(
            TurnEvaluator::new(Box::new(HeuristicPlacementEvaluator::default())),
            None,
        )
    }

    #[test]
    fn test_one_sequence_per_snapshot() {
        let mut source = Snapshots(vec![
            GameSnapshot {
                active: Some(PieceKind::O),
                ..GameSnapshot::default()
            },
            GameSnapshot {
                board: Grid::from_ascii("#####.####"),
                active: Some(PieceKind::I),
                ..GameSnapshot::default()
            },
        ]);
        let mut sink: Vec<MoveSequence> = Vec::new();
        let cycles = driver().run(&mut source, &mut sink).unwrap();

        assert_eq!(cycles, 2);
        let moves: Vec<_> = sink.iter().map(ToString::to_string).collect();
        assert_eq!(moves, ["aaaaw", "jdw"]);
    }

    #[test]
    fn test_search_failure_is_an_error() {
        let mut driver = driver();
        let snapshot = GameSnapshot {
            board: Grid::from_ascii(&"#########.\n".repeat(20)),
            active: Some(PieceKind::O),
            held: None,
            queue: PieceQueue::UNKNOWN,
        };
        let mut sink: Vec<MoveSequence> = Vec::new();
        let err = driver.run_cycle(&snapshot, &mut sink).unwrap_err();
        assert!(err.downcast_ref::<ctet_evaluator::SearchError>().is_some());
        assert!(sink.is_empty());
    }
}
