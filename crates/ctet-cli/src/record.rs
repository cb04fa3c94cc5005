use std::{
    io::{self, Write as _},
    path::PathBuf,
};

use anyhow::Context;
use ctet_engine::{GameSnapshot, LogRecord};

use crate::util::Output;

/// Appends one [`LogRecord`] per completed cycle.
///
/// Sequence numbers start at 1 and count the records written by this writer.
#[derive(Debug)]
pub struct DebugLogWriter<W = Output> {
    writer: W,
    last_seq: u64,
}

impl DebugLogWriter {
    pub fn create(path: PathBuf) -> anyhow::Result<Self> {
        let output = Output::open(path)?;
        tracing::info!(path = %output.display_path(), "writing debug log");
        Ok(Self::new(output))
    }
}

impl<W> DebugLogWriter<W>
where
    W: io::Write,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_seq: 0,
        }
    }

    pub fn write(&mut self, snapshot: GameSnapshot) -> anyhow::Result<u64> {
        let record = LogRecord {
            seq: self.last_seq + 1,
            snapshot,
        };
        writeln!(self.writer, "{record}")
            .with_context(|| format!("Failed to write debug log record {}", record.seq))?;
        self.last_seq = record.seq;
        Ok(record.seq)
    }

    pub fn finish(mut self) -> anyhow::Result<W> {
        self.writer.flush().context("Failed to flush debug log")?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use ctet_engine::{Grid, PieceKind, PieceQueue};

    use super::*;

    #[test]
    fn test_records_are_numbered_from_one() {
        let mut log = DebugLogWriter::new(Vec::new());
        let snapshot = GameSnapshot {
            board: Grid::from_ascii("#........."),
            active: Some(PieceKind::T),
            held: None,
            queue: PieceQueue::from_pieces([PieceKind::I, PieceKind::O]),
        };
        assert_eq!(log.write(snapshot.clone()).unwrap(), 1);
        assert_eq!(log.write(GameSnapshot::default()).unwrap(), 2);

        let text = String::from_utf8(log.finish().unwrap()).unwrap();
        let records: Vec<LogRecord> = text.lines().map(|line| line.parse().unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].seq, 1);
        assert_eq!(records[0].snapshot, snapshot);
        assert!(text.lines().next().unwrap().ends_with(",T,-,I,O,-,-,-"));
        assert_eq!(records[1].seq, 2);
    }
}
