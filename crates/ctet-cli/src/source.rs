use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::Context;
use ctet_engine::{GameSnapshot, LogRecord};

use crate::util;

/// Supplies one game snapshot per cycle.
///
/// `Ok(None)` means the source is exhausted and the run ends normally.
pub trait SnapshotSource {
    fn next_snapshot(&mut self) -> anyhow::Result<Option<GameSnapshot>>;
}

/// A single snapshot stored as a JSON file.
#[derive(Debug)]
pub struct SnapshotFile {
    path: PathBuf,
    consumed: bool,
}

impl SnapshotFile {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            consumed: false,
        }
    }
}

impl SnapshotSource for SnapshotFile {
    fn next_snapshot(&mut self) -> anyhow::Result<Option<GameSnapshot>> {
        if self.consumed {
            return Ok(None);
        }
        self.consumed = true;
        util::read_snapshot_file(&self.path).map(Some)
    }
}

/// Replays the records of a debug log as snapshots.
#[derive(Debug)]
pub struct LogReplay<R> {
    lines: io::Lines<R>,
    line_index: usize,
    only_record: Option<usize>,
    name: String,
}

impl LogReplay<BufReader<File>> {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open debug log file: {}", path.display()))?;
        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }
}

impl<R> LogReplay<R>
where
    R: BufRead,
{
    pub fn new(reader: R, name: String) -> Self {
        Self {
            lines: reader.lines(),
            line_index: 0,
            only_record: None,
            name,
        }
    }

    /// Restricts the replay to the record on zero-based line `index`.
    #[must_use]
    pub fn only_record(mut self, index: usize) -> Self {
        self.only_record = Some(index);
        self
    }

    pub fn next_record(&mut self) -> anyhow::Result<Option<LogRecord>> {
        loop {
            if self.only_record.is_some_and(|index| self.line_index > index) {
                return Ok(None);
            }
            let Some(line) = self.lines.next() else {
                return Ok(None);
            };
            let index = self.line_index;
            self.line_index += 1;

            let line = line.with_context(|| format!("Failed to read {}", self.name))?;
            if self.only_record.is_some_and(|only| only != index) || line.trim().is_empty() {
                continue;
            }
            let record = line
                .parse()
                .with_context(|| format!("Failed to parse record at line {index} of {}", self.name))?;
            return Ok(Some(record));
        }
    }
}

impl<R> SnapshotSource for LogReplay<R>
where
    R: BufRead,
{
    fn next_snapshot(&mut self) -> anyhow::Result<Option<GameSnapshot>> {
        let record = self.next_record()?;
        if let Some(record) = &record {
            tracing::debug!(seq = record.seq, "replaying debug log record");
        }
        Ok(record.map(|record| record.snapshot))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use ctet_engine::{Grid, PieceKind};

    use super::*;

    fn log_text() -> String {
        [
            GameSnapshot {
                active: Some(PieceKind::O),
                ..GameSnapshot::default()
            },
            GameSnapshot {
                board: Grid::from_ascii("####......"),
                active: Some(PieceKind::I),
                held: Some(PieceKind::O),
                ..GameSnapshot::default()
            },
        ]
        .into_iter()
        .zip(1..)
        .map(|(snapshot, seq)| format!("{}\n", LogRecord { seq, snapshot }))
        .collect()
    }

    #[test]
    fn test_replays_every_record() {
        let mut replay = LogReplay::new(Cursor::new(log_text()), "test".to_owned());
        let first = replay.next_snapshot().unwrap().unwrap();
        assert_eq!(first.active, Some(PieceKind::O));
        let second = replay.next_snapshot().unwrap().unwrap();
        assert_eq!(second.held, Some(PieceKind::O));
        assert!(replay.next_snapshot().unwrap().is_none());
    }

    #[test]
    fn test_only_record() {
        let mut replay = LogReplay::new(Cursor::new(log_text()), "test".to_owned()).only_record(1);
        let record = replay.next_record().unwrap().unwrap();
        assert_eq!(record.seq, 2);
        assert!(replay.next_record().unwrap().is_none());

        let mut replay = LogReplay::new(Cursor::new(log_text()), "test".to_owned()).only_record(5);
        assert!(replay.next_record().unwrap().is_none());
    }

    #[test]
    fn test_bad_record_reports_line() {
        let text = format!("{}garbage\n", log_text());
        let mut replay = LogReplay::new(Cursor::new(text), "log.txt".to_owned()).only_record(2);
        let err = replay.next_record().unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse record at line 2 of log.txt");
    }
}
