//! Per-cycle debug log records.
//!
//! One record per line, comma separated:
//!
//! ```text
//! seq,c0,c1,...,c199,active,held,q0,q1,q2,q3,q4
//! ```
//!
//! Cells are the board in row-major order written as `0`/`1`. Unknown or
//! absent pieces are written as `-`. The parser is more lenient than the
//! writer: it accepts empty piece fields, float cells (`0.0`/`1.0`) and one
//! trailing field after the queue.

use std::{fmt, str::FromStr};

use crate::{BOARD_HEIGHT, BOARD_WIDTH, Grid, PieceKind};

use super::snapshot::{GameSnapshot, PieceQueue, QUEUE_LEN};

const CELL_COUNT: usize = BOARD_HEIGHT * BOARD_WIDTH;
// seq + cells + active + held + queue
const FIELD_COUNT: usize = 1 + CELL_COUNT + 2 + QUEUE_LEN;

/// A single cycle of the debug log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub seq: u64,
    pub snapshot: GameSnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseRecordError {
    #[display("expected {} fields, found {found}", FIELD_COUNT)]
    FieldCount { found: usize },
    #[display("invalid sequence number: {value:?}")]
    Sequence {
        #[error(not(source))]
        value: String,
    },
    #[display("invalid value {value:?} for cell {index}")]
    Cell {
        index: usize,
        #[error(not(source))]
        value: String,
    },
    #[display("invalid piece {value:?} in {field} field")]
    Piece {
        field: &'static str,
        #[error(not(source))]
        value: String,
    },
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.seq)?;
        for filled in self.snapshot.board.cells() {
            write!(f, ",{}", u8::from(filled))?;
        }
        write!(f, ",{}", PieceField(self.snapshot.active))?;
        write!(f, ",{}", PieceField(self.snapshot.held))?;
        for slot in self.snapshot.queue.slots() {
            write!(f, ",{}", PieceField(*slot))?;
        }
        Ok(())
    }
}

struct PieceField(Option<PieceKind>);

impl fmt::Display for PieceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(kind) => write!(f, "{kind}"),
            None => write!(f, "-"),
        }
    }
}

impl FromStr for LogRecord {
    type Err = ParseRecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim_end().split(',').map(str::trim).collect();
        if fields.len() != FIELD_COUNT && fields.len() != FIELD_COUNT + 1 {
            return Err(ParseRecordError::FieldCount {
                found: fields.len(),
            });
        }

        let seq = fields[0]
            .parse()
            .map_err(|_| ParseRecordError::Sequence {
                value: fields[0].to_owned(),
            })?;

        let cells = fields[1..=CELL_COUNT]
            .iter()
            .enumerate()
            .map(|(index, value)| {
                parse_cell(value).ok_or_else(|| ParseRecordError::Cell {
                    index,
                    value: (*value).to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let board = Grid::from_cells(cells).ok_or(ParseRecordError::FieldCount {
            found: fields.len(),
        })?;

        let pieces = &fields[CELL_COUNT + 1..];
        let active = parse_piece(pieces[0], "active")?;
        let held = parse_piece(pieces[1], "held")?;
        let mut queue = [None; QUEUE_LEN];
        for (slot, value) in queue.iter_mut().zip(&pieces[2..]) {
            *slot = parse_piece(value, "queue")?;
        }

        Ok(Self {
            seq,
            snapshot: GameSnapshot {
                board,
                active,
                held,
                queue: PieceQueue::new(queue),
            },
        })
    }
}

fn parse_cell(value: &str) -> Option<bool> {
    match value {
        "0" => Some(false),
        "1" => Some(true),
        _ => {
            let value: f32 = value.parse().ok()?;
            if value.abs() < f32::EPSILON {
                Some(false)
            } else if (value - 1.0).abs() < f32::EPSILON {
                Some(true)
            } else {
                None
            }
        }
    }
}

fn parse_piece(value: &str, field: &'static str) -> Result<Option<PieceKind>, ParseRecordError> {
    match value {
        "" | "-" => Ok(None),
        _ => value
            .parse()
            .map(Some)
            .map_err(|_| ParseRecordError::Piece {
                field,
                value: value.to_owned(),
            }),
    }
}
