use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Grid, PieceKind};

/// Number of upcoming pieces visible in the queue.
pub const QUEUE_LEN: usize = 5;

/// The five upcoming piece slots, front first.
///
/// A slot is `None` when the piece in it is unknown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceQueue([Option<PieceKind>; QUEUE_LEN]);

impl PieceQueue {
    pub const UNKNOWN: Self = Self([None; QUEUE_LEN]);

    #[must_use]
    pub const fn new(slots: [Option<PieceKind>; QUEUE_LEN]) -> Self {
        Self(slots)
    }

    /// Builds a queue from known pieces; missing trailing slots are unknown.
    pub fn from_pieces<I>(pieces: I) -> Self
    where
        I: IntoIterator<Item = PieceKind>,
    {
        let mut slots = [None; QUEUE_LEN];
        for (slot, kind) in slots.iter_mut().zip(pieces) {
            *slot = Some(kind);
        }
        Self(slots)
    }

    #[must_use]
    pub fn head(&self) -> Option<PieceKind> {
        self.0[0]
    }

    #[must_use]
    pub fn slots(&self) -> &[Option<PieceKind>; QUEUE_LEN] {
        &self.0
    }

    /// Removes the front slot, shifting the rest forward and appending an
    /// unknown slot at the back.
    pub fn pop_front(&mut self) -> Option<PieceKind> {
        let head = self.0[0];
        self.0.rotate_left(1);
        self.0[QUEUE_LEN - 1] = None;
        head
    }
}

impl fmt::Display for PieceQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match slot {
                Some(kind) => write!(f, "{kind}")?,
                None => write!(f, "-")?,
            }
        }
        Ok(())
    }
}

/// Observed game state at the start of a decision cycle.
///
/// This is what the capture collaborator produces: the locked cells of the
/// board, the piece about to be placed, the held piece and the queue.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Grid,
    pub active: Option<PieceKind>,
    #[serde(default)]
    pub held: Option<PieceKind>,
    #[serde(default)]
    pub queue: PieceQueue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_pop_front_appends_unknown() {
        let mut queue = PieceQueue::from_pieces([
            PieceKind::I,
            PieceKind::O,
            PieceKind::T,
            PieceKind::S,
            PieceKind::Z,
        ]);
        assert_eq!(queue.head(), Some(PieceKind::I));

        assert_eq!(queue.pop_front(), Some(PieceKind::I));
        assert_eq!(
            queue.slots(),
            &[
                Some(PieceKind::O),
                Some(PieceKind::T),
                Some(PieceKind::S),
                Some(PieceKind::Z),
                None
            ]
        );
        assert_eq!(queue.to_string(), "O T S Z -");
    }

    #[test]
    fn test_queue_from_short_iterator() {
        let queue = PieceQueue::from_pieces([PieceKind::J]);
        assert_eq!(queue.head(), Some(PieceKind::J));
        assert_eq!(queue.slots()[1..], [None; 4]);
    }

    #[test]
    fn test_snapshot_json() {
        let mut snapshot = GameSnapshot {
            active: Some(PieceKind::T),
            queue: PieceQueue::from_pieces([PieceKind::L, PieceKind::I]),
            ..GameSnapshot::default()
        };
        snapshot.board.set_cell(19, 0, true);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["active"], "T");
        assert_eq!(json["held"], serde_json::Value::Null);
        assert_eq!(json["queue"][0], "L");
        assert_eq!(json["queue"].as_array().unwrap().len(), QUEUE_LEN);
        assert_eq!(json["board"][19], "#.........");

        let parsed: GameSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_snapshot_json_defaults() {
        let rows = vec![".........."; 20];
        let json = serde_json::json!({ "board": rows, "active": "O" });
        let snapshot: GameSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(snapshot.active, Some(PieceKind::O));
        assert_eq!(snapshot.held, None);
        assert_eq!(snapshot.queue, PieceQueue::UNKNOWN);
    }
}
