//! Game state carried across decision cycles.
//!
//! - [`GameSnapshot`] / [`PieceQueue`] - the observed state handed over by the
//!   capture collaborator
//! - [`GameField`] - committed board, active/held piece and queue, updated by
//!   one transition per cycle
//! - [`MoveSequence`] - a decision reduced to discrete inputs
//! - [`LogRecord`] - one line of the per-cycle debug log
//! - [`PieceGenerator`] / [`SelfPlayGame`] - an offline game producing
//!   snapshots without a live window
//!
//! # Cycle
//!
//! 1. Observe a [`GameSnapshot`] and apply it to the [`GameField`]
//! 2. Search placements for the active piece and the hold candidate
//! 3. Commit the winning board with [`GameField::apply_turn`]
//! 4. Emit the [`MoveSequence`] of the winning decision
//!
//! # Example
//!
//! ```
//! use ctet_engine::{GameField, GameSnapshot, MoveSequence, PieceKind, RotationState};
//!
//! let snapshot = GameSnapshot {
//!     active: Some(PieceKind::O),
//!     ..GameSnapshot::default()
//! };
//! let field = GameField::from_snapshot(&snapshot);
//! assert_eq!(field.board().max_filled_row(), 20);
//!
//! let moves = MoveSequence::from_decision(PieceKind::O, RotationState::SPAWN, 0, false);
//! assert_eq!(moves.to_string(), "aaaaw");
//! ```

pub use self::{
    debug_log::*, game_field::*, move_sequence::*, piece_generator::*, self_play::*, snapshot::*,
};

mod debug_log;
mod game_field;
mod move_sequence;
mod piece_generator;
mod self_play;
mod snapshot;
