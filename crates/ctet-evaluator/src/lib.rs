//! Move search for the falling-block auto-player.
//!
//! The crate is layered bottom-up:
//!
//! 1. [`board_analysis`] - lazily computed metrics of a grid
//! 2. [`placement_analysis`] - a candidate placement dropped on the working
//!    grid, with the rows it clears and the resulting board
//! 3. [`placement_evaluator`] - scores a placement with the weighted heuristic
//! 4. [`turn_evaluator`] - enumerates every placement of the active piece and
//!    the hold candidate and keeps the first strictly-best one
//!
//! ```text
//! Turn Evaluation (select best placement, commit it)
//!     ↓ uses
//! Placement Evaluation (score single placement)
//!     ↓ uses
//! Placement / Board Analysis (drop, clear, measure)
//! ```

use ctet_engine::PieceKind;

pub mod board_analysis;
pub mod placement_analysis;
pub mod placement_evaluator;
pub mod turn_evaluator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SearchError {
    #[display("active piece is unknown")]
    UnknownActivePiece,
    #[display("no legal placement for {kind} or the hold candidate")]
    NoLegalPlacement {
        #[error(not(source))]
        kind: PieceKind,
    },
}
