//! Board and piece primitives.
//!
//! - [`Grid`] - 20×10 occupancy grid stored as one bit mask per row
//! - [`Board`] - a grid plus its explicitly recomputed metrics
//! - [`metrics`] - pure functions measuring a grid (holes, roughness, ...)
//! - [`PieceKind`] / [`PieceMask`] - the constant piece catalog
//! - [`find_resting_row`] - the placement simulator

pub use self::{board::*, grid::*, piece::*, placement::*};

pub(crate) mod board;
pub(crate) mod grid;
pub mod metrics;
pub(crate) mod piece;
pub(crate) mod placement;

/// Number of rows on the board.
pub const BOARD_HEIGHT: usize = 20;
/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;
