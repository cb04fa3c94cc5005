pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TopOutError {
    #[display("piece has no resting position at the requested column")]
    NoRestingPosition,
    #[display("next piece collides with the stack at spawn")]
    SpawnCollision,
}
