use chrono::{DateTime, Utc};
use ctet_engine::{PieceSeed, PlayStats, TopOutError};
use serde::{Deserialize, Serialize};

/// Result of one `simulate` run.
///
/// The seed and config name are enough to replay the game exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub seed: PieceSeed,
    pub config_name: String,
    pub end: GameEnd,
    pub stats: PlayStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEnd {
    PieceLimit,
    NoRestingPosition,
    SpawnCollision,
    NoLegalPlacement,
}

impl From<TopOutError> for GameEnd {
    fn from(err: TopOutError) -> Self {
        match err {
            TopOutError::NoRestingPosition => GameEnd::NoRestingPosition,
            TopOutError::SpawnCollision => GameEnd::SpawnCollision,
        }
    }
}
