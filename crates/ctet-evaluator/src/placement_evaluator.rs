//! Placement evaluation: scoring a single candidate placement.
//!
//! The [`HeuristicPlacementEvaluator`] scores the post-clear board of a
//! placement with a fixed linear heuristic:
//!
//! ```text
//! score = - w0 * height_differential
//!         - w1 * hole_count
//!         + w2 * rows_cleared
//!         - w3 * roughness
//! ```
//!
//! Higher is better. Values are used as-is, without normalization, so the
//! weights alone decide how the four terms trade off against each other.
//!
//! # Usage
//!
//! ```
//! use ctet_evaluator::placement_evaluator::{HeuristicPlacementEvaluator, HeuristicWeights};
//!
//! let weights: HeuristicWeights =
//!     serde_json::from_str(r#"{"height_differential":0.0,"holes":3.0,"rows_cleared":2.0,"roughness":0.5}"#)
//!         .unwrap();
//! assert_eq!(weights, HeuristicWeights::default());
//!
//! let evaluator = HeuristicPlacementEvaluator::new(weights);
//! // let score = evaluator.evaluate_placement(&analysis);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{board_analysis::BoardAnalysis, placement_analysis::PlacementAnalysis};

/// Evaluates piece placements by assigning scores.
pub trait PlacementEvaluator: fmt::Debug + Send + Sync {
    /// Evaluates a placement and returns a score (higher is better).
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f32;
}

/// Coefficients of the four heuristic terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeuristicWeights {
    pub height_differential: f32,
    pub holes: f32,
    pub rows_cleared: f32,
    pub roughness: f32,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            height_differential: 0.0,
            holes: 3.0,
            rows_cleared: 2.0,
            roughness: 0.5,
        }
    }
}

/// Raw heuristic terms of a board and the weighted score they produce.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub height_differential: usize,
    pub hole_count: usize,
    pub rows_cleared: usize,
    pub roughness: usize,
    pub score: f32,
}

#[derive(Debug, Clone, Default)]
pub struct HeuristicPlacementEvaluator {
    weights: HeuristicWeights,
}

impl HeuristicPlacementEvaluator {
    #[must_use]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    /// Scores `board` as if `rows_cleared` rows had just been cleared to
    /// produce it, returning every term.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn breakdown(&self, board: &BoardAnalysis, rows_cleared: usize) -> ScoreBreakdown {
        let w = &self.weights;
        let height_differential = board.height_differential();
        let hole_count = board.hole_count();
        let roughness = board.roughness();
        let score = -w.height_differential * height_differential as f32
            - w.holes * hole_count as f32
            + w.rows_cleared * rows_cleared as f32
            - w.roughness * roughness as f32;
        ScoreBreakdown {
            height_differential,
            hole_count,
            rows_cleared,
            roughness,
            score,
        }
    }
}

impl PlacementEvaluator for HeuristicPlacementEvaluator {
    #[inline]
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f32 {
        self.breakdown(analysis.board_analysis(), analysis.cleared_lines())
            .score
    }
}

#[cfg(test)]
mod tests {
    use ctet_engine::Grid;

    use super::*;

    fn analysis(art: &str) -> BoardAnalysis {
        BoardAnalysis::from_grid(Grid::from_ascii(art))
    }

    #[test]
    fn test_empty_board_scores_zero() {
        let evaluator = HeuristicPlacementEvaluator::default();
        let breakdown = evaluator.breakdown(&BoardAnalysis::from_grid(Grid::EMPTY), 0);
        assert!(breakdown.score.abs() < f32::EPSILON);
    }

    #[test]
    fn test_default_weights() {
        let evaluator = HeuristicPlacementEvaluator::default();
        let board = analysis(
            r"
            ##........
            ##........
            ",
        );
        // roughness 2
        let breakdown = evaluator.breakdown(&board, 0);
        assert_eq!(breakdown.roughness, 2);
        assert_eq!(breakdown.hole_count, 0);
        assert!((breakdown.score - -1.0).abs() < f32::EPSILON);

        let board = analysis(
            r"
            .....#....
            .....#....
            ",
        );
        // roughness 4, 2 rows cleared
        let breakdown = evaluator.breakdown(&board, 2);
        assert!((breakdown.score - (4.0 - 2.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_every_term_is_weighted() {
        let evaluator = HeuristicPlacementEvaluator::new(HeuristicWeights {
            height_differential: 1.0,
            holes: 10.0,
            rows_cleared: 100.0,
            roughness: 1000.0,
        });
        let board = analysis(
            r"
            #.........
            ..........
            #.........
            ",
        );
        let breakdown = evaluator.breakdown(&board, 1);
        assert_eq!(breakdown.height_differential, 20 - 17);
        assert_eq!(breakdown.hole_count, 1);
        assert_eq!(breakdown.roughness, 3);
        assert!((breakdown.score - (-3.0 - 10.0 + 100.0 - 3000.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_weights_json() {
        let json = serde_json::to_value(HeuristicWeights::default()).unwrap();
        assert_eq!(json["holes"], 3.0);
        assert_eq!(json["rows_cleared"], 2.0);

        let err = serde_json::from_str::<HeuristicWeights>(r#"{"holes": 1.0}"#).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }
}
