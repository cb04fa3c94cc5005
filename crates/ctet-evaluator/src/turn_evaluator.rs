//! Turn evaluation: selecting the best placement for the current cycle.
//!
//! # How It Works
//!
//! 1. **Active branch** - every rotation state (ascending) and every column
//!    (ascending) of the active piece is dropped on a working copy of the
//!    committed grid and scored.
//! 2. **Hold branch** - the same enumeration for the hold candidate (the held
//!    piece, or the queue head when nothing is held), against the same grid.
//! 3. **Select** - a candidate replaces the best only if its score is strictly
//!    greater, so the first-found candidate wins ties and the active branch
//!    beats the hold branch on equal scores.
//!
//! The search is greedy: only the immediate placement is considered, with one
//! optional hold swap.
//!
//! # Usage
//!
//! ```
//! use ctet_engine::{GameField, GameSnapshot, PieceKind};
//! use ctet_evaluator::{
//!     placement_evaluator::HeuristicPlacementEvaluator, turn_evaluator::TurnEvaluator,
//! };
//!
//! let mut field = GameField::from_snapshot(&GameSnapshot {
//!     active: Some(PieceKind::O),
//!     ..GameSnapshot::default()
//! });
//! let evaluator = TurnEvaluator::new(Box::new(HeuristicPlacementEvaluator::default()));
//!
//! let (plan, analysis) = evaluator.select_best_turn(&field).unwrap();
//! assert_eq!(plan.move_sequence().to_string(), "aaaaw");
//! plan.apply(analysis, &mut field);
//! ```

use arrayvec::ArrayVec;
use ctet_engine::{
    BOARD_WIDTH, GameField, Grid, MoveSequence, PieceKind, Placement, RotationState,
};
use serde::Serialize;

use crate::{
    SearchError, placement_analysis::PlacementAnalysis, placement_evaluator::PlacementEvaluator,
};

/// The decision of one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TurnPlan {
    use_hold: bool,
    kind: PieceKind,
    rotation: RotationState,
    column: usize,
    score: f32,
}

impl TurnPlan {
    #[must_use]
    pub fn use_hold(&self) -> bool {
        self.use_hold
    }

    /// The piece that is placed (the hold candidate when hold is used).
    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub fn score(&self) -> f32 {
        self.score
    }

    #[must_use]
    pub fn move_sequence(&self) -> MoveSequence {
        MoveSequence::from_decision(self.kind, self.rotation, self.column, self.use_hold)
    }

    /// Ends the cycle on `field`: performs the hold swap if selected and
    /// commits the post-clear board of the winning placement.
    pub fn apply(&self, analysis: PlacementAnalysis, field: &mut GameField) {
        field.apply_turn(self.use_hold, analysis.into_board());
    }
}

/// Searches all placements of the active piece and the hold candidate.
#[derive(Debug)]
pub struct TurnEvaluator<'a> {
    placement_evaluator: Box<dyn PlacementEvaluator + 'a>,
}

impl<'a> TurnEvaluator<'a> {
    #[must_use]
    pub fn new(placement_evaluator: Box<dyn PlacementEvaluator + 'a>) -> Self {
        Self {
            placement_evaluator,
        }
    }

    /// Selects the best turn for the current field.
    ///
    /// # Errors
    ///
    /// - [`SearchError::UnknownActivePiece`] if the field has no active piece
    /// - [`SearchError::NoLegalPlacement`] if no candidate of either branch
    ///   has a resting position
    pub fn select_best_turn(
        &self,
        field: &GameField,
    ) -> Result<(TurnPlan, PlacementAnalysis), SearchError> {
        let active = field.active().ok_or(SearchError::UnknownActivePiece)?;
        let board = field.board();
        let scan_from_row = board.max_filled_row();
        let mut working = board.grid().clone();

        let mut branches = ArrayVec::<_, 2>::new();
        branches.push((false, active));
        match field.hold_candidate() {
            Some(candidate) => branches.push((true, candidate)),
            None => tracing::debug!("hold candidate unknown; skipping hold branch"),
        }

        let mut best: Option<(TurnPlan, PlacementAnalysis)> = None;
        for (use_hold, kind) in branches {
            for placement in available_placements(&working, kind, scan_from_row) {
                let analysis =
                    PlacementAnalysis::from_working_grid(&mut working, scan_from_row, placement);
                let score = self.placement_evaluator.evaluate_placement(&analysis);
                if best.as_ref().is_none_or(|(plan, _)| score > plan.score) {
                    let plan = TurnPlan {
                        use_hold,
                        kind,
                        rotation: placement.rotation(),
                        column: placement.column(),
                        score,
                    };
                    best = Some((plan, analysis));
                }
            }
        }

        let (plan, analysis) = best.ok_or(SearchError::NoLegalPlacement { kind: active })?;
        tracing::debug!(
            use_hold = plan.use_hold,
            kind = %plan.kind,
            rotation = %plan.rotation,
            column = plan.column,
            score = plan.score,
            cleared_lines = analysis.cleared_lines(),
            "selected turn"
        );
        Ok((plan, analysis))
    }

    /// Runs one full cycle on `field`: searches, commits the winning board and
    /// returns the decision.
    ///
    /// # Errors
    ///
    /// Same as [`select_best_turn`](Self::select_best_turn). The field is left
    /// untouched on error.
    pub fn play_turn(&self, field: &mut GameField) -> Result<TurnPlan, SearchError> {
        let (plan, analysis) = self.select_best_turn(field)?;
        plan.apply(analysis, field);
        Ok(plan)
    }
}

/// Every resting placement of `kind` on `grid`, rotation states ascending and
/// columns ascending within each state.
pub fn available_placements(
    grid: &Grid,
    kind: PieceKind,
    start_row: usize,
) -> impl Iterator<Item = Placement> + use<> {
    let grid = grid.clone();
    kind.rotations().flat_map(move |(rotation, mask)| {
        let grid = grid.clone();
        (0..=BOARD_WIDTH - mask.width())
            .filter_map(move |column| Placement::drop_onto(&grid, kind, rotation, column, start_row))
    })
}
