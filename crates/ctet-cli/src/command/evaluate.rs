use std::{io::Write as _, path::PathBuf};

use anyhow::Context;
use ctet_engine::{BOARD_WIDTH, Grid, metrics};
use ctet_evaluator::{
    board_analysis::BoardAnalysis,
    placement_evaluator::{HeuristicPlacementEvaluator, ScoreBreakdown},
};
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    /// Snapshot JSON file whose board is evaluated
    snapshot: PathBuf,
    /// Bot configuration file [default: built-in weights]
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
    /// Output file path [default: stdout]
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Metrics of a board after its full rows are cleared.
#[derive(Debug, Clone, Serialize)]
struct EvaluationReport {
    max_filled_row: usize,
    min_filled_row: usize,
    column_heights: [usize; BOARD_WIDTH],
    average_height: f32,
    breakdown: ScoreBreakdown,
}

impl EvaluationReport {
    fn new(grid: &Grid, evaluator: &HeuristicPlacementEvaluator) -> Self {
        let rows_cleared = metrics::rows_cleared(grid, 0);
        let board = BoardAnalysis::from_grid(metrics::clear_filled_rows(grid));
        Self {
            max_filled_row: board.max_filled_row(),
            min_filled_row: board.min_filled_row(),
            column_heights: *board.column_heights(),
            average_height: board.average_height(),
            breakdown: evaluator.breakdown(&board, rows_cleared),
        }
    }

    fn write_text(&self, grid: &Grid, output: &mut Output) -> anyhow::Result<()> {
        let b = &self.breakdown;
        writeln!(output, "{grid}")?;
        writeln!(output, "Max filled row         : {}", self.max_filled_row)?;
        writeln!(output, "Min filled row         : {}", self.min_filled_row)?;
        writeln!(output, "Height differential    : {}", b.height_differential)?;
        writeln!(output, "Number of rows cleared : {}", b.rows_cleared)?;
        writeln!(output, "Number of holes        : {}", b.hole_count)?;
        writeln!(output, "Total roughness        : {}", b.roughness)?;
        writeln!(output, "Average height         : {:.1}", self.average_height)?;
        writeln!(output, "Score                  : {}", b.score)?;
        output.flush()?;
        Ok(())
    }
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let EvaluateArg {
        snapshot,
        config,
        json,
        output,
    } = arg;

    let config = util::read_bot_config(config.as_deref())?;
    let snapshot = util::read_snapshot_file(snapshot)?;
    let evaluator = HeuristicPlacementEvaluator::new(config.weights);
    let report = EvaluationReport::new(&snapshot.board, &evaluator);

    let mut output = Output::from_output_path(output.clone())?;
    if *json {
        output.write_json(&report)
    } else {
        report
            .write_text(&snapshot.board, &mut output)
            .with_context(|| format!("Failed to write report to {}", output.display_path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_rows_are_cleared_before_scoring() {
        let grid = Grid::from_ascii(
            r"
            #.........
            ##########
            ",
        );
        let report = EvaluationReport::new(&grid, &HeuristicPlacementEvaluator::default());

        assert_eq!(report.breakdown.rows_cleared, 1);
        assert_eq!(report.max_filled_row, 19);
        assert_eq!(report.min_filled_row, 20);
        assert_eq!(report.column_heights[0], 1);
        assert!((report.average_height - 0.1).abs() < f32::EPSILON);
        // -3*0 + 2*1 - 0.5*1
        assert!((report.breakdown.score - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_report_json() {
        let report = EvaluationReport::new(&Grid::EMPTY, &HeuristicPlacementEvaluator::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["max_filled_row"], 20);
        assert_eq!(json["breakdown"]["hole_count"], 0);
        assert_eq!(json["breakdown"]["score"], 0.0);
    }
}
