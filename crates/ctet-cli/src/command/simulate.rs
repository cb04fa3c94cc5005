use std::path::PathBuf;

use chrono::Utc;
use ctet_engine::PieceSeed;
use ctet_evaluator::SearchError;
use rand::Rng as _;

use crate::{
    driver::Driver,
    record::DebugLogWriter,
    schema::summary::{GameEnd, SimulationSummary},
    simulator::Simulator,
    source::SnapshotSource as _,
    util::{self, Output},
};

const PROGRESS_INTERVAL: usize = 100;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Piece generator seed as 32 hex digits [default: random]
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Stop after this many pieces
    #[arg(long, default_value_t = 1000)]
    max_pieces: usize,
    /// Bot configuration file [default: built-in weights]
    #[arg(long)]
    config: Option<PathBuf>,
    /// Debug log to write [default: log_path of the config]
    #[arg(long)]
    debug_log: Option<PathBuf>,
    /// Also write every move sequence to this file
    #[arg(long)]
    moves: Option<PathBuf>,
    /// Summary output file [default: stdout]
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        seed,
        max_pieces,
        config,
        debug_log,
        moves,
        output,
    } = arg;

    let config = util::read_bot_config(config.as_deref())?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let debug_log = debug_log
        .clone()
        .or_else(|| config.log_path.clone())
        .map(DebugLogWriter::create)
        .transpose()?;
    let mut moves = moves.clone().map(Output::open).transpose()?;

    let started_at = Utc::now();
    tracing::info!(%seed, config = %config.name, max_pieces, "starting simulation");

    let mut simulator = Simulator::new(seed, *max_pieces);
    let mut driver = Driver::new(config.turn_evaluator(), debug_log);
    while let Some(snapshot) = simulator.next_snapshot()? {
        let result = driver.run_cycle(&snapshot, &mut (&mut simulator, moves.as_mut()));
        if let Err(err) = result {
            if err.downcast_ref::<SearchError>().is_none() {
                return Err(err);
            }
            tracing::warn!("game over: {err}");
            simulator.stop(GameEnd::NoLegalPlacement);
            continue;
        }

        let stats = simulator.stats();
        if stats.completed_pieces % PROGRESS_INTERVAL == 0 {
            tracing::info!(
                completed_pieces = stats.completed_pieces,
                total_cleared_lines = stats.total_cleared_lines,
                "progress"
            );
        }
    }
    driver.finish()?;

    let summary = SimulationSummary {
        started_at,
        finished_at: Utc::now(),
        seed,
        config_name: config.name,
        end: simulator.end().unwrap_or(GameEnd::PieceLimit),
        stats: simulator.stats().clone(),
    };
    tracing::info!(
        end = ?summary.end,
        completed_pieces = summary.stats.completed_pieces,
        total_cleared_lines = summary.stats.total_cleared_lines,
        "simulation finished"
    );
    Output::save_json(&summary, output.clone())
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;
    use crate::command::{CommandArgs, Mode};

    #[test]
    fn test_seed_argument() {
        let args = CommandArgs::try_parse_from([
            "ctet",
            "simulate",
            "--seed",
            "0123456789abcdef0123456789abcdef",
            "--max-pieces",
            "10",
        ])
        .unwrap();
        let Mode::Simulate(arg) = args.mode else {
            panic!("expected simulate");
        };
        assert_eq!(
            arg.seed.map(|seed| seed.to_string()).as_deref(),
            Some("0123456789abcdef0123456789abcdef")
        );
        assert_eq!(arg.max_pieces, 10);

        let err = CommandArgs::try_parse_from(["ctet", "simulate", "--seed", "xyz"]).unwrap_err();
        assert!(err.to_string().contains("invalid hex"));
    }
}
