use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::prelude::*;

use self::{
    decide::DecideArg, default_config::DefaultConfigArg, evaluate::EvaluateArg,
    render_log::RenderLogArg, simulate::SimulateArg,
};

mod decide;
mod default_config;
mod evaluate;
mod render_log;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Decide the inputs for a snapshot file or for the records of a debug log
    Decide(#[clap(flatten)] DecideArg),
    /// Print the heuristic breakdown of a snapshot's board
    Evaluate(#[clap(flatten)] EvaluateArg),
    /// Play a seeded game against the built-in simulator
    Simulate(#[clap(flatten)] SimulateArg),
    /// Render one debug log record as a PNG image
    RenderLog(#[clap(flatten)] RenderLogArg),
    /// Print the default bot configuration
    DefaultConfig(#[clap(flatten)] DefaultConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose)?;
    match args.mode {
        Mode::Decide(arg) => decide::run(&arg)?,
        Mode::Evaluate(arg) => evaluate::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::RenderLog(arg) => render_log::run(&arg)?,
        Mode::DefaultConfig(arg) => default_config::run(&arg)?,
    }
    Ok(())
}

/// Logs go to stderr so stdout only carries move sequences and reports.
fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    // 3 = info, 5 = trace
    let verbosity = verbose.saturating_add(3).clamp(1, 5);
    let level: Level = verbosity.to_string().parse()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
    tracing::debug!("logging initialized at level {level}");
    Ok(())
}
