use std::path::PathBuf;

use crate::{
    driver::Driver,
    record::DebugLogWriter,
    source::{LogReplay, SnapshotFile, SnapshotSource},
    util::{self, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DecideArg {
    /// Snapshot JSON file to decide on
    #[arg(long, required_unless_present = "log", conflicts_with = "log")]
    snapshot: Option<PathBuf>,
    /// Debug log to replay; each record is decided in turn
    #[arg(long)]
    log: Option<PathBuf>,
    /// Only decide the record on this zero-based line of the log
    #[arg(long, requires = "log")]
    record: Option<usize>,
    /// Bot configuration file [default: built-in weights]
    #[arg(long)]
    config: Option<PathBuf>,
    /// Debug log to write [default: log_path of the config]
    #[arg(long)]
    debug_log: Option<PathBuf>,
    /// Output file for move sequences [default: stdout]
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DecideArg) -> anyhow::Result<()> {
    let DecideArg {
        snapshot,
        log,
        record,
        config,
        debug_log,
        output,
    } = arg;

    let config = util::read_bot_config(config.as_deref())?;
    let mut source: Box<dyn SnapshotSource> = match (snapshot, log) {
        (Some(path), _) => Box::new(SnapshotFile::new(path.clone())),
        (None, Some(path)) => {
            let replay = LogReplay::open(path)?;
            let replay = match record {
                Some(index) => replay.only_record(*index),
                None => replay,
            };
            Box::new(replay)
        }
        (None, None) => anyhow::bail!("either --snapshot or --log is required"),
    };
    let debug_log = debug_log
        .clone()
        .or_else(|| config.log_path.clone())
        .map(DebugLogWriter::create)
        .transpose()?;

    let mut sink = Output::from_output_path(output.clone())?;
    let mut driver = Driver::new(config.turn_evaluator(), debug_log);
    let cycles = driver.run(source.as_mut(), &mut sink)?;
    driver.finish()?;

    if cycles == 0 {
        tracing::warn!("no snapshots to decide on");
    }
    tracing::info!(cycles, config = %config.name, output = %sink.display_path(), "decisions written");
    Ok(())
}
