use std::path::PathBuf;

use anyhow::Context;
use ctet_engine::{BOARD_HEIGHT, BOARD_WIDTH, Grid};
use image::{DynamicImage, GrayImage, ImageFormat, Luma};

use crate::source::LogReplay;

const FILLED: Luma<u8> = Luma([u8::MAX]);
const EMPTY: Luma<u8> = Luma([0]);

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RenderLogArg {
    /// Debug log file to read
    log: PathBuf,
    /// Zero-based line of the record to render
    #[arg(long, default_value_t = 0)]
    record: usize,
    /// Side length of one cell in pixels
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..=200))]
    scale: u32,
    /// Output PNG file [default: piece<RECORD>.png]
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &RenderLogArg) -> anyhow::Result<()> {
    let RenderLogArg {
        log,
        record,
        scale,
        output,
    } = arg;

    let record_data = LogReplay::open(log)?
        .only_record(*record)
        .next_record()?
        .with_context(|| format!("Debug log {} has no record at line {record}", log.display()))?;

    let image = render_grid(&record_data.snapshot.board, *scale);
    let path = output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("piece{record}.png")));
    DynamicImage::ImageLuma8(image)
        .save_with_format(&path, ImageFormat::Png)
        .with_context(|| format!("Failed to write image: {}", path.display()))?;

    tracing::info!(seq = record_data.seq, path = %path.display(), "rendered debug log record");
    Ok(())
}

/// Draws each cell as a `scale` x `scale` square, filled cells white.
#[expect(clippy::cast_possible_truncation)]
fn render_grid(grid: &Grid, scale: u32) -> GrayImage {
    let width = BOARD_WIDTH as u32 * scale;
    let height = BOARD_HEIGHT as u32 * scale;
    GrayImage::from_fn(width, height, |x, y| {
        if grid.is_occupied((y / scale) as usize, (x / scale) as usize) {
            FILLED
        } else {
            EMPTY
        }
    })
}
