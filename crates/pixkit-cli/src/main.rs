//! pixkit - pixel raster tools
//!
//! Bucket fill, pixelate and HSL adjustments on PNG files, one engine per
//! invocation or a whole YAML pipeline.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pixkit_color::HslChannel;
use pixkit_core::Rgb;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "pixkit")]
#[command(author, version, about = "Pixel raster tools: fill, pixelate, HSL adjust")]
#[command(long_about = "
Pixel raster tools for pixel-art and reference images.

Examples:
  pixkit info sprite.png                              # Size and color count
  pixkit fill sprite.png -o out.png -x 3 -y 5 --color '#ff8800'
  pixkit pixelate photo.png -o mosaic.png -w 8
  pixkit adjust photo.png -o out.png --channel lightness --value 40
  pixkit adjust photo.png -o out.png --channel saturation --delta -0.25
  pixkit pipeline photo.png -o out.png -c stages.yaml
  pixkit -vv pixelate photo.png -o mosaic.png -w 4 -H 2 --log-file run.log
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Bucket fill the region around a pixel
    Fill(FillArgs),

    /// Replace blocks of pixels with their average color
    #[command(visible_alias = "px")]
    Pixelate(PixelateArgs),

    /// Shift lightness or saturation
    Adjust(AdjustArgs),

    /// Run a YAML-described chain of stages
    Pipeline(PipelineArgs),

    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

#[derive(Args)]
struct FillArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Seed X coordinate
    #[arg(short, allow_negative_numbers = true)]
    x: i32,

    /// Seed Y coordinate
    #[arg(short, allow_negative_numbers = true)]
    y: i32,

    /// Fill color, `#rgb` or `#rrggbb`
    #[arg(short, long, default_value = "#000000")]
    color: Rgb,
}

#[derive(Args)]
struct PixelateArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Block width in pixels (fractional values are rounded, < 1 means 1)
    #[arg(short = 'w', long, allow_negative_numbers = true)]
    block_width: f64,

    /// Block height in pixels (defaults to the width)
    #[arg(short = 'H', long, allow_negative_numbers = true)]
    block_height: Option<f64>,
}

/// HSL component selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum ChannelArg {
    Lightness,
    Saturation,
}

impl From<ChannelArg> for HslChannel {
    fn from(c: ChannelArg) -> Self {
        match c {
            ChannelArg::Lightness => HslChannel::Lightness,
            ChannelArg::Saturation => HslChannel::Saturation,
        }
    }
}

#[derive(Args)]
struct AdjustArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Component to shift
    #[arg(long, value_enum)]
    channel: ChannelArg,

    /// Shift in slider units (delta = value / 400)
    #[arg(
        long,
        allow_negative_numbers = true,
        conflicts_with = "delta",
        required_unless_present = "delta"
    )]
    value: Option<f64>,

    /// Shift in HSL units, added to the component directly
    #[arg(long, allow_negative_numbers = true)]
    delta: Option<f64>,
}

#[derive(Args)]
struct PipelineArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Stage list (YAML)
    #[arg(short, long)]
    config: PathBuf,
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

/// Installs the stderr subscriber and, with `--log-file`, a file writer.
///
/// The returned guard flushes the file writer when dropped.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Fill(args) => commands::fill::run(args, cli.verbose),
        Commands::Pixelate(args) => commands::pixelate::run(args, cli.verbose),
        Commands::Adjust(args) => commands::adjust::run(args, cli.verbose),
        Commands::Pipeline(args) => commands::pipeline::run(args, cli.verbose),
        Commands::Info(args) => commands::info::run(args, cli.verbose),
    }
}
