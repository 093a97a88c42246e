//! system-graph: tiny block-character graphs of system resources for
//! terminal status lines.
//!
//! Run with:  `RUST_LOG=debug system-graph --format 'CPU:{cpu:10}'`

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const FORMAT_HELP: &str = "\
Format strings:
  Text is copied verbatim (ANSI escapes included). Write {{ and }} for
  literal braces. A directive draws one metric:

    {metric}       latest value, one glyph
    {metric:n}     last n values, oldest on the left
    {metric!}      prefixed with a label such as 'CPU:'
    {metric:n!}    both

Metrics:
  cpu                      CPU busy time since the previous tick
  mem, swap                used memory / swap
  load.1 (load), load.5,   load average divided by the number of CPUs
  load.15
  net, net.rx, net.tx      network throughput (non-loopback interfaces)
  net.<iface>[.rx|.tx]     one interface by name, e.g. net.eth0.rx
  net.<N>[.rx|.tx]         the N-th non-loopback interface, from 0

Unreadable samples (and history not recorded yet) are drawn as '·'.";

#[derive(Parser, Debug)]
#[command(name = "system-graph")]
#[command(version)]
#[command(about = "Displays minimal graphs for system resources")]
#[command(after_help = FORMAT_HELP)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/system-graph/system-graph.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Format string for the printed line
    #[arg(short, long, value_name = "FORMAT")]
    format: Option<String>,

    /// Milliseconds between lines
    #[arg(short, long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,

    /// Maximum network bandwidth per direction in bytes/s (default: auto-scale)
    #[arg(long, value_name = "BYTES")]
    net_max: Option<u64>,

    /// Print a single line and exit
    #[arg(long)]
    once: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only status lines.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("system-graph v{} starting", env!("CARGO_PKG_VERSION"));

    let path = cli.config.clone().unwrap_or_else(graph_config::default_path);
    let mut config = graph_config::load(&path)
        .with_context(|| format!("loading {}", path.display()))?;

    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(interval) = cli.interval {
        config.interval_ms = interval;
    }
    if cli.net_max.is_some() {
        config.net_max_bandwidth = cli.net_max;
    }

    let mut pipeline = graph_pipeline::build(&config)?;
    let mode = if cli.once {
        graph_pipeline::RunMode::Once
    } else {
        graph_pipeline::RunMode::Continuous
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting runtime")?;

    let mut stdout = std::io::stdout();
    runtime.block_on(graph_pipeline::run(
        &mut pipeline,
        &mut stdout,
        Duration::from_millis(config.interval_ms),
        mode,
    ))?;
    Ok(())
}
