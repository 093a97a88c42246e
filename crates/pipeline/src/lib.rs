//! Tick loop for `system-graph`.
//!
//! Wires the parsed format string, the procfs sampler and the renderer
//! together and writes one status line per tick:
//! - sample every referenced metric once and push into its history ring
//! - render literals and graph directives in order
//! - write the line to the output and flush

pub mod output;
pub mod pipeline;

pub use output::emit;
pub use pipeline::Pipeline;

use graph_config::GraphConfig;
use graph_core::Result;
use graph_system::{DataSource, ProcSource, Sampler};
use graph_theme::Palette;
use std::io::Write;
use std::time::{Duration, Instant};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

/// How long the loop runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// One line per tick until interrupted or the output goes away.
    #[default]
    Continuous,
    /// A single line, then return.
    Once,
}

/// Build a pipeline reading from procfs as described by `config`.
///
/// Fails only on a malformed format string.
pub fn build(config: &GraphConfig) -> Result<Pipeline<ProcSource>> {
    let program = graph_format::parse_with_limit(&config.format, config.max_history)?;
    debug!(
        directives = program.directives().count(),
        metrics = ?program.metrics(),
        "format string parsed"
    );

    let sampler = Sampler::new(ProcSource::new(&config.proc_root))
        .with_net_max(config.net_max_bandwidth)
        .with_net_window(config.net_window);

    Ok(Pipeline::new(program, sampler, Palette::from_config(&config.palette)))
}

/// Drive `pipeline` on a fixed `interval`, writing lines to `out`.
///
/// In [`RunMode::Once`] rate metrics are primed with an extra sample one
/// interval before the line is rendered, so the single line is meaningful.
/// Continuous mode stops cleanly on Ctrl-C between ticks; a failed write
/// ends the loop with [`graph_core::GraphError::Output`].
pub async fn run<S, W>(
    pipeline: &mut Pipeline<S>,
    out: &mut W,
    interval: Duration,
    mode: RunMode,
) -> Result<()>
where
    S: DataSource,
    W: Write + ?Sized,
{
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    if mode == RunMode::Once {
        if pipeline.needs_priming() {
            ticker.tick().await;
            pipeline.sample(Instant::now());
        }
        ticker.tick().await;
        let line = pipeline.tick(Instant::now());
        return emit(out, &line);
    }

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(interval_ms = interval.as_millis() as u64, "tick loop started");
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut shutdown => {
                info!("interrupted; stopping");
                return Ok(());
            }
        }

        let line = pipeline.tick(Instant::now());
        emit(out, &line)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_config::PaletteConfig;
    use graph_core::GraphError;
    use graph_system::{FakeSource, ProcFile};
    use std::io;

    const INTERVAL: Duration = Duration::from_millis(1);

    fn fake_pipeline(format: &str, source: FakeSource) -> Pipeline<FakeSource> {
        Pipeline::new(
            graph_format::parse(format).unwrap(),
            Sampler::new(source),
            Palette::default(),
        )
    }

    /// Accepts a fixed number of flushed lines, then behaves like a closed pipe.
    struct LimitedWriter {
        lines:     Vec<String>,
        pending:   String,
        remaining: usize,
    }

    impl LimitedWriter {
        fn new(remaining: usize) -> Self {
            Self {
                lines: Vec::new(),
                pending: String::new(),
                remaining,
            }
        }
    }

    impl Write for LimitedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.pending.push_str(&String::from_utf8_lossy(buf));
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.remaining = self.remaining.saturating_sub(1);
            self.lines.push(std::mem::take(&mut self.pending));
            Ok(())
        }
    }

    #[tokio::test]
    async fn once_primes_rate_metrics() {
        let source = FakeSource::new()
            .with(ProcFile::Stat, "cpu  100 0 0 100 0\n")
            .with(ProcFile::Stat, "cpu  100 0 0 200 0\n");
        let mut pipeline = fake_pipeline("CPU:{cpu}", source);
        let mut out = Vec::new();

        run(&mut pipeline, &mut out, INTERVAL, RunMode::Once).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "CPU: \n");
        assert_eq!(pipeline.ticks(), 2);
    }

    #[tokio::test]
    async fn once_without_rate_metrics_samples_once() {
        let source = FakeSource::new()
            .with(ProcFile::MemInfo, "MemTotal: 10 kB\nMemAvailable: 0 kB\n");
        let mut pipeline = fake_pipeline("{mem!}", source);
        let mut out = Vec::new();

        run(&mut pipeline, &mut out, INTERVAL, RunMode::Once).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Mem:█\n");
        assert_eq!(pipeline.ticks(), 1);
    }

    #[tokio::test]
    async fn continuous_stops_on_output_error() {
        let source = FakeSource::new()
            .with(ProcFile::MemInfo, "MemTotal: 10 kB\nMemAvailable: 10 kB\n");
        let mut pipeline = fake_pipeline("<{mem:2}>", source);
        let mut out = LimitedWriter::new(2);

        let result = run(&mut pipeline, &mut out, INTERVAL, RunMode::Continuous).await;

        assert!(matches!(result, Err(GraphError::Output { .. })));
        assert_eq!(out.lines, vec!["<· >\n".to_string(), "<  >\n".to_string()]);
        assert_eq!(pipeline.ticks(), 3);
    }

    #[test]
    fn build_rejects_bad_format() {
        let config = GraphConfig {
            format: "{cpu:0}".into(),
            ..GraphConfig::default()
        };
        assert!(matches!(build(&config), Err(GraphError::Parse(_))));
    }

    #[test]
    fn build_honours_max_history() {
        let config = GraphConfig {
            format: "{mem:8}".into(),
            max_history: 4,
            ..GraphConfig::default()
        };
        assert!(matches!(build(&config), Err(GraphError::Parse(_))));
    }

    #[test]
    fn build_uses_configured_palette_and_root() {
        let config = GraphConfig {
            format: "{swap}".into(),
            proc_root: std::env::temp_dir().join("system-graph-no-such-proc"),
            palette: PaletteConfig {
                levels:     "01".into(),
                unreadable: "x".into(),
            },
            ..GraphConfig::default()
        };
        let mut pipeline = build(&config).unwrap();
        assert_eq!(pipeline.tick(Instant::now()), "x");
    }
}
