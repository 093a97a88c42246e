use graph_core::{HistoryRing, Metric, Reading};
use graph_format::{FormatProgram, Segment};
use graph_system::{DataSource, Sampler, Tick};
use graph_theme::Palette;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::trace;

/// Ties a parsed format string to a sampler and one history ring per
/// referenced metric.
///
/// Rings are created up front, sized to the longest history any directive
/// asks for, and only ever written by [`Pipeline::sample`].
#[derive(Debug)]
pub struct Pipeline<S> {
    program: FormatProgram,
    sampler: Sampler<S>,
    rings:   BTreeMap<Metric, HistoryRing>,
    palette: Palette,
    ticks:   u64,
}

impl<S: DataSource> Pipeline<S> {
    pub fn new(program: FormatProgram, mut sampler: Sampler<S>, palette: Palette) -> Self {
        let rings = program
            .capacities()
            .into_iter()
            .map(|(metric, cap)| {
                // Auto-scaled network graphs forget peaks older than what they show.
                if matches!(metric, Metric::Net(_)) {
                    sampler.set_window(metric.clone(), cap);
                }
                (metric, HistoryRing::new(cap))
            })
            .collect();

        Self {
            program,
            sampler,
            rings,
            palette,
            ticks: 0,
        }
    }

    /// Sample every referenced metric once and record the results.
    /// Returns the index of the tick just taken.
    pub fn sample(&mut self, at: Instant) -> u64 {
        let tick = Tick::new(self.ticks, at);
        for (metric, ring) in self.rings.iter_mut() {
            let sample = self.sampler.sample(metric, tick);
            trace!(%metric, tick = tick.index, reading = ?sample.reading, "sampled");
            ring.push(sample);
        }
        self.ticks += 1;
        tick.index
    }

    /// Build the status line from the current ring contents.
    pub fn compose(&self) -> String {
        let mut line = String::new();
        for segment in self.program.segments() {
            match segment {
                Segment::Literal(text) => line.push_str(text),
                Segment::Graph(d) => {
                    let values = match self.rings.get(&d.metric) {
                        Some(ring) => ring.slice(d.history),
                        None => vec![Reading::Unreadable; d.history],
                    };
                    graph_renderer::render_into(&mut line, &d.metric, &values, d.label, &self.palette);
                }
            }
        }
        line
    }

    /// One full tick: sample, then compose.
    pub fn tick(&mut self, at: Instant) -> String {
        self.sample(at);
        self.compose()
    }

    /// Whether a first sample would be unreadable for some metric because it
    /// needs a previous reading.
    pub fn needs_priming(&self) -> bool {
        self.rings.keys().any(|m| m.is_rate())
    }

    pub fn ring(&self, metric: &Metric) -> Option<&HistoryRing> {
        self.rings.get(metric)
    }

    pub fn sampler_mut(&mut self) -> &mut Sampler<S> {
        &mut self.sampler
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_system::{FakeSource, ProcFile};
    use std::time::Duration;

    fn pipeline(format: &str, source: FakeSource) -> Pipeline<FakeSource> {
        Pipeline::new(
            graph_format::parse(format).unwrap(),
            Sampler::new(source),
            Palette::default(),
        )
    }

    fn meminfo(total: u64, available: u64) -> String {
        format!("MemTotal: {total} kB\nMemAvailable: {available} kB\n")
    }

    #[test]
    fn rings_are_sized_from_the_program() {
        let p = pipeline("{cpu}{cpu:4}{mem:2}", FakeSource::new());
        assert_eq!(p.ring(&Metric::Cpu).map(HistoryRing::capacity), Some(4));
        assert_eq!(p.ring(&Metric::Mem).map(HistoryRing::capacity), Some(2));
        assert!(p.ring(&Metric::Swap).is_none());
    }

    #[test]
    fn cpu_half_busy_renders_mid_glyph() {
        let source = FakeSource::new()
            .with(ProcFile::Stat, "cpu  100 0 0 100 0\n")
            .with(ProcFile::Stat, "cpu  150 0 0 150 0\n");
        let mut p = pipeline("CPU:{cpu}", source);
        let t0 = Instant::now();

        assert_eq!(p.tick(t0), "CPU:·");
        assert_eq!(p.tick(t0 + Duration::from_secs(1)), "CPU:▄");
    }

    #[test]
    fn memory_history_renders_oldest_first() {
        let mut p = pipeline("{mem:3}", FakeSource::new());
        let t0 = Instant::now();

        p.tick(t0);
        p.sampler_mut().source_mut().set(ProcFile::MemInfo, meminfo(100, 100));
        p.tick(t0);
        p.sampler_mut().source_mut().set(ProcFile::MemInfo, meminfo(100, 0));
        let line = p.tick(t0);

        assert_eq!(line, "· █");
        assert_eq!(line.chars().count(), 3);
    }

    #[test]
    fn unreadable_metric_does_not_affect_others() {
        let source = FakeSource::new()
            .with(ProcFile::MemInfo, meminfo(100, 50))
            .with(ProcFile::Stat, "cpu  1 1 1 1\ncpu0 1 1 1 1\n");
        let mut p = pipeline("{load!}|{mem!}", source);

        assert_eq!(p.tick(Instant::now()), "Load:·|Mem:▄");
    }

    #[test]
    fn short_history_is_padded() {
        let source = FakeSource::new().with(ProcFile::MemInfo, meminfo(100, 0));
        let mut p = pipeline("[{mem:4}]", source);
        assert_eq!(p.tick(Instant::now()), "[···█]");
        assert_eq!(p.ticks(), 1);
    }

    #[test]
    fn literals_only_never_sample() {
        let mut p = pipeline("{{static}}", FakeSource::new());
        assert!(!p.needs_priming());
        assert_eq!(p.tick(Instant::now()), "{static}");
    }

    #[test]
    fn samples_carry_tick_indices() {
        let source = FakeSource::new().with(ProcFile::MemInfo, meminfo(100, 50));
        let mut p = pipeline("{mem:3}", source);
        let t0 = Instant::now();
        for expected in 0..3 {
            assert_eq!(p.sample(t0), expected);
        }
        let ticks: Vec<u64> = p.ring(&Metric::Mem).unwrap().iter().map(|s| s.tick).collect();
        assert_eq!(ticks, vec![0, 1, 2]);
    }

    fn netdev(rx: u64) -> String {
        format!("Inter-| Receive\n face |bytes\n  eth0: {rx} 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0\n")
    }

    #[test]
    fn net_scale_recovers_after_a_burst() {
        let mut p = pipeline("{net.rx:3}", FakeSource::new().with(ProcFile::NetDev, netdev(0)));
        let t0 = Instant::now();
        let at = |secs: u64| t0 + Duration::from_secs(secs);

        assert_eq!(p.tick(at(0)), "···");
        let mut total = 100_000;
        p.sampler_mut().source_mut().set(ProcFile::NetDev, netdev(total));
        assert_eq!(p.tick(at(1)), "··█");

        let mut lines = Vec::new();
        for secs in 2..12 {
            total += 1000;
            p.sampler_mut().source_mut().set(ProcFile::NetDev, netdev(total));
            lines.push(p.tick(at(secs)));
        }
        // 1000 B/s is nothing next to the burst, then nearly full once the
        // burst has scrolled out of the window.
        assert_eq!(lines[0], "·█ ");
        assert_eq!(lines[1], "█  ");
        assert_eq!(lines.last().map(String::as_str), Some("███"));
    }

    #[test]
    fn interface_metrics_render_with_their_own_labels() {
        let mut p = pipeline("{net.0.rx:2!} {net.eth9!}", FakeSource::new().with(ProcFile::NetDev, netdev(0)));
        let t0 = Instant::now();

        assert_eq!(p.tick(t0), "Net0 Rx:·· eth9:·");
        p.sampler_mut().source_mut().set(ProcFile::NetDev, netdev(1024));
        assert_eq!(p.tick(t0 + Duration::from_secs(1)), "Net0 Rx:·█ eth9:·");
    }
}
