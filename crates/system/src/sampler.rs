use crate::cpu::{cpu_count, CpuTimes};
use crate::load::LoadAvg;
use crate::memory::MemInfo;
use crate::network::NetCounters;
use crate::source::{DataSource, ProcFile};
use graph_core::{Direction, Metric, NetMetric, Reading, Sample, SampleError};
use std::collections::{BTreeMap, VecDeque};
use std::time::Instant;
use tracing::debug;

/// Auto-scaled network graphs never treat less than 1 KiB/s per direction
/// as full bandwidth.
pub const MIN_NET_PEAK: f64 = 1024.0;

/// The tick a sample is taken on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub index: u64,
    pub at:    Instant,
}

impl Tick {
    pub fn new(index: u64, at: Instant) -> Self {
        Self { index, at }
    }
}

/// Raw reading kept from the previous tick for rate metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Previous {
    Cpu(CpuTimes),
    Net { counters: NetCounters, at: Instant },
}

/// Everything the sampler remembers between ticks, keyed by metric.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamplerState {
    previous: BTreeMap<Metric, Previous>,
    /// Recent rates (bytes/s) per auto-scaled network metric, oldest first.
    rates:    BTreeMap<Metric, VecDeque<f64>>,
}

impl SamplerState {
    pub fn previous(&self, metric: &Metric) -> Option<&Previous> {
        self.previous.get(metric)
    }

    /// Recent rates an auto-scaled network metric is normalized against.
    pub fn rates(&self, metric: &Metric) -> Option<&VecDeque<f64>> {
        self.rates.get(metric)
    }

    /// Current full-scale value of an auto-scaled network metric: the
    /// highest rate in its window, floored at [`MIN_NET_PEAK`] per direction.
    pub fn peak(&self, metric: &Metric) -> Option<f64> {
        let Metric::Net(net) = metric else {
            return None;
        };
        let rates = self.rates.get(metric)?;
        Some(
            rates
                .iter()
                .copied()
                .fold(MIN_NET_PEAK * net.direction.lanes(), f64::max),
        )
    }
}

/// Reads metrics from a [`DataSource`] and normalizes them to `[0, 1]`.
#[derive(Debug)]
pub struct Sampler<S> {
    source:     S,
    state:      SamplerState,
    /// Configured bandwidth per direction in bytes/s; `None` = auto-scale.
    net_max:    Option<f64>,
    /// Auto-scale window length for every network metric, if configured.
    net_window: Option<usize>,
    /// Per-metric auto-scale window lengths (normally the history length).
    windows:    BTreeMap<Metric, usize>,
}

impl<S: DataSource> Sampler<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: SamplerState::default(),
            net_max: None,
            net_window: None,
            windows: BTreeMap::new(),
        }
    }

    /// Normalize network metrics against a fixed bandwidth (bytes/s per
    /// direction) instead of the recently observed peak.
    #[must_use]
    pub fn with_net_max(mut self, bytes_per_sec: Option<u64>) -> Self {
        self.net_max = bytes_per_sec.filter(|&b| b > 0).map(|b| b as f64);
        self
    }

    /// Use the same auto-scale window for every network metric, overriding
    /// the per-metric lengths set with [`Sampler::set_window`].
    #[must_use]
    pub fn with_net_window(mut self, samples: Option<usize>) -> Self {
        self.net_window = samples.filter(|&n| n > 0);
        self
    }

    /// Number of recent rates an auto-scaled `metric` is normalized against.
    pub fn set_window(&mut self, metric: Metric, samples: usize) {
        self.windows.insert(metric, samples.max(1));
    }

    fn window(&self, metric: &Metric) -> usize {
        self.net_window
            .or_else(|| self.windows.get(metric).copied())
            .unwrap_or(1)
    }

    pub fn state(&self) -> &SamplerState {
        &self.state
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Take one sample.  A failed read yields an unreadable sample; it never
    /// fails the caller.
    pub fn sample(&mut self, metric: &Metric, tick: Tick) -> Sample {
        match self.read(metric, tick.at) {
            Ok(reading) => Sample::new(metric.clone(), tick.index, reading),
            Err(e) => {
                debug!(%metric, tick = tick.index, "sample unavailable: {e}");
                Sample::unreadable(metric.clone(), tick.index)
            }
        }
    }

    fn read(&mut self, metric: &Metric, at: Instant) -> Result<Reading, SampleError> {
        match metric {
            Metric::Cpu => {
                let now = CpuTimes::parse(&self.source.read(ProcFile::Stat)?)?;
                match self.state.previous.insert(Metric::Cpu, Previous::Cpu(now)) {
                    Some(Previous::Cpu(before)) => Ok(now.busy_since(before)),
                    _ => Ok(Reading::Unreadable),
                }
            }
            Metric::Mem => MemInfo::parse(&self.source.read(ProcFile::MemInfo)?)?.memory_usage(),
            Metric::Swap => MemInfo::parse(&self.source.read(ProcFile::MemInfo)?)?.swap_usage(),
            Metric::Load1 | Metric::Load5 | Metric::Load15 => {
                let load = LoadAvg::parse(&self.source.read(ProcFile::LoadAvg)?)?;
                let cpus = cpu_count(&self.source.read(ProcFile::Stat)?);
                Ok(load.per_cpu(metric, cpus))
            }
            Metric::Net(net) => self.read_net(metric, net, at),
        }
    }

    fn read_net(&mut self, metric: &Metric, net: &NetMetric, at: Instant) -> Result<Reading, SampleError> {
        let text = self.source.read(ProcFile::NetDev)?;
        let counters = NetCounters::select(&text, &net.interface)?;
        let previous = self
            .state
            .previous
            .insert(metric.clone(), Previous::Net { counters, at });

        let Some(Previous::Net { counters: before, at: then }) = previous else {
            return Ok(Reading::Unreadable);
        };
        let elapsed = at.saturating_duration_since(then).as_secs_f64();
        let Some(delta) = counters.since(before).filter(|_| elapsed > 0.0) else {
            return Ok(Reading::Unreadable);
        };

        let bytes = match net.direction {
            Direction::Rx => delta.rx_bytes,
            Direction::Tx => delta.tx_bytes,
            Direction::Both => delta.total(),
        };
        let rate = bytes as f64 / elapsed;

        let max = match self.net_max {
            Some(per_direction) => per_direction * net.direction.lanes(),
            None => {
                let window = self.window(metric);
                let rates = self.state.rates.entry(metric.clone()).or_default();
                while rates.len() >= window {
                    rates.pop_front();
                }
                rates.push_back(rate);
                rates
                    .iter()
                    .copied()
                    .fold(MIN_NET_PEAK * net.direction.lanes(), f64::max)
            }
        };
        Ok(Reading::from_fraction(rate / max))
    }
}
