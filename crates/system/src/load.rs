use graph_core::{Metric, Reading, SampleError};

const FILE: &str = "loadavg";

/// Load averages from `/proc/loadavg`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadAvg {
    pub one:     f64,
    pub five:    f64,
    pub fifteen: f64,
}

impl LoadAvg {
    pub fn parse(loadavg: &str) -> Result<Self, SampleError> {
        let mut fields = loadavg.split_whitespace().map(|v| v.parse::<f64>());
        let mut next = |name: &str| -> Result<f64, SampleError> {
            match fields.next() {
                Some(Ok(v)) => Ok(v),
                _ => Err(SampleError::malformed(FILE, format!("missing {name}-minute average"))),
            }
        };
        Ok(Self {
            one:     next("1")?,
            five:    next("5")?,
            fifteen: next("15")?,
        })
    }

    /// The average for `metric`, divided by the number of CPUs so a fully
    /// loaded machine reads 1.0.
    pub fn per_cpu(&self, metric: &Metric, cpus: usize) -> Reading {
        let load = match metric {
            Metric::Load5  => self.five,
            Metric::Load15 => self.fifteen,
            _              => self.one,
        };
        Reading::ratio(load, cpus as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes() {
        let load = LoadAvg::parse("1.00 2.00 6.00 3/512 4242\n").unwrap();
        assert_eq!(load.per_cpu(&Metric::Load1, 4), Reading::Value(0.25));
        assert_eq!(load.per_cpu(&Metric::Load5, 4), Reading::Value(0.5));
        assert_eq!(load.per_cpu(&Metric::Load15, 4), Reading::Value(1.0));
    }

    #[test]
    fn overload_is_clamped() {
        let load = LoadAvg::parse("9.0 9.0 9.0 1/1 1").unwrap();
        assert_eq!(load.per_cpu(&Metric::Load1, 2), Reading::Value(1.0));
    }

    #[test]
    fn unknown_cpu_count_is_unreadable() {
        let load = LoadAvg::parse("1.0 1.0 1.0").unwrap();
        assert!(load.per_cpu(&Metric::Load1, 0).is_unreadable());
    }

    #[test]
    fn malformed() {
        assert!(LoadAvg::parse("").is_err());
        assert!(LoadAvg::parse("0.5 abc 0.1").is_err());
    }
}
