use graph_core::{Reading, SampleError};

const FILE: &str = "stat";

/// Cumulative CPU time counters from the aggregate `cpu ` line of
/// `/proc/stat`, in clock ticks since boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuTimes {
    /// Sum of every column.
    pub total: u64,
    /// The `idle` column (fourth value).
    pub idle:  u64,
}

impl CpuTimes {
    pub fn parse(stat: &str) -> Result<Self, SampleError> {
        let line = stat
            .lines()
            .find(|l| l.starts_with("cpu "))
            .ok_or_else(|| SampleError::malformed(FILE, "no aggregate cpu line"))?;

        let columns = line
            .split_whitespace()
            .skip(1)
            .map(|v| v.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SampleError::malformed(FILE, format!("bad cpu column: {e}")))?;

        let idle = *columns
            .get(3)
            .ok_or_else(|| SampleError::malformed(FILE, "cpu line has fewer than four columns"))?;

        Ok(Self {
            total: columns.iter().sum(),
            idle,
        })
    }

    /// Busy fraction over the interval since `previous`.
    ///
    /// Unreadable when no time has passed or the counters went backwards.
    pub fn busy_since(self, previous: CpuTimes) -> Reading {
        let (Some(total), Some(idle)) = (
            self.total.checked_sub(previous.total),
            self.idle.checked_sub(previous.idle),
        ) else {
            return Reading::Unreadable;
        };
        Reading::ratio(total.saturating_sub(idle) as f64, total as f64)
    }
}

/// Number of CPUs, counted from the per-CPU `cpuN` lines of `/proc/stat`.
pub fn cpu_count(stat: &str) -> usize {
    stat.lines()
        .filter(|l| {
            l.strip_prefix("cpu")
                .and_then(|rest| rest.chars().next())
                .is_some_and(|c| c.is_ascii_digit())
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAT: &str = "\
cpu  100 0 50 800 30 0 20 0 0 0
cpu0 50 0 25 400 15 0 10 0 0 0
cpu1 50 0 25 400 15 0 10 0 0 0
intr 12345 0 0
ctxt 999
";

    #[test]
    fn parses_aggregate_line() {
        let times = CpuTimes::parse(STAT).unwrap();
        assert_eq!(times, CpuTimes { total: 1000, idle: 800 });
    }

    #[test]
    fn counts_cpus() {
        assert_eq!(cpu_count(STAT), 2);
        assert_eq!(cpu_count("cpu  1 2 3 4\n"), 0);
    }

    #[test]
    fn busy_fraction_from_deltas() {
        let before = CpuTimes { total: 1000, idle: 800 };
        let after = CpuTimes { total: 1200, idle: 850 };
        assert_eq!(after.busy_since(before), Reading::Value(0.75));
    }

    #[test]
    fn no_elapsed_time_is_unreadable() {
        let t = CpuTimes { total: 1000, idle: 800 };
        assert!(t.busy_since(t).is_unreadable());
    }

    #[test]
    fn counters_going_backwards_are_unreadable() {
        let before = CpuTimes { total: 1000, idle: 800 };
        let after = CpuTimes { total: 900, idle: 850 };
        assert!(after.busy_since(before).is_unreadable());
    }

    #[test]
    fn malformed_input() {
        assert!(CpuTimes::parse("intr 1 2 3\n").is_err());
        assert!(CpuTimes::parse("cpu  1 2 x 4\n").is_err());
        assert!(CpuTimes::parse("cpu  1 2 3\n").is_err());
    }
}
