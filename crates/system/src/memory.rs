use graph_core::{Reading, SampleError};

const FILE: &str = "meminfo";

/// The `/proc/meminfo` fields the memory and swap graphs need, in kB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemInfo {
    pub mem_total:     Option<u64>,
    pub mem_available: Option<u64>,
    pub mem_free:      Option<u64>,
    pub swap_total:    Option<u64>,
    pub swap_free:     Option<u64>,
}

impl MemInfo {
    pub fn parse(meminfo: &str) -> Result<Self, SampleError> {
        let mut info = Self::default();
        for line in meminfo.lines() {
            let Some((key, rest)) = line.split_once(':') else {
                continue;
            };
            let slot = match key.trim() {
                "MemTotal"     => &mut info.mem_total,
                "MemAvailable" => &mut info.mem_available,
                "MemFree"      => &mut info.mem_free,
                "SwapTotal"    => &mut info.swap_total,
                "SwapFree"     => &mut info.swap_free,
                _ => continue,
            };
            let value = rest
                .split_whitespace()
                .next()
                .and_then(|v| v.parse::<u64>().ok())
                .ok_or_else(|| SampleError::malformed(FILE, format!("bad value in '{line}'")))?;
            *slot = Some(value);
        }
        Ok(info)
    }

    /// Used fraction of physical memory.
    ///
    /// Prefers `MemAvailable`; kernels before 3.14 only report `MemFree`.
    pub fn memory_usage(&self) -> Result<Reading, SampleError> {
        let total = self
            .mem_total
            .ok_or_else(|| SampleError::malformed(FILE, "MemTotal missing"))?;
        let free = self
            .mem_available
            .or(self.mem_free)
            .ok_or_else(|| SampleError::malformed(FILE, "MemAvailable and MemFree missing"))?;
        Ok(Reading::ratio(total.saturating_sub(free) as f64, total as f64))
    }

    /// Used fraction of swap.  A system without swap reads as empty.
    pub fn swap_usage(&self) -> Result<Reading, SampleError> {
        let (Some(total), Some(free)) = (self.swap_total, self.swap_free) else {
            return Err(SampleError::malformed(FILE, "SwapTotal or SwapFree missing"));
        };
        if total == 0 {
            return Ok(Reading::Value(0.0));
        }
        Ok(Reading::ratio(total.saturating_sub(free) as f64, total as f64))
    }
}
