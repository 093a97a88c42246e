use crate::metric::Metric;

/// One normalized reading.
///
/// `Unreadable` is its own variant so it can never be mistaken for a
/// numeric level by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// Fraction in `[0, 1]`.
    Value(f64),
    Unreadable,
}

impl Reading {
    /// Build a reading from a raw fraction, clamping jitter outside `[0, 1]`.
    /// Non-finite input (e.g. a division by zero upstream) is unreadable.
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_finite() {
            Reading::Value(fraction.clamp(0.0, 1.0))
        } else {
            Reading::Unreadable
        }
    }

    /// Fraction of `used` over `total`; unreadable when `total` is zero.
    pub fn ratio(used: f64, total: f64) -> Self {
        if total <= 0.0 {
            return Reading::Unreadable;
        }
        Self::from_fraction(used / total)
    }

    pub fn is_unreadable(self) -> bool {
        matches!(self, Reading::Unreadable)
    }
}

/// A reading tagged with the metric it belongs to and the tick it was taken on.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub metric:  Metric,
    /// Monotonic tick index, starting at 0.
    pub tick:    u64,
    pub reading: Reading,
}

impl Sample {
    pub fn new(metric: Metric, tick: u64, reading: Reading) -> Self {
        Self {
            metric,
            tick,
            reading,
        }
    }

    pub fn unreadable(metric: Metric, tick: u64) -> Self {
        Self::new(metric, tick, Reading::Unreadable)
    }
}
