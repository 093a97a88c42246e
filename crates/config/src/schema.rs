use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default format string: one current-value glyph per resource.
pub const DEFAULT_FORMAT: &str =
    "Mem:{mem}|Swap:{swap}|Load:{load.1}{load.5}{load.15}|CPU:{cpu}|Net:{net}";

/// Root configuration structure parsed from `system-graph.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Format string with `{metric[:n][!]}` directives.
    pub format: String,
    /// Time between two status lines, in milliseconds.
    pub interval_ms: u64,
    /// Largest history length a directive may request.
    pub max_history: usize,
    /// Maximum network bandwidth per direction in bytes/second.
    /// `None` = scale against the highest recent rate.
    pub net_max_bandwidth: Option<u64>,
    /// Number of recent rates an auto-scaled network graph is scaled
    /// against. `None` = the graph's own history length.
    pub net_window: Option<usize>,
    /// Directory the kernel counters are read from.
    pub proc_root: PathBuf,
    /// Glyphs used to draw graphs.
    pub palette: PaletteConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            format:            DEFAULT_FORMAT.to_string(),
            interval_ms:       2_000,
            max_history:       256,
            net_max_bandwidth: None,
            net_window:        None,
            proc_root:         PathBuf::from("/proc"),
            palette:           PaletteConfig::default(),
        }
    }
}

/// Glyph palette configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Quantization levels from empty to full, one character per level.
    pub levels: String,
    /// Glyph drawn for a sample that could not be read.
    pub unreadable: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            levels:     " ▁▂▃▄▅▆▇█".to_string(),
            unreadable: "·".to_string(),
        }
    }
}
