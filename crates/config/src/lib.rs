pub mod schema;

pub use schema::{GraphConfig, PaletteConfig, DEFAULT_FORMAT};

use graph_core::{GraphError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `GraphConfig::default()` if
/// the file doesn't exist so the tool always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<GraphConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(GraphConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| GraphError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse configuration from TOML text.
pub fn parse(raw: &str) -> Result<GraphConfig> {
    let config: GraphConfig =
        toml::from_str(raw).map_err(|e| GraphError::Config(format!("TOML parse error: {e}")))?;

    if config.interval_ms == 0 {
        return Err(GraphError::Config("interval_ms must be positive".into()));
    }
    if config.max_history == 0 {
        return Err(GraphError::Config("max_history must be positive".into()));
    }
    if config.net_window == Some(0) {
        return Err(GraphError::Config("net_window must be positive".into()));
    }
    Ok(config)
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("system-graph").join("system-graph.toml")
}
