pub mod glyphs;

use graph_config::PaletteConfig;
use tracing::warn;

/// Compiled glyph palette derived from [`PaletteConfig`].
///
/// Calling [`Palette::from_config`] is infallible: an unusable level string
/// or unreadable glyph falls back to the built-in block characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Glyphs from lowest (level 0) to highest; always at least two.
    levels:     Vec<char>,
    unreadable: char,
}

impl Palette {
    /// Build a [`Palette`] from the config file's `[palette]` section.
    pub fn from_config(cfg: &PaletteConfig) -> Self {
        let mut levels: Vec<char> = cfg.levels.chars().collect();
        if levels.len() < 2 {
            warn!(
                "palette.levels needs at least two glyphs (got {:?}); using defaults.",
                cfg.levels
            );
            levels = glyphs::default_levels();
        }

        let mut chars = cfg.unreadable.chars();
        let unreadable = match (chars.next(), chars.next()) {
            (Some(c), None) if !levels.contains(&c) => c,
            _ => {
                warn!(
                    "palette.unreadable must be a single glyph not used as a level (got {:?}); using '{}'.",
                    cfg.unreadable,
                    glyphs::UNREADABLE
                );
                glyphs::UNREADABLE
            }
        };

        // The default unreadable glyph may still collide with custom levels.
        if levels.contains(&unreadable) {
            warn!("palette.levels contains the unreadable glyph; using default levels.");
            levels = glyphs::default_levels();
        }

        Self { levels, unreadable }
    }

    /// Number of quantization levels (K).
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Glyph for `level`, saturating at the highest level.
    pub fn glyph(&self, level: usize) -> char {
        self.levels[level.min(self.levels.len() - 1)]
    }

    pub fn lowest(&self) -> char {
        self.levels[0]
    }

    pub fn highest(&self) -> char {
        self.levels[self.levels.len() - 1]
    }

    pub fn unreadable(&self) -> char {
        self.unreadable
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_config(&PaletteConfig::default())
    }
}
