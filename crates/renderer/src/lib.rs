//! Turns normalized readings into block-character graphs.
//!
//! Everything here is a pure function of its inputs.

use graph_core::{Metric, Reading};
use graph_theme::Palette;

/// Quantization level of `value` on a `levels`-step scale:
/// `floor(value * (levels - 1) + 0.5)`, clamped to `[0, levels - 1]`.
pub fn quantize(value: f64, levels: usize) -> usize {
    let top = levels.saturating_sub(1);
    if value.is_nan() {
        return 0;
    }
    let level = (value * top as f64 + 0.5).floor();
    if level <= 0.0 {
        0
    } else {
        (level as usize).min(top)
    }
}

/// Glyph for one reading.  Unreadable always maps to the reserved glyph.
pub fn glyph(reading: Reading, palette: &Palette) -> char {
    match reading {
        Reading::Value(v) => palette.glyph(quantize(v, palette.level_count())),
        Reading::Unreadable => palette.unreadable(),
    }
}

/// Render `values` (oldest first) as one glyph each, optionally prefixed with
/// the metric's label.
pub fn render(metric: &Metric, values: &[Reading], show_label: bool, palette: &Palette) -> String {
    let mut out = String::new();
    render_into(&mut out, metric, values, show_label, palette);
    out
}

/// Like [`render`], appending to an existing buffer.
pub fn render_into(
    out: &mut String,
    metric: &Metric,
    values: &[Reading],
    show_label: bool,
    palette: &Palette,
) {
    if show_label {
        out.push_str(&metric.label());
    }
    out.extend(values.iter().map(|&r| glyph(r, palette)));
}
