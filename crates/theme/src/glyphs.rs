/// Empty cell: quantization level 0.
pub const EMPTY: char = ' ';

/// Lower block elements U+2581 (one eighth) through U+2588 (full block).
pub const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Reserved glyph for samples that could not be read.
pub const UNREADABLE: char = '·';

/// The default level sequence: empty cell followed by the eight blocks.
pub fn default_levels() -> Vec<char> {
    std::iter::once(EMPTY).chain(BLOCKS).collect()
}
