/// Glyph mapping engine for mosaicam.
///
/// Builds glyph intensity tables from a rasterizer, then maps every cell of
/// a frame to its nearest glyph.

pub mod grid;
pub mod matcher;
pub mod palette;
pub mod table;

pub use grid::frame_to_glyph_grid;
pub use palette::Palette;
pub use table::{GlyphEntry, GlyphTable};
