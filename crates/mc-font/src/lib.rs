/// Font loading and glyph rasterization for mosaicam.
///
/// `ab_glyph` for outlines, embedded PNG strikes decoded with `image` for
/// color emoji fonts.

pub mod rasterizer;
pub mod resolver;

pub use rasterizer::FontRasterizer;
pub use resolver::{FontKind, FontResolver};
