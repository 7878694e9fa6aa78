/// Terminal rendering for mosaicam.
///
/// Writes glyph grids into a ratatui buffer.
pub mod canvas;
