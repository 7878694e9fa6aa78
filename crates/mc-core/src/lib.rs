/// Configuration, types, and shared structures for mosaicam.
///
/// This crate contains the shared types, traits, glyph sets and configuration
/// logic used across the mosaicam workspace.

pub mod charset;
pub mod config;
pub mod error;
pub mod frame;
pub mod mask;
pub mod traits;

pub use charset::GlyphMode;
pub use config::{AdjustConfig, RenderConfig};
pub use error::CoreError;
pub use frame::{FrameBuffer, GlyphGrid};
pub use mask::{ColorMask, CoverageMask};
