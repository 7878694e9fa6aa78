use std::path::Path;

use anyhow::Result;
use mc_core::config::RenderConfig;
use mc_core::frame::{FrameBuffer, GlyphGrid};
use mc_core::traits::Source;
use mc_font::FontResolver;
use mc_glyph::{Palette, frame_to_glyph_grid};
use mc_source::adjust::adjust_in_place;
use mc_source::image::ImageSource;
use mc_source::resize::Resizer;
use mc_source::webcam::WebcamSource;

/// Charge la police du mode courant et construit la palette.
///
/// Seule la police nécessaire au mode est ouverte.
///
/// # Errors
/// Returns an error if no font can be loaded or the palette ends up empty.
pub fn build_palette(config: &RenderConfig) -> Result<Palette> {
    let rasterizer =
        FontResolver::from_config(&config.font).load(config.mode.into(), config.font.font_size)?;
    let palette = Palette::build(config.mode, &rasterizer)?;
    log::info!(
        "Palette {} : {} glyphes depuis {}",
        palette.mode(),
        palette.len(),
        rasterizer.path().display()
    );
    Ok(palette)
}

/// Ouvre la source : image fixe si `image` est donné, sinon la webcam.
///
/// # Errors
/// Returns an error if the image cannot be decoded or ffmpeg cannot start.
pub fn open_source(image: Option<&Path>, config: &RenderConfig) -> Result<Box<dyn Source>> {
    let source: Box<dyn Source> = match image {
        Some(path) => Box::new(ImageSource::new(path)?),
        None => Box::new(WebcamSource::open(&config.capture)?),
    };
    let (width, height) = source.native_size();
    log::info!(
        "Source {} : {width}x{height}",
        if source.is_live() { "live" } else { "fixe" }
    );
    Ok(source)
}

/// Étapes par frame : redimensionnement, contraste / luminosité, mosaïque.
pub struct FramePipeline {
    palette: Palette,
    resizer: Resizer,
    config: RenderConfig,
}

impl FramePipeline {
    #[must_use]
    pub fn new(palette: Palette, config: RenderConfig) -> Self {
        Self {
            palette,
            resizer: Resizer::new(),
            config,
        }
    }

    /// Transforme une frame brute de la source en grille de glyphes
    /// `config.height` × `config.width`.
    ///
    /// # Errors
    /// Returns an error if the frame cannot be resized (empty frame).
    pub fn process(&mut self, raw: &FrameBuffer) -> Result<GlyphGrid> {
        let mut small = self
            .resizer
            .resize(raw, self.config.width, self.config.height)?;
        adjust_in_place(&mut small, &self.config.adjust);
        Ok(frame_to_glyph_grid(&small, &self.palette))
    }
}
