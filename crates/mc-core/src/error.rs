use std::path::PathBuf;

use thiserror::Error;

/// Errors originating from the core pipeline.
///
/// Every variant except [`CoreError::Capture`] is fatal at startup: without a
/// palette there is nothing to render.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Glyph mode outside `ascii` / `emoji`.
    #[error("Mode non supporté : '{mode}' (attendu : ascii, emoji)")]
    UnsupportedMode {
        /// The rejected mode string.
        mode: String,
    },

    /// The font resource could not be opened or parsed.
    #[error("Impossible de charger la police {}: {reason}", path.display())]
    FontLoad {
        /// Path that was tried last.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },

    /// Every ASCII candidate rendered blank, normalization would divide by zero.
    #[error("Police dégénérée : tous les glyphes ASCII sont vides")]
    DegenerateFont,

    /// No candidate survived rasterization.
    #[error("Palette vide pour le mode {mode} : aucun glyphe rasterisable")]
    EmptyPalette {
        /// Mode whose palette came out empty.
        mode: String,
    },

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// The capture device could not be opened.
    #[error("Capture impossible : {0}")]
    Capture(String),
}
