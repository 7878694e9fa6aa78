use crate::frame::FrameBuffer;
use crate::mask::{ColorMask, CoverageMask};

/// Fournit des frames visuelles à la boucle principale.
///
/// Implémenté par : `WebcamSource`, `ImageSource`.
///
/// # Example
/// ```
/// use mc_core::traits::Source;
/// use mc_core::frame::FrameBuffer;
///
/// struct DummySource;
/// impl Source for DummySource {
///     fn next_frame(&mut self) -> Option<FrameBuffer> { None }
///     fn native_size(&self) -> (u32, u32) { (0, 0) }
///     fn is_live(&self) -> bool { false }
/// }
/// ```
pub trait Source {
    /// Retourne la prochaine frame.
    ///
    /// Peut bloquer en attendant la caméra. `None` signifie que la source a
    /// échoué ou est épuisée : la boucle s'arrête, sans nouvelle tentative.
    fn next_frame(&mut self) -> Option<FrameBuffer>;

    /// Dimensions natives de la source (avant resize).
    fn native_size(&self) -> (u32, u32);

    /// Indique si la source est infinie (webcam) ou statique (image).
    fn is_live(&self) -> bool;
}

/// Rasterise un glyphe en masque, à taille de police fixe.
///
/// Implémenté par `mc_font::FontRasterizer` ; les tests utilisent des
/// rasteriseurs en mémoire.
///
/// # Example
/// ```
/// use mc_core::traits::GlyphRasterizer;
/// use mc_core::mask::{ColorMask, CoverageMask};
///
/// struct Blank;
/// impl GlyphRasterizer for Blank {
///     fn rasterize(&self, _glyph: &str) -> CoverageMask { CoverageMask::default() }
///     fn rasterize_color(&self, _glyph: &str) -> ColorMask { ColorMask::default() }
///     fn cell_size(&self) -> (f32, f32) { (64.0, 64.0) }
/// }
/// assert!(Blank.rasterize("a").is_empty());
/// ```
pub trait GlyphRasterizer {
    /// Coverage mask of `glyph` (grayscale). Empty if the font has no outline for it.
    fn rasterize(&self, glyph: &str) -> CoverageMask;

    /// RGBA mask of `glyph`. Empty if the font cannot render it.
    fn rasterize_color(&self, glyph: &str) -> ColorMask;

    /// Taille de police utilisée, `(largeur, hauteur)` en pixels.
    fn cell_size(&self) -> (f32, f32);
}
