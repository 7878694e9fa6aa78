use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec, GlyphId, GlyphImageFormat, PxScale};
use image::ImageFormat;
use mc_core::error::CoreError;
use mc_core::mask::{ColorMask, CoverageMask};
use mc_core::traits::GlyphRasterizer;

/// Rasteriseur de glyphes adossé à une police TrueType / OpenType.
///
/// Les masques de couverture viennent des contours (`ab_glyph`) ; les masques
/// couleur viennent des bitmaps PNG embarqués des polices emoji (sbix, CBDT),
/// avec repli sur le contour en blanc si la police n'en a pas.
pub struct FontRasterizer {
    font: FontVec,
    scale: PxScale,
    pixel_size: f32,
    path: PathBuf,
}

impl FontRasterizer {
    /// Charge la police à `path` (index 0 pour les collections `.ttc`).
    ///
    /// # Errors
    /// [`CoreError::FontLoad`] si le fichier est illisible ou n'est pas une
    /// police valide.
    pub fn load(path: &Path, pixel_size: f32) -> Result<Self, CoreError> {
        let data = std::fs::read(path).map_err(|e| CoreError::FontLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let rasterizer = Self::from_vec(data, pixel_size, path)?;
        log::info!("Police chargée : {} @ {pixel_size}px", path.display());
        Ok(rasterizer)
    }

    /// Parse une police déjà en mémoire. `origin` ne sert qu'aux messages.
    ///
    /// # Errors
    /// [`CoreError::FontLoad`] si les octets ne forment pas une police valide.
    pub fn from_vec(data: Vec<u8>, pixel_size: f32, origin: &Path) -> Result<Self, CoreError> {
        let font = FontVec::try_from_vec_and_index(data, 0).map_err(|e| CoreError::FontLoad {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            font,
            scale: PxScale::from(pixel_size),
            pixel_size,
            path: origin.to_path_buf(),
        })
    }

    /// Path the font was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Glyph id of the first code point of `glyph`, `None` for .notdef.
    fn glyph_id(&self, glyph: &str) -> Option<GlyphId> {
        let ch = glyph.chars().next()?;
        let gid = self.font.glyph_id(ch);
        // glyph_id 0 = .notdef : la police ne couvre pas ce caractère
        if gid.0 == 0 { None } else { Some(gid) }
    }

    fn rasterize_outline(&self, gid: GlyphId) -> CoverageMask {
        let Some(outline) = self.font.outline_glyph(gid.with_scale(self.scale)) else {
            return CoverageMask::default();
        };
        let bounds = outline.px_bounds();
        let width = bounds.width().max(0.0) as u32;
        let height = bounds.height().max(0.0) as u32;
        let mut data = vec![0u8; (width * height) as usize];
        outline.draw(|x, y, v| {
            let idx = (y * width + x) as usize;
            if x < width && idx < data.len() {
                data[idx] = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
            }
        });
        CoverageMask {
            width,
            height,
            data,
        }
    }

    fn rasterize_bitmap(&self, gid: GlyphId) -> Option<ColorMask> {
        let size = self.pixel_size.round().clamp(1.0, f32::from(u16::MAX)) as u16;
        let img = self.font.glyph_raster_image2(gid, size)?;
        match img.format {
            GlyphImageFormat::Png => match decode_png_strike(img.data) {
                Ok(mask) => Some(mask),
                Err(e) => {
                    log::warn!("Bitmap PNG illisible dans {} : {e}", self.path.display());
                    None
                }
            },
            GlyphImageFormat::BitmapPremulBgra32 => Some(ColorMask {
                width: u32::from(img.width),
                height: u32::from(img.height),
                data: premul_bgra_to_rgba(img.data),
            }),
            other => {
                log::debug!("Format bitmap non géré : {other:?}");
                None
            }
        }
    }
}

/// Décode une strike PNG (sbix, CBDT) en masque RGBA.
fn decode_png_strike(data: &[u8]) -> image::ImageResult<ColorMask> {
    let decoded = image::load_from_memory_with_format(data, ImageFormat::Png)?.to_rgba8();
    let (width, height) = decoded.dimensions();
    Ok(ColorMask {
        width,
        height,
        data: decoded.into_raw(),
    })
}

/// Canal prémultiplié → canal droit. Alpha nul → 0.
#[inline]
fn unpremultiply(c: u8, a: u8) -> u8 {
    if a == 0 {
        0
    } else {
        (u32::from(c) * 255 / u32::from(a)).min(255) as u8
    }
}

/// BGRA prémultiplié → RGBA non prémultiplié.
fn premul_bgra_to_rgba(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for px in data.chunks_exact(4) {
        let a = px[3];
        out.extend_from_slice(&[
            unpremultiply(px[2], a),
            unpremultiply(px[1], a),
            unpremultiply(px[0], a),
            a,
        ]);
    }
    out
}

impl GlyphRasterizer for FontRasterizer {
    fn rasterize(&self, glyph: &str) -> CoverageMask {
        self.glyph_id(glyph)
            .map(|gid| self.rasterize_outline(gid))
            .unwrap_or_default()
    }

    fn rasterize_color(&self, glyph: &str) -> ColorMask {
        let Some(gid) = self.glyph_id(glyph) else {
            return ColorMask::default();
        };
        if let Some(mask) = self.rasterize_bitmap(gid) {
            return mask;
        }
        // Pas de bitmap : contour en blanc, alpha = couverture
        let coverage = self.rasterize_outline(gid);
        if coverage.is_empty() {
            return ColorMask::default();
        }
        let data = coverage
            .data
            .iter()
            .flat_map(|&v| [255, 255, 255, v])
            .collect();
        ColorMask {
            width: coverage.width,
            height: coverage.height,
            data,
        }
    }

    fn cell_size(&self) -> (f32, f32) {
        (self.pixel_size, self.pixel_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{FontKind, FontResolver};

    /// Première police monospace système, s'il y en a une.
    fn system_monospace() -> Option<FontRasterizer> {
        FontResolver::platform_default()
            .load(FontKind::Monospace, 64.0)
            .ok()
    }

    #[test]
    fn unpremultiply_restores_straight_alpha() {
        assert_eq!(unpremultiply(200, 0), 0);
        assert_eq!(unpremultiply(64, 128), 127);
        assert_eq!(unpremultiply(128, 128), 255);
        assert_eq!(unpremultiply(90, 255), 90);
        // entrée invalide (canal > alpha) : saturée
        assert_eq!(unpremultiply(200, 100), 255);
    }

    #[test]
    fn premul_bgra_is_swapped_to_rgba() {
        let out = premul_bgra_to_rgba(&[10, 20, 30, 255, 50, 60, 70, 0]);
        assert_eq!(out, vec![30, 20, 10, 255, 0, 0, 0, 0]);
    }

    #[test]
    fn png_strike_decodes_to_rgba() {
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([250, 120, 0, 255]));
        let mut png = std::io::Cursor::new(Vec::new());
        img.write_to(&mut png, ImageFormat::Png).unwrap();

        let mask = decode_png_strike(png.get_ref()).unwrap();
        assert_eq!((mask.width, mask.height), (3, 2));
        assert_eq!(mask.average_rgb(), Some([250.0, 120.0, 0.0]));
        assert!(decode_png_strike(b"not a png").is_err());
    }

    #[test]
    fn outline_glyph_has_ink_and_space_has_none() {
        let Some(font) = system_monospace() else {
            eprintln!("aucune police monospace système, test ignoré");
            return;
        };
        let at = font.rasterize("@");
        assert!(at.width > 0 && at.height > 0);
        assert!(at.width <= 64 && at.height <= 96, "{}x{}", at.width, at.height);
        assert_eq!(at.data.len(), (at.width * at.height) as usize);
        assert!(at.sum() > 0);
        assert!(at.sum() > font.rasterize(".").sum());
        assert!(font.rasterize(" ").is_empty());
    }

    #[test]
    fn outline_font_colors_fall_back_to_white() {
        let Some(font) = system_monospace() else {
            eprintln!("aucune police monospace système, test ignoré");
            return;
        };
        let coverage = font.rasterize("#");
        let color = font.rasterize_color("#");
        assert_eq!((color.width, color.height), (coverage.width, coverage.height));
        for (px, &v) in color.data.chunks_exact(4).zip(&coverage.data) {
            assert_eq!(px, [255, 255, 255, v]);
        }
    }

    #[test]
    fn missing_file_is_font_load_error() {
        let err = FontRasterizer::load(Path::new("/nonexistent/Hack-Regular.ttf"), 64.0)
            .err()
            .unwrap();
        assert!(matches!(err, CoreError::FontLoad { ref path, .. } if path.ends_with("Hack-Regular.ttf")));
    }

    #[test]
    fn garbage_bytes_are_font_load_error() {
        let err = FontRasterizer::from_vec(b"not a font".to_vec(), 64.0, Path::new("mem"))
            .err()
            .unwrap();
        assert!(matches!(err, CoreError::FontLoad { .. }));
    }
}
