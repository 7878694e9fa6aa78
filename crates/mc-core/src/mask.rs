/// Masque de couverture niveaux de gris d'un glyphe rasterisé.
///
/// Un octet par pixel, 0 = vide, 255 = couvert. Les dimensions sont celles de
/// la boîte englobante du glyphe ; un glyphe sans contour (espace) donne un
/// masque vide.
///
/// # Example
/// ```
/// use mc_core::mask::CoverageMask;
/// let mask = CoverageMask { width: 2, height: 1, data: vec![255, 0] };
/// assert_eq!(mask.sum(), 255);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoverageMask {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Coverage samples, row-major.
    pub data: Vec<u8>,
}

impl CoverageMask {
    /// Sum of every coverage sample.
    #[must_use]
    pub fn sum(&self) -> u64 {
        self.data.iter().map(|&v| u64::from(v)).sum()
    }

    /// True when the glyph has no visible shape.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Masque couleur RGBA d'un glyphe (emoji).
///
/// # Example
/// ```
/// use mc_core::mask::ColorMask;
/// let mask = ColorMask { width: 1, height: 1, data: vec![255, 0, 0, 255] };
/// assert_eq!(mask.average_rgb(), Some([255.0, 0.0, 0.0]));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorMask {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixels RGBA, row-major, non prémultipliés.
    pub data: Vec<u8>,
}

impl ColorMask {
    /// True when the glyph has no visible shape.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.len() < 4
    }

    /// Couleur moyenne sur tous les pixels du masque.
    ///
    /// Le masque est d'abord composé sur fond noir (canal × alpha), de sorte
    /// que les pixels transparents comptent comme du noir. Retourne `None`
    /// pour un masque vide.
    ///
    /// # Example
    /// ```
    /// use mc_core::mask::ColorMask;
    /// // un pixel blanc opaque, un pixel transparent
    /// let mask = ColorMask { width: 2, height: 1, data: vec![255, 255, 255, 255, 90, 90, 90, 0] };
    /// assert_eq!(mask.average_rgb(), Some([127.5, 127.5, 127.5]));
    /// assert_eq!(ColorMask::default().average_rgb(), None);
    /// ```
    #[must_use]
    pub fn average_rgb(&self) -> Option<[f32; 3]> {
        if self.is_empty() {
            return None;
        }
        let mut acc = [0f64; 3];
        let mut count = 0u64;
        for px in self.data.chunks_exact(4) {
            let alpha = f64::from(px[3]) / 255.0;
            acc[0] += f64::from(px[0]) * alpha;
            acc[1] += f64::from(px[1]) * alpha;
            acc[2] += f64::from(px[2]) * alpha;
            count += 1;
        }
        let n = count as f64;
        Some([
            (acc[0] / n) as f32,
            (acc[1] / n) as f32,
            (acc[2] / n) as f32,
        ])
    }
}
