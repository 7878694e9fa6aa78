/// Buffer de pixels d'une frame capturée.
///
/// Stocke les pixels en RGBA row-major, 4 bytes par pixel. Produit à chaque
/// capture, consommé immédiatement, puis jeté.
///
/// # Example
/// ```
/// use mc_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer noir opaque aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use mc_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.width, 100);
    /// assert_eq!(fb.height, 50);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// assert_eq!(fb.pixel(0, 0), (0, 0, 0, 255));
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let mut data = vec![0u8; width as usize * height as usize * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Taille en octets d'une frame `width`×`height`, ou `None` si elle ne
    /// tient pas sur 32 bits.
    ///
    /// # Example
    /// ```
    /// use mc_core::frame::FrameBuffer;
    /// assert_eq!(FrameBuffer::byte_len(75, 50), Some(75 * 50 * 4));
    /// assert_eq!(FrameBuffer::byte_len(70_000, 70_000), None);
    /// ```
    #[must_use]
    pub fn byte_len(width: u32, height: u32) -> Option<usize> {
        let bytes = width.checked_mul(height)?.checked_mul(4)?;
        usize::try_from(bytes).ok()
    }

    /// Frame of a single uniform color.
    ///
    /// # Example
    /// ```
    /// use mc_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::filled(2, 2, (128, 128, 128));
    /// assert_eq!(fb.pixel(1, 1), (128, 128, 128, 255));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, rgb: (u8, u8, u8)) -> Self {
        let mut fb = Self::new(width, height);
        for px in fb.data.chunks_exact_mut(4) {
            px[0] = rgb.0;
            px[1] = rgb.1;
            px[2] = rgb.2;
        }
        fb
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    ///
    /// # Example
    /// ```
    /// use mc_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(10, 10);
    /// let (r, g, b, a) = fb.pixel(0, 0);
    /// assert_eq!((r, g, b, a), (0, 0, 0, 255));
    /// ```
    #[inline]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        if idx + 3 >= self.data.len() {
            return (0, 0, 0, 0);
        }
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Color sample of pixel (x, y) as an `[r, g, b]` vector.
    #[inline]
    #[must_use]
    pub fn rgb(&self, x: u32, y: u32) -> [f32; 3] {
        let (r, g, b, _) = self.pixel(x, y);
        [f32::from(r), f32::from(g), f32::from(b)]
    }

    /// Moyenne arithmétique des trois canaux, dans [0, 255].
    ///
    /// Pas de pondération perceptuelle : c'est la même mesure que celle
    /// utilisée pour classer les glyphes ASCII.
    ///
    /// # Example
    /// ```
    /// use mc_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::filled(1, 1, (30, 60, 90));
    /// assert!((fb.mean_brightness(0, 0) - 60.0).abs() < f32::EPSILON);
    /// ```
    #[inline]
    #[must_use]
    pub fn mean_brightness(&self, x: u32, y: u32) -> f32 {
        let [r, g, b] = self.rgb(x, y);
        (r + g + b) / 3.0
    }

    /// True when the frame holds no pixel at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Grille de sortie : une ligne de texte par ligne de la frame.
///
/// Chaque ligne est la concaténation, de gauche à droite, des glyphes
/// retenus pour les cellules de cette ligne.
///
/// # Example
/// ```
/// use mc_core::frame::GlyphGrid;
/// let grid = GlyphGrid { lines: vec!["@@..".into(), "....".into()], cells_per_line: 2 };
/// assert_eq!(grid.height(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphGrid {
    /// Lignes, de haut en bas.
    pub lines: Vec<String>,
    /// Number of matched glyphs per line (the frame width).
    pub cells_per_line: usize,
}

impl GlyphGrid {
    /// Number of lines.
    #[must_use]
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Iterate over the lines top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}
