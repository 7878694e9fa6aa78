use mc_core::charset::{ASCII_CANDIDATES, EMOJI_CANDIDATES, EmojiCandidate, GlyphMode, is_single_glyph};
use mc_core::error::CoreError;
use mc_core::frame::FrameBuffer;
use mc_core::traits::GlyphRasterizer;

use crate::matcher::push_nearest;
use crate::table::{GlyphEntry, GlyphTable};

/// Borne haute des clés ASCII : 256 exclu.
fn ascii_key_ceiling() -> f32 {
    256.0_f32.next_down()
}

/// Construit la table de luminosité des glyphes ASCII.
///
/// Chaque caractère est rasterisé, sa couverture sommée puis normalisée
/// (`somme / hauteur × largeur`), rapportée au maximum et mise à l'échelle
/// dans [0, 256). Tri stable croissant : à clé égale, l'ordre des candidats
/// est conservé.
///
/// # Errors
/// - [`CoreError::EmptyPalette`] si `candidates` est vide.
/// - [`CoreError::DegenerateFont`] si tous les glyphes sont vides.
pub fn build_ascii_table<I, R>(candidates: I, rasterizer: &R) -> Result<GlyphTable<f32>, CoreError>
where
    I: IntoIterator<Item = char>,
    R: GlyphRasterizer + ?Sized,
{
    let (font_w, font_h) = rasterizer.cell_size();
    let font_w = f64::from(font_w);
    let font_h = f64::from(font_h);

    let mut buf = [0u8; 4];
    let raw: Vec<(f64, char)> = candidates
        .into_iter()
        .map(|ch| {
            let mask = rasterizer.rasterize(ch.encode_utf8(&mut buf));
            (mask.sum() as f64 / font_h * font_w, ch)
        })
        .collect();

    if raw.is_empty() {
        return Err(CoreError::EmptyPalette {
            mode: GlyphMode::Ascii.to_string(),
        });
    }

    let max = raw.iter().map(|&(v, _)| v).fold(0.0_f64, f64::max);
    if max <= 0.0 || !max.is_finite() {
        return Err(CoreError::DegenerateFont);
    }

    let ceiling = ascii_key_ceiling();
    let mut entries: Vec<GlyphEntry<f32>> = raw
        .into_iter()
        .map(|(v, ch)| {
            let key = ((v / max * 256.0) as f32).min(ceiling);
            GlyphEntry::new(key, ch.to_string())
        })
        .collect();
    entries.sort_by(|a, b| a.key.total_cmp(&b.key));

    let table = GlyphTable::from_entries(entries).ok_or_else(|| CoreError::EmptyPalette {
        mode: GlyphMode::Ascii.to_string(),
    })?;
    log::info!(
        "Palette ASCII : {} glyphes, '{}' ({:.1}) → '{}' ({:.1})",
        table.len(),
        table.first().glyph,
        table.first().key,
        table.last().glyph,
        table.last().key
    );
    Ok(table)
}

/// Construit la table de couleurs moyennes des emoji.
///
/// Les candidats qui ne sont pas un point de code isolé sont écartés, de même
/// que ceux que la police ne sait pas dessiner (masque vide) : silencieusement,
/// avec un log debug. Tri stable croissant par `r + g + b`.
///
/// # Errors
/// [`CoreError::EmptyPalette`] si aucun candidat n'a survécu.
pub fn build_emoji_table<R>(
    candidates: &[EmojiCandidate],
    rasterizer: &R,
) -> Result<GlyphTable<[f32; 3]>, CoreError>
where
    R: GlyphRasterizer + ?Sized,
{
    let mut entries = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !is_single_glyph(candidate.glyph) {
            log::debug!("Emoji ignoré (séquence) : {:?}", candidate.glyph);
            continue;
        }
        let mask = rasterizer.rasterize_color(candidate.glyph);
        let Some(avg) = mask.average_rgb() else {
            log::debug!(
                "Emoji ignoré (pas de glyphe dans la police) : {} [{:?}]",
                candidate.glyph,
                candidate.category
            );
            continue;
        };
        entries.push(GlyphEntry::new(avg, candidate.glyph));
    }

    let dropped = candidates.len() - entries.len();
    entries.sort_by(|a, b| color_sum(&a.key).total_cmp(&color_sum(&b.key)));

    let table = GlyphTable::from_entries(entries).ok_or_else(|| CoreError::EmptyPalette {
        mode: GlyphMode::Emoji.to_string(),
    })?;
    log::info!(
        "Palette emoji : {} glyphes ({dropped} écartés)",
        table.len()
    );
    Ok(table)
}

fn color_sum(rgb: &[f32; 3]) -> f32 {
    rgb[0] + rgb[1] + rgb[2]
}

/// Palette active : une table et le mode qui va avec.
///
/// Construite une fois au démarrage, en lecture seule ensuite. Chaque variante
/// porte sa propre table typée, ce qui interdit de comparer une luminosité à
/// une table de couleurs.
#[derive(Clone, Debug, PartialEq)]
pub enum Palette {
    /// Luminosity-ranked ASCII characters.
    Ascii(GlyphTable<f32>),
    /// Color-ranked emoji.
    Emoji(GlyphTable<[f32; 3]>),
}

impl Palette {
    /// Build the palette for `mode` from the built-in candidate sets.
    ///
    /// # Errors
    /// See [`build_ascii_table`] and [`build_emoji_table`].
    pub fn build<R>(mode: GlyphMode, rasterizer: &R) -> Result<Self, CoreError>
    where
        R: GlyphRasterizer + ?Sized,
    {
        match mode {
            GlyphMode::Ascii => build_ascii_table(ASCII_CANDIDATES.chars(), rasterizer).map(Self::Ascii),
            GlyphMode::Emoji => build_emoji_table(EMOJI_CANDIDATES, rasterizer).map(Self::Emoji),
        }
    }

    /// Mode of this palette.
    #[must_use]
    pub fn mode(&self) -> GlyphMode {
        match self {
            Self::Ascii(_) => GlyphMode::Ascii,
            Self::Emoji(_) => GlyphMode::Emoji,
        }
    }

    /// Number of glyphs.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Ascii(t) => t.len(),
            Self::Emoji(t) => t.len(),
        }
    }

    /// Always false: palettes are non-empty by construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Ajoute à `out` le glyphe du pixel (x, y) de `frame`.
    ///
    /// ASCII : luminosité moyenne des trois canaux, glyphe doublé. Emoji :
    /// couleur brute du pixel, glyphe simple.
    #[inline]
    pub fn push_cell(&self, frame: &FrameBuffer, x: u32, y: u32, out: &mut String) {
        match self {
            Self::Ascii(table) => {
                push_nearest(table, &frame.mean_brightness(x, y), GlyphMode::Ascii.glyph_repeat(), out);
            }
            Self::Emoji(table) => {
                push_nearest(table, &frame.rgb(x, y), GlyphMode::Emoji.glyph_repeat(), out);
            }
        }
    }
}
