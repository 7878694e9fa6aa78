use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Les 94 caractères imprimables candidats, dans l'ordre de `string.printable`
/// (chiffres, minuscules, majuscules, ponctuation). L'ordre compte : il
/// départage les égalités du tri stable.
pub const ASCII_CANDIDATES: &str = concat!(
    "0123456789",
    "abcdefghijklmnopqrstuvwxyz",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~",
);

/// Glyph palette family.
///
/// # Example
/// ```
/// use mc_core::charset::GlyphMode;
/// let mode: GlyphMode = "emoji".parse().unwrap();
/// assert_eq!(mode, GlyphMode::Emoji);
/// assert!("braille".parse::<GlyphMode>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphMode {
    /// Printable ASCII ranked by ink coverage.
    #[default]
    Ascii,
    /// Curated emoji ranked by average color.
    Emoji,
}

impl GlyphMode {
    /// Nom canonique, tel qu'accepté par `--type`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Emoji => "emoji",
        }
    }

    /// Nombre de répétitions d'un glyphe à l'affichage.
    ///
    /// Les caractères ASCII sont environ deux fois plus hauts que larges dans
    /// un terminal : on les double pour garder des cellules à peu près
    /// carrées. Les emoji occupent déjà deux colonnes.
    #[must_use]
    pub fn glyph_repeat(self) -> usize {
        match self {
            Self::Ascii => 2,
            Self::Emoji => 1,
        }
    }
}

impl fmt::Display for GlyphMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GlyphMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascii" => Ok(Self::Ascii),
            "emoji" => Ok(Self::Emoji),
            other => Err(CoreError::UnsupportedMode {
                mode: other.to_string(),
            }),
        }
    }
}

/// Version of [`EMOJI_CANDIDATES`]. Bump whenever the list changes, since
/// it changes palette results.
pub const EMOJI_SET_VERSION: u32 = 1;

/// Emoji grouping, kept for filtering and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmojiCategory {
    /// Faces and hands.
    Smileys,
    /// Animals and plants.
    Nature,
    /// Food and drink.
    Food,
    /// Places, vehicles, sky.
    Travel,
    /// Sports, games, celebrations.
    Activities,
    /// Tools, clothing, household items.
    Objects,
    /// Geometric shapes and signs.
    Symbols,
}

/// One curated emoji candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmojiCandidate {
    /// The grapheme to render.
    pub glyph: &'static str,
    /// Its group.
    pub category: EmojiCategory,
}

const fn e(glyph: &'static str, category: EmojiCategory) -> EmojiCandidate {
    EmojiCandidate { glyph, category }
}

/// Liste figée et versionnée des emoji candidats.
///
/// Uniquement des points de code isolés à présentation emoji par défaut,
/// choisis pour couvrir le cercle chromatique et la gamme de luminosité.
pub const EMOJI_CANDIDATES: &[EmojiCandidate] = {
    use EmojiCategory::{Activities, Food, Nature, Objects, Smileys, Symbols, Travel};
    &[
        // === Smileys ===
        e("😀", Smileys),
        e("😂", Smileys),
        e("😊", Smileys),
        e("😍", Smileys),
        e("😎", Smileys),
        e("😡", Smileys),
        e("😱", Smileys),
        e("🙂", Smileys),
        e("🤢", Smileys),
        e("🥶", Smileys),
        e("👻", Smileys),
        e("💀", Smileys),
        e("👽", Smileys),
        e("🤖", Smileys),
        e("💩", Smileys),
        e("👍", Smileys),
        // === Nature ===
        e("🐶", Nature),
        e("🐱", Nature),
        e("🐸", Nature),
        e("🐷", Nature),
        e("🐧", Nature),
        e("🐝", Nature),
        e("🐙", Nature),
        e("🦊", Nature),
        e("🐳", Nature),
        e("🌵", Nature),
        e("🌲", Nature),
        e("🍀", Nature),
        e("🌸", Nature),
        e("🌻", Nature),
        e("🌹", Nature),
        e("🍁", Nature),
        e("🌊", Nature),
        e("🔥", Nature),
        e("🌙", Nature),
        e("⭐", Nature),
        // === Food ===
        e("🍎", Food),
        e("🍊", Food),
        e("🍋", Food),
        e("🍌", Food),
        e("🍉", Food),
        e("🍇", Food),
        e("🍓", Food),
        e("🥝", Food),
        e("🥑", Food),
        e("🍆", Food),
        e("🥕", Food),
        e("🌽", Food),
        e("🍞", Food),
        e("🧀", Food),
        e("🍕", Food),
        e("🍫", Food),
        e("🍩", Food),
        e("🥛", Food),
        e("☕", Food),
        // === Travel ===
        e("🚗", Travel),
        e("🚕", Travel),
        e("🚒", Travel),
        e("🚜", Travel),
        e("🚀", Travel),
        e("🌋", Travel),
        e("🏠", Travel),
        e("🌅", Travel),
        e("🌌", Travel),
        e("🌈", Travel),
        e("⛅", Travel),
        e("⛄", Travel),
        // === Activities ===
        e("⚽", Activities),
        e("🏀", Activities),
        e("🎾", Activities),
        e("🎱", Activities),
        e("🎈", Activities),
        e("🎃", Activities),
        e("🎄", Activities),
        e("🎁", Activities),
        // === Objects ===
        e("👑", Objects),
        e("💎", Objects),
        e("👖", Objects),
        e("👗", Objects),
        e("💼", Objects),
        e("📦", Objects),
        e("💡", Objects),
        e("📕", Objects),
        e("📗", Objects),
        e("📘", Objects),
        e("📙", Objects),
        e("🔑", Objects),
        e("🧊", Objects),
        // === Symbols ===
        e("🧡", Symbols),
        e("💛", Symbols),
        e("💚", Symbols),
        e("💙", Symbols),
        e("💜", Symbols),
        e("🖤", Symbols),
        e("🤍", Symbols),
        e("🤎", Symbols),
        e("🔴", Symbols),
        e("🟠", Symbols),
        e("🟡", Symbols),
        e("🟢", Symbols),
        e("🔵", Symbols),
        e("🟣", Symbols),
        e("🟤", Symbols),
        e("⚫", Symbols),
        e("⚪", Symbols),
        e("🟥", Symbols),
        e("🟧", Symbols),
        e("🟨", Symbols),
        e("🟩", Symbols),
        e("🟦", Symbols),
        e("🟪", Symbols),
        e("🟫", Symbols),
        e("⬛", Symbols),
        e("⬜", Symbols),
    ]
};

/// True si `glyph` est un unique point de code.
///
/// Les séquences (ZWJ, sélecteurs de variante, drapeaux) sont écartées : leur
/// rendu dépend trop de la police et du terminal.
///
/// # Example
/// ```
/// use mc_core::charset::is_single_glyph;
/// assert!(is_single_glyph("🔥"));
/// assert!(!is_single_glyph("❤\u{fe0f}"));
/// assert!(!is_single_glyph(""));
/// ```
#[must_use]
pub fn is_single_glyph(glyph: &str) -> bool {
    let mut chars = glyph.chars();
    chars.next().is_some() && chars.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_candidates_are_the_94_printables() {
        assert_eq!(ASCII_CANDIDATES.chars().count(), 94);
        assert!(ASCII_CANDIDATES.chars().all(|c| c.is_ascii_graphic()));
        assert!(ASCII_CANDIDATES.starts_with("0123456789abc"));
        assert!(ASCII_CANDIDATES.ends_with("|}~"));
    }

    #[test]
    fn emoji_candidates_are_single_code_points() {
        for candidate in EMOJI_CANDIDATES {
            assert!(
                is_single_glyph(candidate.glyph),
                "{:?} n'est pas un point de code isolé",
                candidate.glyph
            );
        }
    }

    #[test]
    fn unknown_mode_is_typed_error() {
        let err = "Emoji".parse::<GlyphMode>().unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedMode { ref mode } if mode == "Emoji"));
    }

    #[test]
    fn only_ascii_doubles() {
        assert_eq!(GlyphMode::Ascii.glyph_repeat(), 2);
        assert_eq!(GlyphMode::Emoji.glyph_repeat(), 1);
    }
}
