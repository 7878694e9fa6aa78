/// Une entrée de palette : clé d'intensité et glyphe associé.
///
/// La clé est un scalaire (luminosité ASCII) ou un vecteur RGB (emoji).
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphEntry<K> {
    /// Intensity key the matcher compares queries against.
    pub key: K,
    /// One displayable glyph.
    pub glyph: String,
}

impl<K> GlyphEntry<K> {
    /// Build an entry.
    pub fn new(key: K, glyph: impl Into<String>) -> Self {
        Self {
            key,
            glyph: glyph.into(),
        }
    }
}

/// Table de glyphes, jamais vide, immuable après construction.
///
/// L'ordre des entrées est celui donné à la construction (trié par le
/// builder) ; la recherche du plus proche parcourt la table linéairement et
/// ne dépend pas de cet ordre, sauf pour départager les égalités.
///
/// # Example
/// ```
/// use mc_glyph::table::{GlyphEntry, GlyphTable};
/// let table = GlyphTable::from_entries(vec![
///     GlyphEntry::new(0.0_f32, "a"),
///     GlyphEntry::new(100.0_f32, "c"),
/// ])
/// .unwrap();
/// assert_eq!(table.len(), 2);
/// assert!(GlyphTable::<f32>::from_entries(Vec::new()).is_none());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphTable<K> {
    entries: Vec<GlyphEntry<K>>,
}

impl<K> GlyphTable<K> {
    /// Wrap `entries` as-is. Returns `None` if there are none.
    #[must_use]
    pub fn from_entries(entries: Vec<GlyphEntry<K>>) -> Option<Self> {
        if entries.is_empty() {
            None
        } else {
            Some(Self { entries })
        }
    }

    /// Entries in table order.
    #[must_use]
    pub fn entries(&self) -> &[GlyphEntry<K>] {
        &self.entries
    }

    /// Number of entries, always ≥ 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry in table order.
    #[must_use]
    pub fn first(&self) -> &GlyphEntry<K> {
        &self.entries[0]
    }

    /// Last entry in table order.
    #[must_use]
    pub fn last(&self) -> &GlyphEntry<K> {
        &self.entries[self.entries.len() - 1]
    }

    /// Iterate over the glyphs in table order.
    pub fn glyphs(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.glyph.as_str())
    }
}
