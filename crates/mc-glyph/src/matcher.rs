use crate::table::{GlyphEntry, GlyphTable};

/// Clé comparable par distance.
///
/// `f32` : luminosité, distance absolue. `[f32; 3]` : couleur RGB, distance
/// euclidienne. Le type de clé fixe le type de table, donc une requête
/// scalaire ne peut pas être posée à une table couleur.
pub trait GlyphKey: Copy {
    /// Distance between two keys, ≥ 0.
    fn distance(&self, other: &Self) -> f32;
}

impl GlyphKey for f32 {
    #[inline]
    fn distance(&self, other: &Self) -> f32 {
        (self - other).abs()
    }
}

impl GlyphKey for [f32; 3] {
    #[inline]
    fn distance(&self, other: &Self) -> f32 {
        let dr = self[0] - other[0];
        let dg = self[1] - other[1];
        let db = self[2] - other[2];
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

impl<K: GlyphKey> GlyphTable<K> {
    /// Entrée dont la clé minimise la distance à `query`.
    ///
    /// Parcours linéaire ; en cas d'égalité la première entrée dans l'ordre de
    /// la table gagne. Une requête NaN retourne la première entrée.
    ///
    /// # Example
    /// ```
    /// use mc_glyph::table::{GlyphEntry, GlyphTable};
    /// let table = GlyphTable::from_entries(vec![
    ///     GlyphEntry::new(0.0_f32, "a"),
    ///     GlyphEntry::new(50.0_f32, "b"),
    ///     GlyphEntry::new(100.0_f32, "c"),
    /// ])
    /// .unwrap();
    /// assert_eq!(table.nearest(&40.0).glyph, "b");
    /// ```
    #[must_use]
    pub fn nearest(&self, query: &K) -> &GlyphEntry<K> {
        let entries = self.entries();
        let mut best = &entries[0];
        let mut best_dist = best.key.distance(query);
        for entry in &entries[1..] {
            let dist = entry.key.distance(query);
            if dist < best_dist {
                best = entry;
                best_dist = dist;
            }
        }
        best
    }
}

/// Ajoute à `out` le glyphe le plus proche de `query`, répété `repeat` fois.
#[inline]
pub fn push_nearest<K: GlyphKey>(table: &GlyphTable<K>, query: &K, repeat: usize, out: &mut String) {
    let glyph = &table.nearest(query).glyph;
    for _ in 0..repeat {
        out.push_str(glyph);
    }
}

/// Glyphe ASCII le plus proche d'une luminosité, doublé.
///
/// # Example
/// ```
/// use mc_glyph::matcher::match_brightness;
/// use mc_glyph::table::{GlyphEntry, GlyphTable};
/// let table = GlyphTable::from_entries(vec![
///     GlyphEntry::new(0.0_f32, "a"),
///     GlyphEntry::new(50.0_f32, "b"),
///     GlyphEntry::new(100.0_f32, "c"),
/// ])
/// .unwrap();
/// assert_eq!(match_brightness(&table, 40.0), "bb");
/// ```
#[must_use]
pub fn match_brightness(table: &GlyphTable<f32>, brightness: f32) -> String {
    let mut out = String::new();
    push_nearest(table, &brightness, 2, &mut out);
    out
}

/// Emoji le plus proche d'une couleur, non doublé.
///
/// # Example
/// ```
/// use mc_glyph::matcher::match_color;
/// use mc_glyph::table::{GlyphEntry, GlyphTable};
/// let table = GlyphTable::from_entries(vec![
///     GlyphEntry::new([0.0, 0.0, 0.0], "🙂"),
///     GlyphEntry::new([255.0, 255.0, 255.0], "⬜"),
/// ])
/// .unwrap();
/// assert_eq!(match_color(&table, [10.0, 10.0, 10.0]), "🙂");
/// ```
#[must_use]
pub fn match_color(table: &GlyphTable<[f32; 3]>, rgb: [f32; 3]) -> String {
    let mut out = String::new();
    push_nearest(table, &rgb, 1, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> GlyphTable<f32> {
        GlyphTable::from_entries(vec![
            GlyphEntry::new(0.0, "a"),
            GlyphEntry::new(50.0, "b"),
            GlyphEntry::new(100.0, "c"),
        ])
        .unwrap()
    }

    #[test]
    fn scalar_query_picks_closest_and_doubles() {
        assert_eq!(match_brightness(&abc(), 40.0), "bb");
        assert_eq!(match_brightness(&abc(), 0.0), "aa");
        assert_eq!(match_brightness(&abc(), 255.0), "cc");
    }

    #[test]
    fn emoji_query_is_not_doubled() {
        let table = GlyphTable::from_entries(vec![
            GlyphEntry::new([0.0, 0.0, 0.0], "🙂"),
            GlyphEntry::new([255.0, 255.0, 255.0], "⬜"),
        ])
        .unwrap();
        let out = match_color(&table, [10.0, 10.0, 10.0]);
        assert_eq!(out, "🙂");
        assert_eq!(out.chars().count(), 1);
        assert_eq!(match_color(&table, [200.0, 220.0, 250.0]), "⬜");
    }

    #[test]
    fn ties_go_to_first_entry() {
        // 25 est à égale distance de 'a' et 'b'
        assert_eq!(abc().nearest(&25.0).glyph, "a");
        let dup = GlyphTable::from_entries(vec![
            GlyphEntry::new(10.0, "x"),
            GlyphEntry::new(10.0, "y"),
        ])
        .unwrap();
        assert_eq!(dup.nearest(&10.0).glyph, "x");
    }

    #[test]
    fn single_entry_always_wins() {
        let table = GlyphTable::from_entries(vec![GlyphEntry::new([1.0, 2.0, 3.0], "🔥")]).unwrap();
        for q in [[0.0; 3], [255.0; 3], [f32::NAN; 3], [-1e9, 0.0, 1e9]] {
            assert_eq!(table.nearest(&q).glyph, "🔥");
        }
    }

    #[test]
    fn nearest_minimizes_distance_over_table() {
        let table = GlyphTable::from_entries(vec![
            GlyphEntry::new([250.0, 10.0, 10.0], "r"),
            GlyphEntry::new([10.0, 250.0, 10.0], "g"),
            GlyphEntry::new([10.0, 10.0, 250.0], "b"),
            GlyphEntry::new([128.0, 128.0, 128.0], "m"),
        ])
        .unwrap();
        for r in (0..=255).step_by(15) {
            for g in (0..=255).step_by(15) {
                for b in (0..=255).step_by(15) {
                    let q = [r as f32, g as f32, b as f32];
                    let got = table.nearest(&q);
                    let got_d = got.key.distance(&q);
                    for entry in table.entries() {
                        assert!(
                            got_d <= entry.key.distance(&q),
                            "{q:?} -> {} mais {} est plus proche",
                            got.glyph,
                            entry.glyph
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn euclidean_distance() {
        let d = [0.0_f32, 0.0, 0.0].distance(&[3.0, 4.0, 0.0]);
        assert!((d - 5.0).abs() < f32::EPSILON);
    }
}
