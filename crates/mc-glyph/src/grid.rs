use mc_core::frame::{FrameBuffer, GlyphGrid};

use crate::palette::Palette;

/// Convertit une frame en grille de glyphes, un pixel par cellule.
///
/// La frame doit déjà être redimensionnée à la taille de la grille. Une
/// ligne par ligne de pixels, de haut en bas ; dans chaque ligne, les
/// glyphes de gauche à droite. Fonction pure de `(frame, palette)`.
///
/// # Example
/// ```
/// use mc_core::frame::FrameBuffer;
/// use mc_glyph::table::{GlyphEntry, GlyphTable};
/// use mc_glyph::{frame_to_glyph_grid, Palette};
///
/// let table = GlyphTable::from_entries(vec![
///     GlyphEntry::new(0.0_f32, " "),
///     GlyphEntry::new(255.0_f32, "@"),
/// ])
/// .unwrap();
/// let frame = FrameBuffer::filled(3, 2, (250, 250, 250));
/// let grid = frame_to_glyph_grid(&frame, &Palette::Ascii(table));
/// assert_eq!(grid.lines, vec!["@@@@@@", "@@@@@@"]);
/// ```
#[must_use]
pub fn frame_to_glyph_grid(frame: &FrameBuffer, palette: &Palette) -> GlyphGrid {
    let repeat = palette.mode().glyph_repeat();
    let mut lines = Vec::with_capacity(frame.height as usize);
    for y in 0..frame.height {
        // 4 octets max par caractère UTF-8
        let mut line = String::with_capacity(frame.width as usize * repeat * 4);
        for x in 0..frame.width {
            palette.push_cell(frame, x, y, &mut line);
        }
        lines.push(line);
    }
    GlyphGrid {
        lines,
        cells_per_line: frame.width as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{GlyphEntry, GlyphTable};

    fn ramp() -> Palette {
        Palette::Ascii(
            GlyphTable::from_entries(vec![
                GlyphEntry::new(0.0, " "),
                GlyphEntry::new(64.0, "."),
                GlyphEntry::new(128.0, "+"),
                GlyphEntry::new(192.0, "#"),
                GlyphEntry::new(255.0, "@"),
            ])
            .unwrap(),
        )
    }

    fn swatches() -> Palette {
        Palette::Emoji(
            GlyphTable::from_entries(vec![
                GlyphEntry::new([0.0, 0.0, 0.0], "⬛"),
                GlyphEntry::new([220.0, 30.0, 30.0], "🟥"),
                GlyphEntry::new([30.0, 30.0, 220.0], "🟦"),
                GlyphEntry::new([255.0, 255.0, 255.0], "⬜"),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn uniform_gray_gives_same_doubled_glyph() {
        let frame = FrameBuffer::filled(2, 2, (128, 128, 128));
        let grid = frame_to_glyph_grid(&frame, &ramp());
        assert_eq!(grid.height(), 2);
        for line in grid.iter() {
            assert_eq!(line, "++++");
            assert_eq!(line.chars().count(), 4);
        }
    }

    #[test]
    fn grid_shape_matches_frame() {
        let frame = FrameBuffer::new(7, 5);
        let grid = frame_to_glyph_grid(&frame, &ramp());
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.cells_per_line, 7);
        assert!(grid.iter().all(|l| l.chars().count() == 14));

        let grid = frame_to_glyph_grid(&frame, &swatches());
        assert_eq!(grid.height(), 5);
        assert!(grid.iter().all(|l| l.chars().count() == 7));
    }

    #[test]
    fn cells_keep_row_and_column_order() {
        let mut frame = FrameBuffer::new(3, 2);
        // (0,0) blanc, (2,0) gris, (1,1) blanc
        for (x, y, v) in [(0u32, 0u32, 255u8), (2, 0, 128), (1, 1, 255)] {
            let idx = ((y * 3 + x) * 4) as usize;
            frame.data[idx..idx + 3].fill(v);
        }
        let grid = frame_to_glyph_grid(&frame, &ramp());
        assert_eq!(grid.lines, vec!["@@  ++", "  @@  "]);
    }

    #[test]
    fn emoji_mode_matches_on_color() {
        let mut frame = FrameBuffer::filled(3, 1, (200, 40, 40));
        frame.data[4..7].copy_from_slice(&[20, 20, 240]);
        frame.data[8..11].copy_from_slice(&[250, 250, 250]);
        let grid = frame_to_glyph_grid(&frame, &swatches());
        assert_eq!(grid.lines, vec!["🟥🟦⬜"]);
    }

    #[test]
    fn empty_frame_gives_empty_grid() {
        let grid = frame_to_glyph_grid(&FrameBuffer::new(0, 0), &ramp());
        assert_eq!(grid.height(), 0);
    }
}
