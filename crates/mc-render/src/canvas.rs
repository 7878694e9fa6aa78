use mc_core::frame::GlyphGrid;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

/// Écrit une ligne de texte à (`row`, `col`) relatif à `area`, tronquée au bord.
///
/// Hors de `area`, rien n'est écrit.
pub fn write_line(buf: &mut Buffer, area: Rect, row: u16, col: u16, text: &str) {
    if row >= area.height || col >= area.width {
        return;
    }
    let max_width = usize::from(area.width - col);
    buf.set_stringn(area.x + col, area.y + row, text, max_width, Style::default());
}

/// Écrit directement une `GlyphGrid` dans un `ratatui::Buffer`, une ligne par
/// rangée à partir du coin haut-gauche de `area`.
///
/// Les lignes qui dépassent `area` sont tronquées. Pas de couleur : le
/// terminal garde ses couleurs par défaut.
///
/// # Example
/// ```
/// use mc_core::frame::GlyphGrid;
/// use mc_render::canvas::render_grid;
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
///
/// let area = Rect::new(0, 0, 4, 2);
/// let mut buf = Buffer::empty(area);
/// let grid = GlyphGrid { lines: vec!["@@..".into(), "::##".into()], cells_per_line: 2 };
/// render_grid(&mut buf, area, &grid);
/// assert_eq!(buf.cell((2, 1)).map(|c| c.symbol()), Some("#"));
/// ```
pub fn render_grid(buf: &mut Buffer, area: Rect, grid: &GlyphGrid) {
    let visible = grid.height().min(usize::from(area.height));
    if visible < grid.height() {
        log::trace!(
            "Grille tronquée : {} lignes pour {} disponibles",
            grid.height(),
            area.height
        );
    }
    for (row, line) in grid.iter().take(visible).enumerate() {
        write_line(buf, area, row as u16, 0, line);
    }
}
