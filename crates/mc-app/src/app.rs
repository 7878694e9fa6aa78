use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use mc_core::traits::Source;
use mc_render::canvas::render_grid;
use ratatui::DefaultTerminal;

use crate::pipeline::FramePipeline;

/// Cadence d'affichage pour une source non-live (image fixe).
const STILL_FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Pourquoi la boucle principale s'est arrêtée.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Une touche a été pressée.
    KeyPressed,
    /// La source n'a pas pu fournir de frame.
    CaptureFailed,
}

/// État de l'application : une source, un pipeline, rien d'autre.
pub struct App {
    source: Box<dyn Source>,
    pipeline: FramePipeline,
}

impl App {
    #[must_use]
    pub fn new(source: Box<dyn Source>, pipeline: FramePipeline) -> Self {
        Self { source, pipeline }
    }

    /// Boucle principale, sur le thread courant.
    ///
    /// Chaque itération : touche pressée ? → frame suivante → grille → dessin.
    /// La lecture webcam bloque jusqu'à la prochaine frame, c'est elle qui
    /// donne la cadence.
    ///
    /// # Errors
    /// Returns an error if terminal operations fail or a frame cannot be processed.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> Result<ExitReason> {
        let wait = if self.source.is_live() {
            Duration::ZERO
        } else {
            STILL_FRAME_INTERVAL
        };

        loop {
            if key_pressed(wait)? {
                log::info!("Touche pressée, arrêt");
                return Ok(ExitReason::KeyPressed);
            }

            let Some(raw) = self.source.next_frame() else {
                return Ok(ExitReason::CaptureFailed);
            };
            let grid = self.pipeline.process(&raw)?;

            terminal.draw(|frame| {
                let area = frame.area();
                render_grid(frame.buffer_mut(), area, &grid);
            })?;
        }
    }

    /// Une seule frame, rendue en lignes de texte.
    ///
    /// # Errors
    /// Returns an error if the frame cannot be processed.
    pub fn render_once(&mut self) -> Result<Option<Vec<String>>> {
        let Some(raw) = self.source.next_frame() else {
            return Ok(None);
        };
        Ok(Some(self.pipeline.process(&raw)?.lines))
    }
}

/// Vrai si une touche a été pressée pendant `wait`. Les autres événements
/// (resize, souris, relâchement) sont consommés et ignorés.
fn key_pressed(wait: Duration) -> Result<bool> {
    if !event::poll(wait)? {
        return Ok(false);
    }
    loop {
        if is_key_press(&event::read()?) {
            return Ok(true);
        }
        if !event::poll(Duration::ZERO)? {
            return Ok(false);
        }
    }
}

fn is_key_press(event: &Event) -> bool {
    matches!(event, Event::Key(key) if key.kind == KeyEventKind::Press)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};
    use mc_core::config::RenderConfig;
    use mc_core::frame::FrameBuffer;
    use mc_glyph::{GlyphEntry, GlyphTable, Palette};
    use mc_source::image::ImageSource;

    /// Source qui s'épuise après `remaining` frames.
    struct FiniteSource {
        remaining: usize,
    }

    impl Source for FiniteSource {
        fn next_frame(&mut self) -> Option<FrameBuffer> {
            self.remaining = self.remaining.checked_sub(1)?;
            Some(FrameBuffer::filled(8, 8, (255, 255, 255)))
        }

        fn native_size(&self) -> (u32, u32) {
            (8, 8)
        }

        fn is_live(&self) -> bool {
            true
        }
    }

    fn pipeline(width: u32, height: u32) -> FramePipeline {
        let table = GlyphTable::from_entries(vec![
            GlyphEntry::new(0.0, "."),
            GlyphEntry::new(250.0, "#"),
        ])
        .unwrap();
        FramePipeline::new(
            Palette::Ascii(table),
            RenderConfig {
                width,
                height,
                ..RenderConfig::default()
            },
        )
    }

    #[test]
    fn render_once_produces_configured_grid() {
        let source = ImageSource::from_frame(FrameBuffer::new(32, 32));
        let mut app = App::new(Box::new(source), pipeline(3, 2));
        let lines = app.render_once().unwrap().unwrap();
        assert_eq!(lines, vec!["......".to_string(), "......".to_string()]);
    }

    #[test]
    fn exhausted_source_yields_nothing() {
        let mut app = App::new(Box::new(FiniteSource { remaining: 1 }), pipeline(1, 1));
        assert_eq!(app.render_once().unwrap(), Some(vec!["##".to_string()]));
        assert_eq!(app.render_once().unwrap(), None);
    }

    #[test]
    fn only_key_presses_stop_the_loop() {
        let press = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(is_key_press(&Event::Key(press)));

        let release = KeyEvent {
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
            ..press
        };
        assert!(!is_key_press(&Event::Key(release)));
        assert!(!is_key_press(&Event::Resize(80, 24)));
        assert!(!is_key_press(&Event::FocusLost));
    }
}
