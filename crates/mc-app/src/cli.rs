use std::path::PathBuf;

use clap::Parser;
use mc_core::charset::GlyphMode;
use mc_core::config::{RenderConfig, load_config};
use mc_core::error::CoreError;

/// mosaicam : webcam en mosaïque ASCII / emoji dans le terminal.
///
/// Appuyez sur une touche pour quitter.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Palette : "ascii" ou "emoji". Défaut : ascii.
    #[arg(long = "type", value_name = "ascii|emoji")]
    pub glyph_type: Option<String>,

    /// Largeur de sortie en cellules. Doit tenir dans le terminal. Défaut : 75.
    #[arg(long)]
    pub width: Option<u32>,

    /// Hauteur de sortie en cellules. Doit tenir dans le terminal. Défaut : 50.
    #[arg(long)]
    pub height: Option<u32>,

    /// Fichier de configuration TOML optionnel.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Utiliser une image fixe au lieu de la webcam.
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Périphérique de capture explicite (ex: /dev/video2, "video=HD Webcam").
    #[arg(long)]
    pub device: Option<String>,

    /// Index du périphérique de capture.
    #[arg(long)]
    pub device_index: Option<u32>,

    /// Police monospace pour la palette ASCII.
    #[arg(long)]
    pub ascii_font: Option<PathBuf>,

    /// Police couleur pour la palette emoji.
    #[arg(long)]
    pub emoji_font: Option<PathBuf>,

    /// Rendre une seule frame sur stdout, sans interface plein écran.
    #[arg(long, default_value_t = false)]
    pub once: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Mode demandé sur la ligne de commande, validé.
    ///
    /// # Errors
    /// [`CoreError::UnsupportedMode`] pour tout autre mot que ascii / emoji.
    pub fn glyph_mode(&self) -> Result<Option<GlyphMode>, CoreError> {
        self.glyph_type.as_deref().map(str::parse).transpose()
    }

    /// Config finale : défauts, puis fichier `--config`, puis flags.
    ///
    /// # Errors
    /// Returns an error if the mode is unsupported, the config file cannot be
    /// loaded, or the output dimensions are zero or too large for a frame.
    pub fn resolve_config(&self) -> anyhow::Result<RenderConfig> {
        let mode = self.glyph_mode()?;

        let mut config = match self.config {
            Some(ref path) => load_config(path)?,
            None => RenderConfig::default(),
        };

        if let Some(mode) = mode {
            config.mode = mode;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        config.validate_dimensions()?;
        if self.device.is_some() {
            config.capture.device.clone_from(&self.device);
        }
        if let Some(index) = self.device_index {
            config.capture.index = index;
        }
        if self.ascii_font.is_some() {
            config.font.ascii_font.clone_from(&self.ascii_font);
        }
        if self.emoji_font.is_some() {
            config.font.emoji_font.clone_from(&self.emoji_font);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mosaicam").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_original_tool() {
        let config = parse(&[]).resolve_config().unwrap();
        assert_eq!(config.mode, GlyphMode::Ascii);
        assert_eq!((config.width, config.height), (75, 50));
    }

    #[test]
    fn type_width_height_flags() {
        let config = parse(&["--type", "emoji", "--width", "40", "--height", "20"])
            .resolve_config()
            .unwrap();
        assert_eq!(config.mode, GlyphMode::Emoji);
        assert_eq!((config.width, config.height), (40, 20));
    }

    #[test]
    fn unsupported_mode_is_rejected_before_anything_else() {
        let cli = parse(&["--type", "braille", "--config", "/nonexistent.toml"]);
        let err = cli.resolve_config().unwrap_err();
        let core = err.downcast_ref::<CoreError>().unwrap();
        assert!(matches!(core, CoreError::UnsupportedMode { mode } if mode == "braille"));
    }

    #[test]
    fn zero_width_is_invalid() {
        let err = parse(&["--width", "0"]).resolve_config().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidDimensions { width: 0, height: 50 })
        ));
    }

    #[test]
    fn oversized_dimensions_are_invalid() {
        let err = parse(&["--width", "70000", "--height", "70000"])
            .resolve_config()
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidDimensions {
                width: 70_000,
                height: 70_000
            })
        ));
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\nmode = \"emoji\"\nwidth = 10\ncontrast = 2.0").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let config = parse(&["--config", &path, "--width", "33"]).resolve_config().unwrap();
        assert_eq!(config.mode, GlyphMode::Emoji);
        assert_eq!(config.width, 33);
        assert!((config.adjust.contrast - 2.0).abs() < f32::EPSILON);

        let config = parse(&["--config", &path, "--type", "ascii"]).resolve_config().unwrap();
        assert_eq!(config.mode, GlyphMode::Ascii);
    }

    #[test]
    fn font_and_device_overrides() {
        let config = parse(&["--emoji-font", "e.ttf", "--device-index", "3"])
            .resolve_config()
            .unwrap();
        assert_eq!(config.font.emoji_font, Some(PathBuf::from("e.ttf")));
        assert_eq!(config.capture.index, 3);
    }
}
