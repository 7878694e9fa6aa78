use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::GlyphMode;
use crate::error::CoreError;
use crate::frame::FrameBuffer;

/// Largeur de sortie par défaut, en cellules.
pub const DEFAULT_WIDTH: u32 = 75;
/// Hauteur de sortie par défaut, en cellules.
pub const DEFAULT_HEIGHT: u32 = 50;
/// Taille de rasterisation des glyphes, en pixels.
pub const DEFAULT_FONT_SIZE: f32 = 64.0;

/// Configuration complète d'une session.
///
/// Les valeurs par défaut reproduisent le comportement sans fichier de
/// configuration. Les flags CLI sont appliqués par-dessus.
///
/// # Example
/// ```
/// use mc_core::config::RenderConfig;
/// let config = RenderConfig::default();
/// assert_eq!((config.width, config.height), (75, 50));
/// assert!((config.adjust.contrast - 1.0).abs() < f32::EPSILON);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RenderConfig {
    /// Palette active.
    pub mode: GlyphMode,
    /// Largeur de la grille, en cellules (colonnes de pixels après resize).
    pub width: u32,
    /// Hauteur de la grille, en cellules.
    pub height: u32,
    /// Contraste / luminosité appliqués à chaque frame.
    pub adjust: AdjustConfig,
    /// Polices et taille de rasterisation.
    pub font: FontConfig,
    /// Périphérique de capture.
    pub capture: CaptureConfig,
}

/// Réglage contraste / luminosité, `v' = |contrast × v + brightness|` saturé.
///
/// # Example
/// ```
/// use mc_core::config::AdjustConfig;
/// assert!(AdjustConfig::default().is_identity());
/// ```
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct AdjustConfig {
    /// Facteur multiplicatif [1.0, 3.0]. 1.0 = neutre.
    pub contrast: f32,
    /// Offset additif [0.0, 100.0]. 0.0 = neutre.
    pub brightness: f32,
}

impl AdjustConfig {
    /// True if applying this adjustment leaves every pixel unchanged.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        (self.contrast - 1.0).abs() < f32::EPSILON && self.brightness.abs() < f32::EPSILON
    }
}

impl Default for AdjustConfig {
    fn default() -> Self {
        Self {
            contrast: 1.0,
            brightness: 0.0,
        }
    }
}

/// Font selection. `None` lets the resolver pick a platform default.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct FontConfig {
    /// Police monospace pour la palette ASCII.
    pub ascii_font: Option<PathBuf>,
    /// Police couleur pour la palette emoji.
    pub emoji_font: Option<PathBuf>,
    /// Taille de rasterisation en pixels.
    pub font_size: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            ascii_font: None,
            emoji_font: None,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

/// Webcam selection and native capture format.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct CaptureConfig {
    /// Nom explicite du périphérique (ex: `/dev/video2`, `video=HD Webcam`).
    pub device: Option<String>,
    /// Index du périphérique quand `device` est absent.
    pub index: u32,
    /// Largeur demandée à la caméra.
    pub width: u32,
    /// Hauteur demandée à la caméra.
    pub height: u32,
    /// Images par seconde demandées.
    pub framerate: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device: None,
            index: 0,
            width: 640,
            height: 480,
            framerate: 30,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: GlyphMode::Ascii,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            adjust: AdjustConfig::default(),
            font: FontConfig::default(),
            capture: CaptureConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.width = self.width.max(1);
        self.height = self.height.max(1);
        self.adjust.contrast = self.adjust.contrast.clamp(1.0, 3.0);
        self.adjust.brightness = self.adjust.brightness.clamp(0.0, 100.0);
        self.font.font_size = self.font.font_size.clamp(8.0, 256.0);
        self.capture.width = self.capture.width.max(1);
        self.capture.height = self.capture.height.max(1);
        self.capture.framerate = self.capture.framerate.clamp(1, 120);
    }

    /// Vérifie que la grille et la capture sont allouables.
    ///
    /// # Errors
    /// [`CoreError::InvalidDimensions`] si une dimension de sortie est nulle,
    /// ou si une frame de sortie ou de capture ne tient pas sur 32 bits.
    ///
    /// # Example
    /// ```
    /// use mc_core::config::RenderConfig;
    /// let mut config = RenderConfig::default();
    /// assert!(config.validate_dimensions().is_ok());
    /// config.capture.width = 100_000;
    /// config.capture.height = 100_000;
    /// assert!(config.validate_dimensions().is_err());
    /// ```
    pub fn validate_dimensions(&self) -> Result<(), CoreError> {
        let checks = [
            (self.width, self.height, true),
            (self.capture.width, self.capture.height, false),
        ];
        for (width, height, non_zero) in checks {
            let empty = non_zero && (width == 0 || height == 0);
            if empty || FrameBuffer::byte_len(width, height).is_none() {
                return Err(CoreError::InvalidDimensions { width, height });
            }
        }
        Ok(())
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    render: Option<RenderSection>,
    font: Option<FontSection>,
    capture: Option<CaptureSection>,
}

#[derive(Deserialize)]
struct RenderSection {
    mode: Option<GlyphMode>,
    width: Option<u32>,
    height: Option<u32>,
    contrast: Option<f32>,
    brightness: Option<f32>,
}

#[derive(Deserialize)]
struct FontSection {
    ascii: Option<PathBuf>,
    emoji: Option<PathBuf>,
    size: Option<f32>,
}

#[derive(Deserialize)]
struct CaptureSection {
    device: Option<String>,
    index: Option<u32>,
    width: Option<u32>,
    height: Option<u32>,
    framerate: Option<u32>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// Toutes les sections et tous les champs sont optionnels.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use mc_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("mosaicam.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))
}

/// Parse TOML text into a config merged over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this schema.
///
/// # Example
/// ```
/// use mc_core::config::parse_config;
/// use mc_core::charset::GlyphMode;
/// let config = parse_config("[render]\nmode = \"emoji\"\nwidth = 40\n").unwrap();
/// assert_eq!(config.mode, GlyphMode::Emoji);
/// assert_eq!(config.width, 40);
/// assert_eq!(config.height, 50);
/// ```
pub fn parse_config(content: &str) -> Result<RenderConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = RenderConfig::default();

    if let Some(r) = file.render {
        if let Some(v) = r.mode {
            config.mode = v;
        }
        if let Some(v) = r.width {
            config.width = v;
        }
        if let Some(v) = r.height {
            config.height = v;
        }
        if let Some(v) = r.contrast {
            config.adjust.contrast = v;
        }
        if let Some(v) = r.brightness {
            config.adjust.brightness = v;
        }
    }

    if let Some(f) = file.font {
        if f.ascii.is_some() {
            config.font.ascii_font = f.ascii;
        }
        if f.emoji.is_some() {
            config.font.emoji_font = f.emoji;
        }
        if let Some(v) = f.size {
            config.font.font_size = v;
        }
    }

    if let Some(c) = file.capture {
        if c.device.is_some() {
            config.capture.device = c.device;
        }
        if let Some(v) = c.index {
            config.capture.index = v;
        }
        if let Some(v) = c.width {
            config.capture.width = v;
        }
        if let Some(v) = c.height {
            config.capture.height = v;
        }
        if let Some(v) = c.framerate {
            config.capture.framerate = v;
        }
    }

    config.clamp_all();
    config.validate_dimensions()?;
    log::debug!("Config chargée : {config:?}");
    Ok(config)
}
