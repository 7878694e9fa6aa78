use std::path::PathBuf;

use mc_core::charset::GlyphMode;
use mc_core::config::FontConfig;
use mc_core::error::CoreError;

use crate::rasterizer::FontRasterizer;

/// Police monospace livrée avec le projet, relative au répertoire courant.
pub const BUNDLED_MONOSPACE: &str = "fonts/Hack-Regular.ttf";

/// Famille de police recherchée.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontKind {
    /// Outline monospace font for the ASCII palette.
    Monospace,
    /// Color emoji font.
    Emoji,
}

impl From<GlyphMode> for FontKind {
    fn from(mode: GlyphMode) -> Self {
        match mode {
            GlyphMode::Ascii => Self::Monospace,
            GlyphMode::Emoji => Self::Emoji,
        }
    }
}

/// Résout le fichier de police à ouvrir pour chaque famille.
///
/// Chaque famille a une liste ordonnée de chemins candidats ; le premier qui
/// existe gagne. Un override explicite remplace la liste entière.
///
/// # Example
/// ```
/// use mc_font::resolver::{FontKind, FontResolver};
/// use std::path::PathBuf;
/// let resolver = FontResolver::new(vec![PathBuf::from("a.ttf")], vec![])
///     .with_override(FontKind::Emoji, Some(PathBuf::from("e.ttf")));
/// assert_eq!(resolver.candidates(FontKind::Emoji), &[PathBuf::from("e.ttf")]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontResolver {
    monospace: Vec<PathBuf>,
    emoji: Vec<PathBuf>,
}

impl FontResolver {
    /// Resolver over explicit candidate lists.
    #[must_use]
    pub fn new(monospace: Vec<PathBuf>, emoji: Vec<PathBuf>) -> Self {
        Self { monospace, emoji }
    }

    /// Candidats par défaut de la plateforme courante.
    #[must_use]
    pub fn platform_default() -> Self {
        let mut monospace = vec![PathBuf::from(BUNDLED_MONOSPACE)];
        let emoji: Vec<PathBuf>;

        if cfg!(target_os = "macos") {
            monospace.extend(
                [
                    "/Library/Fonts/Hack-Regular.ttf",
                    "/System/Library/Fonts/Menlo.ttc",
                    "/System/Library/Fonts/Monaco.ttf",
                ]
                .map(PathBuf::from),
            );
            emoji = vec![PathBuf::from("/System/Library/Fonts/Apple Color Emoji.ttc")];
        } else if cfg!(target_os = "windows") {
            monospace.extend(["C:\\Windows\\Fonts\\consola.ttf", "C:\\Windows\\Fonts\\cour.ttf"].map(PathBuf::from));
            emoji = vec![PathBuf::from("C:\\Windows\\Fonts\\seguiemj.ttf")];
        } else {
            monospace.extend(
                [
                    "/usr/share/fonts/truetype/hack/Hack-Regular.ttf",
                    "/usr/share/fonts/TTF/Hack-Regular.ttf",
                    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
                    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
                    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
                ]
                .map(PathBuf::from),
            );
            emoji = [
                "/usr/share/fonts/truetype/noto/NotoColorEmoji.ttf",
                "/usr/share/fonts/noto/NotoColorEmoji.ttf",
                "/usr/share/fonts/google-noto-emoji/NotoColorEmoji.ttf",
                "/usr/share/fonts/TTF/NotoColorEmoji.ttf",
            ]
            .map(PathBuf::from)
            .to_vec();
        }

        Self { monospace, emoji }
    }

    /// Replace the candidates of `kind` by `path`, if given.
    #[must_use]
    pub fn with_override(mut self, kind: FontKind, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            match kind {
                FontKind::Monospace => self.monospace = vec![path],
                FontKind::Emoji => self.emoji = vec![path],
            }
        }
        self
    }

    /// Resolver from platform defaults with the overrides of `config` applied.
    #[must_use]
    pub fn from_config(config: &FontConfig) -> Self {
        Self::platform_default()
            .with_override(FontKind::Monospace, config.ascii_font.clone())
            .with_override(FontKind::Emoji, config.emoji_font.clone())
    }

    /// Ordered candidate paths for `kind`.
    #[must_use]
    pub fn candidates(&self, kind: FontKind) -> &[PathBuf] {
        match kind {
            FontKind::Monospace => &self.monospace,
            FontKind::Emoji => &self.emoji,
        }
    }

    /// Premier candidat existant pour `kind`.
    ///
    /// # Errors
    /// [`CoreError::FontLoad`] si aucun candidat n'existe.
    pub fn resolve(&self, kind: FontKind) -> Result<PathBuf, CoreError> {
        let candidates = self.candidates(kind);
        if let Some(found) = candidates.iter().find(|p| p.is_file()) {
            log::debug!("Police {kind:?} résolue : {}", found.display());
            return Ok(found.clone());
        }
        let tried = candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(CoreError::FontLoad {
            path: candidates.first().cloned().unwrap_or_default(),
            reason: format!("aucun fichier trouvé parmi [{tried}]"),
        })
    }

    /// Résout puis charge la police de `kind`.
    ///
    /// # Errors
    /// [`CoreError::FontLoad`] si la police est introuvable ou invalide.
    pub fn load(&self, kind: FontKind, pixel_size: f32) -> Result<FontRasterizer, CoreError> {
        let path = self.resolve(kind)?;
        FontRasterizer::load(&path, pixel_size)
    }
}
