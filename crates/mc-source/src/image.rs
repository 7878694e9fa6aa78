use std::path::Path;

use anyhow::{Context, Result};
use mc_core::frame::FrameBuffer;
use mc_core::traits::Source;

/// Source d'image statique. Retourne toujours la même frame.
///
/// # Example
/// ```no_run
/// use mc_source::image::ImageSource;
/// use std::path::Path;
/// let source = ImageSource::new(Path::new("portrait.png")).unwrap();
/// ```
pub struct ImageSource {
    frame: FrameBuffer,
}

impl ImageSource {
    /// Load an image from disk and create a source.
    ///
    /// # Errors
    /// Returns an error if the image cannot be loaded.
    pub fn new(path: &Path) -> Result<Self> {
        Ok(Self {
            frame: load_image(path)?,
        })
    }

    /// Source over an in-memory frame.
    #[must_use]
    pub fn from_frame(frame: FrameBuffer) -> Self {
        Self { frame }
    }
}

impl Source for ImageSource {
    fn next_frame(&mut self) -> Option<FrameBuffer> {
        Some(self.frame.clone())
    }

    fn native_size(&self) -> (u32, u32) {
        (self.frame.width, self.frame.height)
    }

    fn is_live(&self) -> bool {
        false
    }
}

/// Charge une image disque en frame RGBA.
///
/// # Errors
/// Returns an error if the image cannot be loaded or decoded.
pub fn load_image(path: &Path) -> Result<FrameBuffer> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::info!("Image chargée : {} ({width}x{height})", path.display());
    Ok(FrameBuffer {
        data: rgba.into_raw(),
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_round_trips_through_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        image::RgbaImage::from_pixel(4, 3, image::Rgba([200, 10, 10, 255]))
            .save(&path)
            .unwrap();

        let mut source = ImageSource::new(&path).unwrap();
        assert_eq!(source.native_size(), (4, 3));
        assert!(!source.is_live());
        let frame = source.next_frame().unwrap();
        assert_eq!(frame.pixel(3, 2), (200, 10, 10, 255));
        assert!(source.next_frame().is_some());
    }

    #[test]
    fn missing_image_is_an_error() {
        assert!(ImageSource::new(Path::new("/nonexistent/frame.png")).is_err());
    }
}
