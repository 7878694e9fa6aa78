/// Frame sources (webcam, still image) and per-frame transforms for mosaicam.

pub mod adjust;
pub mod image;
pub mod resize;
pub mod webcam;
