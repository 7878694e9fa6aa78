use mc_core::config::AdjustConfig;
use mc_core::frame::FrameBuffer;

/// Applique contraste et luminosité à un canal : `|contrast × v + brightness|`,
/// arrondi au plus proche (égalités vers le pair) et saturé dans [0, 255].
///
/// # Example
/// ```
/// use mc_source::adjust::adjust_channel;
/// assert_eq!(adjust_channel(100, 1.5, 10.0), 160);
/// assert_eq!(adjust_channel(200, 2.0, 0.0), 255);
/// ```
#[inline]
#[must_use]
pub fn adjust_channel(v: u8, contrast: f32, brightness: f32) -> u8 {
    (f32::from(v) * contrast + brightness)
        .abs()
        .round_ties_even()
        .clamp(0.0, 255.0) as u8
}

/// Ajuste contraste / luminosité de tous les pixels, en place.
///
/// Seuls les canaux couleur sont touchés, l'alpha reste tel quel. No-op pour
/// le réglage neutre.
pub fn adjust_in_place(frame: &mut FrameBuffer, adjust: &AdjustConfig) {
    if adjust.is_identity() {
        return;
    }
    for px in frame.data.chunks_exact_mut(4) {
        for c in &mut px[..3] {
            *c = adjust_channel(*c, adjust.contrast, adjust.brightness);
        }
    }
}

/// Copie ajustée de `frame`.
///
/// # Example
/// ```
/// use mc_core::config::AdjustConfig;
/// use mc_core::frame::FrameBuffer;
/// use mc_source::adjust::adjust_contrast_brightness;
/// let frame = FrameBuffer::filled(1, 1, (100, 50, 0));
/// let out = adjust_contrast_brightness(&frame, &AdjustConfig { contrast: 2.0, brightness: 5.0 });
/// assert_eq!(out.pixel(0, 0), (205, 105, 5, 255));
/// ```
#[must_use]
pub fn adjust_contrast_brightness(frame: &FrameBuffer, adjust: &AdjustConfig) -> FrameBuffer {
    let mut out = frame.clone();
    adjust_in_place(&mut out, adjust);
    out
}
