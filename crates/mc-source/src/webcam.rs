// Capture webcam via `ffmpeg` en subprocess (même approche que le décodage
// vidéo) : pas de binding natif par plateforme, seulement ffmpeg dans le PATH.
//
// ffmpeg lit le périphérique (v4l2 / avfoundation / dshow), met à l'échelle
// vers la taille de capture demandée et écrit des frames RGBA brutes sur
// stdout. Chaque lecture bloque jusqu'à la frame suivante.

use std::io::Read;
use std::process::{Child, ChildStdout, Command, Stdio};

use anyhow::Result;
use mc_core::config::CaptureConfig;
use mc_core::error::CoreError;
use mc_core::frame::FrameBuffer;
use mc_core::traits::Source;

/// Arguments d'entrée ffmpeg pour le périphérique de `config` sur `os`
/// (valeurs de `std::env::consts::OS`).
///
/// # Errors
/// [`CoreError::Capture`] si la plateforme n'est pas gérée, ou sous Windows
/// si aucun nom de périphérique n'est donné (dshow n'accepte pas d'index).
///
/// # Example
/// ```
/// use mc_core::config::CaptureConfig;
/// use mc_source::webcam::input_args;
/// let args = input_args(&CaptureConfig::default(), "linux").unwrap();
/// assert_eq!(args.last().map(String::as_str), Some("/dev/video0"));
/// ```
pub fn input_args(config: &CaptureConfig, os: &str) -> Result<Vec<String>, CoreError> {
    let (format, device) = match os {
        "linux" => (
            "v4l2",
            config
                .device
                .clone()
                .unwrap_or_else(|| format!("/dev/video{}", config.index)),
        ),
        "macos" => (
            "avfoundation",
            config
                .device
                .clone()
                .unwrap_or_else(|| format!("{}:none", config.index)),
        ),
        "windows" => {
            let Some(device) = config.device.clone() else {
                return Err(CoreError::Capture(
                    "dshow exige un nom de périphérique (ex: --device \"video=HD Webcam\")".into(),
                ));
            };
            ("dshow", device)
        }
        other => {
            return Err(CoreError::Capture(format!("plateforme non gérée : {other}")));
        }
    };

    Ok(vec![
        "-f".into(),
        format.into(),
        "-framerate".into(),
        config.framerate.to_string(),
        "-video_size".into(),
        format!("{}x{}", config.width, config.height),
        "-i".into(),
        device,
    ])
}

/// Arguments de sortie : RGBA brut, mis à l'échelle, sur stdout.
#[must_use]
pub fn output_args(width: u32, height: u32) -> Vec<String> {
    let scale = format!("scale={width}:{height}:flags=bilinear");
    [
        "-vf",
        scale.as_str(),
        "-f",
        "rawvideo", // format raw
        "-pix_fmt",
        "rgba", // RGBA 4 bytes/pixel
        "-an",
        "-hide_banner",
        "-loglevel",
        "error",
        "pipe:1", // stdout
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

/// Lit exactement `buf.len()` bytes depuis `reader`.
///
/// # Errors
/// Retourne `Ok(true)` si lu avec succès, `Ok(false)` sur EOF avant complétion,
/// `Err` sur erreur I/O fatale.
pub fn read_exact_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<bool> {
    let mut total = 0usize;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => return Ok(false), // EOF
            Ok(n) => total += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(true)
}

/// Source webcam : un processus ffmpeg qui écrit des frames sur un pipe.
///
/// Le processus est tué à la destruction de la source.
pub struct WebcamSource {
    child: Child,
    stdout: ChildStdout,
    width: u32,
    height: u32,
}

impl WebcamSource {
    /// Lance ffmpeg sur le périphérique de `config`.
    ///
    /// L'ouverture réussit dès que ffmpeg démarre ; un périphérique absent ne
    /// se révèle qu'à la première lecture (qui retourne `None`).
    ///
    /// # Errors
    /// [`CoreError::Capture`] si ffmpeg ne peut pas être lancé.
    pub fn open(config: &CaptureConfig) -> Result<Self, CoreError> {
        let mut args = input_args(config, std::env::consts::OS)?;
        args.extend(output_args(config.width, config.height));
        log::debug!("ffmpeg {}", args.join(" "));

        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                CoreError::Capture(format!(
                    "impossible de lancer ffmpeg ({e}). Vérifiez que ffmpeg est installé et dans le PATH."
                ))
            })?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            return Err(CoreError::Capture("stdout ffmpeg indisponible".into()));
        };

        log::info!(
            "Webcam ouverte : {}x{} @ {}fps",
            config.width,
            config.height,
            config.framerate
        );
        Ok(Self {
            child,
            stdout,
            width: config.width,
            height: config.height,
        })
    }
}

impl Source for WebcamSource {
    fn next_frame(&mut self) -> Option<FrameBuffer> {
        let mut frame = FrameBuffer::new(self.width, self.height);
        match read_exact_or_eof(&mut self.stdout, &mut frame.data) {
            Ok(true) => Some(frame),
            Ok(false) => {
                log::warn!("Webcam : fin du flux ffmpeg");
                None
            }
            Err(e) => {
                log::error!("Webcam : erreur lecture pipe : {e}");
                None
            }
        }
    }

    fn native_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn is_live(&self) -> bool {
        true
    }
}

impl Drop for WebcamSource {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_uses_v4l2_device_index() {
        let config = CaptureConfig {
            index: 2,
            ..CaptureConfig::default()
        };
        let args = input_args(&config, "linux").unwrap();
        assert_eq!(args[..2], ["-f", "v4l2"]);
        assert!(args.contains(&"640x480".to_string()));
        assert_eq!(args.last().unwrap(), "/dev/video2");
    }

    #[test]
    fn macos_uses_avfoundation_without_audio() {
        let args = input_args(&CaptureConfig::default(), "macos").unwrap();
        assert_eq!(args[1], "avfoundation");
        assert_eq!(args.last().unwrap(), "0:none");
    }

    #[test]
    fn explicit_device_wins() {
        let config = CaptureConfig {
            device: Some("video=HD Webcam".into()),
            ..CaptureConfig::default()
        };
        let args = input_args(&config, "windows").unwrap();
        assert_eq!(args[1], "dshow");
        assert_eq!(args.last().unwrap(), "video=HD Webcam");
    }

    #[test]
    fn windows_without_device_is_capture_error() {
        let err = input_args(&CaptureConfig::default(), "windows").unwrap_err();
        assert!(matches!(err, CoreError::Capture(_)));
        assert!(input_args(&CaptureConfig::default(), "plan9").is_err());
    }

    #[test]
    fn output_is_scaled_raw_rgba_on_stdout() {
        let args = output_args(320, 240);
        assert_eq!(args[1], "scale=320:240:flags=bilinear");
        assert!(args.windows(2).any(|w| w[0] == "-pix_fmt" && w[1] == "rgba"));
        assert_eq!(args.last().unwrap(), "pipe:1");
    }

    #[test]
    fn read_exact_reports_short_stream() {
        let mut full: &[u8] = &[1, 2, 3, 4];
        let mut buf = [0u8; 4];
        assert!(read_exact_or_eof(&mut full, &mut buf).unwrap());
        assert_eq!(buf, [1, 2, 3, 4]);

        let mut short: &[u8] = &[1, 2];
        assert!(!read_exact_or_eof(&mut short, &mut buf).unwrap());
    }
}
