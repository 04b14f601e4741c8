use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::{
    assets::source::FrameSource,
    foundation::{
        core::FrameSequence,
        error::{SheetError, SheetResult},
    },
};

/// Frame rate assumed when the container does not report a usable one.
pub const DEFAULT_VIDEO_FPS: f64 = 30.0;

#[derive(Clone, Debug)]
/// Basic metadata about a source video file.
pub struct VideoSourceInfo {
    /// Source path used for probing/decoding.
    #[cfg_attr(not(feature = "media-ffmpeg"), allow(dead_code))]
    pub source_path: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Reported frame rate, if the container carries one.
    pub fps: Option<f64>,
}

impl VideoSourceInfo {
    /// Reported frame rate, or [`DEFAULT_VIDEO_FPS`].
    pub fn effective_fps(&self) -> f64 {
        self.fps.unwrap_or(DEFAULT_VIDEO_FPS)
    }

    /// Uniform per-frame display duration.
    pub fn frame_duration_ms(&self) -> u32 {
        frame_duration_ms(self.effective_fps())
    }
}

/// `round(1000 / fps)` milliseconds, never below 1.
pub fn frame_duration_ms(fps: f64) -> u32 {
    if !fps.is_finite() || fps <= 0.0 {
        return frame_duration_ms(DEFAULT_VIDEO_FPS);
    }
    (1000.0 / fps).round().max(1.0) as u32
}

/// Parse an ffprobe rate such as `30000/1001` or `25`. Zero or malformed rates give `None`.
pub fn parse_frame_rate(s: &str) -> Option<f64> {
    let (num, den) = match s.split_once('/') {
        Some((n, d)) => (n.trim().parse::<f64>().ok()?, d.trim().parse::<f64>().ok()?),
        None => (s.trim().parse::<f64>().ok()?, 1.0),
    };
    if den == 0.0 {
        return None;
    }
    let fps = num / den;
    (fps.is_finite() && fps > 0.0).then_some(fps)
}

/// Decodes video containers through the system `ffprobe`/`ffmpeg` binaries.
///
/// Every frame gets the same duration, derived once from the container's reported rate.
#[derive(Clone, Copy, Debug, Default)]
pub struct VideoSource;

impl VideoSource {
    pub fn new() -> Self {
        Self
    }
}

impl FrameSource for VideoSource {
    fn read_frames(&self, path: &Path) -> SheetResult<FrameSequence> {
        let info = probe_video(path)?;
        let duration_ms = info.frame_duration_ms();
        let frames = decode_video_frames_rgba8(&info)?;

        tracing::debug!(
            path = %path.display(),
            frames = frames.len(),
            fps = info.effective_fps(),
            duration_ms,
            "decoded video"
        );

        let mut seq = FrameSequence::with_capacity(frames.len());
        for frame in frames {
            seq.push(frame, duration_ms);
        }
        Ok(seq)
    }
}

/// Probe source video metadata through `ffprobe`.
#[cfg(feature = "media-ffmpeg")]
pub fn probe_video(source_path: &Path) -> SheetResult<VideoSourceInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        avg_frame_rate: Option<String>,
        r_frame_rate: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        #[serde(default)]
        streams: Vec<ProbeStream>,
    }

    let out = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-print_format",
            "json",
            "-show_streams",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| SheetError::decode(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(SheetError::decode(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| SheetError::decode(format!("ffprobe json parse failed: {e}")))?;
    let video_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| {
            SheetError::decode(format!(
                "no video stream found in '{}'",
                source_path.display()
            ))
        })?;
    let width = video_stream
        .width
        .ok_or_else(|| SheetError::decode("missing video width from ffprobe"))?;
    let height = video_stream
        .height
        .ok_or_else(|| SheetError::decode("missing video height from ffprobe"))?;
    let fps = video_stream
        .avg_frame_rate
        .as_deref()
        .and_then(parse_frame_rate)
        .or_else(|| video_stream.r_frame_rate.as_deref().and_then(parse_frame_rate));

    Ok(VideoSourceInfo {
        source_path: source_path.to_path_buf(),
        width,
        height,
        fps,
    })
}

#[cfg(not(feature = "media-ffmpeg"))]
/// Probe source video metadata through `ffprobe`.
///
/// Returns an error when `media-ffmpeg` feature is disabled.
pub fn probe_video(_source_path: &Path) -> SheetResult<VideoSourceInfo> {
    Err(SheetError::decode(
        "video inputs require the 'media-ffmpeg' feature",
    ))
}

#[cfg(feature = "media-ffmpeg")]
/// Decode every frame of the source video as straight RGBA8.
pub fn decode_video_frames_rgba8(source: &VideoSourceInfo) -> SheetResult<Vec<RgbaImage>> {
    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(&source.source_path)
        .args(["-an", "-f", "rawvideo", "-pix_fmt", "rgba", "pipe:1"])
        .output()
        .map_err(|e| SheetError::decode(format!("failed to run ffmpeg for video decode: {e}")))?;

    if !out.status.success() {
        return Err(SheetError::decode(format!(
            "ffmpeg video decode failed for '{}': {}",
            source.source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let expected_len = source.width as usize * source.height as usize * 4;
    if expected_len == 0 {
        return Err(SheetError::decode(
            "decoded video frame size is zero (invalid source dimensions)",
        ));
    }
    if !out.stdout.len().is_multiple_of(expected_len) {
        return Err(SheetError::decode(format!(
            "decoded video has invalid size: got {} bytes, expected multiples of {expected_len}",
            out.stdout.len()
        )));
    }

    out.stdout
        .chunks_exact(expected_len)
        .map(|chunk| {
            RgbaImage::from_raw(source.width, source.height, chunk.to_vec())
                .ok_or_else(|| SheetError::decode("decoded video frame has wrong buffer size"))
        })
        .collect()
}

#[cfg(not(feature = "media-ffmpeg"))]
/// Decode every frame of the source video as straight RGBA8.
///
/// Returns an error when `media-ffmpeg` feature is disabled.
pub fn decode_video_frames_rgba8(_source: &VideoSourceInfo) -> SheetResult<Vec<RgbaImage>> {
    Err(SheetError::decode(
        "video inputs require the 'media-ffmpeg' feature",
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/media.rs"]
mod tests;
