use std::path::Path;

use crate::{
    assets::{decode::AnimatedImageSource, media::VideoSource},
    foundation::{
        core::FrameSequence,
        error::{SheetError, SheetResult},
    },
};

/// Produces the ordered `(frame, duration)` pairs of one input animation.
///
/// Implementations decode the whole input up front; an input that yields no frames may be
/// returned as an empty sequence and is rejected by the pipeline.
pub trait FrameSource: Send + Sync {
    /// Decode every frame of `path` in playback order.
    fn read_frames(&self, path: &Path) -> SheetResult<FrameSequence>;
}

/// Input container families, detected from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Animated GIF.
    Gif,
    /// Animated (or still) WebP.
    WebP,
    /// Any container `ffmpeg` can demux into video frames.
    Video,
}

/// Lowercase extensions accepted as inputs.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["gif", "webp", "mp4", "avi", "mov", "mkv", "webm"];

impl SourceKind {
    /// Classify `ext` (without the dot, any case).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::WebP),
            "mp4" | "avi" | "mov" | "mkv" | "webm" => Some(Self::Video),
            _ => None,
        }
    }

    /// Classify `path` by extension, failing with [`SheetError::UnsupportedFormat`].
    pub fn detect(path: &Path) -> SheetResult<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_extension(&ext).ok_or_else(|| {
            SheetError::unsupported_format(format!(
                "'{}' has unsupported extension '.{ext}'",
                path.display()
            ))
        })
    }
}

/// Create the frame source for `kind`.
pub fn create_source(kind: SourceKind) -> Box<dyn FrameSource> {
    match kind {
        SourceKind::Gif | SourceKind::WebP => Box::new(AnimatedImageSource::new(kind)),
        SourceKind::Video => Box::new(VideoSource::new()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
