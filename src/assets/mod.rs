//! Frame sources: turn an input file into an ordered [`crate::FrameSequence`].

/// Animated GIF/WebP decoding via the `image` crate.
pub mod decode;
/// Video decoding via the system `ffprobe`/`ffmpeg` binaries.
pub mod media;
/// The frame source trait and input classification.
pub mod source;
