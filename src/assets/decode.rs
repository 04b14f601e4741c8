use std::{
    fs::File,
    io::{BufRead, BufReader, Seek, SeekFrom},
    path::Path,
};

use anyhow::Context;
use gif::{
    AnyExtension, Extension,
    streaming_decoder::{Block, Decoded, OutputBuffer, StreamingDecoder},
};
use image::{AnimationDecoder, Delay, codecs::gif::GifDecoder, codecs::webp::WebPDecoder};

use crate::{
    assets::source::{FrameSource, SourceKind},
    foundation::{
        core::FrameSequence,
        error::{SheetError, SheetResult},
    },
};

/// Display time given to a still WebP, which carries no frame delay.
const STILL_FRAME_MS: u32 = 100;

/// Display time given to a GIF frame without a Graphic Control Extension.
const UNTIMED_FRAME_MS: u32 = 100;

/// Decodes multi-frame images using each frame's authored delay.
#[derive(Clone, Copy, Debug)]
pub struct AnimatedImageSource {
    kind: SourceKind,
}

impl AnimatedImageSource {
    pub fn new(kind: SourceKind) -> Self {
        Self { kind }
    }
}

impl FrameSource for AnimatedImageSource {
    fn read_frames(&self, path: &Path) -> SheetResult<FrameSequence> {
        let file = File::open(path).with_context(|| format!("open '{}'", path.display()))?;
        decode_animation(BufReader::new(file), self.kind).map_err(|e| match e {
            SheetError::Decode(msg) => SheetError::decode(format!("'{}': {msg}", path.display())),
            other => other,
        })
    }
}

/// Decode an animated GIF or WebP stream into composited RGBA8 frames.
pub fn decode_animation<R: BufRead + Seek>(
    mut reader: R,
    kind: SourceKind,
) -> SheetResult<FrameSequence> {
    match kind {
        SourceKind::Gif => {
            let start = reader.stream_position().context("gif stream position")?;
            let timed = gif_timed_frames(&mut reader)?;
            reader
                .seek(SeekFrom::Start(start))
                .context("rewind gif stream")?;
            let decoder = GifDecoder::new(reader).map_err(decode_err)?;
            collect_frames(decoder.into_frames(), &timed)
        }
        SourceKind::WebP => {
            let decoder = WebPDecoder::new(reader).map_err(decode_err)?;
            if decoder.has_animation() {
                return collect_frames(decoder.into_frames(), &[]);
            }
            let still = image::DynamicImage::from_decoder(decoder).map_err(decode_err)?;
            let mut seq = FrameSequence::with_capacity(1);
            seq.push(still.to_rgba8(), STILL_FRAME_MS);
            Ok(seq)
        }
        SourceKind::Video => Err(SheetError::unsupported_format(
            "video containers are not animated images",
        )),
    }
}

/// Frames listed as `false` in `timed` carried no delay metadata; indices past its end are timed.
fn collect_frames(frames: image::Frames<'_>, timed: &[bool]) -> SheetResult<FrameSequence> {
    let mut seq = FrameSequence::new();
    for (i, frame) in frames.enumerate() {
        let frame = frame.map_err(decode_err)?;
        let duration_ms = if timed.get(i).copied().unwrap_or(true) {
            delay_to_ms(frame.delay())
        } else {
            UNTIMED_FRAME_MS
        };
        seq.push(frame.into_buffer(), duration_ms);
    }
    Ok(seq)
}

/// For each image block, whether a Graphic Control Extension preceded it.
///
/// The `image` GIF codec reports an absent delay and an explicit zero delay identically, so the
/// block structure is walked once with the low-level `gif` decoder; pixel data is discarded.
fn gif_timed_frames<R: BufRead>(reader: &mut R) -> SheetResult<Vec<bool>> {
    let control = AnyExtension(Extension::Control as u8);
    let mut decoder = StreamingDecoder::new();
    let mut timed = Vec::new();
    let mut pending_control = false;
    loop {
        let buf = reader.fill_buf().context("read gif stream")?;
        if buf.is_empty() {
            break;
        }
        let (consumed, decoded) = decoder
            .update(buf, &mut OutputBuffer::None)
            .map_err(|e| SheetError::decode(format!("gif: {e}")))?;
        reader.consume(consumed);
        match decoded {
            Decoded::SubBlock { ext, .. } if ext == control => pending_control = true,
            Decoded::BlockStart(Block::Image) => timed.push(std::mem::take(&mut pending_control)),
            Decoded::BlockStart(Block::Trailer) => break,
            _ => {}
        }
    }
    Ok(timed)
}

/// Frame delay rounded to whole milliseconds, at least 1.
pub fn delay_to_ms(delay: Delay) -> u32 {
    let (numer, denom) = delay.numer_denom_ms();
    if denom == 0 {
        return 1;
    }
    (f64::from(numer) / f64::from(denom)).round().max(1.0) as u32
}

fn decode_err(e: image::ImageError) -> SheetError {
    SheetError::decode(e.to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
