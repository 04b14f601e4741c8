use image::{Rgba, RgbaImage};

use super::*;
use crate::{encode::sink::InMemorySheetSink, foundation::core::FrameSequence};

/// Source returning a fixed number of tiny frames with one duration.
struct StubSource {
    frames: usize,
    duration_ms: u32,
}

impl FrameSource for StubSource {
    fn read_frames(&self, _path: &Path) -> SheetResult<FrameSequence> {
        let mut seq = FrameSequence::with_capacity(self.frames);
        for i in 0..self.frames {
            let v = (i % 256) as u8;
            seq.push(RgbaImage::from_pixel(4, 4, Rgba([v, v, v, 255])), self.duration_ms);
        }
        Ok(seq)
    }
}

struct FailingSource;

impl FrameSource for FailingSource {
    fn read_frames(&self, _path: &Path) -> SheetResult<FrameSequence> {
        Err(SheetError::decode("codec exploded"))
    }
}

#[test]
fn file_name_encodes_count_and_rate() {
    assert_eq!(
        sheet_file_name("walk", 50, PlaybackRate::clamped(15)),
        "walk_50frames_15fps.png"
    );
    assert_eq!(base_name(Path::new("dir/my.clip.gif")), "my.clip");
}

#[test]
fn short_animation_keeps_every_frame() {
    let sink = InMemorySheetSink::new();
    let source = StubSource {
        frames: 10,
        duration_ms: 100,
    };
    let out =
        convert_with_source(Path::new("wave.gif"), &source, &sink, &SheetLayout::ENGINE).unwrap();

    assert_eq!(out.frame_count, 10);
    assert_eq!(out.source_frames, 10);
    assert_eq!(out.rate.fps(), 10);
    assert_eq!(out.passes, 0);
    assert_eq!(out.sheet_path, PathBuf::from("wave_10frames_10fps.png"));

    let sheets = sink.take();
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].1.dimensions(), (1024, 1024));
}

#[test]
fn long_animation_is_reduced_before_packing() {
    let sink = InMemorySheetSink::new();
    let source = StubSource {
        frames: 200,
        duration_ms: 33,
    };
    let out =
        convert_with_source(Path::new("run.mp4"), &source, &sink, &SheetLayout::ENGINE).unwrap();

    assert_eq!(out.frame_count, 50);
    assert_eq!(out.source_frames, 200);
    assert_eq!(out.rate.fps(), 15);
    assert_eq!(out.passes, 2);
    assert_eq!(sink.take()[0].0, "run_50frames_15fps.png");
}

#[test]
fn zero_frames_is_a_decode_error_and_writes_nothing() {
    let sink = InMemorySheetSink::new();
    let source = StubSource {
        frames: 0,
        duration_ms: 100,
    };
    let err = convert_with_source(Path::new("empty.gif"), &source, &sink, &SheetLayout::ENGINE)
        .unwrap_err();

    assert!(matches!(err, SheetError::Decode(_)));
    assert!(sink.take().is_empty());
}

#[test]
fn source_failures_propagate_unchanged() {
    let sink = InMemorySheetSink::new();
    let err = convert_with_source(
        Path::new("bad.gif"),
        &FailingSource,
        &sink,
        &SheetLayout::ENGINE,
    )
    .unwrap_err();
    assert!(err.to_string().contains("codec exploded"));
    assert!(sink.take().is_empty());
}

#[test]
fn unknown_extension_is_unsupported() {
    let sink = InMemorySheetSink::new();
    let err = convert_input(Path::new("notes.txt"), &sink, &SheetLayout::ENGINE).unwrap_err();
    assert!(matches!(err, SheetError::UnsupportedFormat(_)));
}
