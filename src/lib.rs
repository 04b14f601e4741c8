//! sheetpack turns short animations into fixed-layout sprite sheets.
//!
//! The consuming engine expects a 1024x1024 canvas split into an 8x8 grid of 128x128 cells, played
//! back at one constant rate. Inputs of any length are fitted into that budget.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: a [`FrameSource`] yields a [`FrameSequence`] of frames and millisecond durations
//! 2. **Reduce**: [`reduce`] halves the sequence (stride 2, durations merged) until it fits the grid
//! 3. **Rate**: [`select_rate`] picks the integer fps closest to the mean frame duration
//! 4. **Pack**: [`pack`] resizes each frame into its cell, leaving unused cells transparent
//! 5. **Write**: a [`SheetSink`] stores the sheet as `{name}_{frames}frames_{fps}fps.png`
//!
//! [`run_batch`] drives this for many inputs with per-item failure isolation.
#![forbid(unsafe_code)]

mod assets;
mod batch;
mod encode;
mod foundation;
mod render;
mod timeline;

pub use assets::decode::{AnimatedImageSource, decode_animation, delay_to_ms};
pub use assets::media::{
    DEFAULT_VIDEO_FPS, VideoSource, VideoSourceInfo, decode_video_frames_rgba8,
    frame_duration_ms, parse_frame_rate, probe_video,
};
pub use assets::source::{FrameSource, SUPPORTED_EXTENSIONS, SourceKind, create_source};
pub use batch::convert::{
    SheetOutput, base_name, convert_input, convert_with_source, sheet_file_name,
};
pub use batch::fs::{discover_inputs, move_into_dir, unique_path};
pub use batch::run::{
    BatchOptions, BatchReport, BatchSummary, BatchThreading, ItemOutcome, ItemResult, run_batch,
};
pub use encode::sink::{InMemorySheetSink, PngDirSink, SheetSink, ensure_parent_dir};
pub use foundation::core::{Frame, FrameSequence, PlaybackRate, SheetLayout};
pub use foundation::error::{ErrorKind, SheetError, SheetResult};
pub use render::pack::{fit_cell, pack};
pub use timeline::rate::select_rate;
pub use timeline::reduce::{halve, merge_duration_pairs, reduce, reduce_counted};
