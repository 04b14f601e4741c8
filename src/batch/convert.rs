use std::path::{Path, PathBuf};

use crate::{
    assets::source::{FrameSource, SourceKind, create_source},
    encode::sink::SheetSink,
    foundation::{
        core::{PlaybackRate, SheetLayout},
        error::{SheetError, SheetResult},
    },
    render::pack::pack,
    timeline::{rate::select_rate, reduce::reduce_counted},
};

/// Result of converting one input into a sheet.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SheetOutput {
    /// Where the sink stored the sheet.
    pub sheet_path: PathBuf,
    /// Frames packed into the sheet after reduction.
    pub frame_count: usize,
    /// Frames the source produced.
    pub source_frames: usize,
    /// Playback rate encoded into the file name.
    pub rate: PlaybackRate,
    /// Halving passes the reducer ran.
    pub passes: u32,
}

/// `{base}_{frame_count}frames_{rate}fps.png`
pub fn sheet_file_name(base: &str, frame_count: usize, rate: PlaybackRate) -> String {
    format!("{base}_{frame_count}frames_{rate}fps.png")
}

/// File name of `input` without its final extension.
pub fn base_name(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sheet".to_string())
}

/// Convert `input`, choosing the frame source from its extension.
pub fn convert_input(
    input: &Path,
    sink: &dyn SheetSink,
    layout: &SheetLayout,
) -> SheetResult<SheetOutput> {
    let kind = SourceKind::detect(input)?;
    let source = create_source(kind);
    convert_with_source(input, source.as_ref(), sink, layout)
}

/// Decode, reduce, pick a rate, pack, and hand the sheet to `sink`.
///
/// Nothing reaches the sink unless every earlier step succeeded. A source that yields no frames
/// is a [`SheetError::Decode`].
#[tracing::instrument(skip_all, fields(input = %input.display()))]
pub fn convert_with_source(
    input: &Path,
    source: &dyn FrameSource,
    sink: &dyn SheetSink,
    layout: &SheetLayout,
) -> SheetResult<SheetOutput> {
    layout.validate()?;

    let seq = source.read_frames(input)?;
    if seq.is_empty() {
        return Err(SheetError::decode(format!(
            "no frames decoded from '{}'",
            input.display()
        )));
    }
    let source_frames = seq.len();

    let (seq, passes) = reduce_counted(seq, layout.capacity())?;
    let rate = select_rate(seq.durations_ms())?;
    let sheet = pack(seq.frames(), layout)?;
    let frame_count = seq.len();
    drop(seq);

    let file_name = sheet_file_name(&base_name(input), frame_count, rate);
    let sheet_path = sink.write_sheet(&file_name, &sheet)?;

    Ok(SheetOutput {
        sheet_path,
        frame_count,
        source_frames,
        rate,
        passes,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/batch/convert.rs"]
mod tests;
