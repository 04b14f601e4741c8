use crate::foundation::{
    core::FrameSequence,
    error::{SheetError, SheetResult},
};

/// One reduction pass: keep every even-indexed frame and fold each dropped frame's duration into
/// the frame that precedes it.
///
/// An odd trailing frame keeps its own duration. Total duration is unchanged.
pub fn halve<F>(seq: FrameSequence<F>) -> FrameSequence<F> {
    let (frames, durations) = seq.into_parts();
    FrameSequence {
        frames: frames.into_iter().step_by(2).collect(),
        durations_ms: merge_duration_pairs(&durations),
    }
}

/// Sum durations pairwise: `[a, b, c, d, e] -> [a+b, c+d, e]`.
pub fn merge_duration_pairs(durations: &[u32]) -> Vec<u32> {
    durations
        .chunks(2)
        .map(|pair| pair.iter().fold(0u32, |acc, &d| acc.saturating_add(d)))
        .collect()
}

/// Halve `seq` until it holds at most `max_frames` entries, then clamp to `max_frames`.
///
/// Sequences already within the budget are returned unchanged.
pub fn reduce<F>(seq: FrameSequence<F>, max_frames: usize) -> SheetResult<FrameSequence<F>> {
    reduce_counted(seq, max_frames).map(|(seq, _)| seq)
}

/// Like [`reduce`], also returning how many halving passes ran.
pub fn reduce_counted<F>(
    mut seq: FrameSequence<F>,
    max_frames: usize,
) -> SheetResult<(FrameSequence<F>, u32)> {
    if max_frames == 0 {
        return Err(SheetError::input("frame budget must be at least 1"));
    }

    let input_len = seq.len();
    let mut passes = 0u32;
    while seq.len() > max_frames {
        seq = halve(seq);
        passes += 1;
    }
    // Unreachable for max_frames >= 1: the loop exits on the first length <= max_frames.
    seq.truncate(max_frames);

    if passes > 0 {
        tracing::debug!(input_len, output_len = seq.len(), passes, "reduced frame sequence");
    }
    Ok((seq, passes))
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/reduce.rs"]
mod tests;
