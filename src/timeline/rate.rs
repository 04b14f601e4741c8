use crate::foundation::{
    core::PlaybackRate,
    error::{SheetError, SheetResult},
};

/// Pick the constant playback rate that best matches the average frame duration.
///
/// `round(1000 / mean(durations))` with ties to even, clamped to the engine range. A zero total
/// yields [`PlaybackRate::DEFAULT`]. Empty input is an error.
pub fn select_rate(durations_ms: &[u32]) -> SheetResult<PlaybackRate> {
    if durations_ms.is_empty() {
        return Err(SheetError::input(
            "cannot select a playback rate for an empty duration sequence",
        ));
    }

    let total: u64 = durations_ms.iter().map(|&d| u64::from(d)).sum();
    if total == 0 {
        return Ok(PlaybackRate::DEFAULT);
    }

    let avg_ms = total as f64 / durations_ms.len() as f64;
    let fps = (1000.0 / avg_ms).round_ties_even();
    // `as` saturates; anything above u32::MAX is clamped to MAX below anyway.
    let rate = PlaybackRate::clamped(fps as u32);
    tracing::debug!(avg_ms, fps = rate.fps(), "selected playback rate");
    Ok(rate)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/rate.rs"]
mod tests;
