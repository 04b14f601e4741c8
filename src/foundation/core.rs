use crate::foundation::error::{SheetError, SheetResult};

/// A decoded animation frame: straight-alpha RGBA8 of arbitrary dimensions.
pub type Frame = image::RgbaImage;

/// Index-aligned frames and display durations (milliseconds), in playback order.
///
/// `frames.len() == durations.len()` holds for every value of this type. The frame payload is
/// generic so timing code can run over cheap markers; the pipeline uses [`Frame`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSequence<F = Frame> {
    pub(crate) frames: Vec<F>,
    pub(crate) durations_ms: Vec<u32>,
}

impl<F> Default for FrameSequence<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> FrameSequence<F> {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            durations_ms: Vec::new(),
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            frames: Vec::with_capacity(cap),
            durations_ms: Vec::with_capacity(cap),
        }
    }

    /// Build a sequence from parallel vectors. Lengths must match.
    pub fn from_parts(frames: Vec<F>, durations_ms: Vec<u32>) -> SheetResult<Self> {
        if frames.len() != durations_ms.len() {
            return Err(SheetError::input(format!(
                "frame/duration length mismatch: {} frames, {} durations",
                frames.len(),
                durations_ms.len()
            )));
        }
        Ok(Self {
            frames,
            durations_ms,
        })
    }

    /// Append a frame. Zero durations are coerced to 1 ms.
    pub fn push(&mut self, frame: F, duration_ms: u32) {
        self.frames.push(frame);
        self.durations_ms.push(duration_ms.max(1));
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[F] {
        &self.frames
    }

    pub fn durations_ms(&self) -> &[u32] {
        &self.durations_ms
    }

    /// Sum of all durations in milliseconds.
    pub fn total_ms(&self) -> u64 {
        self.durations_ms.iter().map(|&d| u64::from(d)).sum()
    }

    /// Keep at most `len` leading entries of both frames and durations.
    pub fn truncate(&mut self, len: usize) {
        self.frames.truncate(len);
        self.durations_ms.truncate(len);
    }

    pub fn into_parts(self) -> (Vec<F>, Vec<u32>) {
        (self.frames, self.durations_ms)
    }
}

/// Constant playback rate of a finished sheet, in frames per second.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct PlaybackRate(u32);

impl PlaybackRate {
    /// Slowest rate the engine accepts.
    pub const MIN: Self = Self(1);
    /// Fastest rate the engine accepts.
    pub const MAX: Self = Self(64);
    /// Rate used when the durations carry no timing information.
    pub const DEFAULT: Self = Self(24);

    /// Clamp `fps` into `[MIN, MAX]`.
    pub fn clamped(fps: u32) -> Self {
        Self(fps.clamp(Self::MIN.0, Self::MAX.0))
    }

    pub fn fps(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Square grid of square cells making up a sprite sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SheetLayout {
    /// Cells per row and per column.
    pub grid: u32,
    /// Cell edge length in pixels.
    pub cell_size: u32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self::ENGINE
    }
}

impl SheetLayout {
    /// The layout the consuming engine expects: 8x8 cells of 128x128 on a 1024x1024 canvas.
    pub const ENGINE: Self = Self {
        grid: 8,
        cell_size: 128,
    };

    pub fn validate(&self) -> SheetResult<()> {
        if self.grid == 0 || self.cell_size == 0 {
            return Err(SheetError::validation(
                "sheet grid and cell size must be non-zero",
            ));
        }
        if self.grid.checked_mul(self.cell_size).is_none() {
            return Err(SheetError::validation("sheet canvas size overflows u32"));
        }
        Ok(())
    }

    /// Canvas edge length in pixels.
    pub fn canvas_size(&self) -> u32 {
        self.grid * self.cell_size
    }

    /// Number of cells, which is also the frame budget.
    pub fn capacity(&self) -> usize {
        self.grid as usize * self.grid as usize
    }

    /// Top-left pixel of cell `index` in row-major order.
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let grid = self.grid as usize;
        let col = (index % grid) as u32;
        let row = (index / grid) as u32;
        (col * self.cell_size, row * self.cell_size)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
