use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::{
    batch::{
        convert::{SheetOutput, convert_input},
        fs::move_into_dir,
    },
    encode::sink::{PngDirSink, SheetSink},
    foundation::{
        core::SheetLayout,
        error::{ErrorKind, SheetError, SheetResult},
    },
};

#[derive(Clone, Debug, Default)]
/// Threading controls for batch conversion.
pub struct BatchThreading {
    /// Convert inputs concurrently when `true`. Peak memory grows with the worker count.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

#[derive(Clone, Debug)]
/// Batch conversion settings.
pub struct BatchOptions {
    /// Directory receiving the sheets.
    pub out_dir: PathBuf,
    /// Where successfully converted originals are moved. `None` leaves them in place.
    pub originals_dir: Option<PathBuf>,
    /// Sheet geometry.
    pub layout: SheetLayout,
    /// Sequential or parallel processing.
    pub threading: BatchThreading,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("spritesheets"),
            originals_dir: Some(PathBuf::from("originals")),
            layout: SheetLayout::ENGINE,
            threading: BatchThreading::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
/// What happened to one input.
pub enum ItemResult {
    /// Sheet written (and original moved, when configured).
    Success {
        /// Conversion details.
        output: SheetOutput,
        /// New location of the original, if it was moved.
        moved_to: Option<PathBuf>,
    },
    /// Conversion failed; no sheet was kept for this input unless the final move failed.
    Failure {
        /// Error classification.
        kind: ErrorKind,
        /// Human-readable cause.
        message: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// Outcome for one input, in input order.
pub struct ItemOutcome {
    /// The input file.
    pub input: PathBuf,
    /// Success or failure details.
    #[serde(flatten)]
    pub result: ItemResult,
}

impl ItemOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.result, ItemResult::Success { .. })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Aggregated batch counters.
pub struct BatchSummary {
    /// Inputs converted successfully.
    pub processed: usize,
    /// Inputs attempted.
    pub total: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[ItemOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |acc, item| Self {
            processed: acc.processed + usize::from(item.is_success()),
            total: acc.total + 1,
        })
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.processed, self.total)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// Per-item outcomes plus the summary.
pub struct BatchReport {
    /// Outcomes in input order.
    pub items: Vec<ItemOutcome>,
    /// Counts derived from `items`.
    pub summary: BatchSummary,
}

/// Convert every input independently.
///
/// Setup problems (bad options, uncreatable output directory) are returned as errors. Failures of
/// individual inputs never abort the batch; they are logged and recorded in the report.
pub fn run_batch(inputs: &[PathBuf], opts: &BatchOptions) -> SheetResult<BatchReport> {
    opts.layout.validate()?;
    std::fs::create_dir_all(&opts.out_dir)
        .with_context(|| format!("create output directory '{}'", opts.out_dir.display()))?;
    if let Some(dir) = &opts.originals_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create originals directory '{}'", dir.display()))?;
    }

    let sink = PngDirSink::new(&opts.out_dir);
    let items: Vec<ItemOutcome> = if opts.threading.parallel {
        let pool = build_thread_pool(opts.threading.threads)?;
        pool.install(|| {
            inputs
                .par_iter()
                .map(|input| process_item(input, &sink, opts))
                .collect()
        })
    } else {
        inputs
            .iter()
            .map(|input| process_item(input, &sink, opts))
            .collect()
    };

    let summary = BatchSummary::from_outcomes(&items);
    tracing::info!(
        processed = summary.processed,
        total = summary.total,
        "batch finished"
    );
    Ok(BatchReport { items, summary })
}

fn process_item(input: &Path, sink: &dyn SheetSink, opts: &BatchOptions) -> ItemOutcome {
    let result = convert_input(input, sink, &opts.layout).and_then(|output| {
        let moved_to = match &opts.originals_dir {
            Some(dir) => match move_into_dir(input, dir) {
                Ok(dest) => Some(dest),
                Err(err) => {
                    discard_sheet(&output.sheet_path);
                    return Err(err);
                }
            },
            None => None,
        };
        Ok((output, moved_to))
    });

    let result = match result {
        Ok((output, moved_to)) => {
            tracing::info!(
                input = %input.display(),
                frames = output.frame_count,
                fps = output.rate.fps(),
                "processed"
            );
            ItemResult::Success { output, moved_to }
        }
        Err(err) => {
            let message = failure_message(&err);
            tracing::warn!(input = %input.display(), kind = ?err.kind(), "failed: {message}");
            ItemResult::Failure {
                kind: err.kind(),
                message,
            }
        }
    };

    ItemOutcome {
        input: input.to_path_buf(),
        result,
    }
}

/// A failed item leaves no sheet behind.
fn discard_sheet(sheet_path: &Path) {
    if let Err(e) = std::fs::remove_file(sheet_path) {
        tracing::warn!(sheet = %sheet_path.display(), "could not remove sheet: {e}");
    }
}

fn failure_message(err: &SheetError) -> String {
    match err {
        SheetError::Other(e) => format!("{e:#}"),
        other => other.to_string(),
    }
}

fn build_thread_pool(threads: Option<usize>) -> SheetResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SheetError::validation(
            "batch threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SheetError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/batch/run.rs"]
mod tests;
