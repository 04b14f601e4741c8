//! Per-input conversion and batch orchestration.
//!
//! Each input runs decode → reduce → rate → pack → write on its own. Batch runs collect one
//! [`run::ItemOutcome`] per input and only move an original aside once its sheet is written.

/// Single-input conversion.
pub mod convert;
/// Directory scanning and collision-safe moves.
pub mod fs;
/// Batch runner, options, and reports.
pub mod run;
