//! Frame-budget reduction and playback-rate selection.

pub mod rate;
pub mod reduce;
