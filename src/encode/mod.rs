//! Sheet output sinks.
//!
//! Sinks receive each finished sheet together with the file name that carries its frame count and
//! playback rate.

/// Generic sheet sink trait and built-in sinks.
pub mod sink;
