//! Core value types and the error taxonomy shared by every stage.

pub mod core;
pub mod error;
