//! Sprite sheet composition.

pub mod pack;
