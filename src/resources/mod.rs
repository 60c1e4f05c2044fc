//! Helpers that turn CPU-side geometry into GPU resources.

pub mod buffer;
