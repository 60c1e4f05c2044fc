//! The two demos shipped as binaries.

pub mod terrain;
pub mod triangle;
