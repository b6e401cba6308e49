//! This module is the toolbox of pure, stateless byte-stream kernels.
//!
//! Kernels know nothing about `Output`s or pipelines; they only compute. The
//! `pipeline::stages` module wraps each one into a composable stage.
//!
//! - `window`: sub-range extraction with a logical-unit scale.
//! - `interleave`: round-robin split across N streams, and its inverse.
//! - `nybble`: low/high 4-bit halves of every byte.

pub mod interleave;
pub mod nybble;
pub mod window;

pub use window::WindowSpec;
