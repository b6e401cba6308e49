// In: src/error.rs

//! This module defines the single, unified error type for the entire c64conv library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Every failure is immediately fatal to the operation that raised it. Nothing in
//! the crate retries, recovers locally, or substitutes a default value; errors
//! propagate unchanged to the caller.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    // =========================================================================
    // === Pipeline & Format Errors (Specific to our library's logic)
    // =========================================================================
    /// A size or divisibility precondition was violated, e.g. an interleaver
    /// input whose length is not a multiple of the number of outputs.
    #[error("Illegal input: {0}")]
    IllegalInput(String),

    /// A requested window starts beyond the available data.
    /// Both values are in logical (unscaled) units.
    #[error("Out of data: requested start {start} but only {available} units are available")]
    OutOfData { start: usize, available: usize },

    /// Signature/version mismatch, unknown enumerated byte value, or a section
    /// layout that cannot be reconciled with the header.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A pipeline description could not be turned into a pipeline.
    #[error("Configuration error: {0}")]
    Config(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error from a caller-supplied writer behind a `WriterOutput`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library while reading a pipeline description.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
