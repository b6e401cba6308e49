//! This module contains the pure, stateless kernel for windowed extraction.
//!
//! A window is described in *logical* units (characters, tiles, map rows...) and
//! a `scale` that converts one logical unit into a number of physical bytes.
//! The kernel never copies: it returns a borrowed sub-slice of the input.

use crate::error::PipelineError;

//==================================================================================
// 1. Window Description
//==================================================================================

/// A `[start, end)` range in logical units plus a unit-to-byte multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    start: usize,
    end: usize,
    scale: usize,
}

impl WindowSpec {
    /// Creates a validated window. `end` must not precede `start` and `scale`
    /// must be at least 1.
    pub fn new(start: usize, end: usize, scale: usize) -> Result<Self, PipelineError> {
        if end < start {
            return Err(PipelineError::IllegalInput(format!(
                "Window end {} precedes window start {}",
                end, start
            )));
        }
        if scale == 0 {
            return Err(PipelineError::IllegalInput(
                "Window scale must be at least 1".to_string(),
            ));
        }
        Ok(Self { start, end, scale })
    }

    /// A window with `scale = 1`.
    pub fn unscaled(start: usize, end: usize) -> Result<Self, PipelineError> {
        Self::new(start, end, 1)
    }

    /// A window covering everything from `start` onward.
    pub fn from_offset(start: usize, scale: usize) -> Result<Self, PipelineError> {
        Self::new(start, usize::MAX, scale)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn scale(&self) -> usize {
        self.scale
    }
}

//==================================================================================
// 2. Public API
//==================================================================================

/// Carves the window out of `data`.
///
/// The end offset clamps silently to the available data; the start offset does
/// not. Products that overflow `usize` saturate, which places them beyond any
/// real buffer.
pub fn extract<'d>(data: &'d [u8], window: &WindowSpec) -> Result<&'d [u8], PipelineError> {
    let scaled_start = window.start.saturating_mul(window.scale);
    let scaled_end = window.end.saturating_mul(window.scale);

    if scaled_start >= data.len() {
        return Err(PipelineError::OutOfData {
            start: window.start,
            available: data.len() / window.scale,
        });
    }

    if scaled_end < data.len() {
        Ok(&data[scaled_start..scaled_end])
    } else {
        if scaled_end > data.len() {
            log::debug!(
                "window end {} (x{}) clamped to {} available bytes",
                window.end,
                window.scale,
                data.len()
            );
        }
        Ok(&data[scaled_start..])
    }
}
