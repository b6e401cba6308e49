// In: src/pipeline/stages.rs

//! Concrete pipeline stages. Each stage wraps one pure kernel and forwards its
//! result to the downstream `Output`(s) it owns.
//!
//! Fan-out stages write to their outputs in a fixed order and stop at the first
//! failure. Writes that already completed are not rolled back.

use crate::error::PipelineError;
use crate::kernels::{interleave, nybble, window, WindowSpec};
use crate::output::{BoxedOutput, Output};

//==================================================================================
// --- Stage 1: Windowed Extractor ---
//==================================================================================

/// Forwards a window of every input, scaled from logical units to bytes.
pub struct WindowedExtractor<'a> {
    window: WindowSpec,
    output: BoxedOutput<'a>,
}

impl<'a> WindowedExtractor<'a> {
    pub fn new(window: WindowSpec, output: impl Output + 'a) -> Self {
        Self {
            window,
            output: Box::new(output),
        }
    }

    pub fn window(&self) -> &WindowSpec {
        &self.window
    }
}

impl Output for WindowedExtractor<'_> {
    fn write(&mut self, data: &[u8]) -> Result<(), PipelineError> {
        let slice = window::extract(data, &self.window)?;
        log::trace!(
            "window [{}, {}) x{}: forwarding {} of {} bytes",
            self.window.start(),
            self.window.end(),
            self.window.scale(),
            slice.len(),
            data.len()
        );
        self.output.write(slice)
    }
}

//==================================================================================
// --- Stage 2: Round-Robin Interleaver ---
//==================================================================================

/// Fans a single input out across N outputs by byte position modulo N.
pub struct Interleaver<'a> {
    outputs: Vec<BoxedOutput<'a>>,
}

impl<'a> Interleaver<'a> {
    /// At least one output is required.
    pub fn new(outputs: Vec<BoxedOutput<'a>>) -> Result<Self, PipelineError> {
        if outputs.is_empty() {
            return Err(PipelineError::IllegalInput(
                "An interleaver needs at least one output".to_string(),
            ));
        }
        Ok(Self { outputs })
    }

    pub fn width(&self) -> usize {
        self.outputs.len()
    }
}

impl Output for Interleaver<'_> {
    fn write(&mut self, data: &[u8]) -> Result<(), PipelineError> {
        let streams = interleave::split(data, self.outputs.len())?;
        log::trace!(
            "interleaver: {} bytes into {} streams",
            data.len(),
            self.outputs.len()
        );
        for (output, stream) in self.outputs.iter_mut().zip(&streams) {
            output.write(stream)?;
        }
        Ok(())
    }
}

//==================================================================================
// --- Stage 3: Nybbler ---
//==================================================================================

/// Splits every byte into a low-nibble stream and a high-nibble stream.
/// Either output may be absent; the low stream is written first.
pub struct Nybbler<'a> {
    low: Option<BoxedOutput<'a>>,
    hi: Option<BoxedOutput<'a>>,
    normalize_hi: bool,
}

impl<'a> Nybbler<'a> {
    pub fn new(
        low: Option<BoxedOutput<'a>>,
        hi: Option<BoxedOutput<'a>>,
        normalize_hi: bool,
    ) -> Self {
        Self {
            low,
            hi,
            normalize_hi,
        }
    }

    /// A nybbler that shifts the high nibble down to `0x00..=0x0F`.
    pub fn normalized(low: Option<BoxedOutput<'a>>, hi: Option<BoxedOutput<'a>>) -> Self {
        Self::new(low, hi, true)
    }

    pub fn normalize_hi(&self) -> bool {
        self.normalize_hi
    }
}

impl Output for Nybbler<'_> {
    fn write(&mut self, data: &[u8]) -> Result<(), PipelineError> {
        if let Some(low) = self.low.as_mut() {
            low.write(&nybble::low_nibbles(data))?;
        }
        if let Some(hi) = self.hi.as_mut() {
            hi.write(&nybble::high_nibbles(data, self.normalize_hi))?;
        }
        Ok(())
    }
}
