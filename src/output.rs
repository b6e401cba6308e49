// In: src/output.rs

//! The `Output` port: the one capability every pipeline stage and every
//! terminal sink implements.
//!
//! An intermediate stage transforms the bytes it receives and forwards the
//! result to the downstream `Output`s it owns. A terminal sink hands the bytes
//! to a collaborator (a buffer, a caller-supplied writer). The core never opens
//! files itself.

use std::io::Write;

use crate::error::PipelineError;

//==================================================================================
// 1. The Port
//==================================================================================

/// Accepts a byte sequence, producing `Ok(())` or a typed failure.
///
/// `write` takes `&mut self` only so that stages can forward into sinks they
/// own; stages hold no state that changes between calls.
pub trait Output {
    fn write(&mut self, data: &[u8]) -> Result<(), PipelineError>;
}

impl<O: Output + ?Sized> Output for &mut O {
    fn write(&mut self, data: &[u8]) -> Result<(), PipelineError> {
        (**self).write(data)
    }
}

impl<O: Output + ?Sized> Output for Box<O> {
    fn write(&mut self, data: &[u8]) -> Result<(), PipelineError> {
        (**self).write(data)
    }
}

/// A boxed downstream reference, as owned by fan-out stages.
pub type BoxedOutput<'a> = Box<dyn Output + 'a>;

//==================================================================================
// 2. Terminal Sinks
//==================================================================================

/// An in-memory sink. Every write is appended to the buffer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BinaryOutput {
    buffer: Vec<u8>,
    writes: usize,
}

impl BinaryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Number of `write` calls received, including empty ones.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl Output for BinaryOutput {
    fn write(&mut self, data: &[u8]) -> Result<(), PipelineError> {
        self.buffer.extend_from_slice(data);
        self.writes += 1;
        Ok(())
    }
}

/// Adapts any `std::io::Write` (a file opened by the caller, a socket, a
/// `Vec<u8>`...) into a terminal `Output`.
#[derive(Debug)]
pub struct WriterOutput<W: Write> {
    inner: W,
}

impl<W: Write> WriterOutput<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Output for WriterOutput<W> {
    fn write(&mut self, data: &[u8]) -> Result<(), PipelineError> {
        self.inner.write_all(data)?;
        self.inner.flush()?;
        Ok(())
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_binary_output_appends() {
        let mut sink = BinaryOutput::new();
        sink.write(&[1, 2]).unwrap();
        sink.write(&[]).unwrap();
        sink.write(&[3]).unwrap();
        assert_eq!(sink.as_bytes(), &[1, 2, 3]);
        assert_eq!(sink.write_count(), 3);
    }

    #[test]
    fn test_borrowed_and_boxed_outputs_forward() {
        let mut sink = BinaryOutput::new();
        {
            let mut boxed: BoxedOutput = Box::new(&mut sink);
            boxed.write(&[7, 8]).unwrap();
        }
        assert_eq!(sink.into_bytes(), vec![7, 8]);
    }

    #[test]
    fn test_writer_output() {
        let mut out = WriterOutput::new(Vec::new());
        out.write(b"CTM").unwrap();
        assert_eq!(out.get_ref().as_slice(), b"CTM");
        out.write(&[5]).unwrap();
        assert_eq!(out.into_inner(), b"CTM\x05".to_vec());
    }

    #[test]
    fn test_writer_output_propagates_io_error() {
        let mut out = WriterOutput::new(BrokenWriter);
        assert!(matches!(out.write(&[1]), Err(PipelineError::Io(_))));
    }
}
