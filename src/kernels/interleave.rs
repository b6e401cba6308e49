//! This module contains the pure, stateless kernels for round-robin
//! (de)interleaving.
//!
//! `split` distributes a single stream across `n` streams by byte position
//! modulo `n`; this is how packed multi-plane pixel data is turned into one
//! byte stream per plane. `merge` is the exact inverse.

use crate::error::PipelineError;

/// Splits `data` into `n` streams: stream `i` holds the bytes at positions
/// `i, i + n, i + 2n, ...` in their original order.
pub fn split(data: &[u8], n: usize) -> Result<Vec<Vec<u8>>, PipelineError> {
    if n == 0 {
        return Err(PipelineError::IllegalInput(
            "Cannot interleave into zero outputs".to_string(),
        ));
    }
    if data.len() % n != 0 {
        return Err(PipelineError::IllegalInput(format!(
            "Data size {} is not divisible by the number of outputs {}",
            data.len(),
            n
        )));
    }

    let stream_len = data.len() / n;
    let mut streams: Vec<Vec<u8>> = (0..n).map(|_| Vec::with_capacity(stream_len)).collect();
    for chunk in data.chunks_exact(n) {
        for (stream, &byte) in streams.iter_mut().zip(chunk) {
            stream.push(byte);
        }
    }
    Ok(streams)
}

/// Round-robin merges equally sized streams back into a single stream.
pub fn merge<S: AsRef<[u8]>>(streams: &[S]) -> Result<Vec<u8>, PipelineError> {
    let Some(first) = streams.first() else {
        return Ok(Vec::new());
    };
    let stream_len = first.as_ref().len();
    if let Some((idx, bad)) = streams
        .iter()
        .enumerate()
        .find(|(_, s)| s.as_ref().len() != stream_len)
    {
        return Err(PipelineError::IllegalInput(format!(
            "Cannot merge streams of unequal length: stream 0 has {} bytes, stream {} has {}",
            stream_len,
            idx,
            bad.as_ref().len()
        )));
    }

    let mut merged = Vec::with_capacity(stream_len * streams.len());
    for pos in 0..stream_len {
        merged.extend(streams.iter().map(|s| s.as_ref()[pos]));
    }
    Ok(merged)
}
