// In: src/pipeline/builder.rs

//! Turns a `StageConfig` description into a live tree of `Output` stages.

use std::collections::HashMap;

use crate::config::StageConfig;
use crate::error::PipelineError;
use crate::kernels::WindowSpec;
use crate::output::{BoxedOutput, Output};
use crate::pipeline::stages::{Interleaver, Nybbler, WindowedExtractor};

/// Builds the pipeline described by `config`. `resolve` is called once per
/// `sink` node, depth-first, to obtain the terminal `Output` for that name.
pub fn build<'a, F>(config: &StageConfig, resolve: &mut F) -> Result<BoxedOutput<'a>, PipelineError>
where
    F: FnMut(&str) -> Result<BoxedOutput<'a>, PipelineError>,
{
    let stage: BoxedOutput<'a> = match config {
        StageConfig::Window {
            start,
            end,
            scale,
            output,
        } => {
            let window = match end {
                Some(end) => WindowSpec::new(*start, *end, *scale)?,
                None => WindowSpec::from_offset(*start, *scale)?,
            };
            Box::new(WindowedExtractor::new(window, build(output, resolve)?))
        }
        StageConfig::Interleave { outputs } => {
            let outputs = outputs
                .iter()
                .map(|output| build(output, resolve))
                .collect::<Result<Vec<_>, _>>()?;
            Box::new(Interleaver::new(outputs)?)
        }
        StageConfig::Nybble {
            low,
            hi,
            normalize_hi,
        } => {
            let low = low.as_deref().map(|c| build(c, resolve)).transpose()?;
            let hi = hi.as_deref().map(|c| build(c, resolve)).transpose()?;
            Box::new(Nybbler::new(low, hi, *normalize_hi))
        }
        StageConfig::Sink { name } => resolve(name)?,
    };
    Ok(stage)
}

//==================================================================================
// Sink Registry
//==================================================================================

/// A simple name-to-sink table for callers that know all their sinks up front.
/// Each registered sink can be claimed by exactly one `sink` node.
#[derive(Default)]
pub struct SinkRegistry<'a> {
    sinks: HashMap<String, BoxedOutput<'a>>,
}

impl<'a> SinkRegistry<'a> {
    pub fn new() -> Self {
        Self {
            sinks: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, sink: impl Output + 'a) -> &mut Self {
        self.sinks.insert(name.into(), Box::new(sink));
        self
    }

    /// Removes and returns the sink registered under `name`.
    pub fn claim(&mut self, name: &str) -> Result<BoxedOutput<'a>, PipelineError> {
        self.sinks.remove(name).ok_or_else(|| {
            PipelineError::Config(format!(
                "No sink named '{}' is registered (or it is already in use)",
                name
            ))
        })
    }

    /// Builds `config`, claiming sinks from this registry.
    pub fn build(&mut self, config: &StageConfig) -> Result<BoxedOutput<'a>, PipelineError> {
        build(config, &mut |name: &str| self.claim(name))
    }
}
