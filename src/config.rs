// In: src/config.rs

//! The single source of truth for describing conversion pipelines as data.
//!
//! A `StageConfig` is a tree that mirrors the `Output` tree it describes. It is
//! designed to be created once at the application boundary (e.g. from a build
//! script's JSON) and handed to `pipeline::builder::build`, which turns it into
//! live stages. Terminal sinks are only *named* here; the caller decides what a
//! name resolves to.

use serde::{Deserialize, Serialize};

use crate::ctm::CtmSection;
use crate::error::PipelineError;

//==================================================================================
// I. Stage Descriptions
//==================================================================================

/// One node of a pipeline description.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StageConfig {
    /// Forward `[start, end)` (logical units, multiplied by `scale`) of every input.
    /// An omitted `end` means "everything from `start` onward".
    Window {
        start: usize,
        #[serde(default)]
        end: Option<usize>,
        #[serde(default = "default_scale")]
        scale: usize,
        output: Box<StageConfig>,
    },

    /// Round-robin split across `outputs`, in the listed order.
    Interleave { outputs: Vec<StageConfig> },

    /// Low/high nibble split. Either branch may be omitted.
    Nybble {
        #[serde(default)]
        low: Option<Box<StageConfig>>,
        #[serde(default)]
        hi: Option<Box<StageConfig>>,
        #[serde(default = "default_true")]
        normalize_hi: bool,
    },

    /// A terminal sink, resolved by name when the pipeline is built.
    Sink { name: String },
}

impl StageConfig {
    /// Parses a pipeline description from JSON.
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Shorthand for a named terminal sink.
    pub fn sink(name: impl Into<String>) -> Self {
        StageConfig::Sink { name: name.into() }
    }

    /// Every sink name referenced by this tree, in depth-first order.
    pub fn sink_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_sink_names(&mut names);
        names
    }

    fn collect_sink_names<'c>(&'c self, names: &mut Vec<&'c str>) {
        match self {
            StageConfig::Window { output, .. } => output.collect_sink_names(names),
            StageConfig::Interleave { outputs } => {
                for output in outputs {
                    output.collect_sink_names(names);
                }
            }
            StageConfig::Nybble { low, hi, .. } => {
                for branch in [low, hi].into_iter().flatten() {
                    branch.collect_sink_names(names);
                }
            }
            StageConfig::Sink { name } => names.push(name),
        }
    }
}

//==================================================================================
// II. CTM Routing
//==================================================================================

/// Sends one decoded CTM section into a pipeline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SectionRoute {
    pub section: CtmSection,
    pub output: StageConfig,
}

/// The full routing table for a `CtmProcessor`. Routes for the same section
/// are served in the order they are listed.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CtmProcessorConfig {
    #[serde(default)]
    pub routes: Vec<SectionRoute>,
}

impl CtmProcessorConfig {
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Helper for `serde` to default a window scale to 1.
fn default_scale() -> usize {
    1
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}
