// In: src/ctm/processor.rs

//! The CTM processor: the codec at the head of a pipeline.
//!
//! A `CtmProcessor` is itself an `Output`. Every write is one complete CTM5 file;
//! the processor decodes it and forwards each section into the pipelines routed
//! to that section.

use std::collections::BTreeMap;

use crate::config::CtmProcessorConfig;
use crate::ctm::codec;
use crate::ctm::format::CtmSection;
use crate::error::PipelineError;
use crate::output::{BoxedOutput, Output};
use crate::pipeline::builder;

/// Routes decoded CTM sections into downstream outputs.
///
/// Sections are served in on-disk order (charset, char attributes, tiles, tile
/// colours, map); outputs of one section in the order they were routed. The
/// first failing output aborts the write.
#[derive(Default)]
pub struct CtmProcessor<'a> {
    routes: BTreeMap<CtmSection, Vec<BoxedOutput<'a>>>,
}

impl<'a> CtmProcessor<'a> {
    pub fn builder() -> CtmProcessorBuilder<'a> {
        CtmProcessorBuilder {
            processor: CtmProcessor::default(),
        }
    }

    /// Builds a processor from a routing table, resolving sink names with
    /// `resolve` (see `pipeline::builder::build`).
    pub fn from_config<F>(config: &CtmProcessorConfig, resolve: &mut F) -> Result<Self, PipelineError>
    where
        F: FnMut(&str) -> Result<BoxedOutput<'a>, PipelineError>,
    {
        let mut routes = Self::builder();
        for route in &config.routes {
            routes = routes.route(route.section, builder::build(&route.output, resolve)?);
        }
        Ok(routes.build())
    }

    /// Number of outputs routed to `section`.
    pub fn route_count(&self, section: CtmSection) -> usize {
        self.routes.get(&section).map_or(0, Vec::len)
    }
}

impl Output for CtmProcessor<'_> {
    fn write(&mut self, data: &[u8]) -> Result<(), PipelineError> {
        let file = codec::decode(data)?;
        // BTreeMap iteration follows the section order declared in `CtmSection`.
        for (section, outputs) in self.routes.iter_mut() {
            let bytes = file.section(*section);
            log::trace!(
                "ctm processor: {} bytes of {} into {} outputs",
                bytes.len(),
                section,
                outputs.len()
            );
            for output in outputs.iter_mut() {
                output.write(bytes)?;
            }
        }
        Ok(())
    }
}

/// Collects section routes for a `CtmProcessor`.
pub struct CtmProcessorBuilder<'a> {
    processor: CtmProcessor<'a>,
}

impl<'a> CtmProcessorBuilder<'a> {
    pub fn route(mut self, section: CtmSection, output: impl Output + 'a) -> Self {
        self.processor
            .routes
            .entry(section)
            .or_default()
            .push(Box::new(output));
        self
    }

    pub fn build(self) -> CtmProcessor<'a> {
        self.processor
    }
}
