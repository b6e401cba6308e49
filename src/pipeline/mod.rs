// In: src/pipeline/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Pipeline Layer
// ====================================================================================
//
// A pipeline is a tree of `Output` nodes rooted at its entry stage. Every stage
// owns its downstream references, configured once at construction.
//
//   [Entry: e.g. CtmProcessor or WindowedExtractor]
//         |
//         `-> [Interleaver]  --plane 0--> [Sink "bitmap0"]
//                 |          --plane 1--> [Nybbler] --low--> [Sink "colours"]
//                 |                                 `--hi--> (absent: no-op)
//                 `-- ...
//
// Execution is one synchronous call chain whose depth equals the number of
// composed stages. A failing downstream write fails the whole call; sibling
// writes that already happened stay happened.
//
// ====================================================================================
pub mod builder;
pub mod stages;

pub use builder::{build, SinkRegistry};
pub use stages::{Interleaver, Nybbler, WindowedExtractor};
