// In: src/ctm/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The CTM Layer
// ====================================================================================
//
// CTM is CharPad's tile-map export. This layer reads and writes version 5 and
// plugs the codec into pipelines at either end:
//
//   Head (decode):   CTM bytes -> [CtmProcessor] -> charset        -> pipeline(s)
//                                               -> char attributes -> pipeline(s)
//                                               -> tiles           -> pipeline(s)
//                                               -> tile colours    -> pipeline(s)
//                                               -> map             -> pipeline(s)
//
//   Tail (encode):   CtmFile -> encode -> [Output]
//
// ====================================================================================
pub mod codec;
pub mod format;
pub mod processor;

pub use codec::{decode, encode};
pub use format::{ColouringMethod, CtmFile, CtmFlags, CtmHeader, CtmSection};
pub use processor::{CtmProcessor, CtmProcessorBuilder};
