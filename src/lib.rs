//! This file is the root of the `c64conv` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`pipeline`, `kernels`,
//!     `ctm`, etc.) so the Rust compiler knows they exist.
//! 2.  Re-exporting the handful of types every caller needs: the `Output` port,
//!     the terminal sinks and the crate's error type.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod config;
pub mod ctm;
pub mod error;
pub mod kernels;
pub mod observability;
pub mod output;
pub mod pipeline;

//==================================================================================
// 2. Public Surface
//==================================================================================
pub use error::PipelineError;
pub use observability::enable_verbose_logging;
pub use output::{BinaryOutput, BoxedOutput, Output, WriterOutput};
