//! Argument handling pipeline for nvshim.
//!
//! ```text
//! gcc-style args → Classify (registry) → Assemble → nvcc args
//! ```
//!
//! Each stage is a pure function that can be unit-tested independently.

mod assembler;
mod classifier;
mod registry;

pub use assembler::{passthrough_flag, ArgAssembler};
pub use classifier::{classify, ClassifyResult};
pub use registry::{disposition_of, flag_rules, Disposition, FlagRule, Matcher};
