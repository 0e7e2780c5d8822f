//! nvshim — run nvcc behind a gcc-style compiler command line.
//!
//! A build tool that only knows how to call `cc` with gcc flags hands its
//! argument list to [`driver::Driver`], which sorts the flags nvcc knows from
//! the ones it does not, exposes sources under the `.cu` extension, runs
//! nvcc and removes what it created.

pub mod args;
pub mod coerce;
pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod verbosity;

pub use error::{CoercionReason, ShimError};
