//! # optiplot common
//!
//! Shared types, errors, logging setup and run-result helpers for optiplot.
//!
//! This crate provides the foundational types used across all other crates
//! in the workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod colors;
pub mod error;
pub mod logging;
pub mod results;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use colors::{parse_color, Rgb};
pub use error::{OptiplotError, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use types::*;
