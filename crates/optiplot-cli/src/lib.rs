//! # optiplot
//!
//! The `optiplot` command: renders chart definitions, validates and lists
//! them, writes new skeletons and condenses raw run output into series.
//!
//! The binary in `main.rs` only parses arguments, loads settings and sets up
//! logging; everything else lives here so it can be tested.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::{Cli, Command};
pub use commands::run;
pub use error::*;
