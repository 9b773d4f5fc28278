//! # optiplot config
//!
//! Application settings and chart definitions for optiplot.
//!
//! This crate parses chart definition files (TOML, YAML or JSON), validates
//! them before anything is rendered and loads `optiplot.toml` settings with
//! environment overrides.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod chart;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use chart::*;
pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
