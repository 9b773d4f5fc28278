//! # optiplot i18n
//!
//! Chart label translation using the Fluent localization system.
//!
//! Axis titles and bar categories are written as message keys in chart
//! definitions and resolved here. Czech is the default locale, English is
//! available for reuse of the charts outside the thesis. Locale files are
//! embedded at compile time and checked for consistency by the build script.
//!
//! # Example
//!
//! ```rust
//! use optiplot_i18n::{LabelTranslator, Locale};
//! use std::collections::BTreeMap;
//!
//! let translator = LabelTranslator::new(Locale::Czech).unwrap();
//! let label = translator.translate("axis-iterations", &BTreeMap::new()).unwrap();
//! assert_eq!(label, "Iterace");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod locale;
pub mod translator;

pub use locale::Locale;
pub use translator::LabelTranslator;
