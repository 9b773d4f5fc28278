//! Supported chart label locales

use optiplot_common::{OptiplotError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Supported locales. Czech is the language the charts were published in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "cs-CZ", alias = "cs")]
    Czech,
    #[serde(rename = "en-US", alias = "en")]
    English,
}

impl Locale {
    /// Get the language code for this locale
    pub fn code(self) -> &'static str {
        match self {
            Self::Czech => "cs-CZ",
            Self::English => "en-US",
        }
    }

    /// Parse a locale from a full or short language code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "cs" | "cs-CZ" => Some(Self::Czech),
            "en" | "en-US" => Some(Self::English),
            _ => None,
        }
    }

    /// Convert to a Fluent language identifier
    pub fn to_language_identifier(self) -> Result<LanguageIdentifier> {
        self.code().parse().map_err(|_| {
            OptiplotError::localization_with_locale("invalid language identifier", self.code())
        })
    }

    /// Get all supported locales
    pub fn all() -> [Self; 2] {
        [Self::Czech, Self::English]
    }

    /// Embedded Fluent source for this locale
    pub(crate) fn resource_source(self) -> &'static str {
        match self {
            Self::Czech => include_str!("../locales/cs-CZ/main.ftl"),
            Self::English => include_str!("../locales/en-US/main.ftl"),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = OptiplotError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s).ok_or_else(|| {
            OptiplotError::localization_with_locale(format!("unsupported locale '{s}'"), s)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for locale in Locale::all() {
            assert_eq!(Locale::from_code(locale.code()), Some(locale));
            assert!(locale.to_language_identifier().is_ok());
        }
        assert_eq!(Locale::from_code("cs"), Some(Locale::Czech));
        assert_eq!(Locale::from_code("de"), None);
    }

    #[test]
    fn test_default_is_czech() {
        assert_eq!(Locale::default(), Locale::Czech);
    }
}
