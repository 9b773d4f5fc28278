//! Message lookup and formatting for chart labels

use crate::Locale;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use once_cell::sync::Lazy;
use optiplot_common::{OptiplotError, Result};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, error, warn};

fn parse_resource(locale: Locale) -> FluentResource {
    FluentResource::try_new(locale.resource_source().to_string()).unwrap_or_else(|(resource, errors)| {
        error!(locale = %locale, ?errors, "locale resource has syntax errors, keeping valid entries");
        resource
    })
}

static CZECH: Lazy<FluentResource> = Lazy::new(|| parse_resource(Locale::Czech));
static ENGLISH: Lazy<FluentResource> = Lazy::new(|| parse_resource(Locale::English));

fn resource(locale: Locale) -> &'static FluentResource {
    match locale {
        Locale::Czech => &CZECH,
        Locale::English => &ENGLISH,
    }
}

type Bundle = FluentBundle<&'static FluentResource>;

/// Translates label keys for one target locale, falling back to the default
/// locale for keys the target does not define.
///
/// Immutable after construction and safe to share between render threads.
pub struct LabelTranslator {
    locale: Locale,
    bundles: HashMap<Locale, Bundle>,
}

impl std::fmt::Debug for LabelTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelTranslator")
            .field("locale", &self.locale)
            .field("bundles", &self.bundles.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl LabelTranslator {
    /// Builds bundles for `locale` and the default locale.
    pub fn new(locale: Locale) -> Result<Self> {
        let mut bundles = HashMap::new();
        for wanted in [locale, Locale::default()] {
            if bundles.contains_key(&wanted) {
                continue;
            }
            bundles.insert(wanted, Self::build_bundle(wanted)?);
        }
        debug!(locale = %locale, "label translator ready");
        Ok(Self { locale, bundles })
    }

    fn build_bundle(locale: Locale) -> Result<Bundle> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.to_language_identifier()?]);
        bundle.set_use_isolating(false);
        bundle.add_resource(resource(locale)).map_err(|errors| {
            OptiplotError::localization_with_locale(
                format!("failed to add resource: {errors:?}"),
                locale.code(),
            )
        })?;
        Ok(bundle)
    }

    /// The locale labels are translated into.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Whether `key` resolves in the target or default locale.
    pub fn has_message(&self, key: &str) -> bool {
        self.bundles.values().any(|bundle| bundle.has_message(key))
    }

    /// Formats message `key` with string arguments.
    pub fn translate(&self, key: &str, args: &BTreeMap<String, String>) -> Result<String> {
        if let Some(bundle) = self.bundles.get(&self.locale) {
            if bundle.has_message(key) {
                return Self::format(bundle, self.locale, key, args);
            }
        }

        let fallback = Locale::default();
        if fallback != self.locale {
            if let Some(bundle) = self.bundles.get(&fallback) {
                if bundle.has_message(key) {
                    warn!(key, locale = %self.locale, fallback = %fallback, "message missing, using fallback locale");
                    return Self::format(bundle, fallback, key, args);
                }
            }
        }

        Err(OptiplotError::localization_with_locale(
            format!("message '{key}' not found"),
            self.locale.code(),
        ))
    }

    fn format(
        bundle: &Bundle,
        locale: Locale,
        key: &str,
        args: &BTreeMap<String, String>,
    ) -> Result<String> {
        let pattern = bundle
            .get_message(key)
            .and_then(|message| message.value())
            .ok_or_else(|| {
                OptiplotError::localization_with_locale(
                    format!("message '{key}' has no value"),
                    locale.code(),
                )
            })?;

        let fluent_args = (!args.is_empty()).then(|| {
            let mut fluent_args = FluentArgs::new();
            for (name, value) in args {
                fluent_args.set(name.as_str(), FluentValue::from(value.as_str()));
            }
            fluent_args
        });

        let mut errors = Vec::new();
        let text = bundle.format_pattern(pattern, fluent_args.as_ref(), &mut errors);
        if !errors.is_empty() {
            return Err(OptiplotError::localization_with_locale(
                format!("failed to format '{key}': {errors:?}"),
                locale.code(),
            ));
        }
        Ok(text.into_owned())
    }
}
