//! Build script for optiplot-i18n
//!
//! Validates the Fluent locale files at compile time:
//! - every file parses
//! - every locale defines the same message keys
//! - every message uses the same variables in every locale

use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use fluent_syntax::ast::{Entry, Expression, InlineExpression, Pattern, PatternElement};
use fluent_syntax::parser::parse;

type MessageVars = BTreeMap<String, BTreeSet<String>>;

/// Extract message keys and the variables each one references
fn extract_messages(content: &str) -> Result<MessageVars, String> {
    let resource = parse(content).map_err(|(_, errors)| format!("parse errors: {errors:?}"))?;

    let mut messages = BTreeMap::new();
    for entry in resource.body {
        if let Entry::Message(message) = entry {
            let mut vars = BTreeSet::new();
            if let Some(pattern) = &message.value {
                collect_pattern_vars(pattern, &mut vars);
            }
            for attribute in &message.attributes {
                collect_pattern_vars(&attribute.value, &mut vars);
            }
            messages.insert(message.id.name.to_string(), vars);
        }
    }
    Ok(messages)
}

fn collect_pattern_vars(pattern: &Pattern<&str>, vars: &mut BTreeSet<String>) {
    for element in &pattern.elements {
        if let PatternElement::Placeable { expression } = element {
            collect_expression_vars(expression, vars);
        }
    }
}

fn collect_expression_vars(expression: &Expression<&str>, vars: &mut BTreeSet<String>) {
    match expression {
        Expression::Select { selector, variants } => {
            collect_inline_vars(selector, vars);
            for variant in variants {
                collect_pattern_vars(&variant.value, vars);
            }
        }
        Expression::Inline(inline) => collect_inline_vars(inline, vars),
    }
}

fn collect_inline_vars(expression: &InlineExpression<&str>, vars: &mut BTreeSet<String>) {
    match expression {
        InlineExpression::VariableReference { id } => {
            vars.insert(id.name.to_string());
        }
        InlineExpression::FunctionReference { arguments, .. } => {
            for arg in &arguments.positional {
                collect_inline_vars(arg, vars);
            }
            for arg in &arguments.named {
                collect_inline_vars(&arg.value, vars);
            }
        }
        InlineExpression::Placeable { expression } => collect_expression_vars(expression, vars),
        InlineExpression::MessageReference { .. }
        | InlineExpression::TermReference { .. }
        | InlineExpression::StringLiteral { .. }
        | InlineExpression::NumberLiteral { .. } => {}
    }
}

/// Find `locales/<code>/main.ftl` for every locale directory
fn find_locale_files() -> Result<BTreeMap<String, PathBuf>, String> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").map_err(|_| "CARGO_MANIFEST_DIR not set")?;
    let locales_dir = Path::new(&manifest_dir).join("locales");

    let entries = fs::read_dir(&locales_dir)
        .map_err(|e| format!("failed to read {}: {e}", locales_dir.display()))?;

    let mut files = BTreeMap::new();
    for entry in entries {
        let path = entry.map_err(|e| format!("failed to read directory entry: {e}"))?.path();
        let main_ftl = path.join("main.ftl");
        if path.is_dir() && main_ftl.exists() {
            let code = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| format!("invalid locale directory name: {}", path.display()))?;
            files.insert(code.to_string(), main_ftl);
        }
    }

    if files.is_empty() {
        return Err(format!("no locale files under {}", locales_dir.display()));
    }
    Ok(files)
}

fn validate_locales() -> Result<(), String> {
    println!("cargo:rerun-if-changed=locales");

    let mut all = BTreeMap::new();
    let mut errors = Vec::new();
    for (code, path) in find_locale_files()? {
        let content = fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        match extract_messages(&content) {
            Ok(messages) => {
                all.insert(code, messages);
            }
            Err(e) => errors.push(format!("{code}: {e}")),
        }
    }

    let mut locales = all.iter();
    if let Some((reference_code, reference)) = locales.next() {
        for (code, messages) in locales {
            for key in reference.keys().filter(|k| !messages.contains_key(*k)) {
                errors.push(format!("{code}: missing message '{key}' (present in {reference_code})"));
            }
            for key in messages.keys().filter(|k| !reference.contains_key(*k)) {
                errors.push(format!("{code}: extra message '{key}' (absent from {reference_code})"));
            }
            for (key, vars) in reference {
                if let Some(other) = messages.get(key) {
                    if vars != other {
                        errors.push(format!(
                            "{code}: variables of '{key}' differ, expected {vars:?}, found {other:?}"
                        ));
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("\n"))
    }
}

fn main() {
    if let Err(e) = validate_locales() {
        eprintln!("Locale validation failed:\n{e}");
        process::exit(1);
    }
}
