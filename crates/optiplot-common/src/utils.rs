//! Shared utility functions.

use std::path::{Component, Path};

/// Splits a label on explicit line breaks, dropping trailing whitespace.
pub fn label_lines(label: &str) -> Vec<&str> {
    label.lines().map(str::trim_end).collect()
}

/// Whether `path` is a bare file name without any directory component.
pub fn is_plain_file_name(path: &Path) -> bool {
    let mut components = path.components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
