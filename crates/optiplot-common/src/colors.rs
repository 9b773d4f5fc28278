//! Color names accepted in chart definitions.
//!
//! Charts were styled with matplotlib color names, so the same names work
//! here: the basic CSS-like names, the `tab:` palette and `#rrggbb`.

use crate::error::{OptiplotError, Result};
use std::fmt;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// The tab10 palette, also the default series color cycle.
pub const TAB10: [(&str, Rgb); 10] = [
    ("tab:blue", Rgb(31, 119, 180)),
    ("tab:orange", Rgb(255, 127, 14)),
    ("tab:green", Rgb(44, 160, 44)),
    ("tab:red", Rgb(214, 39, 40)),
    ("tab:purple", Rgb(148, 103, 189)),
    ("tab:brown", Rgb(140, 86, 75)),
    ("tab:pink", Rgb(227, 119, 194)),
    ("tab:gray", Rgb(127, 127, 127)),
    ("tab:olive", Rgb(188, 189, 34)),
    ("tab:cyan", Rgb(23, 190, 207)),
];

const NAMED: [(&str, Rgb); 14] = [
    ("black", Rgb(0, 0, 0)),
    ("white", Rgb(255, 255, 255)),
    ("blue", Rgb(0, 0, 255)),
    ("green", Rgb(0, 128, 0)),
    ("red", Rgb(255, 0, 0)),
    ("purple", Rgb(128, 0, 128)),
    ("orange", Rgb(255, 165, 0)),
    ("grey", Rgb(128, 128, 128)),
    ("gray", Rgb(128, 128, 128)),
    ("yellow", Rgb(255, 255, 0)),
    ("cyan", Rgb(0, 255, 255)),
    ("magenta", Rgb(255, 0, 255)),
    ("brown", Rgb(165, 42, 42)),
    ("pink", Rgb(255, 192, 203)),
];

/// Parses a color name, `tab:` palette name or `#rrggbb` hex string.
pub fn parse_color(input: &str) -> Result<Rgb> {
    let name = input.trim().to_ascii_lowercase();

    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() == 6 && hex.is_ascii() {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Ok(Rgb(r, g, b));
            }
        }
        return Err(OptiplotError::validation_field(
            format!("'{input}' is not a #rrggbb color"),
            "color",
        ));
    }

    let name = if name == "tab:grey" { "tab:gray" } else { name.as_str() };
    TAB10
        .iter()
        .chain(NAMED.iter())
        .find(|(known, _)| *known == name)
        .map(|(_, rgb)| *rgb)
        .ok_or_else(|| OptiplotError::validation_field(format!("unknown color '{input}'"), "color"))
}

/// Default color for the `index`-th series without an explicit color.
pub fn cycle_color(index: usize) -> Rgb {
    TAB10[index % TAB10.len()].1
}
