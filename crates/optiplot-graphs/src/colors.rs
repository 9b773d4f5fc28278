//! Conversions between definition colors and plotters colors.

use optiplot_common::colors::{cycle_color, TAB10};
use optiplot_common::Rgb;
use plotters::style::RGBColor;

pub use optiplot_common::colors::parse_color;

/// Plotters color for an [`Rgb`].
pub fn plot_color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

/// The default series color cycle, in order.
pub fn default_cycle() -> Vec<RGBColor> {
    TAB10.iter().map(|(_, rgb)| plot_color(*rgb)).collect()
}

/// Picks concrete colors for a list of optional explicit colors.
///
/// Entries without a color take the next color of the default cycle;
/// explicit colors do not advance the cycle.
pub fn assign_colors<'a>(
    explicit: impl IntoIterator<Item = Option<&'a str>>,
) -> optiplot_common::Result<Vec<Rgb>> {
    let mut next = 0;
    explicit
        .into_iter()
        .map(|color| match color {
            Some(color) => parse_color(color),
            None => {
                let rgb = cycle_color(next);
                next += 1;
                Ok(rgb)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cycle_is_tab10() {
        let cycle = default_cycle();
        assert_eq!(cycle.len(), 10);
        assert_eq!(cycle[0], RGBColor(31, 119, 180));
        assert_eq!(cycle[1], RGBColor(255, 127, 14));
    }

    #[test]
    fn test_explicit_colors_do_not_advance_cycle() {
        let colors = assign_colors([None, Some("black"), None]).unwrap();
        assert_eq!(
            colors,
            vec![Rgb(31, 119, 180), Rgb(0, 0, 0), Rgb(255, 127, 14)]
        );
    }

    #[test]
    fn test_unknown_color_fails() {
        assert!(assign_colors([Some("tab:turquoise")]).is_err());
    }
}
