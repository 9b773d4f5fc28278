//! Test utilities and shared test helpers for optiplot.
//!
//! Enabled with the `testing` feature so that every crate in the workspace
//! can use the same fixtures from its integration tests.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory that is removed on drop.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Whether text can be laid out with the system fonts.
///
/// Rendering needs a sans-serif or serif face from the host. Minimal CI
/// images sometimes ship none, in which case render tests skip themselves.
#[cfg(feature = "plotters")]
pub fn fonts_available() -> bool {
    use plotters::style::{FontDesc, FontFamily, FontStyle};

    [FontFamily::SansSerif, FontFamily::Serif].into_iter().all(|family| {
        FontDesc::new(family, 12.0, FontStyle::Normal)
            .box_size("Čas [s]")
            .is_ok()
    })
}

/// Assert that two floating point numbers are approximately equal.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Sample optimizer output for chart and averaging tests.
pub mod fixtures {
    /// A monotonically non-increasing "best so far" series, like the
    /// optimizer's per-iteration output.
    pub fn best_so_far(len: usize, start: f64) -> Vec<f64> {
        (0..len)
            .map(|i| start - (i as f64).sqrt().floor() * 100.0)
            .collect()
    }

    /// Raw run file content with three runs of four iterations.
    pub fn run_file() -> &'static str {
        "100,90,80,70,\n110,100,90,80,\n120,110,100,90,\n"
    }

    /// A minimal line chart definition in TOML.
    pub fn line_chart_toml(id: &str) -> String {
        format!(
            r#"[chart]
id = "{id}"
kind = "line"
style = "paper"
x_label = {{ key = "axis-iterations" }}
y_label = {{ key = "axis-time-seconds" }}

[output]
file = "{id}.png"

[[series]]
label = "GA"
range = {{ start = 0, end = 5 }}
values = [109564, 106395, 105964, 105584, 105370]
"#
        )
    }

    /// A minimal bar chart definition in TOML.
    pub fn bar_chart_toml(id: &str) -> String {
        format!(
            r#"[chart]
id = "{id}"
kind = "bar"
y_label = {{ key = "axis-time-seconds" }}

[output]
file = "{id}.png"

[[bars]]
label = {{ key = "bar-no-optimization" }}
value = 10126
color = "blue"

[[bars]]
label = {{ key = "bar-path", args = {{ optimizer = "MMAS", share = "59.4%" }} }}
value = 6017
color = "purple"
"#
        )
    }
}
