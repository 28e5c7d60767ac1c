//! Site-wide controller options with TOML support.
//!
//! Unlike the per-element payload these apply to every controller on a
//! page. All structs use `#[serde(default)]` so partial TOML files (e.g.
//! only overriding `[scroll_retry]`) work correctly.

mod layout;

use std::path::Path;

pub use layout::{Fit, Layout};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::error::LottieError;

/// Bounded polling schedule for an optional capability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Retry", inline)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total number of checks, the immediate one included.
    #[schemars(title = "Max Attempts", range(min = 1, max = 200))]
    pub max_attempts: u32,
    /// Delay between checks in milliseconds.
    #[schemars(title = "Interval (ms)", range(min = 10, max = 5000))]
    pub interval_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            interval_ms: 100,
        }
    }
}

impl RetryPolicy {
    /// Delay between checks.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Attempt cap; at least the immediate check always happens.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Options shared by every controller on a page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct ControllerOptions {
    /// Create handles without a source and fetch it on first intersection.
    pub lazy_load: bool,
    /// Polling schedule for the scroll-linked animation library.
    pub scroll_retry: RetryPolicy,
    /// Layout forwarded to the playback engine; engine default when unset.
    pub layout: Option<Layout>,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            lazy_load: true,
            scroll_retry: RetryPolicy::default(),
            layout: None,
        }
    }
}

impl ControllerOptions {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(ControllerOptions)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, LottieError> {
        toml::from_str(content)
            .map_err(|e| LottieError::OptionsParse(e.to_string()))
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String, LottieError> {
        toml::to_string_pretty(self)
            .map_err(|e| LottieError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, LottieError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), LottieError> {
        let content = self.to_toml_string()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(LottieError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = ControllerOptions {
            layout: Some(Layout::default()),
            ..ControllerOptions::default()
        };
        let toml_str = opts.to_toml_string().unwrap();
        let parsed = ControllerOptions::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[scroll_retry]
max_attempts = 5
";
        let opts = ControllerOptions::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.scroll_retry.max_attempts, 5);
        assert_eq!(opts.scroll_retry.interval_ms, 100);
        assert!(opts.lazy_load);
        assert_eq!(opts.layout, None);
    }

    #[test]
    fn layout_fit_uses_engine_spelling() {
        let opts = ControllerOptions::from_toml_str(
            "[layout]\nfit = \"fit-width\"\nalign = [0.0, 1.0]\n",
        )
        .unwrap();
        let layout = opts.layout.unwrap();
        assert_eq!(layout.fit, Fit::FitWidth);
        assert_eq!(layout.fit.as_str(), "fit-width");
        assert_eq!(layout.align, [0.0, 1.0]);
    }

    #[test]
    fn retry_never_skips_the_first_check() {
        let policy = RetryPolicy {
            max_attempts: 0,
            interval_ms: 50,
        };
        assert_eq!(policy.attempts(), 1);
        assert_eq!(policy.interval(), Duration::from_millis(50));
    }

    #[test]
    fn bad_toml_is_an_options_error() {
        assert!(matches!(
            ControllerOptions::from_toml_str("lazy_load = \"sometimes\""),
            Err(LottieError::OptionsParse(_))
        ));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!(
            "lottie-lite-options-{}",
            std::process::id()
        ));
        let path = dir.join("site.toml");
        let opts = ControllerOptions {
            lazy_load: false,
            ..ControllerOptions::default()
        };
        opts.save(&path).unwrap();
        assert_eq!(ControllerOptions::load(&path).unwrap(), opts);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
