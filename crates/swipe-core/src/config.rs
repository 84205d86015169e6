#![forbid(unsafe_code)]

//! Threshold configuration and its item > list > default resolution.
//!
//! [`ThresholdConfig`] is the resolved, per-render-pass value an item works
//! with. [`ThresholdOverrides`] is what callers write: every field is
//! optional so a list can set defaults that individual items refine.
//!
//! # Loading
//!
//! With the `config` feature the overrides can be loaded from TOML or JSON:
//!
//! ```toml
//! # swipe.toml
//! swipe_start_threshold = 12.0
//! trigger_ratio = 0.4
//! ```
//!
//! ```rust,ignore
//! let list = ThresholdOverrides::from_toml_file("swipe.toml")?;
//! let item = ThresholdOverrides::from_json_str(r#"{"trigger_ratio": 0.25}"#)?;
//! let resolved = item.resolve(&list);
//! ```

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default horizontal distance (px) before a swipe can be recognized.
pub const DEFAULT_SWIPE_START_THRESHOLD: f64 = 10.0;
/// Default vertical distance (px) before a scroll can be recognized.
pub const DEFAULT_SCROLL_START_THRESHOLD: f64 = 10.0;
/// Default fraction of the item width that commits an action.
pub const DEFAULT_TRIGGER_RATIO: f64 = 0.5;

// ---------------------------------------------------------------------------
// Resolved thresholds
// ---------------------------------------------------------------------------

/// Resolved thresholds for one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdConfig {
    /// Minimum horizontal distance before a horizontal classification can win.
    pub swipe_start_threshold: f64,
    /// Minimum vertical distance before a vertical classification can win.
    pub scroll_start_threshold: f64,
    /// Fraction of the item width, in `(0, 1]`, that finalizes an action.
    pub trigger_ratio: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            swipe_start_threshold: DEFAULT_SWIPE_START_THRESHOLD,
            scroll_start_threshold: DEFAULT_SCROLL_START_THRESHOLD,
            trigger_ratio: DEFAULT_TRIGGER_RATIO,
        }
    }
}

impl ThresholdConfig {
    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_distance(
            &mut errors,
            "swipe_start_threshold",
            self.swipe_start_threshold,
        );
        check_distance(
            &mut errors,
            "scroll_start_threshold",
            self.scroll_start_threshold,
        );
        check_ratio(&mut errors, self.trigger_ratio);
        errors
    }

}

fn check_distance(errors: &mut Vec<String>, name: &str, value: f64) {
    if !value.is_finite() || value < 0.0 {
        errors.push(format!("{name} must be a finite value >= 0, got {value}"));
    }
}

fn check_ratio(errors: &mut Vec<String>, value: f64) {
    if !value.is_finite() || value <= 0.0 || value > 1.0 {
        errors.push(format!("trigger_ratio must be in (0, 1], got {value}"));
    }
}

/// First level in `levels` (item, then list) that passes `check`.
fn pick(
    field: &'static str,
    levels: [Option<f64>; 2],
    default: f64,
    check: impl Fn(&mut Vec<String>, &str, f64),
) -> f64 {
    for value in levels.into_iter().flatten() {
        let mut errors = Vec::new();
        check(&mut errors, field, value);
        if errors.is_empty() {
            return value;
        }
        warn!(field, value, "ignoring invalid threshold override");
    }
    default
}

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

/// Optional threshold values set at list or item level.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct ThresholdOverrides {
    #[cfg_attr(feature = "config", serde(skip_serializing_if = "Option::is_none"))]
    pub swipe_start_threshold: Option<f64>,
    #[cfg_attr(feature = "config", serde(skip_serializing_if = "Option::is_none"))]
    pub scroll_start_threshold: Option<f64>,
    #[cfg_attr(feature = "config", serde(skip_serializing_if = "Option::is_none"))]
    pub trigger_ratio: Option<f64>,
}

impl ThresholdOverrides {
    /// No overrides at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            swipe_start_threshold: None,
            scroll_start_threshold: None,
            trigger_ratio: None,
        }
    }

    #[must_use]
    pub const fn swipe_start_threshold(mut self, px: f64) -> Self {
        self.swipe_start_threshold = Some(px);
        self
    }

    #[must_use]
    pub const fn scroll_start_threshold(mut self, px: f64) -> Self {
        self.scroll_start_threshold = Some(px);
        self
    }

    #[must_use]
    pub const fn trigger_ratio(mut self, ratio: f64) -> Self {
        self.trigger_ratio = Some(ratio);
        self
    }

    /// Resolve `self` (item level) over `list`, falling back to defaults.
    ///
    /// An override that fails validation is ignored with a warning and the
    /// next level is used instead.
    #[must_use]
    pub fn resolve(&self, list: &ThresholdOverrides) -> ThresholdConfig {
        let defaults = ThresholdConfig::default();
        ThresholdConfig {
            swipe_start_threshold: pick(
                "swipe_start_threshold",
                [self.swipe_start_threshold, list.swipe_start_threshold],
                defaults.swipe_start_threshold,
                check_distance,
            ),
            scroll_start_threshold: pick(
                "scroll_start_threshold",
                [self.scroll_start_threshold, list.scroll_start_threshold],
                defaults.scroll_start_threshold,
                check_distance,
            ),
            trigger_ratio: pick(
                "trigger_ratio",
                [self.trigger_ratio, list.trigger_ratio],
                defaults.trigger_ratio,
                |errors, _, value| check_ratio(errors, value),
            ),
        }
    }

    /// Validate only the values that are actually set.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(v) = self.swipe_start_threshold {
            check_distance(&mut errors, "swipe_start_threshold", v);
        }
        if let Some(v) = self.scroll_start_threshold {
            check_distance(&mut errors, "scroll_start_threshold", v);
        }
        if let Some(v) = self.trigger_ratio {
            check_ratio(&mut errors, v);
        }
        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let parsed: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        parsed.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let parsed: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        parsed.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    #[cfg(feature = "config")]
    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

impl From<ThresholdConfig> for ThresholdOverrides {
    fn from(config: ThresholdConfig) -> Self {
        Self {
            swipe_start_threshold: Some(config.swipe_start_threshold),
            scroll_start_threshold: Some(config.scroll_start_threshold),
            trigger_ratio: Some(config.trigger_ratio),
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a threshold configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
