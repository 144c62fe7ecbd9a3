//! Engine configuration as data.
//!
//! [`EngineConfig`] captures the category vocabulary, the weighting
//! constants and the output precisions. With the `config-file` feature it
//! can be loaded from TOML or JSON:
//!
//! ```toml
//! categories = ["T", "D", "E"]
//! beta = 2.0
//! epsilon = 1e-6
//! precision = 6
//! summary_precision = 4
//! ```
//!
//! ```rust,ignore
//! let config = EngineConfig::from_toml_file("theoryx.toml")?;
//! let engine = Engine::new(config)?;
//! ```
//!
//! Missing keys fall back to [`EngineConfig::default`].

#[cfg(feature = "config-file")]
use std::path::Path;

use crate::category::CategorySet;
#[cfg(feature = "config-file")]
use crate::error::ConfigError;
use crate::error::EngineError;
use crate::weighting::{DEFAULT_BETA, DEFAULT_EPSILON, WeightingParams, check_precision};

/// Decimal places for the full report.
pub const DEFAULT_PRECISION: u32 = 6;

/// Decimal places for the service summary.
pub const DEFAULT_SUMMARY_PRECISION: u32 = 4;

/// Tiger, dragon, tie.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["T", "D", "E"];

/// Everything needed to build an [`crate::Engine`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Ordered category labels.
    pub categories: Vec<String>,
    /// Sensitivity exponent, > 0.
    pub beta: f64,
    /// Smoothing constant, > 0.
    pub epsilon: f64,
    /// Decimal places for distributions and entropy in reports.
    pub precision: u32,
    /// Decimal places for the service summary.
    pub summary_precision: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|s| (*s).to_string()).collect(),
            beta: DEFAULT_BETA,
            epsilon: DEFAULT_EPSILON,
            precision: DEFAULT_PRECISION,
            summary_precision: DEFAULT_SUMMARY_PRECISION,
        }
    }
}

impl EngineConfig {
    /// Default constants over a custom vocabulary.
    #[must_use]
    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.check()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.check()?;
        Ok(config)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load from a file, picking the format by extension (`.json` is JSON,
    /// anything else TOML).
    #[cfg(feature = "config-file")]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_file(path)
        } else {
            Self::from_toml_file(path)
        }
    }

    /// First problem found, as a typed error.
    pub fn check(&self) -> Result<(), EngineError> {
        CategorySet::new(&self.categories)?;
        WeightingParams::new(self.beta, self.epsilon)?;
        check_precision(self.precision)?;
        check_precision(self.summary_precision)?;
        Ok(())
    }

    /// Every problem found, as messages. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Err(e) = CategorySet::new(&self.categories) {
            errors.push(format!("categories: {e}"));
        }
        if let Err(e) = WeightingParams::new(self.beta, 1.0) {
            errors.push(format!("beta: {e}"));
        }
        if let Err(e) = WeightingParams::new(1.0, self.epsilon) {
            errors.push(format!("epsilon: {e}"));
        }
        if let Err(e) = check_precision(self.precision) {
            errors.push(format!("precision: {e}"));
        }
        if let Err(e) = check_precision(self.summary_precision) {
            errors.push(format!("summary_precision: {e}"));
        }

        errors
    }
}
