//! Error types for engine construction, history validation and
//! configuration loading.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Failures raised by the engine itself.
///
/// Everything except [`EngineError::UnknownLabel`] and
/// [`EngineError::ForeignHistory`] is a configuration error: it can only be
/// produced while building a [`crate::CategorySet`] or an
/// [`crate::Engine`], never by a scoring call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("category set must not be empty")]
    EmptyCategories,

    #[error("category label at position {position} is blank")]
    BlankCategory { position: usize },

    #[error("duplicate category label: {label}")]
    DuplicateCategory { label: String },

    #[error("beta must be a finite value > 0, got {value}")]
    InvalidBeta { value: f64 },

    #[error("epsilon must be a finite value > 0, got {value}")]
    InvalidEpsilon { value: f64 },

    #[error("precision must be between 1 and {max} decimal places, got {value}")]
    InvalidPrecision { value: u32, max: u32 },

    #[error("unknown label {label:?} at position {position}")]
    UnknownLabel { label: String, position: usize },

    #[error("history was built for categories {found:?}, engine has {expected:?}")]
    ForeignHistory {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

impl EngineError {
    /// `true` for errors raised while configuring an engine.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::UnknownLabel { .. } | Self::ForeignHistory { .. })
    }
}

/// Failures while loading an [`crate::EngineConfig`] from disk or text.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config-file")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config-file")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Engine(#[from] EngineError),
}

#[cfg(test)]
mod tests {
    use super::EngineError;

    #[test]
    fn unknown_label_is_not_a_configuration_error() {
        let error = EngineError::UnknownLabel {
            label: "X".into(),
            position: 3,
        };
        assert!(!error.is_configuration());
        assert_eq!(error.to_string(), "unknown label \"X\" at position 3");
    }

    #[test]
    fn construction_errors_are_configuration_errors() {
        assert!(EngineError::EmptyCategories.is_configuration());
        assert!(EngineError::InvalidBeta { value: 0.0 }.is_configuration());
        assert!(EngineError::InvalidEpsilon { value: -1.0 }.is_configuration());
    }

    #[test]
    fn foreign_history_is_not_a_configuration_error() {
        let error = EngineError::ForeignHistory {
            expected: vec!["T".into(), "D".into()],
            found: vec!["A".into()],
        };
        assert!(!error.is_configuration());
    }

    #[test]
    fn precision_message_names_both_bounds() {
        let error = EngineError::InvalidPrecision { value: 0, max: 15 };
        assert_eq!(
            error.to_string(),
            "precision must be between 1 and 15 decimal places, got 0"
        );
    }
}
