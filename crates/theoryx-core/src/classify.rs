//! Qualitative intensity label for a single probability.

use std::fmt;

/// Lower bound (inclusive) of the high band.
pub const HIGH_THRESHOLD: f64 = 0.60;

/// Lower bound (inclusive) of the medium band.
pub const MEDIUM_THRESHOLD: f64 = 0.35;

/// Intensity band of a probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Classification {
    #[cfg_attr(feature = "serde", serde(rename = "high probability"))]
    High,
    #[cfg_attr(feature = "serde", serde(rename = "medium probability"))]
    Medium,
    #[cfg_attr(feature = "serde", serde(rename = "low probability"))]
    Low,
}

impl Classification {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "high probability",
            Self::Medium => "medium probability",
            Self::Low => "low probability",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `p >= 0.60` is high, `0.35 <= p < 0.60` is medium, anything else low.
#[must_use]
pub fn classify(p: f64) -> Classification {
    if p >= HIGH_THRESHOLD {
        Classification::High
    } else if p >= MEDIUM_THRESHOLD {
        Classification::Medium
    } else {
        Classification::Low
    }
}
