//! Image-to-history extraction seam.
//!
//! Reading outcomes off a screenshot is not something this crate does.
//! Callers that can do it plug in a [`SequenceExtractor`]; the labels it
//! returns still go through the history normalizer before scoring.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("sequence extraction is not available")]
    Unavailable,

    #[error("image could not be decoded: {reason}")]
    Malformed { reason: String },
}

/// Turns raw image bytes into a sequence of outcome labels.
pub trait SequenceExtractor {
    fn extract(&self, image: &[u8]) -> Result<Vec<String>, ExtractError>;
}

/// Extractor used when no real backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableExtractor;

impl SequenceExtractor for UnavailableExtractor {
    fn extract(&self, image: &[u8]) -> Result<Vec<String>, ExtractError> {
        if image.is_empty() {
            return Err(ExtractError::Malformed {
                reason: "empty input".into(),
            });
        }
        Err(ExtractError::Unavailable)
    }
}
