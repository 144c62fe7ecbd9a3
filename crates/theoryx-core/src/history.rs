//! History normalization: raw tokens in, validated [`History`] out.
//!
//! This is the boundary between untrusted input and the engine. Two
//! policies are offered:
//!
//! - [`normalize`] / [`parse`] drop any token that is not a member of the
//!   category set (case-insensitive), keeping order and duplicates.
//! - [`from_labels`] rejects the first unknown label with
//!   [`EngineError::UnknownLabel`].
//!
//! A [`History`] can only be built through these functions, so the engine
//! never sees an out-of-vocabulary label. It also remembers the labels it
//! was built against: scoring it under a different category set is
//! rejected with [`EngineError::ForeignHistory`].

use std::sync::Arc;

use tracing::trace;

use crate::category::CategorySet;
use crate::error::{EngineError, Result};

/// Ordered sequence of observed outcomes, stored as category indices
/// together with the labels those indices refer to.
#[derive(Debug, Clone, Default)]
pub struct History {
    vocabulary: Option<Arc<[String]>>,
    indices: Vec<usize>,
}

impl History {
    /// An empty history (no observations). Valid under any category set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    fn for_set(categories: &CategorySet) -> Self {
        Self {
            vocabulary: Some(categories.vocabulary()),
            indices: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Category indices in observation order.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Canonical labels in observation order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        let Some(vocabulary) = &self.vocabulary else {
            return Vec::new();
        };
        self.indices
            .iter()
            .filter_map(|&i| vocabulary.get(i).map(String::as_str))
            .collect()
    }

    /// `true` when this history can be scored under `categories`: it is
    /// empty, or it was built from a set with the same labels in the same
    /// order.
    #[must_use]
    pub fn is_compatible_with(&self, categories: &CategorySet) -> bool {
        if self.indices.is_empty() {
            return true;
        }
        self.vocabulary
            .as_ref()
            .is_some_and(|vocabulary| categories.has_vocabulary(vocabulary))
    }

    /// Fail with [`EngineError::ForeignHistory`] unless
    /// [`Self::is_compatible_with`] holds.
    pub fn check_compatible(&self, categories: &CategorySet) -> Result<()> {
        if self.is_compatible_with(categories) {
            return Ok(());
        }
        Err(EngineError::ForeignHistory {
            expected: categories.labels().to_vec(),
            found: self
                .vocabulary
                .as_deref()
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
        })
    }

    /// Append one observation of the category at `index`.
    pub(crate) fn push_index(&mut self, index: usize) {
        self.indices.push(index);
    }
}

/// Two histories are equal when they list the same labels in the same
/// order.
impl PartialEq for History {
    fn eq(&self, other: &Self) -> bool {
        self.labels() == other.labels()
    }
}

impl Eq for History {}

/// Keep only tokens that name a category, in their original order.
pub fn normalize<I, S>(categories: &CategorySet, tokens: I) -> History
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut history = History::for_set(categories);
    let mut dropped = 0_usize;
    for token in tokens {
        match categories.index_of(token.as_ref()) {
            Some(index) => history.push_index(index),
            None => dropped += 1,
        }
    }
    trace!(kept = history.len(), dropped, "history.normalize");
    history
}

/// Parse free text such as `"T D E, T T D"`.
///
/// Commas are treated as whitespace; the resulting tokens go through
/// [`normalize`].
pub fn parse(categories: &CategorySet, text: &str) -> History {
    normalize(categories, text.split(|c: char| c == ',' || c.is_whitespace()).filter(|t| !t.is_empty()))
}

/// Strict conversion: every label must name a category.
pub fn from_labels<I, S>(categories: &CategorySet, labels: I) -> Result<History>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut history = History::for_set(categories);
    for (position, label) in labels.into_iter().enumerate() {
        let label = label.as_ref();
        let index = categories
            .index_of(label)
            .ok_or_else(|| EngineError::UnknownLabel {
                label: label.to_string(),
                position,
            })?;
        history.push_index(index);
    }
    Ok(history)
}
