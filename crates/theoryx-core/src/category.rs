//! Ordered category vocabulary and the per-category value map.
//!
//! A [`CategorySet`] is fixed at engine construction. Labels are trimmed
//! and upper-cased on the way in, so `"t"`, `" T "` and `"T"` all name the
//! same category. Iteration order is the order the labels were supplied
//! in, and every [`CategoryMap`] produced by the engine follows it.

use std::sync::Arc;

use crate::error::{EngineError, Result};

/// Canonical form of a label: surrounding whitespace removed, upper-cased.
#[must_use]
pub fn canonical_label(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Non-empty ordered set of unique category labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    labels: Arc<[String]>,
}

impl CategorySet {
    /// Build a set from labels in the order given.
    ///
    /// Fails on an empty input, a blank label, or two labels that are
    /// equal after canonicalization.
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut canonical: Vec<String> = Vec::new();
        for (position, raw) in labels.into_iter().enumerate() {
            let label = canonical_label(raw.as_ref());
            if label.is_empty() {
                return Err(EngineError::BlankCategory { position });
            }
            if canonical.contains(&label) {
                return Err(EngineError::DuplicateCategory { label });
            }
            canonical.push(label);
        }
        if canonical.is_empty() {
            return Err(EngineError::EmptyCategories);
        }
        Ok(Self {
            labels: canonical.into(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Position of `label` in the set, matched case-insensitively.
    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        if let Some(index) = self.labels.iter().position(|l| l == label) {
            return Some(index);
        }
        let wanted = canonical_label(label);
        self.labels.iter().position(|l| *l == wanted)
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.index_of(label).is_some()
    }

    /// Uniform prior `P0(s) = 1 / |S|`.
    #[must_use]
    pub fn prior(&self) -> CategoryMap<f64> {
        let p = 1.0 / self.labels.len() as f64;
        self.map_values(vec![p; self.labels.len()])
    }

    /// Shared handle to the labels, carried by every [`crate::History`]
    /// built from this set.
    pub(crate) fn vocabulary(&self) -> Arc<[String]> {
        Arc::clone(&self.labels)
    }

    /// `true` when `vocabulary` lists the same labels in the same order.
    pub(crate) fn has_vocabulary(&self, vocabulary: &Arc<[String]>) -> bool {
        Arc::ptr_eq(&self.labels, vocabulary) || *self.labels == **vocabulary
    }

    /// Pair `values` with the labels, position by position.
    ///
    /// `values` must have one entry per category.
    pub(crate) fn map_values<T>(&self, values: Vec<T>) -> CategoryMap<T> {
        debug_assert_eq!(values.len(), self.labels.len());
        CategoryMap {
            entries: self.labels.iter().cloned().zip(values).collect(),
        }
    }
}

/// Mapping category label → value, in [`CategorySet`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMap<T> {
    entries: Vec<(String, T)>,
}

impl<T> CategoryMap<T> {
    /// Value for `label`, matched case-insensitively.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .or_else(|| {
                let wanted = canonical_label(label);
                self.entries.iter().find(|(l, _)| *l == wanted)
            })
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply `f` to every value, keeping labels and order.
    #[must_use]
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> CategoryMap<U> {
        CategoryMap {
            entries: self.entries.iter().map(|(l, v)| (l.clone(), f(v))).collect(),
        }
    }
}

impl CategoryMap<f64> {
    /// Sum of all values.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.values().sum()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for CategoryMap<T> {
    fn serialize<Ser: serde::Serializer>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}
