//! Absolute counts and empirical frequencies per category.
//!
//! ```text
//! count(s) = |{ i : h_i = s }|
//! freq(s)  = count(s) / |H|      (0 for every s when |H| = 0)
//! ```

use crate::category::{CategoryMap, CategorySet};
use crate::error::Result;
use crate::history::History;

/// Counts and normalized frequencies for one history.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    total: usize,
    counts: Vec<u64>,
    frequencies: Vec<f64>,
}

impl FrequencyTable {
    /// Number of observations the table was built from.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Raw counts in category order.
    #[must_use]
    pub fn count_values(&self) -> &[u64] {
        &self.counts
    }

    /// Frequencies in category order.
    #[must_use]
    pub fn frequency_values(&self) -> &[f64] {
        &self.frequencies
    }

    #[must_use]
    pub fn counts(&self, categories: &CategorySet) -> CategoryMap<u64> {
        categories.map_values(self.counts.clone())
    }

    #[must_use]
    pub fn frequencies(&self, categories: &CategorySet) -> CategoryMap<f64> {
        categories.map_values(self.frequencies.clone())
    }
}

/// Single pass over `history` with one counter per category.
///
/// Fails with [`crate::EngineError::ForeignHistory`] when `history` was
/// built from a different category set.
pub fn analyze(categories: &CategorySet, history: &History) -> Result<FrequencyTable> {
    history.check_compatible(categories)?;

    let mut counts = vec![0_u64; categories.len()];
    for &index in history.indices() {
        counts[index] += 1;
    }

    let total = history.len();
    let frequencies = if total == 0 {
        vec![0.0; counts.len()]
    } else {
        let t = total as f64;
        counts.iter().map(|&c| c as f64 / t).collect()
    };

    Ok(FrequencyTable {
        total,
        counts,
        frequencies,
    })
}
