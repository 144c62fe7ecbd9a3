//! Report assembly.
//!
//! [`build_report`] runs the full pipeline for one history:
//!
//! 1. frequency analysis
//! 2. adaptive weighting
//! 3. entropy of the resulting distribution
//! 4. most-likely selection
//! 5. classification of the winner's probability
//!
//! and freezes the results into a [`Report`]. [`Summary`] is the lighter
//! shape returned to service callers.

use tracing::debug;

use crate::category::{CategoryMap, CategorySet};
use crate::classify::{Classification, classify};
use crate::entropy::shannon_entropy;
use crate::error::Result;
use crate::frequency::analyze;
use crate::history::History;
use crate::select::most_likely;
use crate::weighting::{WeightingParams, round_to, weigh};

/// Full analysis of one history. Built once, never mutated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Report {
    total: usize,
    counts: CategoryMap<u64>,
    frequencies: CategoryMap<f64>,
    distribution: CategoryMap<f64>,
    most_likely: String,
    classification: Classification,
    entropy: f64,
}

impl Report {
    /// Number of observations in the history.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn counts(&self) -> &CategoryMap<u64> {
        &self.counts
    }

    #[must_use]
    pub fn frequencies(&self) -> &CategoryMap<f64> {
        &self.frequencies
    }

    #[must_use]
    pub fn distribution(&self) -> &CategoryMap<f64> {
        &self.distribution
    }

    #[must_use]
    pub fn most_likely(&self) -> &str {
        &self.most_likely
    }

    #[must_use]
    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// Entropy of [`Self::distribution`] in bits, at the report's precision.
    #[must_use]
    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    /// Probability assigned to [`Self::most_likely`].
    #[must_use]
    pub fn top_probability(&self) -> f64 {
        self.distribution
            .get(&self.most_likely)
            .copied()
            .unwrap_or_default()
    }

    /// Drop the frequency and entropy details, keep what a service reply
    /// needs.
    #[must_use]
    pub fn into_summary(self, history: Vec<String>) -> Summary {
        Summary {
            history,
            total: self.total,
            counts: self.counts,
            probabilities: self.distribution,
            most_likely: self.most_likely,
            classification: self.classification,
        }
    }
}

/// Service-facing reply: echoed history, counts and the distribution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    pub history: Vec<String>,
    pub total: usize,
    pub counts: CategoryMap<u64>,
    pub probabilities: CategoryMap<f64>,
    pub most_likely: String,
    pub classification: Classification,
}

/// Run the pipeline for `history` and assemble a [`Report`].
///
/// Fails only when `history` belongs to a different category set.
pub fn build_report(
    categories: &CategorySet,
    prior: &[f64],
    params: &WeightingParams,
    history: &History,
    precision: u32,
) -> Result<Report> {
    let table = analyze(categories, history)?;
    let distribution = weigh(prior, &table, params, precision);
    let entropy = round_to(shannon_entropy(&distribution), precision);

    // A CategorySet is never empty, so there is always a winner.
    let best = most_likely(&distribution).unwrap_or(0);
    let top = distribution.get(best).copied().unwrap_or_default();
    let most_likely = categories.label(best).unwrap_or_default().to_string();
    let classification = classify(top);

    debug!(
        total = table.total(),
        most_likely = %most_likely,
        probability = top,
        classification = %classification,
        entropy,
        "report.built"
    );

    Ok(Report {
        total: table.total(),
        counts: table.counts(categories),
        frequencies: table.frequencies(categories),
        distribution: categories.map_values(distribution),
        most_likely,
        classification,
        entropy,
    })
}
