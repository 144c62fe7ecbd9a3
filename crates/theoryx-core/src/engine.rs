//! The adaptive probability engine.
//!
//! An [`Engine`] owns an immutable [`CategorySet`], its uniform prior and
//! the weighting constants. Every scoring call is a pure function of the
//! history passed in: nothing is remembered between calls, so callers that
//! want continuity keep the history themselves and pass it again.
//!
//! A [`History`] remembers the categories it was built against. Scoring
//! calls reject a non-empty history from a different category set with
//! [`crate::EngineError::ForeignHistory`].
//!
//! ```
//! use theoryx_core::{Engine, EngineConfig};
//!
//! let engine = Engine::new(EngineConfig::default()).unwrap();
//! let history = engine.parse_history("T D E T T D");
//! let report = engine.report(&history).unwrap();
//! assert_eq!(report.most_likely(), "T");
//! ```

use tracing::{debug, info};

use crate::category::{CategoryMap, CategorySet};
use crate::classify::{Classification, classify};
use crate::config::EngineConfig;
use crate::entropy::{max_entropy, shannon_entropy};
use crate::error::Result;
use crate::frequency::{FrequencyTable, analyze};
use crate::history::{self, History};
use crate::report::{Report, Summary, build_report};
use crate::select;
use crate::weighting::{WeightingParams, check_precision, weigh};

/// Stateless scorer over a fixed category vocabulary.
#[derive(Debug, Clone)]
pub struct Engine {
    categories: CategorySet,
    prior: Vec<f64>,
    params: WeightingParams,
    precision: u32,
    summary_precision: u32,
}

impl Engine {
    /// Build an engine, validating every field of `config`.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let categories = CategorySet::new(&config.categories)?;
        let params = WeightingParams::new(config.beta, config.epsilon)?;
        let precision = check_precision(config.precision)?;
        let summary_precision = check_precision(config.summary_precision)?;
        let prior = categories.prior().values().copied().collect();

        info!(
            categories = categories.len(),
            beta = params.beta(),
            epsilon = params.epsilon(),
            precision,
            summary_precision,
            "engine.init"
        );

        Ok(Self {
            categories,
            prior,
            params,
            precision,
            summary_precision,
        })
    }

    /// Build an engine from labels and weighting constants, with default
    /// output precisions.
    pub fn with_categories<I, S>(categories: I, beta: f64, epsilon: f64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(EngineConfig {
            beta,
            epsilon,
            ..EngineConfig::with_categories(categories)
        })
    }

    #[must_use]
    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    #[must_use]
    pub fn params(&self) -> &WeightingParams {
        &self.params
    }

    #[must_use]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    #[must_use]
    pub fn summary_precision(&self) -> u32 {
        self.summary_precision
    }

    /// The uniform prior `P0`.
    #[must_use]
    pub fn prior(&self) -> CategoryMap<f64> {
        self.categories.map_values(self.prior.clone())
    }

    // ── History boundary ────────────────────────────────────────────────

    /// Lenient: unknown tokens are dropped.
    pub fn normalize<I, S>(&self, tokens: I) -> History
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        history::normalize(&self.categories, tokens)
    }

    /// Lenient text form, e.g. `"T, D E"`.
    #[must_use]
    pub fn parse_history(&self, text: &str) -> History {
        history::parse(&self.categories, text)
    }

    /// Strict: the first unknown label is an error.
    pub fn history_from_labels<I, S>(&self, labels: I) -> Result<History>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        history::from_labels(&self.categories, labels)
    }

    // ── Scoring ─────────────────────────────────────────────────────────

    pub fn analyze(&self, history: &History) -> Result<FrequencyTable> {
        analyze(&self.categories, history)
    }

    pub fn counts(&self, history: &History) -> Result<CategoryMap<u64>> {
        Ok(self.analyze(history)?.counts(&self.categories))
    }

    pub fn frequencies(&self, history: &History) -> Result<CategoryMap<f64>> {
        Ok(self.analyze(history)?.frequencies(&self.categories))
    }

    /// `P(s | H)` at the engine's report precision.
    pub fn distribution(&self, history: &History) -> Result<CategoryMap<f64>> {
        self.distribution_with_precision(history, self.precision)
    }

    /// `P(s | H)` rounded to `precision` decimal places (capped at
    /// [`crate::MAX_PRECISION`]).
    pub fn distribution_with_precision(
        &self,
        history: &History,
        precision: u32,
    ) -> Result<CategoryMap<f64>> {
        let table = self.analyze(history)?;
        let values = weigh(&self.prior, &table, &self.params, precision);
        debug!(total = table.total(), precision, "engine.distribution");
        Ok(self.categories.map_values(values))
    }

    /// Full report at the engine's report precision.
    pub fn report(&self, history: &History) -> Result<Report> {
        self.report_with_precision(history, self.precision)
    }

    pub fn report_with_precision(&self, history: &History, precision: u32) -> Result<Report> {
        build_report(&self.categories, &self.prior, &self.params, history, precision)
    }

    /// Service reply at the summary precision, echoing the normalized
    /// history.
    pub fn summary(&self, history: &History) -> Result<Summary> {
        let report = self.report_with_precision(history, self.summary_precision)?;
        let labels = history.labels().into_iter().map(str::to_string).collect();
        Ok(report.into_summary(labels))
    }

    // ── Utilities ───────────────────────────────────────────────────────

    #[must_use]
    pub fn classify(&self, probability: f64) -> Classification {
        classify(probability)
    }

    /// Shannon entropy of `distribution` in bits (unrounded).
    #[must_use]
    pub fn entropy(&self, distribution: &CategoryMap<f64>) -> f64 {
        shannon_entropy(distribution.values())
    }

    /// `log2(|categories|)`.
    #[must_use]
    pub fn max_entropy(&self) -> f64 {
        max_entropy(self.categories.len())
    }

    /// Label with the highest probability; the earliest category wins a tie.
    #[must_use]
    pub fn most_likely<'a>(&self, distribution: &'a CategoryMap<f64>) -> Option<&'a str> {
        let values: Vec<f64> = distribution.values().copied().collect();
        let index = select::most_likely(&values)?;
        distribution.labels().nth(index)
    }
}
