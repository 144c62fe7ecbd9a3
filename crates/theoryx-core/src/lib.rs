#![forbid(unsafe_code)]

//! Theory(X) core
//!
//! Adaptive conservative probability over a fixed set of categorical
//! outcomes. Given the observed history of a repeated process, the engine
//! produces a distribution that starts uniform, leans toward what has been
//! seen, and never drives any category to zero.
//!
//! # Pipeline
//!
//! ```text
//! raw tokens ─▶ history ─▶ frequency ─▶ weighting ─▶ entropy / select / classify ─▶ report
//! ```
//!
//! - [`history`] filters raw input into a [`History`]
//! - [`frequency`] counts occurrences and normalizes them
//! - [`weighting`] applies `P0(s) * (freq(s) + epsilon)^beta` and renormalizes
//! - [`entropy`], [`select`] and [`classify`] derive the analytics
//! - [`report`] assembles everything into a [`Report`]
//!
//! [`Engine`] wires these together over an immutable [`EngineConfig`].

pub mod category;
pub mod classify;
pub mod config;
pub mod engine;
pub mod entropy;
pub mod error;
pub mod extract;
pub mod frequency;
pub mod history;
pub mod report;
pub mod select;
pub mod weighting;

pub use category::{CategoryMap, CategorySet, canonical_label};
pub use classify::{Classification, HIGH_THRESHOLD, MEDIUM_THRESHOLD, classify};
pub use config::{DEFAULT_PRECISION, DEFAULT_SUMMARY_PRECISION, EngineConfig};
pub use engine::Engine;
pub use entropy::{max_entropy, shannon_entropy};
pub use error::{ConfigError, EngineError, Result};
pub use extract::{ExtractError, SequenceExtractor, UnavailableExtractor};
pub use frequency::{FrequencyTable, analyze};
pub use history::History;
pub use report::{Report, Summary, build_report};
pub use select::most_likely;
pub use weighting::{
    DEFAULT_BETA, DEFAULT_EPSILON, MAX_PRECISION, WeightingParams, round_probability, round_to, weigh,
};
