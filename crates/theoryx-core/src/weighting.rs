//! Adaptive weighting operator.
//!
//! Turns empirical frequencies into a probability distribution that leans
//! toward what was observed without ever eliminating a category:
//!
//! ```text
//! w(s)     = P0(s) * (freq(s) + epsilon)^beta
//! P(s | H) = w(s) / sum_u w(u)
//! ```
//!
//! `epsilon > 0` keeps every weight strictly positive. `beta = 0` would
//! reproduce the prior; larger `beta` sharpens the distribution toward the
//! observed frequencies.
//!
//! The ratio is evaluated in log space relative to the most frequent
//! category, so large `beta` or tiny `epsilon` cannot underflow the
//! normalizer to zero. Outputs are rounded to a fixed number of decimal
//! places and never go below one unit in the last place (`10^-precision`).
//!
//! An empty history bypasses the formula and returns the rounded prior.

use tracing::trace;

use crate::error::{EngineError, Result};
use crate::frequency::FrequencyTable;

/// Reference sensitivity exponent.
pub const DEFAULT_BETA: f64 = 2.0;

/// Reference smoothing constant.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Largest supported number of decimal places in outputs.
pub const MAX_PRECISION: u32 = 15;

/// Validated `beta` / `epsilon` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightingParams {
    beta: f64,
    epsilon: f64,
}

impl WeightingParams {
    /// Both values must be finite and strictly positive.
    pub fn new(beta: f64, epsilon: f64) -> Result<Self> {
        if !(beta.is_finite() && beta > 0.0) {
            return Err(EngineError::InvalidBeta { value: beta });
        }
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(EngineError::InvalidEpsilon { value: epsilon });
        }
        Ok(Self { beta, epsilon })
    }

    #[must_use]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Unnormalized weight `P0 * (freq + epsilon)^beta` for one category.
    #[must_use]
    pub fn weight(&self, prior: f64, frequency: f64) -> f64 {
        prior * (frequency + self.epsilon).powf(self.beta)
    }
}

impl Default for WeightingParams {
    fn default() -> Self {
        Self {
            beta: DEFAULT_BETA,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// Output precision must be between 1 and [`MAX_PRECISION`] decimal places.
pub fn check_precision(precision: u32) -> Result<u32> {
    if precision == 0 || precision > MAX_PRECISION {
        return Err(EngineError::InvalidPrecision {
            value: precision,
            max: MAX_PRECISION,
        });
    }
    Ok(precision)
}

/// Round half away from zero to `precision` decimal places.
#[must_use]
pub fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10_f64.powi(precision.min(MAX_PRECISION) as i32);
    (value * scale).round() / scale
}

/// Round a strictly positive probability, keeping it at or above
/// `10^-precision`.
#[must_use]
pub fn round_probability(p: f64, precision: u32) -> f64 {
    let precision = precision.clamp(1, MAX_PRECISION);
    let floor = 1.0 / 10_f64.powi(precision as i32);
    round_to(p, precision).max(floor)
}

/// Compute `P(s | H)` for every category, rounded to `precision`.
///
/// `prior` and `table` must both be in category order.
#[must_use]
pub fn weigh(
    prior: &[f64],
    table: &FrequencyTable,
    params: &WeightingParams,
    precision: u32,
) -> Vec<f64> {
    if table.total() == 0 {
        return prior
            .iter()
            .map(|&p| round_probability(p, precision))
            .collect();
    }

    let freqs = table.frequency_values();
    let top = freqs.iter().copied().fold(0.0_f64, f64::max);
    let top_log = (top + params.epsilon).ln();

    // log w(s) - beta * ln(top + epsilon); the most frequent category sits at ln P0.
    let log_weights: Vec<f64> = prior
        .iter()
        .zip(freqs)
        .map(|(&p0, &freq)| p0.ln() + params.beta * ((freq + params.epsilon).ln() - top_log))
        .collect();
    let max_log = log_weights
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    let scaled: Vec<f64> = log_weights.iter().map(|&l| (l - max_log).exp()).collect();
    // The largest scaled weight is exactly 1, so z >= 1.
    let z: f64 = scaled.iter().sum();

    scaled
        .iter()
        .enumerate()
        .map(|(index, &w)| {
            let p = w / z;
            trace!(category = index, frequency = freqs[index], probability = p, "weighting.category");
            round_probability(p, precision)
        })
        .collect()
}
