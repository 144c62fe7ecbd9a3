//! Shannon entropy of a distribution, in bits.
//!
//! `H = -sum p * log2(p)` over the strictly positive entries. Entries that
//! are zero or negative contribute nothing.

/// Entropy of `probabilities` in bits.
#[must_use]
pub fn shannon_entropy<'a, I>(probabilities: I) -> f64
where
    I: IntoIterator<Item = &'a f64>,
{
    let mut entropy = 0.0;
    for &p in probabilities {
        if p > 0.0 {
            entropy -= p * p.log2();
        }
    }
    entropy
}

/// Upper bound `log2(n)`, reached by the uniform distribution over `n`.
#[must_use]
pub fn max_entropy(n: usize) -> f64 {
    if n == 0 { 0.0 } else { (n as f64).log2() }
}
