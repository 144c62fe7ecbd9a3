//! Most-likely category selection.

/// Index of the largest value; ties resolve to the earliest index.
///
/// Returns `None` for an empty slice. NaN entries never win.
#[must_use]
pub fn most_likely(probabilities: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &p) in probabilities.iter().enumerate() {
        match best {
            Some((_, top)) if p <= top || p.is_nan() => {}
            None if p.is_nan() => {}
            _ => best = Some((index, p)),
        }
    }
    best.map(|(index, _)| index)
}
