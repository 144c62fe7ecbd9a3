#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use theoryx_core::{Engine, MAX_PRECISION};

#[derive(Debug, Arbitrary)]
struct Input {
    categories: Vec<String>,
    beta: f64,
    epsilon: f64,
    history: Vec<u8>,
}

fuzz_target!(|input: Input| {
    // Bad parameters must be rejected, never panic.
    let Ok(engine) = Engine::with_categories(input.categories, input.beta, input.epsilon) else {
        return;
    };

    let n = engine.categories().len();
    let labels: Vec<&str> = input
        .history
        .iter()
        .filter_map(|&b| engine.categories().label(b as usize % n))
        .collect();
    let Ok(history) = engine.history_from_labels(&labels) else {
        panic!("labels taken from the category set must be accepted");
    };

    let Ok(d) = engine.distribution_with_precision(&history, MAX_PRECISION) else {
        panic!("a history built by this engine must score");
    };
    for (_, p) in d.iter() {
        assert!(p.is_finite() && *p > 0.0, "p={p}");
    }
    let Ok(report) = engine.report(&history) else {
        panic!("a history built by this engine must score");
    };
    assert!(engine.categories().contains(report.most_likely()));
});
