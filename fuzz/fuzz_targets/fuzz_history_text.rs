#![no_main]

use libfuzzer_sys::fuzz_target;
use theoryx_core::{Engine, EngineConfig};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let Ok(engine) = Engine::new(EngineConfig::default()) else {
        return;
    };

    let history = engine.parse_history(&text);
    let Ok(report) = engine.report(&history) else {
        panic!("a parsed history must score under its own engine");
    };

    assert!(report.total() <= text.len());
    let counted: u64 = report.counts().values().sum();
    assert_eq!(counted as usize, report.total());

    let sum = report.distribution().total();
    assert!((sum - 1.0).abs() <= 3e-6, "sum={sum}");
    for (_, p) in report.distribution().iter() {
        assert!(*p > 0.0 && *p <= 1.0, "p={p}");
    }
    assert!(report.entropy() <= engine.max_entropy() + 1e-4);
});
