// Metrics hooks for the matcher crate.
//
// Callers install a global `MatchMetrics` implementation via
// [`set_match_metrics`]; every `CompatibilityMatcher` then reports latency,
// outcome and product count per lookup. Keeps instrumentation decoupled from
// any specific metrics backend.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::types::MatchOutcome;

/// Metrics observer for compatibility lookups.
pub trait MatchMetrics: Send + Sync {
    /// Record one completed lookup.
    ///
    /// `latency` spans the catalog read and filtering; `product_count` is the
    /// number of products returned, real or synthetic.
    fn record_match(&self, brand: &str, outcome: MatchOutcome, latency: Duration, product_count: usize);
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn MatchMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn MatchMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn MatchMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global match metrics recorder.
///
/// Usually called once at service startup.
pub fn set_match_metrics(recorder: Option<Arc<dyn MatchMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
