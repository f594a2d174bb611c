//! Process-wide shared tracker
//!
//! Uncoordinated call sites across the orchestration report into one
//! tracker through this accessor. Prefer passing an `Arc<MetricsTracker>`
//! explicitly; the global exists as a convenience wrapper over one
//! process-lifetime instance.

use super::tracker::MetricsTracker;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

static GLOBAL_TRACKER: Lazy<RwLock<Arc<MetricsTracker>>> =
    Lazy::new(|| RwLock::new(Arc::new(MetricsTracker::with_default_agents())));

/// Get the shared process-wide tracker
///
/// Lazily created on first call with the default agent set. The instance
/// lives for the process lifetime: counters accumulate across logical
/// runs unless the caller invokes `reset()` or installs a fresh tracker
/// via [`set_global_tracker`].
pub fn get_global_tracker() -> Arc<MetricsTracker> {
    GLOBAL_TRACKER.read().clone()
}

/// Replace the shared process-wide tracker
///
/// Call sites holding a clone of the previous instance keep reporting
/// into it; only lookups after this call see the new tracker.
pub fn set_global_tracker(tracker: Arc<MetricsTracker>) {
    *GLOBAL_TRACKER.write() = tracker;
}
