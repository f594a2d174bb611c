//! Usage tracking for multi-agent runs
//!
//! This module accumulates per-agent counters and produces summaries and
//! persisted snapshots.

mod global;
mod report;
mod tests;
mod tracker;
mod types;

pub use global::{get_global_tracker, set_global_tracker};
pub use report::format_summary;
pub use tracker::{DEFAULT_AGENTS, MetricsTracker};
pub use types::{AgentMetrics, MetricsSummary};
