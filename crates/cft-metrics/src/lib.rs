//! Metrics core for the Customer Feedback Tracker multi-agent generator
//!
//! This crate is the single source of truth for usage counters during one
//! multi-agent run: API calls, token consumption, tool calls, iterations
//! and errors, accumulated per agent and summarized on demand. The
//! surrounding orchestration (agents, MCP wiring, UI) reports events into
//! one shared [`MetricsTracker`] and reads summaries out of it.
//!
//! ```no_run
//! use cft_metrics::MetricsTracker;
//!
//! let tracker = MetricsTracker::new(["planner", "developer"])?;
//! tracker.record_api_call("planner", 100, 50)?;
//! tracker.record_tool_call("developer")?;
//! tracker.print_summary(true);
//! tracker.save_to_file(None)?;
//! # Ok::<(), cft_metrics::MetricsError>(())
//! ```

pub mod error;
pub mod tracker;

// Re-export commonly used types
pub use error::{MetricsError, MetricsResult};
pub use tracker::{
    AgentMetrics, MetricsSummary, MetricsTracker, get_global_tracker, set_global_tracker,
};
