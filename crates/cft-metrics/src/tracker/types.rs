//! Core types for usage tracking

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Counters for a single agent
///
/// All fields are monotonically non-decreasing between resets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMetrics {
    /// Number of LLM API calls
    pub api_calls: u64,
    /// Input tokens consumed
    pub input_tokens: u64,
    /// Output tokens produced
    pub output_tokens: u64,
    /// Total tokens (input + output)
    pub total_tokens: u64,
    /// Number of tool invocations
    pub tool_calls: u64,
    /// Number of agent loop iterations
    pub iterations: u64,
    /// Number of recorded errors
    pub errors: u64,
}

impl AgentMetrics {
    /// Record an API call with its token usage
    pub fn add_api_call(&mut self, input_tokens: u64, output_tokens: u64) {
        self.api_calls += 1;
        self.input_tokens += input_tokens;
        self.output_tokens += output_tokens;
        self.total_tokens += input_tokens + output_tokens;
    }

    /// Record a tool call
    pub fn add_tool_call(&mut self) {
        self.tool_calls += 1;
    }

    /// Record an iteration
    pub fn add_iteration(&mut self) {
        self.iterations += 1;
    }

    /// Record an error
    pub fn add_error(&mut self) {
        self.errors += 1;
    }

    /// Add another agent's counters field-wise (used to derive totals)
    pub fn merge(&mut self, other: &AgentMetrics) {
        self.api_calls += other.api_calls;
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
        self.total_tokens += other.total_tokens;
        self.tool_calls += other.tool_calls;
        self.iterations += other.iterations;
        self.errors += other.errors;
    }

    /// Average tokens per API call, 0.0 when no calls were made
    pub fn avg_tokens_per_call(&self) -> f64 {
        if self.api_calls == 0 {
            return 0.0;
        }
        self.total_tokens as f64 / self.api_calls as f64
    }

    /// True if nothing has been recorded against this agent
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Point-in-time snapshot of all counters in a tracker
///
/// Owned copy, never a live view: mutating the tracker after taking a
/// summary does not change the summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Identifier of the run this snapshot belongs to
    pub session_id: String,
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
    /// Wall-clock seconds since tracker creation (or last reset)
    pub elapsed_seconds: f64,
    /// Per-agent counters, keyed by agent id
    pub agents: HashMap<String, AgentMetrics>,
    /// Sum of all per-agent counters, recomputed at snapshot time
    pub total: AgentMetrics,
    /// Agent ids in registration order, for deterministic rendering
    #[serde(skip)]
    pub agent_order: Vec<String>,
}

impl MetricsSummary {
    /// Per-agent entries in registration order
    ///
    /// Falls back to the map's order for summaries deserialized from disk,
    /// where registration order is not persisted.
    pub fn agents_in_order(&self) -> Vec<(&str, &AgentMetrics)> {
        if self.agent_order.is_empty() {
            return self
                .agents
                .iter()
                .map(|(id, metrics)| (id.as_str(), metrics))
                .collect();
        }
        self.agent_order
            .iter()
            .filter_map(|id| self.agents.get(id).map(|metrics| (id.as_str(), metrics)))
            .collect()
    }
}
