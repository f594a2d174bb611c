//! Metrics tracker implementation

use super::report::format_summary;
use super::types::{AgentMetrics, MetricsSummary};
use crate::error::{MetricsError, MetricsResult};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Agent roster used when no explicit set is supplied
pub const DEFAULT_AGENTS: &[&str] = &["planner", "developer", "tester"];

/// Directory used for snapshot files when no path is given
const DEFAULT_SNAPSHOT_DIR: &str = "metrics";

/// All mutable tracker state, guarded by one lock
#[derive(Debug)]
struct TrackerState {
    /// Agent ids in registration order
    order: Vec<String>,
    /// Per-agent counters
    agents: HashMap<String, AgentMetrics>,
    /// Identifier of the current run, regenerated on reset
    session_id: String,
    /// Wall-clock creation (or last reset) time
    started_at: DateTime<Utc>,
    /// Monotonic clock for elapsed-time measurement
    clock: Instant,
    /// Set by `finish`; freezes the elapsed measurement
    finished_at: Option<DateTime<Utc>>,
    frozen_elapsed: Option<Duration>,
}

impl TrackerState {
    fn agent_mut(&mut self, agent_id: &str) -> MetricsResult<&mut AgentMetrics> {
        self.agents.get_mut(agent_id).ok_or_else(|| {
            warn!(agent = agent_id, "report against unregistered agent rejected");
            MetricsError::unknown_agent(agent_id)
        })
    }

    fn elapsed_seconds(&self) -> f64 {
        self.frozen_elapsed
            .unwrap_or_else(|| self.clock.elapsed())
            .as_secs_f64()
    }
}

/// Usage tracker for one multi-agent run
///
/// Counters are accumulated per registered agent; the registered set is
/// fixed at construction and reports against any other id are rejected
/// with [`MetricsError::UnknownAgent`]. All operations take `&self` and
/// serialize through an internal lock, so a tracker wrapped in an `Arc`
/// can be reported into from concurrent tasks without lost updates.
#[derive(Debug)]
pub struct MetricsTracker {
    state: RwLock<TrackerState>,
}

impl MetricsTracker {
    /// Create a tracker for the given agent ids
    ///
    /// Duplicate ids are collapsed, keeping the first occurrence.
    /// Fails with a configuration error when the set is empty and with an
    /// invalid-input error when an id is blank.
    pub fn new<I, S>(agent_ids: I) -> MetricsResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut order = Vec::new();
        for id in agent_ids {
            let id: String = id.into();
            if id.trim().is_empty() {
                return Err(MetricsError::invalid_input("agent id must not be blank"));
            }
            if !order.contains(&id) {
                order.push(id);
            }
        }
        if order.is_empty() {
            return Err(MetricsError::configuration(
                "metrics tracker requires at least one agent id",
            ));
        }
        Ok(Self::from_ids(order))
    }

    /// Create a tracker over [`DEFAULT_AGENTS`]
    pub fn with_default_agents() -> Self {
        Self::from_ids(DEFAULT_AGENTS.iter().map(|id| id.to_string()).collect())
    }

    fn from_ids(order: Vec<String>) -> Self {
        let agents = order
            .iter()
            .map(|id| (id.clone(), AgentMetrics::default()))
            .collect();
        let started_at = Utc::now();
        let session_id = session_id_at(started_at);
        info!(session = %session_id, agents = order.len(), "metrics tracking started");

        Self {
            state: RwLock::new(TrackerState {
                order,
                agents,
                session_id,
                started_at,
                clock: Instant::now(),
                finished_at: None,
                frozen_elapsed: None,
            }),
        }
    }

    /// Record an LLM API call and its token usage for an agent
    pub fn record_api_call(
        &self,
        agent_id: &str,
        input_tokens: u64,
        output_tokens: u64,
    ) -> MetricsResult<()> {
        let mut state = self.state.write();
        let metrics = state.agent_mut(agent_id)?;
        metrics.add_api_call(input_tokens, output_tokens);
        debug!(
            agent = agent_id,
            call = metrics.api_calls,
            input_tokens,
            output_tokens,
            agent_total = metrics.total_tokens,
            "api call recorded"
        );
        Ok(())
    }

    /// Record a tool invocation for an agent
    pub fn record_tool_call(&self, agent_id: &str) -> MetricsResult<()> {
        let mut state = self.state.write();
        let metrics = state.agent_mut(agent_id)?;
        metrics.add_tool_call();
        debug!(agent = agent_id, tool_calls = metrics.tool_calls, "tool call recorded");
        Ok(())
    }

    /// Record one agent-loop iteration for an agent
    pub fn record_iteration(&self, agent_id: &str) -> MetricsResult<()> {
        let mut state = self.state.write();
        let metrics = state.agent_mut(agent_id)?;
        metrics.add_iteration();
        debug!(agent = agent_id, iterations = metrics.iterations, "iteration recorded");
        Ok(())
    }

    /// Record an error attributed to an agent
    ///
    /// This only bumps the counter; emitting the corresponding ERROR-level
    /// log line is the caller's job.
    pub fn record_error(&self, agent_id: &str) -> MetricsResult<()> {
        let mut state = self.state.write();
        let metrics = state.agent_mut(agent_id)?;
        metrics.add_error();
        debug!(agent = agent_id, errors = metrics.errors, "error recorded");
        Ok(())
    }

    /// Take a consistent snapshot of all counters
    ///
    /// The returned summary is an owned copy; the derived `total` entry is
    /// recomputed here and never stored.
    pub fn get_summary(&self) -> MetricsSummary {
        let state = self.state.read();
        let mut total = AgentMetrics::default();
        for metrics in state.agents.values() {
            total.merge(metrics);
        }
        MetricsSummary {
            session_id: state.session_id.clone(),
            timestamp: Utc::now(),
            elapsed_seconds: state.elapsed_seconds(),
            agents: state.agents.clone(),
            total,
            agent_order: state.order.clone(),
        }
    }

    /// Print a human-readable summary to stdout
    ///
    /// `detailed` adds the per-agent breakdown; otherwise only run totals
    /// are shown.
    pub fn print_summary(&self, detailed: bool) {
        let summary = self.get_summary();
        println!("{}", format_summary(&summary, detailed));
    }

    /// Write a JSON snapshot of the current summary
    ///
    /// With no explicit path the snapshot lands at
    /// `metrics/metrics_<session_id>.json`; the containing directory is
    /// created if needed. The snapshot is taken before any file IO, so a
    /// failed or slow write never reflects later mutations, and a write
    /// failure leaves the in-memory counters untouched. Returns the path
    /// written.
    pub fn save_to_file(&self, path: Option<&Path>) -> MetricsResult<PathBuf> {
        let summary = self.get_summary();
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_SNAPSHOT_DIR)
                .join(format!("metrics_{}.json", summary.session_id)),
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(&path, json)?;
        info!(path = %path.display(), session = %summary.session_id, "metrics snapshot written");
        Ok(path)
    }

    /// Mark the run as finished, freezing the elapsed-time measurement
    ///
    /// Idempotent: only the first call sets the end timestamp.
    pub fn finish(&self) {
        let mut state = self.state.write();
        if state.finished_at.is_some() {
            return;
        }
        state.finished_at = Some(Utc::now());
        state.frozen_elapsed = Some(state.clock.elapsed());
        info!(
            session = %state.session_id,
            elapsed_seconds = state.elapsed_seconds(),
            "metrics tracking finished"
        );
    }

    /// Zero all counters and restart the clock
    ///
    /// The registered agent set is kept; the session id is regenerated so
    /// post-reset snapshots never overwrite pre-reset ones on the default
    /// path.
    pub fn reset(&self) {
        let mut state = self.state.write();
        for metrics in state.agents.values_mut() {
            *metrics = AgentMetrics::default();
        }
        state.started_at = Utc::now();
        state.session_id = session_id_at(state.started_at);
        state.clock = Instant::now();
        state.finished_at = None;
        state.frozen_elapsed = None;
        info!(session = %state.session_id, "metrics tracker reset");
    }

    /// Registered agent ids in registration order
    pub fn agent_ids(&self) -> Vec<String> {
        self.state.read().order.clone()
    }

    /// Identifier of the current run
    pub fn session_id(&self) -> String {
        self.state.read().session_id.clone()
    }

    /// Wall-clock creation (or last reset) time
    pub fn started_at(&self) -> DateTime<Utc> {
        self.state.read().started_at
    }

    /// End timestamp, if `finish` has been called
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().finished_at
    }

    /// Seconds since creation or last reset, frozen once finished
    pub fn elapsed_seconds(&self) -> f64 {
        self.state.read().elapsed_seconds()
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::with_default_agents()
    }
}

fn session_id_at(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}
