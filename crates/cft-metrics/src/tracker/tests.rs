//! Tests for usage tracking

#![cfg(test)]

use super::global::{get_global_tracker, set_global_tracker};
use super::report::format_summary;
use super::tracker::{DEFAULT_AGENTS, MetricsTracker};
use super::types::AgentMetrics;
use crate::error::MetricsError;
use std::sync::Arc;

#[test]
fn test_empty_agent_set_rejected() {
    let result = MetricsTracker::new(Vec::<String>::new());
    assert!(matches!(result, Err(MetricsError::Configuration(_))));
}

#[test]
fn test_blank_agent_id_rejected() {
    let result = MetricsTracker::new(["planner", "  "]);
    assert!(matches!(result, Err(MetricsError::InvalidInput(_))));
}

#[test]
fn test_registration_order_and_dedup() {
    let tracker = MetricsTracker::new(["planner", "developer", "planner"]).unwrap();
    assert_eq!(tracker.agent_ids(), vec!["planner", "developer"]);
}

#[test]
fn test_default_agents() {
    let tracker = MetricsTracker::with_default_agents();
    assert_eq!(tracker.agent_ids(), DEFAULT_AGENTS.to_vec());
}

#[test]
fn test_token_partial_sums() {
    let tracker = MetricsTracker::new(["planner"]).unwrap();
    let pairs = [(100, 50), (0, 0), (7, 13), (1, 999)];

    for (input, output) in pairs {
        tracker.record_api_call("planner", input, output).unwrap();
    }

    let summary = tracker.get_summary();
    let planner = &summary.agents["planner"];
    assert_eq!(planner.api_calls, pairs.len() as u64);
    assert_eq!(planner.input_tokens, pairs.iter().map(|(i, _)| i).sum::<u64>());
    assert_eq!(planner.output_tokens, pairs.iter().map(|(_, o)| o).sum::<u64>());
    assert_eq!(
        planner.total_tokens,
        pairs.iter().map(|(i, o)| i + o).sum::<u64>()
    );
}

#[test]
fn test_two_agent_scenario() {
    let tracker = MetricsTracker::new(["planner", "developer"]).unwrap();

    tracker.record_api_call("planner", 100, 50).unwrap();
    tracker.record_api_call("developer", 10, 5).unwrap();
    tracker.record_error("developer").unwrap();

    let summary = tracker.get_summary();
    assert_eq!(summary.agents["planner"].total_tokens, 150);
    assert_eq!(summary.agents["developer"].total_tokens, 15);
    assert_eq!(summary.agents["developer"].errors, 1);
    assert_eq!(summary.total.total_tokens, 165);
    assert_eq!(summary.total.errors, 1);
}

#[test]
fn test_unknown_agent_rejected_without_mutation() {
    let tracker = MetricsTracker::new(["planner", "developer"]).unwrap();
    tracker.record_api_call("planner", 100, 50).unwrap();
    let before = tracker.get_summary();

    let result = tracker.record_api_call("unknown_agent", 1, 1);
    assert!(matches!(result, Err(MetricsError::UnknownAgent(_))));
    assert!(tracker.record_tool_call("unknown_agent").is_err());
    assert!(tracker.record_iteration("unknown_agent").is_err());
    assert!(tracker.record_error("unknown_agent").is_err());

    let after = tracker.get_summary();
    assert_eq!(after.agents, before.agents);
    assert_eq!(after.total, before.total);
    assert!(!after.agents.contains_key("unknown_agent"));
}

#[test]
fn test_total_is_sum_over_agents() {
    let tracker = MetricsTracker::new(["planner", "developer", "tester"]).unwrap();
    tracker.record_api_call("planner", 10, 20).unwrap();
    tracker.record_api_call("tester", 1, 2).unwrap();
    tracker.record_tool_call("developer").unwrap();
    tracker.record_iteration("planner").unwrap();
    tracker.record_iteration("developer").unwrap();
    tracker.record_error("tester").unwrap();

    let summary = tracker.get_summary();
    let mut expected = AgentMetrics::default();
    for metrics in summary.agents.values() {
        expected.merge(metrics);
    }
    assert_eq!(summary.total, expected);
    assert_eq!(summary.total.api_calls, 2);
    assert_eq!(summary.total.tool_calls, 1);
    assert_eq!(summary.total.iterations, 2);
    assert_eq!(summary.total.errors, 1);
    assert_eq!(summary.total.total_tokens, 33);
}

#[test]
fn test_reset_zeroes_counters_and_clock() {
    let tracker = MetricsTracker::new(["planner"]).unwrap();
    tracker.record_api_call("planner", 100, 50).unwrap();
    tracker.record_tool_call("planner").unwrap();

    tracker.reset();

    let summary = tracker.get_summary();
    assert_eq!(summary.agents["planner"], AgentMetrics::default());
    assert_eq!(summary.total, AgentMetrics::default());
    assert!(summary.elapsed_seconds < 1.0);
    // Agent set survives a reset
    assert_eq!(tracker.agent_ids(), vec!["planner"]);
}

#[test]
fn test_summary_is_a_copy() {
    let tracker = MetricsTracker::new(["planner"]).unwrap();
    tracker.record_api_call("planner", 10, 10).unwrap();

    let snapshot = tracker.get_summary();
    tracker.record_api_call("planner", 100, 100).unwrap();

    assert_eq!(snapshot.agents["planner"].api_calls, 1);
    assert_eq!(snapshot.agents["planner"].total_tokens, 20);
    assert_eq!(tracker.get_summary().agents["planner"].api_calls, 2);
}

#[test]
fn test_finish_freezes_elapsed() {
    let tracker = MetricsTracker::new(["planner"]).unwrap();
    assert!(tracker.finished_at().is_none());

    tracker.finish();
    let frozen = tracker.elapsed_seconds();
    assert!(tracker.finished_at().is_some());

    std::thread::sleep(std::time::Duration::from_millis(20));
    assert_eq!(tracker.elapsed_seconds(), frozen);
    assert!((tracker.get_summary().elapsed_seconds - frozen).abs() < f64::EPSILON);
}

#[test]
fn test_save_to_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("snapshot.json");

    let tracker = MetricsTracker::new(["planner", "developer"]).unwrap();
    tracker.record_api_call("planner", 100, 50).unwrap();
    tracker.record_tool_call("developer").unwrap();

    let written = tracker.save_to_file(Some(&path)).unwrap();
    assert_eq!(written, path);

    let in_memory = tracker.get_summary();
    let content = std::fs::read_to_string(&written).unwrap();
    let loaded: super::types::MetricsSummary = serde_json::from_str(&content).unwrap();

    assert_eq!(loaded.session_id, in_memory.session_id);
    assert_eq!(loaded.agents, in_memory.agents);
    assert_eq!(loaded.total, in_memory.total);

    // The raw document carries the documented top-level shape
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert!(value.get("timestamp").is_some());
    assert!(value.get("elapsed_seconds").is_some());
    assert_eq!(value["agents"]["planner"]["total_tokens"], 150);
    assert_eq!(value["total"]["tool_calls"], 1);
}

#[test]
fn test_save_failure_leaves_counters_intact() {
    let dir = tempfile::tempdir().unwrap();
    // A path whose parent is a regular file cannot be created
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").unwrap();
    let path = blocker.join("snapshot.json");

    let tracker = MetricsTracker::new(["planner"]).unwrap();
    tracker.record_api_call("planner", 5, 5).unwrap();

    let result = tracker.save_to_file(Some(&path));
    assert!(matches!(result, Err(MetricsError::Io(_))));
    assert_eq!(tracker.get_summary().agents["planner"].total_tokens, 10);
}

#[test]
fn test_concurrent_tool_calls_are_not_lost() {
    const THREADS: usize = 8;
    const CALLS_PER_THREAD: usize = 500;

    let tracker = Arc::new(MetricsTracker::new(["agentA", "agentB"]).unwrap());
    let mut handles = Vec::new();
    for worker in 0..THREADS {
        let tracker = Arc::clone(&tracker);
        handles.push(std::thread::spawn(move || {
            for _ in 0..CALLS_PER_THREAD {
                tracker.record_tool_call("agentA").unwrap();
                if worker % 2 == 0 {
                    tracker.record_api_call("agentB", 1, 1).unwrap();
                }
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let summary = tracker.get_summary();
    assert_eq!(summary.agents["agentA"].tool_calls, (THREADS * CALLS_PER_THREAD) as u64);
    assert_eq!(
        summary.agents["agentB"].api_calls,
        (THREADS / 2 * CALLS_PER_THREAD) as u64
    );
    assert_eq!(summary.total.tool_calls, (THREADS * CALLS_PER_THREAD) as u64);
}

#[test]
fn test_global_tracker_replacement() {
    let replacement = Arc::new(MetricsTracker::new(["reviewer"]).unwrap());
    set_global_tracker(Arc::clone(&replacement));

    let shared = get_global_tracker();
    assert_eq!(shared.agent_ids(), vec!["reviewer"]);
    shared.record_iteration("reviewer").unwrap();
    assert_eq!(replacement.get_summary().agents["reviewer"].iterations, 1);
}

#[test]
fn test_format_summary_modes() {
    let tracker = MetricsTracker::new(["planner", "developer"]).unwrap();
    tracker.record_api_call("planner", 100, 50).unwrap();

    let summary = tracker.get_summary();
    let brief = format_summary(&summary, false);
    assert!(brief.contains("Session ID"));
    assert!(brief.contains("Total Tokens: 150"));
    assert!(!brief.contains("Per-Agent Breakdown"));

    let detailed = format_summary(&summary, true);
    assert!(detailed.contains("Per-Agent Breakdown"));
    assert!(detailed.contains("PLANNER"));
    // Idle agents are skipped in the breakdown
    assert!(!detailed.contains("DEVELOPER"));
    assert!(detailed.contains("Average Tokens/Call: 150.0"));
}

#[test]
fn test_avg_tokens_per_call() {
    let mut metrics = AgentMetrics::default();
    assert_eq!(metrics.avg_tokens_per_call(), 0.0);

    metrics.add_api_call(100, 50);
    metrics.add_api_call(30, 20);
    assert!((metrics.avg_tokens_per_call() - 100.0).abs() < f64::EPSILON);
}
