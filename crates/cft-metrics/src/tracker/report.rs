//! Console rendering for metrics summaries

use super::types::{AgentMetrics, MetricsSummary};
use colored::*;
use std::fmt::Write;

const RULE_WIDTH: usize = 70;

/// Render a summary as human-readable text
///
/// `detailed` adds a per-agent breakdown in registration order; agents
/// with no recorded activity are skipped there.
pub fn format_summary(summary: &MetricsSummary, detailed: bool) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    let _ = writeln!(out, "{}", rule.bright_blue());
    let _ = writeln!(out, "{}", "MULTI-AGENT RUN METRICS SUMMARY".bright_white().bold());
    let _ = writeln!(out, "{}", rule.bright_blue());
    let _ = writeln!(out, "Session ID: {}", summary.session_id.bright_cyan());
    let _ = writeln!(out, "Elapsed Time: {:.2} seconds", summary.elapsed_seconds);
    write_metrics_block(&mut out, &summary.total, "");

    if detailed {
        let _ = writeln!(out, "\n{}", "-".repeat(RULE_WIDTH).bright_blue());
        let _ = writeln!(out, "{}", "Per-Agent Breakdown:".bright_white().bold());
        for (agent_id, metrics) in summary.agents_in_order() {
            if metrics.is_idle() {
                continue;
            }
            let _ = writeln!(out, "\n  {} agent:", agent_id.to_uppercase().bright_cyan());
            write_metrics_block(&mut out, metrics, "  ");
        }
    }

    let _ = writeln!(out, "{}", rule.bright_blue());
    out
}

fn write_metrics_block(out: &mut String, metrics: &AgentMetrics, indent: &str) {
    let _ = writeln!(out, "{indent}API Calls: {}", metrics.api_calls);
    let _ = writeln!(out, "{indent}Tool Calls: {}", metrics.tool_calls);
    let _ = writeln!(out, "{indent}Iterations: {}", metrics.iterations);
    let _ = writeln!(out, "{indent}Errors: {}", format_errors(metrics.errors));
    let _ = writeln!(out, "{indent}Total Tokens: {}", thousands(metrics.total_tokens));
    let _ = writeln!(out, "{indent}  - Input: {}", thousands(metrics.input_tokens));
    let _ = writeln!(out, "{indent}  - Output: {}", thousands(metrics.output_tokens));
    if metrics.api_calls > 0 {
        let _ = writeln!(
            out,
            "{indent}Average Tokens/Call: {:.1}",
            metrics.avg_tokens_per_call()
        );
    }
}

fn format_errors(errors: u64) -> ColoredString {
    let text = errors.to_string();
    if errors > 0 { text.bright_red() } else { text.normal() }
}

/// Format an integer with thousands separators
fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod format_tests {
    use super::thousands;

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }
}
