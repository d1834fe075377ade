//! Plain-text rendering of score reports and check outcomes.

use crate::check::CheckOutcome;
use crate::scorer::ScoreReport;

/// Render a score report as a ranked table, best host first.
pub fn format_scores(report: &ScoreReport) -> String {
    let mut out = String::new();
    let ranked = report.scores.ranked();
    let width = ranked
        .iter()
        .map(|(host, _)| host.len())
        .max()
        .unwrap_or(0)
        .max("HOST".len());

    out.push_str(&format!("{:<width$}  SCORE\n", "HOST"));
    for (host, score) in ranked {
        out.push_str(&format!("{host:<width$}  {score}\n"));
    }

    if report.is_partial() {
        out.push('\n');
        out.push_str("unresolved data owners (scores are partial):\n");
        for owner in &report.unresolved {
            out.push_str(&format!("  {} on volume {}\n", owner.storage_id, owner.volume));
        }
    }
    out
}

/// Render a check outcome, including the score table for verified checks.
pub fn format_outcome(outcome: &CheckOutcome) -> String {
    match outcome {
        CheckOutcome::Skipped { reason } => format!("SKIPPED  {reason}\n"),
        CheckOutcome::Verified(verdict) => {
            let mut out = String::new();
            let status = if verdict.passed { "PASS" } else { "FAIL" };
            out.push_str(&format!("{status}  {verdict}\n"));

            let contenders = verdict.contenders();
            if !verdict.passed && !contenders.is_empty() {
                out.push_str(&format!("hosts ranked at or above {}:\n", verdict.actual_hostname));
                for (host, score) in contenders {
                    out.push_str(&format!("  {host}  {score}\n"));
                }
            }

            out.push('\n');
            out.push_str(&format_scores(&ScoreReport {
                scores: verdict.scores.clone(),
                unresolved: Vec::new(),
            }));
            out
        }
    }
}
