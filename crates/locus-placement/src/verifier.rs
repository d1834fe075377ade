//! Placement verification.
//!
//! Compares the host the orchestrator actually picked against the host the
//! score table says should have won. Ties on the top score go to the
//! lexicographically smallest hostname so the winner never depends on map
//! iteration order.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{PlacementError, PlacementResult};
use crate::scorer::ScoreTable;

/// Outcome of one verification, with enough context to explain a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub scores: ScoreTable,
    pub winning_hostname: String,
    pub actual_hostname: String,
    pub passed: bool,
}

impl Verdict {
    pub fn winning_score(&self) -> u64 {
        self.scores.get(&self.winning_hostname).unwrap_or(0)
    }

    /// `None` when the actual host is not in the score table at all.
    pub fn actual_score(&self) -> Option<u64> {
        self.scores.get(&self.actual_hostname)
    }

    /// Other hosts scoring at least as high as the actual host, best first.
    ///
    /// On a failed verdict these are the hosts that beat, or tied and won
    /// the tie-break against, the actual placement.
    pub fn contenders(&self) -> Vec<(&str, u64)> {
        let floor = self.actual_score().unwrap_or(0);
        self.scores
            .ranked()
            .into_iter()
            .filter(|(host, score)| *host != self.actual_hostname && *score >= floor)
            .collect()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed {
            return write!(
                f,
                "placement on {} verified (score {})",
                self.actual_hostname,
                self.winning_score()
            );
        }
        match self.actual_score() {
            Some(actual) => write!(
                f,
                "placement on {} (score {}) is not optimal: {} scores {}",
                self.actual_hostname,
                actual,
                self.winning_hostname,
                self.winning_score()
            ),
            None => write!(
                f,
                "placement on {} has no score: {} scores {}",
                self.actual_hostname,
                self.winning_hostname,
                self.winning_score()
            ),
        }
    }
}

/// Verify that `actual_hostname` is the best-scoring host in `scores`.
///
/// Fails only when the table is empty; a suboptimal placement yields a
/// verdict with `passed == false`.
pub fn verify(scores: ScoreTable, actual_hostname: &str) -> PlacementResult<Verdict> {
    let (winner, winning_score) = scores
        .leader()
        .map(|(host, score)| (host.to_string(), score))
        .ok_or(PlacementError::EmptyCandidateSet)?;

    let passed = winner == actual_hostname;
    if passed {
        info!(host = actual_hostname, score = winning_score, "placement verified");
    } else {
        warn!(
            actual = actual_hostname,
            actual_score = ?scores.get(actual_hostname),
            winner = %winner,
            winning_score,
            "placement is not on the highest-scoring host"
        );
    }

    Ok(Verdict {
        scores,
        winning_hostname: winner,
        actual_hostname: actual_hostname.to_string(),
        passed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, u64)]) -> ScoreTable {
        entries.iter().map(|(h, s)| (h.to_string(), *s)).collect()
    }

    #[test]
    fn passes_on_winner() {
        let verdict = verify(table(&[("A", 100), ("B", 50), ("C", 0)]), "A").unwrap();

        assert!(verdict.passed);
        assert_eq!(verdict.winning_hostname, "A");
        assert_eq!(verdict.winning_score(), 100);
        assert!(verdict.contenders().is_empty());
    }

    #[test]
    fn fails_on_rack_neighbour() {
        let verdict = verify(table(&[("A", 100), ("B", 50), ("C", 0)]), "B").unwrap();

        assert!(!verdict.passed);
        assert_eq!(verdict.winning_hostname, "A");
        assert_eq!(verdict.actual_hostname, "B");
        assert_eq!(verdict.actual_score(), Some(50));
        assert_eq!(verdict.contenders(), vec![("A", 100)]);
        assert_eq!(
            verdict.to_string(),
            "placement on B (score 50) is not optimal: A scores 100"
        );
    }

    #[test]
    fn tie_goes_to_smallest_hostname() {
        let scores = table(&[("node-2", 100), ("node-1", 100), ("node-3", 20)]);

        let verdict = verify(scores.clone(), "node-1").unwrap();
        assert!(verdict.passed);

        let verdict = verify(scores, "node-2").unwrap();
        assert!(!verdict.passed);
        assert_eq!(verdict.winning_hostname, "node-1");
        // Lost the tie-break, not the score.
        assert_eq!(verdict.contenders(), vec![("node-1", 100)]);
    }

    #[test]
    fn unknown_actual_host_fails() {
        let verdict = verify(table(&[("A", 10)]), "Z").unwrap();

        assert!(!verdict.passed);
        assert_eq!(verdict.actual_score(), None);
        assert_eq!(verdict.to_string(), "placement on Z has no score: A scores 10");
    }

    #[test]
    fn empty_table_is_an_error() {
        let err = verify(ScoreTable::default(), "A").unwrap_err();
        assert_eq!(err, PlacementError::EmptyCandidateSet);
    }

    #[test]
    fn verdict_carries_full_table() {
        let scores = table(&[("A", 0), ("B", 0)]);
        let verdict = verify(scores.clone(), "B").unwrap();

        assert_eq!(verdict.scores, scores);
        assert_eq!(verdict.winning_hostname, "A");
    }

    #[test]
    fn passed_verdict_display() {
        let verdict = verify(table(&[("A", 35)]), "A").unwrap();
        assert_eq!(verdict.to_string(), "placement on A verified (score 35)");
    }
}
