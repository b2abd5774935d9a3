//! Aggregator: renders a terminal result set into the caller-facing report.

use crate::error::Result;
use crate::types::{BatchReport, Outcome, ResultSet, TargetReport};

/// Render a result set and its truncation mark into a [`BatchReport`].
///
/// One entry per recorded outcome, in arrival order. Targets that never
/// reported before the deadline get no fabricated entries; the truncation
/// flag is the only record of their absence.
pub(crate) fn render(results: ResultSet) -> BatchReport {
    let (outcomes, timed_out) = results.into_parts();
    BatchReport {
        results: outcomes.into_iter().map(TargetReport::from).collect(),
        truncated: timed_out,
    }
}

impl From<Outcome> for TargetReport {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success { target, payload } => Self {
                target,
                success: true,
                payload: Some(payload),
                error: None,
            },
            Outcome::Failure { target, reason } => Self {
                target,
                success: false,
                payload: None,
                error: Some(reason),
            },
        }
    }
}

impl BatchReport {
    /// Serialize the report as a compact JSON document
    ///
    /// Field order follows declaration order, so output is deterministic
    /// for a fixed report.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize the report as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
