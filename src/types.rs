//! Core types for fanout-fetch

use serde::{Deserialize, Serialize};

/// Opaque reference to one unit of remote work (e.g., a URL)
///
/// Targets are supplied by the caller and never interpreted by the engine
/// itself; only the [`Fetcher`](crate::fetch::Fetcher) collaborator gives
/// them meaning.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(pub String);

impl Target {
    /// Create a new Target from any string-like reference
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Get the target reference as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Target {
    fn from(reference: String) -> Self {
        Self(reference)
    }
}

impl From<&str> for Target {
    fn from(reference: &str) -> Self {
        Self(reference.to_string())
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of executing one target, created exactly once by the worker that
/// ran it and never mutated afterwards
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    /// The remote call completed and produced a payload
    Success {
        /// Target that was fetched
        target: Target,
        /// Opaque response payload
        payload: String,
    },

    /// The remote call failed
    Failure {
        /// Target that was attempted
        target: Target,
        /// Human-readable failure description
        reason: String,
    },
}

impl Outcome {
    /// The target this outcome belongs to
    pub fn target(&self) -> &Target {
        match self {
            Outcome::Success { target, .. } | Outcome::Failure { target, .. } => target,
        }
    }

    /// Whether the remote call succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

/// Coordinator state for one batch invocation
///
/// The transition is monotone: `Collecting` moves to `Done` exactly once,
/// the first time either every outcome has arrived or the deadline fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchState {
    /// Waiting for outcomes or the deadline, whichever comes first
    Collecting,
    /// Terminal: the batch result is fixed and late outcomes are discarded
    Done,
}

/// Append-only, arrival-ordered collection of outcomes for one batch
///
/// Owned exclusively by the coordinator while collecting; capped at the
/// number of dispatched targets. When the deadline fires before every
/// outcome arrives, the set is marked truncated; the mark is the batch's
/// "timed out" record and survives into the rendered report.
#[derive(Clone, Debug, Default)]
pub struct ResultSet {
    outcomes: Vec<Outcome>,
    timed_out: bool,
}

impl ResultSet {
    /// Create an empty result set sized for `expected` outcomes
    pub fn with_capacity(expected: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(expected),
            timed_out: false,
        }
    }

    /// Append an outcome in arrival order
    pub fn push(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    /// Mark that the deadline elapsed before the set was complete
    pub fn mark_timed_out(&mut self) {
        self.timed_out = true;
    }

    /// Number of outcomes received so far
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether no outcomes have been received
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Whether the deadline elapsed before completion
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Outcomes in arrival order
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Consume the set, yielding the outcomes and the truncation mark
    pub fn into_parts(self) -> (Vec<Outcome>, bool) {
        (self.outcomes, self.timed_out)
    }
}

/// One entry in the rendered batch output
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetReport {
    /// Target this entry describes
    pub target: Target,

    /// Whether the remote call succeeded
    pub success: bool,

    /// Response payload (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,

    /// Failure description (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Rendered result of one batch invocation
///
/// Contains one entry per outcome that arrived before the terminal
/// transition, in arrival order, plus the truncation flag. When no timeout
/// occurred the entry count equals the number of dispatched targets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Per-target records in arrival order
    pub results: Vec<TargetReport>,

    /// True when the deadline elapsed before every target reported
    pub truncated: bool,
}

impl BatchReport {
    /// Number of successful entries
    pub fn successes(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    /// Number of failed entries
    pub fn failures(&self) -> usize {
        self.results.len() - self.successes()
    }
}

/// Event emitted during a batch lifecycle
///
/// Multiple subscribers are supported via the engine's broadcast channel;
/// if nobody is listening, events are silently dropped.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Workers have been dispatched and the deadline clock is running
    BatchStarted {
        /// Number of dispatched targets
        total: usize,
    },

    /// A worker reported a successful outcome
    TargetCompleted {
        /// Target that completed
        target: Target,
    },

    /// A worker reported a failed outcome
    TargetFailed {
        /// Target that failed
        target: Target,
        /// Failure description
        reason: String,
    },

    /// The deadline elapsed before every target reported
    DeadlineExceeded {
        /// Outcomes received when the deadline fired
        received: usize,
        /// Number of dispatched targets
        total: usize,
    },

    /// The batch reached its terminal state and the report is fixed
    BatchFinished {
        /// Outcomes recorded in the report
        received: usize,
        /// Whether the batch was truncated by the deadline
        truncated: bool,
    },
}
