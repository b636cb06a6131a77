//! Scenario and suite results.
//!
//! Results are created once per execution and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scenario::{Expectation, ScenarioId};

/// Result of evaluating a single expectation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpectationResult {
    /// The expectation that was evaluated.
    pub expectation: Expectation,
    /// Whether the expectation passed.
    pub passed: bool,
    /// Observed value (for display).
    pub actual: Option<String>,
    /// Failure reason, including the expected value.
    pub error: Option<String>,
}

impl ExpectationResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(expectation: Expectation) -> Self {
        Self {
            expectation,
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(expectation: Expectation, actual: impl Into<String>) -> Self {
        Self {
            expectation,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(expectation: Expectation, error: impl Into<String>) -> Self {
        Self {
            expectation,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        expectation: Expectation,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            expectation,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}

/// Final outcome of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Every expectation passed.
    Pass,
    /// At least one expectation failed or the request never completed.
    Fail {
        /// Summary of why.
        reason: String,
    },
}

impl Outcome {
    /// Returns true for [`Outcome::Pass`].
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Lifecycle of a scenario within a run.
///
/// `Pending → Running → {Passed, Failed}`; the last two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioState {
    /// Registered, not started.
    #[default]
    Pending,
    /// Request in flight or expectations being evaluated.
    Running,
    /// Finished, all expectations passed.
    Passed,
    /// Finished with a failure.
    Failed,
}

impl ScenarioState {
    /// Returns true for `Passed` and `Failed`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Passed | Self::Failed)
    }

    /// Advances to the next state, or `None` if the move is not allowed.
    #[must_use]
    pub const fn advance(self, outcome: Option<&Outcome>) -> Option<Self> {
        match (self, outcome) {
            (Self::Pending, None) => Some(Self::Running),
            (Self::Running, Some(Outcome::Pass)) => Some(Self::Passed),
            (Self::Running, Some(Outcome::Fail { .. })) => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Result of one scenario execution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioResult {
    /// Which scenario ran.
    pub id: ScenarioId,
    /// The resolved request URL, or the path if it never resolved.
    pub url: String,
    /// Observed status code, absent on transport failure.
    pub status: Option<u16>,
    /// Final outcome.
    #[serde(flatten)]
    pub outcome: Outcome,
    /// Per-expectation results in declaration order.
    pub expectations: Vec<ExpectationResult>,
    /// Transport error message, if the request failed.
    pub transport_error: Option<String>,
    /// Wall time of fetch plus evaluation.
    pub duration_ms: u64,
}

impl ScenarioResult {
    /// Builds a result from evaluated expectations.
    #[must_use]
    pub fn assessed(
        id: ScenarioId,
        url: impl Into<String>,
        status: u16,
        expectations: Vec<ExpectationResult>,
        duration_ms: u64,
    ) -> Self {
        let failed = expectations.iter().filter(|r| !r.passed).count();
        let outcome = if failed == 0 {
            Outcome::Pass
        } else {
            Outcome::Fail {
                reason: format!("{failed} of {} expectations failed", expectations.len()),
            }
        };

        Self {
            id,
            url: url.into(),
            status: Some(status),
            outcome,
            expectations,
            transport_error: None,
            duration_ms,
        }
    }

    /// Builds a failed result for a request that never completed.
    #[must_use]
    pub fn transport_failure(
        id: ScenarioId,
        url: impl Into<String>,
        error: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        let error = error.into();
        Self {
            id,
            url: url.into(),
            status: None,
            outcome: Outcome::Fail {
                reason: format!("transport error: {error}"),
            },
            expectations: Vec::new(),
            transport_error: Some(error),
            duration_ms,
        }
    }

    /// Whether the scenario passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.outcome.is_pass()
    }

    /// Terminal state for this result.
    #[must_use]
    pub const fn state(&self) -> ScenarioState {
        if self.passed() {
            ScenarioState::Passed
        } else {
            ScenarioState::Failed
        }
    }

    /// Failed expectation results.
    pub fn failures(&self) -> impl Iterator<Item = &ExpectationResult> {
        self.expectations.iter().filter(|r| !r.passed)
    }
}

/// Aggregated results of a suite run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Suite that was run.
    pub suite_name: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Scenario results in execution order.
    pub results: Vec<ScenarioResult>,
    /// Total number of scenarios.
    pub total: usize,
    /// Number of passed scenarios.
    pub passed: usize,
    /// Number of failed scenarios.
    pub failed: usize,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl SuiteReport {
    /// Create a report from results.
    #[must_use]
    pub fn new(
        suite_name: impl Into<String>,
        started_at: DateTime<Utc>,
        results: Vec<ScenarioResult>,
        duration_ms: u64,
    ) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed()).count();
        let failed = total - passed;

        Self {
            suite_name: suite_name.into(),
            started_at,
            results,
            total,
            passed,
            failed,
            duration_ms,
        }
    }

    /// True when at least one scenario ran and none failed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.total > 0 && self.failed == 0
    }

    /// Process exit code: 0 iff every scenario passed.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.all_passed() { 0 } else { 1 }
    }
}
