//! Named test cases and their outcomes.
//!
//! Every check run against a response produces a [`TestResult`]. A failing
//! check is a value, not an error, so sibling checks keep running.

use serde::{Deserialize, Serialize};

/// Outcome of a single named check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TestOutcome {
    /// The check held.
    Pass,
    /// The check did not hold.
    Fail {
        /// Why the check failed (expected vs actual).
        message: String,
    },
}

impl TestOutcome {
    /// Builds a pass or a failure from a condition.
    ///
    /// The message closure only runs when the condition is false.
    pub fn check(condition: bool, message: impl FnOnce() -> String) -> Self {
        if condition {
            Self::Pass
        } else {
            Self::Fail { message: message() }
        }
    }

    /// Returns true if this is a pass.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns the failure message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Pass => None,
            Self::Fail { message } => Some(message),
        }
    }
}

/// Result of running one named check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    /// Test case name, e.g. "Status code is 200".
    pub name: String,
    /// Pass or failure.
    #[serde(flatten)]
    pub outcome: TestOutcome,
}

impl TestResult {
    /// Create a passed result.
    #[must_use]
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: TestOutcome::Pass,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: TestOutcome::Fail {
                message: message.into(),
            },
        }
    }

    /// Create a result from an outcome.
    #[must_use]
    pub fn new(name: impl Into<String>, outcome: TestOutcome) -> Self {
        Self {
            name: name.into(),
            outcome,
        }
    }

    /// Whether the check passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.outcome.is_pass()
    }
}

impl std::fmt::Display for TestResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.outcome {
            TestOutcome::Pass => write!(f, "PASS  {}", self.name),
            TestOutcome::Fail { message } => write!(f, "FAIL  {}: {}", self.name, message),
        }
    }
}

/// Ordered results of every check run against one response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResults {
    /// Individual results in execution order.
    pub results: Vec<TestResult>,
    /// Number of passed checks.
    pub passed: usize,
    /// Number of failed checks.
    pub failed: usize,
}

impl TestResults {
    /// Creates an empty result list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            results: Vec::new(),
            passed: 0,
            failed: 0,
        }
    }

    /// Appends a result, keeping the counters current.
    pub fn record(&mut self, result: TestResult) {
        if result.passed() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }

    /// Total number of recorded checks.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Check if all tests passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Looks up a result by test case name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TestResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Iterates over failed results.
    pub fn failures(&self) -> impl Iterator<Item = &TestResult> {
        self.results.iter().filter(|r| !r.passed())
    }
}

impl FromIterator<TestResult> for TestResults {
    fn from_iter<T: IntoIterator<Item = TestResult>>(iter: T) -> Self {
        let mut results = Self::new();
        for result in iter {
            results.record(result);
        }
        results
    }
}
