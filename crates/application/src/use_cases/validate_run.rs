//! Validate run use case
//!
//! Validates a sequence of responses against one shared environment. A
//! response that cannot be validated is recorded and the run moves on.

use checkpost_domain::{Environment, ResponseSpec, TestResults};
use serde::{Serialize, Serializer};
use tracing::{info, warn};

use super::validate_response::{ResponseValidator, ValidationReport};
use crate::error::ValidationError;
use crate::ports::{Clock, LogSink};

/// A labelled response waiting to be validated.
#[derive(Debug, Clone)]
pub struct RunEntry {
    /// Display label, usually the fixture path or request name.
    pub label: String,
    /// The completed response.
    pub response: ResponseSpec,
}

impl RunEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(label: impl Into<String>, response: ResponseSpec) -> Self {
        Self {
            label: label.into(),
            response,
        }
    }
}

/// What happened to one response in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// The body decoded and every named check ran.
    Validated(ValidationReport),
    /// Validation stopped early.
    Aborted(ValidationError),
}

impl ResponseOutcome {
    /// Named results recorded for this response, including partial ones.
    #[must_use]
    pub const fn results(&self) -> Option<&TestResults> {
        match self {
            Self::Validated(report) => Some(&report.results),
            Self::Aborted(error) => error.partial_results(),
        }
    }

    /// Returns true if validation stopped early.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted(_))
    }
}

#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
enum OutcomeRepr<'a> {
    Validated {
        results: &'a TestResults,
        result_count: usize,
    },
    Aborted {
        kind: &'static str,
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        results: Option<&'a TestResults>,
    },
}

impl Serialize for ResponseOutcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let repr = match self {
            Self::Validated(report) => OutcomeRepr::Validated {
                results: &report.results,
                result_count: report.result_count,
            },
            Self::Aborted(error) => OutcomeRepr::Aborted {
                kind: error.kind(),
                error: error.to_string(),
                results: error.partial_results(),
            },
        };
        repr.serialize(serializer)
    }
}

/// One labelled outcome in a run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    /// Label of the validated response.
    pub label: String,
    /// Its outcome.
    #[serde(flatten)]
    pub outcome: ResponseOutcome,
}

/// Results from a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Per-response outcomes, in run order.
    pub responses: Vec<RunResult>,
    /// Named checks that passed, across all responses.
    pub checks_passed: usize,
    /// Named checks that failed, across all responses.
    pub checks_failed: usize,
    /// Responses whose validation stopped early.
    pub aborted: usize,
}

impl RunSummary {
    fn push(&mut self, label: String, outcome: ResponseOutcome) {
        if let Some(results) = outcome.results() {
            self.checks_passed += results.passed;
            self.checks_failed += results.failed;
        }
        if outcome.is_aborted() {
            self.aborted += 1;
        }
        self.responses.push(RunResult { label, outcome });
    }

    /// True when no check failed and no response aborted.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.checks_failed == 0 && self.aborted == 0
    }
}

/// Validates many responses in order, sharing one environment.
pub struct ValidationRun<C> {
    validator: ResponseValidator<C>,
}

impl<C: Clock> ValidationRun<C> {
    /// Creates a new run backed by `validator`.
    pub const fn new(validator: ResponseValidator<C>) -> Self {
        Self { validator }
    }

    /// Validates every entry.
    ///
    /// Each response sees the environment as left by the previous one. A
    /// decode failure or other early stop is recorded for that response only.
    pub fn execute(
        &self,
        entries: &[RunEntry],
        environment: &mut Environment,
        log: &mut dyn LogSink,
    ) -> RunSummary {
        let mut summary = RunSummary::default();

        for entry in entries {
            log.log(format!("== {} ==", entry.label));
            let outcome = match self.validator.validate(&entry.response, environment, log) {
                Ok(report) => ResponseOutcome::Validated(report),
                Err(error) => {
                    warn!(label = %entry.label, %error, "validation aborted");
                    log.log(format!("Validation aborted: {error}"));
                    ResponseOutcome::Aborted(error)
                }
            };
            summary.push(entry.label.clone(), outcome);
        }

        info!(
            responses = summary.responses.len(),
            passed = summary.checks_passed,
            failed = summary.checks_failed,
            aborted = summary.aborted,
            "run finished"
        );
        summary
    }
}
