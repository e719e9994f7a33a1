//! Plain-text rendering of a run summary.

use std::fmt;

use checkpost_application::{ResponseOutcome, RunSummary};

/// Text view of a run: one block per response followed by a totals line.
pub struct TextReport<'a>(pub &'a RunSummary);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        for response in &summary.responses {
            writeln!(f, "{}", response.label)?;
            if let Some(results) = response.outcome.results() {
                for result in &results.results {
                    writeln!(f, "  {result}")?;
                }
            }
            if let ResponseOutcome::Aborted(error) = &response.outcome {
                writeln!(f, "  ABORT {error}")?;
            }
        }
        writeln!(
            f,
            "{} passed, {} failed, {} aborted",
            summary.checks_passed, summary.checks_failed, summary.aborted
        )
    }
}
