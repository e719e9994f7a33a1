//! Log sink that forwards diagnostic lines to `tracing`.

use checkpost_application::ports::LogSink;

/// Forwards each diagnostic line as an `info` event on the
/// `checkpost::console` target and keeps a copy for reporting.
#[derive(Debug, Default)]
pub struct TracingLogSink {
    lines: Vec<String>,
}

impl TracingLogSink {
    /// Creates an empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines logged so far, in order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl LogSink for TracingLogSink {
    fn log(&mut self, line: String) {
        tracing::info!(target: "checkpost::console", "{line}");
        self.lines.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_kept_in_order() {
        let mut sink = TracingLogSink::new();
        sink.log("Status code: 200".to_string());
        sink.log("Result count: 3".to_string());
        assert_eq!(sink.lines(), ["Status code: 200", "Result count: 3"]);
    }
}
