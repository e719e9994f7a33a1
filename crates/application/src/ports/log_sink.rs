//! Diagnostic log port

/// Append-only sink for human-readable diagnostic lines.
///
/// Lines are delivered in the order the validator produces them.
pub trait LogSink {
    /// Appends one line.
    fn log(&mut self, line: String);
}

impl LogSink for Vec<String> {
    fn log(&mut self, line: String) {
        self.push(line);
    }
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn log(&mut self, line: String) {
        (**self).log(line);
    }
}
