//! Port adapters

mod system_clock;
mod tracing_log;

pub use system_clock::SystemClock;
pub use tracing_log::TracingLogSink;
