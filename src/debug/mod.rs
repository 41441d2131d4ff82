// Debug module - Diagnostic trace output

pub mod logger;

pub use logger::{LogLevel, LogSink, TraceLogger, TraceSink, LINE_ENDING};
