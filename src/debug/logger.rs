// Logger - Trace output sinks
//
// Provides:
// - The TraceSink interface (append text, append a line)
// - A buffering logger with log levels and optional file output
// - A sink that forwards lines to the `log` facade

use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Line terminator for the current platform
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";

/// Line terminator for the current platform
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Destination for diagnostic trace text
pub trait TraceSink {
    /// Append raw text
    fn write(&mut self, text: &str);

    /// Append raw text followed by a line terminator
    fn write_line(&mut self, text: &str);
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// No logging
    None,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warning,
    /// Info, warnings, and errors
    Info,
    /// Debug information
    Debug,
    /// Verbose trace logging (includes sink output)
    Trace,
}

/// Trace logger
///
/// Keeps completed lines in a bounded in-memory buffer and can mirror all
/// text to a file. Text written through [`TraceSink`] is recorded at
/// [`LogLevel::Trace`].
pub struct TraceLogger {
    /// Current log level
    log_level: LogLevel,

    /// Completed lines
    lines: Vec<String>,

    /// Text written since the last line terminator
    pending: String,

    /// Maximum number of lines in the buffer (0 = unlimited)
    max_buffer_size: usize,

    /// Output file
    output_file: Option<File>,
}

impl TraceLogger {
    /// Create a logger that records trace output
    pub fn new() -> Self {
        TraceLogger {
            log_level: LogLevel::Trace,
            lines: Vec::new(),
            pending: String::new(),
            max_buffer_size: 10000,
            output_file: None,
        }
    }

    /// Set the log level
    pub fn set_log_level(&mut self, level: LogLevel) {
        self.log_level = level;
    }

    /// Get the current log level
    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Set maximum line buffer size
    ///
    /// When the buffer exceeds this size, old lines are removed.
    /// Set to 0 for unlimited size.
    pub fn set_max_buffer_size(&mut self, size: usize) {
        self.max_buffer_size = size;

        if size > 0 && self.lines.len() > size {
            self.lines.drain(0..self.lines.len() - size);
        }
    }

    /// Open a log file for output
    ///
    /// # Returns
    ///
    /// `Ok(())` if successful, `Err` otherwise
    pub fn open_log_file<P: AsRef<Path>>(&mut self, path: P) -> std::io::Result<()> {
        let file = File::create(path)?;
        self.output_file = Some(file);
        Ok(())
    }

    /// Close the log file
    pub fn close_log_file(&mut self) {
        self.output_file = None;
    }

    /// Log a message as a complete line
    ///
    /// # Arguments
    ///
    /// * `level` - The log level for this message
    /// * `message` - The message to log
    pub fn log_message(&mut self, level: LogLevel, message: &str) {
        if level > self.log_level {
            return;
        }

        self.append(message);
        self.end_line();
    }

    fn append(&mut self, text: &str) {
        if let Some(ref mut file) = self.output_file {
            let _ = file.write_all(text.as_bytes());
        }
        self.pending.push_str(text);
    }

    fn end_line(&mut self) {
        if let Some(ref mut file) = self.output_file {
            let _ = file.write_all(LINE_ENDING.as_bytes());
        }

        let line = std::mem::take(&mut self.pending);
        self.lines.push(line);

        if self.max_buffer_size > 0 && self.lines.len() > self.max_buffer_size {
            self.lines.remove(0);
        }
    }

    /// Get all completed lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Get text written since the last line terminator
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Get the last N completed lines
    pub fn last_lines(&self, count: usize) -> &[String] {
        let start = self.lines.len().saturating_sub(count);
        &self.lines[start..]
    }

    /// Clear the line buffer and any pending text
    pub fn clear_buffer(&mut self) {
        self.lines.clear();
        self.pending.clear();
    }

    /// Format the buffer as text, one terminated line per entry
    pub fn format_buffer(&self) -> String {
        let mut output = String::new();

        for line in &self.lines {
            output.push_str(line);
            output.push_str(LINE_ENDING);
        }

        output
    }
}

impl Default for TraceLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceSink for TraceLogger {
    fn write(&mut self, text: &str) {
        if self.log_level >= LogLevel::Trace {
            self.append(text);
        }
    }

    fn write_line(&mut self, text: &str) {
        if self.log_level >= LogLevel::Trace {
            self.append(text);
            self.end_line();
        }
    }
}

/// Sink that forwards completed lines to `log::trace!`
#[derive(Debug, Default)]
pub struct LogSink {
    pending: String,
}

impl LogSink {
    /// Create a sink
    pub fn new() -> Self {
        Self::default()
    }
}

impl TraceSink for LogSink {
    fn write(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    fn write_line(&mut self, text: &str) {
        self.pending.push_str(text);
        log::trace!("{}", self.pending);
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let logger = TraceLogger::new();
        assert_eq!(logger.log_level(), LogLevel::Trace);
        assert!(logger.lines().is_empty());
        assert_eq!(logger.pending(), "");
    }

    #[test]
    fn test_write_and_write_line() {
        let mut logger = TraceLogger::new();

        logger.write("frame 1: ");
        assert_eq!(logger.pending(), "frame 1: ");
        assert!(logger.lines().is_empty());

        logger.write_line("circle");
        assert_eq!(logger.lines(), ["frame 1: circle".to_string()]);
        assert_eq!(logger.pending(), "");
    }

    #[test]
    fn test_format_buffer_uses_platform_line_ending() {
        let mut logger = TraceLogger::new();
        logger.write_line("a");
        logger.write_line("b");

        assert_eq!(
            logger.format_buffer(),
            format!("a{}b{}", LINE_ENDING, LINE_ENDING)
        );
    }

    #[test]
    fn test_sink_output_requires_trace_level() {
        let mut logger = TraceLogger::new();
        logger.set_log_level(LogLevel::Debug);

        logger.write("ignored");
        logger.write_line("ignored");
        assert!(logger.lines().is_empty());
        assert_eq!(logger.pending(), "");
    }

    #[test]
    fn test_log_message() {
        let mut logger = TraceLogger::new();
        logger.set_log_level(LogLevel::Info);

        logger.log_message(LogLevel::Info, "Test message");
        logger.log_message(LogLevel::Debug, "Too verbose");

        assert_eq!(logger.lines(), ["Test message".to_string()]);
    }

    #[test]
    fn test_max_buffer_size() {
        let mut logger = TraceLogger::new();
        logger.set_max_buffer_size(3);

        for line in ["1", "2", "3", "4"] {
            logger.write_line(line);
        }

        assert_eq!(logger.lines().len(), 3);
        assert_eq!(logger.lines()[0], "2");

        logger.set_max_buffer_size(1);
        assert_eq!(logger.lines(), ["4".to_string()]);
    }

    #[test]
    fn test_last_lines_and_clear() {
        let mut logger = TraceLogger::new();
        logger.write_line("1");
        logger.write_line("2");
        logger.write_line("3");
        logger.write("partial");

        assert_eq!(logger.last_lines(2), ["2".to_string(), "3".to_string()]);
        assert_eq!(logger.last_lines(10).len(), 3);

        logger.clear_buffer();
        assert!(logger.lines().is_empty());
        assert_eq!(logger.pending(), "");
    }

    #[test]
    fn test_log_file_output() {
        let path = std::env::temp_dir().join(format!(
            "circle_demo_trace_{}.log",
            std::process::id()
        ));

        let mut logger = TraceLogger::new();
        logger.open_log_file(&path).unwrap();
        logger.write("a");
        logger.write_line("b");
        logger.close_log_file();

        let contents = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(contents, format!("ab{}", LINE_ENDING));
    }

    #[test]
    fn test_log_sink_clears_pending_line() {
        let mut sink = LogSink::new();
        sink.write("frame ");
        assert_eq!(sink.pending, "frame ");
        sink.write_line("1");
        assert!(sink.pending.is_empty());
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::None < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Trace);
    }
}
