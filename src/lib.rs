// Circle demo library
// Display session, surface drawing and supporting utilities

// Public modules
pub mod debug;
pub mod display;
pub mod guard;
pub mod session;

// Re-export main types for convenience
pub use debug::{LogLevel, LogSink, TraceLogger, TraceSink};
pub use display::{
    Circle, DisplayBackend, DisplayError, DisplayInitError, Event, HeadlessBackend, Key,
    SessionConfig, Surface, WindowBackend,
};
pub use guard::{require, ArgumentError};
pub use session::{run_session, DisplaySession, SessionState, SessionSummary};
