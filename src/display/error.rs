// Display errors
//
// Error types for configuration, session start-up and the running frame loop.

use crate::guard::ArgumentError;
use std::fmt;
use std::io;

/// Configuration loading or validation error
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error while reading a configuration file
    Io(io::Error),

    /// TOML could not be parsed into a configuration
    Parse(toml::de::Error),

    /// Configuration could not be written as TOML
    Serialize(toml::ser::Error),

    /// A value breaks a configuration invariant
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: String) -> Self {
        ConfigError::Invalid { field, reason }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Serialization error: {}", e),
            ConfigError::Invalid { field, reason } => {
                write!(f, "Invalid {}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// The display could not be brought up
#[derive(Debug)]
pub enum DisplayInitError {
    /// The session configuration is unusable
    Config(ConfigError),

    /// The platform event loop could not be created
    EventLoop(winit::error::EventLoopError),

    /// The window could not be created
    Window(winit::error::OsError),

    /// The presentation surface could not be created
    Pixels(pixels::Error),

    /// The subsystem started but never produced a usable surface
    SurfaceUnavailable,

    /// The session was already started or closed
    AlreadyStarted,
}

impl fmt::Display for DisplayInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayInitError::Config(e) => write!(f, "Configuration error: {}", e),
            DisplayInitError::EventLoop(e) => write!(f, "Event loop error: {}", e),
            DisplayInitError::Window(e) => write!(f, "Window creation failed: {}", e),
            DisplayInitError::Pixels(e) => write!(f, "Surface creation failed: {}", e),
            DisplayInitError::SurfaceUnavailable => write!(f, "No video surface was obtained"),
            DisplayInitError::AlreadyStarted => write!(f, "Session was already started"),
        }
    }
}

impl std::error::Error for DisplayInitError {}

impl From<ConfigError> for DisplayInitError {
    fn from(e: ConfigError) -> Self {
        DisplayInitError::Config(e)
    }
}

impl From<winit::error::EventLoopError> for DisplayInitError {
    fn from(e: winit::error::EventLoopError) -> Self {
        DisplayInitError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for DisplayInitError {
    fn from(e: winit::error::OsError) -> Self {
        DisplayInitError::Window(e)
    }
}

impl From<pixels::Error> for DisplayInitError {
    fn from(e: pixels::Error) -> Self {
        DisplayInitError::Pixels(e)
    }
}

/// Fatal error while a session is running
#[derive(Debug)]
pub enum DisplayError {
    /// Start-up failed
    Init(DisplayInitError),

    /// Presenting a frame failed
    Render(pixels::Error),

    /// A resource needed by the frame loop is missing
    Missing(ArgumentError),

    /// Backend-specific failure
    Backend(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Init(e) => write!(f, "Initialization error: {}", e),
            DisplayError::Render(e) => write!(f, "Render error: {}", e),
            DisplayError::Missing(e) => write!(f, "Session error: {}", e),
            DisplayError::Backend(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for DisplayError {}

impl From<DisplayInitError> for DisplayError {
    fn from(e: DisplayInitError) -> Self {
        DisplayError::Init(e)
    }
}

impl From<pixels::Error> for DisplayError {
    fn from(e: pixels::Error) -> Self {
        DisplayError::Render(e)
    }
}

impl From<ArgumentError> for DisplayError {
    fn from(e: ArgumentError) -> Self {
        DisplayError::Missing(e)
    }
}
