// Display module - Surface, events and display backends
//
// This module provides:
// - Session configuration (size, depth, surface flags, circle constants)
// - An RGBA surface with a clip rectangle and a filled-circle rasterizer
// - Random circle generation
// - Backend-independent input events
// - The display backend boundary, with a winit + pixels window backend and
//   a scripted headless backend

pub mod backend;
pub mod circle;
pub mod config;
pub mod error;
pub mod event;
pub mod headless;
pub mod surface;
pub mod window;

pub use backend::{DisplayBackend, PollEvents};
pub use circle::{Circle, CircleBounds};
pub use config::{SessionConfig, SurfaceFlags, NATIVE_DEPTH, SUPPORTED_DEPTHS};
pub use error::{ConfigError, DisplayError, DisplayInitError};
pub use event::{Event, Key};
pub use headless::{BackendCall, HeadlessBackend, HeadlessProbe};
pub use surface::{ClipRect, Rgba, Surface};
pub use window::WindowBackend;
