// Window backend - Real display using winit and pixels
//
// The winit event loop is pumped without blocking once per poll cycle, so
// the session keeps control of the frame loop. Window events are queued as
// session events; surfaces are presented through a pixels frame.

use super::backend::DisplayBackend;
use super::config::{SessionConfig, NATIVE_DEPTH};
use super::error::{DisplayError, DisplayInitError};
use super::event::Event;
use super::surface::Surface;
use crate::guard::require;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

/// Pumps allowed for the platform to deliver `resumed` during start-up
const INIT_PUMP_LIMIT: usize = 16;

/// Application state handed to the winit event loop
#[derive(Default)]
struct WindowState {
    config: Option<SessionConfig>,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    pending: VecDeque<Event>,
    init_error: Option<DisplayInitError>,
}

impl WindowState {
    fn create_surface(
        event_loop: &ActiveEventLoop,
        config: &SessionConfig,
    ) -> Result<(Arc<Window>, Pixels<'static>), DisplayInitError> {
        let window_attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(false);

        // Wrap window in Arc for shared ownership
        let window = Arc::new(event_loop.create_window(window_attributes)?);
        let window_size = window.inner_size();

        // Create surface texture using Arc<Window> for safe 'static lifetime
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());

        let pixels = PixelsBuilder::new(config.width, config.height, surface_texture)
            .enable_vsync(config.flags.double_buffered)
            .build()?;

        Ok((window, pixels))
    }
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.init_error.is_some() {
            return;
        }
        let Some(config) = self.config.as_ref() else {
            return;
        };

        match Self::create_surface(event_loop, config) {
            Ok((window, pixels)) => {
                self.window = Some(window);
                self.pixels = Some(pixels);
            }
            Err(err) => self.init_error = Some(err),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.pending.push_back(Event::from_window_event(&event));
    }
}

/// Display backend backed by a desktop window
#[derive(Default)]
pub struct WindowBackend {
    event_loop: Option<EventLoop<()>>,
    state: WindowState,
    pumped: bool,
}

impl WindowBackend {
    /// Create a backend; nothing is acquired until `initialize`
    pub fn new() -> Self {
        Self::default()
    }

    /// Pump the event loop once without waiting
    ///
    /// Returns `false` if the event loop has exited.
    fn pump(&mut self) -> bool {
        let Some(event_loop) = self.event_loop.as_mut() else {
            return false;
        };

        match event_loop.pump_app_events(Some(Duration::ZERO), &mut self.state) {
            PumpStatus::Continue => true,
            PumpStatus::Exit(code) => {
                log::debug!("Event loop exited with code {}", code);
                false
            }
        }
    }
}

impl DisplayBackend for WindowBackend {
    fn initialize(&mut self, config: &SessionConfig) -> Result<(), DisplayInitError> {
        if self.event_loop.is_some() {
            return Err(DisplayInitError::AlreadyStarted);
        }

        if !config.flags.hardware {
            log::warn!("Software surfaces are unavailable, using a GPU-backed surface");
        }
        if config.depth != NATIVE_DEPTH {
            log::info!(
                "Requested {}-bit depth, using the native {}-bit RGBA format",
                config.depth,
                NATIVE_DEPTH
            );
        }

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        self.state.config = Some(config.clone());
        self.event_loop = Some(event_loop);

        for _ in 0..INIT_PUMP_LIMIT {
            if !self.pump() || self.state.window.is_some() || self.state.init_error.is_some() {
                break;
            }
        }

        if let Some(err) = self.state.init_error.take() {
            return Err(err);
        }
        if self.state.pixels.is_none() {
            return Err(DisplayInitError::SurfaceUnavailable);
        }

        log::info!(
            "Window created: {}x{} \"{}\"",
            config.width,
            config.height,
            config.title
        );
        Ok(())
    }

    fn poll_event(&mut self) -> Option<Event> {
        // One pump per poll cycle
        if !self.pumped {
            self.pumped = true;
            if !self.pump() {
                self.state.pending.push_back(Event::Quit);
            }
        }

        let event = self.state.pending.pop_front();
        if event.is_none() {
            self.pumped = false;
        }
        event
    }

    fn present(&mut self, surface: &Surface) -> Result<(), DisplayError> {
        let pixels = require(self.state.pixels.as_mut(), "pixels")?;

        surface.copy_to_rgba(pixels.frame_mut());
        pixels.render()?;

        Ok(())
    }

    fn shutdown(&mut self) {
        // Presentation target before the window it draws into
        self.state.pixels = None;
        self.state.window = None;
        self.state.pending.clear();
        self.event_loop = None;
        self.pumped = false;
    }
}
