// Session module - Display session lifecycle and frame loop
//
// A display session owns the backend, the surface and the loop state. It
// moves through Uninitialized -> Initialized -> Running -> ShuttingDown ->
// Closed, and every path out of a started session goes through shutdown
// exactly once (explicitly, at the end of `run`, or on drop).
//
// Frame order: drain events, draw one random circle, present, sleep. A quit
// seen while draining still lets the current frame draw and present.


use crate::debug::{LogSink, TraceSink};
use crate::display::{
    Circle, DisplayBackend, DisplayError, DisplayInitError, PollEvents, SessionConfig, Surface,
};
use crate::guard::require;
use rand::Rng;
use std::thread;

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing acquired yet
    Uninitialized,
    /// Backend and surface are ready
    Initialized,
    /// Frame loop is running
    Running,
    /// Resources are being released
    ShuttingDown,
    /// Everything released; the session cannot be restarted
    Closed,
}

/// Result of a completed session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Number of frames run
    pub frames: u64,
    /// Circle drawn in the last frame
    pub last_circle: Option<Circle>,
    /// Whether the loop ended on a quit request
    pub quit: bool,
}

/// One interactive display session
pub struct DisplaySession<B: DisplayBackend> {
    /// Display subsystem (window + event source)
    backend: B,

    /// Fixed configuration
    config: SessionConfig,

    /// Drawable surface, present between initialize and shutdown
    surface: Option<Surface>,

    /// Lifecycle state
    state: SessionState,

    /// Whether the backend may hold resources that need releasing
    backend_started: bool,

    /// Frames run so far
    frames: u64,

    /// Circle drawn in the most recent frame
    last_circle: Option<Circle>,

    /// Per-frame trace output
    trace: Box<dyn TraceSink>,
}

impl<B: DisplayBackend> DisplaySession<B> {
    /// Create a session; nothing is acquired until [`DisplaySession::initialize`]
    pub fn new(backend: B, config: SessionConfig) -> Self {
        Self {
            backend,
            config,
            surface: None,
            state: SessionState::Uninitialized,
            backend_started: false,
            frames: 0,
            last_circle: None,
            trace: Box::new(LogSink::new()),
        }
    }

    /// Send per-frame trace lines to `sink` instead of the `log` facade
    pub fn with_trace<S: TraceSink + 'static>(mut self, sink: S) -> Self {
        self.trace = Box::new(sink);
        self
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The surface, if the session is initialized
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// The backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Circle drawn in the most recent frame
    pub fn last_circle(&self) -> Option<Circle> {
        self.last_circle
    }

    /// Start the display and create the surface
    ///
    /// Validates the configuration, brings up the backend, creates the
    /// surface and clips it to its bounds. On failure everything acquired so
    /// far is released and the session is closed.
    pub fn initialize(&mut self) -> Result<&Surface, DisplayInitError> {
        if self.state != SessionState::Uninitialized {
            return Err(DisplayInitError::AlreadyStarted);
        }

        if let Err(err) = self.start_backend() {
            log::error!("Display initialization failed: {}", err);
            self.shutdown();
            return Err(err);
        }

        let mut surface = Surface::new(self.config.width, self.config.height);
        surface.clip_to_bounds();
        self.state = SessionState::Initialized;

        log::info!(
            "Display session initialized: {}x{}, {}-bit, \"{}\"",
            self.config.width,
            self.config.height,
            self.config.depth,
            self.config.title
        );

        Ok(self.surface.insert(surface))
    }

    fn start_backend(&mut self) -> Result<(), DisplayInitError> {
        self.config.validate()?;
        self.backend_started = true;
        self.backend.initialize(&self.config)
    }

    /// Events pending in this poll cycle
    ///
    /// Never blocks; the sequence ends as soon as nothing is pending.
    pub fn poll_events(&mut self) -> PollEvents<'_, B> {
        PollEvents::new(&mut self.backend)
    }

    /// Run one frame
    ///
    /// Drains all pending events, draws one random circle, presents the
    /// surface and sleeps for the frame delay.
    ///
    /// # Arguments
    /// * `rng` - Random source for the circle
    /// * `quit` - Quit flag carried in from the previous frame
    ///
    /// # Returns
    /// The updated quit flag
    pub fn run_frame<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        quit: bool,
    ) -> Result<bool, DisplayError> {
        if self.state == SessionState::Initialized {
            self.state = SessionState::Running;
        }

        let mut quit = quit;
        for event in self.poll_events() {
            if event.requests_quit() {
                log::debug!("Quit requested by {:?}", event);
                quit = true;
            }
        }

        let circle = Circle::random(rng, &self.config.circle_bounds());
        let surface = require(self.surface.as_mut(), "surface")?;
        surface.fill_circle(&circle);
        self.backend.present(surface)?;

        self.frames += 1;
        self.last_circle = Some(circle);

        self.trace.write(&format!("frame {}: ", self.frames));
        self.trace.write_line(&format!(
            "circle at ({}, {}) r={} rgba=({}, {}, {}, {})",
            circle.x,
            circle.y,
            circle.radius,
            circle.color.r,
            circle.color.g,
            circle.color.b,
            circle.color.a
        ));

        let delay = self.config.frame_delay();
        if !delay.is_zero() {
            thread::sleep(delay);
        }

        Ok(quit)
    }

    /// Run frames until quit is requested, then shut down
    ///
    /// Shutdown runs whether the loop ends normally or on an error.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<SessionSummary, DisplayError> {
        require(self.surface.as_ref(), "surface")?;
        self.state = SessionState::Running;
        log::info!("Frame loop started");

        let mut quit = false;
        let mut outcome = Ok(());

        while !quit {
            match self.run_frame(rng, quit) {
                Ok(q) => quit = q,
                Err(err) => {
                    log::error!("Frame {} failed: {}", self.frames + 1, err);
                    outcome = Err(err);
                    break;
                }
            }
        }

        self.shutdown();

        outcome.map(|()| SessionSummary {
            frames: self.frames,
            last_circle: self.last_circle,
            quit,
        })
    }

    /// Release the backend and the surface
    ///
    /// Safe to call more than once; only the first call releases anything.
    pub fn shutdown(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }

        self.state = SessionState::ShuttingDown;

        if self.backend_started {
            self.backend.shutdown();
            self.backend_started = false;
        }
        self.surface = None;

        self.state = SessionState::Closed;
        log::info!("Display session closed after {} frames", self.frames);
    }
}

impl<B: DisplayBackend> Drop for DisplaySession<B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Run a complete session: initialize, loop until quit, shut down
///
/// # Example
///
/// ```
/// use circle_demo::display::{Event, HeadlessBackend, SessionConfig};
/// use circle_demo::session::run_session;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use std::time::Duration;
///
/// let backend = HeadlessBackend::new().with_frame([Event::Quit]);
/// let config = SessionConfig::new().with_frame_delay(Duration::ZERO);
/// let summary = run_session(backend, config, &mut StdRng::seed_from_u64(7)).unwrap();
/// assert_eq!(summary.frames, 1);
/// ```
pub fn run_session<B: DisplayBackend, R: Rng + ?Sized>(
    backend: B,
    config: SessionConfig,
    rng: &mut R,
) -> Result<SessionSummary, DisplayError> {
    let mut session = DisplaySession::new(backend, config);
    session.initialize()?;
    session.run(rng)
}
