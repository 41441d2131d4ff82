// Headless backend - Scripted display without a window
//
// Events are scripted per frame: the first batch is pending after
// initialization, and every present moves on to the next batch. All calls
// are recorded so tests can check what the session did, unless recording is
// switched off for benchmarks.

use super::backend::DisplayBackend;
use super::config::SessionConfig;
use super::error::{DisplayError, DisplayInitError};
use super::event::Event;
use super::surface::Surface;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// A call made on the headless backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCall {
    /// `initialize` was called
    Initialize,
    /// `poll_event` returned an event
    Poll(Event),
    /// `poll_event` found nothing pending
    PollEmpty,
    /// `present` was called
    Present,
    /// `shutdown` was called
    Shutdown,
}

#[derive(Debug, Default)]
struct Record {
    calls: Vec<BackendCall>,
    last_frame: Option<Vec<u8>>,
}

/// Read-only view of what a headless backend has seen
///
/// Stays valid after the backend itself has been dropped.
#[derive(Debug, Clone)]
pub struct HeadlessProbe {
    record: Rc<RefCell<Record>>,
}

impl HeadlessProbe {
    /// Every call in order
    pub fn calls(&self) -> Vec<BackendCall> {
        self.record.borrow().calls.clone()
    }

    /// Number of calls equal to `call`
    pub fn count(&self, call: BackendCall) -> usize {
        self.record
            .borrow()
            .calls
            .iter()
            .filter(|&&c| c == call)
            .count()
    }

    /// Number of presented frames
    pub fn present_count(&self) -> usize {
        self.count(BackendCall::Present)
    }

    /// Number of shutdowns
    pub fn shutdown_count(&self) -> usize {
        self.count(BackendCall::Shutdown)
    }

    /// RGBA contents of the last presented frame
    pub fn last_frame(&self) -> Option<Vec<u8>> {
        self.record.borrow().last_frame.clone()
    }
}

/// Display backend driven by a script instead of a window
pub struct HeadlessBackend {
    script: VecDeque<Vec<Event>>,
    pending: VecDeque<Event>,
    quit_after_script: bool,
    fail_init: bool,
    fail_present_at: Option<usize>,
    presents: usize,
    recording: bool,
    record: Rc<RefCell<Record>>,
}

impl HeadlessBackend {
    /// Create a backend with an empty script
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            pending: VecDeque::new(),
            quit_after_script: false,
            fail_init: false,
            fail_present_at: None,
            presents: 0,
            recording: true,
            record: Rc::new(RefCell::new(Record::default())),
        }
    }

    /// Add the events pending during the next scripted frame
    pub fn with_frame<I: IntoIterator<Item = Event>>(mut self, events: I) -> Self {
        self.script.push_back(events.into_iter().collect());
        self
    }

    /// Deliver a quit event once the script runs out
    pub fn quit_after_script(mut self) -> Self {
        self.quit_after_script = true;
        self
    }

    /// Make `initialize` fail
    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// Make the n-th present (1-based) fail
    pub fn failing_present_at(mut self, frame: usize) -> Self {
        self.fail_present_at = Some(frame);
        self
    }

    /// Stop recording calls and presented frames
    ///
    /// Probes of such a backend stay empty.
    pub fn without_recording(mut self) -> Self {
        self.recording = false;
        self
    }

    /// Get a probe for inspecting recorded calls
    pub fn probe(&self) -> HeadlessProbe {
        HeadlessProbe {
            record: Rc::clone(&self.record),
        }
    }

    fn log(&self, call: BackendCall) {
        if self.recording {
            self.record.borrow_mut().calls.push(call);
        }
    }

    fn load_next_frame(&mut self) {
        match self.script.pop_front() {
            Some(events) => self.pending.extend(events),
            None if self.quit_after_script => self.pending.push_back(Event::Quit),
            None => {}
        }
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayBackend for HeadlessBackend {
    fn initialize(&mut self, _config: &SessionConfig) -> Result<(), DisplayInitError> {
        self.log(BackendCall::Initialize);

        if self.fail_init {
            return Err(DisplayInitError::SurfaceUnavailable);
        }

        self.load_next_frame();
        Ok(())
    }

    fn poll_event(&mut self) -> Option<Event> {
        let event = self.pending.pop_front();
        self.log(event.map_or(BackendCall::PollEmpty, BackendCall::Poll));
        event
    }

    fn present(&mut self, surface: &Surface) -> Result<(), DisplayError> {
        self.log(BackendCall::Present);
        self.presents += 1;

        if self.fail_present_at == Some(self.presents) {
            return Err(DisplayError::Backend(format!(
                "present {} failed",
                self.presents
            )));
        }

        if self.recording {
            self.record.borrow_mut().last_frame = Some(surface.as_slice().to_vec());
        }
        self.load_next_frame();
        Ok(())
    }

    fn shutdown(&mut self) {
        self.log(BackendCall::Shutdown);
        self.pending.clear();
        self.script.clear();
    }
}
