// Backend - Boundary between the session and the display subsystem
//
// A backend owns the platform side of a session: the event source and the
// presentation target. Every call that can fail returns a Result.

use super::config::SessionConfig;
use super::error::{DisplayError, DisplayInitError};
use super::event::Event;
use super::surface::Surface;

/// Display subsystem used by a session
pub trait DisplayBackend {
    /// Bring up the subsystem and a presentation target matching `config`
    ///
    /// On failure the backend may hold partially acquired resources;
    /// [`DisplayBackend::shutdown`] releases them.
    fn initialize(&mut self, config: &SessionConfig) -> Result<(), DisplayInitError>;

    /// Take the next pending event without blocking
    ///
    /// Returns `None` once no events are pending. The next call starts a
    /// new poll cycle.
    fn poll_event(&mut self) -> Option<Event>;

    /// Make the surface contents visible
    fn present(&mut self, surface: &Surface) -> Result<(), DisplayError>;

    /// Release everything acquired by `initialize`
    fn shutdown(&mut self);
}

/// Lazy sequence of the events pending in one poll cycle
pub struct PollEvents<'a, B: DisplayBackend + ?Sized> {
    backend: &'a mut B,
    done: bool,
}

impl<'a, B: DisplayBackend + ?Sized> PollEvents<'a, B> {
    /// Start a poll cycle on a backend
    pub fn new(backend: &'a mut B) -> Self {
        Self {
            backend,
            done: false,
        }
    }
}

impl<B: DisplayBackend + ?Sized> Iterator for PollEvents<'_, B> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        if self.done {
            return None;
        }

        let event = self.backend.poll_event();
        self.done = event.is_none();
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::event::Key;

    /// Backend that hands out a fixed list of events
    struct ListBackend {
        events: Vec<Event>,
        polls: usize,
    }

    impl DisplayBackend for ListBackend {
        fn initialize(&mut self, _config: &SessionConfig) -> Result<(), DisplayInitError> {
            Ok(())
        }

        fn poll_event(&mut self) -> Option<Event> {
            self.polls += 1;
            if self.events.is_empty() {
                None
            } else {
                Some(self.events.remove(0))
            }
        }

        fn present(&mut self, _surface: &Surface) -> Result<(), DisplayError> {
            Ok(())
        }

        fn shutdown(&mut self) {}
    }

    #[test]
    fn test_poll_events_drains_in_order() {
        let mut backend = ListBackend {
            events: vec![Event::Other, Event::KeyDown(Key::Char('a')), Event::Quit],
            polls: 0,
        };

        let events: Vec<Event> = PollEvents::new(&mut backend).collect();
        assert_eq!(
            events,
            vec![Event::Other, Event::KeyDown(Key::Char('a')), Event::Quit]
        );
        assert_eq!(backend.polls, 4);
    }

    #[test]
    fn test_poll_events_stops_at_first_empty_poll() {
        let mut backend = ListBackend {
            events: Vec::new(),
            polls: 0,
        };

        let mut events = PollEvents::new(&mut backend);
        assert_eq!(events.next(), None);
        assert_eq!(events.next(), None);
        assert_eq!(backend.polls, 1);
    }
}
