// Event - Input events seen by the frame loop
//
// Backend events are reduced to the few kinds the session reacts to:
// a quit request, a key press, or anything else.

use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{Key as WinitKey, NamedKey};

/// A pressed key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key
    Escape,
    /// A key producing a character (lowercased)
    Char(char),
    /// Any other key
    Other,
}

impl Key {
    /// Build a key from the text a key press produced
    pub fn from_text(text: &str) -> Self {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Key::Char(c.to_ascii_lowercase()),
            _ => Key::Other,
        }
    }

    /// Check whether this key ends the session
    pub fn is_quit_key(self) -> bool {
        matches!(self, Key::Escape | Key::Char('q'))
    }
}

impl From<&WinitKey> for Key {
    fn from(key: &WinitKey) -> Self {
        match key {
            WinitKey::Named(NamedKey::Escape) => Key::Escape,
            WinitKey::Character(text) => Key::from_text(text),
            _ => Key::Other,
        }
    }
}

/// An input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The user asked to close the display
    Quit,
    /// A key was pressed
    KeyDown(Key),
    /// Anything else
    Other,
}

impl Event {
    /// Check whether this event ends the session
    ///
    /// # Example
    ///
    /// ```
    /// use circle_demo::display::{Event, Key};
    ///
    /// assert!(Event::Quit.requests_quit());
    /// assert!(Event::KeyDown(Key::Char('q')).requests_quit());
    /// assert!(!Event::KeyDown(Key::Char('w')).requests_quit());
    /// ```
    pub fn requests_quit(&self) -> bool {
        match self {
            Event::Quit => true,
            Event::KeyDown(key) => key.is_quit_key(),
            Event::Other => false,
        }
    }

    /// Reduce a window event
    ///
    /// Key repeats and releases are reported as [`Event::Other`].
    pub fn from_window_event(event: &WindowEvent) -> Self {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => Event::Quit,
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => Self::from_key_event(key_event),
            _ => Event::Other,
        }
    }

    fn from_key_event(event: &KeyEvent) -> Self {
        match event.state {
            ElementState::Pressed if !event.repeat => {
                Event::KeyDown(Key::from(&event.logical_key))
            }
            _ => Event::Other,
        }
    }
}
