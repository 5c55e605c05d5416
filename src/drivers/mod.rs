pub mod console;
pub mod keyboard;

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::Event;

pub use console::{ConsoleInputDriver, ConsoleOutputDriver};
pub use keyboard::KeyboardNormalizer;

pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }
}

/// Replays a fixed list of events; `read` past the end is an error.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    events: VecDeque<Event>,
    mouse_capture: Vec<bool>,
}

impl ScriptedDriver {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into(),
            mouse_capture: Vec::new(),
        }
    }

    /// Every value passed to `set_mouse_capture`, in order.
    pub fn mouse_capture_calls(&self) -> &[bool] {
        &self.mouse_capture
    }
}

impl InputDriver for ScriptedDriver {
    fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> io::Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        self.mouse_capture.push(enabled);
        Ok(())
    }
}
