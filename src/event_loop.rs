use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// The single place that polls input. Each poll timeout becomes a tick
/// (`None`), which the desktop uses for drawing, the clock and background
/// results.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Run until the handler returns [`ControlFlow::Quit`]. The handler sees
    /// `None` once per iteration and `Some(event)` for every queued event.
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if handler(&mut self.driver, None)? == ControlFlow::Quit {
                return Ok(());
            }
            if !self.driver.poll(self.poll_interval)? {
                continue;
            }
            // Drain bursts (drags, wheel) before the next draw.
            loop {
                let event = self.driver.read()?;
                if handler(&mut self.driver, Some(event))? == ControlFlow::Quit {
                    return Ok(());
                }
                if !self.driver.poll(Duration::ZERO)? {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::ScriptedDriver;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn ticks_between_events_and_stops_on_quit() {
        let driver = ScriptedDriver::new(vec![
            Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)),
            Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)),
        ]);
        let mut seen = Vec::new();
        let mut event_loop = EventLoop::new(driver, Duration::ZERO);
        event_loop
            .run(|_, event| {
                let quit = matches!(
                    &event,
                    Some(Event::Key(key)) if key.modifiers == KeyModifiers::CONTROL
                );
                seen.push(event.is_some());
                Ok(if quit { ControlFlow::Quit } else { ControlFlow::Continue })
            })
            .unwrap();
        assert_eq!(seen, vec![false, true, true]);
    }
}
