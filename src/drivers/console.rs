use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::InputDriver;
use super::keyboard::KeyboardNormalizer;

/// Reads crossterm events from the controlling terminal.
#[derive(Debug, Default)]
pub struct ConsoleInputDriver {
    normalizer: KeyboardNormalizer,
}

impl ConsoleInputDriver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputDriver for ConsoleInputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        loop {
            if let Some(event) = self.normalizer.normalize(crossterm::event::read()?) {
                return Ok(event);
            }
        }
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            execute!(io::stdout(), EnableMouseCapture)
        } else {
            execute!(io::stdout(), DisableMouseCapture)
        }
    }
}

/// Owns the alternate screen and raw mode; both are restored on `exit` and
/// on drop, so a panic unwinding through the runner leaves a usable shell.
pub struct ConsoleOutputDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    entered: bool,
}

impl ConsoleOutputDriver {
    pub fn new() -> io::Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self {
            terminal,
            entered: false,
        })
    }

    pub fn enter(&mut self) -> io::Result<()> {
        if self.entered {
            return Ok(());
        }
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        self.entered = true;
        Ok(())
    }

    pub fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for ConsoleOutputDriver {
    fn drop(&mut self) {
        if let Err(err) = self.exit() {
            tracing::warn!(error = %err, "failed to restore the terminal");
        }
    }
}
