use std::io;
use std::time::{Duration, Instant};

use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::desktop::Desktop;
use crate::drivers::InputDriver;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::storage::KeyValueStore;
use crate::ui::UiFrame;

/// Drive `desktop` until it asks to quit: every tick refreshes and redraws,
/// every input event is routed through the desktop controller.
pub fn run_desktop<B, D, S>(
    terminal: &mut Terminal<B>,
    driver: D,
    desktop: &mut Desktop<S>,
    poll_interval: Duration,
) -> io::Result<()>
where
    B: Backend,
    D: InputDriver,
    S: KeyValueStore + Clone,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    desktop.state_mut().take_mouse_capture_change();
    event_loop
        .driver()
        .set_mouse_capture(desktop.state().mouse_capture_enabled())?;

    event_loop.run(|driver, event| {
        let flow = match event {
            Some(event) => desktop.handle_event(&event),
            None => {
                desktop.tick(Instant::now());
                terminal
                    .draw(|frame| desktop.render(&mut UiFrame::new(frame)))
                    .map_err(|err| io::Error::other(err.to_string()))?;
                ControlFlow::Continue
            }
        };
        if let Some(enabled) = desktop.state_mut().take_mouse_capture_change() {
            driver.set_mouse_capture(enabled)?;
        }
        Ok(flow)
    })?;
    tracing::info!("desktop closed");
    Ok(())
}
