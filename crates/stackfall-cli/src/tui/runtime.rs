use std::time::Duration;

use stackfall_engine::{GameSession, Renderer, TickScheduler};

use crate::tui::{App, event::TuiEvent, event_loop::EventLoop};

/// TUI application runtime.
///
/// Owns the event loop and serves as the game loop's host: scheduled ticks
/// become `TuiEvent::Tick`s, and render requests mark the frame dirty so it is
/// redrawn before the next input is read.
#[derive(Default, Debug)]
pub struct Tui {
    events: EventLoop,
}

impl Tui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Runs the event loop until `app.should_exit()` returns true
    ///    - `TuiEvent::Tick`: calls `app.update()`
    ///    - `TuiEvent::Render`: calls `app.draw()`
    ///    - `TuiEvent::Crossterm`: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => {
                        app.update(&mut self);
                    }
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => {
                        app.handle_event(&mut self, event);
                    }
                }
            }
            Ok(())
        })
    }
}

impl TickScheduler for Tui {
    fn schedule_tick(&mut self, delay: Duration) {
        self.events.schedule_tick(delay);
    }

    fn cancel_tick(&mut self) {
        self.events.cancel_tick();
    }
}

impl Renderer for Tui {
    fn render(&mut self, _session: &GameSession) {
        self.events.mark_dirty();
    }
}
