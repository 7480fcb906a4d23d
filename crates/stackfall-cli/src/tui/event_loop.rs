use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Ticks are one-shot: a tick fires once when its deadline passes and is not
/// repeated until the application schedules another. Renders happen after
/// something marked the screen dirty.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_deadline: Option<Instant>,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        Self {
            tick_deadline: None,
            dirty: true, // Initial render is required on startup
        }
    }

    /// Arms the tick timer to fire once after `delay`, replacing any pending tick.
    pub(super) fn schedule_tick(&mut self, delay: Duration) {
        self.tick_deadline = Some(Instant::now() + delay);
    }

    pub(super) fn cancel_tick(&mut self) {
        self.tick_deadline = None;
    }

    pub(super) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns the next event.
    ///
    /// Blocks until the tick deadline is reached or a crossterm event occurs.
    /// Without a pending tick, only waits for crossterm events.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(deadline) = self.tick_deadline
                && now >= deadline
            {
                self.tick_deadline = None;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(deadline) = self.tick_deadline
                && !event::poll(deadline.saturating_duration_since(now))?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_is_render() {
        let mut events = EventLoop::new();
        assert!(matches!(events.next().unwrap(), TuiEvent::Render));
    }

    #[test]
    fn test_due_tick_fires_once() {
        let mut events = EventLoop::new();
        events.schedule_tick(Duration::ZERO);
        assert!(matches!(events.next().unwrap(), TuiEvent::Tick));
        assert!(matches!(events.next().unwrap(), TuiEvent::Render));
        assert_eq!(events.tick_deadline, None);
    }

    #[test]
    fn test_cancel_and_reschedule() {
        let mut events = EventLoop::new();
        events.schedule_tick(Duration::from_secs(60));
        events.schedule_tick(Duration::ZERO);
        events.cancel_tick();
        assert_eq!(events.tick_deadline, None);

        events.schedule_tick(Duration::ZERO);
        events.mark_dirty();
        // a due tick takes priority over a pending render
        assert!(matches!(events.next().unwrap(), TuiEvent::Tick));
    }
}
