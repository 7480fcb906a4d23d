use crossterm::event::Event;

#[derive(Debug)]
pub(super) enum TuiEvent {
    Tick,
    Render,
    Crossterm(Event),
}

impl From<Event> for TuiEvent {
    fn from(event: Event) -> Self {
        TuiEvent::Crossterm(event)
    }
}
