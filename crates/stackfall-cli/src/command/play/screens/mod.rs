use crossterm::event::Event;
use ratatui::Frame;
use stackfall_autoplay::HeuristicWeights;
use stackfall_engine::{GameSession, PieceSeed};

use crate::{
    command::play::screens::{auto::AutoPlayScreen, manual::ManualPlayScreen},
    tui::Tui,
};

mod auto;
mod manual;

#[derive(Debug)]
pub enum Screen {
    Manual(ManualPlayScreen),
    Auto(AutoPlayScreen),
}

impl Screen {
    pub fn manual(seed: Option<PieceSeed>) -> Self {
        Screen::Manual(ManualPlayScreen::new(new_session(seed)))
    }

    pub fn auto(weights: HeuristicWeights, seed: Option<PieceSeed>, turbo: bool) -> Self {
        Screen::Auto(AutoPlayScreen::new(new_session(seed), weights, turbo))
    }

    pub fn init(&mut self, tui: &mut Tui) {
        match self {
            Screen::Manual(_) => {}
            Screen::Auto(screen) => screen.start(tui),
        }
    }

    pub fn should_exit(&self) -> bool {
        match self {
            Screen::Manual(screen) => screen.is_exiting(),
            Screen::Auto(screen) => screen.is_exiting(),
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        match self {
            Screen::Manual(screen) => screen.draw(frame),
            Screen::Auto(screen) => screen.draw(frame),
        }
    }

    pub fn handle_event(&mut self, tui: &mut Tui, event: &Event) {
        match self {
            Screen::Manual(screen) => screen.handle_event(tui, event),
            Screen::Auto(screen) => screen.handle_event(tui, event),
        }
    }

    pub fn update(&mut self, tui: &mut Tui) {
        match self {
            Screen::Manual(screen) => screen.update(tui),
            Screen::Auto(screen) => screen.update(tui),
        }
    }
}

fn new_session(seed: Option<PieceSeed>) -> GameSession {
    seed.map_or_else(GameSession::new, GameSession::with_seed)
}
