use crossterm::event::Event;
use ratatui::Frame;
use stackfall_autoplay::HeuristicWeights;
use stackfall_engine::PieceSeed;

use crate::{
    command::play::screens::Screen,
    tui::{App, Tui},
};

#[derive(Debug)]
pub struct PlayApp {
    screen: Screen,
}

impl PlayApp {
    pub fn manual(seed: Option<PieceSeed>) -> Self {
        Self {
            screen: Screen::manual(seed),
        }
    }

    pub fn auto(weights: HeuristicWeights, seed: Option<PieceSeed>, turbo: bool) -> Self {
        Self {
            screen: Screen::auto(weights, seed, turbo),
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        self.screen.init(tui);
    }

    fn should_exit(&self) -> bool {
        self.screen.should_exit()
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        self.screen.handle_event(tui, &event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, tui: &mut Tui) {
        self.screen.update(tui);
    }
}
