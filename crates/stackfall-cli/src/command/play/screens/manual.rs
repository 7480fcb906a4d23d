use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Text,
};
use stackfall_engine::{GameLoop, GameSession, Input, SessionState};

use crate::{
    tui::Tui,
    ui::widgets::{SessionDisplay, style},
};

#[derive(Debug)]
pub struct ManualPlayScreen {
    game: GameLoop,
    is_exiting: bool,
}

impl ManualPlayScreen {
    pub fn new(session: GameSession) -> Self {
        Self {
            game: GameLoop::new(session),
            is_exiting: false,
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let session = self.game.session();
        let session_display = SessionDisplay::new(session, true);
        let help_text = match session.session_state() {
            SessionState::Running => {
                "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ (Rotate) | Space (Hard Drop) | C (Hold) | P (Pause) | Q (Quit)"
            }
            SessionState::Paused => "Controls: P (Resume) | Q (Quit)",
            SessionState::Idle | SessionState::GameOver => "Controls: Enter (Start) | Q (Quit)",
        };
        let help_text = Text::from(help_text).style(style::HELP).centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(25), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    pub fn handle_event(&mut self, tui: &mut Tui, event: &Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };
        let input = match event.code {
            KeyCode::Left => Input::MoveLeft,
            KeyCode::Right => Input::MoveRight,
            KeyCode::Down => Input::SoftDrop,
            KeyCode::Up => Input::Rotate,
            KeyCode::Char(' ') => Input::HardDrop,
            KeyCode::Char('c') => Input::Hold,
            KeyCode::Char('p') => Input::TogglePause,
            KeyCode::Enter | KeyCode::Char('r') if !self.is_running_or_paused() => Input::Start,
            KeyCode::Char('q') => {
                self.is_exiting = true;
                return;
            }
            _ => return,
        };
        self.game.handle_input(input, tui);
    }

    pub fn update(&mut self, tui: &mut Tui) {
        self.game.tick(tui);
    }

    fn is_running_or_paused(&self) -> bool {
        let state = self.game.session().session_state();
        state.is_running() || state.is_paused()
    }
}
