use std::time::Duration;

use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::{Line, Text},
};
use stackfall_autoplay::{AutoPlayError, AutoPlayer, HeuristicWeights};
use stackfall_engine::{GameLoop, GameSession, Input, SessionState};

use crate::{
    tui::Tui,
    ui::widgets::{SessionDisplay, style},
};

const TURBO_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug)]
pub struct AutoPlayScreen {
    game: GameLoop,
    player: AutoPlayer,
    turbo: bool,
    last_fault: Option<AutoPlayError>,
    is_exiting: bool,
}

impl AutoPlayScreen {
    pub fn new(session: GameSession, weights: HeuristicWeights, turbo: bool) -> Self {
        let mut game = GameLoop::new(session);
        game.set_tick_interval(turbo.then_some(TURBO_INTERVAL));
        Self {
            game,
            player: AutoPlayer::with_weights(weights),
            turbo,
            last_fault: None,
            is_exiting: false,
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    /// Starts (or restarts) the session with an auto-play turn as its first tick.
    pub fn start(&mut self, tui: &mut Tui) {
        let player = &self.player;
        let mut fault = None;
        self.game.start_with(tui, |session| {
            fault = player.play_turn(session).fault;
        });
        self.last_fault = fault;
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let session = self.game.session();
        let session_display = SessionDisplay::new(session, false).turbo(self.turbo);
        let turbo_text = if self.turbo {
            "T (Turbo: ON)"
        } else {
            "T (Turbo: OFF)"
        };
        let help_text = match session.session_state() {
            SessionState::Running => format!("Controls: {turbo_text} | P (Pause) | Q (Quit)"),
            SessionState::Paused => "Controls: P (Resume) | Q (Quit)".to_owned(),
            SessionState::Idle | SessionState::GameOver => {
                "Controls: R (Restart) | Q (Quit)".to_owned()
            }
        };
        let help_text = Text::from(help_text).style(style::HELP).centered();
        let fault_line = self
            .last_fault
            .map(|fault| Line::styled(format!("auto-play fault: {fault}"), style::FAULT))
            .unwrap_or_default()
            .centered();

        let [main_area, help_area, fault_area] = Layout::vertical([
            Constraint::Length(25),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas::<3>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
        frame.render_widget(fault_line, fault_area);
    }

    pub fn handle_event(&mut self, tui: &mut Tui, event: &Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };
        let state = self.game.session().session_state();
        match event.code {
            KeyCode::Char('t') => {
                self.turbo = !self.turbo;
                self.game
                    .set_tick_interval(self.turbo.then_some(TURBO_INTERVAL));
            }
            KeyCode::Char('p') => self.game.handle_input(Input::TogglePause, tui),
            KeyCode::Char('r') | KeyCode::Enter if state.is_game_over() || state.is_idle() => {
                self.start(tui);
            }
            KeyCode::Char('q') => self.is_exiting = true,
            _ => {}
        }
    }

    /// Plays one piece per tick in place of gravity.
    pub fn update(&mut self, tui: &mut Tui) {
        let player = &self.player;
        let mut fault = None;
        self.game.tick_with(tui, |session| {
            fault = player.play_turn(session).fault;
        });
        if fault.is_some() {
            self.last_fault = fault;
        }
    }
}
