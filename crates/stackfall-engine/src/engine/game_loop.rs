use std::time::Duration;

use super::game_session::GameSession;

/// One-shot timer the loop uses to request its next tick.
///
/// A host implements this on top of its event loop (or a test double). When a
/// scheduled tick fires the host calls [`GameLoop::tick`] (or
/// [`GameLoop::tick_with`]) exactly once.
pub trait TickScheduler {
    /// Requests a single tick after `delay`.
    fn schedule_tick(&mut self, delay: Duration);
    /// Cancels the pending tick, if any.
    fn cancel_tick(&mut self);
}

/// Presentation collaborator called after every state change.
pub trait Renderer {
    fn render(&mut self, session: &GameSession);
}

/// Host-side input events understood by the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    Hold,
    TogglePause,
    Start,
}

/// Tick-driven driver of a [`GameSession`].
///
/// Ticks are chained, not periodic: each tick schedules the next one after
/// the session's drop interval once it has finished, so a slow frame delays
/// the following tick but never queues a second one. At most one tick is
/// pending at any time.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use stackfall_engine::{GameLoop, GameSession, Renderer, TickScheduler};
///
/// #[derive(Default)]
/// struct Host {
///     pending: Option<Duration>,
/// }
///
/// impl TickScheduler for Host {
///     fn schedule_tick(&mut self, delay: Duration) {
///         self.pending = Some(delay);
///     }
///     fn cancel_tick(&mut self) {
///         self.pending = None;
///     }
/// }
///
/// impl Renderer for Host {
///     fn render(&mut self, _session: &GameSession) {}
/// }
///
/// let mut host = Host::default();
/// let mut game = GameLoop::new(GameSession::new());
/// game.start(&mut host);
/// assert_eq!(host.pending, Some(Duration::from_millis(1000)));
///
/// // the host's timer fired
/// host.pending = None;
/// game.tick(&mut host);
/// assert!(host.pending.is_some());
/// ```
#[derive(Debug)]
pub struct GameLoop {
    session: GameSession,
    tick_interval: Option<Duration>,
    tick_pending: bool,
}

impl GameLoop {
    #[must_use]
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            tick_interval: None,
            tick_pending: false,
        }
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Fixed delay between ticks, or `None` to follow the level's drop interval.
    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        self.tick_interval
    }

    /// Overrides the delay between ticks. Takes effect from the next scheduled tick.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
    }

    #[must_use]
    pub fn is_tick_pending(&self) -> bool {
        self.tick_pending
    }

    /// Delay the next tick will be scheduled with.
    #[must_use]
    pub fn next_tick_delay(&self) -> Duration {
        self.tick_interval
            .unwrap_or_else(|| self.session.stats().drop_interval())
    }

    /// Starts (or restarts) the session and runs its first tick immediately.
    pub fn start<H>(&mut self, host: &mut H)
    where
        H: TickScheduler + Renderer,
    {
        self.start_with(host, |session| {
            session.move_down();
        });
    }

    /// Like [`GameLoop::start`], with `step` as the first tick's action.
    pub fn start_with<H, F>(&mut self, host: &mut H, step: F)
    where
        H: TickScheduler + Renderer,
        F: FnOnce(&mut GameSession),
    {
        self.cancel_pending(host);
        self.session.start();
        self.tick_with(host, step);
    }

    /// Runs one gravity step.
    pub fn tick<H>(&mut self, host: &mut H)
    where
        H: TickScheduler + Renderer,
    {
        self.tick_with(host, |session| {
            session.move_down();
        });
    }

    /// Runs `step` as this tick's action instead of gravity.
    ///
    /// The call consumes the pending tick, cancelling it at the host if it has
    /// not fired yet. When the session is not running
    /// nothing happens and no tick is scheduled; otherwise the session is
    /// rendered and, unless the step ended the game, the next tick is scheduled.
    pub fn tick_with<H, F>(&mut self, host: &mut H, step: F)
    where
        H: TickScheduler + Renderer,
        F: FnOnce(&mut GameSession),
    {
        self.cancel_pending(host);
        if !self.session.session_state().is_running() {
            return;
        }
        step(&mut self.session);
        host.render(&self.session);
        if self.session.session_state().is_running() {
            self.schedule_next(host);
        }
    }

    /// Pauses or resumes the session.
    ///
    /// Pausing cancels the pending tick. Resuming schedules a fresh one; a
    /// tick that would have fired during the pause is not replayed.
    pub fn toggle_pause<H>(&mut self, host: &mut H)
    where
        H: TickScheduler + Renderer,
    {
        self.session.toggle_pause();
        match self.session.session_state() {
            state if state.is_paused() => self.cancel_pending(host),
            state if state.is_running() => self.schedule_next(host),
            _ => {}
        }
        host.render(&self.session);
    }

    /// Applies a host input to the session and re-renders.
    ///
    /// Gameplay inputs do nothing unless the session is running. Rejected
    /// holds are ignored.
    pub fn handle_input<H>(&mut self, input: Input, host: &mut H)
    where
        H: TickScheduler + Renderer,
    {
        match input {
            Input::MoveLeft => {
                self.session.move_left();
            }
            Input::MoveRight => {
                self.session.move_right();
            }
            Input::SoftDrop => {
                self.session.move_down();
            }
            Input::Rotate => {
                self.session.rotate();
            }
            Input::HardDrop => {
                self.session.hard_drop();
            }
            Input::Hold => {
                let _ = self.session.hold();
            }
            Input::TogglePause => return self.toggle_pause(host),
            Input::Start => return self.start(host),
        }
        if !self.session.session_state().is_running() {
            self.cancel_pending(host);
        }
        host.render(&self.session);
    }

    fn schedule_next<H: TickScheduler>(&mut self, host: &mut H) {
        self.cancel_pending(host);
        host.schedule_tick(self.next_tick_delay());
        self.tick_pending = true;
    }

    fn cancel_pending<H: TickScheduler>(&mut self, host: &mut H) {
        if self.tick_pending {
            host.cancel_tick();
            self.tick_pending = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PieceKind, SequencePieceSource};

    #[derive(Debug, Default)]
    struct RecordingHost {
        pending: Option<Duration>,
        scheduled: Vec<Duration>,
        cancels: usize,
        renders: usize,
    }

    impl TickScheduler for RecordingHost {
        fn schedule_tick(&mut self, delay: Duration) {
            assert!(self.pending.is_none(), "tick scheduled twice");
            self.pending = Some(delay);
            self.scheduled.push(delay);
        }

        fn cancel_tick(&mut self) {
            self.pending = None;
            self.cancels += 1;
        }
    }

    impl Renderer for RecordingHost {
        fn render(&mut self, _session: &GameSession) {
            self.renders += 1;
        }
    }

    impl RecordingHost {
        fn fire(&mut self, game: &mut GameLoop) -> bool {
            if self.pending.take().is_none() {
                return false;
            }
            game.tick(self);
            true
        }
    }

    fn game(sequence: &str) -> GameLoop {
        let source: SequencePieceSource = sequence.parse().unwrap();
        GameLoop::new(GameSession::with_piece_source(source))
    }

    #[test]
    fn test_start_runs_first_tick() {
        let mut host = RecordingHost::default();
        let mut game = game("T");
        game.start(&mut host);

        let piece = game.session().falling_piece().unwrap();
        assert_eq!(piece.y(), 1);
        assert_eq!(host.renders, 1);
        assert_eq!(host.scheduled, [Duration::from_millis(1000)]);
        assert!(game.is_tick_pending());
    }

    #[test]
    fn test_ticks_chain_one_at_a_time() {
        let mut host = RecordingHost::default();
        let mut game = game("T");
        game.start(&mut host);
        for _ in 0..10 {
            assert!(host.fire(&mut game));
        }
        assert_eq!(game.session().falling_piece().unwrap().y(), 11);
        assert_eq!(host.scheduled.len(), 11);
        assert!(host.pending.is_some());
    }

    #[test]
    fn test_early_tick_replaces_pending_tick() {
        let mut host = RecordingHost::default();
        let mut game = game("T");
        game.start(&mut host);
        assert!(host.pending.is_some());

        game.tick(&mut host);
        assert_eq!(game.session().falling_piece().unwrap().y(), 2);
        assert_eq!(host.scheduled.len(), 2);
        assert_eq!(host.cancels, 1);
        assert!(host.pending.is_some());
        assert!(game.is_tick_pending());
    }

    #[test]
    fn test_start_with_custom_first_step() {
        let mut host = RecordingHost::default();
        let mut game = game("IO");
        game.start_with(&mut host, |session| {
            session.hard_drop();
        });
        assert_eq!(game.session().stats().completed_pieces(), 1);
        let piece = game.session().falling_piece().unwrap();
        assert_eq!((piece.kind(), piece.y()), (PieceKind::O, 0));
        assert_eq!(host.scheduled, [Duration::from_millis(1000)]);
    }

    #[test]
    fn test_tick_without_session_does_nothing() {
        let mut host = RecordingHost::default();
        let mut game = game("T");
        game.tick(&mut host);
        assert_eq!(host.renders, 0);
        assert!(host.scheduled.is_empty());
    }

    #[test]
    fn test_pause_cancels_and_resume_reschedules() {
        let mut host = RecordingHost::default();
        let mut game = game("T");
        game.start(&mut host);

        game.toggle_pause(&mut host);
        assert!(game.session().is_paused());
        assert_eq!(host.pending, None);
        assert_eq!(host.cancels, 1);
        assert!(!host.fire(&mut game));

        let y = game.session().falling_piece().unwrap().y();
        game.toggle_pause(&mut host);
        assert_eq!(host.pending, Some(Duration::from_millis(1000)));
        // nothing was replayed on resume
        assert_eq!(game.session().falling_piece().unwrap().y(), y);
        assert!(host.fire(&mut game));
        assert_eq!(game.session().falling_piece().unwrap().y(), y + 1);
    }

    #[test]
    fn test_inputs_render_and_move() {
        let mut host = RecordingHost::default();
        let mut game = game("I");
        game.start(&mut host);
        let renders = host.renders;

        game.handle_input(Input::MoveLeft, &mut host);
        game.handle_input(Input::Rotate, &mut host);
        game.handle_input(Input::SoftDrop, &mut host);
        game.handle_input(Input::Hold, &mut host);
        game.handle_input(Input::Hold, &mut host);
        assert_eq!(host.renders, renders + 5);
        assert_eq!(game.session().held_piece(), Some(PieceKind::I));
        // still exactly one pending tick
        assert!(host.pending.is_some());
    }

    #[test]
    fn test_inputs_ignored_while_paused() {
        let mut host = RecordingHost::default();
        let mut game = game("O");
        game.start(&mut host);
        game.handle_input(Input::TogglePause, &mut host);
        let before = *game.session().falling_piece().unwrap();

        game.handle_input(Input::MoveLeft, &mut host);
        game.handle_input(Input::HardDrop, &mut host);
        assert_eq!(game.session().falling_piece(), Some(&before));
        assert_eq!(host.pending, None);
    }

    #[test]
    fn test_hard_drop_keeps_single_pending_tick() {
        let mut host = RecordingHost::default();
        let mut game = game("IOT");
        game.start(&mut host);
        game.handle_input(Input::HardDrop, &mut host);
        assert_eq!(game.session().stats().completed_pieces(), 1);
        assert!(host.fire(&mut game));
        assert!(host.pending.is_some());
    }

    #[test]
    fn test_game_over_stops_ticking() {
        let mut host = RecordingHost::default();
        let mut game = game("O");
        game.start(&mut host);
        while !game.session().is_game_over() {
            game.handle_input(Input::HardDrop, &mut host);
        }
        assert_eq!(host.pending, None);
        assert!(!game.is_tick_pending());

        // restart re-arms the loop
        game.handle_input(Input::Start, &mut host);
        assert!(game.session().session_state().is_running());
        assert!(host.pending.is_some());
    }

    #[test]
    fn test_fixed_interval_override() {
        let mut host = RecordingHost::default();
        let mut game = game("T");
        game.set_tick_interval(Some(Duration::from_millis(20)));
        game.start(&mut host);
        assert_eq!(host.pending, Some(Duration::from_millis(20)));

        game.set_tick_interval(None);
        assert!(host.fire(&mut game));
        assert_eq!(host.pending, Some(Duration::from_millis(1000)));
    }

    #[test]
    fn test_tick_with_custom_step() {
        let mut host = RecordingHost::default();
        let mut game = game("IO");
        game.start(&mut host);
        host.pending = None;
        game.tick_with(&mut host, |session| {
            session.hard_drop();
        });
        assert_eq!(game.session().stats().completed_pieces(), 1);
        assert!(host.pending.is_some());
    }
}
