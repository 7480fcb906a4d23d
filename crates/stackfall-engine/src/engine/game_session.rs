use crate::{
    HoldError,
    core::{
        board::Board,
        piece::{FallingPiece, PieceKind},
    },
};

use super::{
    game_stats::GameStats,
    piece_source::{PieceSeed, PieceSource, RandomPieceSource},
};

/// Lifecycle of a session.
///
/// `Idle → Running → {Paused ⇄ Running} → GameOver`. Only [`GameSession::start`]
/// leaves `Idle` or `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Idle,
    Running,
    Paused,
    GameOver,
}

/// A single game: the board, the piece under control, the preview and hold
/// slots, and the statistics.
///
/// The session exclusively owns its state. Movement, rotation, hold and drops
/// do nothing unless the session is [`SessionState::Running`], so a paused or
/// finished game cannot progress. Invalid moves are reverted silently and
/// reported only through the `bool` they return.
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    falling_piece: Option<FallingPiece>,
    next_piece: Option<PieceKind>,
    held_piece: Option<PieceKind>,
    can_hold: bool,
    stats: GameStats,
    session_state: SessionState,
    piece_source: Box<dyn PieceSource>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates an idle session drawing pieces from a randomly seeded source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_piece_source(RandomPieceSource::new())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_piece_source(RandomPieceSource::with_seed(seed))
    }

    #[must_use]
    pub fn with_piece_source(piece_source: impl PieceSource + 'static) -> Self {
        Self {
            board: Board::EMPTY,
            falling_piece: None,
            next_piece: None,
            held_piece: None,
            can_hold: true,
            stats: GameStats::new(),
            session_state: SessionState::Idle,
            piece_source: Box::new(piece_source),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<&FallingPiece> {
        self.falling_piece.as_ref()
    }

    #[must_use]
    pub fn next_piece(&self) -> Option<PieceKind> {
        self.next_piece
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<PieceKind> {
        self.held_piece
    }

    /// Returns whether hold is still available for the current piece.
    #[must_use]
    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn lines(&self) -> usize {
        self.stats.lines()
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.session_state.is_game_over()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.session_state.is_paused()
    }

    /// Resets the board, pieces, hold slot and statistics, enters
    /// [`SessionState::Running`] and spawns the first piece.
    ///
    /// The piece source keeps its position, so restarting continues the
    /// sequence rather than replaying it.
    pub fn start(&mut self) {
        self.board = Board::EMPTY;
        self.falling_piece = None;
        self.next_piece = None;
        self.held_piece = None;
        self.can_hold = true;
        self.stats = GameStats::new();
        self.session_state = SessionState::Running;
        self.spawn();
    }

    /// Makes the queued next piece the falling piece and queues a new one.
    ///
    /// If the new piece collides at its spawn position the session is over.
    /// This is the only transition into [`SessionState::GameOver`]. Does
    /// nothing unless the session is running.
    pub fn spawn(&mut self) {
        if !self.session_state.is_running() {
            return;
        }
        let kind = self
            .next_piece
            .take()
            .unwrap_or_else(|| self.piece_source.next_kind());
        let piece = FallingPiece::spawn(kind);
        self.next_piece = Some(self.piece_source.next_kind());
        self.falling_piece = Some(piece);
        if self.board.is_colliding(&piece) {
            self.session_state = SessionState::GameOver;
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_update(|piece| piece.shifted(-1, 0))
    }

    pub fn move_right(&mut self) -> bool {
        self.try_update(|piece| piece.shifted(1, 0))
    }

    /// Rotates the falling piece clockwise in place.
    ///
    /// There are no wall kicks: if the rotated shape does not fit at the same
    /// anchor, the piece is left unchanged.
    pub fn rotate(&mut self) -> bool {
        self.try_update(|piece| piece.rotated_clockwise())
    }

    /// Moves the falling piece one row down.
    ///
    /// If the piece cannot move it is locked: the piece is frozen into the
    /// board, full rows are cleared and the next piece spawns. Returns `false`
    /// in that case (and whenever the session is not running).
    pub fn move_down(&mut self) -> bool {
        if self.try_update(|piece| piece.shifted(0, 1)) {
            return true;
        }
        if self.session_state.is_running() && self.falling_piece.is_some() {
            self.freeze();
            self.clear_lines();
            self.spawn();
        }
        false
    }

    /// Drops the falling piece until it locks. Returns the number of rows it fell.
    pub fn hard_drop(&mut self) -> usize {
        let mut rows = 0;
        while self.move_down() {
            rows += 1;
        }
        rows
    }

    /// Swaps the falling piece with the hold slot.
    ///
    /// The first hold stores the falling piece's kind and spawns from the
    /// queue. Later holds bring the held kind back at the spawn position; that
    /// piece is not checked for a spawn collision. Hold is then unavailable
    /// until the next lock.
    pub fn hold(&mut self) -> Result<(), HoldError> {
        if !self.session_state.is_running() {
            return Err(HoldError::NotRunning);
        }
        if !self.can_hold {
            return Err(HoldError::AlreadyUsed);
        }
        let piece = self.falling_piece.ok_or(HoldError::NoFallingPiece)?;

        match self.held_piece.replace(piece.kind()) {
            None => self.spawn(),
            Some(held) => self.falling_piece = Some(FallingPiece::spawn(held)),
        }
        self.can_hold = false;
        Ok(())
    }

    /// Writes the falling piece into the board and discards it.
    ///
    /// Cells above the board are dropped. Makes hold available again.
    pub fn freeze(&mut self) {
        if !self.session_state.is_running() {
            return;
        }
        let Some(piece) = self.falling_piece.take() else {
            return;
        };
        self.board.fill_piece(&piece);
        self.can_hold = true;
        self.stats.record_lock();
    }

    /// Removes full rows and scores them. Returns the number of rows removed.
    pub fn clear_lines(&mut self) -> usize {
        if !self.session_state.is_running() {
            return 0;
        }
        let cleared = self.board.clear_lines();
        self.stats.record_line_clear(cleared);
        cleared
    }

    /// Switches between running and paused. Does nothing when idle or over.
    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Running => SessionState::Paused,
            SessionState::Paused => SessionState::Running,
            state @ (SessionState::Idle | SessionState::GameOver) => state,
        };
    }

    fn try_update(&mut self, f: impl FnOnce(&FallingPiece) -> FallingPiece) -> bool {
        if !self.session_state.is_running() {
            return false;
        }
        let Some(piece) = &self.falling_piece else {
            return false;
        };
        let moved = f(piece);
        if self.board.is_colliding(&moved) {
            return false;
        }
        self.falling_piece = Some(moved);
        true
    }
}
