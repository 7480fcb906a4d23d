//! Game engine logic and state management.
//!
//! This module orchestrates the core data structures into a playable game:
//!
//! - [`GameSession`] - Board, falling/next/held pieces, statistics and the session state machine
//! - [`GameStats`] - Score, level and line-clear statistics
//! - [`PieceSource`] - Injectable supplier of piece kinds ([`RandomPieceSource`], [`SequencePieceSource`])
//! - [`GameLoop`] - Tick-driven loop that advances a session through a [`TickScheduler`] and [`Renderer`]
//!
//! # Game Flow
//!
//! 1. [`GameSession::start`] resets the session and spawns the first piece
//! 2. Player or auto-player moves, rotates or holds the falling piece
//! 3. Gravity ([`GameSession::move_down`]) or a hard drop locks the piece
//! 4. Full rows are cleared and scored, the next piece spawns
//! 5. Repeat until a freshly spawned piece collides (game over)
//!
//! # Example
//!
//! ```
//! use stackfall_engine::{GameSession, SequencePieceSource};
//!
//! let source: SequencePieceSource = "IO".parse().unwrap();
//! let mut session = GameSession::with_piece_source(source);
//! session.start();
//!
//! session.move_left();
//! session.rotate();
//! let rows = session.hard_drop();
//!
//! assert!(rows > 0);
//! assert_eq!(session.stats().completed_pieces(), 1);
//! ```

pub use self::{game_loop::*, game_session::*, game_stats::*, piece_source::*};

mod game_loop;
mod game_session;
mod game_stats;
mod piece_source;
