//! Heuristic auto-player for stackfall sessions.
//!
//! For the falling piece, every rotation and column is dropped onto a copy of
//! the board ([`simulate_drop`]), the resulting board is scored by a
//! [`PlacementEvaluator`], and the [`AutoPlayer`] drives the session to the
//! best placement.

pub use self::{auto_player::*, board_analysis::*, placement::*, placement_evaluator::*};

mod auto_player;
mod board_analysis;
mod placement;
mod placement_evaluator;
