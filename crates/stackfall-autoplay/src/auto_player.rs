use std::cmp::Ordering;

use stackfall_engine::{Board, FallingPiece, GameSession};

use crate::{
    HeuristicEvaluator, HeuristicWeights, PlacementEvaluator,
    placement::{self, Placement},
};

/// Fault raised while choosing or executing a placement.
///
/// Faults never abort play: [`AutoPlayer::play_turn`] degrades to a safe
/// action and hands the fault back in its [`TurnReport`].
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum AutoPlayError {
    #[display("session is not running")]
    NotRunning,
    #[display("no falling piece to place")]
    NoFallingPiece,
    #[display("placement (rotation {}, x {}) scored {score}", placement.rotation, placement.x)]
    NonFiniteScore { placement: Placement, score: f32 },
}

/// A chosen placement and its score (`None` for the fallback placement).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub placement: Placement,
    pub score: Option<f32>,
}

impl Decision {
    #[must_use]
    pub const fn fallback() -> Self {
        Self {
            placement: Placement::FALLBACK,
            score: None,
        }
    }

    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.score.is_none()
    }
}

/// Outcome of one [`AutoPlayer::play_turn`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnReport {
    /// The placement that was executed, or `None` if nothing could be moved.
    pub decision: Option<Decision>,
    /// Fault encountered during the turn, for the host to log.
    pub fault: Option<AutoPlayError>,
}

/// Outcome of [`AutoPlayer::play_session`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayReport {
    pub turns: usize,
    /// Faults with the index of the turn they happened in.
    pub faults: Vec<(usize, AutoPlayError)>,
}

/// Plays a session by greedily choosing the best-scoring placement of the
/// falling piece each turn.
#[derive(Debug, Clone)]
pub struct AutoPlayer<E = HeuristicEvaluator> {
    evaluator: E,
}

impl Default for AutoPlayer {
    fn default() -> Self {
        Self::new(HeuristicEvaluator::default())
    }
}

impl AutoPlayer {
    #[must_use]
    pub fn with_weights(weights: HeuristicWeights) -> Self {
        Self::new(HeuristicEvaluator::new(weights))
    }
}

impl<E> AutoPlayer<E>
where
    E: PlacementEvaluator,
{
    #[must_use]
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    #[must_use]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Chooses the placement for the session's falling piece.
    pub fn select_best_placement(&self, session: &GameSession) -> Result<Decision, AutoPlayError> {
        if !session.session_state().is_running() {
            return Err(AutoPlayError::NotRunning);
        }
        let piece = session
            .falling_piece()
            .ok_or(AutoPlayError::NoFallingPiece)?;
        self.select_placement(session.board(), piece)
    }

    /// Chooses the placement of `piece` on `board`.
    ///
    /// The candidate with the strictly greatest score wins, so ties keep the
    /// first candidate in rotation-then-x order. When no candidate fits the
    /// fallback placement is returned.
    pub fn select_placement(
        &self,
        board: &Board,
        piece: &FallingPiece,
    ) -> Result<Decision, AutoPlayError> {
        let mut best: Option<Decision> = None;
        for (placement, candidate) in placement::candidates(piece) {
            let Some(result) = placement::simulate_drop(board, &candidate) else {
                continue;
            };
            let score = self.evaluator.evaluate_placement(&result);
            if !score.is_finite() {
                return Err(AutoPlayError::NonFiniteScore { placement, score });
            }
            let improves = best
                .and_then(|b| b.score)
                .is_none_or(|best_score| score > best_score);
            if improves {
                best = Some(Decision {
                    placement,
                    score: Some(score),
                });
            }
        }
        Ok(best.unwrap_or_else(Decision::fallback))
    }

    /// Decides and executes one placement: rotate, shift toward the target
    /// column, then hard drop.
    ///
    /// A scoring fault degrades the turn to the fallback placement. When the
    /// session is not running or has no falling piece the turn is a no-op.
    pub fn play_turn(&self, session: &mut GameSession) -> TurnReport {
        let (decision, fault) = match self.select_best_placement(session) {
            Ok(decision) => (decision, None),
            Err(fault @ (AutoPlayError::NotRunning | AutoPlayError::NoFallingPiece)) => {
                return TurnReport {
                    decision: None,
                    fault: Some(fault),
                };
            }
            Err(fault) => (Decision::fallback(), Some(fault)),
        };
        execute_placement(session, decision.placement);
        TurnReport {
            decision: Some(decision),
            fault,
        }
    }

    /// Plays until the game is over or `piece_limit` pieces have been locked.
    pub fn play_session(&self, session: &mut GameSession, piece_limit: usize) -> PlayReport {
        let mut report = PlayReport::default();
        while session.session_state().is_running()
            && session.stats().completed_pieces() < piece_limit
        {
            let turn = self.play_turn(session);
            if let Some(fault) = turn.fault {
                report.faults.push((report.turns, fault));
            }
            if turn.decision.is_none() {
                break;
            }
            report.turns += 1;
        }
        report
    }
}

fn execute_placement(session: &mut GameSession, placement: Placement) {
    for _ in 0..placement.rotation {
        session.rotate();
    }
    while let Some(x) = session.falling_piece().map(FallingPiece::x) {
        let moved = match x.cmp(&placement.x) {
            Ordering::Less => session.move_right(),
            Ordering::Greater => session.move_left(),
            Ordering::Equal => break,
        };
        if !moved {
            break;
        }
    }
    session.hard_drop();
}

#[cfg(test)]
mod tests {
    use stackfall_engine::{PieceKind, SequencePieceSource};

    use super::*;

    fn started(sequence: &str) -> GameSession {
        let source: SequencePieceSource = sequence.parse().unwrap();
        let mut session = GameSession::with_piece_source(source);
        session.start();
        session
    }

    #[derive(Debug)]
    struct NanEvaluator;

    impl PlacementEvaluator for NanEvaluator {
        fn evaluate_placement(&self, _board: &Board) -> f32 {
            f32::NAN
        }
    }

    #[test]
    fn test_o_piece_on_empty_board() {
        let player = AutoPlayer::default();
        let session = started("O");
        let decision = player.select_best_placement(&session).unwrap();
        // every x between the walls adds bumpiness on both sides, so the
        // first wall column wins; no rotation improves a symmetric piece
        assert_eq!(decision.placement, Placement { rotation: 0, x: 0 });
        assert_eq!(decision.score, Some(-2.0 * 2.0 - 1.5 * 2.0));
    }

    #[test]
    fn test_i_piece_prefers_flat_placement() {
        let player = AutoPlayer::default();
        let piece = FallingPiece::spawn(PieceKind::I);
        let decision = player.select_placement(&Board::new(), &piece).unwrap();
        assert_eq!(decision.placement, Placement { rotation: 0, x: 0 });
    }

    #[test]
    fn test_avoids_holes_and_keeps_first_tie() {
        let board: Board = ".IIIIIIIII".parse().unwrap();
        let piece = FallingPiece::spawn(PieceKind::I);
        let decision = AutoPlayer::default()
            .select_placement(&board, &piece)
            .unwrap();
        // flat against the right wall beats the vertical fill of column 0;
        // the identical 180° rotation does not replace it
        assert_eq!(decision.placement, Placement { rotation: 0, x: 6 });
    }

    #[test]
    fn test_no_candidate_falls_back() {
        let mut board = Board::new();
        board.fill_row(0, stackfall_engine::Block::Piece(PieceKind::Z));
        let piece = FallingPiece::spawn(PieceKind::T);
        let decision = AutoPlayer::default()
            .select_placement(&board, &piece)
            .unwrap();
        assert!(decision.is_fallback());
        assert_eq!(decision.placement, Placement::FALLBACK);
    }

    #[test]
    fn test_not_running_is_reported() {
        let player = AutoPlayer::default();
        let mut session = GameSession::new();
        assert_eq!(
            player.select_best_placement(&session),
            Err(AutoPlayError::NotRunning)
        );
        let report = player.play_turn(&mut session);
        assert_eq!(report.decision, None);
        assert_eq!(report.fault, Some(AutoPlayError::NotRunning));
        assert!(session.session_state().is_idle());
    }

    #[test]
    fn test_non_finite_score_degrades_to_fallback() {
        let player = AutoPlayer::new(NanEvaluator);
        let mut session = started("OT");
        let report = player.play_turn(&mut session);

        let Some(AutoPlayError::NonFiniteScore { placement, score }) = report.fault else {
            panic!("unexpected fault: {:?}", report.fault);
        };
        assert_eq!(placement, Placement { rotation: 0, x: 0 });
        assert!(score.is_nan());
        assert_eq!(report.decision, Some(Decision::fallback()));
        // the O was still dropped, at the center column
        assert!(session.board().is_occupied(5, 19));
        assert!(session.board().is_occupied(6, 19));
        assert!(session.session_state().is_running());
    }

    #[test]
    fn test_play_turn_executes_decision() {
        let player = AutoPlayer::default();
        let mut session = started("OT");
        let report = player.play_turn(&mut session);
        assert_eq!(report.fault, None);
        assert_eq!(
            report.decision.map(|d| d.placement),
            Some(Placement { rotation: 0, x: 0 })
        );
        assert!(session.board().is_occupied(0, 19));
        assert!(session.board().is_occupied(1, 18));
        assert_eq!(session.stats().completed_pieces(), 1);
        assert_eq!(session.falling_piece().map(FallingPiece::kind), Some(PieceKind::T));
    }

    #[test]
    fn test_play_session_clears_lines_with_o_pieces() {
        let player = AutoPlayer::default();
        let mut session = started("O");
        let report = player.play_session(&mut session, 10);

        assert_eq!(report.turns, 10);
        assert!(report.faults.is_empty());
        assert_eq!(session.stats().completed_pieces(), 10);
        assert_eq!(session.lines(), 4);
        assert_eq!(session.score(), 200);
        assert_eq!(session.board(), &Board::new());
    }

    #[test]
    fn test_play_session_stops_at_game_over() {
        let player = AutoPlayer::default();
        let seed = "0123456789abcdef0123456789abcdef".parse().unwrap();
        let mut session = GameSession::with_seed(seed);
        session.start();
        let report = player.play_session(&mut session, 300);

        assert_eq!(report.turns, session.stats().completed_pieces());
        assert!(report.turns <= 300);
        assert!(report.faults.is_empty());
        assert!(session.is_game_over() || report.turns == 300);
    }
}
