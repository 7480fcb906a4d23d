use std::fmt;

use serde::{Deserialize, Serialize};
use stackfall_engine::Board;

use crate::BoardAnalysis;

/// Scores the board a placement would produce. Higher is better.
pub trait PlacementEvaluator: fmt::Debug {
    fn evaluate_placement(&self, board: &Board) -> f32;
}

/// Penalty weights of the [`HeuristicEvaluator`].
///
/// Deserializable from JSON; missing fields keep their default value:
///
/// ```
/// use stackfall_autoplay::HeuristicWeights;
///
/// let weights: HeuristicWeights = serde_json::from_str(r#"{ "holes": 4.0 }"#).unwrap();
/// assert_eq!(weights.holes, 4.0);
/// assert_eq!(weights.bumpiness, HeuristicWeights::DEFAULT.bumpiness);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeuristicWeights {
    /// Per unit of height difference between adjacent columns.
    pub bumpiness: f32,
    /// Per covered empty cell.
    pub holes: f32,
    /// Per row of the tallest column.
    pub max_height: f32,
}

impl HeuristicWeights {
    pub const DEFAULT: Self = Self {
        bumpiness: 2.0,
        holes: 10.0,
        max_height: 1.5,
    };
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Linear penalty over bumpiness, hole count and maximum column height.
#[derive(Debug, Clone, Default)]
pub struct HeuristicEvaluator {
    weights: HeuristicWeights,
}

impl HeuristicEvaluator {
    #[must_use]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }
}

impl PlacementEvaluator for HeuristicEvaluator {
    #[inline]
    #[expect(clippy::cast_precision_loss)]
    fn evaluate_placement(&self, board: &Board) -> f32 {
        let analysis = BoardAnalysis::from_board(board);
        let w = &self.weights;
        -w.bumpiness * analysis.bumpiness() as f32
            - w.holes * analysis.num_holes() as f32
            - w.max_height * analysis.max_height() as f32
    }
}
