use std::path::PathBuf;

use serde::Serialize;
use stackfall_autoplay::{AutoPlayer, HeuristicWeights};
use stackfall_engine::{GameSession, GameStats, PieceKind, PieceSeed, SequencePieceSource};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Seed of the piece sequence (32 hex digits); random if omitted
    #[clap(long, conflicts_with = "sequence")]
    seed: Option<PieceSeed>,
    /// Fixed, repeating piece sequence such as "IOTSZJL"
    #[clap(long)]
    sequence: Option<SequencePieceSource>,
    /// Stop after this many pieces have been locked
    #[clap(long, default_value_t = 1000)]
    pieces: usize,
    /// Path to a heuristic weights file (JSON format)
    #[clap(long)]
    weights: Option<PathBuf>,
    /// Output file path (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SimulationSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<PieceSeed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sequence: Option<String>,
    weights: HeuristicWeights,
    turns: usize,
    game_over: bool,
    stats: GameStats,
    board: Vec<String>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        seed,
        sequence,
        pieces,
        weights,
        output,
    } = arg;

    let weights = util::read_weights_file(weights.as_ref())?;
    let (mut session, seed, sequence) = match sequence {
        Some(source) => {
            let kinds = source.kinds().iter().copied().map(PieceKind::as_char).collect();
            (GameSession::with_piece_source(source.clone()), None, Some(kinds))
        }
        None => {
            let seed = seed.unwrap_or_else(rand::random);
            (GameSession::with_seed(seed), Some(seed), None)
        }
    };

    let player = AutoPlayer::with_weights(weights);
    session.start();
    let report = player.play_session(&mut session, *pieces);
    for (turn, fault) in &report.faults {
        eprintln!("turn {turn}: auto-play fault: {fault}");
    }

    let summary = SimulationSummary {
        seed,
        sequence,
        weights,
        turns: report.turns,
        game_over: session.is_game_over(),
        stats: session.stats().clone(),
        board: session.board().to_string().lines().map(str::to_owned).collect(),
    };
    Output::save_json(&summary, output.clone())?;

    Ok(())
}
