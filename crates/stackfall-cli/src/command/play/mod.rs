use std::path::PathBuf;

use stackfall_engine::PieceSeed;

use crate::{command::play::app::PlayApp, tui::Tui, util};

mod app;
mod screens;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ManualPlayArg {
    /// Seed of the piece sequence (32 hex digits); random if omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Path to a heuristic weights file (JSON format)
    #[clap(long)]
    weights: Option<PathBuf>,
    /// Start in turbo mode
    #[clap(long, default_value_t = false)]
    turbo: bool,
    /// Seed of the piece sequence (32 hex digits); random if omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
}

pub(crate) fn run_manual(arg: &ManualPlayArg) -> anyhow::Result<()> {
    let ManualPlayArg { seed } = arg;

    let mut app = PlayApp::manual(*seed);
    Tui::new().run(&mut app)
}

pub(crate) fn run_auto(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        weights,
        turbo,
        seed,
    } = arg;

    let weights = util::read_weights_file(weights.as_ref())?;
    let mut app = PlayApp::auto(weights, *seed, *turbo);
    Tui::new().run(&mut app)
}
