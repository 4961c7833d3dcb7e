use std::path::PathBuf;

use oxidraft_engine::{DraftSummary, PhaseStep, Position, Side};
use oxidraft_evaluator::team_profile::{CapabilityGaps, TeamProfile};
use serde::Serialize;

use crate::{
    command::data::{ActionInput, DataArg},
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    #[clap(flatten)]
    data: DataArg,
    /// Actions already taken, e.g. `ban:12,pick:Crystal Maiden`
    #[clap(long, value_delimiter = ',')]
    actions: Vec<ActionInput>,
    /// Output file path
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct AnalyzeReport {
    summary: DraftSummary,
    next_step: Option<PhaseStep>,
    teams: Vec<TeamReport>,
}

#[derive(Debug, Serialize)]
struct TeamReport {
    side: Side,
    picks_remaining: usize,
    profile: TeamProfile,
    gaps: CapabilityGaps,
    uncovered_positions: Vec<Position>,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let AnalyzeArg {
        data,
        actions,
        output,
    } = arg;

    let data = data.load()?;
    let state = data.replay(actions)?;
    let tuning = &data.engine.config().tuning;

    let teams = Side::ALL
        .into_iter()
        .map(|side| {
            let profile = data.engine.team_profile(&state, side);
            TeamReport {
                side,
                picks_remaining: state.picks_remaining(side),
                gaps: profile.gaps(tuning),
                uncovered_positions: profile.uncovered_positions(tuning).collect(),
                profile,
            }
        })
        .collect();

    let report = AnalyzeReport {
        summary: state.summary(),
        next_step: state.current_step(),
        teams,
    };
    Output::save_json(&report, output.clone())?;
    Ok(())
}
