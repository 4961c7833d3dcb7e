use std::{io::Write as _, path::PathBuf};

use anyhow::Context as _;
use oxidraft_engine::{DraftActionKind, DraftStatus, HeroId, Side};
use oxidraft_evaluator::{
    recommendation::{HeroScore, Recommendation},
    score_component::ScoreComponent,
};
use serde::Serialize;

use crate::{
    command::data::{ActionInput, DataArg},
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RecommendArg {
    #[clap(flatten)]
    data: DataArg,
    /// Actions already taken, e.g. `ban:12,pick:Crystal Maiden`
    #[clap(long, value_delimiter = ',')]
    actions: Vec<ActionInput>,
    /// Side to recommend for (defaults to the side on the clock)
    #[clap(long)]
    side: Option<Side>,
    /// Action to recommend for (defaults to the current step)
    #[clap(long)]
    kind: Option<DraftActionKind>,
    /// Number of recommendations
    #[clap(long, default_value_t = 5)]
    count: usize,
    /// Output format
    #[clap(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Output file path
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Format {
    #[default]
    Json,
    Table,
}

#[derive(Debug, Serialize)]
struct RecommendReport {
    status: DraftStatus,
    side: Side,
    kind: DraftActionKind,
    recommendations: Vec<RecommendationEntry>,
}

#[derive(Debug, Serialize)]
struct RecommendationEntry {
    rank: usize,
    hero: HeroId,
    name: String,
    #[serde(flatten)]
    score: HeroScore,
}

impl RecommendationEntry {
    fn new(rank: usize, recommendation: Recommendation<'_>) -> Self {
        Self {
            rank,
            hero: recommendation.hero.id(),
            name: recommendation.hero.display_name().to_owned(),
            score: recommendation.score,
        }
    }
}

pub(crate) fn run(arg: &RecommendArg) -> anyhow::Result<()> {
    let RecommendArg {
        data,
        actions,
        side,
        kind,
        count,
        format,
        output,
    } = arg;

    let data = data.load()?;
    let state = data.replay(actions)?;

    let step = state.current_step();
    let side = side
        .or(step.map(|s| s.side))
        .context("The draft is complete; pass --side and --kind to score anyway")?;
    let kind = kind
        .or(step.map(|s| s.kind))
        .context("The draft is complete; pass --side and --kind to score anyway")?;

    let recommendations = data
        .engine
        .recommend(&state, side, kind, *count)
        .into_iter()
        .enumerate()
        .map(|(i, r)| RecommendationEntry::new(i + 1, r))
        .collect();

    let report = RecommendReport {
        status: state.status(),
        side,
        kind,
        recommendations,
    };
    match format {
        Format::Json => Output::save_json(&report, output.clone())?,
        Format::Table => write_table(&report, output.clone())?,
    }
    Ok(())
}

fn write_table(report: &RecommendReport, output_path: Option<PathBuf>) -> anyhow::Result<()> {
    let mut output = Output::from_output_path(output_path)?;
    let path = output.target().to_owned();
    let mut write = || -> std::io::Result<()> {
        writeln!(output, "{} {} ({})", report.side, report.kind, report.status)?;
        write!(output, "{:>4}  {:<24} {:>6} {:>6}", "rank", "hero", "total", "base")?;
        for component in ScoreComponent::ALL {
            write!(output, " {:>6}", short_name(component))?;
        }
        writeln!(output)?;

        for entry in &report.recommendations {
            write!(
                output,
                "{:>4}  {:<24} {:>6.3} {:>6.3}",
                entry.rank,
                entry.name,
                entry.score.total(),
                entry.score.base_total()
            )?;
            for component in ScoreComponent::ALL {
                let value = entry.score.component(component).map_or(0.0, |c| c.value);
                write!(output, " {value:>6.3}")?;
            }
            writeln!(output)?;
            for reason in entry.score.reasons() {
                writeln!(output, "      - {reason}")?;
            }
        }
        output.flush()
    };
    write().with_context(|| format!("Failed to write table to {path}"))
}

fn short_name(component: ScoreComponent) -> &'static str {
    match component {
        ScoreComponent::WinRate => "win",
        ScoreComponent::PickRate => "pick",
        ScoreComponent::AbilitySynergy => "abil",
        ScoreComponent::TeamSynergy => "team",
        ScoreComponent::Counter => "ctr",
        ScoreComponent::PositionDiversity => "pos",
        ScoreComponent::MetaPower => "meta",
    }
}
