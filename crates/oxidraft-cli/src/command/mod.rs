use clap::{ArgAction, Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

use self::{
    analyze::AnalyzeArg, auto_draft::AutoDraftArg, features::FeaturesArg,
    recommend::RecommendArg,
};

mod analyze;
mod auto_draft;
mod data;
mod features;
mod recommend;

/// Environment variable holding an explicit log filter, e.g. `oxidraft_evaluator=trace`.
const LOG_ENV_VAR: &str = "OXIDRAFT_LOG";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Rank candidates for the next action of a draft
    Recommend(#[clap(flatten)] RecommendArg),
    /// Let two bots play a full draft
    AutoDraft(#[clap(flatten)] AutoDraftArg),
    /// Print the ability features extracted for each hero
    Features(#[clap(flatten)] FeaturesArg),
    /// Print team profiles and capability gaps of a draft
    Analyze(#[clap(flatten)] AnalyzeArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose)?;
    match args.mode {
        Mode::Recommend(arg) => recommend::run(&arg)?,
        Mode::AutoDraft(arg) => auto_draft::run(&arg)?,
        Mode::Features(arg) => features::run(&arg)?,
        Mode::Analyze(arg) => analyze::run(&arg)?,
    }
    Ok(())
}

fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env()?;

    // logs go to stderr so JSON output on stdout stays parseable
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(layer)
        .with(env_filter)
        .try_init()?;
    Ok(())
}
