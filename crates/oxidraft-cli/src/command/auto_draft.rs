use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use oxidraft_evaluator::{
    bot::{DraftBot, DraftSeed, auto_draft},
    selector::DifficultySelector,
};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use tracing::info;

use crate::{
    command::data::DataArg,
    schema::record::{BotInfo, DraftRecord},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoDraftArg {
    #[clap(flatten)]
    data: DataArg,
    /// Skill of the Radiant bot in [0.0, 1.0]
    #[clap(long, default_value_t = 0.8)]
    radiant_skill: f32,
    /// Skill of the Dire bot in [0.0, 1.0]
    #[clap(long, default_value_t = 0.5)]
    dire_skill: f32,
    /// Random seed as 32 hex digits; a fresh seed is drawn when omitted
    #[clap(long, conflicts_with = "replay")]
    seed: Option<DraftSeed>,
    /// Replay a recorded draft with its seed, bot skills, profile, difficulty and jitter
    #[clap(long)]
    replay: Option<PathBuf>,
    /// Disable score jitter
    #[clap(long, default_value_t = false, conflicts_with = "replay")]
    no_jitter: bool,
    /// Output file path for the draft record
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &AutoDraftArg) -> anyhow::Result<()> {
    let AutoDraftArg {
        data,
        radiant_skill,
        dire_skill,
        seed,
        replay,
        no_jitter,
        output,
    } = arg;

    let record = replay
        .as_ref()
        .map(|path| util::read_json_file::<DraftRecord, _>("draft record", path))
        .transpose()?;
    let data = data.load_with(|config| {
        if let Some(record) = &record {
            record.apply_to(config);
        }
    })?;
    let window = data.config.selection_window();
    let (seed, radiant, dire, jitter) = match record {
        Some(record) => {
            info!(seed = %record.seed, difficulty = record.difficulty, "replaying recorded draft");
            (record.seed, record.radiant, record.dire, record.jitter)
        }
        None => (
            seed.unwrap_or_else(|| rand::rng().random()),
            BotInfo {
                skill: *radiant_skill,
                window,
            },
            BotInfo {
                skill: *dire_skill,
                window,
            },
            !*no_jitter,
        ),
    };

    let bot = |info: BotInfo| {
        let bot = DraftBot::new(&data.engine, DifficultySelector::new(info.skill, info.window));
        if jitter { bot } else { bot.without_jitter() }
    };
    let (radiant_bot, dire_bot) = (bot(radiant), bot(dire));
    let radiant = BotInfo {
        skill: radiant_bot.selector().skill(),
        window: radiant_bot.selector().window(),
    };
    let dire = BotInfo {
        skill: dire_bot.selector().skill(),
        window: dire_bot.selector().window(),
    };

    let mut state = data.replay(&[])?;
    let mut rng = Pcg32::from_seed(seed.to_bytes());
    let actions = auto_draft(&mut state, &radiant_bot, &dire_bot, &mut rng)
        .context("Automated draft failed")?;
    info!(actions = actions.len(), status = %state.status(), "automated draft finished");

    let record = DraftRecord {
        recorded_at: Utc::now(),
        seed,
        profile: data.config.profile.unwrap_or_default(),
        difficulty: data.engine.config().difficulty,
        jitter,
        radiant,
        dire,
        summary: state.summary(),
    };
    Output::save_json(&record, output.clone())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[clap(flatten)]
        arg: AutoDraftArg,
    }

    fn parse(args: &[&str]) -> Result<AutoDraftArg, clap::Error> {
        Cli::try_parse_from(["oxidraft", "--heroes", "heroes.json"].iter().chain(args))
            .map(|cli| cli.arg)
    }

    #[test]
    fn test_seed_argument() {
        let arg = parse(&["--seed", "000102030405060708090a0b0c0d0e0f"]).unwrap();
        assert_eq!(
            arg.seed.unwrap().to_bytes(),
            [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]
        );
        // a short seed would not survive being written to a record
        assert!(parse(&["--seed", "1"]).is_err());
        assert!(parse(&["--seed", "xyz"]).is_err());
    }

    #[test]
    fn test_replay_takes_settings_from_record() {
        assert!(parse(&["--replay", "draft.json", "--no-jitter"]).is_err());
        let seed = "0".repeat(32);
        assert!(parse(&["--replay", "draft.json", "--seed", seed.as_str()]).is_err());
        let arg = parse(&["--replay", "draft.json"]).unwrap();
        assert_eq!(arg.replay, Some(PathBuf::from("draft.json")));
        assert!(!arg.no_jitter);
    }
}
