use std::path::PathBuf;

use oxidraft_engine::{HeroCatalog as _, HeroId, Position};
use oxidraft_evaluator::ability_feature::FeatureVector;
use serde::Serialize;

use crate::{
    command::data::{DataArg, resolve_hero},
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct FeaturesArg {
    #[clap(flatten)]
    data: DataArg,
    /// Only show these heroes (id or name); all heroes when omitted
    #[clap(long = "hero")]
    heroes: Vec<String>,
    /// Output file path
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct HeroFeatures {
    hero: HeroId,
    name: String,
    features: FeatureVector,
    /// Positions played at least occasionally
    primary_positions: Vec<Position>,
    synthetic_roles: bool,
}

pub(crate) fn run(arg: &FeaturesArg) -> anyhow::Result<()> {
    let FeaturesArg {
        data,
        heroes,
        output,
    } = arg;

    let data = data.load()?;
    let ids: Vec<HeroId> = if heroes.is_empty() {
        data.catalog.heroes().iter().map(|h| h.id()).collect()
    } else {
        heroes
            .iter()
            .map(|h| resolve_hero(data.catalog.as_ref(), h))
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    let report = ids
        .into_iter()
        .filter_map(|id| data.catalog.hero(id))
        .map(|hero| HeroFeatures {
            hero: hero.id(),
            name: hero.display_name().to_owned(),
            features: data.features.get_or_compute(hero),
            primary_positions: hero.roles().primary_positions().collect(),
            synthetic_roles: hero.roles().is_synthetic(),
        })
        .collect::<Vec<_>>();

    Output::save_json(&report, output.clone())?;
    Ok(())
}
