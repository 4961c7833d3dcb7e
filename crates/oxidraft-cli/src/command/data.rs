use std::{path::PathBuf, str::FromStr, sync::Arc};

use anyhow::Context as _;
use oxidraft_engine::{
    DraftAction, DraftActionKind, DraftState, HeroCatalog as _, HeroId, InMemoryCatalog,
};
use oxidraft_evaluator::{
    ability_feature::FeatureCache,
    recommendation::RecommendationEngine,
    relationship::{BlendedProvider, RelationshipIndex, RelationshipProvider, RelationshipTables},
};
use tracing::info;

use crate::{schema::config::AppConfig, util};

/// Input files shared by every subcommand.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DataArg {
    /// Hero catalog (JSON array of heroes)
    #[clap(long)]
    heroes: PathBuf,
    /// Win/pick rate, synergy and counter tables (JSON)
    #[clap(long)]
    relationships: Option<PathBuf>,
    /// Baseline tables blended under `--relationships`
    #[clap(long)]
    baseline: Option<PathBuf>,
    /// Application config (JSON)
    #[clap(long)]
    config: Option<PathBuf>,
}

/// Everything loaded from a [`DataArg`].
#[derive(Debug)]
pub(crate) struct DataSet {
    pub catalog: Arc<InMemoryCatalog>,
    pub config: AppConfig,
    pub features: Arc<FeatureCache>,
    pub engine: RecommendationEngine,
}

impl DataArg {
    pub(crate) fn load(&self) -> anyhow::Result<DataSet> {
        self.load_with(|_| {})
    }

    /// Like [`Self::load`], letting `adjust` change the configuration before the
    /// engine is built from it.
    pub(crate) fn load_with<F>(&self, adjust: F) -> anyhow::Result<DataSet>
    where
        F: FnOnce(&mut AppConfig),
    {
        let catalog: InMemoryCatalog = util::read_json_file("hero catalog", &self.heroes)?;
        let catalog = Arc::new(catalog);
        info!(heroes = catalog.len(), path = %self.heroes.display(), "loaded hero catalog");

        let mut config = match &self.config {
            Some(path) => util::read_json_file("config", path)?,
            None => AppConfig::default(),
        };
        adjust(&mut config);

        let provider = self.load_provider(&config)?;
        let features = Arc::new(FeatureCache::new());
        features.precompute(catalog.as_ref());

        let engine = RecommendationEngine::new(catalog.clone(), provider, config.engine_config())
            .context("Invalid engine configuration")?
            .with_feature_cache(features.clone());

        Ok(DataSet {
            catalog,
            config,
            features,
            engine,
        })
    }

    fn load_provider(&self, config: &AppConfig) -> anyhow::Result<Box<dyn RelationshipProvider>> {
        let primary = match &self.relationships {
            Some(path) => {
                let tables: RelationshipTables = util::read_json_file("relationship", path)?;
                RelationshipIndex::from_source(&tables)
            }
            None => RelationshipIndex::neutral(),
        };
        let Some(path) = &self.baseline else {
            return Ok(Box::new(primary));
        };
        let tables: RelationshipTables = util::read_json_file("baseline relationship", path)?;
        let baseline = RelationshipIndex::from_source(&tables);
        Ok(Box::new(BlendedProvider::new(
            primary,
            baseline,
            config.primary_weight,
        )))
    }
}

impl DataSet {
    /// Builds a draft from the configured format and replays `actions` onto it.
    pub(crate) fn replay(&self, actions: &[ActionInput]) -> anyhow::Result<DraftState> {
        let mut state = DraftState::new(&self.config.draft, self.catalog.as_ref())
            .context("Invalid draft configuration")?;
        for (i, input) in actions.iter().enumerate() {
            let hero = input.resolve(self.catalog.as_ref())?;
            let action: DraftAction = state
                .apply(input.kind, hero)
                .with_context(|| format!("Action #{} ({input}) was rejected", i + 1))?;
            info!(side = %action.side, kind = %action.kind, hero = %action.hero, "replayed action");
        }
        Ok(state)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub(crate) enum ActionInputError {
    #[display("expected `ban:<hero>` or `pick:<hero>`, got `{_0}`")]
    Malformed(#[error(not(source))] String),
    #[display("unknown action kind `{_0}`")]
    UnknownKind(#[error(not(source))] String),
}

/// A draft action given on the command line as `ban:<hero>` or `pick:<hero>`.
///
/// The hero is either a numeric id or a hero name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{kind}:{hero}")]
pub(crate) struct ActionInput {
    pub kind: DraftActionKind,
    pub hero: String,
}

impl FromStr for ActionInput {
    type Err = ActionInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, hero) = s
            .split_once(':')
            .ok_or_else(|| ActionInputError::Malformed(s.to_owned()))?;
        let hero = hero.trim();
        if hero.is_empty() {
            return Err(ActionInputError::Malformed(s.to_owned()));
        }
        let kind = match kind.trim().to_ascii_lowercase().as_str() {
            "ban" => DraftActionKind::Ban,
            "pick" => DraftActionKind::Pick,
            other => return Err(ActionInputError::UnknownKind(other.to_owned())),
        };
        Ok(Self {
            kind,
            hero: hero.to_owned(),
        })
    }
}

impl ActionInput {
    fn resolve(&self, catalog: &InMemoryCatalog) -> anyhow::Result<HeroId> {
        resolve_hero(catalog, &self.hero)
    }
}

/// Looks a hero up by numeric id first, then by name.
pub(crate) fn resolve_hero(catalog: &InMemoryCatalog, hero: &str) -> anyhow::Result<HeroId> {
    if let Ok(id) = hero.parse::<HeroId>()
        && catalog.hero(id).is_some()
    {
        return Ok(id);
    }
    catalog
        .hero_by_name(hero)
        .map(|h| h.id())
        .with_context(|| format!("Unknown hero: {hero}"))
}
