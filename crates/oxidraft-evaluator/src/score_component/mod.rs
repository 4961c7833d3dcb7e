//! The seven weighted components of a hero score.
//!
//! Each component is a [`ScoreComponentSource`]: a stateless object that maps a
//! candidate hero in a [`ScoringContext`] to a value in \[0.0, 1.0\] plus optional
//! human-readable reasons.
//!
//! | Component            | Source file        | Looks at                                |
//! |----------------------|--------------------|-----------------------------------------|
//! | win rate             | [`statistical`]    | bracket win rate                        |
//! | pick rate            | [`statistical`]    | bracket pick rate                       |
//! | meta power           | [`statistical`]    | win/pick rate, popular counters, stage  |
//! | team synergy         | [`relational`]     | synergy with the team                   |
//! | counter              | [`relational`]     | counters against the opponents          |
//! | ability synergy      | [`composition`]    | team capability gaps                    |
//! | position diversity   | [`composition`]    | open positions, flexibility             |
//!
//! # Perspective
//!
//! The team is always the requesting side and the opponents the other side. Only the
//! counter component changes with the action: a pick is measured against the
//! opponents, a ban against the requester's own picks, so a high value marks a hero
//! that would punish the requester if the enemy took it.

use std::fmt;

use oxidraft_engine::{DraftActionKind, DraftState, Hero, HeroCatalog, HeroId, Side, TEAM_SIZE};
use serde::Serialize;

pub use self::{composition::*, relational::*, statistical::*};
use crate::{
    ability_feature::{FeatureCache, FeatureVector},
    config::{EngineConfig, TuningConstants},
    relationship::{RankBracket, RelationshipProvider},
    team_profile::TeamProfile,
};

mod composition;
mod relational;
mod statistical;

#[must_use]
pub fn all_score_component_sources() -> Vec<BoxedScoreComponentSource> {
    vec![
        // statistics
        Box::new(WinRate),
        Box::new(PickRate),
        // composition
        Box::new(AbilitySynergy),
        Box::new(TeamSynergy),
        Box::new(Counter),
        Box::new(PositionDiversity),
        // meta
        Box::new(MetaPower),
    ]
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum ScoreComponent {
    #[display("Win Rate")]
    WinRate,
    #[display("Pick Rate")]
    PickRate,
    #[display("Ability Synergy")]
    AbilitySynergy,
    #[display("Team Synergy")]
    TeamSynergy,
    #[display("Counter")]
    Counter,
    #[display("Position Diversity")]
    PositionDiversity,
    #[display("Meta Power")]
    MetaPower,
}

impl ScoreComponent {
    pub const LEN: usize = 7;
    pub const ALL: [Self; Self::LEN] = [
        Self::WinRate,
        Self::PickRate,
        Self::AbilitySynergy,
        Self::TeamSynergy,
        Self::Counter,
        Self::PositionDiversity,
        Self::MetaPower,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::WinRate => "win_rate",
            Self::PickRate => "pick_rate",
            Self::AbilitySynergy => "ability_synergy",
            Self::TeamSynergy => "team_synergy",
            Self::Counter => "counter",
            Self::PositionDiversity => "position_diversity",
            Self::MetaPower => "meta_power",
        }
    }
}

/// Output of one component for one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentValue {
    pub value: f32,
    pub reasons: Vec<String>,
}

impl ComponentValue {
    /// A value clamped to \[0.0, 1.0\] with nothing to explain.
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
            reasons: vec![],
        }
    }

    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reasons.push(reason.into());
        self
    }
}

pub trait ScoreComponentSource: fmt::Debug + Send + Sync {
    #[must_use]
    fn component(&self) -> ScoreComponent;

    #[must_use]
    fn evaluate(&self, ctx: &ScoringContext<'_>, candidate: &Candidate<'_>) -> ComponentValue;
}

pub type BoxedScoreComponentSource = Box<dyn ScoreComponentSource>;

impl ScoreComponentSource for BoxedScoreComponentSource {
    fn component(&self) -> ScoreComponent {
        self.as_ref().component()
    }

    fn evaluate(&self, ctx: &ScoringContext<'_>, candidate: &Candidate<'_>) -> ComponentValue {
        self.as_ref().evaluate(ctx, candidate)
    }
}

/// A hero being scored, with its cached ability features.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    hero: &'a Hero,
    features: FeatureVector,
}

impl<'a> Candidate<'a> {
    #[must_use]
    pub fn new(hero: &'a Hero, features: FeatureVector) -> Self {
        Self { hero, features }
    }

    #[must_use]
    pub fn hero(&self) -> &'a Hero {
        self.hero
    }

    #[must_use]
    pub fn features(&self) -> &FeatureVector {
        &self.features
    }
}

/// Everything about the draft that does not depend on the candidate.
///
/// Built once per recommendation request and shared by every candidate.
#[derive(Debug)]
pub struct ScoringContext<'a> {
    requester: Side,
    action: DraftActionKind,
    team: Vec<&'a Hero>,
    opponents: Vec<&'a Hero>,
    team_profile: TeamProfile,
    total_picks: usize,
    popular_heroes: Vec<HeroId>,
    provider: &'a dyn RelationshipProvider,
    config: &'a EngineConfig,
}

impl<'a> ScoringContext<'a> {
    pub fn new<C>(
        state: &DraftState,
        requester: Side,
        action: DraftActionKind,
        catalog: &'a C,
        cache: &FeatureCache,
        provider: &'a dyn RelationshipProvider,
        config: &'a EngineConfig,
    ) -> Self
    where
        C: HeroCatalog + ?Sized,
    {
        let resolve = |side: Side| {
            state
                .picks(side)
                .iter()
                .filter_map(|id| catalog.hero(*id))
                .collect::<Vec<_>>()
        };
        let team = resolve(requester);
        let opponents = resolve(requester.opponent());
        let team_profile = TeamProfile::from_heroes(team.iter().copied(), cache);
        let popular_heroes = catalog
            .heroes()
            .iter()
            .map(Hero::id)
            .filter(|hero| {
                provider.pick_rate(*hero, &config.rank_bracket) > config.tuning.popular_pick_rate
            })
            .collect();

        Self {
            requester,
            action,
            team,
            opponents,
            team_profile,
            total_picks: state.total_picks(),
            popular_heroes,
            provider,
            config,
        }
    }

    #[must_use]
    pub fn requester(&self) -> Side {
        self.requester
    }

    #[must_use]
    pub fn action(&self) -> DraftActionKind {
        self.action
    }

    /// Heroes the candidate would join.
    #[must_use]
    pub fn team(&self) -> &[&'a Hero] {
        &self.team
    }

    /// Heroes the candidate would face.
    #[must_use]
    pub fn opponents(&self) -> &[&'a Hero] {
        &self.opponents
    }

    /// Heroes the counter component measures the candidate against: the opponents
    /// for a pick, the requester's own team for a ban.
    #[must_use]
    pub fn counter_targets(&self) -> &[&'a Hero] {
        match self.action {
            DraftActionKind::Pick => &self.opponents,
            DraftActionKind::Ban => &self.team,
        }
    }

    #[must_use]
    pub fn team_profile(&self) -> &TeamProfile {
        &self.team_profile
    }

    #[must_use]
    pub fn total_picks(&self) -> usize {
        self.total_picks
    }

    #[must_use]
    pub fn is_early(&self) -> bool {
        self.total_picks < self.config.tuning.early_draft_picks
    }

    /// Fraction of the team still to be picked: 1.0 for an empty team, 0.0 for a full one.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn open_slot_share(&self) -> f32 {
        1.0 - (self.team.len().min(TEAM_SIZE) as f32 / TEAM_SIZE as f32)
    }

    /// Catalog heroes whose pick rate marks them as popular, whether or not they are
    /// still available.
    #[must_use]
    pub fn popular_heroes(&self) -> &[HeroId] {
        &self.popular_heroes
    }

    #[must_use]
    pub fn provider(&self) -> &dyn RelationshipProvider {
        self.provider
    }

    #[must_use]
    pub fn bracket(&self) -> &RankBracket {
        &self.config.rank_bracket
    }

    #[must_use]
    pub fn tuning(&self) -> &TuningConstants {
        &self.config.tuning
    }
}

/// Mean of `values`, or `None` when empty.
#[expect(clippy::cast_precision_loss)]
fn mean(values: impl IntoIterator<Item = f32>) -> Option<f32> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f32)
}

fn percent(value: f32) -> f32 {
    (value * 1000.0).round() / 10.0
}

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::Arc;

    use oxidraft_engine::{DraftConfig, DraftMode, InMemoryCatalog, PrimaryAttribute};

    use super::*;

    pub(crate) fn catalog(heroes: Vec<Hero>) -> Arc<InMemoryCatalog> {
        Arc::new(InMemoryCatalog::new(heroes).unwrap())
    }

    pub(crate) fn plain_heroes(n: u32) -> Vec<Hero> {
        (1..=n)
            .map(|id| Hero::new(HeroId(id), format!("hero_{id}"), format!("Hero {id}"), PrimaryAttribute::Strength))
            .collect()
    }

    pub(crate) fn all_pick(catalog: &InMemoryCatalog) -> DraftState {
        DraftState::new(&DraftConfig::with_mode(DraftMode::AllPick), catalog).unwrap()
    }

    /// Evaluates `source` for `hero` as Radiant's next `action` with default tuning.
    pub(crate) fn evaluate<S>(
        source: &S,
        state: &DraftState,
        catalog: &InMemoryCatalog,
        provider: &dyn RelationshipProvider,
        action: DraftActionKind,
        hero: HeroId,
    ) -> ComponentValue
    where
        S: ScoreComponentSource,
    {
        let config = EngineConfig::default();
        let cache = FeatureCache::new();
        let ctx = ScoringContext::new(
            state,
            Side::Radiant,
            action,
            catalog,
            &cache,
            provider,
            &config,
        );
        let hero = catalog.hero(hero).unwrap();
        source.evaluate(&ctx, &Candidate::new(hero, cache.get_or_compute(hero)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sources_cover_every_component_once() {
        let components = all_score_component_sources()
            .iter()
            .map(|source| source.component())
            .collect::<Vec<_>>();
        assert_eq!(components, ScoreComponent::ALL.to_vec());
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(Vec::new()), None);
        assert!((mean([0.2, 0.4]).unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_component_value_is_clamped() {
        assert_eq!(ComponentValue::new(1.4).value, 1.0);
        assert_eq!(ComponentValue::new(-0.2).value, 0.0);
    }
}
