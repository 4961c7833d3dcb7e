//! Ranking of draft candidates.
//!
//! [`RecommendationEngine`] scores every available hero with the configured
//! [`ScoreComponentSource`]s and returns them best first. Ties are broken by hero id,
//! so the deterministic entry points always return the same order for the same
//! draft.
//!
//! # Scoring Pipeline
//!
//! 1. Build a [`ScoringContext`] once per request (team, opponents, team profile,
//!    popular heroes)
//! 2. For each available hero, evaluate every component and take the weighted sum
//! 3. Optionally add jitter in `[0, jitter_scale · (1 − difficulty))`
//!    ([`RecommendationEngine::rank_candidates_jittered`])
//! 4. Sort by descending total, then ascending hero id

use std::{cmp::Ordering, sync::Arc};

use oxidraft_engine::{
    DraftActionKind, DraftError, DraftState, Hero, HeroCatalog, HeroId, InvalidAction, Side,
};
use rand::Rng;
use serde::Serialize;

use crate::{
    ability_feature::FeatureCache,
    config::{EngineConfig, WeightsError},
    relationship::RelationshipProvider,
    score_component::{
        BoxedScoreComponentSource, Candidate, ScoreComponent, ScoreComponentSource,
        ScoringContext, all_score_component_sources,
    },
    team_profile::TeamProfile,
};

/// Contribution of one component to a hero score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentScore {
    pub component: ScoreComponent,
    /// Unweighted value in \[0.0, 1.0\].
    pub value: f32,
    pub weight: f32,
    pub weighted: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroScore {
    total: f32,
    base_total: f32,
    components: Vec<ComponentScore>,
}

impl HeroScore {
    /// Final score used for ranking, including any jitter.
    #[must_use]
    pub fn total(&self) -> f32 {
        self.total
    }

    /// Weighted sum of the components before jitter.
    #[must_use]
    pub fn base_total(&self) -> f32 {
        self.base_total
    }

    #[must_use]
    pub fn jitter(&self) -> f32 {
        self.total - self.base_total
    }

    #[must_use]
    pub fn components(&self) -> &[ComponentScore] {
        &self.components
    }

    #[must_use]
    pub fn component(&self, component: ScoreComponent) -> Option<&ComponentScore> {
        self.components.iter().find(|c| c.component == component)
    }

    pub fn reasons(&self) -> impl Iterator<Item = &str> + '_ {
        self.components
            .iter()
            .flat_map(|c| c.reasons.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone)]
pub struct Recommendation<'a> {
    pub hero: &'a Hero,
    pub score: HeroScore,
}

fn compare_recommendations(a: &Recommendation<'_>, b: &Recommendation<'_>) -> Ordering {
    b.score
        .total
        .total_cmp(&a.score.total)
        .then_with(|| a.hero.id().cmp(&b.hero.id()))
}

/// Scores and ranks draft candidates.
///
/// One engine can serve any number of drafts concurrently; it holds no per-draft
/// state. The feature cache may be shared with other engines through
/// [`Self::with_feature_cache`].
#[derive(Debug)]
pub struct RecommendationEngine {
    catalog: Arc<dyn HeroCatalog>,
    provider: Box<dyn RelationshipProvider>,
    features: Arc<FeatureCache>,
    components: Vec<BoxedScoreComponentSource>,
    config: EngineConfig,
}

impl RecommendationEngine {
    /// Creates an engine with all seven score components.
    ///
    /// Fails if the configured weights are negative or do not sum to 1.0.
    pub fn new(
        catalog: Arc<dyn HeroCatalog>,
        provider: Box<dyn RelationshipProvider>,
        config: EngineConfig,
    ) -> Result<Self, WeightsError> {
        config.weights.validate()?;
        Ok(Self {
            catalog,
            provider,
            features: Arc::new(FeatureCache::new()),
            components: all_score_component_sources(),
            config,
        })
    }

    #[must_use]
    pub fn with_feature_cache(mut self, features: Arc<FeatureCache>) -> Self {
        self.features = features;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &dyn HeroCatalog {
        self.catalog.as_ref()
    }

    #[must_use]
    pub fn provider(&self) -> &dyn RelationshipProvider {
        self.provider.as_ref()
    }

    #[must_use]
    pub fn feature_cache(&self) -> &Arc<FeatureCache> {
        &self.features
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The `count` best candidates for `side` taking `action`.
    ///
    /// Returns an empty list when no hero is available.
    #[must_use]
    pub fn recommend(
        &self,
        state: &DraftState,
        side: Side,
        action: DraftActionKind,
        count: usize,
    ) -> Vec<Recommendation<'_>> {
        let mut ranked = self.rank_candidates(state, side, action);
        ranked.truncate(count);
        ranked
    }

    /// [`Self::recommend`] for whichever side and action the schedule calls for next.
    pub fn recommend_for_turn(
        &self,
        state: &DraftState,
        count: usize,
    ) -> Result<Vec<Recommendation<'_>>, DraftError> {
        let step = state
            .current_step()
            .ok_or(InvalidAction::DraftComplete)?;
        Ok(self.recommend(state, step.side, step.kind, count))
    }

    /// Every available hero, scored and sorted best first. Never jitters.
    #[must_use]
    pub fn rank_candidates(
        &self,
        state: &DraftState,
        side: Side,
        action: DraftActionKind,
    ) -> Vec<Recommendation<'_>> {
        let ctx = self.context(state, side, action);
        let mut ranked = state
            .available_heroes()
            .filter_map(|id| self.catalog.hero(id))
            .map(|hero| Recommendation {
                hero,
                score: self.score_candidate(&ctx, hero),
            })
            .collect::<Vec<_>>();
        ranked.sort_by(compare_recommendations);

        tracing::debug!(
            %side,
            %action,
            candidates = ranked.len(),
            top = ranked.first().map(|r| r.hero.name()),
            "ranked candidates"
        );
        ranked
    }

    /// Like [`Self::rank_candidates`], with difficulty-scaled jitter added to every
    /// total before sorting. The pre-jitter total stays available as
    /// [`HeroScore::base_total`].
    pub fn rank_candidates_jittered<R>(
        &self,
        state: &DraftState,
        side: Side,
        action: DraftActionKind,
        rng: &mut R,
    ) -> Vec<Recommendation<'_>>
    where
        R: Rng + ?Sized,
    {
        let range = self.config.jitter_range();
        let mut ranked = self.rank_candidates(state, side, action);
        if range > 0.0 {
            for recommendation in &mut ranked {
                recommendation.score.total += rng.random::<f32>() * range;
            }
            ranked.sort_by(compare_recommendations);
        }
        ranked
    }

    /// Score of a single hero, or `None` if it is unknown or unavailable.
    #[must_use]
    pub fn score_hero(
        &self,
        state: &DraftState,
        side: Side,
        action: DraftActionKind,
        hero: HeroId,
    ) -> Option<HeroScore> {
        if !state.is_available(hero) {
            return None;
        }
        let hero = self.catalog.hero(hero)?;
        let ctx = self.context(state, side, action);
        Some(self.score_candidate(&ctx, hero))
    }

    /// Composition summary of the heroes `side` has picked so far.
    #[must_use]
    pub fn team_profile(&self, state: &DraftState, side: Side) -> TeamProfile {
        TeamProfile::from_heroes(
            state
                .picks(side)
                .iter()
                .filter_map(|id| self.catalog.hero(*id)),
            &self.features,
        )
    }

    fn context(&self, state: &DraftState, side: Side, action: DraftActionKind) -> ScoringContext<'_> {
        ScoringContext::new(
            state,
            side,
            action,
            self.catalog.as_ref(),
            &self.features,
            self.provider.as_ref(),
            &self.config,
        )
    }

    fn score_candidate(&self, ctx: &ScoringContext<'_>, hero: &Hero) -> HeroScore {
        let candidate = Candidate::new(hero, self.features.get_or_compute(hero));
        let components = self
            .components
            .iter()
            .map(|source| {
                let component = source.component();
                let weight = self.config.weights.get(component);
                let value = source.evaluate(ctx, &candidate);
                ComponentScore {
                    component,
                    value: value.value,
                    weight,
                    weighted: weight * value.value,
                    reasons: value.reasons,
                }
            })
            .collect::<Vec<_>>();
        let base_total = components.iter().map(|c| c.weighted).sum::<f32>();

        tracing::trace!(hero = %hero.name(), base_total, "scored candidate");
        HeroScore {
            total: base_total,
            base_total,
            components,
        }
    }
}
