use std::collections::{BTreeMap, HashMap};

use oxidraft_engine::HeroId;

use super::{
    NEUTRAL, OrderedPairKey, PICK_RATE_FLOOR, PairKey, RankBracket, RelationshipProvider,
    RelationshipSource,
};

/// Hash-indexed, in-memory relationship provider.
///
/// Values are clamped to \[0.0, 1.0\] on the way in, so lookups never need to.
///
/// # Example
///
/// ```
/// use oxidraft_engine::HeroId;
/// use oxidraft_evaluator::relationship::{RelationshipIndex, RelationshipProvider};
///
/// let index = RelationshipIndex::neutral().with_synergy(HeroId(1), HeroId(2), 0.9);
/// assert_eq!(index.synergy(HeroId(2), HeroId(1)), 0.9);
/// assert_eq!(index.synergy(HeroId(1), HeroId(3)), 0.5);
/// ```
#[derive(Debug, Default, Clone)]
pub struct RelationshipIndex {
    win_rates: HashMap<RankBracket, HashMap<HeroId, f32>>,
    pick_rates: HashMap<RankBracket, HashMap<HeroId, f32>>,
    synergies: HashMap<PairKey, f32>,
    counters: HashMap<OrderedPairKey, f32>,
}

fn index_by_bracket(
    table: &BTreeMap<RankBracket, BTreeMap<HeroId, f32>>,
) -> HashMap<RankBracket, HashMap<HeroId, f32>> {
    table
        .iter()
        .map(|(bracket, rates)| {
            let rates = rates
                .iter()
                .map(|(hero, rate)| (*hero, rate.clamp(0.0, 1.0)))
                .collect();
            (bracket.clone(), rates)
        })
        .collect()
}

impl RelationshipIndex {
    /// A provider with no data: every lookup returns its default.
    #[must_use]
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn from_source<S>(source: &S) -> Self
    where
        S: RelationshipSource + ?Sized,
    {
        let this = Self {
            win_rates: index_by_bracket(source.win_rates()),
            pick_rates: index_by_bracket(source.pick_rates()),
            synergies: source
                .synergies()
                .iter()
                .map(|(key, value)| (*key, value.clamp(0.0, 1.0)))
                .collect(),
            counters: source
                .counters()
                .iter()
                .map(|(key, value)| (*key, value.clamp(0.0, 1.0)))
                .collect(),
        };
        tracing::debug!(
            brackets = this.win_rates.len(),
            synergies = this.synergies.len(),
            counters = this.counters.len(),
            "indexed relationship tables"
        );
        this
    }

    /// Sets the synergy of a pair. Ignored when `a == b`.
    #[must_use]
    pub fn with_synergy(mut self, a: HeroId, b: HeroId, value: f32) -> Self {
        if let Some(key) = PairKey::new(a, b) {
            self.synergies.insert(key, value.clamp(0.0, 1.0));
        }
        self
    }

    /// Sets how well `hero` does against `against`. Ignored when they are the same hero.
    #[must_use]
    pub fn with_counter(mut self, hero: HeroId, against: HeroId, value: f32) -> Self {
        if let Some(key) = OrderedPairKey::new(hero, against) {
            self.counters.insert(key, value.clamp(0.0, 1.0));
        }
        self
    }

    #[must_use]
    pub fn with_win_rate(mut self, bracket: &RankBracket, hero: HeroId, value: f32) -> Self {
        self.win_rates
            .entry(bracket.clone())
            .or_default()
            .insert(hero, value.clamp(0.0, 1.0));
        self
    }

    #[must_use]
    pub fn with_pick_rate(mut self, bracket: &RankBracket, hero: HeroId, value: f32) -> Self {
        self.pick_rates
            .entry(bracket.clone())
            .or_default()
            .insert(hero, value.clamp(0.0, 1.0));
        self
    }
}

impl RelationshipProvider for RelationshipIndex {
    fn win_rate(&self, hero: HeroId, bracket: &RankBracket) -> f32 {
        self.win_rates
            .get(bracket)
            .and_then(|rates| rates.get(&hero))
            .copied()
            .unwrap_or(NEUTRAL)
    }

    fn pick_rate(&self, hero: HeroId, bracket: &RankBracket) -> f32 {
        self.pick_rates
            .get(bracket)
            .and_then(|rates| rates.get(&hero))
            .copied()
            .unwrap_or(PICK_RATE_FLOOR)
    }

    fn synergy(&self, a: HeroId, b: HeroId) -> f32 {
        PairKey::new(a, b)
            .and_then(|key| self.synergies.get(&key))
            .copied()
            .unwrap_or(NEUTRAL)
    }

    fn counter(&self, hero: HeroId, against: HeroId) -> f32 {
        OrderedPairKey::new(hero, against)
            .and_then(|key| self.counters.get(&key))
            .copied()
            .unwrap_or(NEUTRAL)
    }
}
