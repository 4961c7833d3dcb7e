use dashmap::DashMap;
use oxidraft_engine::{Hero, HeroCatalog, HeroId};
use rayon::prelude::*;

use super::{FeatureVector, extract_features};

/// Process-wide memo of extracted ability features, keyed by hero id.
///
/// Safe to share between concurrent drafts. Two threads missing the same hero at once
/// may both compute it; extraction is deterministic, so either result is correct.
#[derive(Debug, Default)]
pub struct FeatureCache {
    entries: DashMap<HeroId, FeatureVector>,
}

impl FeatureCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached vector for `hero`, extracting it on first use.
    pub fn get_or_compute(&self, hero: &Hero) -> FeatureVector {
        if let Some(features) = self.entries.get(&hero.id()) {
            return *features;
        }
        let features = extract_features(hero);
        self.entries.insert(hero.id(), features);
        features
    }

    #[must_use]
    pub fn get(&self, hero: HeroId) -> Option<FeatureVector> {
        self.entries.get(&hero).map(|entry| *entry)
    }

    /// Extracts features for every hero in `catalog` in parallel.
    pub fn precompute<C>(&self, catalog: &C)
    where
        C: HeroCatalog + ?Sized,
    {
        catalog.heroes().par_iter().for_each(|hero| {
            self.get_or_compute(hero);
        });
        tracing::debug!(heroes = self.entries.len(), "precomputed ability features");
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
