//! Aggregate view of a (partial) team.

use oxidraft_engine::{Hero, HeroId, Position};
use serde::Serialize;

use crate::{
    ability_feature::{AbilityFeature, FeatureCache, FeatureVector},
    config::TuningConstants,
};

/// Which team-level capabilities are still missing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityGaps {
    pub teamfight: bool,
    pub control: bool,
    pub magical_damage: bool,
    pub physical_damage: bool,
}

impl CapabilityGaps {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.teamfight || self.control || self.magical_damage || self.physical_damage)
    }
}

/// Team composition summary.
///
/// - `features` is the per-dimension maximum over the members' feature vectors: a
///   team has area impact if any member does.
/// - `position_coverage` is the per-position sum of the members' role frequencies,
///   capped at 1.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamProfile {
    members: Vec<HeroId>,
    features: FeatureVector,
    position_coverage: [f32; Position::LEN],
    synthetic_roles: usize,
}

impl TeamProfile {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            members: vec![],
            features: FeatureVector::ZERO,
            position_coverage: [0.0; Position::LEN],
            synthetic_roles: 0,
        }
    }

    pub fn from_heroes<'a, I>(heroes: I, cache: &FeatureCache) -> Self
    where
        I: IntoIterator<Item = &'a Hero>,
    {
        heroes.into_iter().fold(Self::empty(), |mut profile, hero| {
            let features = cache.get_or_compute(hero);
            for (feature, value) in features.iter() {
                profile.features[feature] = profile.features[feature].max(value);
            }
            for position in Position::ALL {
                let coverage = &mut profile.position_coverage[position.index()];
                *coverage = (*coverage + hero.roles().frequency(position)).min(1.0);
            }
            if hero.roles().is_synthetic() {
                profile.synthetic_roles += 1;
            }
            profile.members.push(hero.id());
            profile
        })
    }

    #[must_use]
    pub fn members(&self) -> &[HeroId] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn features(&self) -> &FeatureVector {
        &self.features
    }

    #[must_use]
    pub fn coverage(&self, position: Position) -> f32 {
        self.position_coverage[position.index()]
    }

    /// Members whose role data was estimated rather than observed.
    #[must_use]
    pub fn synthetic_roles(&self) -> usize {
        self.synthetic_roles
    }

    #[must_use]
    pub fn gaps(&self, tuning: &TuningConstants) -> CapabilityGaps {
        CapabilityGaps {
            teamfight: self.features.get(AbilityFeature::AoeImpact) < tuning.aoe_threshold,
            control: self.features.control_strength() < tuning.control_threshold,
            magical_damage: self.features.get(AbilityFeature::MagicalDamage)
                < tuning.damage_threshold,
            physical_damage: self.features.get(AbilityFeature::PhysicalDamage)
                < tuning.damage_threshold,
        }
    }

    /// Positions whose coverage is below the covered threshold.
    pub fn uncovered_positions(&self, tuning: &TuningConstants) -> impl Iterator<Item = Position> {
        let threshold = tuning.position_covered_threshold;
        let coverage = self.position_coverage;
        Position::ALL
            .into_iter()
            .filter(move |p| coverage[p.index()] < threshold)
    }
}

impl Default for TeamProfile {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use oxidraft_engine::{Ability, AbilityType, DamageType, PrimaryAttribute, RoleFrequency};

    use super::*;

    #[test]
    fn test_empty_team_has_every_gap() {
        let profile = TeamProfile::empty();
        let gaps = profile.gaps(&TuningConstants::default());
        assert!(gaps.teamfight && gaps.control && gaps.magical_damage && gaps.physical_damage);
        assert_eq!(
            profile.uncovered_positions(&TuningConstants::default()).count(),
            Position::LEN
        );
    }

    #[test]
    fn test_aggregates_members() {
        let cache = FeatureCache::new();
        let nuker = Hero::new(HeroId(1), "nuker", "Nuker", PrimaryAttribute::Intelligence)
            .with_ability(
                Ability::new("Blast", "Hurls a bolt.", AbilityType::Basic)
                    .with_damage_type(DamageType::Magical),
            )
            .with_ability(
                Ability::new("Wave", "Hurls a wave.", AbilityType::Basic)
                    .with_damage_type(DamageType::Magical),
            )
            .with_roles(RoleFrequency::observed([0.0, 0.9, 0.0, 0.0, 0.0]));
        let carry = Hero::new(HeroId(2), "carry", "Carry", PrimaryAttribute::Agility)
            .with_roles(RoleFrequency::observed([0.8, 0.0, 0.0, 0.0, 0.0]));

        let profile = TeamProfile::from_heroes([&nuker, &carry], &cache);
        assert_eq!(profile.members(), &[HeroId(1), HeroId(2)]);
        assert_eq!(profile.synthetic_roles(), 0);

        let gaps = profile.gaps(&TuningConstants::default());
        assert!(!gaps.magical_damage);
        assert!(gaps.physical_damage);

        let uncovered = profile
            .uncovered_positions(&TuningConstants::default())
            .collect::<Vec<_>>();
        assert_eq!(
            uncovered,
            vec![Position::Offlane, Position::SoftSupport, Position::HardSupport]
        );
    }

    #[test]
    fn test_coverage_is_capped() {
        let cache = FeatureCache::new();
        let heroes = (1..=3)
            .map(|id| {
                Hero::new(HeroId(id), "c", "C", PrimaryAttribute::Agility)
                    .with_roles(RoleFrequency::synthetic([0.9, 0.0, 0.0, 0.0, 0.0]))
            })
            .collect::<Vec<_>>();
        let profile = TeamProfile::from_heroes(&heroes, &cache);
        assert_eq!(profile.coverage(Position::Carry), 1.0);
        assert_eq!(profile.synthetic_roles(), 3);
    }
}
