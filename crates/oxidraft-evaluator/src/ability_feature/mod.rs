//! Ability-text features.
//!
//! Each hero is summarized by a [`FeatureVector`]: twelve named dimensions, each
//! normalized to \[0.0, 1.0\], derived from the free-text descriptions of its abilities.
//!
//! # Features
//!
//! **Control** - [`AbilityFeature::StunScore`], [`AbilityFeature::SilenceScore`],
//! [`AbilityFeature::RootScore`], [`AbilityFeature::SlowScore`]
//!
//! **Damage mix** - [`AbilityFeature::MagicalDamage`], [`AbilityFeature::PhysicalDamage`],
//! [`AbilityFeature::PureDamage`]
//!
//! **Impact and role** - [`AbilityFeature::AoeImpact`], [`AbilityFeature::ControlDuration`],
//! [`AbilityFeature::MobilityScore`], [`AbilityFeature::SustainScore`],
//! [`AbilityFeature::UtilityScore`]
//!
//! # Processing Pipeline
//!
//! 1. **Match** - Run lexical rules over every ability description ([`extract`])
//! 2. **Accumulate** - Add each matching rule's contributions; ultimates count double
//!    towards area impact and control duration
//! 3. **Normalize** - Divide control and damage groups by `max(3, group sum)`, clamp
//!    every dimension to \[0.0, 1.0\]
//!
//! Extraction is a pure function of the hero's abilities, so results are memoized in a
//! [`FeatureCache`] shared by every draft in the process.

use std::ops::{Index, IndexMut};

use serde::{Serialize, Serializer, ser::SerializeMap as _};

pub use self::{cache::FeatureCache, extract::extract_features};

mod cache;
mod extract;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AbilityFeature {
    #[display("Stun Score")]
    StunScore,
    #[display("Silence Score")]
    SilenceScore,
    #[display("Root Score")]
    RootScore,
    #[display("Slow Score")]
    SlowScore,
    #[display("Magical Damage")]
    MagicalDamage,
    #[display("Physical Damage")]
    PhysicalDamage,
    #[display("Pure Damage")]
    PureDamage,
    #[display("AoE Impact")]
    AoeImpact,
    #[display("Control Duration")]
    ControlDuration,
    #[display("Mobility Score")]
    MobilityScore,
    #[display("Sustain Score")]
    SustainScore,
    #[display("Utility Score")]
    UtilityScore,
}

impl AbilityFeature {
    pub const LEN: usize = 12;
    pub const ALL: [Self; Self::LEN] = [
        Self::StunScore,
        Self::SilenceScore,
        Self::RootScore,
        Self::SlowScore,
        Self::MagicalDamage,
        Self::PhysicalDamage,
        Self::PureDamage,
        Self::AoeImpact,
        Self::ControlDuration,
        Self::MobilityScore,
        Self::SustainScore,
        Self::UtilityScore,
    ];
    pub const CONTROL: [Self; 4] = [
        Self::StunScore,
        Self::SilenceScore,
        Self::RootScore,
        Self::SlowScore,
    ];
    pub const DAMAGE: [Self; 3] = [Self::MagicalDamage, Self::PhysicalDamage, Self::PureDamage];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::StunScore => "stun_score",
            Self::SilenceScore => "silence_score",
            Self::RootScore => "root_score",
            Self::SlowScore => "slow_score",
            Self::MagicalDamage => "magical_damage",
            Self::PhysicalDamage => "physical_damage",
            Self::PureDamage => "pure_damage",
            Self::AoeImpact => "aoe_impact",
            Self::ControlDuration => "control_duration",
            Self::MobilityScore => "mobility_score",
            Self::SustainScore => "sustain_score",
            Self::UtilityScore => "utility_score",
        }
    }
}

/// Normalized ability profile of a hero.
///
/// Serializes as a map from feature id (e.g. `"stun_score"`) to value.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FeatureVector([f32; AbilityFeature::LEN]);

impl FeatureVector {
    pub const ZERO: Self = Self([0.0; AbilityFeature::LEN]);

    #[must_use]
    pub fn get(&self, feature: AbilityFeature) -> f32 {
        self.0[feature.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (AbilityFeature, f32)> + '_ {
        AbilityFeature::ALL.into_iter().map(|f| (f, self.get(f)))
    }

    /// Whether the hero yielded no signal at all.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }

    /// Combined strength of all control dimensions, capped at 1.0.
    #[must_use]
    pub fn control_strength(&self) -> f32 {
        AbilityFeature::CONTROL
            .iter()
            .map(|f| self.get(*f))
            .sum::<f32>()
            .min(1.0)
    }

    /// Element-wise sum of two vectors, capped at 1.0 per dimension.
    #[must_use]
    pub fn saturating_add(&self, other: &Self) -> Self {
        let mut out = *self;
        for (v, o) in out.0.iter_mut().zip(other.0) {
            *v = (*v + o).min(1.0);
        }
        out
    }

    fn clamp(&mut self) {
        for v in &mut self.0 {
            *v = v.clamp(0.0, 1.0);
        }
    }

    /// Divides a feature group by `max(floor, group sum)`.
    fn normalize_group(&mut self, group: &[AbilityFeature], floor: f32) {
        let sum = group.iter().map(|f| self[*f]).sum::<f32>();
        let divisor = f32::max(floor, sum);
        for f in group {
            self[*f] /= divisor;
        }
    }
}

impl Index<AbilityFeature> for FeatureVector {
    type Output = f32;

    fn index(&self, feature: AbilityFeature) -> &Self::Output {
        &self.0[feature.index()]
    }
}

impl IndexMut<AbilityFeature> for FeatureVector {
    fn index_mut(&mut self, feature: AbilityFeature) -> &mut Self::Output {
        &mut self.0[feature.index()]
    }
}

impl Serialize for FeatureVector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(AbilityFeature::LEN))?;
        for (feature, value) in self.iter() {
            map.serialize_entry(feature.id(), &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_ids_are_unique() {
        let mut ids = AbilityFeature::ALL.map(AbilityFeature::id).to_vec();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), AbilityFeature::LEN);
    }

    #[test]
    fn test_feature_index_matches_all_order() {
        for (i, feature) in AbilityFeature::ALL.into_iter().enumerate() {
            assert_eq!(feature.index(), i);
        }
    }

    #[test]
    fn test_normalize_group_uses_floor() {
        let mut v = FeatureVector::ZERO;
        v[AbilityFeature::StunScore] = 1.5;
        v.normalize_group(&AbilityFeature::CONTROL, 3.0);
        assert!((v.get(AbilityFeature::StunScore) - 0.5).abs() < 1e-6);

        let mut v = FeatureVector::ZERO;
        v[AbilityFeature::StunScore] = 3.0;
        v[AbilityFeature::SlowScore] = 1.0;
        v.normalize_group(&AbilityFeature::CONTROL, 3.0);
        assert!((v.get(AbilityFeature::StunScore) - 0.75).abs() < 1e-6);
        assert!((v.get(AbilityFeature::SlowScore) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_saturating_add_caps_at_one() {
        let mut a = FeatureVector::ZERO;
        a[AbilityFeature::AoeImpact] = 0.75;
        let sum = a.saturating_add(&a);
        assert_eq!(sum.get(AbilityFeature::AoeImpact), 1.0);
        assert_eq!(sum.get(AbilityFeature::StunScore), 0.0);
    }

    #[test]
    fn test_serializes_as_feature_map() {
        let mut v = FeatureVector::ZERO;
        v[AbilityFeature::MobilityScore] = 0.5;
        let json = serde_json::to_value(v).unwrap();
        assert_eq!(json["mobility_score"], 0.5);
        assert_eq!(json["stun_score"], 0.0);
        assert_eq!(json.as_object().unwrap().len(), AbilityFeature::LEN);
    }
}
