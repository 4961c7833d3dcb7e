use oxidraft_engine::HeroId;

use super::{RankBracket, RelationshipProvider};

/// Weighted mix of two providers.
///
/// Every lookup returns `w · primary + (1 − w) · secondary`, where `w` is
/// `primary_weight` clamped to \[0.0, 1.0\].
#[derive(Debug)]
pub struct BlendedProvider<P, S> {
    primary: P,
    secondary: S,
    primary_weight: f32,
}

impl<P, S> BlendedProvider<P, S>
where
    P: RelationshipProvider,
    S: RelationshipProvider,
{
    #[must_use]
    pub fn new(primary: P, secondary: S, primary_weight: f32) -> Self {
        Self {
            primary,
            secondary,
            primary_weight: primary_weight.clamp(0.0, 1.0),
        }
    }

    #[must_use]
    pub fn primary_weight(&self) -> f32 {
        self.primary_weight
    }

    fn blend(&self, primary: f32, secondary: f32) -> f32 {
        self.primary_weight * primary + (1.0 - self.primary_weight) * secondary
    }
}

impl<P, S> RelationshipProvider for BlendedProvider<P, S>
where
    P: RelationshipProvider,
    S: RelationshipProvider,
{
    fn win_rate(&self, hero: HeroId, bracket: &RankBracket) -> f32 {
        self.blend(
            self.primary.win_rate(hero, bracket),
            self.secondary.win_rate(hero, bracket),
        )
    }

    fn pick_rate(&self, hero: HeroId, bracket: &RankBracket) -> f32 {
        self.blend(
            self.primary.pick_rate(hero, bracket),
            self.secondary.pick_rate(hero, bracket),
        )
    }

    fn synergy(&self, a: HeroId, b: HeroId) -> f32 {
        self.blend(self.primary.synergy(a, b), self.secondary.synergy(a, b))
    }

    fn counter(&self, hero: HeroId, against: HeroId) -> f32 {
        self.blend(
            self.primary.counter(hero, against),
            self.secondary.counter(hero, against),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relationship::{NEUTRAL, RelationshipIndex};

    #[test]
    fn test_blend_weights_lookups() {
        let fresh = RelationshipIndex::neutral().with_synergy(HeroId(1), HeroId(2), 1.0);
        let baseline = RelationshipIndex::neutral().with_synergy(HeroId(1), HeroId(2), 0.0);
        let blended = BlendedProvider::new(fresh, baseline, 0.75);
        assert!((blended.synergy(HeroId(1), HeroId(2)) - 0.75).abs() < 1e-6);
        assert!((blended.counter(HeroId(1), HeroId(2)) - NEUTRAL).abs() < 1e-6);
    }

    #[test]
    fn test_weight_is_clamped() {
        let blended =
            BlendedProvider::new(RelationshipIndex::neutral(), RelationshipIndex::neutral(), 4.0);
        assert_eq!(blended.primary_weight(), 1.0);
    }
}
