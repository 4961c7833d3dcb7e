//! Skill-dependent choice from a ranked candidate list.

use oxidraft_engine::{DraftError, InvalidAction};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Selection window of the statistics-only scoring profile.
pub const SIMPLE_SELECTION_WINDOW: usize = 5;

/// Selection window of the multi-factor scoring profile.
pub const MULTI_FACTOR_SELECTION_WINDOW: usize = 3;

/// Below this skill every choice is uniformly random.
pub const RANDOM_SKILL_THRESHOLD: f32 = 0.2;

/// Picks one entry from a best-first ranking according to a skill level.
///
/// # Selection Rule
///
/// - If `skill < 0.2`, or a uniform draw from \[0, 1) exceeds `skill`, choose uniformly
///   from the whole ranking.
/// - Otherwise take index `floor(n · (1 − skill))` with `n = min(window, len) − 1`.
///
/// At skill 1.0 the top entry is always chosen; lower skills both drift down the
/// window and blunder more often.
///
/// # Example
///
/// ```
/// use oxidraft_evaluator::selector::DifficultySelector;
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
///
/// let mut rng = Pcg32::seed_from_u64(7);
/// let ranked = ["best", "second", "third"];
/// let selector = DifficultySelector::new(1.0, 3);
/// assert_eq!(selector.choose(&ranked, &mut rng).unwrap(), &"best");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultySelector {
    skill: f32,
    window: usize,
}

impl Default for DifficultySelector {
    fn default() -> Self {
        Self::new(1.0, MULTI_FACTOR_SELECTION_WINDOW)
    }
}

impl DifficultySelector {
    /// `skill` is clamped to \[0.0, 1.0\]; a zero window is treated as 1.
    #[must_use]
    pub fn new(skill: f32, window: usize) -> Self {
        Self {
            skill: skill.clamp(0.0, 1.0),
            window: window.max(1),
        }
    }

    #[must_use]
    pub fn skill(&self) -> f32 {
        self.skill
    }

    #[must_use]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Index [`Self::choose`] takes when it does not fall back to a random pick.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn skilled_index(&self, len: usize) -> usize {
        let n = self.window.min(len).saturating_sub(1);
        ((n as f32 * (1.0 - self.skill)).floor() as usize).min(n)
    }

    /// Chooses one entry of `ranked`, which must be ordered best first.
    ///
    /// Fails with [`InvalidAction::EmptyCandidatePool`] when `ranked` is empty.
    pub fn choose<'a, T, R>(&self, ranked: &'a [T], rng: &mut R) -> Result<&'a T, DraftError>
    where
        R: Rng + ?Sized,
    {
        if ranked.is_empty() {
            return Err(InvalidAction::EmptyCandidatePool.into());
        }
        let random = self.skill < RANDOM_SKILL_THRESHOLD || rng.random::<f32>() > self.skill;
        let index = if random {
            rng.random_range(0..ranked.len())
        } else {
            self.skilled_index(ranked.len())
        };
        tracing::trace!(index, random, skill = self.skill, "selected candidate");
        Ok(&ranked[index])
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_empty_pool_is_invalid() {
        let mut rng = Pcg32::seed_from_u64(0);
        let ranked: [u32; 0] = [];
        assert_eq!(
            DifficultySelector::new(1.0, 3).choose(&ranked, &mut rng),
            Err(DraftError::InvalidAction(InvalidAction::EmptyCandidatePool))
        );
    }

    #[test]
    fn test_full_skill_always_takes_top() {
        let mut rng = Pcg32::seed_from_u64(42);
        let ranked = (0..10).collect::<Vec<u32>>();
        let selector = DifficultySelector::new(1.0, SIMPLE_SELECTION_WINDOW);
        for _ in 0..1000 {
            assert_eq!(selector.choose(&ranked, &mut rng), Ok(&0));
        }
    }

    #[test]
    fn test_low_skill_visits_many_candidates() {
        let mut rng = Pcg32::seed_from_u64(42);
        let ranked = (0..10).collect::<Vec<u32>>();
        let selector = DifficultySelector::new(0.1, MULTI_FACTOR_SELECTION_WINDOW);
        let seen = (0..1000)
            .map(|_| *selector.choose(&ranked, &mut rng).unwrap())
            .collect::<BTreeSet<_>>();
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_skilled_index_walks_down_window() {
        assert_eq!(DifficultySelector::new(1.0, 5).skilled_index(10), 0);
        assert_eq!(DifficultySelector::new(0.5, 5).skilled_index(10), 2);
        assert_eq!(DifficultySelector::new(0.2, 5).skilled_index(10), 3);
        assert_eq!(DifficultySelector::new(0.2, 5).skilled_index(2), 0);
        assert_eq!(DifficultySelector::new(0.5, 3).skilled_index(1), 0);
    }

    #[test]
    fn test_skill_is_clamped() {
        assert_eq!(DifficultySelector::new(3.0, 0).skill(), 1.0);
        assert_eq!(DifficultySelector::new(3.0, 0).window(), 1);
    }
}
