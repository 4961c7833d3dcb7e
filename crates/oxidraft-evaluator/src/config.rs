//! Engine configuration.
//!
//! Everything that shapes a score lives here: component weights, the numeric
//! constants behind individual components, the difficulty knob and the rank bracket
//! statistics are read for. All structs deserialize with `#[serde(default)]`, so a
//! configuration file only names what it changes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    relationship::RankBracket,
    score_component::ScoreComponent,
    selector::{MULTI_FACTOR_SELECTION_WINDOW, SIMPLE_SELECTION_WINDOW},
};

/// Allowed distance of the weight sum from 1.0.
const WEIGHT_SUM_TOLERANCE: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum WeightsError {
    #[display("component weights sum to {_0}, expected 1.0")]
    BadSum(#[error(not(source))] f32),
    #[display("weight of {_0} is negative")]
    Negative(#[error(not(source))] ScoreComponent),
}

/// Weight of each score component. Must be non-negative and sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentWeights {
    pub win_rate: f32,
    pub pick_rate: f32,
    pub ability_synergy: f32,
    pub team_synergy: f32,
    pub counter: f32,
    pub position_diversity: f32,
    pub meta_power: f32,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            win_rate: 0.15,
            pick_rate: 0.10,
            ability_synergy: 0.20,
            team_synergy: 0.15,
            counter: 0.15,
            position_diversity: 0.15,
            meta_power: 0.10,
        }
    }
}

impl ComponentWeights {
    /// Statistics-heavy weights: only win rate, pick rate, team synergy and counters.
    #[must_use]
    pub fn simple() -> Self {
        Self {
            win_rate: 0.4,
            pick_rate: 0.2,
            ability_synergy: 0.0,
            team_synergy: 0.2,
            counter: 0.2,
            position_diversity: 0.0,
            meta_power: 0.0,
        }
    }

    #[must_use]
    pub fn get(&self, component: ScoreComponent) -> f32 {
        match component {
            ScoreComponent::WinRate => self.win_rate,
            ScoreComponent::PickRate => self.pick_rate,
            ScoreComponent::AbilitySynergy => self.ability_synergy,
            ScoreComponent::TeamSynergy => self.team_synergy,
            ScoreComponent::Counter => self.counter,
            ScoreComponent::PositionDiversity => self.position_diversity,
            ScoreComponent::MetaPower => self.meta_power,
        }
    }

    #[must_use]
    pub fn sum(&self) -> f32 {
        ScoreComponent::ALL.iter().map(|c| self.get(*c)).sum()
    }

    pub fn validate(&self) -> Result<(), WeightsError> {
        if let Some(component) = ScoreComponent::ALL
            .into_iter()
            .find(|c| self.get(*c) < 0.0)
        {
            return Err(WeightsError::Negative(component));
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightsError::BadSum(sum));
        }
        Ok(())
    }
}

/// Numeric constants used inside the individual score components.
///
/// The defaults are hand-tuned and kept together so they can be reviewed and
/// adjusted without touching scoring code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConstants {
    /// Team area impact at or above this counts as covered.
    pub aoe_threshold: f32,
    /// Team control strength at or above this counts as covered.
    pub control_threshold: f32,
    /// Team magical/physical damage at or above this counts as covered.
    pub damage_threshold: f32,
    /// Ability synergy bonus for filling an area-impact or control gap.
    pub capability_bonus: f32,
    /// Ability synergy bonus for filling a damage-type gap.
    pub damage_gap_bonus: f32,

    /// A position with team coverage below this is under-filled.
    pub position_covered_threshold: f32,
    /// Maximum bonus for heroes with several primary positions.
    pub flexibility_bonus: f32,
    /// Fraction of the position score removed when role data is synthetic.
    pub synthetic_role_discount: f32,

    /// Share of win rate in meta power; pick rate gets the rest.
    pub meta_win_rate_share: f32,
    /// Win rate above which an early pick gets [`Self::early_meta_bonus`].
    pub strong_win_rate: f32,
    pub early_meta_bonus: f32,
    /// Pick rate above which an available hero counts as popular.
    pub popular_pick_rate: f32,
    /// Counter value above which a popular hero is a hard counter.
    pub hard_counter_threshold: f32,
    /// Number of popular hard counters that triggers the counter penalty.
    pub popular_counters_for_penalty: usize,
    pub early_counter_penalty: f32,
    pub late_counter_penalty: f32,

    /// The draft is early while fewer than this many picks have been made in total.
    pub early_draft_picks: usize,
}

impl Default for TuningConstants {
    fn default() -> Self {
        Self {
            aoe_threshold: 0.5,
            control_threshold: 0.5,
            damage_threshold: 0.6,
            capability_bonus: 0.3,
            damage_gap_bonus: 0.2,
            position_covered_threshold: 0.5,
            flexibility_bonus: 0.2,
            synthetic_role_discount: 0.15,
            meta_win_rate_share: 0.7,
            strong_win_rate: 0.55,
            early_meta_bonus: 0.2,
            popular_pick_rate: 0.15,
            hard_counter_threshold: 0.65,
            popular_counters_for_penalty: 3,
            early_counter_penalty: 0.15,
            late_counter_penalty: 0.05,
            early_draft_picks: 4,
        }
    }
}

/// Which of the two scoring setups to use.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum ScoringProfile {
    /// Win rate, pick rate, team synergy and counters only; wider selection window.
    #[display("simple")]
    Simple,
    /// All seven components; narrower selection window.
    #[default]
    #[display("multi_factor")]
    MultiFactor,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown scoring profile {_0:?}, expected \"simple\" or \"multi_factor\"")]
pub struct ParseScoringProfileError(#[error(not(source))] String);

impl FromStr for ScoringProfile {
    type Err = ParseScoringProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "simple" => Ok(Self::Simple),
            "multi_factor" => Ok(Self::MultiFactor),
            _ => Err(ParseScoringProfileError(s.to_owned())),
        }
    }
}

impl ScoringProfile {
    #[must_use]
    pub fn weights(self) -> ComponentWeights {
        match self {
            Self::Simple => ComponentWeights::simple(),
            Self::MultiFactor => ComponentWeights::default(),
        }
    }

    #[must_use]
    pub fn selection_window(self) -> usize {
        match self {
            Self::Simple => SIMPLE_SELECTION_WINDOW,
            Self::MultiFactor => MULTI_FACTOR_SELECTION_WINDOW,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Bracket win and pick rates are looked up for.
    pub rank_bracket: RankBracket,
    /// In \[0.0, 1.0\]; higher means less score jitter.
    pub difficulty: f32,
    /// Upper bound of the jitter at difficulty 0.
    pub jitter_scale: f32,
    pub weights: ComponentWeights,
    pub tuning: TuningConstants,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rank_bracket: RankBracket::default(),
            difficulty: 0.5,
            jitter_scale: 0.05,
            weights: ComponentWeights::default(),
            tuning: TuningConstants::default(),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn for_profile(profile: ScoringProfile) -> Self {
        Self {
            weights: profile.weights(),
            ..Self::default()
        }
    }

    /// Exclusive upper bound of the jitter added to each score.
    #[must_use]
    pub fn jitter_range(&self) -> f32 {
        (self.jitter_scale * (1.0 - self.difficulty.clamp(0.0, 1.0))).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_are_valid() {
        assert_eq!(ComponentWeights::default().validate(), Ok(()));
        assert_eq!(ComponentWeights::simple().validate(), Ok(()));
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let weights = ComponentWeights {
            win_rate: 0.5,
            ..ComponentWeights::default()
        };
        assert!(matches!(weights.validate(), Err(WeightsError::BadSum(_))));
    }

    #[test]
    fn test_weights_must_not_be_negative() {
        let weights = ComponentWeights {
            win_rate: -0.1,
            pick_rate: 0.35,
            ..ComponentWeights::default()
        };
        assert_eq!(
            weights.validate(),
            Err(WeightsError::Negative(ScoreComponent::WinRate))
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"difficulty": 0.9, "weights": {"win_rate": 0.2}}"#).unwrap();
        assert_eq!(config.difficulty, 0.9);
        assert_eq!(config.weights.win_rate, 0.2);
        assert_eq!(config.weights.meta_power, 0.10);
        assert_eq!(config.tuning, TuningConstants::default());
    }

    #[test]
    fn test_jitter_range_shrinks_with_difficulty() {
        let mut config = EngineConfig::default();
        config.difficulty = 0.0;
        assert!((config.jitter_range() - 0.05).abs() < 1e-6);
        config.difficulty = 1.0;
        assert_eq!(config.jitter_range(), 0.0);
    }

    #[test]
    fn test_profile_parsing() {
        assert_eq!("simple".parse::<ScoringProfile>().unwrap(), ScoringProfile::Simple);
        assert_eq!(
            "multi-factor".parse::<ScoringProfile>().unwrap(),
            ScoringProfile::MultiFactor
        );
        assert!("fancy".parse::<ScoringProfile>().is_err());
        assert_eq!(ScoringProfile::Simple.selection_window(), 5);
        assert_eq!(ScoringProfile::MultiFactor.selection_window(), 3);
    }
}
