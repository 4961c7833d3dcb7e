use oxidraft_engine::DraftConfig;
use oxidraft_evaluator::config::{EngineConfig, ScoringProfile};
use serde::{Deserialize, Serialize};

/// Weight of the primary relationship tables when a baseline is blended in.
const DEFAULT_PRIMARY_WEIGHT: f32 = 0.7;

/// Contents of the `--config` file.
///
/// ```json
/// {
///   "draft": { "mode": "captains_mode", "first_side": "dire" },
///   "engine": { "rank_bracket": "immortal", "difficulty": 0.8 },
///   "profile": "simple",
///   "primary_weight": 0.6
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub draft: DraftConfig,
    pub engine: EngineConfig,
    /// When set, replaces `engine.weights` and picks the selection window.
    pub profile: Option<ScoringProfile>,
    /// Share of the primary tables when `--baseline` tables are given.
    pub primary_weight: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            draft: DraftConfig::default(),
            engine: EngineConfig::default(),
            profile: None,
            primary_weight: DEFAULT_PRIMARY_WEIGHT,
        }
    }
}

impl AppConfig {
    /// Applies the scoring profile, if any, to the engine configuration.
    pub fn engine_config(&self) -> EngineConfig {
        match self.profile {
            Some(profile) => EngineConfig {
                weights: profile.weights(),
                ..self.engine.clone()
            },
            None => self.engine.clone(),
        }
    }

    pub fn selection_window(&self) -> usize {
        self.profile.unwrap_or_default().selection_window()
    }
}
