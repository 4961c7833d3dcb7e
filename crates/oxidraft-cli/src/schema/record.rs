use chrono::{DateTime, Utc};
use oxidraft_engine::DraftSummary;
use oxidraft_evaluator::{bot::DraftSeed, config::ScoringProfile};
use serde::{Deserialize, Serialize};

use crate::schema::config::AppConfig;

/// Archived automated draft with everything needed to replay it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftRecord {
    /// Timestamp when the record was created (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    /// Seed of the random generator shared by both bots
    pub seed: DraftSeed,
    pub profile: ScoringProfile,
    /// Engine difficulty the scores were jittered with
    pub difficulty: f32,
    /// Whether the bots jittered scores before selecting
    pub jitter: bool,
    pub radiant: BotInfo,
    pub dire: BotInfo,
    /// Final picks, bans and the full action history
    pub summary: DraftSummary,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BotInfo {
    pub skill: f32,
    pub window: usize,
}

impl DraftRecord {
    /// Makes `config` score the way it did when this draft was recorded.
    pub fn apply_to(&self, config: &mut AppConfig) {
        config.profile = Some(self.profile);
        config.engine.difficulty = self.difficulty;
    }
}
