//! Scoring and selection of draft candidates.
//!
//! This crate implements the recommendation side of the drafting core in four layers:
//!
//! 1. **Ability Features** ([`ability_feature`]) - Derives a normalized
//!    [`FeatureVector`](ability_feature::FeatureVector) per hero from ability text, cached
//!    for the lifetime of the process.
//!
//! 2. **Relationships** ([`relationship`]) - Win rates, pick rates, synergy and counter
//!    numbers supplied through the [`RelationshipProvider`](relationship::RelationshipProvider)
//!    trait. Tables are produced offline and consumed read-only.
//!
//! 3. **Recommendation** ([`recommendation`]) - Scores every available hero with seven
//!    weighted components ([`score_component`]) and ranks them.
//!
//! 4. **Selection** ([`selector`], [`bot`]) - Turns a ranking into a single choice with a
//!    skill knob, and drives automated drafters.
//!
//! # Architecture
//!
//! ```text
//! DraftBot (commit one action)
//!     ↓ uses
//! DifficultySelector (pick from ranking by skill)
//!     ↓ uses
//! RecommendationEngine (rank candidates)
//!     ↓ uses
//! ScoreComponentSource × 7 ← FeatureCache, RelationshipProvider, TeamProfile
//! ```
//!
//! # Design Principles
//!
//! ## Linear Evaluation Model
//!
//! A hero's score is a weighted sum of component values, each in \[0.0, 1.0\]:
//!
//! ```text
//! score = w_win·win_rate + w_pick·pick_rate + w_ability·ability_synergy
//!       + w_team·team_synergy + w_counter·counter + w_pos·position_diversity
//!       + w_meta·meta_power
//! ```
//!
//! Weights are configuration ([`config::ComponentWeights`]) and must sum to 1.0. There is
//! no learned model: every component is a deterministic function of the draft, the hero
//! catalog and the relationship tables.
//!
//! ## Injected Randomness
//!
//! The only sources of randomness are the optional score jitter and the low-skill branch
//! of the selector. Both take a caller-supplied [`rand::Rng`], so tests and replays can
//! pin them to a seed. Cached feature vectors never contain random terms.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use oxidraft_engine::{
//!     Ability, AbilityType, DraftActionKind, DraftConfig, DraftState, Hero, HeroId,
//!     InMemoryCatalog, PrimaryAttribute, Side,
//! };
//! use oxidraft_evaluator::{
//!     config::EngineConfig, recommendation::RecommendationEngine,
//!     relationship::RelationshipIndex,
//! };
//!
//! let heroes = (1..=20)
//!     .map(|id| {
//!         Hero::new(HeroId(id), format!("hero_{id}"), format!("Hero {id}"), PrimaryAttribute::Agility)
//!             .with_ability(Ability::new("Bash", "Stuns enemies in a radius.", AbilityType::Basic))
//!     })
//!     .collect::<Vec<_>>();
//! let catalog = Arc::new(InMemoryCatalog::new(heroes).unwrap());
//! let draft = DraftState::new(&DraftConfig::default(), catalog.as_ref()).unwrap();
//!
//! let engine = RecommendationEngine::new(
//!     catalog,
//!     Box::new(RelationshipIndex::neutral()),
//!     EngineConfig::default(),
//! )
//! .unwrap();
//! let picks = engine.recommend(&draft, Side::Radiant, DraftActionKind::Pick, 5);
//! assert_eq!(picks.len(), 5);
//! ```

pub mod ability_feature;
pub mod bot;
pub mod config;
pub mod recommendation;
pub mod relationship;
pub mod score_component;
pub mod selector;
pub mod team_profile;
