//! Hero catalog data model and draft state machine.
//!
//! This crate owns the two pieces of the drafting core that do not depend on any
//! statistics:
//!
//! - [`hero`] - Immutable hero and ability records, role frequencies and the
//!   [`HeroCatalog`] interface the rest of the system reads heroes through
//! - [`draft`] - The ban/pick schedule and the [`DraftState`] state machine that
//!   enforces turn ownership, hero availability and undo
//!
//! Scoring, recommendation and automated selection live in `oxidraft-evaluator`,
//! which reads a [`DraftState`] but never mutates it except through the public
//! `pick`/`ban`/`undo` operations.
//!
//! # Example
//!
//! ```
//! use oxidraft_engine::{
//!     Ability, AbilityType, DraftConfig, DraftState, Hero, HeroId, InMemoryCatalog,
//!     PrimaryAttribute, Side,
//! };
//!
//! let heroes = (1..=30)
//!     .map(|id| {
//!         Hero::new(HeroId(id), format!("hero_{id}"), format!("Hero {id}"), PrimaryAttribute::Strength)
//!             .with_ability(Ability::new("Strike", "Stuns the target.", AbilityType::Basic))
//!     })
//!     .collect::<Vec<_>>();
//! let catalog = InMemoryCatalog::new(heroes).unwrap();
//!
//! let mut draft = DraftState::new(&DraftConfig::default(), &catalog).unwrap();
//! assert_eq!(draft.current_team(), Some(Side::Radiant));
//! assert!(draft.is_ban_phase());
//!
//! draft.ban(HeroId(1)).unwrap();
//! assert_eq!(draft.current_team(), Some(Side::Dire));
//! draft.undo().unwrap();
//! assert!(draft.history().is_empty());
//! ```

pub use self::{draft::*, hero::*};

pub mod draft;
pub mod hero;

/// Errors produced by draft operations.
///
/// None of these are fatal: a failing operation leaves the draft untouched and the
/// caller may simply retry with different input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DraftError {
    /// The hero is unknown to the catalog, or already picked or banned.
    #[display("hero {_0} is unavailable")]
    HeroUnavailable(#[error(not(source))] HeroId),
    /// The operation does not fit the current phase of the draft.
    #[display("invalid action: {_0}")]
    InvalidAction(#[error(not(source))] InvalidAction),
    #[display("nothing to undo")]
    NothingToUndo,
}

/// Why an action was rejected as [`DraftError::InvalidAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InvalidAction {
    #[display("a pick was submitted during a ban phase")]
    NotPickPhase,
    #[display("a ban was submitted during a pick phase")]
    NotBanPhase,
    #[display("the draft is already complete")]
    DraftComplete,
    #[display("no candidates to choose from")]
    EmptyCandidatePool,
}

impl From<InvalidAction> for DraftError {
    fn from(reason: InvalidAction) -> Self {
        Self::InvalidAction(reason)
    }
}
