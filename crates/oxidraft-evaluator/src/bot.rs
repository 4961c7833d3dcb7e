//! Automated drafters.
//!
//! A [`DraftBot`] combines a [`RecommendationEngine`] with a [`DifficultySelector`]:
//! on its turn it ranks the available heroes for the scheduled action, picks one
//! according to its skill and commits it to the draft. [`auto_draft`] lets two bots
//! play a whole draft.
//!
//! Bots are also how a caller resolves an expired per-action timer: force a
//! [`DraftBot::take_turn`] for the idle side.

use std::{fmt, str::FromStr};

use oxidraft_engine::{DraftAction, DraftError, DraftState, InvalidAction, Side};
use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{recommendation::RecommendationEngine, selector::DifficultySelector};

/// Seed for a reproducible automated draft.
///
/// Displayed, parsed and serialized as 32 hex digits.
///
/// # Example
///
/// ```
/// use oxidraft_evaluator::bot::DraftSeed;
/// use rand::Rng as _;
///
/// let seed: DraftSeed = rand::rng().random();
/// let json = serde_json::to_string(&seed).unwrap();
/// assert_eq!(json.len(), 34);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftSeed([u8; 16]);

impl DraftSeed {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

/// Length of a [`DraftSeed`] in hex digits.
const SEED_HEX_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {_0:?}, expected {SEED_HEX_LEN} hex digits")]
pub struct ParseDraftSeedError(#[error(not(source))] String);

impl fmt::Display for DraftSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for DraftSeed {
    type Err = ParseDraftSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != SEED_HEX_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseDraftSeedError(s.to_owned()));
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseDraftSeedError(s.to_owned()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for DraftSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DraftSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<DraftSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> DraftSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        DraftSeed(seed)
    }
}

/// An automated drafter for one side.
#[derive(Debug, Clone, Copy)]
pub struct DraftBot<'a> {
    engine: &'a RecommendationEngine,
    selector: DifficultySelector,
    jitter: bool,
}

impl<'a> DraftBot<'a> {
    /// A bot that ranks with jitter and selects with `selector`.
    #[must_use]
    pub fn new(engine: &'a RecommendationEngine, selector: DifficultySelector) -> Self {
        Self {
            engine,
            selector,
            jitter: true,
        }
    }

    /// Disables score jitter; the selector stays the only source of randomness.
    #[must_use]
    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    #[must_use]
    pub fn selector(&self) -> &DifficultySelector {
        &self.selector
    }

    /// Performs the scheduled action for whichever side is to move.
    ///
    /// # Errors
    ///
    /// - [`InvalidAction::DraftComplete`] when the schedule is exhausted
    /// - [`InvalidAction::EmptyCandidatePool`] when no hero is available
    pub fn take_turn<R>(&self, state: &mut DraftState, rng: &mut R) -> Result<DraftAction, DraftError>
    where
        R: Rng + ?Sized,
    {
        let step = state
            .current_step()
            .ok_or(InvalidAction::DraftComplete)?;
        let ranked = if self.jitter {
            self.engine
                .rank_candidates_jittered(state, step.side, step.kind, rng)
        } else {
            self.engine.rank_candidates(state, step.side, step.kind)
        };
        let hero = self.selector.choose(&ranked, rng)?.hero.id();
        let action = state.apply(step.kind, hero)?;
        tracing::debug!(
            side = %action.side,
            kind = %action.kind,
            hero = %action.hero,
            skill = self.selector.skill(),
            "bot acted"
        );
        Ok(action)
    }
}

/// Plays `state` to completion with one bot per side.
///
/// Returns the actions taken, in order. Stops at the first error, leaving the
/// actions applied so far in place.
pub fn auto_draft<R>(
    state: &mut DraftState,
    radiant: &DraftBot<'_>,
    dire: &DraftBot<'_>,
    rng: &mut R,
) -> Result<Vec<DraftAction>, DraftError>
where
    R: Rng + ?Sized,
{
    let mut actions = vec![];
    while let Some(side) = state.current_team() {
        let bot = match side {
            Side::Radiant => radiant,
            Side::Dire => dire,
        };
        actions.push(bot.take_turn(state, rng)?);
    }
    Ok(actions)
}
