//! Hero relationship data.
//!
//! Four kinds of numbers feed the statistical and relational score components:
//!
//! - **Win rate** per hero and rank bracket
//! - **Pick rate** per hero and rank bracket
//! - **Synergy** per unordered hero pair ([`PairKey`])
//! - **Counter** per ordered hero pair ([`OrderedPairKey`])
//!
//! Tables are produced offline and read through [`RelationshipSource`]. The scoring
//! code only sees the [`RelationshipProvider`] trait, which answers single lookups
//! and substitutes documented defaults for anything missing:
//!
//! | Lookup    | Missing value                   |
//! |-----------|---------------------------------|
//! | win rate  | [`NEUTRAL`]                     |
//! | pick rate | [`PICK_RATE_FLOOR`]             |
//! | synergy   | [`NEUTRAL`]                     |
//! | counter   | [`NEUTRAL`]                     |
//!
//! [`RelationshipIndex`] is the in-memory provider; [`BlendedProvider`] mixes two
//! providers, for example fresh patch data with a long-term baseline.

use std::fmt;

use oxidraft_engine::HeroId;

pub use self::{blended::*, index::*, keys::*, tables::*};

mod blended;
mod index;
mod keys;
mod tables;

/// Value meaning "no information": an even matchup or an unremarkable pairing.
pub const NEUTRAL: f32 = 0.5;

/// Pick rate assumed for heroes the tables know nothing about.
pub const PICK_RATE_FLOOR: f32 = 0.1;

/// Point lookups of relationship numbers. All values are in \[0.0, 1.0\].
pub trait RelationshipProvider: fmt::Debug + Send + Sync {
    fn win_rate(&self, hero: HeroId, bracket: &RankBracket) -> f32;

    fn pick_rate(&self, hero: HeroId, bracket: &RankBracket) -> f32;

    /// How well `a` and `b` play on the same team. Symmetric.
    fn synergy(&self, a: HeroId, b: HeroId) -> f32;

    /// How well `hero` does against `against`. Not symmetric.
    fn counter(&self, hero: HeroId, against: HeroId) -> f32;
}

impl<P> RelationshipProvider for Box<P>
where
    P: RelationshipProvider + ?Sized,
{
    fn win_rate(&self, hero: HeroId, bracket: &RankBracket) -> f32 {
        (**self).win_rate(hero, bracket)
    }

    fn pick_rate(&self, hero: HeroId, bracket: &RankBracket) -> f32 {
        (**self).pick_rate(hero, bracket)
    }

    fn synergy(&self, a: HeroId, b: HeroId) -> f32 {
        (**self).synergy(a, b)
    }

    fn counter(&self, hero: HeroId, against: HeroId) -> f32 {
        (**self).counter(hero, against)
    }
}
