use std::{fmt, str::FromStr};

use oxidraft_engine::HeroId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PairKeyError {
    #[display("invalid hero pair key {_0:?}: expected two hero ids joined by '_'")]
    Malformed(#[error(not(source))] String),
    #[display("invalid hero pair key {_0:?}: a hero cannot pair with itself")]
    SameHero(#[error(not(source))] String),
}

fn split_pair(s: &str) -> Result<(HeroId, HeroId), PairKeyError> {
    let malformed = || PairKeyError::Malformed(s.to_owned());
    let (a, b) = s.split_once('_').ok_or_else(malformed)?;
    let a = a.parse::<HeroId>().map_err(|_| malformed())?;
    let b = b.parse::<HeroId>().map_err(|_| malformed())?;
    if a == b {
        return Err(PairKeyError::SameHero(s.to_owned()));
    }
    Ok((a, b))
}

/// Unordered pair of distinct heroes, written `"<min>_<max>"`.
///
/// Synergy is symmetric, so `(a, b)` and `(b, a)` share one key.
///
/// # Example
///
/// ```
/// use oxidraft_engine::HeroId;
/// use oxidraft_evaluator::relationship::PairKey;
///
/// let key = PairKey::new(HeroId(7), HeroId(2)).unwrap();
/// assert_eq!(key.to_string(), "2_7");
/// assert_eq!("7_2".parse::<PairKey>().unwrap(), key);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    low: HeroId,
    high: HeroId,
}

impl PairKey {
    /// Returns `None` when both ids are the same hero.
    #[must_use]
    pub fn new(a: HeroId, b: HeroId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    #[must_use]
    pub fn low(&self) -> HeroId {
        self.low
    }

    #[must_use]
    pub fn high(&self) -> HeroId {
        self.high
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.low, self.high)
    }
}

impl FromStr for PairKey {
    type Err = PairKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = split_pair(s)?;
        // `split_pair` rejects equal ids
        Self::new(a, b).ok_or_else(|| PairKeyError::SameHero(s.to_owned()))
    }
}

/// Ordered pair of distinct heroes, written `"<hero>_<against>"`.
///
/// Counter relationships are directional: how well `hero` does when facing `against`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderedPairKey {
    hero: HeroId,
    against: HeroId,
}

impl OrderedPairKey {
    #[must_use]
    pub fn new(hero: HeroId, against: HeroId) -> Option<Self> {
        (hero != against).then_some(Self { hero, against })
    }

    #[must_use]
    pub fn hero(&self) -> HeroId {
        self.hero
    }

    #[must_use]
    pub fn against(&self) -> HeroId {
        self.against
    }
}

impl fmt::Display for OrderedPairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.hero, self.against)
    }
}

impl FromStr for OrderedPairKey {
    type Err = PairKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hero, against) = split_pair(s)?;
        Ok(Self { hero, against })
    }
}

macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

string_serde!(PairKey);
string_serde!(OrderedPairKey);
