use std::collections::BTreeMap;

use oxidraft_engine::HeroId;
use serde::{Deserialize, Serialize};

use super::{OrderedPairKey, PairKey};

/// Skill bracket that win and pick rates are reported for (e.g. `"herald"`, `"immortal"`).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct RankBracket(String);

impl RankBracket {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RankBracket {
    fn default() -> Self {
        Self::new("all")
    }
}

impl From<&str> for RankBracket {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Bulk access to every relationship number at once.
///
/// Implemented by whatever produces the tables (a database, a JSON export, a test
/// fixture) and consumed once by [`RelationshipIndex::from_source`](super::RelationshipIndex::from_source).
pub trait RelationshipSource {
    fn win_rates(&self) -> &BTreeMap<RankBracket, BTreeMap<HeroId, f32>>;

    fn pick_rates(&self) -> &BTreeMap<RankBracket, BTreeMap<HeroId, f32>>;

    fn synergies(&self) -> &BTreeMap<PairKey, f32>;

    fn counters(&self) -> &BTreeMap<OrderedPairKey, f32>;
}

/// Relationship tables in their serialized form.
///
/// ```json
/// {
///   "win_rates": { "immortal": { "1": 0.52 } },
///   "pick_rates": { "immortal": { "1": 0.18 } },
///   "synergies": { "1_14": 0.61 },
///   "counters": { "1_14": 0.44 }
/// }
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipTables {
    pub win_rates: BTreeMap<RankBracket, BTreeMap<HeroId, f32>>,
    pub pick_rates: BTreeMap<RankBracket, BTreeMap<HeroId, f32>>,
    pub synergies: BTreeMap<PairKey, f32>,
    pub counters: BTreeMap<OrderedPairKey, f32>,
}

impl RelationshipSource for RelationshipTables {
    fn win_rates(&self) -> &BTreeMap<RankBracket, BTreeMap<HeroId, f32>> {
        &self.win_rates
    }

    fn pick_rates(&self) -> &BTreeMap<RankBracket, BTreeMap<HeroId, f32>> {
        &self.pick_rates
    }

    fn synergies(&self) -> &BTreeMap<PairKey, f32> {
        &self.synergies
    }

    fn counters(&self) -> &BTreeMap<OrderedPairKey, f32> {
        &self.counters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_deserialize() {
        let json = r#"{
            "win_rates": { "immortal": { "1": 0.52 } },
            "synergies": { "14_1": 0.61 },
            "counters": { "1_14": 0.44 }
        }"#;
        let tables: RelationshipTables = serde_json::from_str(json).unwrap();
        assert_eq!(tables.win_rates[&RankBracket::from("immortal")][&HeroId(1)], 0.52);
        assert!(tables.pick_rates.is_empty());
        let synergy_key = PairKey::new(HeroId(1), HeroId(14)).unwrap();
        assert_eq!(tables.synergies[&synergy_key], 0.61);
        let counter_key = OrderedPairKey::new(HeroId(1), HeroId(14)).unwrap();
        assert_eq!(tables.counters[&counter_key], 0.44);
    }

    #[test]
    fn test_tables_reject_bad_keys() {
        let json = r#"{ "synergies": { "3_3": 0.5 } }"#;
        assert!(serde_json::from_str::<RelationshipTables>(json).is_err());
    }
}
