//! Immutable hero records.
//!
//! A [`Hero`] is loaded once (usually from a JSON catalog) and never mutated
//! afterwards. Everything the scoring system derives from a hero, such as ability
//! features or synergy numbers, is kept outside the record and keyed by [`HeroId`].

use serde::{Deserialize, Serialize};

pub use self::catalog::*;

mod catalog;

/// Unique numeric hero identifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(transparent)]
pub struct HeroId(pub u32);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryAttribute {
    Strength,
    Agility,
    Intelligence,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityType {
    #[default]
    Basic,
    Ultimate,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityBehavior {
    Passive,
    #[default]
    NoTarget,
    UnitTarget,
    PointTarget,
    Channelled,
    Toggle,
    AutoCast,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Magical,
    Physical,
    Pure,
    #[default]
    None,
}

/// A single hero ability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    name: String,
    description: String,
    #[serde(default, rename = "type")]
    ability_type: AbilityType,
    #[serde(default)]
    behavior: AbilityBehavior,
    #[serde(default)]
    damage_type: DamageType,
    #[serde(default)]
    pierces_spell_immunity: bool,
}

impl Ability {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        ability_type: AbilityType,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ability_type,
            behavior: AbilityBehavior::default(),
            damage_type: DamageType::default(),
            pierces_spell_immunity: false,
        }
    }

    #[must_use]
    pub fn with_behavior(mut self, behavior: AbilityBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    #[must_use]
    pub fn with_damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = damage_type;
        self
    }

    #[must_use]
    pub fn with_spell_immunity_piercing(mut self, pierces: bool) -> Self {
        self.pierces_spell_immunity = pierces;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn ability_type(&self) -> AbilityType {
        self.ability_type
    }

    #[must_use]
    pub fn is_ultimate(&self) -> bool {
        self.ability_type == AbilityType::Ultimate
    }

    #[must_use]
    pub fn behavior(&self) -> AbilityBehavior {
        self.behavior
    }

    #[must_use]
    pub fn damage_type(&self) -> DamageType {
        self.damage_type
    }

    #[must_use]
    pub fn pierces_spell_immunity(&self) -> bool {
        self.pierces_spell_immunity
    }
}

/// One of the five positional roles, from position 1 (carry) to 5 (hard support).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Position {
    #[display("carry")]
    Carry,
    #[display("mid")]
    Mid,
    #[display("offlane")]
    Offlane,
    #[display("soft support")]
    SoftSupport,
    #[display("hard support")]
    HardSupport,
}

impl Position {
    pub const LEN: usize = 5;
    pub const ALL: [Self; Self::LEN] = [
        Self::Carry,
        Self::Mid,
        Self::Offlane,
        Self::SoftSupport,
        Self::HardSupport,
    ];

    /// Zero-based index into per-position arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Position number as players call it (1-5).
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }
}

/// Minimum play frequency for a position to count as one of a hero's primary positions.
pub const PRIMARY_POSITION_THRESHOLD: f32 = 0.2;

/// How often a hero is played in each position.
///
/// Frequencies are each in \[0.0, 1.0\] and sum loosely to the hero's flexibility: a
/// one-trick carry looks like `[0.95, 0.05, 0, 0, 0]`, a flex hero spreads across
/// several positions. `synthetic` marks role data that was estimated rather than
/// observed in real matches; scoring discounts its confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRoleFrequency")]
pub struct RoleFrequency {
    frequencies: [f32; Position::LEN],
    synthetic: bool,
}

/// Role data as found in a catalog file, before clamping.
#[derive(Deserialize)]
struct RawRoleFrequency {
    frequencies: [f32; Position::LEN],
    #[serde(default)]
    synthetic: bool,
}

impl From<RawRoleFrequency> for RoleFrequency {
    fn from(raw: RawRoleFrequency) -> Self {
        if raw.synthetic {
            Self::synthetic(raw.frequencies)
        } else {
            Self::observed(raw.frequencies)
        }
    }
}

impl Default for RoleFrequency {
    fn default() -> Self {
        Self::synthetic_uniform()
    }
}

impl RoleFrequency {
    #[must_use]
    pub fn observed(frequencies: [f32; Position::LEN]) -> Self {
        Self {
            frequencies: frequencies.map(|f| f.clamp(0.0, 1.0)),
            synthetic: false,
        }
    }

    #[must_use]
    pub fn synthetic(frequencies: [f32; Position::LEN]) -> Self {
        Self {
            synthetic: true,
            ..Self::observed(frequencies)
        }
    }

    /// Equal frequency in every position, used when nothing is known about a hero.
    #[must_use]
    pub fn synthetic_uniform() -> Self {
        Self::synthetic([0.2; Position::LEN])
    }

    /// Rough role estimate from the primary attribute alone.
    #[must_use]
    pub fn synthetic_for_attribute(attribute: PrimaryAttribute) -> Self {
        match attribute {
            PrimaryAttribute::Strength => Self::synthetic([0.1, 0.2, 0.5, 0.2, 0.0]),
            PrimaryAttribute::Agility => Self::synthetic([0.6, 0.3, 0.1, 0.0, 0.0]),
            PrimaryAttribute::Intelligence => Self::synthetic([0.0, 0.3, 0.1, 0.3, 0.3]),
        }
    }

    #[must_use]
    pub fn frequency(&self, position: Position) -> f32 {
        self.frequencies[position.index()]
    }

    #[must_use]
    pub fn frequencies(&self) -> &[f32; Position::LEN] {
        &self.frequencies
    }

    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    #[must_use]
    pub fn total(&self) -> f32 {
        self.frequencies.iter().sum()
    }

    /// Positions played at least [`PRIMARY_POSITION_THRESHOLD`] of the time.
    pub fn primary_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL
            .into_iter()
            .filter(|p| self.frequency(*p) >= PRIMARY_POSITION_THRESHOLD)
    }
}

/// An immutable catalog entry.
///
/// A hero deserialized without `roles` gets the same attribute-based estimate as
/// [`Hero::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawHero")]
pub struct Hero {
    id: HeroId,
    name: String,
    display_name: String,
    primary_attribute: PrimaryAttribute,
    abilities: Vec<Ability>,
    innate_abilities: Vec<Ability>,
    roles: RoleFrequency,
}

#[derive(Deserialize)]
struct RawHero {
    id: HeroId,
    name: String,
    display_name: String,
    primary_attribute: PrimaryAttribute,
    #[serde(default)]
    abilities: Vec<Ability>,
    #[serde(default)]
    innate_abilities: Vec<Ability>,
    #[serde(default)]
    roles: Option<RoleFrequency>,
}

impl From<RawHero> for Hero {
    fn from(raw: RawHero) -> Self {
        let roles = raw
            .roles
            .unwrap_or_else(|| RoleFrequency::synthetic_for_attribute(raw.primary_attribute));
        Self {
            id: raw.id,
            name: raw.name,
            display_name: raw.display_name,
            primary_attribute: raw.primary_attribute,
            abilities: raw.abilities,
            innate_abilities: raw.innate_abilities,
            roles,
        }
    }
}

impl Hero {
    /// Creates a hero without abilities and with synthetic roles estimated from the attribute.
    #[must_use]
    pub fn new(
        id: HeroId,
        name: impl Into<String>,
        display_name: impl Into<String>,
        primary_attribute: PrimaryAttribute,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            display_name: display_name.into(),
            primary_attribute,
            abilities: vec![],
            innate_abilities: vec![],
            roles: RoleFrequency::synthetic_for_attribute(primary_attribute),
        }
    }

    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    #[must_use]
    pub fn with_innate_ability(mut self, ability: Ability) -> Self {
        self.innate_abilities.push(ability);
        self
    }

    #[must_use]
    pub fn with_roles(mut self, roles: RoleFrequency) -> Self {
        self.roles = roles;
        self
    }

    #[must_use]
    pub fn id(&self) -> HeroId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn primary_attribute(&self) -> PrimaryAttribute {
        self.primary_attribute
    }

    #[must_use]
    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    #[must_use]
    pub fn innate_abilities(&self) -> &[Ability] {
        &self.innate_abilities
    }

    /// Regular abilities followed by innate ones.
    pub fn all_abilities(&self) -> impl Iterator<Item = &Ability> + '_ {
        self.abilities.iter().chain(&self.innate_abilities)
    }

    #[must_use]
    pub fn roles(&self) -> &RoleFrequency {
        &self.roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_frequency_primary_positions() {
        let roles = RoleFrequency::observed([0.5, 0.0, 0.25, 0.19, 0.2]);
        let primary = roles.primary_positions().collect::<Vec<_>>();
        assert_eq!(
            primary,
            vec![Position::Carry, Position::Offlane, Position::HardSupport]
        );
        assert!(!roles.is_synthetic());
    }

    #[test]
    fn test_role_frequency_clamps_values() {
        let roles = RoleFrequency::synthetic([1.5, -0.5, 0.0, 0.0, 0.0]);
        assert_eq!(roles.frequency(Position::Carry), 1.0);
        assert_eq!(roles.frequency(Position::Mid), 0.0);
        assert!(roles.is_synthetic());
    }

    #[test]
    fn test_position_numbering() {
        assert_eq!(Position::Carry.number(), 1);
        assert_eq!(Position::HardSupport.number(), 5);
        assert_eq!(Position::Offlane.index(), 2);
    }

    #[test]
    fn test_hero_deserialization_defaults() {
        let json = r#"{
            "id": 7,
            "name": "earthshaker",
            "display_name": "Earthshaker",
            "primary_attribute": "strength",
            "abilities": [
                {"name": "Fissure", "description": "Slams the ground, stunning enemies."}
            ]
        }"#;
        let hero: Hero = serde_json::from_str(json).unwrap();
        assert_eq!(hero.id(), HeroId(7));
        assert_eq!(hero.abilities().len(), 1);
        assert_eq!(hero.abilities()[0].ability_type(), AbilityType::Basic);
        assert_eq!(hero.abilities()[0].damage_type(), DamageType::None);
        assert!(hero.innate_abilities().is_empty());
        assert!(hero.roles().is_synthetic());
        assert_eq!(
            hero.roles(),
            &RoleFrequency::synthetic_for_attribute(PrimaryAttribute::Strength)
        );
        assert_eq!(hero.roles(), Hero::new(HeroId(7), "", "", PrimaryAttribute::Strength).roles());
    }

    #[test]
    fn test_hero_deserialization_keeps_given_roles() {
        let json = r#"{
            "id": 3,
            "name": "crystal_maiden",
            "display_name": "Crystal Maiden",
            "primary_attribute": "intelligence",
            "roles": {"frequencies": [0.0, 0.0, 0.0, 0.3, 0.7]}
        }"#;
        let hero: Hero = serde_json::from_str(json).unwrap();
        assert!(!hero.roles().is_synthetic());
        assert_eq!(hero.roles().frequency(Position::HardSupport), 0.7);
    }

    #[test]
    fn test_role_frequency_deserialization_clamps_values() {
        let json = r#"{"frequencies": [1.5, -0.5, 0.5, 0.0, 0.0], "synthetic": true}"#;
        let roles: RoleFrequency = serde_json::from_str(json).unwrap();
        assert_eq!(roles.frequency(Position::Carry), 1.0);
        assert_eq!(roles.frequency(Position::Mid), 0.0);
        assert_eq!(roles.frequency(Position::Offlane), 0.5);
        assert!(roles.is_synthetic());

        let roles: RoleFrequency =
            serde_json::from_str(r#"{"frequencies": [2.0, 0.0, 0.0, 0.0, 0.0]}"#).unwrap();
        assert_eq!(roles.frequency(Position::Carry), 1.0);
        assert!(!roles.is_synthetic());
    }

    #[test]
    fn test_hero_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&HeroId(42)).unwrap(), "42");
        assert_eq!("42".parse::<HeroId>().unwrap(), HeroId(42));
    }
}
