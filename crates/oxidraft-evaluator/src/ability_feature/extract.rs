use std::sync::LazyLock;

use oxidraft_engine::{Ability, DamageType, Hero};
use regex::Regex;

use super::{AbilityFeature, AbilityFeature as F, FeatureVector};

/// Control and damage groups are divided by at least this much, so one weak signal
/// never reads as a saturated profile.
const GROUP_NORMALIZATION_FLOOR: f32 = 3.0;

/// Ultimates count this many times towards area impact and control duration.
const ULTIMATE_MULTIPLIER: f32 = 2.0;

/// Weight of an ability's declared damage type.
const DECLARED_DAMAGE_WEIGHT: f32 = 1.0;

/// Extra control duration for control that goes through spell immunity.
const SPELL_IMMUNITY_PIERCE_BONUS: f32 = 0.25;

/// A keyword pattern and the features it contributes to when it matches.
#[derive(Debug)]
struct LexicalRule {
    pattern: Regex,
    contributions: &'static [(AbilityFeature, f32)],
}

#[rustfmt::skip]
const RULE_TABLE: &[(&str, &[(AbilityFeature, f32)])] = &[
    // control
    (r"\bstun(s|ned|ning)?\b", &[(F::StunScore, 1.0), (F::ControlDuration, 0.25)]),
    (r"\b(hex(es|ed)?|taunt(s|ed)?|fear(s|ed)?|sleep(s)?|asleep)\b", &[(F::StunScore, 0.5), (F::ControlDuration, 0.25)]),
    (r"\bsilenc(e|es|ed|ing)\b", &[(F::SilenceScore, 1.0), (F::ControlDuration, 0.25)]),
    (r"\b(root(s|ed|ing)?|ensnar\w*|entangl\w*|immobiliz\w*)\b", &[(F::RootScore, 1.0), (F::ControlDuration, 0.25)]),
    (r"\bslow(s|ed|ing)?\b", &[(F::SlowScore, 0.5), (F::ControlDuration, 0.125)]),
    // damage
    (r"\bmagic(al)? damage\b", &[(F::MagicalDamage, 0.5)]),
    (r"\b(physical|attack) damage\b", &[(F::PhysicalDamage, 0.5)]),
    (r"\bpure damage\b", &[(F::PureDamage, 0.5)]),
    // area
    (r"\b(area|radius|aoe|around|nearby|all enemies)\b", &[(F::AoeImpact, 0.25)]),
    // initiation
    (r"\b(initiat\w*|charg(e|es|ed|ing)|leap\w*|jump\w*)\b", &[(F::MobilityScore, 0.25), (F::AoeImpact, 0.25)]),
    // escape
    (r"\b(blink\w*|teleport\w*|dash(es|ed|ing)?|escap\w*|invisib\w*|movement speed)\b", &[(F::MobilityScore, 0.5)]),
    // sustain
    (r"\b(heal(s|ed|ing)?|regenerat\w*|lifesteal\w*|restor\w*|armor)\b", &[(F::SustainScore, 0.5)]),
    // support
    (r"\b(buff\w*|shield\w*|purg\w*|dispel\w*|all(y|ies|ied)|vision|reveal\w*|sav(e|es|ed|ing))\b", &[(F::UtilityScore, 0.5)]),
];

static RULES: LazyLock<Vec<LexicalRule>> = LazyLock::new(|| {
    RULE_TABLE
        .iter()
        .filter_map(|&(pattern, contributions)| {
            match Regex::new(&format!("(?i){pattern}")) {
                Ok(pattern) => Some(LexicalRule {
                    pattern,
                    contributions,
                }),
                Err(error) => {
                    tracing::error!(%pattern, %error, "skipping ability rule that failed to compile");
                    None
                }
            }
        })
        .collect()
});

/// Derives the ability profile of `hero` from its regular and innate abilities.
///
/// Every rule contributes at most once per ability, however many times it matches.
/// A hero without abilities (or without any matching text) yields the zero vector.
#[must_use]
pub fn extract_features(hero: &Hero) -> FeatureVector {
    let mut raw = FeatureVector::ZERO;
    for ability in hero.all_abilities() {
        accumulate_ability(&mut raw, ability);
    }

    raw.normalize_group(&AbilityFeature::CONTROL, GROUP_NORMALIZATION_FLOOR);
    raw.normalize_group(&AbilityFeature::DAMAGE, GROUP_NORMALIZATION_FLOOR);
    raw.clamp();

    tracing::trace!(hero = %hero.name(), ?raw, "extracted ability features");
    raw
}

fn accumulate_ability(raw: &mut FeatureVector, ability: &Ability) {
    let text = ability.description();
    let multiplier = |feature: AbilityFeature| match feature {
        AbilityFeature::AoeImpact | AbilityFeature::ControlDuration if ability.is_ultimate() => {
            ULTIMATE_MULTIPLIER
        }
        _ => 1.0,
    };

    let mut has_control = false;
    for rule in RULES.iter().filter(|rule| rule.pattern.is_match(text)) {
        for (feature, weight) in rule.contributions {
            raw[*feature] += weight * multiplier(*feature);
            has_control |= AbilityFeature::CONTROL.contains(feature);
        }
    }

    match ability.damage_type() {
        DamageType::Magical => raw[AbilityFeature::MagicalDamage] += DECLARED_DAMAGE_WEIGHT,
        DamageType::Physical => raw[AbilityFeature::PhysicalDamage] += DECLARED_DAMAGE_WEIGHT,
        DamageType::Pure => raw[AbilityFeature::PureDamage] += DECLARED_DAMAGE_WEIGHT,
        DamageType::None => {}
    }

    if has_control && ability.pierces_spell_immunity() {
        raw[AbilityFeature::ControlDuration] +=
            SPELL_IMMUNITY_PIERCE_BONUS * multiplier(AbilityFeature::ControlDuration);
    }
}
