//! Components driven by team composition.

use oxidraft_engine::{PRIMARY_POSITION_THRESHOLD, Position};

use super::{Candidate, ComponentValue, ScoreComponent, ScoreComponentSource, ScoringContext};
use crate::ability_feature::AbilityFeature;

/// How well the candidate fills capability gaps of the team.
///
/// A gap is filled when the team is below a capability threshold and the candidate
/// alone reaches it.
///
/// | Capability       | Measure                       | Threshold           | Bonus              |
/// |------------------|-------------------------------|---------------------|--------------------|
/// | teamfight        | `aoe_impact`                  | `aoe_threshold`     | `capability_bonus` |
/// | control          | summed control dimensions     | `control_threshold` | `capability_bonus` |
/// | magical damage   | `magical_damage`              | `damage_threshold`  | `damage_gap_bonus` |
/// | physical damage  | `physical_damage`             | `damage_threshold`  | `damage_gap_bonus` |
///
/// The value is the sum of earned bonuses, clamped to \[0.0, 1.0\].
#[derive(Debug, Clone)]
pub struct AbilitySynergy;

impl ScoreComponentSource for AbilitySynergy {
    fn component(&self) -> ScoreComponent {
        ScoreComponent::AbilitySynergy
    }

    fn evaluate(&self, ctx: &ScoringContext<'_>, candidate: &Candidate<'_>) -> ComponentValue {
        let tuning = ctx.tuning();
        let gaps = ctx.team_profile().gaps(tuning);
        let features = candidate.features();
        let name = candidate.hero().display_name();

        let checks = [
            (
                gaps.teamfight,
                features.get(AbilityFeature::AoeImpact) >= tuning.aoe_threshold,
                tuning.capability_bonus,
                "teamfight capability",
            ),
            (
                gaps.control,
                features.control_strength() >= tuning.control_threshold,
                tuning.capability_bonus,
                "crowd control",
            ),
            (
                gaps.magical_damage,
                features.get(AbilityFeature::MagicalDamage) >= tuning.damage_threshold,
                tuning.damage_gap_bonus,
                "magical damage",
            ),
            (
                gaps.physical_damage,
                features.get(AbilityFeature::PhysicalDamage) >= tuning.damage_threshold,
                tuning.damage_gap_bonus,
                "physical damage",
            ),
        ];

        let mut value = 0.0;
        let mut reasons = vec![];
        for (missing, supplies, bonus, capability) in checks {
            if missing && supplies {
                value += bonus;
                reasons.push(format!("{name} provides needed {capability}"));
            }
        }
        ComponentValue {
            reasons,
            ..ComponentValue::new(value)
        }
    }
}

/// How much the candidate's roles land in positions the team has not filled.
///
/// # Calculation
///
/// ```text
/// share = Σ freq(p)·(1 − coverage(p)) / Σ freq(p)   over positions p with coverage < threshold
/// flex  = flexibility_bonus · (primary_positions − 1) / 4 · open_slot_share
/// value = clamp(share + flex, 0, 1) · (1 − synthetic_role_discount if roles are synthetic)
/// ```
///
/// The flexibility bonus is worth most on the first pick, when keeping options open
/// matters, and fades to nothing as the team fills up.
#[derive(Debug, Clone)]
pub struct PositionDiversity;

impl ScoreComponentSource for PositionDiversity {
    fn component(&self) -> ScoreComponent {
        ScoreComponent::PositionDiversity
    }

    #[expect(clippy::cast_precision_loss)]
    fn evaluate(&self, ctx: &ScoringContext<'_>, candidate: &Candidate<'_>) -> ComponentValue {
        let tuning = ctx.tuning();
        let profile = ctx.team_profile();
        let hero = candidate.hero();
        let roles = hero.roles();

        let open = profile.uncovered_positions(tuning).collect::<Vec<_>>();
        let total = roles.total();
        let share = if total > 0.0 {
            open.iter()
                .map(|p| roles.frequency(*p) * (1.0 - profile.coverage(*p)))
                .sum::<f32>()
                / total
        } else {
            0.0
        };

        let extra_positions = roles.primary_positions().count().saturating_sub(1);
        let flex = tuning.flexibility_bonus * (extra_positions as f32 / (Position::LEN - 1) as f32)
            * ctx.open_slot_share();

        let mut value = (share + flex).clamp(0.0, 1.0);
        if roles.is_synthetic() {
            value *= 1.0 - tuning.synthetic_role_discount;
        }

        let result = ComponentValue::new(value);
        let filled = open
            .iter()
            .filter(|p| roles.frequency(**p) >= PRIMARY_POSITION_THRESHOLD)
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        if filled.is_empty() {
            result
        } else {
            result.with_reason(format!(
                "{} can fill open {}",
                hero.display_name(),
                filled.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use oxidraft_engine::{
        Ability, AbilityType, DamageType, DraftActionKind, Hero, HeroId, PrimaryAttribute,
        RoleFrequency,
    };

    use super::*;
    use crate::{
        relationship::RelationshipIndex,
        score_component::test_util::{all_pick, catalog, evaluate},
    };

    fn teamfighter(id: u32) -> Hero {
        Hero::new(HeroId(id), "tf", "Teamfighter", PrimaryAttribute::Strength)
            .with_ability(Ability::new(
                "Quake",
                "Stuns and slows all enemies in a radius.",
                AbilityType::Ultimate,
            ))
            .with_ability(Ability::new("Hold", "Silences and roots the target.", AbilityType::Basic))
    }

    fn nuker(id: u32) -> Hero {
        Hero::new(HeroId(id), "nuker", "Nuker", PrimaryAttribute::Intelligence)
            .with_ability(
                Ability::new("Bolt", "Hurls a bolt.", AbilityType::Basic)
                    .with_damage_type(DamageType::Magical),
            )
            .with_ability(
                Ability::new("Wave", "Hurls a wave.", AbilityType::Basic)
                    .with_damage_type(DamageType::Magical),
            )
    }

    #[test]
    fn test_ability_synergy_fills_gaps_of_empty_team() {
        let catalog = catalog(vec![teamfighter(1), nuker(2)]);
        let state = all_pick(&catalog);
        let provider = RelationshipIndex::neutral();

        let tf = evaluate(&AbilitySynergy, &state, &catalog, &provider, DraftActionKind::Pick, HeroId(1));
        // teamfight + control
        assert!((tf.value - 0.6).abs() < 1e-6);
        assert_eq!(
            tf.reasons,
            vec![
                "Teamfighter provides needed teamfight capability".to_owned(),
                "Teamfighter provides needed crowd control".to_owned(),
            ]
        );

        let nuke = evaluate(&AbilitySynergy, &state, &catalog, &provider, DraftActionKind::Pick, HeroId(2));
        assert!((nuke.value - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_ability_synergy_ignores_covered_capability() {
        let catalog = catalog(vec![nuker(1), nuker(2), nuker(3)]);
        let mut state = all_pick(&catalog);
        // radiant takes 1, dire takes 2, then 3 is scored for radiant
        state.pick(HeroId(1)).unwrap();
        state.pick(HeroId(2)).unwrap();
        let provider = RelationshipIndex::neutral();
        let value = evaluate(&AbilitySynergy, &state, &catalog, &provider, DraftActionKind::Pick, HeroId(3));
        assert_eq!(value.value, 0.0);
        assert!(value.reasons.is_empty());
    }

    #[test]
    fn test_position_diversity_prefers_open_roles() {
        let carry = |id| {
            Hero::new(HeroId(id), "carry", "Carry", PrimaryAttribute::Agility)
                .with_roles(RoleFrequency::observed([1.0, 0.0, 0.0, 0.0, 0.0]))
        };
        let support = Hero::new(HeroId(3), "support", "Support", PrimaryAttribute::Intelligence)
            .with_roles(RoleFrequency::observed([0.0, 0.0, 0.0, 0.0, 1.0]));
        let catalog = catalog(vec![carry(1), carry(2), support]);
        let mut state = all_pick(&catalog);
        state.pick(HeroId(1)).unwrap();
        let provider = RelationshipIndex::neutral();

        // dire has no carry yet; score for radiant, who already has one
        let second_carry =
            evaluate(&PositionDiversity, &state, &catalog, &provider, DraftActionKind::Pick, HeroId(2));
        let support =
            evaluate(&PositionDiversity, &state, &catalog, &provider, DraftActionKind::Pick, HeroId(3));
        assert_eq!(second_carry.value, 0.0);
        assert!((support.value - 1.0).abs() < 1e-6);
        assert_eq!(
            support.reasons,
            vec!["Support can fill open hard support".to_owned()]
        );
    }

    #[test]
    fn test_position_diversity_discounts_synthetic_roles() {
        let observed = Hero::new(HeroId(1), "a", "A", PrimaryAttribute::Agility)
            .with_roles(RoleFrequency::observed([0.5, 0.5, 0.0, 0.0, 0.0]));
        let synthetic = Hero::new(HeroId(2), "b", "B", PrimaryAttribute::Agility)
            .with_roles(RoleFrequency::synthetic([0.5, 0.5, 0.0, 0.0, 0.0]));
        let catalog = catalog(vec![observed, synthetic]);
        let state = all_pick(&catalog);
        let provider = RelationshipIndex::neutral();

        let observed =
            evaluate(&PositionDiversity, &state, &catalog, &provider, DraftActionKind::Pick, HeroId(1));
        let synthetic =
            evaluate(&PositionDiversity, &state, &catalog, &provider, DraftActionKind::Pick, HeroId(2));
        // share 1.0 plus flex, capped at 1.0
        assert_eq!(observed.value, 1.0);
        assert!((synthetic.value - 0.85).abs() < 1e-6);
    }
}
