//! Components driven by pairwise hero relationships.

use oxidraft_engine::{DraftActionKind, Hero};

use super::{Candidate, ComponentValue, ScoreComponent, ScoreComponentSource, ScoringContext, mean};
use crate::relationship::NEUTRAL;

/// Margin over neutral before a relationship is worth mentioning.
const NOTABLE_MARGIN: f32 = 0.05;

/// Returns the hero with the highest value, if any.
fn strongest<'a>(values: impl Iterator<Item = (&'a Hero, f32)>) -> Option<(&'a Hero, f32)> {
    values.max_by(|(_, a), (_, b)| a.total_cmp(b))
}

/// Mean synergy of the candidate with the requester's team.
///
/// The same for picks and bans. Neutral (0.5) while the team is empty.
#[derive(Debug, Clone)]
pub struct TeamSynergy;

impl ScoreComponentSource for TeamSynergy {
    fn component(&self) -> ScoreComponent {
        ScoreComponent::TeamSynergy
    }

    fn evaluate(&self, ctx: &ScoringContext<'_>, candidate: &Candidate<'_>) -> ComponentValue {
        let hero = candidate.hero();
        let provider = ctx.provider();
        let synergy_with = |ally: &Hero| provider.synergy(hero.id(), ally.id());

        let value = mean(ctx.team().iter().map(|ally| synergy_with(ally))).unwrap_or(NEUTRAL);
        let result = ComponentValue::new(value);
        match strongest(ctx.team().iter().map(|ally| (*ally, synergy_with(ally)))) {
            Some((ally, synergy)) if synergy > NEUTRAL + NOTABLE_MARGIN => result.with_reason(
                format!("{} synergizes with {}", hero.display_name(), ally.display_name()),
            ),
            _ => result,
        }
    }
}

/// Mean counter value of the candidate against the heroes it would face.
///
/// For a pick that is the enemy team. For a ban it is the requester's own picks, so a
/// high value means the candidate is a threat worth denying. Neutral (0.5) when there
/// is nobody to measure against.
#[derive(Debug, Clone)]
pub struct Counter;

impl ScoreComponentSource for Counter {
    fn component(&self) -> ScoreComponent {
        ScoreComponent::Counter
    }

    fn evaluate(&self, ctx: &ScoringContext<'_>, candidate: &Candidate<'_>) -> ComponentValue {
        let hero = candidate.hero();
        let provider = ctx.provider();
        let counter_to = |opponent: &Hero| provider.counter(hero.id(), opponent.id());

        let targets = ctx.counter_targets();
        let value = mean(targets.iter().map(|o| counter_to(o))).unwrap_or(NEUTRAL);
        let result = ComponentValue::new(value);
        match strongest(targets.iter().map(|o| (*o, counter_to(o)))) {
            Some((opponent, counter)) if counter > NEUTRAL + NOTABLE_MARGIN => {
                let reason = match ctx.action() {
                    DraftActionKind::Pick => {
                        format!("{} counters {}", hero.display_name(), opponent.display_name())
                    }
                    DraftActionKind::Ban => format!(
                        "{} threatens your {}",
                        hero.display_name(),
                        opponent.display_name()
                    ),
                };
                result.with_reason(reason)
            }
            _ => result,
        }
    }
}
