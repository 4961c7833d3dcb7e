//! Components driven by aggregate match statistics.

use super::{Candidate, ComponentValue, ScoreComponent, ScoreComponentSource, ScoringContext, percent};

/// Bracket win rate of the candidate.
///
/// Missing data reads as an even 50%.
#[derive(Debug, Clone)]
pub struct WinRate;

impl ScoreComponentSource for WinRate {
    fn component(&self) -> ScoreComponent {
        ScoreComponent::WinRate
    }

    fn evaluate(&self, ctx: &ScoringContext<'_>, candidate: &Candidate<'_>) -> ComponentValue {
        let hero = candidate.hero();
        let win_rate = ctx.provider().win_rate(hero.id(), ctx.bracket());
        let value = ComponentValue::new(win_rate);
        if win_rate > ctx.tuning().strong_win_rate {
            return value.with_reason(format!(
                "{} wins {}% of games in {}",
                hero.display_name(),
                percent(win_rate),
                ctx.bracket()
            ));
        }
        value
    }
}

/// Bracket pick rate of the candidate.
///
/// Missing data reads as the pick rate floor (10%).
#[derive(Debug, Clone)]
pub struct PickRate;

impl ScoreComponentSource for PickRate {
    fn component(&self) -> ScoreComponent {
        ScoreComponent::PickRate
    }

    fn evaluate(&self, ctx: &ScoringContext<'_>, candidate: &Candidate<'_>) -> ComponentValue {
        let hero = candidate.hero();
        let pick_rate = ctx.provider().pick_rate(hero.id(), ctx.bracket());
        let value = ComponentValue::new(pick_rate);
        if pick_rate > ctx.tuning().popular_pick_rate {
            return value.with_reason(format!(
                "{} is a popular pick ({}% of games)",
                hero.display_name(),
                percent(pick_rate)
            ));
        }
        value
    }
}

/// How strong the candidate is in the current meta.
///
/// # Calculation
///
/// ```text
/// base  = s·win_rate + (1 − s)·pick_rate                     (s = meta_win_rate_share)
/// bonus = early_meta_bonus    if the draft is early and win_rate > strong_win_rate
/// pen   = early/late penalty  if ≥ popular_counters_for_penalty popular heroes
///                             counter the candidate above hard_counter_threshold
/// value = clamp(base + bonus − pen, 0, 1)
/// ```
///
/// Popular heroes are all catalog heroes with a pick rate above `popular_pick_rate`.
/// A popular counter the enemy has already picked still counts.
#[derive(Debug, Clone)]
pub struct MetaPower;

impl ScoreComponentSource for MetaPower {
    fn component(&self) -> ScoreComponent {
        ScoreComponent::MetaPower
    }

    fn evaluate(&self, ctx: &ScoringContext<'_>, candidate: &Candidate<'_>) -> ComponentValue {
        let hero = candidate.hero();
        let tuning = ctx.tuning();
        let provider = ctx.provider();
        let win_rate = provider.win_rate(hero.id(), ctx.bracket());
        let pick_rate = provider.pick_rate(hero.id(), ctx.bracket());

        let mut score =
            tuning.meta_win_rate_share * win_rate + (1.0 - tuning.meta_win_rate_share) * pick_rate;
        let mut reasons = vec![];

        if ctx.is_early() && win_rate > tuning.strong_win_rate {
            score += tuning.early_meta_bonus;
            reasons.push(format!("{} is a strong early meta pick", hero.display_name()));
        }

        let hard_counters = ctx
            .popular_heroes()
            .iter()
            .filter(|popular| **popular != hero.id())
            .filter(|popular| provider.counter(**popular, hero.id()) > tuning.hard_counter_threshold)
            .count();
        if hard_counters >= tuning.popular_counters_for_penalty {
            score -= if ctx.is_early() {
                tuning.early_counter_penalty
            } else {
                tuning.late_counter_penalty
            };
            reasons.push(format!(
                "{} is hard-countered by {hard_counters} popular heroes",
                hero.display_name()
            ));
        }

        ComponentValue {
            reasons,
            ..ComponentValue::new(score)
        }
    }
}
