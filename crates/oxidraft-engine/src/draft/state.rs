use std::collections::BTreeSet;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    DraftError, InvalidAction,
    hero::{HeroCatalog, HeroId},
};

use super::schedule::{
    DraftActionKind, DraftConfig, DraftMode, PhaseSchedule, PhaseStep, ScheduleError, Side,
    TEAM_SIZE,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    #[display("not started")]
    NotStarted,
    #[display("in progress")]
    InProgress,
    #[display("complete")]
    Complete,
}

/// A ban or pick that has been applied to a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftAction {
    /// Index of the schedule step this action filled.
    pub step: usize,
    pub side: Side,
    pub kind: DraftActionKind,
    pub hero: HeroId,
}

/// The mutable state of one draft.
///
/// The phase pointer is the length of the action history, so the actions taken are
/// always a prefix of the schedule. A hero appears at most once across both pick
/// lists and the bans. Every operation either applies completely or returns an error
/// without touching the state.
///
/// A draft is driven by exactly one caller at a time; operations take `&mut self`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftState {
    mode: DraftMode,
    timer_enabled: bool,
    schedule: PhaseSchedule,
    radiant_picks: ArrayVec<HeroId, TEAM_SIZE>,
    dire_picks: ArrayVec<HeroId, TEAM_SIZE>,
    bans: Vec<HeroId>,
    history: Vec<DraftAction>,
    legal_heroes: BTreeSet<HeroId>,
}

impl DraftState {
    /// Creates a draft for every hero in `catalog`, following the configured format.
    pub fn new<C>(config: &DraftConfig, catalog: &C) -> Result<Self, ScheduleError>
    where
        C: HeroCatalog + ?Sized,
    {
        let schedule = config.resolve_schedule()?;
        Ok(Self::with_schedule(
            config.mode,
            schedule,
            config.timer_enabled,
            catalog.hero_ids(),
        ))
    }

    /// Creates a draft over an explicit schedule and hero pool.
    #[must_use]
    pub fn with_schedule(
        mode: DraftMode,
        schedule: PhaseSchedule,
        timer_enabled: bool,
        legal_heroes: BTreeSet<HeroId>,
    ) -> Self {
        Self {
            mode,
            timer_enabled,
            schedule,
            radiant_picks: ArrayVec::new(),
            dire_picks: ArrayVec::new(),
            bans: vec![],
            history: vec![],
            legal_heroes,
        }
    }

    #[must_use]
    pub fn mode(&self) -> DraftMode {
        self.mode
    }

    #[must_use]
    pub fn timer_enabled(&self) -> bool {
        self.timer_enabled
    }

    #[must_use]
    pub fn schedule(&self) -> &PhaseSchedule {
        &self.schedule
    }

    /// Index of the next schedule step, equal to the number of actions taken.
    #[must_use]
    pub fn phase_index(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn status(&self) -> DraftStatus {
        if self.history.len() >= self.schedule.len() {
            DraftStatus::Complete
        } else if self.history.is_empty() {
            DraftStatus::NotStarted
        } else {
            DraftStatus::InProgress
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status().is_complete()
    }

    /// The schedule step waiting to be filled, or `None` once the draft is complete.
    #[must_use]
    pub fn current_step(&self) -> Option<PhaseStep> {
        self.schedule.get(self.phase_index())
    }

    /// The side whose turn it is.
    #[must_use]
    pub fn current_team(&self) -> Option<Side> {
        self.current_step().map(|step| step.side)
    }

    #[must_use]
    pub fn is_ban_phase(&self) -> bool {
        self.current_step()
            .is_some_and(|step| step.kind == DraftActionKind::Ban)
    }

    #[must_use]
    pub fn picks(&self, side: Side) -> &[HeroId] {
        match side {
            Side::Radiant => &self.radiant_picks,
            Side::Dire => &self.dire_picks,
        }
    }

    /// Heroes already picked by `side`.
    #[must_use]
    pub fn allies(&self, side: Side) -> &[HeroId] {
        self.picks(side)
    }

    /// Heroes already picked by the opponent of `side`.
    #[must_use]
    pub fn enemies(&self, side: Side) -> &[HeroId] {
        self.picks(side.opponent())
    }

    #[must_use]
    pub fn bans(&self) -> &[HeroId] {
        &self.bans
    }

    /// Bans submitted by `side`, in order.
    pub fn bans_by(&self, side: Side) -> impl Iterator<Item = HeroId> + '_ {
        self.history
            .iter()
            .filter(move |action| action.kind == DraftActionKind::Ban && action.side == side)
            .map(|action| action.hero)
    }

    #[must_use]
    pub fn history(&self) -> &[DraftAction] {
        &self.history
    }

    #[must_use]
    pub fn total_picks(&self) -> usize {
        self.radiant_picks.len() + self.dire_picks.len()
    }

    /// Picks `side` still has to make according to the rest of the schedule.
    #[must_use]
    pub fn picks_remaining(&self, side: Side) -> usize {
        self.schedule.steps()[self.phase_index().min(self.schedule.len())..]
            .iter()
            .filter(|step| step.kind == DraftActionKind::Pick && step.side == side)
            .count()
    }

    #[must_use]
    pub fn is_picked(&self, hero: HeroId) -> bool {
        self.radiant_picks.contains(&hero) || self.dire_picks.contains(&hero)
    }

    #[must_use]
    pub fn is_banned(&self, hero: HeroId) -> bool {
        self.bans.contains(&hero)
    }

    /// Whether `hero` belongs to this draft's pool and is neither picked nor banned.
    #[must_use]
    pub fn is_available(&self, hero: HeroId) -> bool {
        self.legal_heroes.contains(&hero) && !self.is_picked(hero) && !self.is_banned(hero)
    }

    pub fn available_heroes(&self) -> impl Iterator<Item = HeroId> + '_ {
        self.legal_heroes
            .iter()
            .copied()
            .filter(|hero| !self.is_picked(*hero) && !self.is_banned(*hero))
    }

    pub fn pick(&mut self, hero: HeroId) -> Result<(), DraftError> {
        self.apply(DraftActionKind::Pick, hero).map(|_| ())
    }

    pub fn ban(&mut self, hero: HeroId) -> Result<(), DraftError> {
        self.apply(DraftActionKind::Ban, hero).map(|_| ())
    }

    /// Applies `kind` for whichever side is acting and returns the recorded action.
    pub fn apply(&mut self, kind: DraftActionKind, hero: HeroId) -> Result<DraftAction, DraftError> {
        let step = self.current_step().ok_or(InvalidAction::DraftComplete)?;
        if step.kind != kind {
            return Err(match kind {
                DraftActionKind::Pick => InvalidAction::NotPickPhase,
                DraftActionKind::Ban => InvalidAction::NotBanPhase,
            }
            .into());
        }
        if !self.is_available(hero) {
            return Err(DraftError::HeroUnavailable(hero));
        }

        match kind {
            // the schedule is validated to hold at most TEAM_SIZE picks per side
            DraftActionKind::Pick => self.picks_mut(step.side).push(hero),
            DraftActionKind::Ban => self.bans.push(hero),
        }
        let action = DraftAction {
            step: self.phase_index(),
            side: step.side,
            kind,
            hero,
        };
        self.history.push(action);
        debug!(
            step = action.step,
            side = %action.side,
            kind = %action.kind,
            hero = %action.hero,
            status = %self.status(),
            "draft action applied"
        );
        Ok(action)
    }

    /// Reverts the most recent action and returns it.
    pub fn undo(&mut self) -> Result<DraftAction, DraftError> {
        let action = self.history.pop().ok_or(DraftError::NothingToUndo)?;
        let removed = match action.kind {
            DraftActionKind::Pick => self.picks_mut(action.side).pop(),
            DraftActionKind::Ban => self.bans.pop(),
        };
        debug_assert_eq!(removed, Some(action.hero));
        debug!(
            step = action.step,
            side = %action.side,
            kind = %action.kind,
            hero = %action.hero,
            "draft action undone"
        );
        Ok(action)
    }

    /// Snapshot of the draft suitable for archiving.
    #[must_use]
    pub fn summary(&self) -> DraftSummary {
        DraftSummary {
            mode: self.mode,
            status: self.status(),
            radiant_picks: self.radiant_picks.to_vec(),
            dire_picks: self.dire_picks.to_vec(),
            bans: self.bans.clone(),
            history: self.history.clone(),
        }
    }

    fn picks_mut(&mut self, side: Side) -> &mut ArrayVec<HeroId, TEAM_SIZE> {
        match side {
            Side::Radiant => &mut self.radiant_picks,
            Side::Dire => &mut self.dire_picks,
        }
    }
}

/// Serializable snapshot of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSummary {
    pub mode: DraftMode,
    pub status: DraftStatus,
    pub radiant_picks: Vec<HeroId>,
    pub dire_picks: Vec<HeroId>,
    pub bans: Vec<HeroId>,
    pub history: Vec<DraftAction>,
}
