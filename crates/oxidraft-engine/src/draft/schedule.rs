use serde::{Deserialize, Serialize};

/// Number of heroes each side picks.
pub const TEAM_SIZE: usize = 5;

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
    derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[display("radiant")]
    Radiant,
    #[display("dire")]
    Dire,
}

impl Side {
    pub const ALL: [Self; 2] = [Self::Radiant, Self::Dire];

    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Radiant => Self::Dire,
            Self::Dire => Self::Radiant,
        }
    }
}

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
    derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum DraftActionKind {
    #[display("ban")]
    Ban,
    #[display("pick")]
    Pick,
}

/// One entry of a draft schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseStep {
    pub kind: DraftActionKind,
    pub side: Side,
}

impl PhaseStep {
    #[must_use]
    pub const fn ban(side: Side) -> Self {
        Self {
            kind: DraftActionKind::Ban,
            side,
        }
    }

    #[must_use]
    pub const fn pick(side: Side) -> Self {
        Self {
            kind: DraftActionKind::Pick,
            side,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ScheduleError {
    #[display("schedule gives {side} {picks} picks, more than a team can hold")]
    TooManyPicks { side: Side, picks: usize },
    #[display("custom draft mode requires an explicit schedule")]
    MissingCustomSchedule,
}

/// The ordered list of ban/pick steps a draft follows.
///
/// A schedule may be empty, in which case a draft using it is complete from the start.
/// Construction validates that no side is asked to pick more than [`TEAM_SIZE`] heroes.
///
/// # Example
///
/// ```
/// use oxidraft_engine::{DraftActionKind, PhaseSchedule, Side};
///
/// let schedule = PhaseSchedule::captains_mode(Side::Radiant);
/// assert_eq!(schedule.count(DraftActionKind::Pick, Side::Radiant), 5);
/// assert_eq!(schedule.count(DraftActionKind::Ban, Side::Dire), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PhaseStep>", into = "Vec<PhaseStep>")]
pub struct PhaseSchedule {
    steps: Vec<PhaseStep>,
}

impl PhaseSchedule {
    pub fn new(steps: Vec<PhaseStep>) -> Result<Self, ScheduleError> {
        let this = Self { steps };
        for side in Side::ALL {
            let picks = this.count(DraftActionKind::Pick, side);
            if picks > TEAM_SIZE {
                return Err(ScheduleError::TooManyPicks { side, picks });
            }
        }
        Ok(this)
    }

    /// Captain's mode: three ban blocks interleaved with three pick blocks.
    ///
    /// `first` is the side that opens every block; the other side's steps mirror it.
    /// Bans R D R D, picks R D D R, bans R D R D R D, picks D R R D, bans R D,
    /// picks R D (shown for `first = Radiant`).
    #[must_use]
    pub fn captains_mode(first: Side) -> Self {
        use DraftActionKind::{Ban, Pick};

        let second = first.opponent();
        #[rustfmt::skip]
        let layout = [
            (Ban, first), (Ban, second), (Ban, first), (Ban, second),
            (Pick, first), (Pick, second), (Pick, second), (Pick, first),
            (Ban, first), (Ban, second), (Ban, first), (Ban, second), (Ban, first), (Ban, second),
            (Pick, second), (Pick, first), (Pick, first), (Pick, second),
            (Ban, first), (Ban, second),
            (Pick, first), (Pick, second),
        ];
        Self {
            steps: layout
                .into_iter()
                .map(|(kind, side)| PhaseStep { kind, side })
                .collect(),
        }
    }

    /// All pick: no bans, ten picks in 1-2-2-2-2-1 order.
    #[must_use]
    pub fn all_pick(first: Side) -> Self {
        let second = first.opponent();
        let order = [
            first, second, second, first, first, second, second, first, first, second,
        ];
        Self {
            steps: order.into_iter().map(PhaseStep::pick).collect(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self { steps: vec![] }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<PhaseStep> {
        self.steps.get(index).copied()
    }

    #[must_use]
    pub fn steps(&self) -> &[PhaseStep] {
        &self.steps
    }

    /// Number of steps of the given kind assigned to `side`.
    #[must_use]
    pub fn count(&self, kind: DraftActionKind, side: Side) -> usize {
        self.steps
            .iter()
            .filter(|step| step.kind == kind && step.side == side)
            .count()
    }
}

impl TryFrom<Vec<PhaseStep>> for PhaseSchedule {
    type Error = ScheduleError;

    fn try_from(steps: Vec<PhaseStep>) -> Result<Self, Self::Error> {
        Self::new(steps)
    }
}

impl From<PhaseSchedule> for Vec<PhaseStep> {
    fn from(schedule: PhaseSchedule) -> Self {
        schedule.steps
    }
}

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum DraftMode {
    #[default]
    #[display("captains_mode")]
    CaptainsMode,
    #[display("all_pick")]
    AllPick,
    /// Any schedule supplied through [`DraftConfig::schedule`].
    #[display("custom")]
    Custom,
}

/// Draft format settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftConfig {
    pub mode: DraftMode,
    /// Whether the orchestrating code enforces a per-action timer.
    pub timer_enabled: bool,
    /// Side that opens the schedule.
    pub first_side: Side,
    /// Explicit schedule; required for [`DraftMode::Custom`], overrides the built-in
    /// schedule of the other modes when present.
    pub schedule: Option<PhaseSchedule>,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            mode: DraftMode::CaptainsMode,
            timer_enabled: false,
            first_side: Side::Radiant,
            schedule: None,
        }
    }
}

impl DraftConfig {
    #[must_use]
    pub fn with_mode(mode: DraftMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn resolve_schedule(&self) -> Result<PhaseSchedule, ScheduleError> {
        if let Some(schedule) = &self.schedule {
            return Ok(schedule.clone());
        }
        match self.mode {
            DraftMode::CaptainsMode => Ok(PhaseSchedule::captains_mode(self.first_side)),
            DraftMode::AllPick => Ok(PhaseSchedule::all_pick(self.first_side)),
            DraftMode::Custom => Err(ScheduleError::MissingCustomSchedule),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captains_mode_counts() {
        let schedule = PhaseSchedule::captains_mode(Side::Radiant);
        assert_eq!(schedule.len(), 22);
        for side in Side::ALL {
            assert_eq!(schedule.count(DraftActionKind::Pick, side), TEAM_SIZE);
            assert_eq!(schedule.count(DraftActionKind::Ban, side), 6);
        }
        assert_eq!(schedule.get(0), Some(PhaseStep::ban(Side::Radiant)));
        assert_eq!(schedule.get(4), Some(PhaseStep::pick(Side::Radiant)));
        assert_eq!(schedule.get(21), Some(PhaseStep::pick(Side::Dire)));
        assert_eq!(schedule.get(22), None);
    }

    #[test]
    fn test_captains_mode_mirrors_for_dire_first() {
        let radiant_first = PhaseSchedule::captains_mode(Side::Radiant);
        let dire_first = PhaseSchedule::captains_mode(Side::Dire);
        for (r, d) in radiant_first.steps().iter().zip(dire_first.steps()) {
            assert_eq!(r.kind, d.kind);
            assert_eq!(r.side, d.side.opponent());
        }
    }

    #[test]
    fn test_all_pick_has_no_bans() {
        let schedule = PhaseSchedule::all_pick(Side::Radiant);
        assert_eq!(schedule.len(), 2 * TEAM_SIZE);
        assert_eq!(schedule.count(DraftActionKind::Ban, Side::Radiant), 0);
        assert_eq!(schedule.count(DraftActionKind::Pick, Side::Dire), TEAM_SIZE);
    }

    #[test]
    fn test_schedule_rejects_too_many_picks() {
        let steps = vec![PhaseStep::pick(Side::Dire); TEAM_SIZE + 1];
        assert_eq!(
            PhaseSchedule::new(steps),
            Err(ScheduleError::TooManyPicks {
                side: Side::Dire,
                picks: TEAM_SIZE + 1
            })
        );
    }

    #[test]
    fn test_schedule_serialization() {
        let schedule =
            PhaseSchedule::new(vec![PhaseStep::ban(Side::Radiant), PhaseStep::pick(Side::Dire)])
                .unwrap();
        let serialized = serde_json::to_string(&schedule).unwrap();
        assert_eq!(
            serialized,
            r#"[{"kind":"ban","side":"radiant"},{"kind":"pick","side":"dire"}]"#
        );
        let deserialized: PhaseSchedule = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, schedule);

        let too_many = serde_json::to_string(&vec![PhaseStep::pick(Side::Radiant); 6]).unwrap();
        assert!(serde_json::from_str::<PhaseSchedule>(&too_many).is_err());
    }

    #[test]
    fn test_config_resolves_schedule() {
        let config = DraftConfig::with_mode(DraftMode::AllPick);
        assert_eq!(
            config.resolve_schedule().unwrap(),
            PhaseSchedule::all_pick(Side::Radiant)
        );

        let custom = DraftConfig::with_mode(DraftMode::Custom);
        assert_eq!(
            custom.resolve_schedule(),
            Err(ScheduleError::MissingCustomSchedule)
        );

        let config: DraftConfig = serde_json::from_str(r#"{"mode": "custom", "schedule": []}"#).unwrap();
        assert!(config.resolve_schedule().unwrap().is_empty());
    }

    #[test]
    fn test_side_parsing() {
        assert_eq!("radiant".parse::<Side>().unwrap(), Side::Radiant);
        assert_eq!("Dire".parse::<Side>().unwrap(), Side::Dire);
        assert_eq!("pick".parse::<DraftActionKind>().unwrap(), DraftActionKind::Pick);
    }
}
