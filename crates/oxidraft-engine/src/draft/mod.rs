//! Draft sequencing.
//!
//! - [`PhaseSchedule`] - The fixed, ordered list of `(ban | pick, side)` steps a draft
//!   follows. Captain's mode and all pick come built in; any other format is just a
//!   different schedule.
//! - [`DraftState`] - The mutable draft: picks, bans, the action history and a phase
//!   pointer that is always exactly the number of actions taken.
//!
//! # Draft Flow
//!
//! 1. Create a [`DraftState`] from a [`DraftConfig`] and a hero catalog
//! 2. Query [`DraftState::current_team`] and [`DraftState::is_ban_phase`]
//! 3. Submit [`DraftState::ban`] or [`DraftState::pick`] for the acting side
//! 4. Optionally [`DraftState::undo`] the most recent action
//! 5. Repeat until [`DraftState::status`] is [`DraftStatus::Complete`]
//!
//! The state machine has no notion of wall-clock time. When a per-action timer is
//! enabled, the orchestrating code decides what happens on expiry (typically forcing
//! an automated pick or ban) and feeds the result back through the same operations.

pub use self::{schedule::*, state::*};

mod schedule;
mod state;
