//! Freeze session - lifecycle and the per-problem reveal rule.
//!
//! While frozen, the ledger stages submissions instead of applying them.
//! The reveal (`resolve`) folds one problem's staged submissions into
//! scoring state; only submissions up to and including the first accept
//! matter.

use crate::command::{ProblemId, Verdict};
use crate::team::TeamState;

/// Freeze-session state of the scoreboard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Session {
    /// Results are applied live
    Active = 0,
    /// Results are staged for a later scroll
    Frozen = 1,
}

impl Session {
    /// True while a freeze session is in effect
    #[inline]
    pub const fn is_frozen(self) -> bool {
        matches!(self, Session::Frozen)
    }
}

/// Outcome of resolving one problem's staged submissions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Nothing was staged
    Nothing,
    /// Only wrong attempts were staged; this many were added
    WrongOnly(u32),
    /// An accept was found; the problem is now solved at this time
    Solved { time: u32 },
}

/// Clear stale staged submissions on every problem of every team.
///
/// Called on entering `Frozen`. The per-problem wrong snapshot is taken
/// lazily by the ledger when the first frozen submission arrives.
pub fn begin_freeze(teams: &mut [TeamState]) {
    for team in teams {
        for ps in &mut team.problems {
            ps.pending = None;
        }
    }
}

/// Resolve the staged submissions of one problem of one team.
///
/// Scans staged submissions in arrival order: every verdict before the
/// first accept counts as a wrong attempt; the first accept's timestamp
/// becomes the solve time and everything after it is discarded. The
/// staged list is cleared unconditionally, so resolving twice is a no-op
/// the second time.
pub fn resolve(team: &mut TeamState, problem: ProblemId) -> RevealOutcome {
    let pending = match team.problems[problem].pending.take() {
        Some(p) => p,
        None => return RevealOutcome::Nothing,
    };

    let mut add_wrong = 0u32;
    let mut accepted_at: Option<u32> = None;
    for &(verdict, time) in &pending.staged {
        if verdict.is_accepted() {
            accepted_at = Some(time);
            break;
        }
        add_wrong += 1;
    }

    team.problems[problem].wrong += add_wrong;
    match accepted_at {
        Some(time) => {
            team.apply_accept(problem, time);
            RevealOutcome::Solved { time }
        }
        None => RevealOutcome::WrongOnly(add_wrong),
    }
}
