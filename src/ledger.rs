//! Submission ledger - applying one submission event to a team.
//!
//! Two regimes: live (mutates scoring state directly) and frozen
//! (stages the result for a later reveal). The raw submission is always
//! appended to the team's history first, independent of both regimes.

use crate::command::{ProblemId, Verdict};
use crate::team::{PendingReveal, SubmissionRecord, TeamState};

/// Apply one submission to a team.
///
/// Timestamps are taken as given; this layer does not enforce ordering.
///
/// # Rules
/// - History is appended unconditionally.
/// - An already-solved problem is a scoring no-op.
/// - Live accept: solve the problem and charge `20 * wrong + time`.
/// - Live non-accept: increment the wrong-attempt count.
/// - Frozen: stage the (verdict, time) pair; scoring is untouched until
///   the reveal.
pub fn apply_submission(
    team: &mut TeamState,
    problem: ProblemId,
    verdict: Verdict,
    time: u32,
    frozen: bool,
) {
    team.history.push(SubmissionRecord { problem, verdict, time });

    if team.problems[problem].solved {
        return;
    }

    if frozen {
        let wrong_now = team.problems[problem].wrong;
        let ps = &mut team.problems[problem];
        // Snapshot taken on first staged submission; `wrong` of an
        // unsolved problem cannot change while the session is frozen.
        let pending = ps.pending.get_or_insert_with(|| PendingReveal {
            wrong_before: wrong_now,
            staged: Vec::new(),
        });
        pending.staged.push((verdict, time));
    } else if verdict.is_accepted() {
        team.apply_accept(problem, time);
    } else {
        team.problems[problem].wrong += 1;
    }
}
