//! Team state - per-team scoring record and submission history.
//!
//! A team owns one `ProblemState` per contest problem plus the full
//! submission history used by point queries.

use crate::command::{ProblemFilter, ProblemId, StatusFilter, Verdict, WRONG_PENALTY};

/// Staged results for one problem during a freeze session.
///
/// Present only while the current freeze session has received at least
/// one submission for the (still unsolved) problem. Cleared exactly once,
/// by the reveal operation or at freeze entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingReveal {
    /// Snapshot of `wrong` at the moment the freeze covered this problem
    pub wrong_before: u32,
    /// Staged (verdict, time) pairs in arrival order
    pub staged: Vec<(Verdict, u32)>,
}

/// Scoring state of a single problem for a single team
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProblemState {
    /// Write-once: true after the first accepted submission is applied
    pub solved: bool,
    /// Wrong attempts strictly before the first accept (live + resolved frozen)
    pub wrong: u32,
    /// Time of the first accepted submission (meaningful only when solved)
    pub solve_time: u32,
    /// Staged frozen-session submissions, if any
    pub pending: Option<PendingReveal>,
}

impl ProblemState {
    /// True if this problem has staged submissions awaiting a reveal
    #[inline]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// One entry in a team's full submission history
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmissionRecord {
    /// Target problem
    pub problem: ProblemId,
    /// Submission verdict
    pub verdict: Verdict,
    /// Logical submission time
    pub time: u32,
}

/// Per-team mutable scoring record
#[derive(Clone, Debug)]
pub struct TeamState {
    /// Unique team name, assigned at registration
    pub name: String,
    /// Number of solved problems
    pub solved: u32,
    /// Accumulated penalty (monotonically non-decreasing)
    pub penalty: u64,
    /// Solve times, one per solved problem, insertion order
    pub solve_times: Vec<u32>,
    /// Per-problem state; sized when the contest starts
    pub problems: Vec<ProblemState>,
    /// Full submission history in arrival order
    pub history: Vec<SubmissionRecord>,
}

impl TeamState {
    /// Create a team with no problems yet (allocated at contest start)
    pub fn new(name: String) -> Self {
        Self {
            name,
            solved: 0,
            penalty: 0,
            solve_times: Vec::new(),
            problems: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Allocate problem slots once the problem count is known.
    pub fn init_problems(&mut self, count: usize) {
        self.problems = vec![ProblemState::default(); count];
    }

    /// Mark a problem solved at `time` and charge the penalty.
    ///
    /// Uses the problem's current `wrong` count, so frozen wrong attempts
    /// must be folded in before calling.
    pub fn apply_accept(&mut self, problem: ProblemId, time: u32) {
        let ps = &mut self.problems[problem];
        debug_assert!(!ps.solved);
        ps.solved = true;
        ps.solve_time = time;
        self.solved += 1;
        self.penalty += WRONG_PENALTY * ps.wrong as u64 + time as u64;
        self.solve_times.push(time);
    }

    /// Solve times sorted in descending order (for the ranking tie-break).
    pub fn solve_times_desc(&self) -> Vec<u32> {
        let mut v = self.solve_times.clone();
        v.sort_unstable_by(|a, b| b.cmp(a));
        v
    }

    /// True if any unsolved problem has staged frozen submissions
    pub fn has_pending(&self) -> bool {
        self.problems.iter().any(|p| !p.solved && p.has_pending())
    }

    /// Smallest-index unsolved problem with staged submissions, if any
    pub fn first_pending_problem(&self) -> Option<ProblemId> {
        self.problems
            .iter()
            .position(|p| !p.solved && p.has_pending())
    }

    /// Most recent history entry matching both filters (arrival order).
    pub fn last_submission(
        &self,
        problem: ProblemFilter,
        status: StatusFilter,
    ) -> Option<&SubmissionRecord> {
        self.history.iter().rev().find(|s| {
            let prob_ok = match problem {
                ProblemFilter::All => true,
                ProblemFilter::Only(p) => s.problem == p,
            };
            let status_ok = match status {
                StatusFilter::All => true,
                StatusFilter::Only(v) => s.verdict == v,
            };
            prob_ok && status_ok
        })
    }
}
