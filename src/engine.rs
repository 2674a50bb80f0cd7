//! Scoreboard engine - owns the team table and session state.
//!
//! Single-writer facade over the ledger, freeze and scroll modules.
//! Events are applied one at a time in input order; the scroll loop is
//! synchronous and runs to completion before control returns.

use rustc_hash::FxHashMap;

use crate::command::{
    BoardError, BoardRow, ProblemCell, ProblemFilter, ProblemId, RankedBoard, ScrollResult,
    StatusFilter, TeamId, Verdict,
};
use crate::freeze::{self, Session};
use crate::ledger;
use crate::ranking::Standings;
use crate::scroll;
use crate::team::{SubmissionRecord, TeamState};

/// The scoreboard engine.
///
/// All state is owned exclusively by the instance; callers must
/// serialize access externally (there is no interior locking).
#[derive(Clone)]
pub struct Scoreboard {
    /// Team table, registration order
    teams: Vec<TeamState>,
    /// Team name -> TeamId lookup
    index: FxHashMap<String, TeamId>,
    /// True once the contest has started
    started: bool,
    /// Contest duration in logical ticks (recorded at start)
    duration: u32,
    /// Number of problems (bound discovered at start)
    problem_count: usize,
    /// Freeze-session state
    session: Session,
    /// Ranking snapshot from the most recent flush/scroll (for queries)
    last_order: Vec<TeamId>,
}

impl Scoreboard {
    /// Create an empty scoreboard (no teams, contest not started).
    pub fn new() -> Self {
        Self {
            teams: Vec::new(),
            index: FxHashMap::default(),
            started: false,
            duration: 0,
            problem_count: 0,
            session: Session::Active,
            last_order: Vec::new(),
        }
    }

    // ========================================================================
    // Registration and contest start
    // ========================================================================

    /// Register a team. Only valid before the contest starts.
    pub fn register_team(&mut self, name: &str) -> Result<(), BoardError> {
        if self.started {
            return Err(BoardError::AlreadyStarted);
        }
        if self.index.contains_key(name) {
            return Err(BoardError::DuplicateName);
        }
        let id = self.teams.len();
        self.index.insert(name.to_string(), id);
        self.teams.push(TeamState::new(name.to_string()));
        Ok(())
    }

    /// Start the contest with a duration and problem count.
    ///
    /// Allocates per-problem state for every registered team and seeds
    /// the query snapshot with teams in lexicographic name order.
    pub fn start_contest(
        &mut self,
        duration: u32,
        problem_count: usize,
    ) -> Result<(), BoardError> {
        if self.started {
            return Err(BoardError::AlreadyStarted);
        }
        self.started = true;
        self.duration = duration;
        self.problem_count = problem_count;
        for team in &mut self.teams {
            team.init_problems(problem_count);
        }
        let mut order: Vec<TeamId> = (0..self.teams.len()).collect();
        order.sort_by(|&a, &b| self.teams[a].name.cmp(&self.teams[b].name));
        self.last_order = order;
        Ok(())
    }

    // ========================================================================
    // Submissions
    // ========================================================================

    /// Apply one submission event.
    ///
    /// Problem validity is the caller's job; an unknown team name is
    /// reported rather than assumed.
    pub fn apply_submission(
        &mut self,
        team: &str,
        problem: ProblemId,
        verdict: Verdict,
        time: u32,
    ) -> Result<(), BoardError> {
        let id = self.team_id(team)?;
        ledger::apply_submission(
            &mut self.teams[id],
            problem,
            verdict,
            time,
            self.session.is_frozen(),
        );
        Ok(())
    }

    // ========================================================================
    // Ranking
    // ========================================================================

    /// Recompute the ranking, snapshot it for queries, and return the board.
    ///
    /// Team state is not altered.
    pub fn flush(&mut self) -> RankedBoard {
        let standings = Standings::compute(&self.teams);
        self.last_order = standings.order().to_vec();
        self.snapshot_board(standings.order())
    }

    /// Freeze the scoreboard.
    pub fn freeze(&mut self) -> Result<(), BoardError> {
        if self.session.is_frozen() {
            return Err(BoardError::AlreadyFrozen);
        }
        self.session = Session::Frozen;
        freeze::begin_freeze(&mut self.teams);
        Ok(())
    }

    /// Scroll: reveal all staged results and unfreeze.
    ///
    /// Reports the pre-reveal board (still frozen), every rank
    /// improvement in reveal order, and the final board. Both boards are
    /// recorded as query snapshots, the final one last.
    pub fn scroll(&mut self) -> Result<ScrollResult, BoardError> {
        if !self.session.is_frozen() {
            return Err(BoardError::NotFrozen);
        }

        let mut standings = Standings::compute(&self.teams);
        self.last_order = standings.order().to_vec();
        let initial_board = self.snapshot_board(standings.order());

        let changes = scroll::run(&mut self.teams, &mut standings);

        self.session = Session::Active;
        self.last_order = standings.order().to_vec();
        let final_board = self.snapshot_board(standings.order());

        Ok(ScrollResult {
            initial_board,
            changes,
            final_board,
        })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Rank of a team in the most recent flush/scroll snapshot.
    ///
    /// Returns `(rank, stale)` where rank is 1-based (0 if the team is
    /// not in any snapshot yet) and `stale` is true while the session is
    /// frozen.
    pub fn query_rank(&self, team: &str) -> Result<(usize, bool), BoardError> {
        let id = self.team_id(team)?;
        let rank = self
            .last_order
            .iter()
            .position(|&t| t == id)
            .map_or(0, |p| p + 1);
        Ok((rank, self.session.is_frozen()))
    }

    /// Most recent submission of a team matching the filters.
    pub fn query_last_submission(
        &self,
        team: &str,
        problem: ProblemFilter,
        status: StatusFilter,
    ) -> Result<Option<SubmissionRecord>, BoardError> {
        let id = self.team_id(team)?;
        Ok(self.teams[id].last_submission(problem, status).copied())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// True while the scoreboard is frozen
    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.session.is_frozen()
    }

    /// True once the contest has started
    #[inline]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Contest duration in logical ticks
    #[inline]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Number of problems in the contest
    #[inline]
    pub fn problem_count(&self) -> usize {
        self.problem_count
    }

    /// Number of registered teams
    #[inline]
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Read access to a team by name.
    pub fn team(&self, name: &str) -> Option<&TeamState> {
        self.index.get(name).map(|&id| &self.teams[id])
    }

    fn team_id(&self, name: &str) -> Result<TeamId, BoardError> {
        self.index
            .get(name)
            .copied()
            .ok_or(BoardError::UnknownTeam)
    }

    /// Build a board snapshot for a given order.
    fn snapshot_board(&self, order: &[TeamId]) -> RankedBoard {
        order
            .iter()
            .enumerate()
            .map(|(pos, &id)| {
                let team = &self.teams[id];
                BoardRow {
                    name: team.name.clone(),
                    rank: pos + 1,
                    solved: team.solved,
                    penalty: team.penalty,
                    cells: team.problems.iter().map(Self::cell).collect(),
                }
            })
            .collect()
    }

    fn cell(ps: &crate::team::ProblemState) -> ProblemCell {
        if ps.solved {
            ProblemCell::Solved(ps.wrong)
        } else if let Some(pending) = &ps.pending {
            ProblemCell::Pending {
                wrong_before: pending.wrong_before,
                staged: pending.staged.len() as u32,
            }
        } else if ps.wrong == 0 {
            ProblemCell::Untouched
        } else {
            ProblemCell::Wrong(ps.wrong)
        }
    }

    /// Compute a hash of the full scoring state (for determinism testing).
    pub fn state_hash(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        self.started.hash(&mut hasher);
        self.session.is_frozen().hash(&mut hasher);
        self.problem_count.hash(&mut hasher);
        self.last_order.hash(&mut hasher);
        for team in &self.teams {
            team.name.hash(&mut hasher);
            team.solved.hash(&mut hasher);
            team.penalty.hash(&mut hasher);
            team.solve_times.hash(&mut hasher);
            for ps in &team.problems {
                ps.solved.hash(&mut hasher);
                ps.wrong.hash(&mut hasher);
                ps.solve_time.hash(&mut hasher);
                ps.pending.as_ref().map(|p| p.staged.len()).hash(&mut hasher);
            }
            team.history.len().hash(&mut hasher);
        }
        hasher.finish()
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}
