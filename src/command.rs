//! Command and output types for the scoreboard engine.
//!
//! Commands are inputs from the protocol/driver layer.
//! Boards and rank-change records are outputs to the report layer.

use serde::Serialize;
use std::fmt;

/// Identifier of a team inside the engine (index into the team table).
pub type TeamId = usize;

/// Identifier of a problem (0-based index; problem `A` is 0).
pub type ProblemId = usize;

/// Penalty charged per wrong attempt on a solved problem.
pub const WRONG_PENALTY: u64 = 20;

/// Verdict of a single submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Verdict {
    /// The submission was accepted (solves the problem)
    Accepted = 0,
    /// Wrong answer
    WrongAnswer = 1,
    /// Runtime error
    RuntimeError = 2,
    /// Time limit exceeded
    TimeLimitExceed = 3,
}

impl Verdict {
    /// Returns true for the accepting verdict
    #[inline]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    /// Parse a protocol status token.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Accepted" => Some(Verdict::Accepted),
            "Wrong_Answer" => Some(Verdict::WrongAnswer),
            "Runtime_Error" => Some(Verdict::RuntimeError),
            "Time_Limit_Exceed" => Some(Verdict::TimeLimitExceed),
            _ => None,
        }
    }

    /// The protocol status token for this verdict.
    pub const fn as_str(self) -> &'static str {
        match self {
            Verdict::Accepted => "Accepted",
            Verdict::WrongAnswer => "Wrong_Answer",
            Verdict::RuntimeError => "Runtime_Error",
            Verdict::TimeLimitExceed => "Time_Limit_Exceed",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Problem filter for submission queries
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProblemFilter {
    /// Match any problem
    All,
    /// Match a single problem
    Only(ProblemId),
}

/// Status filter for submission queries
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusFilter {
    /// Match any verdict
    All,
    /// Match a single verdict
    Only(Verdict),
}

// ============================================================================
// Input Commands
// ============================================================================

/// Input commands from the protocol layer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Register a team (only before the contest starts)
    AddTeam { name: String },
    /// Start the contest with a duration and problem count
    Start { duration: u32, problem_count: usize },
    /// Apply a submission
    Submit {
        problem: ProblemId,
        team: String,
        verdict: Verdict,
        time: u32,
    },
    /// Recompute and snapshot the ranking
    Flush,
    /// Freeze the scoreboard
    Freeze,
    /// Scroll (unfreeze) the scoreboard
    Scroll,
    /// Query a team's rank in the last snapshot
    QueryRanking { team: String },
    /// Query a team's most recent submission matching the filters
    QuerySubmission {
        team: String,
        problem: ProblemFilter,
        status: StatusFilter,
    },
    /// End of input
    End,
}

// ============================================================================
// Output Types
// ============================================================================

/// Display state of one problem cell on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ProblemCell {
    /// No submissions yet
    Untouched,
    /// Unsolved with this many wrong attempts, nothing staged
    Wrong(u32),
    /// Solved, with this many wrong attempts before the accept
    Solved(u32),
    /// Unsolved with staged frozen submissions (only while frozen)
    Pending { wrong_before: u32, staged: u32 },
}

impl fmt::Display for ProblemCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ProblemCell::Untouched => write!(f, "."),
            ProblemCell::Wrong(n) => write!(f, "-{}", n),
            ProblemCell::Solved(0) => write!(f, "+"),
            ProblemCell::Solved(n) => write!(f, "+{}", n),
            ProblemCell::Pending { wrong_before: 0, staged } => write!(f, "0/{}", staged),
            ProblemCell::Pending { wrong_before, staged } => {
                write!(f, "-{}/{}", wrong_before, staged)
            }
        }
    }
}

/// One row of a ranked board snapshot
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoardRow {
    /// Team name
    pub name: String,
    /// 1-based rank
    pub rank: usize,
    /// Solved problem count
    pub solved: u32,
    /// Accumulated penalty
    pub penalty: u64,
    /// Per-problem display cells, problem order
    pub cells: Vec<ProblemCell>,
}

/// A full board snapshot, best team first
pub type RankedBoard = Vec<BoardRow>;

/// A team passed another during a scroll reveal
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RankChange {
    /// The team whose rank improved
    pub team: String,
    /// The team that previously occupied the new position
    pub displaced: String,
    /// The revealed team's solved count after the reveal
    pub solved: u32,
    /// The revealed team's penalty after the reveal
    pub penalty: u64,
}

/// Result of a full scroll
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrollResult {
    /// Board snapshot before any reveal (still frozen)
    pub initial_board: RankedBoard,
    /// Rank improvements, in reveal order
    pub changes: Vec<RankChange>,
    /// Board snapshot after all reveals (unfrozen)
    pub final_board: RankedBoard,
}

// ============================================================================
// Errors
// ============================================================================

/// Named failure conditions of the engine.
///
/// Every operation either fully applies or returns one of these and
/// leaves all state unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum BoardError {
    /// The contest has already started
    AlreadyStarted = 0,
    /// A team with this name is already registered
    DuplicateName = 1,
    /// The scoreboard is already frozen
    AlreadyFrozen = 2,
    /// The scoreboard is not frozen
    NotFrozen = 3,
    /// No team with this name exists
    UnknownTeam = 4,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            BoardError::AlreadyStarted => "competition has started",
            BoardError::DuplicateName => "duplicated team name",
            BoardError::AlreadyFrozen => "scoreboard has been frozen",
            BoardError::NotFrozen => "scoreboard has not been frozen",
            BoardError::UnknownTeam => "cannot find the team",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for BoardError {}
