//! # Frostboard
//!
//! A deterministic ICPC-style contest scoreboard with freeze/scroll
//! semantics.
//!
//! ## Design Principles
//!
//! - **Single-Writer**: one logical thread owns the team table (no locks)
//! - **Deterministic**: identical input streams produce identical boards,
//!   rank-change sequences, and state hashes
//! - **Atomic Operations**: every command fully applies or reports a
//!   named error with no state change
//!
//! ## Architecture
//!
//! ```text
//! [Protocol Lines] --> [Command] --> [Scoreboard Engine]
//!                                         |
//!                          [Boards / RankChange Records]
//! ```
//!
//! Submissions mutate per-team state through the ledger (live) or are
//! staged in a freeze session; the scroll loop reveals staged results
//! lowest-ranked team first, re-ranking incrementally after each reveal.

pub mod command;
pub mod engine;
pub mod freeze;
pub mod ledger;
pub mod protocol;
pub mod ranking;
pub mod scroll;
pub mod team;

// Re-exports for convenience
pub use command::{
    BoardError, BoardRow, Command, ProblemCell, ProblemFilter, ProblemId, RankChange,
    RankedBoard, ScrollResult, StatusFilter, TeamId, Verdict, WRONG_PENALTY,
};
pub use engine::Scoreboard;
pub use freeze::{RevealOutcome, Session};
pub use ranking::{compare_teams, compute_order, Standings};
pub use team::{PendingReveal, ProblemState, SubmissionRecord, TeamState};
