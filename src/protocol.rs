//! Textual command protocol - parsing and report-line formatting.
//!
//! Thin glue between the engine and a line-oriented driver. One input
//! line maps to one `Command`; one executed command maps to zero or
//! more report lines.

use crate::command::{Command, ProblemFilter, ProblemId, RankedBoard, StatusFilter, Verdict};
use crate::engine::Scoreboard;

/// Letter of a 0-based problem index (`0 -> 'A'`).
#[inline]
pub fn problem_letter(problem: ProblemId) -> char {
    (b'A' + problem as u8) as char
}

/// 0-based index of a problem letter token (`"A" -> 0`).
pub fn problem_index(token: &str) -> Option<ProblemId> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c @ 'A'..='Z'), None) => Some((c as u8 - b'A') as usize),
        _ => None,
    }
}

/// Parse one protocol line. Returns `None` for blank or malformed lines.
pub fn parse_line(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&cmd, rest) = tokens.split_first()?;
    match cmd {
        "ADDTEAM" => {
            let [name] = rest else { return None };
            Some(Command::AddTeam { name: name.to_string() })
        }
        // START DURATION [duration] PROBLEM [count]
        "START" => {
            let ["DURATION", dur, "PROBLEM", count] = rest else { return None };
            Some(Command::Start {
                duration: dur.parse().ok()?,
                problem_count: count.parse().ok()?,
            })
        }
        // SUBMIT [problem] BY [team] WITH [status] AT [time]
        "SUBMIT" => {
            let [prob, "BY", team, "WITH", status, "AT", time] = rest else {
                return None;
            };
            Some(Command::Submit {
                problem: problem_index(prob)?,
                team: team.to_string(),
                verdict: Verdict::parse(status)?,
                time: time.parse().ok()?,
            })
        }
        "FLUSH" => Some(Command::Flush),
        "FREEZE" => Some(Command::Freeze),
        "SCROLL" => Some(Command::Scroll),
        "QUERY_RANKING" => {
            let [team] = rest else { return None };
            Some(Command::QueryRanking { team: team.to_string() })
        }
        // QUERY_SUBMISSION [team] WHERE PROBLEM=[name] AND STATUS=[status]
        "QUERY_SUBMISSION" => {
            let [team, "WHERE", prob_eq, "AND", status_eq] = rest else {
                return None;
            };
            let prob_value = prob_eq.strip_prefix("PROBLEM=")?;
            let status_value = status_eq.strip_prefix("STATUS=")?;
            let problem = if prob_value == "ALL" {
                ProblemFilter::All
            } else {
                ProblemFilter::Only(problem_index(prob_value)?)
            };
            let status = if status_value == "ALL" {
                StatusFilter::All
            } else {
                StatusFilter::Only(Verdict::parse(status_value)?)
            };
            Some(Command::QuerySubmission {
                team: team.to_string(),
                problem,
                status,
            })
        }
        "END" => Some(Command::End),
        _ => None,
    }
}

/// Format a board snapshot as report lines.
pub fn board_lines(board: &RankedBoard) -> Vec<String> {
    board
        .iter()
        .map(|row| {
            let mut line = format!("{} {} {} {}", row.name, row.rank, row.solved, row.penalty);
            for cell in &row.cells {
                line.push(' ');
                line.push_str(&cell.to_string());
            }
            line
        })
        .collect()
}

/// Execute one command against the engine and return the report lines.
pub fn execute(board: &mut Scoreboard, cmd: &Command) -> Vec<String> {
    match cmd {
        Command::AddTeam { name } => match board.register_team(name) {
            Ok(()) => vec!["[Info]Add successfully.".to_string()],
            Err(e) => vec![format!("[Error]Add failed: {}.", e)],
        },
        Command::Start { duration, problem_count } => {
            match board.start_contest(*duration, *problem_count) {
                Ok(()) => vec!["[Info]Competition starts.".to_string()],
                Err(e) => vec![format!("[Error]Start failed: {}.", e)],
            }
        }
        Command::Submit { problem, team, verdict, time } => {
            // Validation is the driver's concern; invalid targets are dropped.
            if *problem < board.problem_count() {
                let _ = board.apply_submission(team, *problem, *verdict, *time);
            }
            Vec::new()
        }
        Command::Flush => {
            board.flush();
            vec!["[Info]Flush scoreboard.".to_string()]
        }
        Command::Freeze => match board.freeze() {
            Ok(()) => vec!["[Info]Freeze scoreboard.".to_string()],
            Err(e) => vec![format!("[Error]Freeze failed: {}.", e)],
        },
        Command::Scroll => match board.scroll() {
            Ok(result) => {
                let mut lines = vec!["[Info]Scroll scoreboard.".to_string()];
                lines.extend(board_lines(&result.initial_board));
                for c in &result.changes {
                    lines.push(format!("{} {} {} {}", c.team, c.displaced, c.solved, c.penalty));
                }
                lines.extend(board_lines(&result.final_board));
                lines
            }
            Err(e) => vec![format!("[Error]Scroll failed: {}.", e)],
        },
        Command::QueryRanking { team } => match board.query_rank(team) {
            Ok((rank, stale)) => {
                let mut lines = vec!["[Info]Complete query ranking.".to_string()];
                if stale {
                    lines.push(
                        "[Warning]Scoreboard is frozen. The ranking may be inaccurate \
                         until it were scrolled."
                            .to_string(),
                    );
                }
                lines.push(format!("{} NOW AT RANKING {}", team, rank));
                lines
            }
            Err(e) => vec![format!("[Error]Query ranking failed: {}.", e)],
        },
        Command::QuerySubmission { team, problem, status } => {
            match board.query_last_submission(team, *problem, *status) {
                Ok(Some(sub)) => vec![
                    "[Info]Complete query submission.".to_string(),
                    format!(
                        "{} {} {} {}",
                        team,
                        problem_letter(sub.problem),
                        sub.verdict,
                        sub.time
                    ),
                ],
                Ok(None) => vec![
                    "[Info]Complete query submission.".to_string(),
                    "Cannot find any submission.".to_string(),
                ],
                Err(e) => vec![format!("[Error]Query submission failed: {}.", e)],
            }
        }
        Command::End => vec!["[Info]Competition ends.".to_string()],
    }
}

/// Run a whole protocol script and return the concatenated report.
///
/// Stops at `END` (after reporting it); later lines are ignored.
pub fn run_script(input: &str) -> String {
    let mut board = Scoreboard::new();
    let mut out = Vec::new();
    for line in input.lines() {
        let Some(cmd) = parse_line(line) else { continue };
        let is_end = cmd == Command::End;
        out.extend(execute(&mut board, &cmd));
        if is_end {
            break;
        }
    }
    let mut report = out.join("\n");
    if !report.is_empty() {
        report.push('\n');
    }
    report
}
