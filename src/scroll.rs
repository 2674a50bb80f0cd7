//! Scroll - ordered reveal of all staged results with rank-change records.
//!
//! Repeatedly picks the lowest-ranked team that still has staged
//! submissions, reveals its lowest-lettered pending problem, re-ranks,
//! and records a rank change whenever the team's position improves.

use crate::command::RankChange;
use crate::freeze;
use crate::ranking::Standings;
use crate::team::TeamState;

/// Reveal all staged submissions, worst-ranked team first.
///
/// `standings` must reflect the current (frozen) order on entry; it is
/// updated in place by one sift-up per reveal and holds the final order
/// on return. Emits one `RankChange` per strict position improvement,
/// naming the pre-step occupant of the improved team's new position.
pub fn run(teams: &mut [TeamState], standings: &mut Standings) -> Vec<RankChange> {
    let mut changes = Vec::new();

    loop {
        // Lowest-ranked team with a pending problem, and its smallest
        // pending problem index.
        let target = standings
            .order()
            .iter()
            .rev()
            .find_map(|&t| teams[t].first_pending_problem().map(|p| (t, p)));
        let Some((team, problem)) = target else {
            break;
        };

        freeze::resolve(&mut teams[team], problem);
        let (old_pos, new_pos) = standings.sift_up(teams, team);

        if new_pos < old_pos {
            // The sift rotated positions new_pos..old_pos down by one,
            // so the team previously at new_pos is now right below.
            let displaced = standings.team_at(new_pos + 1);
            changes.push(RankChange {
                team: teams[team].name.clone(),
                displaced: teams[displaced].name.clone(),
                solved: teams[team].solved,
                penalty: teams[team].penalty,
            });
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Verdict;
    use crate::freeze::begin_freeze;
    use crate::ledger::apply_submission;

    fn team(name: &str) -> TeamState {
        let mut t = TeamState::new(name.to_string());
        t.init_problems(4);
        t
    }

    #[test]
    fn test_rank_change_record() {
        // A: solved=2 penalty=40, B: solved=2 penalty=35 -> B then A.
        // A has a hidden accept at t=10 with zero prior wrongs; after the
        // scroll A ranks above B with exactly one change record naming B
        // as the displaced team and A's new solved count and penalty.
        let mut a = team("A");
        apply_submission(&mut a, 0, Verdict::WrongAnswer, 3, false);
        apply_submission(&mut a, 0, Verdict::Accepted, 7, false);
        apply_submission(&mut a, 1, Verdict::Accepted, 13, false);
        let mut b = team("B");
        apply_submission(&mut b, 1, Verdict::WrongAnswer, 2, false);
        apply_submission(&mut b, 0, Verdict::Accepted, 6, false);
        apply_submission(&mut b, 1, Verdict::Accepted, 9, false);
        assert_eq!(a.penalty, 40);
        assert_eq!(b.penalty, 35);

        let mut teams = vec![a, b];
        begin_freeze(&mut teams);
        apply_submission(&mut teams[0], 2, Verdict::Accepted, 10, true);

        let mut standings = Standings::compute(&teams);
        assert_eq!(standings.order(), &[1, 0]);

        let changes = run(&mut teams, &mut standings);
        assert_eq!(standings.order(), &[0, 1]);
        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes[0],
            RankChange {
                team: "A".to_string(),
                displaced: "B".to_string(),
                solved: 3,
                penalty: 50,
            }
        );
    }

    #[test]
    fn test_scroll_clears_all_pending() {
        let mut teams = vec![team("x"), team("y")];
        apply_submission(&mut teams[0], 0, Verdict::Accepted, 5, false);
        begin_freeze(&mut teams);
        apply_submission(&mut teams[0], 1, Verdict::WrongAnswer, 50, true);
        apply_submission(&mut teams[0], 3, Verdict::Accepted, 55, true);
        apply_submission(&mut teams[1], 0, Verdict::Accepted, 52, true);
        apply_submission(&mut teams[1], 2, Verdict::WrongAnswer, 53, true);

        let mut standings = Standings::compute(&teams);
        run(&mut teams, &mut standings);

        for t in &teams {
            assert!(!t.has_pending());
        }
        assert_eq!(teams[0].solved, 2);
        assert_eq!(teams[1].solved, 1);
    }

    #[test]
    fn test_no_change_when_position_holds() {
        // Leader reveals another solve; it stays first, so no record.
        let mut teams = vec![team("a"), team("b")];
        apply_submission(&mut teams[0], 0, Verdict::Accepted, 5, false);
        begin_freeze(&mut teams);
        apply_submission(&mut teams[0], 1, Verdict::Accepted, 60, true);

        let mut standings = Standings::compute(&teams);
        let changes = run(&mut teams, &mut standings);

        assert!(changes.is_empty());
        assert_eq!(standings.order(), &[0, 1]);
    }

    #[test]
    fn test_worst_team_revealed_first_smallest_problem_first() {
        // Two teams with pending problems; the worse-ranked one must be
        // revealed first, and its smallest problem letter first.
        let mut teams = vec![team("a"), team("b")];
        apply_submission(&mut teams[0], 0, Verdict::Accepted, 5, false);
        begin_freeze(&mut teams);
        // b (worse) stages problems D then B; reveal order must be B, D.
        apply_submission(&mut teams[1], 3, Verdict::Accepted, 50, true);
        apply_submission(&mut teams[1], 1, Verdict::Accepted, 55, true);
        apply_submission(&mut teams[0], 2, Verdict::WrongAnswer, 58, true);

        let mut standings = Standings::compute(&teams);
        let changes = run(&mut teams, &mut standings);

        // b passes a once it has 2 solves (a has 1, then reveals only a wrong).
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].team, "b");
        assert_eq!(changes[0].displaced, "a");
        assert_eq!(changes[0].solved, 2);
        assert_eq!(standings.order(), &[1, 0]);
    }
}
