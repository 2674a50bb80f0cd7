//! Ranking - the total-order comparator and order maintenance.
//!
//! The comparator is a strict total order over teams (name uniqueness
//! guarantees the final tie-break). `Standings` keeps the current order
//! with O(1) position lookup and supports the single sift-up step used
//! during a scroll, which is externally indistinguishable from a full
//! stable re-sort because only the revealed team's key changes and it
//! can only improve.

use crate::command::TeamId;
use crate::team::TeamState;
use std::cmp::Ordering;

/// Compare two teams for ranking; `Less` means `a` ranks higher.
///
/// Priority order:
/// 1. Higher solved count
/// 2. Lower penalty
/// 3. Lexicographically smaller descending-sorted solve-time sequence
/// 4. Lexicographically smaller name
pub fn compare_teams(a: &TeamState, b: &TeamState) -> Ordering {
    compare_with_times(a, &a.solve_times_desc(), b, &b.solve_times_desc())
}

/// Comparator with caller-provided descending time vectors.
///
/// The full-order sort precomputes these once per team instead of
/// re-sorting inside every comparison.
pub fn compare_with_times(
    a: &TeamState,
    desc_a: &[u32],
    b: &TeamState,
    desc_b: &[u32],
) -> Ordering {
    b.solved
        .cmp(&a.solved)
        .then_with(|| a.penalty.cmp(&b.penalty))
        // Equal solved count implies equal sequence lengths
        .then_with(|| desc_a.cmp(desc_b))
        .then_with(|| a.name.cmp(&b.name))
}

/// Compute the full ranking order over all teams.
///
/// Stable sort by the ranking comparator. Stability is irrelevant while
/// rule 4 makes ties impossible, but is kept in case the final tie-break
/// is ever relaxed.
pub fn compute_order(teams: &[TeamState]) -> Vec<TeamId> {
    let desc_times: Vec<Vec<u32>> = teams.iter().map(|t| t.solve_times_desc()).collect();
    let mut order: Vec<TeamId> = (0..teams.len()).collect();
    order.sort_by(|&a, &b| {
        compare_with_times(&teams[a], &desc_times[a], &teams[b], &desc_times[b])
    });
    order
}

/// Current ranking order with O(1) position lookup.
#[derive(Clone, Debug, Default)]
pub struct Standings {
    /// Team ids, best first
    order: Vec<TeamId>,
    /// position[team] = index of the team in `order`
    position: Vec<usize>,
}

impl Standings {
    /// Build standings from a precomputed order.
    pub fn from_order(order: Vec<TeamId>, team_count: usize) -> Self {
        let mut position = vec![0usize; team_count];
        for (i, &t) in order.iter().enumerate() {
            position[t] = i;
        }
        Self { order, position }
    }

    /// Build standings by sorting all teams.
    pub fn compute(teams: &[TeamState]) -> Self {
        Self::from_order(compute_order(teams), teams.len())
    }

    /// The current order, best team first.
    #[inline]
    pub fn order(&self) -> &[TeamId] {
        &self.order
    }

    /// 0-based position of a team in the current order.
    #[inline]
    pub fn position_of(&self, team: TeamId) -> usize {
        self.position[team]
    }

    /// Team at a 0-based position.
    #[inline]
    pub fn team_at(&self, pos: usize) -> TeamId {
        self.order[pos]
    }

    /// Number of ranked teams.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if no teams are ranked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Move `team` up past now-worse-ranked neighbors after its key improved.
    ///
    /// One bubble pass in the total order. Returns `(old_pos, new_pos)`;
    /// when `new_pos < old_pos`, the teams previously at
    /// `new_pos..old_pos` have each shifted down by one, so the pre-step
    /// occupant of `new_pos` now sits at `new_pos + 1`.
    ///
    /// Precondition: the key change cannot worsen the team's position
    /// (holds for reveals: an accept strictly strengthens the key against
    /// every team previously ranked above).
    pub fn sift_up(&mut self, teams: &[TeamState], team: TeamId) -> (usize, usize) {
        let old_pos = self.position[team];
        let desc = teams[team].solve_times_desc();
        let mut pos = old_pos;
        while pos > 0 {
            let above = self.order[pos - 1];
            let desc_above = teams[above].solve_times_desc();
            if compare_with_times(&teams[team], &desc, &teams[above], &desc_above)
                == Ordering::Less
            {
                self.order.swap(pos - 1, pos);
                self.position[above] = pos;
                pos -= 1;
            } else {
                break;
            }
        }
        self.position[team] = pos;
        (old_pos, pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str, solves: &[u32], extra_penalty: u64) -> TeamState {
        let mut t = TeamState::new(name.to_string());
        t.init_problems(8);
        for (p, &time) in solves.iter().enumerate() {
            t.apply_accept(p, time);
        }
        t.penalty += extra_penalty;
        t
    }

    #[test]
    fn test_more_solved_ranks_higher() {
        let a = team("alpha", &[10, 20], 0);
        let b = team("beta", &[10], 0);
        assert_eq!(compare_teams(&a, &b), Ordering::Less);
        assert_eq!(compare_teams(&b, &a), Ordering::Greater);
    }

    #[test]
    fn test_lower_penalty_ranks_higher() {
        let a = team("alpha", &[10], 5);
        let b = team("beta", &[10], 0);
        assert_eq!(compare_teams(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_solve_time_sequence_tie_break() {
        // Both solved=3, equal penalty; X solved at [10,20,70], Y at [10,30,60].
        // Descending: X=[70,20,10], Y=[60,30,10]; 60 < 70 so Y ranks higher.
        let mut x = team("X", &[10, 20, 70], 0);
        let mut y = team("Y", &[10, 30, 60], 0);
        let common = x.penalty.max(y.penalty);
        x.penalty = common;
        y.penalty = common;
        assert_eq!(compare_teams(&y, &x), Ordering::Less);
        assert_eq!(compare_teams(&x, &y), Ordering::Greater);
    }

    #[test]
    fn test_name_tie_break() {
        let a = team("aardvark", &[10], 0);
        let b = team("zebra", &[10], 0);
        assert_eq!(compare_teams(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_comparator_is_total() {
        let teams = vec![
            team("a", &[10, 20], 0),
            team("b", &[10, 20], 0),
            team("c", &[15], 0),
            team("d", &[], 0),
        ];
        for i in 0..teams.len() {
            assert_eq!(compare_teams(&teams[i], &teams[i]), Ordering::Equal);
            for j in 0..teams.len() {
                if i != j {
                    // Distinct teams never compare equal
                    assert_ne!(compare_teams(&teams[i], &teams[j]), Ordering::Equal);
                    assert_eq!(
                        compare_teams(&teams[i], &teams[j]),
                        compare_teams(&teams[j], &teams[i]).reverse()
                    );
                }
            }
        }
    }

    #[test]
    fn test_compute_order() {
        let teams = vec![
            team("slow", &[100], 0),
            team("fast", &[10], 0),
            team("idle", &[], 0),
        ];
        let order = compute_order(&teams);
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn test_standings_positions() {
        let teams = vec![team("b", &[10], 0), team("a", &[10], 0)];
        let s = Standings::compute(&teams);
        assert_eq!(s.order(), &[1, 0]);
        assert_eq!(s.position_of(1), 0);
        assert_eq!(s.position_of(0), 1);
        assert_eq!(s.team_at(0), 1);
    }

    #[test]
    fn test_sift_up_matches_full_resort() {
        let mut teams = vec![
            team("one", &[10, 20], 0),
            team("two", &[15], 0),
            team("three", &[30], 0),
            team("four", &[], 0),
        ];
        let mut s = Standings::compute(&teams);

        // "four" solves two problems cheaply and should pass everyone.
        teams[3].apply_accept(0, 1);
        let (old_pos, new_pos) = s.sift_up(&teams, 3);
        assert!(new_pos <= old_pos);
        assert_eq!(s.order(), compute_order(&teams).as_slice());

        teams[3].apply_accept(1, 2);
        s.sift_up(&teams, 3);
        assert_eq!(s.order(), compute_order(&teams).as_slice());
        assert_eq!(s.position_of(3), 0);
    }

    #[test]
    fn test_sift_up_no_change() {
        let teams = vec![team("a", &[10], 0), team("b", &[20], 0)];
        let mut s = Standings::compute(&teams);
        let (old_pos, new_pos) = s.sift_up(&teams, 1);
        assert_eq!(old_pos, new_pos);
        assert_eq!(s.order(), &[0, 1]);
    }
}
