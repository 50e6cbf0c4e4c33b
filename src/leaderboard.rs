// Gameweek leaderboard construction.

use serde::{Deserialize, Serialize};

use crate::scoring::ManagerScore;

/// One leaderboard line. Ranks follow standard competition ranking: equal
/// totals share a rank and the next distinct total resumes at its
/// positional index (1, 1, 3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub rank: u32,
    pub user_id: String,
    pub total_points: i32,
}

/// Sort scored managers into a leaderboard: totals descending, user id
/// ascending on ties. Deterministic for a fixed result set.
pub fn build_leaderboard(results: &[ManagerScore]) -> Vec<LeaderboardRow> {
    let mut ordered: Vec<(&str, i32)> = results
        .iter()
        .map(|r| (r.user_id.as_str(), r.total_points))
        .collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut rows = Vec::with_capacity(ordered.len());
    let mut last_points: Option<i32> = None;
    let mut last_rank = 0u32;
    for (index, (user_id, total_points)) in ordered.into_iter().enumerate() {
        let rank = match last_points {
            Some(p) if p == total_points => last_rank,
            _ => index as u32 + 1,
        };
        last_points = Some(total_points);
        last_rank = rank;
        rows.push(LeaderboardRow {
            rank,
            user_id: user_id.to_string(),
            total_points,
        });
    }
    rows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
