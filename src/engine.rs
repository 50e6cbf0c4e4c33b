// Gameweek batch orchestration.
//
// One invocation per gameweek close: bulk-fetch the roster and event
// snapshots, score every manager independently, and hand the assembled
// result set back to the caller. Persisting is the caller's job, so an
// aborted invocation leaves stored results untouched.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Rules;
use crate::event::{resolve_player_form, MatchEventRecord};
use crate::roster::{assemble_roster, PlayerInfo, RosterEntry};
use crate::scoring::{score_manager, ManagerScore};
use crate::store::{SnapshotStore, StoreError};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Fatal failures that abort the whole invocation. Per-manager problems are
/// reported inside [`GameweekScoring`] instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("snapshot store failed: {0}")]
    Store(#[from] StoreError),
}

/// In-memory snapshot of everything one scoring run reads.
#[derive(Debug, Clone)]
pub struct GameweekSnapshot {
    pub gameweek_id: i64,
    pub rosters: Vec<RosterEntry>,
    pub events: Vec<MatchEventRecord>,
    pub players: Vec<PlayerInfo>,
}

/// A manager whose roster could not be scored, with the reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerScoreError {
    pub user_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSummary {
    pub gameweek_id: i64,
    pub users_scored: usize,
    pub users_failed: usize,
}

/// The full output of one scoring run: per-manager results in user-id
/// order, skipped managers with reasons, and the operator-facing summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameweekScoring {
    pub results: Vec<ManagerScore>,
    pub errors: Vec<ManagerScoreError>,
    pub summary: ScoringSummary,
}

// ---------------------------------------------------------------------------
// Pure scoring pass
// ---------------------------------------------------------------------------

/// Score a snapshot. Pure: same snapshot and rules, same output.
///
/// Managers are processed in sorted user-id order. A malformed roster is
/// recorded under `errors` and the batch continues; an empty event snapshot
/// produces all-zero results rather than failing.
pub fn score_snapshot(snapshot: &GameweekSnapshot, rules: &Rules) -> GameweekScoring {
    let players: HashMap<String, PlayerInfo> = snapshot
        .players
        .iter()
        .map(|p| (p.id.clone(), p.clone()))
        .collect();
    let form = resolve_player_form(&snapshot.events);

    // Group roster rows per manager, preserving row order within each.
    let mut by_user: BTreeMap<&str, Vec<RosterEntry>> = BTreeMap::new();
    for row in &snapshot.rosters {
        by_user
            .entry(row.user_id.as_str())
            .or_default()
            .push(row.clone());
    }

    let mut results = Vec::with_capacity(by_user.len());
    let mut errors = Vec::new();
    let lookup = |pid: &str| players.get(pid).cloned();

    for (user_id, rows) in &by_user {
        match assemble_roster(rows, &lookup, rules) {
            Ok(roster) => {
                let score = score_manager(&roster, &form, &players, rules);
                debug!(
                    "Manager {} scored {} points ({} auto-subs)",
                    user_id,
                    score.total_points,
                    score.auto_subs.len()
                );
                results.push(score);
            }
            Err(e) => {
                warn!("Skipping manager {} with invalid roster: {}", user_id, e);
                errors.push(ManagerScoreError {
                    user_id: user_id.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let summary = ScoringSummary {
        gameweek_id: snapshot.gameweek_id,
        users_scored: results.len(),
        users_failed: errors.len(),
    };
    GameweekScoring {
        results,
        errors,
        summary,
    }
}

// ---------------------------------------------------------------------------
// Batch entry point
// ---------------------------------------------------------------------------

/// Compute all managers' scores for one gameweek.
///
/// The only I/O is three bulk reads up front; the computation itself runs
/// on the in-memory snapshot. A gameweek with no rosters yields an empty,
/// well-formed result. Store failures abort the run and propagate.
pub async fn calculate_gameweek_scores<S: SnapshotStore + ?Sized>(
    store: &S,
    rules: &Rules,
    gameweek_id: i64,
) -> Result<GameweekScoring, EngineError> {
    let rosters = store.rosters(gameweek_id).await?;
    if rosters.is_empty() {
        info!("No rosters for gameweek {}; nothing to score", gameweek_id);
        return Ok(GameweekScoring {
            results: vec![],
            errors: vec![],
            summary: ScoringSummary {
                gameweek_id,
                users_scored: 0,
                users_failed: 0,
            },
        });
    }

    let events = store.events(gameweek_id).await?;
    let players = store.players().await?;
    info!(
        "Scoring gameweek {}: {} roster rows, {} event rows",
        gameweek_id,
        rosters.len(),
        events.len()
    );

    let snapshot = GameweekSnapshot {
        gameweek_id,
        rosters,
        events,
        players,
    };
    let scoring = score_snapshot(&snapshot, rules);
    info!(
        "Gameweek {} scored: {} users, {} skipped",
        gameweek_id, scoring.summary.users_scored, scoring.summary.users_failed
    );
    Ok(scoring)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
