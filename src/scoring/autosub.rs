// Auto-substitution: replace absent starters with eligible bench players
// while keeping the lineup inside the configured formation bounds.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::config::Rules;
use crate::event::{form_of, PlayerForm};
use crate::roster::{ManagerRoster, PlayerInfo, Position};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One executed substitution, recorded for the manager's breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoSub {
    pub player_out: String,
    pub player_in: String,
    pub reason: String,
}

/// The lineup that actually scores: surviving starters in squad order,
/// then promoted bench players in the order they came in.
#[derive(Debug, Clone)]
pub struct EffectiveLineup {
    pub players: Vec<String>,
    pub auto_subs: Vec<AutoSub>,
}

impl EffectiveLineup {
    pub fn contains(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p == player_id)
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Build the effective lineup for one manager.
///
/// Starters who played keep their places. Each absent starter is then
/// considered for replacement, goalkeeper first and otherwise in squad-list
/// order, walking the bench in priority order. A bench candidate is accepted
/// only if:
/// - the candidate played and has not been promoted already;
/// - goalkeepers swap strictly with goalkeepers, in both directions;
/// - lady players swap strictly with lady players, in both directions;
/// - promoting the candidate keeps their position at or under its maximum;
/// - when the promotion would complete the lineup, the full formation
///   satisfies every configured minimum and maximum.
///
/// An absent starter with no acceptable candidate simply drops out of the
/// scoring lineup; nothing is recorded for them.
pub fn resolve_effective_lineup(
    roster: &ManagerRoster,
    form: &HashMap<String, PlayerForm>,
    players: &HashMap<String, PlayerInfo>,
    rules: &Rules,
) -> EffectiveLineup {
    let position_of = |pid: &str| {
        players
            .get(pid)
            .map(|p| p.position)
            .unwrap_or(Position::Midfielder)
    };
    let is_lady = |pid: &str| players.get(pid).map(|p| p.is_lady).unwrap_or(false);
    let played = |pid: &str| form_of(form, pid).played;

    let mut effective: Vec<String> = Vec::new();
    let mut counts: HashMap<Position, usize> = HashMap::new();
    for pid in &roster.starting {
        if played(pid) {
            *counts.entry(position_of(pid)).or_insert(0) += 1;
            effective.push(pid.clone());
        }
    }

    // Absent starters: goalkeeper slots first, then squad-list order (the
    // sort is stable, so equal keys keep their original order).
    let mut failed: Vec<&String> = roster
        .starting
        .iter()
        .filter(|pid| !played(pid.as_str()))
        .collect();
    failed.sort_by_key(|pid| position_of(pid.as_str()) != Position::Goalkeeper);

    let mut used: HashSet<&str> = HashSet::new();
    let mut auto_subs: Vec<AutoSub> = Vec::new();

    for out_pid in failed {
        let out_pos = position_of(out_pid);
        let out_lady = is_lady(out_pid);

        for in_pid in &roster.bench {
            if used.contains(in_pid.as_str()) || !played(in_pid) {
                continue;
            }
            let in_pos = position_of(in_pid);

            // Goalkeepers swap only with goalkeepers, both directions.
            if (out_pos == Position::Goalkeeper) != (in_pos == Position::Goalkeeper) {
                continue;
            }
            // Lady players swap only with lady players, both directions.
            if out_lady != is_lady(in_pid) {
                continue;
            }

            // Incremental maximum: the incoming position must not overflow.
            let current = counts.get(&in_pos).copied().unwrap_or(0);
            if current + 1 > rules.formation.bounds(in_pos).max {
                continue;
            }

            // A promotion that completes the lineup must land on a fully
            // legal formation, minimums included.
            if effective.len() + 1 == rules.squad.starting {
                let mut after = counts.clone();
                *after.entry(in_pos).or_insert(0) += 1;
                if !formation_complete(&after, rules) {
                    continue;
                }
            }

            effective.push(in_pid.clone());
            *counts.entry(in_pos).or_insert(0) += 1;
            used.insert(in_pid.as_str());
            auto_subs.push(AutoSub {
                player_out: out_pid.clone(),
                player_in: in_pid.clone(),
                reason: format!("{out_pos} did not play, {in_pos} promoted from bench"),
            });
            break;
        }
    }

    EffectiveLineup {
        players: effective,
        auto_subs,
    }
}

/// Whether a complete lineup's position counts sit inside every bound.
fn formation_complete(counts: &HashMap<Position, usize>, rules: &Rules) -> bool {
    [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ]
    .iter()
    .all(|&pos| {
        let bounds = rules.formation.bounds(pos);
        let count = counts.get(&pos).copied().unwrap_or(0);
        count >= bounds.min && count <= bounds.max
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
