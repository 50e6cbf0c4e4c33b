// Squad domain types: positions, chips, roster rows, and per-manager
// roster assembly with validity checks.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Rules;

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// Playing positions used for formation accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MID")]
    Midfielder,
    #[serde(rename = "FWD")]
    Forward,
}

impl Position {
    /// Parse a position string into a Position enum.
    ///
    /// Handles the abbreviations and long forms that appear in imported
    /// player data ("gk", "goalkeeper", "keeper", "df", "striker", ...).
    /// Unrecognized strings map to `Midfielder`, the neutral outfield slot.
    pub fn from_str_pos(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "gk" | "goalkeeper" | "keeper" => Position::Goalkeeper,
            "def" | "defender" | "df" => Position::Defender,
            "mid" | "midfielder" | "mf" => Position::Midfielder,
            "fwd" | "forward" | "fw" | "striker" => Position::Forward,
            _ => Position::Midfielder,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }

    /// Deterministic ordering index: goalkeeper first, then outfield by line.
    pub fn sort_order(&self) -> u8 {
        match self {
            Position::Goalkeeper => 0,
            Position::Defender => 1,
            Position::Midfielder => 2,
            Position::Forward => 3,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Chips
// ---------------------------------------------------------------------------

/// One-time chips a manager can play for a gameweek.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chip {
    BenchBoost,
    TripleCaptain,
}

impl Chip {
    /// Parse a chip identifier as stored by the roster store.
    /// Unknown identifiers are treated as no chip.
    pub fn from_str_chip(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bench_boost" => Some(Chip::BenchBoost),
            "triple_captain" => Some(Chip::TripleCaptain),
            _ => None,
        }
    }

    /// Identifier used in storage and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Chip::BenchBoost => "bench_boost",
            Chip::TripleCaptain => "triple_captain",
        }
    }
}

// ---------------------------------------------------------------------------
// Player metadata
// ---------------------------------------------------------------------------

/// Static player attributes the engine needs: position for formation
/// accounting and the lady flag for like-for-like substitution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: String,
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub is_lady: bool,
}

// ---------------------------------------------------------------------------
// Roster rows and assembled rosters
// ---------------------------------------------------------------------------

/// One (manager, player) selection row as returned by the roster store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub user_id: String,
    pub player_id: String,
    pub starting: bool,
    pub captain: bool,
    pub vice_captain: bool,
    /// Substitution priority within the bench, 1 = first in. `None` sorts
    /// after every explicit order.
    pub bench_order: Option<u32>,
    pub chip: Option<Chip>,
}

/// A manager's assembled squad for one gameweek.
///
/// `starting` preserves squad-list order as submitted; `bench` is sorted by
/// ascending bench order (entries without an order last, original row order
/// breaking ties).
#[derive(Debug, Clone)]
pub struct ManagerRoster {
    pub user_id: String,
    pub starting: Vec<String>,
    pub bench: Vec<String>,
    pub captain_id: String,
    pub vice_captain_id: String,
    pub chip: Option<Chip>,
}

impl ManagerRoster {
    /// All squad members, starters first then bench in priority order.
    pub fn squad(&self) -> impl Iterator<Item = &String> {
        self.starting.iter().chain(self.bench.iter())
    }
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// Reasons a single manager's roster is rejected. These are per-manager
/// failures: the scoring batch records them and moves on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("squad must have exactly {expected} players (got {got})")]
    WrongSquadSize { expected: usize, got: usize },

    #[error("lineup must have exactly {expected} starting players (got {got})")]
    WrongStartingCount { expected: usize, got: usize },

    #[error("player {player_id} appears more than once in the squad")]
    DuplicatePlayer { player_id: String },

    #[error("no captain designated")]
    MissingCaptain,

    #[error("no vice-captain designated")]
    MissingViceCaptain,

    #[error("more than one captain designated")]
    MultipleCaptains,

    #[error("more than one vice-captain designated")]
    MultipleViceCaptains,

    #[error("captain {player_id} is not in the starting lineup")]
    CaptainNotStarting { player_id: String },

    #[error("vice-captain {player_id} is not in the starting lineup")]
    ViceCaptainNotStarting { player_id: String },

    #[error("captain and vice-captain must be different players")]
    CaptainIsViceCaptain,

    #[error("squad must include exactly {expected} lady players (got {got})")]
    WrongLadyCount { expected: usize, got: usize },

    #[error("lineup must include exactly {expected} starting lady players (got {got})")]
    WrongStartingLadyCount { expected: usize, got: usize },
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Assemble a manager's roster rows into a validated [`ManagerRoster`].
///
/// Checks the squad shape against the configured rules: total and starting
/// sizes, uniqueness, exactly one captain and one distinct vice-captain both
/// in the starting lineup, and (when configured) lady composition counts.
/// Formation counts of the submitted lineup are enforced upstream at save
/// time and are not re-checked here.
pub fn assemble_roster(
    rows: &[RosterEntry],
    lookup: &dyn Fn(&str) -> Option<PlayerInfo>,
    rules: &Rules,
) -> Result<ManagerRoster, RosterError> {
    let user_id = rows.first().map(|r| r.user_id.clone()).unwrap_or_default();

    if rows.len() != rules.squad.size {
        return Err(RosterError::WrongSquadSize {
            expected: rules.squad.size,
            got: rows.len(),
        });
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for row in rows {
        if !seen.insert(row.player_id.as_str()) {
            return Err(RosterError::DuplicatePlayer {
                player_id: row.player_id.clone(),
            });
        }
    }

    let starting: Vec<String> = rows
        .iter()
        .filter(|r| r.starting)
        .map(|r| r.player_id.clone())
        .collect();
    if starting.len() != rules.squad.starting {
        return Err(RosterError::WrongStartingCount {
            expected: rules.squad.starting,
            got: starting.len(),
        });
    }

    // Bench sorted by ascending bench order; missing orders sort last,
    // original row order breaks ties (stable sort).
    let mut bench_rows: Vec<&RosterEntry> = rows.iter().filter(|r| !r.starting).collect();
    bench_rows.sort_by_key(|r| r.bench_order.unwrap_or(u32::MAX));
    let bench: Vec<String> = bench_rows.iter().map(|r| r.player_id.clone()).collect();

    // Captain and vice-captain designation.
    let captains: Vec<&RosterEntry> = rows.iter().filter(|r| r.captain).collect();
    let captain = match captains.as_slice() {
        [] => return Err(RosterError::MissingCaptain),
        [one] => *one,
        _ => return Err(RosterError::MultipleCaptains),
    };
    let vices: Vec<&RosterEntry> = rows.iter().filter(|r| r.vice_captain).collect();
    let vice = match vices.as_slice() {
        [] => return Err(RosterError::MissingViceCaptain),
        [one] => *one,
        _ => return Err(RosterError::MultipleViceCaptains),
    };

    if captain.player_id == vice.player_id {
        return Err(RosterError::CaptainIsViceCaptain);
    }
    if !captain.starting {
        return Err(RosterError::CaptainNotStarting {
            player_id: captain.player_id.clone(),
        });
    }
    if !vice.starting {
        return Err(RosterError::ViceCaptainNotStarting {
            player_id: vice.player_id.clone(),
        });
    }

    // Lady composition counts, when the league configures them.
    let is_lady = |pid: &str| lookup(pid).map(|p| p.is_lady).unwrap_or(false);
    if let Some(expected) = rules.composition.lady_players_squad {
        let got = rows.iter().filter(|r| is_lady(&r.player_id)).count();
        if got != expected {
            return Err(RosterError::WrongLadyCount { expected, got });
        }
    }
    if let Some(expected) = rules.composition.lady_players_starting {
        let got = starting.iter().filter(|pid| is_lady(pid)).count();
        if got != expected {
            return Err(RosterError::WrongStartingLadyCount { expected, got });
        }
    }

    // Chip: first row carrying one wins; the store writes the same value on
    // every row of a gameweek roster.
    let chip = rows.iter().find_map(|r| r.chip);

    Ok(ManagerRoster {
        user_id,
        starting,
        bench,
        captain_id: captain.player_id.clone(),
        vice_captain_id: vice.player_id.clone(),
        chip,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
