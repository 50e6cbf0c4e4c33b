// CSV ingest for player pools and recorded match events.
//
// Player files carry id/name/position plus an optional lady flag. Event
// files carry raw actions; rows without an explicit points column are
// resolved through the rule table's point values using the player's
// position (saves included, with their grouping).

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::config::PointsTable;
use crate::event::{EventAction, MatchEventRecord};
use crate::roster::{PlayerInfo, Position};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("unknown action `{action}` in {path}")]
    UnknownAction { path: String, action: String },
}

// ---------------------------------------------------------------------------
// Raw CSV serde structs (private)
// ---------------------------------------------------------------------------

/// Player CSV row: `id,name,position[,is_lady]`. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RawPlayerRow {
    id: String,
    name: String,
    position: String,
    #[serde(default)]
    is_lady: Option<String>,
}

/// Event CSV row: `match_id,player_id,action[,quantity][,points]`.
/// Quantity defaults to 1; an empty points column means "resolve from the
/// rule table".
#[derive(Debug, Deserialize)]
struct RawEventRow {
    match_id: String,
    player_id: String,
    action: String,
    #[serde(default)]
    quantity: Option<u32>,
    #[serde(default)]
    points: Option<i32>,
}

fn truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load a player pool CSV.
pub fn load_players_csv(path: &Path) -> Result<Vec<PlayerInfo>, ImportError> {
    let file = std::fs::File::open(path).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut players = Vec::new();
    for record in reader.deserialize() {
        let row: RawPlayerRow = record.map_err(|e| ImportError::Csv {
            path: path.display().to_string(),
            source: e,
        })?;
        players.push(PlayerInfo {
            position: Position::from_str_pos(&row.position),
            is_lady: row.is_lady.as_deref().map(truthy).unwrap_or(false),
            id: row.id,
            name: row.name,
        });
    }
    Ok(players)
}

/// Load a match-event CSV, resolving point values where the file does not
/// supply them.
///
/// `positions` maps player ids to positions for table resolution; a player
/// missing from the map is scored as a midfielder and logged, matching the
/// neutral fallback used everywhere else.
pub fn load_events_csv(
    path: &Path,
    points: &PointsTable,
    positions: &HashMap<String, Position>,
) -> Result<Vec<MatchEventRecord>, ImportError> {
    let file = std::fs::File::open(path).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut events = Vec::new();
    for record in reader.deserialize() {
        let row: RawEventRow = record.map_err(|e| ImportError::Csv {
            path: path.display().to_string(),
            source: e,
        })?;

        let action =
            EventAction::from_str_action(&row.action).ok_or_else(|| ImportError::UnknownAction {
                path: path.display().to_string(),
                action: row.action.clone(),
            })?;
        let quantity = row.quantity.unwrap_or(1);

        let points_awarded = match row.points {
            Some(explicit) => explicit,
            None => {
                let position = match positions.get(&row.player_id) {
                    Some(pos) => *pos,
                    None => {
                        warn!(
                            "Player {} has no position metadata; resolving {} as MID",
                            row.player_id, row.action
                        );
                        Position::Midfielder
                    }
                };
                points.points_for(action, position, quantity)
            }
        };

        events.push(MatchEventRecord {
            match_id: row.match_id,
            player_id: row.player_id,
            action,
            quantity,
            points_awarded,
        });
    }
    Ok(events)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
