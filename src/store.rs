// SQLite-backed snapshot store and result sink.
//
// The engine only sees the `SnapshotStore` trait: three bulk reads per
// invocation (rosters, events, players). Writes happen around the engine:
// ingest fills the snapshot tables, `persist_results` commits a scored
// gameweek atomically.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::event::{EventAction, MatchEventRecord};
use crate::roster::{Chip, PlayerInfo, Position, RosterEntry};
use crate::scoring::ManagerScore;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to serialize result payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// Snapshot trait
// ---------------------------------------------------------------------------

/// Bulk read access to one gameweek's scoring inputs. Implementations must
/// return rows in a deterministic order so recomputation is byte-stable.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// All roster rows for the gameweek, grouped by user in submission order.
    async fn rosters(&self, gameweek_id: i64) -> Result<Vec<RosterEntry>, StoreError>;

    /// All event rows recorded against the gameweek's matches.
    async fn events(&self, gameweek_id: i64) -> Result<Vec<MatchEventRecord>, StoreError>;

    /// The player pool with position and lady metadata.
    async fn players(&self) -> Result<Vec<PlayerInfo>, StoreError>;
}

// ---------------------------------------------------------------------------
// SQLite implementation
// ---------------------------------------------------------------------------

/// SQLite persistence for players, matches, events, rosters, and scored
/// gameweek results.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a SQLite database at `path` and ensure all tables
    /// exist. Pass `":memory:"` for an ephemeral in-memory database (useful
    /// for tests).
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;
             PRAGMA foreign_keys = ON;",
        )?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS players (
                id       TEXT PRIMARY KEY,
                name     TEXT NOT NULL,
                position TEXT NOT NULL,
                is_lady  INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS gameweeks (
                id            INTEGER PRIMARY KEY,
                name          TEXT NOT NULL,
                deadline_time TEXT,
                finalized     INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS matches (
                id          TEXT PRIMARY KEY,
                gameweek_id INTEGER NOT NULL REFERENCES gameweeks(id)
            );

            CREATE TABLE IF NOT EXISTS player_match_events (
                match_id       TEXT NOT NULL REFERENCES matches(id),
                player_id      TEXT NOT NULL REFERENCES players(id),
                action         TEXT NOT NULL,
                quantity       INTEGER NOT NULL,
                points_awarded INTEGER NOT NULL,
                PRIMARY KEY (match_id, player_id, action)
            );

            CREATE TABLE IF NOT EXISTS user_rosters (
                gameweek_id     INTEGER NOT NULL REFERENCES gameweeks(id),
                user_id         TEXT NOT NULL,
                player_id       TEXT NOT NULL REFERENCES players(id),
                is_starting     INTEGER NOT NULL,
                is_captain      INTEGER NOT NULL DEFAULT 0,
                is_vice_captain INTEGER NOT NULL DEFAULT 0,
                bench_order     INTEGER,
                active_chip     TEXT,
                PRIMARY KEY (gameweek_id, user_id, player_id)
            );

            CREATE TABLE IF NOT EXISTS user_weekly_scores (
                user_id      TEXT NOT NULL,
                gameweek_id  INTEGER NOT NULL REFERENCES gameweeks(id),
                total_points INTEGER NOT NULL,
                captain      TEXT NOT NULL,
                bench_boost  INTEGER NOT NULL,
                auto_subs    TEXT NOT NULL,
                computed_at  TEXT NOT NULL,
                PRIMARY KEY (user_id, gameweek_id)
            );

            CREATE INDEX IF NOT EXISTS idx_matches_gameweek ON matches(gameweek_id);
            CREATE INDEX IF NOT EXISTS idx_rosters_gameweek ON user_rosters(gameweek_id);
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the database connection.
    ///
    /// Panics if the mutex is poisoned (another thread panicked while
    /// holding the lock); the database state cannot be trusted past that.
    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    // -- Ingest helpers -----------------------------------------------------

    /// Insert or update a player.
    pub fn upsert_player(&self, player: &PlayerInfo) -> Result<(), StoreError> {
        self.lock().execute(
            "INSERT INTO players (id, name, position, is_lady) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 position = excluded.position,
                 is_lady = excluded.is_lady",
            params![
                player.id,
                player.name,
                player.position.display_str(),
                player.is_lady as i64
            ],
        )?;
        Ok(())
    }

    /// Create a gameweek row if it does not exist yet.
    pub fn add_gameweek(
        &self,
        gameweek_id: i64,
        name: &str,
        deadline_time: Option<&str>,
    ) -> Result<(), StoreError> {
        self.lock().execute(
            "INSERT OR IGNORE INTO gameweeks (id, name, deadline_time, finalized)
             VALUES (?1, ?2, ?3, 0)",
            params![gameweek_id, name, deadline_time],
        )?;
        Ok(())
    }

    /// Register a match under a gameweek.
    pub fn add_match(&self, match_id: &str, gameweek_id: i64) -> Result<(), StoreError> {
        self.lock().execute(
            "INSERT OR IGNORE INTO matches (id, gameweek_id) VALUES (?1, ?2)",
            params![match_id, gameweek_id],
        )?;
        Ok(())
    }

    /// Record an event row; re-recording the same (match, player, action)
    /// key replaces the previous quantity and points.
    pub fn record_event(&self, event: &MatchEventRecord) -> Result<(), StoreError> {
        self.lock().execute(
            "INSERT OR REPLACE INTO player_match_events
                 (match_id, player_id, action, quantity, points_awarded)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                event.match_id,
                event.player_id,
                event.action.as_str(),
                event.quantity,
                event.points_awarded
            ],
        )?;
        Ok(())
    }

    /// Save one roster row for a gameweek.
    pub fn save_roster_row(&self, gameweek_id: i64, row: &RosterEntry) -> Result<(), StoreError> {
        self.lock().execute(
            "INSERT OR REPLACE INTO user_rosters
                 (gameweek_id, user_id, player_id, is_starting, is_captain,
                  is_vice_captain, bench_order, active_chip)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                gameweek_id,
                row.user_id,
                row.player_id,
                row.starting as i64,
                row.captain as i64,
                row.vice_captain as i64,
                row.bench_order,
                row.chip.map(|c| c.as_str())
            ],
        )?;
        Ok(())
    }

    // -- Result sink --------------------------------------------------------

    /// Persist a scored gameweek in one transaction: replace all score rows
    /// for the gameweek and mark it finalized. Either everything lands or
    /// nothing does.
    pub fn persist_results(
        &self,
        gameweek_id: i64,
        results: &[ManagerScore],
    ) -> Result<(), StoreError> {
        let computed_at = chrono::Utc::now().to_rfc3339();
        let mut conn = self.lock();
        let tx = conn.transaction()?;

        tx.execute(
            "DELETE FROM user_weekly_scores WHERE gameweek_id = ?1",
            params![gameweek_id],
        )?;
        for result in results {
            let auto_subs = serde_json::to_string(&result.auto_subs)?;
            tx.execute(
                "INSERT INTO user_weekly_scores
                     (user_id, gameweek_id, total_points, captain, bench_boost,
                      auto_subs, computed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    result.user_id,
                    gameweek_id,
                    result.total_points,
                    result.captain.as_str(),
                    result.bench_boost as i64,
                    auto_subs,
                    computed_at
                ],
            )?;
        }
        tx.execute(
            "UPDATE gameweeks SET finalized = 1 WHERE id = ?1",
            params![gameweek_id],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Whether a gameweek has been scored and finalized.
    pub fn is_finalized(&self, gameweek_id: i64) -> Result<bool, StoreError> {
        let finalized: Option<i64> = self
            .lock()
            .query_row(
                "SELECT finalized FROM gameweeks WHERE id = ?1",
                params![gameweek_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(finalized.unwrap_or(0) != 0)
    }

    /// Stored totals for a gameweek, best first, user id breaking ties.
    pub fn weekly_totals(&self, gameweek_id: i64) -> Result<Vec<(String, i32)>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT user_id, total_points FROM user_weekly_scores
             WHERE gameweek_id = ?1
             ORDER BY total_points DESC, user_id ASC",
        )?;
        let rows = stmt
            .query_map(params![gameweek_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i32>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

#[async_trait]
impl SnapshotStore for SqliteStore {
    async fn rosters(&self, gameweek_id: i64) -> Result<Vec<RosterEntry>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT user_id, player_id, is_starting, is_captain, is_vice_captain,
                    bench_order, active_chip
             FROM user_rosters
             WHERE gameweek_id = ?1
             ORDER BY user_id ASC, rowid ASC",
        )?;
        let rows = stmt
            .query_map(params![gameweek_id], |row| {
                let chip: Option<String> = row.get(6)?;
                Ok(RosterEntry {
                    user_id: row.get(0)?,
                    player_id: row.get(1)?,
                    starting: row.get::<_, i64>(2)? != 0,
                    captain: row.get::<_, i64>(3)? != 0,
                    vice_captain: row.get::<_, i64>(4)? != 0,
                    bench_order: row.get(5)?,
                    chip: chip.as_deref().and_then(Chip::from_str_chip),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    async fn events(&self, gameweek_id: i64) -> Result<Vec<MatchEventRecord>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT e.match_id, e.player_id, e.action, e.quantity, e.points_awarded
             FROM player_match_events e
             JOIN matches m ON m.id = e.match_id
             WHERE m.gameweek_id = ?1
             ORDER BY e.match_id ASC, e.player_id ASC, e.action ASC",
        )?;
        let rows = stmt
            .query_map(params![gameweek_id], |row| {
                let action: String = row.get(2)?;
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    action,
                    row.get::<_, u32>(3)?,
                    row.get::<_, i32>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        // Rows with unknown action identifiers are dropped rather than
        // poisoning the batch; the recorder writes only known identifiers.
        let mut events = Vec::with_capacity(rows.len());
        for (match_id, player_id, action, quantity, points_awarded) in rows {
            if let Some(action) = EventAction::from_str_action(&action) {
                events.push(MatchEventRecord {
                    match_id,
                    player_id,
                    action,
                    quantity,
                    points_awarded,
                });
            }
        }
        Ok(events)
    }

    async fn players(&self) -> Result<Vec<PlayerInfo>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, name, position, is_lady FROM players ORDER BY id ASC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                let position: String = row.get(2)?;
                Ok(PlayerInfo {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    position: Position::from_str_pos(&position),
                    is_lady: row.get::<_, i64>(3)? != 0,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
