//! SQLite persistence layer.
//!
//! RULE: only store.rs talks to the database. The engine calls store
//! methods; nothing else executes SQL.
//!
//! One table: companies, keyed by company name, each row holding the
//! JSON save-game blob plus created/last-played timestamps.

use crate::{
    error::{SimError, SimResult},
    snapshot::SaveGame,
};
use rusqlite::{params, Connection, OptionalExtension};

pub struct CompanyStore {
    conn: Connection,
}

/// One row of the recent-companies list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanySummary {
    pub name: String,
    pub last_played: i64,
}

impl CompanyStore {
    /// Open (or create) the save database at `path`.
    pub fn open(path: &str) -> SimResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SimResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> SimResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS companies (
                 name        TEXT PRIMARY KEY,
                 data        TEXT NOT NULL,
                 created_at  INTEGER NOT NULL,
                 last_played INTEGER NOT NULL
             );",
        )?;
        Ok(())
    }

    pub fn company_exists(&self, name: &str) -> SimResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM companies WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Upsert the save blob and bump last_played.
    pub fn save_company(&self, name: &str, save: &SaveGame) -> SimResult<()> {
        let json = save.to_json()?;
        let now = chrono::Utc::now().timestamp_millis();
        self.conn.execute(
            "INSERT INTO companies (name, data, created_at, last_played)
             VALUES (?1, ?2, ?3, ?3)
             ON CONFLICT(name) DO UPDATE SET data = ?2, last_played = ?3",
            params![name, json, now],
        )?;
        Ok(())
    }

    /// Load a save. Absent rows and corrupt blobs are both distinct
    /// errors — the caller never sees a partial state.
    pub fn load_company(&self, name: &str) -> SimResult<SaveGame> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT data FROM companies WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        let json = json.ok_or_else(|| SimError::CompanyNotFound {
            name: name.to_string(),
        })?;

        let save = SaveGame::from_json(&json)?;
        let now = chrono::Utc::now().timestamp_millis();
        self.conn.execute(
            "UPDATE companies SET last_played = ?2 WHERE name = ?1",
            params![name, now],
        )?;
        Ok(save)
    }

    /// Most recently played companies, newest first.
    pub fn recent_companies(&self, limit: usize) -> SimResult<Vec<CompanySummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, last_played FROM companies
             ORDER BY last_played DESC, name ASC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(CompanySummary {
                name: row.get(0)?,
                last_played: row.get(1)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Write a raw blob without going through `SaveGame`. For tooling
    /// and corruption tests.
    pub fn save_raw(&self, name: &str, json: &str) -> SimResult<()> {
        let now = chrono::Utc::now().timestamp_millis();
        self.conn.execute(
            "INSERT INTO companies (name, data, created_at, last_played)
             VALUES (?1, ?2, ?3, ?3)
             ON CONFLICT(name) DO UPDATE SET data = ?2, last_played = ?3",
            params![name, json, now],
        )?;
        Ok(())
    }
}
