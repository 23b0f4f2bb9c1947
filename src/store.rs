use crate::models::DateRecord;
use crate::validate;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::types::ToSql;
use rusqlite::{params, OptionalExtension, Row};
use std::fmt;
use std::path::Path;
use tracing::info;

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS opening_hours (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    date          TEXT    NOT NULL UNIQUE,
    opening_time  TEXT    NOT NULL,
    closing_time  TEXT    NOT NULL,
    special_note  TEXT    NOT NULL DEFAULT '',
    is_enabled    INTEGER NOT NULL DEFAULT 1,
    created_at    TEXT    NOT NULL DEFAULT (datetime('now')),
    updated_at    TEXT    NOT NULL DEFAULT (datetime('now'))
);
CREATE INDEX IF NOT EXISTS idx_opening_hours_enabled      ON opening_hours (is_enabled);
CREATE INDEX IF NOT EXISTS idx_opening_hours_date_enabled ON opening_hours (date, is_enabled);
";

const COLUMNS: &str =
    "id, date, opening_time, closing_time, special_note, is_enabled, created_at, updated_at";

#[derive(Debug)]
pub enum StoreError {
    NotFound,
    /// A caller bypassed the boundary format checks.
    Invalid(String),
    Sqlite(rusqlite::Error),
    Pool(r2d2::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "record not found"),
            Self::Invalid(message) => write!(f, "invalid record: {message}"),
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::Pool(err) => write!(f, "connection pool error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Sqlite(err)
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(err: r2d2::Error) -> Self {
        Self::Pool(err)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// AND-combined list filters. `enabled_only` defaults to false here;
/// API callers that want the public default set it explicitly.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub enabled_only: bool,
    pub order: SortOrder,
    pub limit: Option<u32>,
}

/// Persistence for one record per calendar date, keyed by `date`.
/// Cheap to clone; every handle shares the same pool.
#[derive(Clone)]
pub struct DateStore {
    pool: Pool<SqliteConnectionManager>,
}

impl DateStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().build(manager)?;
        let store = Self { pool };
        store.ensure_schema()?;
        info!("opened date store at {}", path.display());
        Ok(store)
    }

    /// In-memory store for tests. The pool is capped at one connection
    /// so every handle sees the same database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager)?;
        let store = Self { pool };
        store.ensure_schema()?;
        Ok(store)
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, StoreError> {
        Ok(self.pool.get()?)
    }

    fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn()?.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Upserts by `date`, atomically: concurrent saves for the same date
    /// can never produce two rows. `updated_at` is touched on every
    /// save; `created_at` only on first insert.
    pub fn save(
        &self,
        date: &str,
        opening_time: &str,
        closing_time: &str,
        special_note: &str,
        is_enabled: bool,
    ) -> Result<DateRecord, StoreError> {
        // Defense in depth: the API boundary validates first, but the
        // store refuses malformed keys/values regardless of caller.
        if !validate::is_valid_date(date) {
            return Err(StoreError::Invalid(format!("malformed date '{date}'")));
        }
        if !validate::is_valid_time(opening_time) || !validate::is_valid_time(closing_time) {
            return Err(StoreError::Invalid(format!(
                "malformed time '{opening_time}'/'{closing_time}'"
            )));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO opening_hours (date, opening_time, closing_time, special_note, is_enabled)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(date) DO UPDATE SET
                 opening_time = excluded.opening_time,
                 closing_time = excluded.closing_time,
                 special_note = excluded.special_note,
                 is_enabled   = excluded.is_enabled,
                 updated_at   = datetime('now')",
            params![date, opening_time, closing_time, special_note, is_enabled as i64],
        )?;

        let record = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM opening_hours WHERE date = ?1"),
                params![date],
                row_to_record,
            )
            .optional()?;
        record.ok_or(StoreError::NotFound)
    }

    pub fn get(&self, date: &str) -> Result<DateRecord, StoreError> {
        let record = self
            .conn()?
            .query_row(
                &format!("SELECT {COLUMNS} FROM opening_hours WHERE date = ?1"),
                params![date],
                row_to_record,
            )
            .optional()?;
        record.ok_or(StoreError::NotFound)
    }

    pub fn list(&self, filter: &ListFilter) -> Result<Vec<DateRecord>, StoreError> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if filter.enabled_only {
            clauses.push("is_enabled = 1");
        }
        if let Some(year) = filter.year {
            clauses.push("CAST(strftime('%Y', date) AS INTEGER) = ?");
            values.push(Box::new(year as i64));
        }
        if let Some(month) = filter.month {
            clauses.push("CAST(strftime('%m', date) AS INTEGER) = ?");
            values.push(Box::new(month as i64));
        }

        let mut sql = format!("SELECT {COLUMNS} FROM opening_hours");
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY date ");
        sql.push_str(filter.order.as_sql());
        if let Some(limit) = filter.limit {
            sql.push_str(" LIMIT ?");
            values.push(Box::new(limit as i64));
        }

        let conn = self.conn()?;
        let mut statement = conn.prepare(&sql)?;
        let refs: Vec<&dyn ToSql> = values.iter().map(|value| value.as_ref()).collect();
        let rows = statement.query_map(refs.as_slice(), row_to_record)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Removes the record for `date`, returning how many rows went away
    /// (0 or 1). Callers decide whether 0 is an error.
    pub fn delete(&self, date: &str) -> Result<usize, StoreError> {
        let removed = self
            .conn()?
            .execute("DELETE FROM opening_hours WHERE date = ?1", params![date])?;
        Ok(removed)
    }

    pub fn count_enabled(&self) -> Result<i64, StoreError> {
        let count = self.conn()?.query_row(
            "SELECT COUNT(*) FROM opening_hours WHERE is_enabled = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<DateRecord> {
    Ok(DateRecord {
        id: row.get(0)?,
        date: row.get(1)?,
        opening_time: row.get(2)?,
        closing_time: row.get(3)?,
        special_note: row.get(4)?,
        is_enabled: row.get::<_, i64>(5)? != 0,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}
