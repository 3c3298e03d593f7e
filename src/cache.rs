use crate::error::{CardError, Result};
use crate::model::{DailyRecord, SCHEMA_VERSION};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

/// Local cache of contribution days, keyed by login and date. Only days
/// from closed fetch windows are stored, so cached counts never go stale.
pub struct Cache {
    conn: Connection,
}

impl Cache {
    pub fn new<P: AsRef<Path>>(cache_path: Option<P>) -> Result<Self> {
        let cache_dir = match cache_path {
            Some(path) => path.as_ref().to_path_buf(),
            None => PathBuf::from(".ghcard"),
        };
        std::fs::create_dir_all(&cache_dir)?;
        let db_path = cache_dir.join("cache.db");
        let conn = Connection::open(&db_path)?;
        let mut cache = Self { conn };
        cache.initialize()?;
        Ok(cache)
    }

    fn initialize(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS contribution_days (
                login TEXT NOT NULL,
                date TEXT NOT NULL,
                count INTEGER NOT NULL,
                PRIMARY KEY (login, date)
            );
            ",
        )?;
        self.check_schema_version()?;
        Ok(())
    }

    fn check_schema_version(&mut self) -> Result<()> {
        let user_version: i64 = self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?;

        if user_version == 0 {
            let set_stmt = format!("PRAGMA user_version = {SCHEMA_VERSION};");
            self.conn.execute_batch(&set_stmt)?;
        } else if user_version != SCHEMA_VERSION as i64 {
            return Err(CardError::Cache(format!(
                "Schema version mismatch: expected {}, found {}",
                SCHEMA_VERSION, user_version
            )));
        }

        Ok(())
    }

    /// Load cached days for `login` within the inclusive date range,
    /// oldest first.
    pub fn get_days(&self, login: &str, since: NaiveDate, until: NaiveDate) -> Result<Vec<DailyRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, count FROM contribution_days
             WHERE login = ? AND date >= ? AND date <= ?
             ORDER BY date",
        )?;

        let rows = stmt.query_map(params![login, since, until], |row| {
            let date: NaiveDate = row.get(0)?;
            let count: u32 = row.get(1)?;
            Ok(DailyRecord { date, count })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    pub fn store_days(&mut self, login: &str, records: &[DailyRecord]) -> Result<()> {
        let tx = self.conn.transaction()?;

        let mut insert_stmt = tx.prepare(
            "INSERT OR REPLACE INTO contribution_days (login, date, count)
             VALUES (?, ?, ?)",
        )?;

        for record in records {
            insert_stmt.execute(params![login, record.date, record.count])?;
        }

        drop(insert_stmt);
        tx.commit()?;
        Ok(())
    }
}
