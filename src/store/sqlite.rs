//! Record store on the application's SQLite database.

use super::{Listeners, RecordStore};
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::queries::{data_version, load_all_activities, upsert_activity};
use crate::errors::{AppError, AppResult};
use crate::models::activity::{ActivityDoc, ActivityRecord, RecordKey};
use rusqlite::Connection;

pub struct SqliteStore {
    pool: DbPool,
    listeners: Listeners,
    seen_version: i64,
}

impl SqliteStore {
    pub fn open(path: &str) -> AppResult<Self> {
        Self::from_pool(DbPool::new(path)?)
    }

    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        let seen_version = data_version(&pool.conn)?;
        Ok(Self {
            pool,
            listeners: Listeners::default(),
            seen_version,
        })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    /// Detect commits made by other processes; on change, re-deliver the
    /// whole dataset to subscribers. Returns whether a change was seen.
    pub fn poll(&mut self) -> AppResult<bool> {
        let version = data_version(&self.pool.conn)?;
        if version == self.seen_version {
            return Ok(false);
        }
        self.seen_version = version;
        self.notify()?;
        Ok(true)
    }
}

impl RecordStore for SqliteStore {
    fn upsert(&mut self, key: &RecordKey, doc: &ActivityDoc) -> AppResult<()> {
        self.pool
            .with_conn(|conn| {
                let tx = conn.transaction()?;
                upsert_activity(&tx, key, doc)?;
                tx.commit()
            })
            .map_err(|e| AppError::RemoteWrite(e.to_string()))?;

        self.notify()
    }

    fn load_all(&self) -> AppResult<Vec<ActivityRecord>> {
        Ok(load_all_activities(&self.pool.conn)?)
    }

    fn listeners(&self) -> &Listeners {
        &self.listeners
    }
}
