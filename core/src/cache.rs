//! Response cache configuration and SQLite store.
//!
//! # Design
//! `CacheConfig` is a write-once value: build it with the constructor and
//! chained builder methods, hand it to `WarsawClient::enable_cache`, done.
//! There are no setters afterwards. Storage is a single SQLite file named
//! [`CACHE_FILE_NAME`] inside the configured directory; rusqlite owns the
//! file format, the store only issues lookups, inserts and the two one-shot
//! deletes (`force_clear`, `clear_expired`).

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::debug;
use rusqlite::{Connection, OptionalExtension};

use crate::error::{Error, Result};

/// Fixed name of the cache file inside the configured directory.
pub const CACHE_FILE_NAME: &str = "warsaw_cache";

const DEFAULT_EXPIRE_AFTER: Duration = Duration::from_secs(3600);

/// Write-once cache configuration for a client session.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    dir: PathBuf,
    expire_after: Option<Duration>,
    force_clear: bool,
    clear_expired: bool,
}

impl CacheConfig {
    /// Configuration rooted at `dir`, with a one-hour expiry and both
    /// initialization flags off.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            expire_after: Some(DEFAULT_EXPIRE_AFTER),
            force_clear: false,
            clear_expired: false,
        }
    }

    /// Time-to-live for cached responses; `None` caches forever.
    pub fn expire_after(mut self, ttl: Option<Duration>) -> Self {
        self.expire_after = ttl;
        self
    }

    /// Drop every cached response when the cache is enabled.
    pub fn force_clear(mut self, yes: bool) -> Self {
        self.force_clear = yes;
        self
    }

    /// Drop expired responses when the cache is enabled.
    pub fn clear_expired(mut self, yes: bool) -> Self {
        self.clear_expired = yes;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the cache file, validated against the configured directory.
    ///
    /// Fails with [`Error::InvalidDirectory`] before any file is created.
    pub fn cache_path(&self) -> Result<PathBuf> {
        if !self.dir.exists() {
            return Err(Error::InvalidDirectory(self.dir.clone()));
        }
        Ok(self.dir.join(CACHE_FILE_NAME))
    }
}

/// SQLite-backed store for GET response bodies.
pub(crate) struct ResponseCache {
    conn: Connection,
    expire_after: Option<Duration>,
}

impl ResponseCache {
    /// Open (or create) the cache file and apply the one-shot flags.
    pub fn open(config: &CacheConfig) -> Result<Self> {
        let path = config.cache_path()?;
        let conn = Connection::open(&path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS responses (
                key       TEXT PRIMARY KEY,
                stored_at INTEGER NOT NULL,
                body      TEXT NOT NULL
            )",
        )?;
        let store = Self {
            conn,
            expire_after: config.expire_after,
        };
        if config.force_clear {
            store.clear()?;
        }
        if config.clear_expired {
            store.remove_expired()?;
        }
        debug!("response cache open at {}", path.display());
        Ok(store)
    }

    /// Fetch a cached body; expired rows are misses.
    pub fn lookup(&self, key: &str) -> Result<Option<String>> {
        let cutoff = match self.expire_after {
            Some(ttl) => now() - ttl.as_secs() as i64,
            None => i64::MIN,
        };
        let body = self
            .conn
            .query_row(
                "SELECT body FROM responses WHERE key = ?1 AND stored_at >= ?2",
                rusqlite::params![key, cutoff],
                |row| row.get(0),
            )
            .optional()?;
        Ok(body)
    }

    pub fn store(&self, key: &str, body: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO responses (key, stored_at, body) VALUES (?1, ?2, ?3)",
            rusqlite::params![key, now(), body],
        )?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM responses", [])?;
        Ok(())
    }

    pub fn remove_expired(&self) -> Result<()> {
        if let Some(ttl) = self.expire_after {
            let cutoff = now() - ttl.as_secs() as i64;
            self.conn.execute(
                "DELETE FROM responses WHERE stored_at < ?1",
                rusqlite::params![cutoff],
            )?;
        }
        Ok(())
    }
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
