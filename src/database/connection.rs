use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

/// Pool over a single ledger file. One connection is enough for a
/// single-user tool and keeps writes serialised.
pub fn open_pool(path: &Path) -> Result<DbPool> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let manager = SqliteConnectionManager::file(path).with_init(|conn| {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
    });

    r2d2::Pool::builder()
        .max_size(1)
        .build(manager)
        .with_context(|| format!("Failed to open ledger database {}", path.display()))
}

pub fn checkout(pool: &DbPool) -> Result<DbConn> {
    pool.get().context("Failed to get database connection from pool")
}
