use anyhow::{bail, Context, Result};
use log::{debug, info};
use rusqlite::Connection;

const SCHEMA: &str = include_str!("schema.sql");

/// Bumped whenever `schema.sql` changes shape.
pub const SCHEMA_VERSION: i64 = 1;

/// Creates the ledger tables on a fresh file and refuses files written by a
/// newer layout.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    let version = schema_version(conn)?;

    if version > SCHEMA_VERSION {
        bail!(
            "Ledger database uses schema version {}, newer than supported {}",
            version,
            SCHEMA_VERSION
        );
    }
    if version == SCHEMA_VERSION {
        debug!("Database schema at version {}", version);
        return Ok(());
    }

    conn.execute_batch(SCHEMA)
        .context("Failed to create ledger tables")?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)
        .context("Failed to record schema version")?;

    info!("Database schema created at version {}", SCHEMA_VERSION);
    Ok(())
}

fn schema_version(conn: &Connection) -> Result<i64> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .context("Failed to read schema version")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_applies_once() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();

        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 3);
    }

    #[test]
    fn test_rejects_newer_schema() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", SCHEMA_VERSION + 1).unwrap();

        assert!(ensure_schema(&conn).is_err());
    }
}
