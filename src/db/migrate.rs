use crate::errors::AppResult;
use rusqlite::{Connection, Result};

/// Current schema version, stored in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i32 = 2;

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// One row per calendar date; `payload` holds the JSON array of events.
fn create_day_events_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS day_events (
            date        TEXT PRIMARY KEY NOT NULL,
            payload     TEXT NOT NULL DEFAULT '[]',
            updated_at  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn user_version(conn: &Connection) -> Result<i32> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
}

fn set_user_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
}

/// Public entry point: run all pending migrations.
///
/// Invoked every time a `DbPool` is opened, so a brand new database file
/// is usable without an explicit `init`.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    let version = user_version(conn)?;

    if version < 1 {
        ensure_log_table(conn)?;
    }

    if version < 2 {
        create_day_events_table(conn)?;
    }

    if version < SCHEMA_VERSION {
        set_user_version(conn, SCHEMA_VERSION)?;
        if version > 0 {
            crate::db::log::ttlog(
                conn,
                "migration_applied",
                &format!("v{version} → v{SCHEMA_VERSION}"),
                "Database schema upgraded",
            )?;
        }
    }

    Ok(())
}
