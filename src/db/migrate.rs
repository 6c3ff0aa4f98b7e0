use crate::ui::messages::progress;
use rusqlite::{Connection, OptionalExtension, Result};

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

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Local identity provider: one row per registered employee.
fn create_users_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            uid           TEXT PRIMARY KEY,
            email         TEXT NOT NULL UNIQUE COLLATE NOCASE,
            display_name  TEXT,
            salt          TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            created_at    TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Current session of this workstation (at most one row).
fn create_session_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS session (
            id           INTEGER PRIMARY KEY CHECK(id = 1),
            uid          TEXT NOT NULL REFERENCES users(uid),
            signed_in_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Daily activity documents, keyed by (user, day).
fn create_activities_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS activities (
            user_id     TEXT NOT NULL,
            date        TEXT NOT NULL,
            email       TEXT NOT NULL,
            clock_in    TEXT NOT NULL,
            clock_out   TEXT NOT NULL,
            status      TEXT NOT NULL CHECK(status IN ('WFH','WFO','CUTI','On-Site')),
            note        TEXT,
            created_at  TEXT NOT NULL,
            PRIMARY KEY (user_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_activities_date ON activities(date);
        "#,
    )?;
    Ok(())
}

/// Run `sql` once, recording `version` in the log table.
fn apply_once(conn: &Connection, version: &str, message: &str, sql: &str) -> Result<()> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    conn.execute_batch(sql)?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;

    progress(format!("Migration applied: {} → {}", version, message));
    Ok(())
}

/// Public entry point: create missing tables and run pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "users")? {
        create_users_table(conn)?;
        progress("Created users table.");
    }

    create_session_table(conn)?;

    if !table_exists(conn, "activities")? {
        create_activities_table(conn)?;
        progress("Created activities table.");
    }

    apply_once(
        conn,
        "20250724_0001_activities_email_index",
        "Added email index to activities",
        "CREATE INDEX IF NOT EXISTS idx_activities_email ON activities(email COLLATE NOCASE);",
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(applied, 1);
        assert!(table_exists(&conn, "activities").unwrap());
        assert!(table_exists(&conn, "users").unwrap());
        assert!(table_exists(&conn, "session").unwrap());
    }
}
