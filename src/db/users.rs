//! Queries backing the local identity provider.

use crate::models::session::Session;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Stored credentials of a registered user.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub salt: String,
    pub password_hash: String,
}

impl UserRow {
    pub fn to_session(&self) -> Session {
        Session {
            uid: self.uid.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

fn map_user(row: &Row) -> Result<UserRow> {
    Ok(UserRow {
        uid: row.get("uid")?,
        email: row.get("email")?,
        display_name: row.get("display_name")?,
        salt: row.get("salt")?,
        password_hash: row.get("password_hash")?,
    })
}

pub fn insert_user(conn: &Connection, user: &UserRow) -> Result<()> {
    conn.execute(
        "INSERT INTO users (uid, email, display_name, salt, password_hash, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user.uid,
            user.email,
            user.display_name,
            user.salt,
            user.password_hash,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> Result<Option<UserRow>> {
    conn.query_row(
        "SELECT uid, email, display_name, salt, password_hash
         FROM users WHERE email = ?1 COLLATE NOCASE",
        [email],
        map_user,
    )
    .optional()
}

pub fn set_session(conn: &Connection, uid: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO session (id, uid, signed_in_at) VALUES (1, ?1, ?2)",
        params![uid, Local::now().to_rfc3339()],
    )?;
    Ok(())
}

pub fn clear_session(conn: &Connection) -> Result<usize> {
    conn.execute("DELETE FROM session", [])
}

/// The signed-in user, if any.
pub fn current_session(conn: &Connection) -> Result<Option<Session>> {
    conn.query_row(
        "SELECT u.uid, u.email, u.display_name
         FROM session s JOIN users u ON u.uid = s.uid
         WHERE s.id = 1",
        [],
        |row| {
            Ok(Session {
                uid: row.get(0)?,
                email: row.get(1)?,
                display_name: row.get(2)?,
            })
        },
    )
    .optional()
}
