use crate::errors::AppError;
use crate::models::activity::{ActivityDoc, ActivityRecord, EMPTY_NOTE, RecordKey};
use crate::models::status::Status;
use chrono::NaiveDate;
use rusqlite::{Connection, Result, Row, params};

const SELECT_ACTIVITY: &str =
    "SELECT user_id, date, email, clock_in, clock_out, status, note FROM activities";

/// Whole-document upsert: every field of an existing (user, date) row is
/// replaced.
pub fn upsert_activity(conn: &Connection, key: &RecordKey, doc: &ActivityDoc) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO activities
            (user_id, date, email, clock_in, clock_out, status, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            key.user_id,
            key.date_str(),
            doc.email,
            doc.clock_in,
            doc.clock_out,
            doc.status.to_db_str(),
            doc.note,
            doc.created_at,
        ],
    )?;
    Ok(())
}

/// Every record of every user ("collection group" read), in storage order.
pub fn load_all_activities(conn: &Connection) -> Result<Vec<ActivityRecord>> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_ACTIVITY} ORDER BY rowid ASC"))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// SQLite's change counter for commits made by *other* connections.
pub fn data_version(conn: &Connection) -> Result<i64> {
    conn.query_row("PRAGMA data_version;", [], |row| row.get(0))
}

pub fn map_row(row: &Row) -> Result<ActivityRecord> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let status: Option<String> = row.get("status")?;
    let note: Option<String> = row.get("note")?;

    Ok(ActivityRecord {
        email: row.get("email")?,
        clock_in: row.get("clock_in")?,
        clock_out: row.get("clock_out")?,
        status: Status::from_db_str(status.as_deref()),
        note: note.unwrap_or_else(|| EMPTY_NOTE.to_string()),
        date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    fn doc(email: &str, status: Status, note: Option<&str>) -> ActivityDoc {
        ActivityDoc::new(email, "08:00", "17:00", status, note.map(str::to_string))
    }

    #[test]
    fn upsert_overwrites_same_day() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();

        let key = RecordKey::new("u1", NaiveDate::from_ymd_opt(2025, 7, 24).unwrap());
        upsert_activity(&conn, &key, &doc("a@x.io", Status::Wfh, Some("first"))).unwrap();
        upsert_activity(&conn, &key, &doc("a@x.io", Status::Wfo, None)).unwrap();

        let all = load_all_activities(&conn).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, Status::Wfo);
        assert_eq!(all[0].note, EMPTY_NOTE);
    }
}
