//! Time utilities: parsing HH:MM, duration computations, formatting minutes.

use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    let duration = end - start;
    duration.num_minutes()
}

pub fn format_minutes(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}

/// Worked time between two stored `HH:MM` strings, `--:--` when either is
/// unreadable.
pub fn worked(clock_in: &str, clock_out: &str) -> String {
    match (parse_time(clock_in), parse_time(clock_out)) {
        (Some(a), Some(b)) => format_minutes(minutes_between(a, b)),
        _ => "--:--".to_string(),
    }
}
