//! Terminal rendering of the dashboard.

use super::messages::header;
use crate::core::View;
use crate::core::aggregator::{ListView, Page, Statistics};
use crate::core::dashboard::DashboardView;
use crate::models::activity::ActivityRecord;
use crate::utils::colors::{GREY, paint};
use crate::utils::formatting::{bold, status_color, truncate};
use crate::utils::table::{Column, Table};
use crate::utils::time::worked;
use chrono::NaiveDate;

const NOTE_WIDTH: usize = 40;
const DETAIL_WIDTH: usize = 72;

pub fn render_dashboard(view: &DashboardView) -> String {
    match view {
        DashboardView::LoadingIdentity => "Loading user...\n".to_string(),
        DashboardView::NotAuthenticated => "User not logged in.\n".to_string(),
        DashboardView::Ready { greeting, list } => {
            let mut out = format!("Hello, {} 👋\n\n", bold(greeting));
            out.push_str(&render_list(list));
            out.push_str(&paint(
                GREY,
                &format!(
                    "\nInput today's activity: rattendance {}\n",
                    View::Submission.command()
                ),
            ));
            out
        }
    }
}

pub fn render_list(view: &ListView) -> String {
    let ListView::Ready {
        selected_date,
        statistics,
        page,
    } = view
    else {
        return "Loading activity records...\n".to_string();
    };

    let mut out = header("Employee activity history");
    out.push_str("\n\n");
    out.push_str(&render_statistics(*selected_date, statistics.as_ref()));
    out.push('\n');

    match page {
        None => out.push_str("No matching records.\n"),
        Some(page) => out.push_str(&render_page(page)),
    }
    out
}

fn render_statistics(date: Option<NaiveDate>, stats: Option<&Statistics>) -> String {
    let (Some(date), Some(stats)) = (date, stats) else {
        return "Select a date to see statistics\n".to_string();
    };

    let tiles = stats
        .tiles()
        .iter()
        .map(|(status, n)| paint(status_color(*status), &format!("{}: {}", status, n)))
        .collect::<Vec<_>>()
        .join("   ");

    format!("Statistics for {}\n{}\n", date, tiles)
}

fn render_page(page: &Page) -> String {
    let mut table = Table::new(vec![
        Column::new("Date", 10),
        Column::new("Email", 5),
        Column::new("In", 5),
        Column::new("Out", 5),
        Column::new("Worked", 6),
        Column::new("Status", 6),
        Column::new("Note", 4),
    ]);

    for r in &page.rows {
        table.add_row(vec![
            r.date_str(),
            r.email.clone(),
            r.clock_in.clone(),
            r.clock_out.clone(),
            worked(&r.clock_in, &r.clock_out),
            r.status.to_string(),
            truncate(&r.note, NOTE_WIDTH),
        ]);
    }

    let mut out = format!(
        "show: {}   page {}/{}   ({} rows)\n\n",
        page.size.rows(),
        page.current,
        page.total_pages,
        page.total_rows
    );
    out.push_str(&table.render());
    out.push('\n');
    out.push_str(&render_page_buttons(&page.window, page.current));
    out.push('\n');
    out
}

/// `1 [2] 3 4 5` with the current page bracketed.
pub fn render_page_buttons(window: &[usize], current: usize) -> String {
    window
        .iter()
        .map(|&p| {
            if p == current {
                format!("[{}]", p)
            } else {
                p.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full note of one record.
pub fn render_note(record: &ActivityRecord) -> String {
    let mut out = header("Activity detail");
    out.push('\n');
    out.push_str(&format!(
        "{} · {} · {} {}-{}\n\n",
        record.date_str(),
        record.email,
        record.status,
        record.clock_in,
        record.clock_out
    ));
    for line in record.note.lines() {
        for wrapped in textwrap::wrap(line, DETAIL_WIDTH) {
            out.push_str(&wrapped);
            out.push('\n');
        }
    }
    out
}
