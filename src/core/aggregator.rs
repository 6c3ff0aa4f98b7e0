//! Cross-user activity list: sorting, filtering, pagination and the
//! per-status tally for a selected date.

use crate::errors::{AppError, AppResult};
use crate::models::activity::ActivityRecord;
use crate::models::status::Status;
use chrono::NaiveDate;
use serde::Serialize;

/// Maximum number of page buttons shown at once.
pub const PAGE_WINDOW: usize = 5;

/// Selectable rows-per-page values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PageSize {
    #[default]
    Five,
    Ten,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [
        PageSize::Five,
        PageSize::Ten,
        PageSize::Fifty,
        PageSize::Hundred,
    ];

    pub fn rows(&self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = AppError;

    fn try_from(n: usize) -> AppResult<Self> {
        PageSize::ALL
            .into_iter()
            .find(|p| p.rows() == n)
            .ok_or(AppError::InvalidPageSize(n))
    }
}

/// Independent filter axes; a record must pass every active one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub date: Option<NaiveDate>,
    pub email: String,
    pub search: String,
}

impl Filters {
    pub fn matches(&self, record: &ActivityRecord) -> bool {
        self.matches_date(record) && self.matches_email(record) && self.matches_search(record)
    }

    fn matches_date(&self, record: &ActivityRecord) -> bool {
        self.date.is_none_or(|d| record.date == d)
    }

    fn matches_email(&self, record: &ActivityRecord) -> bool {
        self.email.is_empty() || contains_ci(&record.email, &self.email)
    }

    fn matches_search(&self, record: &ActivityRecord) -> bool {
        self.search.is_empty()
            || contains_ci(&record.email, &self.search)
            || contains_ci(&record.note, &self.search)
            || contains_ci(record.status.label(), &self.search)
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Per-status counts for one date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub wfh: usize,
    pub wfo: usize,
    pub cuti: usize,
    pub on_site: usize,
    /// Counted but never shown as a tile.
    pub no_input: usize,
}

impl Statistics {
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a ActivityRecord>) -> Self {
        let mut stats = Self::default();
        for r in records {
            match r.status {
                Status::Wfh => stats.wfh += 1,
                Status::Wfo => stats.wfo += 1,
                Status::Cuti => stats.cuti += 1,
                Status::OnSite => stats.on_site += 1,
                Status::NoInput => stats.no_input += 1,
            }
        }
        stats
    }

    /// The summary tiles, in display order.
    pub fn tiles(&self) -> [(Status, usize); 4] {
        [
            (Status::Wfh, self.wfh),
            (Status::Wfo, self.wfo),
            (Status::Cuti, self.cuti),
            (Status::OnSite, self.on_site),
        ]
    }

    pub fn total(&self) -> usize {
        self.wfh + self.wfo + self.cuti + self.on_site + self.no_input
    }
}

/// One page of the filtered list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub rows: Vec<&'a ActivityRecord>,
    pub current: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    pub size: PageSize,
    /// Page numbers to offer as buttons.
    pub window: Vec<usize>,
}

pub fn total_pages(rows: usize, size: PageSize) -> usize {
    rows.div_ceil(size.rows())
}

/// Page buttons around `current`: at most five, centred on the current page
/// except near either end, where the first or last five are shown.
pub fn page_window(current: usize, total: usize) -> Vec<usize> {
    let (cur, total) = (current as i64, total as i64);
    let span = PAGE_WINDOW as i64;

    let mut start = (cur - 2).max(1);
    let mut end = (cur + 2).min(total);

    if cur <= 3 {
        end = span.min(total);
    }
    if cur >= total - 2 {
        start = (total - span + 1).max(1);
    }

    (start..=end).map(|p| p as usize).collect()
}

/// Rows of page `current` (1-based). A page past the end is empty.
pub fn paginate<'a>(rows: &[&'a ActivityRecord], current: usize, size: PageSize) -> Page<'a> {
    let per_page = size.rows();
    let first = current.saturating_sub(1).saturating_mul(per_page).min(rows.len());
    let last = first.saturating_add(per_page).min(rows.len());
    let total = total_pages(rows.len(), size);

    Page {
        rows: rows[first..last].to_vec(),
        current,
        total_pages: total,
        total_rows: rows.len(),
        size,
        window: page_window(current, total),
    }
}

/// What the list shows right now.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView<'a> {
    /// No snapshot delivered yet.
    Loading,
    Ready {
        selected_date: Option<NaiveDate>,
        /// `None` until a date is selected.
        statistics: Option<Statistics>,
        /// `None` when no row matches the filters.
        page: Option<Page<'a>>,
    },
}

/// Latest snapshot of every record plus the rows-per-page choice.
#[derive(Debug, Clone, Default)]
pub struct ActivityList {
    records: Option<Vec<ActivityRecord>>,
    page_size: PageSize,
}

impl ActivityList {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            records: None,
            page_size,
        }
    }

    /// Replace the dataset with a freshly delivered snapshot.
    pub fn receive_snapshot(&mut self, snapshot: &[ActivityRecord]) {
        let mut records = snapshot.to_vec();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        self.records = Some(records);
    }

    pub fn is_loading(&self) -> bool {
        self.records.is_none()
    }

    pub fn records(&self) -> &[ActivityRecord] {
        self.records.as_deref().unwrap_or_default()
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Changing the page size always brings the caller back to page 1.
    pub fn set_page_size(&mut self, size: PageSize, current_page: &mut usize) {
        self.page_size = size;
        *current_page = 1;
    }

    pub fn filtered(&self, filters: &Filters) -> Vec<&ActivityRecord> {
        self.records().iter().filter(|r| filters.matches(r)).collect()
    }

    /// Counts for `date`, regardless of the email/search filters.
    pub fn statistics(&self, date: NaiveDate) -> Statistics {
        Statistics::tally(self.records().iter().filter(|r| r.date == date))
    }

    /// Record behind a row, for the note detail view.
    pub fn record_for(&self, email: &str, date: NaiveDate) -> Option<&ActivityRecord> {
        self.records()
            .iter()
            .find(|r| r.date == date && r.email.eq_ignore_ascii_case(email))
    }

    pub fn view(&self, filters: &Filters, current_page: usize) -> ListView<'_> {
        if self.is_loading() {
            return ListView::Loading;
        }

        let rows = self.filtered(filters);
        let page = (!rows.is_empty()).then(|| paginate(&rows, current_page, self.page_size));

        ListView::Ready {
            selected_date: filters.date,
            statistics: filters.date.map(|d| self.statistics(d)),
            page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
    }

    fn rec(email: &str, date: NaiveDate, status: Status, note: &str) -> ActivityRecord {
        ActivityRecord {
            email: email.into(),
            clock_in: "08:00".into(),
            clock_out: "17:00".into(),
            status,
            note: note.into(),
            date,
        }
    }

    fn twelve() -> ActivityList {
        let mut list = ActivityList::new(PageSize::Five);
        let snapshot: Vec<_> = (1..=12)
            .map(|d| rec(&format!("e{d}@corp.id"), day(d), Status::Wfo, "-"))
            .collect();
        list.receive_snapshot(&snapshot);
        list
    }

    #[test]
    fn sorts_newest_first() {
        let list = twelve();
        let dates: Vec<_> = list.records().iter().map(|r| r.date).collect();
        assert_eq!(dates.first(), Some(&day(12)));
        assert_eq!(dates.last(), Some(&day(1)));
    }

    #[test]
    fn statistics_for_selected_date() {
        let mut list = ActivityList::default();
        list.receive_snapshot(&[
            rec("a@x.io", day(24), Status::Wfh, "-"),
            rec("b@x.io", day(24), Status::Wfo, "-"),
            rec("c@x.io", day(24), Status::Wfh, "-"),
            rec("d@x.io", day(23), Status::Cuti, "-"),
        ]);

        let stats = list.statistics(day(24));
        assert_eq!(
            stats.tiles(),
            [
                (Status::Wfh, 2),
                (Status::Wfo, 1),
                (Status::Cuti, 0),
                (Status::OnSite, 0)
            ]
        );
        assert_eq!(stats.total(), 3);
    }

    #[test]
    fn no_input_bucket_completes_the_total() {
        let mut list = ActivityList::default();
        list.receive_snapshot(&[
            rec("a@x.io", day(24), Status::NoInput, "-"),
            rec("b@x.io", day(24), Status::OnSite, "-"),
        ]);

        let stats = list.statistics(day(24));
        assert_eq!(stats.no_input, 1);
        let same_day = Filters {
            date: Some(day(24)),
            ..Filters::default()
        };
        assert_eq!(stats.total(), list.filtered(&same_day).len());
    }

    #[test]
    fn statistics_serialize_in_camel_case() {
        let stats = Statistics {
            on_site: 2,
            no_input: 1,
            ..Statistics::default()
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["onSite"], 2);
        assert_eq!(json["noInput"], 1);
        assert!(json.get("on_site").is_none());
    }

    #[test]
    fn twelve_rows_in_pages_of_five() {
        let list = twelve();
        let rows = list.filtered(&Filters::default());

        let first = paginate(&rows, 1, PageSize::Five);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.rows.len(), 5);
        assert_eq!(first.rows[0].date, day(12));

        let third = paginate(&rows, 3, PageSize::Five);
        assert_eq!(third.rows.len(), 2);
        assert_eq!(third.rows[1].date, day(1));

        assert!(paginate(&rows, 4, PageSize::Five).rows.is_empty());
    }

    #[test]
    fn rows_never_exceed_page_size() {
        let list = twelve();
        let rows = list.filtered(&Filters::default());
        for size in PageSize::ALL {
            for page in 1..=4 {
                assert!(paginate(&rows, page, size).rows.len() <= size.rows());
            }
        }
    }

    #[test]
    fn changing_page_size_resets_page() {
        let mut list = twelve();
        let mut page = 3;
        list.set_page_size(PageSize::Ten, &mut page);
        assert_eq!(page, 1);
        assert_eq!(list.page_size(), PageSize::Ten);
    }

    #[test]
    fn page_size_accepts_only_known_values() {
        assert_eq!(PageSize::try_from(50).unwrap(), PageSize::Fifty);
        assert!(matches!(
            PageSize::try_from(20),
            Err(AppError::InvalidPageSize(20))
        ));
    }

    #[test]
    fn window_slides_and_anchors() {
        assert_eq!(page_window(1, 3), vec![1, 2, 3]);
        assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(3, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(6, 10), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_window(9, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn search_hits_status_email_or_note_on_any_date() {
        let mut list = ActivityList::default();
        list.receive_snapshot(&[
            rec("a@x.io", day(1), Status::Cuti, "-"),
            rec("cuti.lestari@x.io", day(2), Status::Wfo, "-"),
            rec("b@x.io", day(3), Status::Wfh, "ambil CUTI besok"),
            rec("c@x.io", day(4), Status::Wfh, "deploy"),
        ]);

        let hits = list.filtered(&Filters {
            search: "cuti".into(),
            ..Filters::default()
        });
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|r| r.email != "c@x.io"));
    }

    #[test]
    fn filters_combine_with_and() {
        let mut list = ActivityList::default();
        list.receive_snapshot(&[
            rec("ana@x.io", day(24), Status::Wfh, "infra"),
            rec("ana@x.io", day(23), Status::Wfh, "infra"),
            rec("budi@x.io", day(24), Status::Wfh, "infra"),
            rec("ana@x.io", day(24), Status::Wfo, "docs"),
        ]);

        let all = Filters {
            date: Some(day(24)),
            email: "ANA".into(),
            search: "infra".into(),
        };
        let hits = list.filtered(&all);
        assert_eq!(hits.len(), 1);

        // the same set whichever axis is applied first
        let by_date = list.filtered(&Filters {
            date: Some(day(24)),
            ..Filters::default()
        });
        let narrowed: Vec<_> = by_date
            .into_iter()
            .filter(|r| all.matches(r))
            .collect();
        assert_eq!(narrowed, hits);
    }

    #[test]
    fn view_states() {
        let mut list = ActivityList::default();
        assert_eq!(list.view(&Filters::default(), 1), ListView::Loading);

        list.receive_snapshot(&[]);
        match list.view(&Filters::default(), 1) {
            ListView::Ready {
                statistics, page, ..
            } => {
                assert!(statistics.is_none());
                assert!(page.is_none());
            }
            ListView::Loading => panic!("snapshot was delivered"),
        }
    }

    #[test]
    fn note_lookup_ignores_email_case() {
        let mut list = ActivityList::default();
        list.receive_snapshot(&[rec("Ana@x.io", day(24), Status::Wfh, "pairing")]);
        assert_eq!(
            list.record_for("ana@X.io", day(24)).map(|r| r.note.as_str()),
            Some("pairing")
        );
        assert!(list.record_for("ana@x.io", day(23)).is_none());
    }
}
