use crate::auth::AuthProvider;
use crate::auth::local::LocalAuth;
use crate::cli::parser::{Commands, FilterArgs};
use crate::config::Config;
use crate::core::aggregator::{ActivityList, ListView, PageSize, Statistics};
use crate::core::dashboard::{Dashboard, DashboardView};
use crate::errors::{AppError, AppResult};
use crate::models::activity::ActivityRecord;
use crate::store::sqlite::SqliteStore;
use crate::store::{RecordStore, Subscription};
use crate::ui::render::render_dashboard;
use crate::utils::date;
use chrono::NaiveDate;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { filters, json } = cmd {
        let (dashboard, list) = build_dashboard(filters, cfg)?;

        let auth = LocalAuth::open(&cfg.database)?;
        let mut store = SqliteStore::open(&cfg.database)?;
        let (list, _subscription) = attach(&mut store, list)?;

        let session = auth.current()?;
        let list = list.borrow();
        let view = dashboard.render(&session, &list);

        if *json {
            print_json(&view)?;
        } else {
            print!("{}", render_dashboard(&view));
        }
    }
    Ok(())
}

/// Apply command-line filters the way the dashboard controls would: filters
/// first, then rows-per-page (back to page 1), then the requested page.
pub fn build_dashboard(args: &FilterArgs, cfg: &Config) -> AppResult<(Dashboard, ActivityList)> {
    let mut list = ActivityList::new(cfg.page_size()?);
    let mut dashboard = Dashboard::new();

    if let Some(d) = &args.date {
        let parsed = date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?;
        dashboard.set_date(Some(parsed));
    }
    if let Some(email) = &args.email {
        dashboard.set_email_filter(email.trim());
    }
    if let Some(term) = &args.search {
        dashboard.set_search(term.trim());
    }
    if let Some(rows) = args.rows {
        dashboard.change_page_size(&mut list, PageSize::try_from(rows)?);
    }
    if let Some(page) = args.page {
        dashboard.go_to_page(page)?;
    }

    Ok((dashboard, list))
}

/// Subscribe `list` to the store; every delivered snapshot replaces its data.
pub fn attach(
    store: &mut dyn RecordStore,
    list: ActivityList,
) -> AppResult<(Rc<RefCell<ActivityList>>, Subscription)> {
    let list = Rc::new(RefCell::new(list));
    let sink = Rc::clone(&list);
    let subscription =
        store.subscribe(Box::new(move |snapshot| sink.borrow_mut().receive_snapshot(snapshot)))?;
    Ok((list, subscription))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonListing<'a> {
    date: Option<NaiveDate>,
    statistics: Option<Statistics>,
    page: usize,
    total_pages: usize,
    total_rows: usize,
    page_size: usize,
    rows: Vec<&'a ActivityRecord>,
}

fn print_json(view: &DashboardView) -> AppResult<()> {
    let list = match view {
        DashboardView::LoadingIdentity => return Err(AppError::SessionLoading),
        DashboardView::NotAuthenticated => return Err(AppError::NotLoggedIn),
        DashboardView::Ready { list, .. } => list,
    };
    let ListView::Ready {
        selected_date,
        statistics,
        page,
    } = list
    else {
        return Ok(());
    };

    let listing = JsonListing {
        date: *selected_date,
        statistics: *statistics,
        page: page.as_ref().map_or(1, |p| p.current),
        total_pages: page.as_ref().map_or(0, |p| p.total_pages),
        total_rows: page.as_ref().map_or(0, |p| p.total_rows),
        page_size: page.as_ref().map_or(0, |p| p.size.rows()),
        rows: page.as_ref().map(|p| p.rows.clone()).unwrap_or_default(),
    };

    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}
