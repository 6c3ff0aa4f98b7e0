use super::list::attach;
use crate::auth::AuthProvider;
use crate::auth::local::LocalAuth;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregator::ActivityList;
use crate::errors::{AppError, AppResult};
use crate::store::sqlite::SqliteStore;
use crate::ui::render::render_note;
use crate::utils::date;

/// Detail view of one record's note, looked up in the loaded list.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Note { email, date: d } = cmd {
        let day = date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?;

        let auth = LocalAuth::open(&cfg.database)?;
        if auth.current()?.user().is_none() {
            println!("User not logged in.");
            return Ok(());
        }

        let mut store = SqliteStore::open(&cfg.database)?;
        let (list, _subscription) = attach(&mut store, ActivityList::new(cfg.page_size()?))?;
        let list = list.borrow();

        let record = list
            .record_for(email.trim(), day)
            .ok_or_else(|| AppError::RecordNotFound {
                email: email.clone(),
                date: d.clone(),
            })?;

        print!("{}", render_note(record));
    }
    Ok(())
}
