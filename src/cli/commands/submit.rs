use crate::auth::AuthProvider;
use crate::auth::local::LocalAuth;
use crate::cli::parser::{Commands, FilterArgs};
use crate::config::Config;
use crate::core::View;
use crate::core::form::ActivityForm;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::activity::RecordKey;
use crate::models::status::Status;
use crate::store::sqlite::SqliteStore;
use crate::ui::messages::{error, success};
use crate::utils::date;

/// Save today's activity, then show the dashboard.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Submit {
        clock_in,
        clock_out,
        status,
        note,
    } = cmd
    {
        let auth = LocalAuth::open(&cfg.database)?;
        let session = auth.current()?;
        // no input is looked at until someone is signed in
        session.require()?;
        let mut store = SqliteStore::open(&cfg.database)?;

        let mut form = ActivityForm::new(cfg.default_status()?);
        form.clock_in = clock_in.clone();
        form.clock_out = clock_out.clone();
        if let Some(s) = status {
            form.status =
                Status::from_input(s).ok_or_else(|| AppError::InvalidStatus(s.clone()))?;
        }
        form.note = note.clone().unwrap_or_default();

        let today = date::today();
        match form.submit(&session, &mut store, today) {
            Ok(outcome) => {
                ttlog_quiet(
                    store.conn(),
                    "submit",
                    &outcome.key.path(),
                    "Activity saved",
                );
                success(outcome.notice);
                println!();

                if outcome.redirect == View::Listing {
                    let listing = Commands::List {
                        filters: FilterArgs::default(),
                        json: false,
                    };
                    super::list::handle(&listing, cfg)?;
                }
            }
            Err(e @ AppError::RemoteWrite(_)) => {
                let target = session
                    .user()
                    .map(|u| RecordKey::new(u.uid.clone(), today).path())
                    .unwrap_or_default();
                ttlog_quiet(store.conn(), "submit_failed", &target, &e.to_string());
                error("Your entries were kept; run the same command again to retry.");
                return Err(e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
