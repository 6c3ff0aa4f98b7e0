use super::list::{attach, build_dashboard};
use crate::auth::AuthProvider;
use crate::auth::local::LocalAuth;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::sqlite::SqliteStore;
use crate::ui::render::render_dashboard;
use std::thread;
use std::time::Duration;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Live dashboard. Every change anywhere in the store re-delivers the whole
/// dataset and the screen is redrawn from scratch.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Watch { filters, ticks } = cmd {
        let (dashboard, list) = build_dashboard(filters, cfg)?;

        let auth = LocalAuth::open(&cfg.database)?;
        let mut store = SqliteStore::open(&cfg.database)?;
        let (list, _subscription) = attach(&mut store, list)?;
        let interval = Duration::from_secs(cfg.watch_interval_secs);

        let mut cycle: u64 = 0;
        let mut redraw = true;
        loop {
            if redraw {
                let session = auth.current()?;
                let list = list.borrow();
                print!("{}", CLEAR_SCREEN);
                print!("{}", render_dashboard(&dashboard.render(&session, &list)));
                println!(
                    "\n(watching for changes every {}s, Ctrl+C to stop)",
                    interval.as_secs()
                );
            }

            cycle += 1;
            if ticks.is_some_and(|max| cycle >= max) {
                break;
            }

            thread::sleep(interval);
            redraw = store.poll()?;
        }
    }

    Ok(())
}
