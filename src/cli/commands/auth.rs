//! `register`, `login`, `logout` and `whoami`.

use crate::auth::AuthProvider;
use crate::auth::local::LocalAuth;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::View;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::session::SessionState;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let mut auth = LocalAuth::open(&cfg.database)?;

    match cmd {
        Commands::Register {
            email,
            password,
            name,
        } => {
            let user = auth.register(email, password, name.as_deref())?;
            ttlog_quiet(auth.conn(), "register", &user.email, "User registered");
            success(format!("Account created for {}", user.email));
            info("Sign in with: rattendance login --email <EMAIL> --password <PASSWORD>");
        }

        Commands::Login { email, password } => match auth.sign_in(email, password) {
            Ok(session) => {
                ttlog_quiet(auth.conn(), "login", &session.email, "Signed in");
                success(format!("Signed in as {}", session.email));
                info(format!(
                    "Open the dashboard: rattendance {}",
                    View::Listing.command()
                ));
            }
            Err(AppError::AuthFailed) => {
                ttlog_quiet(auth.conn(), "login_failed", email, "Wrong email or password");
                return Err(AppError::AuthFailed);
            }
            Err(e) => return Err(e),
        },

        Commands::Logout => {
            if let SessionState::SignedIn(session) = auth.current()? {
                auth.sign_out()?;
                ttlog_quiet(auth.conn(), "logout", &session.email, "Signed out");
                success(format!("Signed out {}", session.email));
            } else {
                info("Nobody is signed in.");
            }
        }

        Commands::Whoami => match auth.current()? {
            SessionState::SignedIn(session) => {
                println!("👤 {} <{}>", session.greeting_name(), session.email);
                println!("   uid: {}", session.uid);
            }
            _ => println!("User not logged in."),
        },

        _ => {}
    }

    Ok(())
}
