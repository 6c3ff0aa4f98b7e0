//! Identity provider on the local SQLite database.

use super::AuthProvider;
use super::password::{hash_password, verify_password};
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::users::{
    UserRow, clear_session, current_session, find_user_by_email, insert_user, set_session,
};
use crate::errors::{AppError, AppResult};
use crate::models::session::{Session, SessionState};
use rusqlite::Connection;
use uuid::Uuid;

const MIN_PASSWORD_LEN: usize = 6;

pub struct LocalAuth {
    pool: DbPool,
}

impl LocalAuth {
    pub fn open(path: &str) -> AppResult<Self> {
        Self::from_pool(DbPool::new(path)?)
    }

    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    /// Create a new identity. Does not sign it in.
    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> AppResult<Session> {
        let email = email.trim();
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(AppError::InvalidEmail(email.to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::WeakPassword(MIN_PASSWORD_LEN));
        }
        if find_user_by_email(&self.pool.conn, email)?.is_some() {
            return Err(AppError::UserExists(email.to_string()));
        }

        let (salt, password_hash) = hash_password(password);
        let user = UserRow {
            uid: Uuid::new_v4().simple().to_string(),
            email: email.to_string(),
            display_name: display_name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            salt,
            password_hash,
        };
        insert_user(&self.pool.conn, &user)?;

        Ok(user.to_session())
    }
}

impl AuthProvider for LocalAuth {
    fn sign_in(&mut self, email: &str, password: &str) -> AppResult<Session> {
        let user = find_user_by_email(&self.pool.conn, email.trim())?.ok_or(AppError::AuthFailed)?;

        if !verify_password(password, &user.salt, &user.password_hash) {
            return Err(AppError::AuthFailed);
        }

        set_session(&self.pool.conn, &user.uid)?;
        Ok(user.to_session())
    }

    fn sign_out(&mut self) -> AppResult<()> {
        clear_session(&self.pool.conn)?;
        Ok(())
    }

    fn current(&self) -> AppResult<SessionState> {
        Ok(match current_session(&self.pool.conn)? {
            Some(session) => SessionState::SignedIn(session),
            None => SessionState::SignedOut,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> LocalAuth {
        LocalAuth::from_pool(DbPool::in_memory().unwrap()).unwrap()
    }

    #[test]
    fn sign_in_sets_current_session() {
        let mut auth = auth();
        let registered = auth.register("rina@corp.id", "secret1", Some("Rina")).unwrap();
        assert_eq!(auth.current().unwrap(), SessionState::SignedOut);

        let session = auth.sign_in("RINA@corp.id", "secret1").unwrap();
        assert_eq!(session.uid, registered.uid);
        assert_eq!(auth.current().unwrap(), SessionState::SignedIn(session));

        auth.sign_out().unwrap();
        assert_eq!(auth.current().unwrap(), SessionState::SignedOut);
    }

    #[test]
    fn bad_credentials_fail_the_same_way() {
        let mut auth = auth();
        auth.register("rina@corp.id", "secret1", None).unwrap();

        assert!(matches!(
            auth.sign_in("rina@corp.id", "wrong!!"),
            Err(AppError::AuthFailed)
        ));
        assert!(matches!(
            auth.sign_in("nobody@corp.id", "secret1"),
            Err(AppError::AuthFailed)
        ));
        assert_eq!(auth.current().unwrap(), SessionState::SignedOut);
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let mut auth = auth();
        auth.register("rina@corp.id", "secret1", None).unwrap();
        assert!(matches!(
            auth.register("Rina@Corp.id", "secret2", None),
            Err(AppError::UserExists(_))
        ));
    }

    #[test]
    fn register_validates_email_and_password() {
        let mut auth = auth();
        assert!(matches!(
            auth.register("rina.corp.id", "secret1", None),
            Err(AppError::InvalidEmail(_))
        ));
        assert!(matches!(
            auth.register("rina@corp.id", "12345", None),
            Err(AppError::WeakPassword(6))
        ));
    }
}
