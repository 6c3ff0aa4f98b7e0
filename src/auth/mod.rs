//! Identity provider seam. The dashboard and the submission form only see
//! `SessionState`; where it comes from is up to the provider.

pub mod local;
pub mod password;

use crate::errors::AppResult;
use crate::models::session::{Session, SessionState};

pub trait AuthProvider {
    /// Bad credentials yield `AppError::AuthFailed`.
    fn sign_in(&mut self, email: &str, password: &str) -> AppResult<Session>;

    fn sign_out(&mut self) -> AppResult<()>;

    fn current(&self) -> AppResult<SessionState>;
}
