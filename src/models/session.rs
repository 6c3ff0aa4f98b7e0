use crate::errors::{AppError, AppResult};
use serde::Serialize;

/// Signed-in identity, passed explicitly to every view that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl Session {
    /// Name used to greet the user: display name, then the local part of
    /// the email with dots turned into spaces, then "User".
    pub fn greeting_name(&self) -> String {
        if let Some(name) = self.display_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }

        match self.email.split('@').next() {
            Some(local) if !local.is_empty() => local.split('.').collect::<Vec<_>>().join(" "),
            _ => "User".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Loading,
    SignedOut,
    SignedIn(Session),
}

impl SessionState {
    pub fn user(&self) -> Option<&Session> {
        match self {
            SessionState::SignedIn(s) => Some(s),
            _ => None,
        }
    }

    /// The signed-in user, or the error for the state the session is in.
    pub fn require(&self) -> AppResult<&Session> {
        match self {
            SessionState::Loading => Err(AppError::SessionLoading),
            SessionState::SignedOut => Err(AppError::NotLoggedIn),
            SessionState::SignedIn(user) => Ok(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(email: &str, name: Option<&str>) -> Session {
        Session {
            uid: "u1".into(),
            email: email.into(),
            display_name: name.map(str::to_string),
        }
    }

    #[test]
    fn greeting_prefers_display_name() {
        assert_eq!(session("a.b@x.io", Some("Ana")).greeting_name(), "Ana");
    }

    #[test]
    fn greeting_falls_back_to_email_local_part() {
        assert_eq!(
            session("budi.santoso@corp.id", None).greeting_name(),
            "budi santoso"
        );
        assert_eq!(session("", None).greeting_name(), "User");
    }

    #[test]
    fn require_maps_each_state() {
        assert!(matches!(
            SessionState::Loading.require(),
            Err(AppError::SessionLoading)
        ));
        assert!(matches!(
            SessionState::SignedOut.require(),
            Err(AppError::NotLoggedIn)
        ));

        let signed_in = SessionState::SignedIn(session("a@x.io", None));
        assert_eq!(signed_in.require().unwrap().email, "a@x.io");
    }
}
