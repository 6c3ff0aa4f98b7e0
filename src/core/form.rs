use super::View;
use crate::errors::{AppError, AppResult};
use crate::models::activity::{ActivityDoc, RecordKey};
use crate::models::session::SessionState;
use crate::models::status::Status;
use crate::store::RecordStore;
use crate::utils::time::parse_time;
use chrono::{NaiveDate, NaiveTime};

/// Shown after a successful save.
pub const SAVED_NOTICE: &str = "Activity saved successfully";

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub key: RecordKey,
    pub notice: &'static str,
    pub redirect: View,
}

/// Today's activity form: one record per user per day.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityForm {
    pub clock_in: String,
    pub clock_out: String,
    pub status: Status,
    pub note: String,
    default_status: Status,
}

impl ActivityForm {
    pub fn new(default_status: Status) -> Self {
        Self {
            clock_in: String::new(),
            clock_out: String::new(),
            status: default_status,
            note: String::new(),
            default_status,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.default_status);
    }

    pub fn is_pristine(&self) -> bool {
        *self == Self::new(self.default_status)
    }

    /// Parsed (clock-in, clock-out); clock-in must be strictly earlier.
    fn validated_times(&self) -> AppResult<(NaiveTime, NaiveTime)> {
        let clock_in = parse_time(&self.clock_in)
            .ok_or_else(|| AppError::InvalidTime(format!("clock-in '{}'", self.clock_in)))?;
        let clock_out = parse_time(&self.clock_out)
            .ok_or_else(|| AppError::InvalidTime(format!("clock-out '{}'", self.clock_out)))?;

        if clock_in >= clock_out {
            return Err(AppError::InvalidTimeRange {
                clock_in: self.clock_in.clone(),
                clock_out: self.clock_out.clone(),
            });
        }

        Ok((clock_in, clock_out))
    }

    /// Validate and upsert today's record for the signed-in user.
    ///
    /// Fields are cleared only after the store accepted the write; on any
    /// error the form is left as it was so the user can resubmit.
    pub fn submit(
        &mut self,
        session: &SessionState,
        store: &mut dyn RecordStore,
        today: NaiveDate,
    ) -> AppResult<SubmitOutcome> {
        let user = session.require()?;

        let (clock_in, clock_out) = self.validated_times()?;
        if !self.status.is_writable() {
            return Err(AppError::InvalidStatus(self.status.to_string()));
        }

        let note = Some(self.note.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        let key = RecordKey::new(user.uid.clone(), today);
        let doc = ActivityDoc::new(
            user.email.clone(),
            clock_in.format("%H:%M").to_string(),
            clock_out.format("%H:%M").to_string(),
            self.status,
            note,
        );

        store.upsert(&key, &doc)?;
        self.reset();

        Ok(SubmitOutcome {
            key,
            notice: SAVED_NOTICE,
            redirect: View::Listing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::Session;
    use crate::store::memory::MemoryStore;

    fn signed_in() -> SessionState {
        SessionState::SignedIn(Session {
            uid: "uid-1".into(),
            email: "dewi@corp.id".into(),
            display_name: None,
        })
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 24).unwrap()
    }

    fn filled(clock_in: &str, clock_out: &str) -> ActivityForm {
        let mut form = ActivityForm::new(Status::Wfh);
        form.clock_in = clock_in.into();
        form.clock_out = clock_out.into();
        form.status = Status::Wfo;
        form.note = "standup, reviews".into();
        form
    }

    #[test]
    fn rejects_clock_out_not_after_clock_in() {
        let mut store = MemoryStore::new();
        for (a, b) in [("17:00", "08:00"), ("09:00", "09:00")] {
            let mut form = filled(a, b);
            let before = form.clone();

            let err = form.submit(&signed_in(), &mut store, today()).unwrap_err();
            assert!(matches!(err, AppError::InvalidTimeRange { .. }));
            assert_eq!(form, before);
        }
        assert_eq!(store.writes, 0);
    }

    #[test]
    fn valid_submission_writes_once_and_resets() {
        let mut store = MemoryStore::new();
        let mut form = filled("08:00", "17:00");

        let outcome = form.submit(&signed_in(), &mut store, today()).unwrap();

        assert_eq!(store.writes, 1);
        assert_eq!(outcome.key, RecordKey::new("uid-1", today()));
        assert_eq!(outcome.redirect, View::Listing);
        assert!(form.is_pristine());

        let doc = store.get(&outcome.key).unwrap();
        assert_eq!(doc.email, "dewi@corp.id");
        assert_eq!(doc.status, Status::Wfo);
        assert_eq!(doc.note.as_deref(), Some("standup, reviews"));
    }

    #[test]
    fn resubmitting_the_same_day_overwrites() {
        let mut store = MemoryStore::new();
        filled("08:00", "17:00")
            .submit(&signed_in(), &mut store, today())
            .unwrap();
        filled("08:30", "16:00")
            .submit(&signed_in(), &mut store, today())
            .unwrap();

        assert_eq!(store.len(), 1);
        let doc = store.get(&RecordKey::new("uid-1", today())).unwrap();
        assert_eq!(doc.clock_in, "08:30");
    }

    #[test]
    fn store_failure_keeps_fields() {
        let mut store = MemoryStore::new();
        store.fail_writes = true;
        let mut form = filled("08:00", "17:00");
        let before = form.clone();

        let err = form.submit(&signed_in(), &mut store, today()).unwrap_err();
        assert!(matches!(err, AppError::RemoteWrite(_)));
        assert_eq!(form, before);
    }

    #[test]
    fn requires_a_session() {
        let mut store = MemoryStore::new();
        let mut form = filled("08:00", "17:00");

        assert!(matches!(
            form.submit(&SessionState::SignedOut, &mut store, today()),
            Err(AppError::NotLoggedIn)
        ));
        assert!(matches!(
            form.submit(&SessionState::Loading, &mut store, today()),
            Err(AppError::SessionLoading)
        ));
        assert_eq!(store.writes, 0);
    }

    #[test]
    fn blank_note_is_stored_as_absent() {
        let mut store = MemoryStore::new();
        let mut form = filled("08:00", "17:00");
        form.note = "   ".into();

        let outcome = form.submit(&signed_in(), &mut store, today()).unwrap();
        let record = store.load_all().unwrap().remove(0);
        assert_eq!(record.note, "-");
        assert_eq!(record.date, outcome.key.date);
    }
}
