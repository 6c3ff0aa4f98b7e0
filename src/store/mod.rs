//! Record store: document upserts keyed by (user, day) plus snapshot
//! subscriptions that re-deliver the whole dataset on every change.

pub mod memory;
pub mod sqlite;

use crate::errors::AppResult;
use crate::models::activity::{ActivityDoc, ActivityRecord, RecordKey};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Callback receiving the full record set of every user.
pub type SnapshotListener = Box<dyn FnMut(&[ActivityRecord])>;

pub trait RecordStore {
    /// Whole-document upsert at `activities/{uid}/hari/{date}`.
    /// Failures are reported as `AppError::RemoteWrite`.
    fn upsert(&mut self, key: &RecordKey, doc: &ActivityDoc) -> AppResult<()>;

    /// Every record across all users, in storage order.
    fn load_all(&self) -> AppResult<Vec<ActivityRecord>>;

    fn listeners(&self) -> &Listeners;

    /// Register `listener`; it receives the current snapshot immediately and
    /// again after every change until the returned guard is dropped.
    fn subscribe(&mut self, mut listener: SnapshotListener) -> AppResult<Subscription> {
        let snapshot = self.load_all()?;
        listener(&snapshot);
        Ok(self.listeners().add(listener))
    }

    /// Push the current dataset to every subscriber.
    fn notify(&self) -> AppResult<()> {
        if self.listeners().is_empty() {
            return Ok(());
        }
        let snapshot = self.load_all()?;
        self.listeners().deliver(&snapshot);
        Ok(())
    }
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, SnapshotListener)>,
    delivering: bool,
    dropped: Vec<u64>,
}

/// Shared listener list of a store.
#[derive(Clone, Default)]
pub struct Listeners(Rc<RefCell<Registry>>);

impl Listeners {
    pub fn add(&self, listener: SnapshotListener) -> Subscription {
        let mut reg = self.0.borrow_mut();
        reg.next_id += 1;
        let id = reg.next_id;
        reg.listeners.push((id, listener));

        Subscription {
            id,
            registry: Rc::downgrade(&self.0),
        }
    }

    pub fn deliver(&self, snapshot: &[ActivityRecord]) {
        // Listeners run without the registry borrowed so they may subscribe
        // or drop subscriptions themselves.
        let mut taken = {
            let mut reg = self.0.borrow_mut();
            reg.delivering = true;
            std::mem::take(&mut reg.listeners)
        };

        for (_, listener) in taken.iter_mut() {
            listener(snapshot);
        }

        let mut reg = self.0.borrow_mut();
        let dropped = std::mem::take(&mut reg.dropped);
        taken.retain(|(id, _)| !dropped.contains(id));
        taken.append(&mut reg.listeners);
        reg.listeners = taken;
        reg.delivering = false;
    }

    pub fn len(&self) -> usize {
        self.0.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Live subscription guard. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(reg) = self.registry.upgrade() {
            let mut reg = reg.borrow_mut();
            reg.listeners.retain(|(id, _)| *id != self.id);
            if reg.delivering {
                reg.dropped.push(self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::status::Status;
    use chrono::NaiveDate;

    fn record() -> ActivityRecord {
        ActivityRecord {
            email: "a@x.io".into(),
            clock_in: "08:00".into(),
            clock_out: "17:00".into(),
            status: Status::Wfh,
            note: "-".into(),
            date: NaiveDate::from_ymd_opt(2025, 7, 24).unwrap(),
        }
    }

    #[test]
    fn dropping_guard_unsubscribes() {
        let listeners = Listeners::default();
        let hits = Rc::new(RefCell::new(0));

        let h = hits.clone();
        let sub = listeners.add(Box::new(move |_| *h.borrow_mut() += 1));
        listeners.deliver(&[record()]);
        assert_eq!(*hits.borrow(), 1);

        drop(sub);
        assert!(listeners.is_empty());
        listeners.deliver(&[record()]);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn listener_may_drop_its_subscription_while_delivering() {
        let listeners = Listeners::default();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let s = slot.clone();
        let sub = listeners.add(Box::new(move |_| {
            s.borrow_mut().take();
        }));
        *slot.borrow_mut() = Some(sub);

        listeners.deliver(&[record()]);
        assert!(listeners.is_empty());
    }
}
