//! In-process record store. Keeps documents in insertion order and counts
//! writes; `fail_writes` simulates an unreachable backend.

use super::{Listeners, RecordStore};
use crate::errors::{AppError, AppResult};
use crate::models::activity::{ActivityDoc, ActivityRecord, RecordKey};

#[derive(Default)]
pub struct MemoryStore {
    docs: Vec<(RecordKey, ActivityDoc)>,
    listeners: Listeners,
    pub writes: usize,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &RecordKey) -> Option<&ActivityDoc> {
        self.docs.iter().find(|(k, _)| k == key).map(|(_, d)| d)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn upsert(&mut self, key: &RecordKey, doc: &ActivityDoc) -> AppResult<()> {
        if self.fail_writes {
            return Err(AppError::RemoteWrite(format!(
                "{}: backend unavailable",
                key.path()
            )));
        }

        self.writes += 1;
        match self.docs.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = doc.clone(),
            None => self.docs.push((key.clone(), doc.clone())),
        }

        self.notify()
    }

    fn load_all(&self) -> AppResult<Vec<ActivityRecord>> {
        Ok(self
            .docs
            .iter()
            .map(|(k, d)| d.clone().into_record(k))
            .collect())
    }

    fn listeners(&self) -> &Listeners {
        &self.listeners
    }
}
