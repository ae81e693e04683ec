//! Most-recent-first log of generated codes.
//!
//! The log owns its backing [`HistoryStore`] and [`Clock`], so tests can
//! swap both and the page keeps one log per [`crate::studio::Studio`].

use crate::content::{ContentKind, ContentRequest};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const MAX_ENTRIES: usize = 50;

/// Characters of encoded content shown in the history list.
const PREVIEW_CHARS: usize = 50;

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub kind: ContentKind,
    pub content: String,
    /// Form fields as submitted, so the entry can be regenerated.
    pub request: ContentRequest,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
}

impl HistoryEntry {
    pub fn preview(&self) -> String {
        crate::truncate(&self.content, PREVIEW_CHARS)
    }
}

/// A backing store could not persist the log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("history store failed: {0}")]
pub struct StoreError(pub String);

/// Where the log keeps its entries between page interactions.
pub trait HistoryStore {
    fn load(&self) -> Vec<HistoryEntry>;
    fn save(&mut self, entries: &[HistoryEntry]) -> Result<(), StoreError>;
}

/// Process-lifetime store; entries are gone after a reload.
#[derive(Default, Debug)]
pub struct MemoryStore {
    entries: Vec<HistoryEntry>,
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }

    fn save(&mut self, entries: &[HistoryEntry]) -> Result<(), StoreError> {
        self.entries = entries.to_vec();
        Ok(())
    }
}

pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

#[derive(Default, Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now_millis(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_millis(&self) -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};

        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default()
    }
}

pub struct HistoryLog<S, C> {
    entries: Vec<HistoryEntry>,
    store: S,
    clock: C,
}

impl<S: HistoryStore, C: Clock> HistoryLog<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        let mut entries = store.load();
        entries.truncate(MAX_ENTRIES);
        Self {
            entries,
            store,
            clock,
        }
    }

    /// Records a generated payload and returns the stored entry.
    ///
    /// The in-memory log is updated even when the store fails to save.
    pub fn add(
        &mut self,
        request: ContentRequest,
        content: String,
    ) -> Result<&HistoryEntry, StoreError> {
        let entry = HistoryEntry {
            id: Uuid::new_v4().to_string(),
            kind: request.kind(),
            content,
            request,
            created_at: self.clock.now_millis(),
        };
        log::debug!("history: add {} entry {}", entry.kind, entry.id);

        self.entries.insert(0, entry);
        if self.entries.len() > MAX_ENTRIES {
            let evicted = self.entries.len() - MAX_ENTRIES;
            self.entries.truncate(MAX_ENTRIES);
            log::debug!("history: evicted {} oldest entries", evicted);
        }
        self.store.save(&self.entries)?;

        Ok(&self.entries[0])
    }

    /// Newest first.
    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn remove(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() != before {
            log::debug!("history: removed {}", id);
            self.store.save(&self.entries)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.store.save(&self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{PhoneFields, TextFields};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Ticks one millisecond per reading.
    #[derive(Default)]
    struct StepClock(Cell<u64>);

    impl Clock for StepClock {
        fn now_millis(&self) -> u64 {
            let now = self.0.get();
            self.0.set(now + 1);
            now
        }
    }

    /// Shares its saved entries with the test through an `Rc`.
    #[derive(Default, Clone)]
    struct SharedStore(Rc<std::cell::RefCell<Vec<HistoryEntry>>>);

    impl HistoryStore for SharedStore {
        fn load(&self) -> Vec<HistoryEntry> {
            self.0.borrow().clone()
        }

        fn save(&mut self, entries: &[HistoryEntry]) -> Result<(), StoreError> {
            *self.0.borrow_mut() = entries.to_vec();
            Ok(())
        }
    }

    /// Rejects every write, like a full or unavailable backing store.
    #[derive(Default)]
    struct FailingStore;

    impl HistoryStore for FailingStore {
        fn load(&self) -> Vec<HistoryEntry> {
            Vec::new()
        }

        fn save(&mut self, _entries: &[HistoryEntry]) -> Result<(), StoreError> {
            Err(StoreError("quota exceeded".to_owned()))
        }
    }

    fn text(n: usize) -> ContentRequest {
        ContentRequest::Text(TextFields {
            text: format!("entry {}", n),
        })
    }

    fn new_log() -> HistoryLog<MemoryStore, StepClock> {
        HistoryLog::new(MemoryStore::default(), StepClock::default())
    }

    #[test]
    fn add_prepends_with_id_and_timestamp() {
        let mut log = new_log();
        log.add(text(1), "entry 1".to_owned()).unwrap();
        let second = log.add(text(2), "entry 2".to_owned()).unwrap().clone();

        assert_eq!(log.len(), 2);
        assert_eq!(log.all()[0], second);
        assert_eq!(second.kind, ContentKind::Text);
        assert_eq!(second.created_at, 1);
        assert_eq!(log.all()[1].created_at, 0);
        assert_ne!(log.all()[0].id, log.all()[1].id);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut log = new_log();
        for n in 1..=51 {
            log.add(text(n), format!("entry {}", n)).unwrap();
        }

        assert_eq!(log.len(), MAX_ENTRIES);
        assert_eq!(log.all()[0].content, "entry 51");
        assert_eq!(log.all()[MAX_ENTRIES - 1].content, "entry 2");
        assert!(log.all().iter().all(|entry| entry.content != "entry 1"));
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut log = new_log();
        log.add(text(1), "entry 1".to_owned()).unwrap();
        log.add(text(2), "entry 2".to_owned()).unwrap();
        let before = log.all().to_vec();

        log.remove("does-not-exist").unwrap();

        assert_eq!(log.all(), before.as_slice());
    }

    #[test]
    fn remove_and_get_by_id() {
        let mut log = new_log();
        let id = log.add(text(1), "entry 1".to_owned()).unwrap().id.clone();
        log.add(text(2), "entry 2".to_owned()).unwrap();

        assert_eq!(log.get(&id).map(|entry| entry.content.as_str()), Some("entry 1"));
        log.remove(&id).unwrap();
        assert_eq!(log.get(&id), None);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn clear_empties_log_and_store() {
        let store = SharedStore::default();
        let mut log = HistoryLog::new(store.clone(), StepClock::default());
        log.add(text(1), "entry 1".to_owned()).unwrap();
        assert_eq!(store.0.borrow().len(), 1);

        log.clear().unwrap();

        assert!(log.is_empty());
        assert!(store.0.borrow().is_empty());
    }

    #[test]
    fn log_resumes_from_store() {
        let store = SharedStore::default();
        {
            let mut log = HistoryLog::new(store.clone(), StepClock::default());
            log.add(
                ContentRequest::Phone(PhoneFields {
                    phone: "123".to_owned(),
                }),
                "tel:123".to_owned(),
            )
            .unwrap();
        }

        let log = HistoryLog::new(store, StepClock::default());
        assert_eq!(log.len(), 1);
        assert_eq!(log.all()[0].kind, ContentKind::Phone);
    }

    #[test]
    fn preview_is_truncated() {
        let mut log = new_log();
        let long = "x".repeat(80);
        let entry = log.add(text(1), long).unwrap();
        assert_eq!(entry.preview(), format!("{}...", "x".repeat(50)));
    }

    #[test]
    fn store_failures_are_reported() {
        let mut log = HistoryLog::new(FailingStore, StepClock::default());

        let err = log.add(text(1), "entry 1".to_owned()).unwrap_err();

        assert_eq!(err.to_string(), "history store failed: quota exceeded");
        assert_eq!(log.len(), 1);
    }
}
