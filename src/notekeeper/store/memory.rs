use super::{new_key, RemoteStore};
use crate::error::{NotekeeperError, Result};
use crate::model::{NoteRecord, NoteRecordPatch};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    List,
    Insert,
    Patch,
    Remove,
}

/// A store that keeps documents in memory. Used by tests and as a scratch
/// backend.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: BTreeMap<String, NoteRecord>,
    fail_next: RefCell<Vec<StoreOp>>,
    offline: bool,
    calls: RefCell<Vec<StoreOp>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next call of `op` fail with `StoreUnavailable`.
    pub fn fail_next(&mut self, op: StoreOp) {
        self.fail_next.get_mut().push(op);
    }

    /// While offline every operation fails.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Stores a document under a chosen key, bypassing `insert`.
    pub fn seed(&mut self, key: impl Into<String>, record: NoteRecord) {
        self.records.insert(key.into(), record);
    }

    pub fn get(&self, key: &str) -> Option<&NoteRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every operation attempted so far, failed ones included.
    pub fn calls(&self) -> Vec<StoreOp> {
        self.calls.borrow().clone()
    }

    fn check(&self, op: StoreOp) -> Result<()> {
        self.calls.borrow_mut().push(op);
        if self.offline {
            return Err(NotekeeperError::StoreUnavailable("store is offline".into()));
        }
        let mut fail_next = self.fail_next.borrow_mut();
        if let Some(pos) = fail_next.iter().position(|o| *o == op) {
            fail_next.remove(pos);
            return Err(NotekeeperError::StoreUnavailable(format!(
                "injected {:?} failure",
                op
            )));
        }
        Ok(())
    }
}

impl RemoteStore for InMemoryStore {
    fn list_all(&self) -> Result<Vec<(String, NoteRecord)>> {
        self.check(StoreOp::List)?;
        Ok(self
            .records
            .iter()
            .map(|(k, r)| (k.clone(), r.clone()))
            .collect())
    }

    fn insert(&mut self, record: &NoteRecord) -> Result<String> {
        self.check(StoreOp::Insert)?;
        let key = new_key();
        self.records.insert(key.clone(), record.clone());
        Ok(key)
    }

    fn patch(&mut self, key: &str, patch: &NoteRecordPatch) -> Result<()> {
        self.check(StoreOp::Patch)?;
        let record = self
            .records
            .get_mut(key)
            .ok_or_else(|| NotekeeperError::NotFound(key.to_string()))?;
        record.apply(patch);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.check(StoreOp::Remove)?;
        self.records.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NoteDraft;
    use chrono::Utc;

    fn record(title: &str) -> NoteRecord {
        NoteRecord::new(&NoteDraft::new(title, "", ""), Utc::now())
    }

    #[test]
    fn insert_assigns_distinct_keys() {
        let mut store = InMemoryStore::new();
        let a = store.insert(&record("A")).unwrap();
        let b = store.insert(&record("B")).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.list_all().unwrap().len(), 2);
    }

    #[test]
    fn patch_unknown_key_is_not_found() {
        let mut store = InMemoryStore::new();
        match store.patch("nope", &NoteRecordPatch::pinned(true)) {
            Err(NotekeeperError::NotFound(key)) => assert_eq!(key, "nope"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn patch_merges_fields() {
        let mut store = InMemoryStore::new();
        let key = store.insert(&record("A")).unwrap();
        store.patch(&key, &NoteRecordPatch::pinned(true)).unwrap();
        let stored = store.get(&key).unwrap();
        assert!(stored.pinned);
        assert_eq!(stored.title, "A");
    }

    #[test]
    fn remove_unknown_key_succeeds() {
        let mut store = InMemoryStore::new();
        store.remove("nope").unwrap();
    }

    #[test]
    fn fail_next_is_one_shot() {
        let mut store = InMemoryStore::new();
        store.fail_next(StoreOp::Insert);
        assert!(matches!(
            store.insert(&record("A")),
            Err(NotekeeperError::StoreUnavailable(_))
        ));
        assert!(store.insert(&record("A")).is_ok());
        assert_eq!(store.calls(), vec![StoreOp::Insert, StoreOp::Insert]);
    }

    #[test]
    fn offline_fails_everything() {
        let mut store = InMemoryStore::new();
        store.set_offline(true);
        assert!(store.list_all().is_err());
        assert!(store.insert(&record("A")).is_err());
        assert!(store.remove("k").is_err());
        store.set_offline(false);
        assert!(store.list_all().unwrap().is_empty());
    }
}
