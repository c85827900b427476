//! # Storage Layer
//!
//! The [`RemoteStore`] trait is the seam between notekeeper and whatever keeps
//! the note documents. It models a flat, keyed collection: the store assigns
//! keys on insert, accepts partial writes, and hands back every document on
//! listing. Timestamps crossing this seam are always [`StoreTimestamp`]s;
//! conversion to plain instants happens in the repository.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: a JSON document collection on disk
//!   ```text
//!   <data dir>/
//!   ├── notes.json      # key -> record map for the "notes" collection
//!   └── config.json     # see crate::config
//!   ```
//! - [`memory::InMemoryStore`]: no persistence, with failure injection for
//!   exercising the error paths.
//!
//! [`StoreTimestamp`]: crate::model::StoreTimestamp

use crate::error::Result;
use crate::model::{NoteRecord, NoteRecordPatch};

pub mod fs;
pub mod memory;

/// The operations a note collection supports.
pub trait RemoteStore {
    /// Every document in the collection, with its key.
    fn list_all(&self) -> Result<Vec<(String, NoteRecord)>>;

    /// Adds a document and returns the key the store assigned to it.
    fn insert(&mut self, record: &NoteRecord) -> Result<String>;

    /// Merges the present fields of `patch` into an existing document.
    /// Fails with `NotFound` when the key is unknown.
    fn patch(&mut self, key: &str, patch: &NoteRecordPatch) -> Result<()>;

    /// Removes a document. Removing an unknown key succeeds.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Generates a new document key.
pub(crate) fn new_key() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
