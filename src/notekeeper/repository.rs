//! # Note Repository
//!
//! The only code that talks to the [`RemoteStore`]. Each operation writes to
//! the store first and touches the [`NoteCache`] only after the store call
//! succeeded. A failure leaves the cache as it was, even if that means the
//! cache and the store now disagree; nothing re-fetches automatically.
//!
//! Every operation reports exactly one notice to the sink, success or failure.
//! Failures are also logged with `tracing`. Nothing here returns an error to
//! the caller: the public operations answer with `Option`/`bool` so the
//! application keeps running after any failed store call.
//!
//! Pin toggles leave `updated_at` alone. Only edits refresh it.

use crate::cache::NoteCache;
use crate::error::{NotekeeperError, Result};
use crate::model::{Note, NoteDraft, NotePatch, NoteRecord, NoteRecordPatch};
use crate::notify::NotificationSink;
use crate::store::RemoteStore;
use chrono::Utc;
use tracing::{debug, error, info};

pub struct NoteRepository<S: RemoteStore> {
    store: S,
}

impl<S: RemoteStore> NoteRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Replaces the cache with the store contents. Returns the note count, or
    /// `None` if the fetch failed and the cache was kept.
    pub fn list(&self, cache: &mut NoteCache, sink: &mut impl NotificationSink) -> Option<usize> {
        match self.fetch_all() {
            Ok(notes) => {
                let count = notes.len();
                cache.replace_all(notes);
                info!(count, "notes loaded");
                sink.success(&format!("Loaded {} notes", count));
                Some(count)
            }
            Err(e) => {
                error!(error = %e, "failed to fetch notes");
                sink.error("Failed to fetch notes");
                None
            }
        }
    }

    /// Stores a new unpinned note and puts it at the front of the cache.
    /// The title is expected to be validated already.
    pub fn create(
        &mut self,
        cache: &mut NoteCache,
        sink: &mut impl NotificationSink,
        draft: &NoteDraft,
    ) -> Option<Note> {
        match self.insert(draft) {
            Ok(note) => {
                debug!(id = %note.id, "note created");
                cache.prepend(note.clone());
                sink.success("Note added successfully");
                Some(note)
            }
            Err(e) => {
                error!(error = %e, "failed to add note");
                sink.error("Failed to add note");
                None
            }
        }
    }

    /// Merges `patch` into the note and refreshes its `updated_at`.
    pub fn update(
        &mut self,
        cache: &mut NoteCache,
        sink: &mut impl NotificationSink,
        id: &str,
        patch: &NotePatch,
    ) -> Option<Note> {
        let Some(current) = cache.get(id).cloned() else {
            report_missing(sink, id);
            return None;
        };

        let mut updated = current;
        patch.apply_to(&mut updated);
        updated.updated_at = Utc::now().max(updated.created_at);

        match self.store.patch(id, &patch.to_record_patch(updated.updated_at)) {
            Ok(()) => {
                apply_completion(cache, updated.clone());
                sink.success("Note updated successfully");
                Some(updated)
            }
            Err(e) => {
                error!(id, error = %e, "failed to update note");
                sink.error("Failed to update note");
                None
            }
        }
    }

    /// Flips the pin flag. `updated_at` is left unchanged.
    pub fn toggle_pin(
        &mut self,
        cache: &mut NoteCache,
        sink: &mut impl NotificationSink,
        id: &str,
    ) -> Option<Note> {
        let Some(current) = cache.get(id).cloned() else {
            report_missing(sink, id);
            return None;
        };

        let mut toggled = current;
        toggled.pinned = !toggled.pinned;

        match self.store.patch(id, &NoteRecordPatch::pinned(toggled.pinned)) {
            Ok(()) => {
                apply_completion(cache, toggled.clone());
                sink.success("Note pin toggled");
                Some(toggled)
            }
            Err(e) => {
                error!(id, error = %e, "failed to toggle pin");
                sink.error("Failed to toggle pin");
                None
            }
        }
    }

    /// Removes the note from the store, then from the cache. On failure the
    /// note stays visible.
    pub fn delete(
        &mut self,
        cache: &mut NoteCache,
        sink: &mut impl NotificationSink,
        id: &str,
    ) -> bool {
        if cache.get(id).is_none() {
            report_missing(sink, id);
            return false;
        }

        match self.store.remove(id) {
            Ok(()) => {
                cache.remove(id);
                debug!(id, "note deleted");
                sink.success("Note deleted successfully");
                true
            }
            Err(e) => {
                error!(id, error = %e, "failed to delete note");
                sink.error("Failed to delete note");
                false
            }
        }
    }

    fn fetch_all(&self) -> Result<Vec<Note>> {
        self.store
            .list_all()?
            .into_iter()
            .map(|(key, record)| Note::from_record(&key, record))
            .collect()
    }

    fn insert(&mut self, draft: &NoteDraft) -> Result<Note> {
        let record = NoteRecord::new(draft, Utc::now());
        let key = self.store.insert(&record)?;
        Note::from_record(&key, record)
    }
}

/// Writes a finished operation back into the cache. If the note was removed
/// while the operation was in flight the result is dropped, never re-added.
fn apply_completion(cache: &mut NoteCache, note: Note) {
    let id = note.id.clone();
    if !cache.replace(note) {
        debug!(%id, "completion for a note no longer cached; dropped");
    }
}

fn report_missing(sink: &mut impl NotificationSink, id: &str) {
    let e = NotekeeperError::NotFound(id.to_string());
    error!(error = %e, "operation on unknown note");
    sink.error(&e.to_string());
}
