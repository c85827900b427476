use crate::model::Note;

/// The in-memory note set, owned by the caller and passed explicitly to the
/// repository and the pagination engine.
///
/// Order is insertion order with new notes at the front; display order is
/// computed separately by [`crate::order`]. Ids are unique.
#[derive(Debug, Clone, Default)]
pub struct NoteCache {
    notes: Vec<Note>,
}

impl NoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_notes(notes: Vec<Note>) -> Self {
        let mut cache = Self::new();
        cache.replace_all(notes);
        cache
    }

    /// Replaces the whole set, keeping the first occurrence of a duplicated id.
    pub fn replace_all(&mut self, notes: Vec<Note>) {
        self.notes.clear();
        for note in notes {
            if self.get(&note.id).is_none() {
                self.notes.push(note);
            }
        }
    }

    /// Puts a note at the front, replacing any entry with the same id.
    pub fn prepend(&mut self, note: Note) {
        self.notes.retain(|n| n.id != note.id);
        self.notes.insert(0, note);
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Overwrites an existing entry in place. Returns false, leaving the cache
    /// untouched, when no entry has that id.
    pub fn replace(&mut self, note: Note) -> bool {
        match self.notes.iter_mut().find(|n| n.id == note.id) {
            Some(slot) => {
                *slot = note;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Note> {
        let pos = self.notes.iter().position(|n| n.id == id)?;
        Some(self.notes.remove(pos))
    }

    /// Ids starting with `prefix`.
    pub fn ids_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> {
        self.notes
            .iter()
            .map(|n| n.id.as_str())
            .filter(move |id| id.starts_with(prefix))
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
