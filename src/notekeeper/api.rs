//! # API Facade
//!
//! [`Notekeeper`] owns the whole client-side state: the note cache, the form,
//! the current page, and the notice sink. A front end sends it intents and
//! reads back what to show. It never prints and never exits; notices land in
//! the sink for the front end to render.
//!
//! ## Intents
//!
//! | intent            | effect                                             |
//! |-------------------|----------------------------------------------------|
//! | `refresh`         | reload the cache from the store                    |
//! | `open_create`     | open the form with an empty draft                  |
//! | `edit(id)`        | open the form seeded from a cached note            |
//! | `toggle_pin(id)`  | flip the pin flag                                  |
//! | `delete(id)`      | remove the note                                    |
//! | `change_page(n)`  | select the page returned by `visible`              |
//! | `submit_draft`    | validate and save the draft (create or update)     |
//! | `close_form`      | drop the draft                                     |
//!
//! ## Generic Over RemoteStore
//!
//! `Notekeeper<S, N>` is generic over the store and the sink:
//! - Production: `Notekeeper<FileStore, NoticeLog>`
//! - Testing: `Notekeeper<InMemoryStore, NoticeLog>`

use crate::cache::NoteCache;
use crate::error::{NotekeeperError, Result};
use crate::form::{FormMode, NoteForm};
use crate::model::{Note, NotePatch};
use crate::notify::NotificationSink;
use crate::order::{paginate, Page};
use crate::repository::NoteRepository;
use crate::store::RemoteStore;

pub struct Notekeeper<S: RemoteStore, N: NotificationSink> {
    repo: NoteRepository<S>,
    cache: NoteCache,
    form: NoteForm,
    sink: N,
    current_page: usize,
    page_size: usize,
}

impl<S: RemoteStore, N: NotificationSink> Notekeeper<S, N> {
    pub fn new(store: S, sink: N, page_size: usize) -> Self {
        Self {
            repo: NoteRepository::new(store),
            cache: NoteCache::new(),
            form: NoteForm::new(),
            sink,
            current_page: 1,
            page_size,
        }
    }

    pub fn refresh(&mut self) -> Option<usize> {
        self.repo.list(&mut self.cache, &mut self.sink)
    }

    pub fn open_create(&mut self) {
        self.form.open_create();
    }

    /// Opens the form on a cached note. Returns false, with an error notice,
    /// if the id is unknown.
    pub fn edit(&mut self, id: &str) -> bool {
        match self.cache.get(id) {
            Some(note) => {
                self.form.open_edit(note);
                true
            }
            None => {
                self.sink
                    .error(&NotekeeperError::NotFound(id.to_string()).to_string());
                false
            }
        }
    }

    pub fn toggle_pin(&mut self, id: &str) -> Option<Note> {
        self.repo.toggle_pin(&mut self.cache, &mut self.sink, id)
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.repo.delete(&mut self.cache, &mut self.sink, id)
    }

    pub fn change_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Validates the draft and hands it to the repository. The form closes
    /// after a valid submission whether or not the store call succeeds.
    pub fn submit_draft(&mut self) -> Option<Note> {
        let submission = self.form.submit(&mut self.sink)?;
        match submission.mode {
            FormMode::Create => self
                .repo
                .create(&mut self.cache, &mut self.sink, &submission.draft),
            FormMode::Edit(id) => {
                let patch = NotePatch::from(submission.draft);
                self.repo
                    .update(&mut self.cache, &mut self.sink, &id, &patch)
            }
        }
    }

    pub fn close_form(&mut self) {
        self.form.close();
    }

    /// The current page of notes in display order.
    pub fn visible(&self) -> Page {
        paginate(self.cache.as_slice(), self.current_page, self.page_size)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn form(&self) -> &NoteForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut NoteForm {
        &mut self.form
    }

    pub fn notes(&self) -> &[Note] {
        self.cache.as_slice()
    }

    pub fn find(&self, id: &str) -> Option<&Note> {
        self.cache.get(id)
    }

    /// Resolves a full id or a unique id prefix to a cached note id.
    pub fn resolve(&self, prefix: &str) -> Result<String> {
        if self.cache.get(prefix).is_some() {
            return Ok(prefix.to_string());
        }
        let mut matches = self.cache.ids_with_prefix(prefix);
        match (matches.next(), matches.next()) {
            (Some(id), None) if !prefix.is_empty() => Ok(id.to_string()),
            (Some(_), Some(_)) => Err(NotekeeperError::NotFound(format!(
                "{} (ambiguous prefix)",
                prefix
            ))),
            _ => Err(NotekeeperError::NotFound(prefix.to_string())),
        }
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut N {
        &mut self.sink
    }

    pub fn store(&self) -> &S {
        self.repo.store()
    }

    pub fn store_mut(&mut self) -> &mut S {
        self.repo.store_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormState;
    use crate::notify::{Notice, NoticeLog};
    use crate::store::memory::{InMemoryStore, StoreOp};

    fn app() -> Notekeeper<InMemoryStore, NoticeLog> {
        Notekeeper::new(InMemoryStore::new(), NoticeLog::new(), 6)
    }

    fn add(app: &mut Notekeeper<InMemoryStore, NoticeLog>, title: &str) -> Note {
        app.open_create();
        app.form_mut().set_title(title);
        app.submit_draft().unwrap()
    }

    #[test]
    fn submit_in_create_mode_adds_a_note() {
        let mut app = app();
        let note = add(&mut app, "Hello");
        assert_eq!(app.notes().len(), 1);
        assert_eq!(app.visible().notes[0].id, note.id);
        assert!(!app.form().is_open());
    }

    #[test]
    fn submit_in_edit_mode_updates_the_note() {
        let mut app = app();
        let note = add(&mut app, "Draft");

        assert!(app.edit(&note.id));
        assert_eq!(app.form().draft().title, "Draft");
        app.form_mut().set_body("more");
        let updated = app.submit_draft().unwrap();

        assert_eq!(updated.id, note.id);
        assert_eq!(updated.body, "more");
        assert_eq!(app.notes().len(), 1);
        assert_eq!(app.store().len(), 1);
    }

    #[test]
    fn blank_title_never_reaches_the_store() {
        let mut app = app();
        app.open_create();
        app.form_mut().set_title("  ");
        assert!(app.submit_draft().is_none());

        assert!(app.store().calls().is_empty());
        assert_eq!(app.sink().notices(), &[Notice::error("Title is required")]);
        assert_eq!(app.form().state(), &FormState::Open(FormMode::Create));
    }

    #[test]
    fn form_closes_even_when_the_store_fails() {
        let mut app = app();
        app.store_mut().fail_next(StoreOp::Insert);
        app.open_create();
        app.form_mut().set_title("A");

        assert!(app.submit_draft().is_none());
        assert!(!app.form().is_open());
        assert!(app.notes().is_empty());
    }

    #[test]
    fn edit_unknown_id_reports_not_found() {
        let mut app = app();
        assert!(!app.edit("nope"));
        assert!(!app.form().is_open());
        assert_eq!(app.sink().notices(), &[Notice::error("Note not found: nope")]);
    }

    #[test]
    fn change_page_selects_window() {
        let mut app = app();
        for i in 0..8 {
            add(&mut app, &format!("N{}", i));
        }
        assert_eq!(app.visible().notes.len(), 6);
        app.change_page(2);
        assert_eq!(app.current_page(), 2);
        assert_eq!(app.visible().notes.len(), 2);
        app.change_page(5);
        assert!(app.visible().is_empty());
        assert_eq!(app.visible().total_pages, 2);
    }

    #[test]
    fn resolve_accepts_unique_prefix() {
        let mut app = app();
        let note = add(&mut app, "A");
        assert_eq!(app.resolve(&note.id).unwrap(), note.id);
        assert_eq!(app.resolve(&note.id[..6]).unwrap(), note.id);
        assert!(app.resolve("").is_err());
        assert!(app.resolve("zzzz-not-an-id").is_err());
    }

    #[test]
    fn refresh_loads_existing_documents() {
        let mut store = InMemoryStore::new();
        let mut seeder: Notekeeper<InMemoryStore, NoticeLog> =
            Notekeeper::new(InMemoryStore::new(), NoticeLog::new(), 6);
        let note = add(&mut seeder, "Seeded");
        store.seed(note.id.clone(), note.to_record());

        let mut app = Notekeeper::new(store, NoticeLog::new(), 6);
        assert_eq!(app.refresh(), Some(1));
        assert_eq!(app.find(&note.id), Some(&note));
    }
}
