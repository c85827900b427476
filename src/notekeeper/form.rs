//! # Note Form
//!
//! Holds the single draft being written. The form is either closed, open to
//! create a new note, or open to edit an existing one:
//!
//! ```text
//! Closed -> Open(Create)   -> Closed
//! Closed -> Open(Edit(id)) -> Closed
//! ```
//!
//! Closing always discards the draft. Validation happens here: a submission
//! with a blank title never leaves the form.

use crate::error::{NotekeeperError, Result};
use crate::model::{Note, NoteDraft};
use crate::notify::NotificationSink;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Closed,
    Open(FormMode),
}

/// A validated submission, ready for the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub mode: FormMode,
    pub draft: NoteDraft,
}

#[derive(Debug)]
pub struct NoteForm {
    state: FormState,
    draft: NoteDraft,
}

impl Default for NoteForm {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteForm {
    pub fn new() -> Self {
        Self {
            state: FormState::Closed,
            draft: NoteDraft::default(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn mode(&self) -> Option<&FormMode> {
        match &self.state {
            FormState::Open(mode) => Some(mode),
            FormState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, FormState::Open(_))
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    /// Seeds the draft from `note`, or clears it when there is none.
    pub fn load_draft(&mut self, note: Option<&Note>) {
        self.draft = match note {
            Some(note) => NoteDraft::new(&note.title, &note.tagline, &note.body),
            None => NoteDraft::default(),
        };
    }

    pub fn open_create(&mut self) {
        self.load_draft(None);
        self.state = FormState::Open(FormMode::Create);
    }

    pub fn open_edit(&mut self, note: &Note) {
        self.load_draft(Some(note));
        self.state = FormState::Open(FormMode::Edit(note.id.clone()));
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_tagline(&mut self, tagline: impl Into<String>) {
        self.draft.tagline = tagline.into();
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.draft.body = body.into();
    }

    /// Validates the draft. On success the form closes and the raw field
    /// values are returned; on failure one error notice is sent and the form
    /// stays open with the draft intact.
    pub fn submit(&mut self, sink: &mut impl NotificationSink) -> Option<Submission> {
        let FormState::Open(mode) = &self.state else {
            return None;
        };

        if let Err(NotekeeperError::ValidationFailed(message)) = validate(&self.draft) {
            tracing::debug!(%message, "draft rejected");
            sink.error(&message);
            return None;
        }

        let submission = Submission {
            mode: mode.clone(),
            draft: std::mem::take(&mut self.draft),
        };
        self.state = FormState::Closed;
        Some(submission)
    }

    /// Discards the draft without asking.
    pub fn close(&mut self) {
        self.draft = NoteDraft::default();
        self.state = FormState::Closed;
    }
}

fn validate(draft: &NoteDraft) -> Result<()> {
    if draft.title.trim().is_empty() {
        return Err(NotekeeperError::ValidationFailed(
            "Title is required".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{Notice, NoticeLog};
    use chrono::Utc;

    fn note() -> Note {
        let now = Utc::now();
        Note {
            id: "n1".into(),
            title: "Groceries".into(),
            tagline: "weekly".into(),
            body: "milk".into(),
            pinned: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn starts_closed_with_empty_draft() {
        let form = NoteForm::new();
        assert_eq!(form.state(), &FormState::Closed);
        assert_eq!(form.draft(), &NoteDraft::default());
        assert!(form.mode().is_none());
    }

    #[test]
    fn open_edit_seeds_draft_from_note() {
        let mut form = NoteForm::new();
        form.open_edit(&note());
        assert_eq!(form.mode(), Some(&FormMode::Edit("n1".into())));
        assert_eq!(form.draft(), &NoteDraft::new("Groceries", "weekly", "milk"));
    }

    #[test]
    fn switching_from_edit_to_create_resets_draft() {
        let mut form = NoteForm::new();
        form.open_edit(&note());
        form.open_create();
        assert_eq!(form.mode(), Some(&FormMode::Create));
        assert_eq!(form.draft(), &NoteDraft::default());
    }

    #[test]
    fn blank_title_is_rejected_once() {
        let mut form = NoteForm::new();
        let mut log = NoticeLog::new();
        form.open_create();
        form.set_title("   \t ");
        form.set_body("body");

        assert!(form.submit(&mut log).is_none());
        assert_eq!(log.notices(), &[Notice::error("Title is required")]);
        assert!(form.is_open());
        assert_eq!(form.draft().body, "body");
    }

    #[test]
    fn submit_returns_raw_fields_and_closes() {
        let mut form = NoteForm::new();
        let mut log = NoticeLog::new();
        form.open_create();
        form.set_title("  Padded  ");
        form.set_tagline("t");

        let submission = form.submit(&mut log).unwrap();
        assert_eq!(submission.mode, FormMode::Create);
        assert_eq!(submission.draft, NoteDraft::new("  Padded  ", "t", ""));
        assert_eq!(form.state(), &FormState::Closed);
        assert_eq!(form.draft(), &NoteDraft::default());
        assert!(log.notices().is_empty());
    }

    #[test]
    fn submit_while_closed_does_nothing() {
        let mut form = NoteForm::new();
        let mut log = NoticeLog::new();
        form.set_title("ignored");
        assert!(form.submit(&mut log).is_none());
        assert!(log.notices().is_empty());
    }

    #[test]
    fn close_discards_draft() {
        let mut form = NoteForm::new();
        form.open_edit(&note());
        form.set_title("changed");
        form.close();
        assert_eq!(form.state(), &FormState::Closed);
        assert_eq!(form.draft(), &NoteDraft::default());
    }
}
