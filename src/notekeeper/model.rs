use crate::error::{NotekeeperError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// A note as held in memory, with plain instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub tagline: String,
    pub body: String,
    pub pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Builds a note from a stored document, converting both timestamps.
    pub fn from_record(key: &str, record: NoteRecord) -> Result<Self> {
        let created_at = record.created_at.to_datetime(key)?;
        let updated_at = record.updated_at.to_datetime(key)?;
        if created_at > updated_at {
            return Err(NotekeeperError::MalformedDocument {
                key: key.to_string(),
                reason: "createdAt is later than updatedAt".to_string(),
            });
        }

        Ok(Self {
            id: key.to_string(),
            title: record.title,
            tagline: record.tagline,
            body: record.body,
            pinned: record.pinned,
            created_at,
            updated_at,
        })
    }

    pub fn to_record(&self) -> NoteRecord {
        NoteRecord {
            title: self.title.clone(),
            tagline: self.tagline.clone(),
            body: self.body.clone(),
            pinned: self.pinned,
            created_at: StoreTimestamp::from_datetime(self.created_at),
            updated_at: StoreTimestamp::from_datetime(self.updated_at),
        }
    }
}

/// The user-editable fields of a note, as produced by the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub tagline: String,
    pub body: String,
}

impl NoteDraft {
    pub fn new(
        title: impl Into<String>,
        tagline: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            tagline: tagline.into(),
            body: body.into(),
        }
    }
}

/// Field changes for an existing note. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub body: Option<String>,
}

impl NotePatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn tagline(mut self, tagline: impl Into<String>) -> Self {
        self.tagline = Some(tagline.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn apply_to(&self, note: &mut Note) {
        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(tagline) = &self.tagline {
            note.tagline = tagline.clone();
        }
        if let Some(body) = &self.body {
            note.body = body.clone();
        }
    }

    /// The wire patch for this change, stamped with the new update time.
    pub fn to_record_patch(&self, updated_at: DateTime<Utc>) -> NoteRecordPatch {
        NoteRecordPatch {
            title: self.title.clone(),
            tagline: self.tagline.clone(),
            body: self.body.clone(),
            pinned: None,
            updated_at: Some(StoreTimestamp::from_datetime(updated_at)),
        }
    }
}

impl From<NoteDraft> for NotePatch {
    fn from(draft: NoteDraft) -> Self {
        Self {
            title: Some(draft.title),
            tagline: Some(draft.tagline),
            body: Some(draft.body),
        }
    }
}

/// Store-native timestamp: whole seconds since the epoch plus a nanosecond part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreTimestamp {
    pub seconds: i64,
    pub nanoseconds: u32,
}

impl StoreTimestamp {
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self {
            seconds: instant.timestamp(),
            nanoseconds: instant.timestamp_subsec_nanos(),
        }
    }

    /// Converts to an instant. `key` names the owning document in the error.
    pub fn to_datetime(&self, key: &str) -> Result<DateTime<Utc>> {
        if self.nanoseconds >= NANOS_PER_SECOND {
            return Err(NotekeeperError::MalformedDocument {
                key: key.to_string(),
                reason: format!("nanoseconds out of range: {}", self.nanoseconds),
            });
        }
        DateTime::from_timestamp(self.seconds, self.nanoseconds).ok_or_else(|| {
            NotekeeperError::MalformedDocument {
                key: key.to_string(),
                reason: format!("timestamp out of range: {}s", self.seconds),
            }
        })
    }
}

/// A note document as the store keeps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub pinned: bool,
    pub created_at: StoreTimestamp,
    pub updated_at: StoreTimestamp,
}

impl NoteRecord {
    /// A fresh, unpinned record with both timestamps set to `now`.
    pub fn new(draft: &NoteDraft, now: DateTime<Utc>) -> Self {
        let stamp = StoreTimestamp::from_datetime(now);
        Self {
            title: draft.title.clone(),
            tagline: draft.tagline.clone(),
            body: draft.body.clone(),
            pinned: false,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    pub fn apply(&mut self, patch: &NoteRecordPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(tagline) = &patch.tagline {
            self.tagline = tagline.clone();
        }
        if let Some(body) = &patch.body {
            self.body = body.clone();
        }
        if let Some(pinned) = patch.pinned {
            self.pinned = pinned;
        }
        if let Some(updated_at) = patch.updated_at {
            self.updated_at = updated_at;
        }
    }
}

/// A partial document write. Absent fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<StoreTimestamp>,
}

impl NoteRecordPatch {
    pub fn pinned(pinned: bool) -> Self {
        Self {
            pinned: Some(pinned),
            ..Self::default()
        }
    }
}
