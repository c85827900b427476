use super::{new_key, RemoteStore};
use crate::error::{NotekeeperError, Result};
use crate::model::{NoteRecord, NoteRecordPatch};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_COLLECTION: &str = "notes";

/// A note collection kept as a single JSON object (`key -> record`) on disk.
///
/// Every write rereads and rewrites the whole collection file without a lock.
/// The rename keeps the file itself intact, but two processes writing at the
/// same time can each start from the same contents, and the later rename
/// discards the other's change.
pub struct FileStore {
    root: PathBuf,
    collection: String,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    pub fn with_collection(mut self, collection: &str) -> Self {
        self.collection = collection.to_string();
        self
    }

    pub fn collection_path(&self) -> PathBuf {
        self.root.join(format!("{}.json", self.collection))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(NotekeeperError::Io)?;
        }
        Ok(())
    }

    fn load_records(&self) -> Result<BTreeMap<String, NoteRecord>> {
        let data_file = self.collection_path();
        if !data_file.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&data_file).map_err(NotekeeperError::Io)?;
        let raw: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(&content).map_err(NotekeeperError::Serialization)?;

        raw.into_iter()
            .map(|(key, value)| match serde_json::from_value(value) {
                Ok(record) => Ok((key, record)),
                Err(e) => Err(NotekeeperError::MalformedDocument {
                    key,
                    reason: e.to_string(),
                }),
            })
            .collect()
    }

    fn save_records(&self, records: &BTreeMap<String, NoteRecord>) -> Result<()> {
        self.ensure_dir(&self.root)?;
        let data_file = self.collection_path();
        let content =
            serde_json::to_string_pretty(records).map_err(NotekeeperError::Serialization)?;

        let tmp_file = self
            .root
            .join(format!(".{}-{}.tmp", self.collection, new_key()));
        fs::write(&tmp_file, content).map_err(NotekeeperError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, &data_file) {
            let _ = fs::remove_file(&tmp_file);
            return Err(NotekeeperError::Io(e));
        }
        debug!(path = %data_file.display(), count = records.len(), "collection written");
        Ok(())
    }
}

impl RemoteStore for FileStore {
    fn list_all(&self) -> Result<Vec<(String, NoteRecord)>> {
        Ok(self.load_records()?.into_iter().collect())
    }

    fn insert(&mut self, record: &NoteRecord) -> Result<String> {
        let mut records = self.load_records()?;
        let key = new_key();
        records.insert(key.clone(), record.clone());
        self.save_records(&records)?;
        Ok(key)
    }

    fn patch(&mut self, key: &str, patch: &NoteRecordPatch) -> Result<()> {
        let mut records = self.load_records()?;
        let record = records
            .get_mut(key)
            .ok_or_else(|| NotekeeperError::NotFound(key.to_string()))?;
        record.apply(patch);
        self.save_records(&records)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut records = self.load_records()?;
        if records.remove(key).is_none() {
            debug!(key, "remove of unknown key ignored");
            return Ok(());
        }
        self.save_records(&records)
    }
}
