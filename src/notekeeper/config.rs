use crate::error::{NotekeeperError, Result};
use crate::store::fs::DEFAULT_COLLECTION;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Configuration for notekeeper, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotekeeperConfig {
    /// Notes shown per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Name of the document collection holding the notes
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

impl Default for NotekeeperConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            collection: default_collection(),
        }
    }
}

impl NotekeeperConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NotekeeperError::Io)?;
        let config: NotekeeperConfig =
            serde_json::from_str(&content).map_err(NotekeeperError::Serialization)?;
        if config.page_size == 0 {
            return Err(NotekeeperError::Config(
                "page_size must be greater than zero".into(),
            ));
        }
        validate_collection(&config.collection)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NotekeeperError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NotekeeperError::Serialization)?;
        fs::write(config_path, content).map_err(NotekeeperError::Io)?;
        Ok(())
    }

    /// Reads a setting by its command-line key.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "page-size" => Ok(self.page_size.to_string()),
            "collection" => Ok(self.collection.clone()),
            _ => Err(NotekeeperError::Config(format!("Unknown config key: {}", key))),
        }
    }

    /// Sets a setting by its command-line key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "page-size" => {
                let size: usize = value.parse().map_err(|_| {
                    NotekeeperError::Config(format!("Invalid page size: {}", value))
                })?;
                if size == 0 {
                    return Err(NotekeeperError::Config(
                        "page-size must be greater than zero".into(),
                    ));
                }
                self.page_size = size;
            }
            "collection" => {
                let name = value.trim();
                validate_collection(name)?;
                self.collection = name.to_string();
            }
            _ => {
                return Err(NotekeeperError::Config(format!(
                    "Unknown config key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

/// A collection is stored as `<name>.json` next to `config.json`, so the name
/// must be a plain file stem that does not collide with the config file.
fn validate_collection(name: &str) -> Result<()> {
    let config_stem = CONFIG_FILENAME.trim_end_matches(".json");
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.eq_ignore_ascii_case(config_stem)
    {
        return Err(NotekeeperError::Config(format!(
            "Invalid collection name: {}",
            name
        )));
    }
    Ok(())
}
