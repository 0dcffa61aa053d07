use std::path::{Path, PathBuf};

use fs_err as fs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;

/// Recorder state persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecorderSettings {
    /// Save path used by the previous run.
    #[serde(default)]
    pub save_path: Option<PathBuf>,
}

impl RecorderSettings {
    /// Loads settings from `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no settings file {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let s = fs::read_to_string(path).map_err(|e| Error::Io(path.to_owned(), e))?;
        toml::from_str(&s).map_err(|e| Error::SettingsParseFailure(path.to_owned(), e))
    }

    /// Saves settings to `path`, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::Io(parent.to_owned(), e))?;
            }
        }
        let s = toml::to_string(self).map_err(Error::SettingsSerializeFailure)?;
        fs::write(path, s).map_err(|e| Error::Io(path.to_owned(), e))
    }
}
