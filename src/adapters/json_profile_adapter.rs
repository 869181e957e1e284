//! JSON file profile adapter.
//!
//! The stored-profile equivalent of the original widget's browser storage:
//! one small JSON document holding the personalization profile.

use crate::domain::error::MuhurtaError;
use crate::domain::profile::Profile;
use crate::ports::profile_port::ProfilePort;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub struct JsonProfileAdapter {
    path: PathBuf,
}

impl JsonProfileAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ProfilePort for JsonProfileAdapter {
    fn load(&self) -> Result<Option<Profile>, MuhurtaError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let profile =
            serde_json::from_str(&content).map_err(|e| MuhurtaError::ProfileParse {
                file: self.path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Some(profile))
    }

    fn save(&self, profile: &Profile) -> Result<(), MuhurtaError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content =
            serde_json::to_string_pretty(profile).map_err(|e| MuhurtaError::ProfileParse {
                file: self.path.display().to_string(),
                reason: e.to_string(),
            })?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
