//! Filesystem-backed collaborators for publishing without a backend.

use super::{BlobStore, ProfileRegistry};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Stores CVs as files in a directory.
///
/// URLs are `base_url/name` when a base URL is configured (e.g. the directory
/// is served by a web server), otherwise `file://` URLs to the written file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryBlobStore {
    pub directory: PathBuf,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl BlobStore for DirectoryBlobStore {
    fn put(&self, name: &str, bytes: &[u8]) -> Result<String> {
        std::fs::create_dir_all(&self.directory).with_context(|| {
            format!("Failed to create blob directory {}", self.directory.display())
        })?;
        let path = self.directory.join(name);
        std::fs::write(&path, bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        let url = match &self.base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), name),
            None => {
                let path = path
                    .canonicalize()
                    .with_context(|| format!("Failed to resolve {}", path.display()))?;
                format!("file://{}", path.display())
            }
        };
        log::info!("Stored {} bytes as {url}", bytes.len());
        Ok(url)
    }
}

/// Records the CV URL in the profile JSON file it was rendered from.
///
/// Only the `cvUrl` key is touched; every other field is written back as it
/// was read.
#[derive(Debug, Clone)]
pub struct JsonProfileRegistry {
    path: PathBuf,
}

impl JsonProfileRegistry {
    pub fn new<P: AsRef<Path>>(path: P) -> JsonProfileRegistry {
        JsonProfileRegistry {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ProfileRegistry for JsonProfileRegistry {
    fn set_cv_url(&self, profile_id: &str, url: &str) -> Result<()> {
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read profile {}", self.path.display()))?;
        let mut profile: serde_json::Value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse profile {}", self.path.display()))?;

        let object = profile
            .as_object_mut()
            .ok_or_else(|| anyhow!("Profile {} is not a JSON object", self.path.display()))?;
        let stored_id = object.get("id").and_then(|id| id.as_str()).unwrap_or_default();
        if stored_id != profile_id {
            return Err(anyhow!(
                "Profile {} belongs to `{stored_id}`, not `{profile_id}`",
                self.path.display()
            ));
        }
        object.insert("cvUrl".to_string(), serde_json::Value::from(url));

        let contents = serde_json::to_string_pretty(&profile)
            .with_context(|| "Failed to serialize profile")?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write profile {}", self.path.display()))?;
        Ok(())
    }
}
