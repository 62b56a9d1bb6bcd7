//! JSON file holding the whole library

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{error::AppResult, models::library::LibrarySnapshot};

#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
    pretty: bool,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            path: path.into(),
            pretty,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the library, `None` when the file does not exist yet
    pub async fn load(&self) -> AppResult<Option<LibrarySnapshot>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Overwrite the file with the given library.
    ///
    /// The document is written next to the target and renamed over it, so a
    /// crash mid-write leaves the previous version in place.
    pub async fn save(&self, snapshot: &LibrarySnapshot) -> AppResult<()> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(snapshot)?
        } else {
            serde_json::to_vec(snapshot)?
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            "Library saved"
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "library.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
