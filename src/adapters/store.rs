use crate::core::SelectionStore;
use crate::utils::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// The durable slot on disk: one file holding the JSON-encoded selection,
/// fully overwritten on every write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SelectionStore for FileStore {
    async fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(encoded) => Ok(Some(encoded)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, encoded: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, encoded)?;
        Ok(())
    }
}
