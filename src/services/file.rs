//! File-backed [`CartStorage`]: one file per key inside a directory.

use super::{CartStorage, ServiceError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// Stores each key as `<dir>/<escaped key>.json`.
///
/// ASCII letters, digits, `-` and `.` are kept; every other byte of the key
/// becomes `_` followed by two hex digits, so distinct keys never share a file.
///
/// Writes go to a sibling `.tmp` file first and are renamed into place, so a
/// crash mid-write leaves the previous snapshot readable.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'.' {
                name.push(char::from(byte));
            } else {
                name.push_str(&format!("_{byte:02X}"));
            }
        }
        self.dir.join(format!("{name}.json"))
    }
}

#[async_trait]
impl CartStorage for FileStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, ServiceError> {
        match fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), ServiceError> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.dir).await?;

        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &value).await?;
        fs::rename(&tmp, &path).await?;

        debug!(path = %path.display(), bytes = value.len(), "Storage write");
        Ok(())
    }
}
