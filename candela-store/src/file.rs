use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use candela_core::{CacheDocument, CacheStore, CandelaError};

use crate::key::sanitize_key;

/// One pretty-printed JSON document per key under a root directory.
///
/// Saves write a temporary sibling file and rename it over the target, so a
/// reader never observes a half-written document. The root directory is
/// created on first save.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File a key is stored in.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_key(key)))
    }
}

fn io_error(action: &str, path: &Path, e: &std::io::Error) -> CandelaError {
    CandelaError::store(format!("{action} {}: {e}", path.display()))
}

#[async_trait]
impl CacheStore for FileStore {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "candela_store::file::get", skip(self), err)
    )]
    async fn get(&self, key: &str) -> Result<Option<CacheDocument>, CandelaError> {
        let path = self.path_for(key);
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("read", &path, &e)),
        };
        let doc = serde_json::from_str(&text).map_err(|e| {
            CandelaError::store(format!("decode {}: {e}", path.display()))
        })?;
        Ok(Some(doc))
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "candela_store::file::save", skip(self, doc), err)
    )]
    async fn save(&self, key: &str, doc: &CacheDocument) -> Result<(), CandelaError> {
        let path = self.path_for(key);
        let json = serde_json::to_vec_pretty(doc)
            .map_err(|e| CandelaError::store(format!("encode {key}: {e}")))?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| io_error("create", &self.root, &e))?;

        let tmp = self.root.join(format!(
            ".{}.{:016x}.tmp",
            sanitize_key(key),
            rand::random::<u64>()
        ));
        if let Err(e) = tokio::fs::write(&tmp, &json).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_error("write", &tmp, &e));
        }
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_error("rename", &path, &e));
        }
        Ok(())
    }
}
