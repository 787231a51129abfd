//! Whole-file JSON storage for the recipe collection.
//!
//! Every call goes back to disk; nothing is cached between requests. Two
//! creates that overlap can both load the same collection and the later
//! `save_all` wins, unless the store was built with `serialize_writes`.
//!
//! Records are kept as raw JSON objects so keys this service does not know
//! about survive a rewrite untouched.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;
use tokio::sync::{Mutex, MutexGuard};

use crate::error::StoreError;

/// The full contents of the recipes file, in file order.
pub type Collection = Vec<Value>;

#[derive(Debug)]
pub struct RecipeStore {
    path: PathBuf,
    write_lock: Option<Mutex<()>>,
}

impl RecipeStore {
    pub fn new(path: impl Into<PathBuf>, serialize_writes: bool) -> Self {
        Self {
            path: path.into(),
            write_lock: serialize_writes.then(|| Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        fs::try_exists(&self.path).await.unwrap_or(false)
    }

    pub async fn load_all(&self) -> Result<Collection, StoreError> {
        let data = fs::read_to_string(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        serde_json::from_str(&data).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Rewrite the whole file. Each call writes its own temp file next to
    /// the target and renames it into place, so readers and concurrent
    /// writers only ever see a complete collection.
    pub async fn save_all(&self, recipes: &[Value]) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(recipes)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_replace(&path, data.as_bytes())).await??;

        tracing::debug!(path = %self.path.display(), count = recipes.len(), "recipes saved");
        Ok(())
    }

    /// Held for the whole read-modify-write of a create when writes are
    /// serialized; `None` otherwise.
    pub async fn write_guard(&self) -> Option<MutexGuard<'_, ()>> {
        match &self.write_lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        }
    }
}

fn write_replace(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
    tmp.write_all(data).map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| StoreError::io(path, e.error))?;
    Ok(())
}
