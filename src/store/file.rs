use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{check_order, HistoryStore, PreferenceStore, HISTORY_KEY, PREFERENCES_KEY};
use crate::{
    error::AppResult,
    models::{parse_history, HistoryEvent, UserPreferences},
};

/// Stores each profile as JSON documents in its own directory
///
/// Layout: `<root>/<profile_id>/sailing-store-preferences.json` and
/// `<root>/<profile_id>/sailing-store-history.json`. Writes go through a temp
/// file and a rename so a crash never leaves a half-written document.
pub struct FileStore {
    root: PathBuf,
    // Serializes read-modify-write cycles on history files
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Creates the root directory if needed
    pub async fn open(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        tracing::info!(root = %root.display(), "File store opened");

        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    fn document_path(&self, profile_id: Uuid, key: &str) -> PathBuf {
        self.root
            .join(profile_id.to_string())
            .join(format!("{}.json", key))
    }

    async fn read_document<T: DeserializeOwned>(path: &Path) -> AppResult<Option<T>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Stored history; unreadable events are skipped instead of failing the profile
    async fn read_history(path: &Path) -> AppResult<Vec<HistoryEvent>> {
        let stored: Option<serde_json::Value> = Self::read_document(path).await?;
        Ok(stored.map(parse_history).unwrap_or_default())
    }

    async fn write_document<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec(value)?).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl PreferenceStore for FileStore {
    async fn get_preferences(&self, profile_id: Uuid) -> AppResult<Option<UserPreferences>> {
        Self::read_document(&self.document_path(profile_id, PREFERENCES_KEY)).await
    }

    async fn set_preferences(
        &self,
        profile_id: Uuid,
        preferences: UserPreferences,
    ) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        Self::write_document(&self.document_path(profile_id, PREFERENCES_KEY), &preferences).await
    }
}

#[async_trait::async_trait]
impl HistoryStore for FileStore {
    async fn get_history(&self, profile_id: Uuid) -> AppResult<Vec<HistoryEvent>> {
        Self::read_history(&self.document_path(profile_id, HISTORY_KEY)).await
    }

    async fn append_event(&self, profile_id: Uuid, event: HistoryEvent) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let path = self.document_path(profile_id, HISTORY_KEY);

        let mut history = Self::read_history(&path).await?;
        check_order(&history, &event)?;
        history.push(event);

        tracing::debug!(profile_id = %profile_id, events = history.len(), "History appended");
        Self::write_document(&path, &history).await
    }
}
