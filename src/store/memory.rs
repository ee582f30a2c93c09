use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::{check_order, HistoryStore, PreferenceStore};
use crate::{
    error::AppResult,
    models::{HistoryEvent, UserPreferences},
};

#[derive(Debug, Default)]
struct Profile {
    preferences: Option<UserPreferences>,
    history: Vec<HistoryEvent>,
}

/// Process-local profile store; contents are lost on restart
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: RwLock<HashMap<Uuid, Profile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl PreferenceStore for MemoryStore {
    async fn get_preferences(&self, profile_id: Uuid) -> AppResult<Option<UserPreferences>> {
        let profiles = self.profiles.read().await;
        Ok(profiles
            .get(&profile_id)
            .and_then(|profile| profile.preferences.clone()))
    }

    async fn set_preferences(
        &self,
        profile_id: Uuid,
        preferences: UserPreferences,
    ) -> AppResult<()> {
        let mut profiles = self.profiles.write().await;
        profiles.entry(profile_id).or_default().preferences = Some(preferences);
        Ok(())
    }
}

#[async_trait::async_trait]
impl HistoryStore for MemoryStore {
    async fn get_history(&self, profile_id: Uuid) -> AppResult<Vec<HistoryEvent>> {
        let profiles = self.profiles.read().await;
        Ok(profiles
            .get(&profile_id)
            .map(|profile| profile.history.clone())
            .unwrap_or_default())
    }

    async fn append_event(&self, profile_id: Uuid, event: HistoryEvent) -> AppResult<()> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles.entry(profile_id).or_default();
        check_order(&profile.history, &event)?;
        profile.history.push(event);
        Ok(())
    }
}
