//! Profile persistence
//!
//! The recommendation engine only reads preferences and history; these
//! stores own loading and saving them around each call. Two backends exist:
//! an in-memory map and a directory of JSON files.

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{HistoryEvent, UserPreferences},
};

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key under which a profile's preferences are stored
pub const PREFERENCES_KEY: &str = "sailing-store-preferences";

/// Key under which a profile's browsing history is stored
pub const HISTORY_KEY: &str = "sailing-store-history";

/// Get/set access to a profile's preferences
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Stored preferences, or `None` if the profile never saved any
    async fn get_preferences(&self, profile_id: Uuid) -> AppResult<Option<UserPreferences>>;

    /// Replaces the stored preferences
    async fn set_preferences(&self, profile_id: Uuid, preferences: UserPreferences)
        -> AppResult<()>;
}

/// Append-only browsing history per profile
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    /// Full history in chronological order; empty for unknown profiles
    async fn get_history(&self, profile_id: Uuid) -> AppResult<Vec<HistoryEvent>>;

    /// Appends one event
    ///
    /// Fails with `InvalidInput` if the event is older than the last stored one.
    async fn append_event(&self, profile_id: Uuid, event: HistoryEvent) -> AppResult<()>;
}

/// Rejects an event that would break the non-decreasing timestamp order
pub(crate) fn check_order(history: &[HistoryEvent], event: &HistoryEvent) -> AppResult<()> {
    match history.last() {
        Some(last) if event.timestamp < last.timestamp => Err(AppError::InvalidInput(format!(
            "Event at {} is older than the last recorded event at {}",
            event.timestamp.timestamp_millis(),
            last.timestamp.timestamp_millis()
        ))),
        _ => Ok(()),
    }
}
