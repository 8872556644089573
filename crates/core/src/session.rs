use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    storage::{NAVIGATION_HISTORY_KEY, SESSION_KEY, StorageBackend},
};

/// Presence of this value in storage is what "logged in" means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMarker {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationHistoryItem {
    pub path: String,
    pub title: String,
    pub timestamp: String,
}

/// Session context handed to the gate and the authenticator.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn StorageBackend>,
}

impl Session {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        let marker = self.storage.get_item(SESSION_KEY)?;
        Ok(marker.is_some_and(|raw| !raw.trim().is_empty()))
    }

    pub fn current_user(&self) -> Result<Option<SessionMarker>> {
        match self.storage.get_item(SESSION_KEY)? {
            Some(raw) if !raw.trim().is_empty() => Ok(Some(serde_json::from_str(&raw)?)),
            _ => Ok(None),
        }
    }

    pub fn store(&self, marker: &SessionMarker) -> Result<()> {
        let raw = serde_json::to_string(marker)?;
        self.storage.set_item(SESSION_KEY, &raw)?;
        tracing::debug!(email = %marker.email, "session marker stored");
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.storage.remove_item(SESSION_KEY)?;
        tracing::debug!("session marker removed");
        Ok(())
    }

    /// Most recent navigation entries, newest first as stored.
    pub fn recent_navigation(&self, limit: usize) -> Result<Vec<NavigationHistoryItem>> {
        let raw = self
            .storage
            .get_item(NAVIGATION_HISTORY_KEY)?
            .unwrap_or_else(|| "[]".to_string());

        let mut history: Vec<NavigationHistoryItem> = serde_json::from_str(&raw)?;
        history.truncate(limit);
        Ok(history)
    }
}
