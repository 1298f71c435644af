//! Per-browser authenticators for the web shell

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::authenticator::{AuthSettings, Authenticator};
use crate::auth::directory::AccountDirectory;
use crate::storage::MemoryStorage;

/// One browser tab: its storage and the authenticator bound to it
pub struct Tab {
    pub id: String,
    pub authenticator: Arc<Authenticator>,
    pub last_accessed: chrono::DateTime<chrono::Utc>,
}

impl Tab {
    fn new(directory: Arc<dyn AccountDirectory>, settings: AuthSettings) -> Self {
        let storage = Arc::new(MemoryStorage::new());
        Self {
            id: Uuid::new_v4().to_string(),
            authenticator: Arc::new(Authenticator::new(storage, directory, settings)),
            last_accessed: chrono::Utc::now(),
        }
    }

    fn is_idle(&self, idle_minutes: i64) -> bool {
        let now = chrono::Utc::now();
        now.signed_duration_since(self.last_accessed).num_minutes() > idle_minutes
    }

    fn touch(&mut self) {
        self.last_accessed = chrono::Utc::now();
    }
}

/// Registry of live tabs keyed by tab id
#[derive(Clone)]
pub struct TabRegistry {
    tabs: Arc<RwLock<HashMap<String, Tab>>>,
    directory: Arc<dyn AccountDirectory>,
    settings: AuthSettings,
    idle_minutes: i64,
    max_tabs: usize,
}

impl TabRegistry {
    pub fn new(
        directory: Arc<dyn AccountDirectory>,
        settings: AuthSettings,
        idle_minutes: i64,
        max_tabs: usize,
    ) -> Self {
        Self {
            tabs: Arc::new(RwLock::new(HashMap::new())),
            directory,
            settings,
            idle_minutes,
            max_tabs: max_tabs.max(1),
        }
    }

    /// Open a new tab, pruning idle ones first.
    ///
    /// At capacity the least recently used tab is evicted.
    pub async fn open(&self) -> (String, Arc<Authenticator>) {
        self.cleanup_idle().await;

        let tab = Tab::new(self.directory.clone(), self.settings.clone());
        let id = tab.id.clone();
        let authenticator = tab.authenticator.clone();

        let mut tabs = self.tabs.write().await;
        while tabs.len() >= self.max_tabs {
            let Some(oldest) = tabs
                .values()
                .min_by_key(|t| t.last_accessed)
                .map(|t| t.id.clone())
            else {
                break;
            };
            tabs.remove(&oldest);
            tracing::debug!("Evicted tab {} at capacity", oldest);
        }
        tabs.insert(id.clone(), tab);

        tracing::debug!("Opened tab {} ({} live)", id, tabs.len());
        (id, authenticator)
    }

    /// Look up a tab, dropping it if it has been idle too long
    pub async fn get(&self, tab_id: &str) -> Option<Arc<Authenticator>> {
        let mut tabs = self.tabs.write().await;
        if let Some(tab) = tabs.get_mut(tab_id) {
            if tab.is_idle(self.idle_minutes) {
                tabs.remove(tab_id);
                tracing::debug!("Dropped idle tab {}", tab_id);
                return None;
            }
            tab.touch();
            return Some(tab.authenticator.clone());
        }
        None
    }

    /// Resolve a tab id or open a fresh tab when it is unknown
    pub async fn get_or_open(&self, tab_id: Option<&str>) -> (String, Arc<Authenticator>, bool) {
        if let Some(id) = tab_id {
            if let Some(authenticator) = self.get(id).await {
                return (id.to_string(), authenticator, false);
            }
        }
        let (id, authenticator) = self.open().await;
        (id, authenticator, true)
    }

    pub async fn cleanup_idle(&self) {
        let idle_minutes = self.idle_minutes;
        self.tabs
            .write()
            .await
            .retain(|_, tab| !tab.is_idle(idle_minutes));
    }
}
