//! Session authenticator
//!
//! Owns the session record for one UI root. Consumers share it behind an
//! `Arc` and only ever receive clones of the stored session.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::auth::directory::AccountDirectory;
use crate::auth::models::{AuthState, Preferences, RememberedLogin, Session};
use crate::config::AuthConfig;
use crate::error::Result;
use crate::storage::{Storage, PREFERENCES_KEY, REMEMBER_KEY, SESSION_KEY};

/// Runtime settings derived from [`AuthConfig`]
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub login_delay: Duration,
    pub logout_delay: Duration,
    password_hash: String,
}

impl AuthSettings {
    /// Hash the demo password once so every authenticator can share it
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        let password_hash = bcrypt::hash(&config.demo_password, config.bcrypt_cost)?;
        Ok(Self {
            login_delay: Duration::from_millis(config.login_delay_ms),
            logout_delay: Duration::from_millis(config.logout_delay_ms),
            password_hash,
        })
    }

    pub fn with_delays(mut self, login: Duration, logout: Duration) -> Self {
        self.login_delay = login;
        self.logout_delay = logout;
        self
    }

    fn verify_password(&self, password: &str) -> bool {
        match bcrypt::verify(password, &self.password_hash) {
            Ok(valid) => valid,
            Err(e) => {
                warn!("Password verification failed: {}", e);
                false
            }
        }
    }
}

pub struct Authenticator {
    storage: Arc<dyn Storage>,
    directory: Arc<dyn AccountDirectory>,
    settings: AuthSettings,
}

impl Authenticator {
    pub fn new(
        storage: Arc<dyn Storage>,
        directory: Arc<dyn AccountDirectory>,
        settings: AuthSettings,
    ) -> Self {
        Self {
            storage,
            directory,
            settings,
        }
    }

    /// Restore a previously stored session when the UI root mounts
    pub fn hydrate(&self) -> Option<Session> {
        let session = self.current_session();
        match &session {
            Some(s) => debug!("Hydrated session for {} ({})", s.email, s.role),
            None => debug!("No stored session to hydrate"),
        }
        session
    }

    /// Validate credentials and store a fresh session.
    ///
    /// Returns `false` for unknown emails, wrong passwords, empty input,
    /// or a storage failure. Nothing is stored on failure.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        tokio::time::sleep(self.settings.login_delay).await;

        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            debug!("Rejected login with empty credentials");
            return false;
        }

        let Some(profile) = self.directory.profile(email) else {
            info!("Login failed for unknown account {}", email);
            return false;
        };

        if !self.settings.verify_password(password) {
            info!("Login failed for {}: wrong password", email);
            return false;
        }

        let session = Session::new(email.to_string(), profile);
        if let Err(e) = self.store_session(&session) {
            warn!("Could not persist session for {}: {}", email, e);
            return false;
        }

        info!("Logged in {} as {}", session.email, session.role);
        true
    }

    /// Drop the session and cached preferences. Safe to call when anonymous.
    pub async fn logout(&self) {
        tokio::time::sleep(self.settings.logout_delay).await;

        for key in [SESSION_KEY, PREFERENCES_KEY] {
            if let Err(e) = self.storage.remove_item(key) {
                warn!("Could not remove {} on logout: {}", key, e);
            }
        }

        info!("Logged out");
    }

    /// Read the stored session.
    ///
    /// Absent, malformed, or unknown-role data all read as `None`. Data
    /// that is present but invalid is removed, which signs the tab out.
    pub fn current_session(&self) -> Option<Session> {
        let raw = match self.storage.get_item(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not read stored session: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("Discarding invalid stored session: {}", e);
                if let Err(e) = self.storage.remove_item(SESSION_KEY) {
                    warn!("Could not remove invalid session: {}", e);
                }
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_session().is_some()
    }

    pub fn state(&self) -> AuthState {
        match self.current_session() {
            Some(session) => AuthState::Authenticated(session.role),
            None => AuthState::Anonymous,
        }
    }

    /// Remember an email for the next login form
    pub fn remember_email(&self, email: &str) -> Result<()> {
        let record = RememberedLogin {
            remember: true,
            email: email.trim().to_string(),
        };
        self.storage
            .set_item(REMEMBER_KEY, &serde_json::to_string(&record)?)
    }

    pub fn forget_email(&self) -> Result<()> {
        self.storage.remove_item(REMEMBER_KEY)
    }

    pub fn remembered_email(&self) -> Option<String> {
        let raw = self.storage.get_item(REMEMBER_KEY).ok().flatten()?;
        serde_json::from_str::<RememberedLogin>(&raw)
            .ok()
            .filter(|r| r.remember)
            .map(|r| r.email)
    }

    pub fn preferences(&self) -> Preferences {
        self.storage
            .get_item(PREFERENCES_KEY)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn save_preferences(&self, preferences: &Preferences) -> Result<()> {
        self.storage
            .set_item(PREFERENCES_KEY, &serde_json::to_string(preferences)?)
    }

    fn store_session(&self, session: &Session) -> Result<()> {
        let value = serde_json::to_string(session)?;
        self.storage.set_item(SESSION_KEY, &value)
    }
}
