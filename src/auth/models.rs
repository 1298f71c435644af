//! Authentication models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Roles that select a dashboard and its navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Instructor, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Instructor => "instructor",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The record identifying an authenticated user for the lifetime of a tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Session {
    /// Mint a session for a resolved account
    pub fn new(email: String, profile: AccountProfile) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            name: profile.name,
            role: profile.role,
            avatar: profile.avatar,
            created_at: chrono::Utc::now(),
        }
    }

    /// Initials shown when no avatar is set
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter(|part| !part.ends_with('.'))
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// Directory data for a known account
#[derive(Debug, Clone, PartialEq)]
pub struct AccountProfile {
    pub name: String,
    pub role: Role,
    pub avatar: Option<String>,
}

/// Observable authentication state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated(Role),
}

/// Opt-in "remember this email" record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RememberedLogin {
    pub remember: bool,
    pub email: String,
}

/// Cached UI preferences, discarded on sign-out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_email_notifications")]
    pub email_notifications: bool,
}

fn default_theme() -> String {
    "light".to_string()
}

fn default_email_notifications() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            email_notifications: default_email_notifications(),
        }
    }
}

/// Login form payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember: Option<String>,
}

impl LoginRequest {
    /// HTML checkboxes submit "on" when ticked and nothing otherwise
    pub fn wants_remember(&self) -> bool {
        matches!(self.remember.as_deref(), Some("on" | "true" | "1"))
    }
}

/// Session information in API responses
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub avatar: Option<String>,
}

impl From<Session> for SessionInfo {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            email: session.email,
            name: session.name,
            role: session.role.to_string(),
            avatar: session.avatar,
        }
    }
}
