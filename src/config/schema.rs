//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::auth::Role;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Server configuration for the web shell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Authenticator settings and the demo account table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Simulated latency before a login resolves
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,

    /// Simulated latency before a logout resolves
    #[serde(default)]
    pub logout_delay_ms: u64,

    /// Password shared by every demo account
    #[serde(default = "default_demo_password")]
    pub demo_password: String,

    /// bcrypt cost used when hashing the demo password at startup
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// HMAC secret for signing tab cookies
    #[serde(default = "default_token_secret")]
    pub token_secret: String,

    /// Idle minutes after which a browser tab's state is dropped
    #[serde(default = "default_tab_idle_minutes")]
    pub tab_idle_minutes: i64,

    /// Upper bound on live browser tabs; the least recently used is evicted
    #[serde(default = "default_max_tabs")]
    pub max_tabs: usize,

    #[serde(default = "default_accounts")]
    pub accounts: Vec<AccountConfig>,
}

fn default_login_delay_ms() -> u64 {
    1000
}

fn default_demo_password() -> String {
    "password".to_string()
}

fn default_bcrypt_cost() -> u32 {
    4
}

fn default_token_secret() -> String {
    "medlearn-demo-secret-change-me".to_string()
}

fn default_tab_idle_minutes() -> i64 {
    30
}

fn default_max_tabs() -> usize {
    10_000
}

fn default_accounts() -> Vec<AccountConfig> {
    vec![
        AccountConfig {
            email: "student@medlearn.edu".to_string(),
            name: "Alex Morgan".to_string(),
            role: Role::Student,
            avatar: None,
        },
        AccountConfig {
            email: "instructor@medlearn.edu".to_string(),
            name: "Dr. Sarah Chen".to_string(),
            role: Role::Instructor,
            avatar: None,
        },
        AccountConfig {
            email: "admin@medlearn.edu".to_string(),
            name: "Jordan Lee".to_string(),
            role: Role::Admin,
            avatar: None,
        },
    ]
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_delay_ms: default_login_delay_ms(),
            logout_delay_ms: 0,
            demo_password: default_demo_password(),
            bcrypt_cost: default_bcrypt_cost(),
            token_secret: default_token_secret(),
            tab_idle_minutes: default_tab_idle_minutes(),
            max_tabs: default_max_tabs(),
            accounts: default_accounts(),
        }
    }
}

/// One entry of the demo account table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountConfig {
    pub email: String,
    pub name: String,
    pub role: Role,

    #[serde(default)]
    pub avatar: Option<String>,
}

/// Where the CLI keeps its client storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".medlearn/storage.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_accounts_cover_every_role() {
        let config = AuthConfig::default();
        for role in [Role::Student, Role::Instructor, Role::Admin] {
            assert!(config.accounts.iter().any(|a| a.role == role));
        }
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[server]\nport = 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.demo_password, "password");
        assert_eq!(config.auth.accounts.len(), 3);
    }

    #[test]
    fn test_accounts_override() {
        let toml_str = r#"
[[auth.accounts]]
email = "dean@medlearn.edu"
name = "Dean"
role = "admin"
avatar = "/avatars/dean.png"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.auth.accounts.len(), 1);
        assert_eq!(config.auth.accounts[0].role, Role::Admin);
        assert_eq!(
            config.auth.accounts[0].avatar.as_deref(),
            Some("/avatars/dean.png")
        );
    }
}
