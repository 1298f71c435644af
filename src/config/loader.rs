//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::Path;

use super::Config;

pub const CONFIG_FILENAME: &str = "medlearn.toml";

/// Load configuration from medlearn.toml
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file()?;
    load_config_from_path(&config_path)
}

/// Load configuration, falling back to the built-in demo defaults when no file exists
pub fn load_config_or_default() -> Result<Config> {
    match load_config() {
        Ok(config) => Ok(config),
        Err(Error::ConfigNotFound) => {
            tracing::debug!("No {} found, using defaults", CONFIG_FILENAME);
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    let content = interpolate_env_vars(&content);
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<std::path::PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // Compile-time constant pattern
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# MedLearn Configuration

[server]
host = "0.0.0.0"
port = 3000

[auth]
# Simulated backend latency
login_delay_ms = 1000
logout_delay_ms = 0
demo_password = "${MEDLEARN_DEMO_PASSWORD:-password}"
token_secret = "${MEDLEARN_TOKEN_SECRET:-medlearn-demo-secret-change-me}"
tab_idle_minutes = 30
max_tabs = 10000

[[auth.accounts]]
email = "student@medlearn.edu"
name = "Alex Morgan"
role = "student"

[[auth.accounts]]
email = "instructor@medlearn.edu"
name = "Dr. Sarah Chen"
role = "instructor"

[[auth.accounts]]
email = "admin@medlearn.edu"
name = "Jordan Lee"
role = "admin"

[storage]
path = ".medlearn/storage.json"
"#
}
