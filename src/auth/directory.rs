//! Account lookup
//!
//! The authenticator only asks "which role does this email have?". The
//! demo table answers from configuration; a real identity provider can
//! implement [`AccountDirectory`] without touching any call site.

use std::collections::HashMap;

use crate::auth::models::{AccountProfile, Role};
use crate::config::AccountConfig;

pub trait AccountDirectory: Send + Sync {
    /// Role for a known email, `None` for everyone else
    fn resolve(&self, email: &str) -> Option<Role>;

    /// Display data for a known email
    fn profile(&self, email: &str) -> Option<AccountProfile> {
        let role = self.resolve(email)?;
        let name = email.split('@').next().unwrap_or(email).to_string();
        Some(AccountProfile {
            name,
            role,
            avatar: None,
        })
    }
}

/// The fixed demo mapping
#[derive(Debug, Clone)]
pub struct DemoDirectory {
    accounts: HashMap<String, AccountConfig>,
}

impl DemoDirectory {
    pub fn new(accounts: Vec<AccountConfig>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (normalize_email(&account.email), account))
            .collect();
        Self { accounts }
    }

    /// Accounts sorted by role then email, for listings
    pub fn accounts(&self) -> Vec<&AccountConfig> {
        let mut accounts: Vec<_> = self.accounts.values().collect();
        accounts.sort_by(|a, b| {
            (a.role as u8, a.email.as_str()).cmp(&(b.role as u8, b.email.as_str()))
        });
        accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for DemoDirectory {
    fn default() -> Self {
        Self::new(crate::config::AuthConfig::default().accounts)
    }
}

impl AccountDirectory for DemoDirectory {
    fn resolve(&self, email: &str) -> Option<Role> {
        self.accounts.get(&normalize_email(email)).map(|a| a.role)
    }

    fn profile(&self, email: &str) -> Option<AccountProfile> {
        self.accounts
            .get(&normalize_email(email))
            .map(|a| AccountProfile {
                name: a.name.clone(),
                role: a.role,
                avatar: a.avatar.clone(),
            })
    }
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticDirectory;

    impl AccountDirectory for StaticDirectory {
        fn resolve(&self, email: &str) -> Option<Role> {
            (email == "ta@medlearn.edu").then_some(Role::Instructor)
        }
    }

    #[test]
    fn test_demo_directory_resolves_defaults() {
        let directory = DemoDirectory::default();
        assert_eq!(directory.resolve("student@medlearn.edu"), Some(Role::Student));
        assert_eq!(
            directory.resolve("instructor@medlearn.edu"),
            Some(Role::Instructor)
        );
        assert_eq!(directory.resolve("admin@medlearn.edu"), Some(Role::Admin));
        assert_eq!(directory.resolve("unknown@x.edu"), None);
    }

    #[test]
    fn test_lookup_ignores_case_and_whitespace() {
        let directory = DemoDirectory::default();
        assert_eq!(
            directory.resolve("  Student@MedLearn.edu "),
            Some(Role::Student)
        );
    }

    #[test]
    fn test_profile_uses_configured_name() {
        let directory = DemoDirectory::default();
        let profile = directory.profile("admin@medlearn.edu").unwrap();
        assert_eq!(profile.name, "Jordan Lee");
        assert_eq!(profile.role, Role::Admin);
    }

    #[test]
    fn test_default_profile_falls_back_to_local_part() {
        let profile = StaticDirectory.profile("ta@medlearn.edu").unwrap();
        assert_eq!(profile.name, "ta");
        assert_eq!(profile.role, Role::Instructor);
        assert!(StaticDirectory.profile("nobody@medlearn.edu").is_none());
    }

    #[test]
    fn test_accounts_sorted_by_role() {
        let directory = DemoDirectory::default();
        let roles: Vec<Role> = directory.accounts().iter().map(|a| a.role).collect();
        assert_eq!(roles, vec![Role::Student, Role::Instructor, Role::Admin]);
    }
}
