//! Client-side key/value storage
//!
//! Mirrors the shape of browser local storage: string keys mapped to
//! string values. The authenticator persists everything it owns through
//! this trait so the backing store can be swapped per surface.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

/// Key holding the serialized session record
pub const SESSION_KEY: &str = "medlearn_user";

/// Key holding the opt-in "remember this email" record
pub const REMEMBER_KEY: &str = "medlearn_remember";

/// Key holding cached UI preferences
pub const PREFERENCES_KEY: &str = "medlearn_preferences";

/// String key/value storage shared by the UI root
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removing an absent key is not an error
    fn remove_item(&self, key: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}
