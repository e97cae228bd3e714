//! Durable local storage for the auth handshake client.
//!
//! This crate provides:
//! - The [`SessionStorage`] trait, the seam between the handshake engine and
//!   whatever the host environment uses as durable key/value storage
//! - A JSON-file backend ([`FileStorage`]) and an in-memory backend
//!   ([`MemoryStorage`]) for tests and ephemeral embedding
//! - The [`SessionStore`] facade, which owns the token/identity pair
//!   invariant: storage holds either both keys or neither

mod file;
mod keys;
mod memory;
mod session;
mod traits;

pub use file::FileStorage;
pub use keys::StorageKeys;
pub use memory::MemoryStorage;
pub use session::SessionStore;
pub use traits::SessionStorage;

use std::path::PathBuf;
use thiserror::Error;

/// Directory name under the platform-local data dir for the default store.
pub const APP_DIR_NAME: &str = "thin-auth";

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend-specific storage error
    #[error("Backend storage error: {0}")]
    Backend(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Path of the default on-disk session store.
pub fn default_store_path() -> StorageResult<PathBuf> {
    let base = dirs::data_local_dir().ok_or_else(|| {
        StorageError::Backend("No local data directory available on this platform".to_string())
    })?;
    Ok(base.join(APP_DIR_NAME).join("session.json"))
}

/// Create the default file-backed storage implementation.
pub fn create_storage() -> StorageResult<Box<dyn SessionStorage>> {
    let path = default_store_path()?;
    let storage = FileStorage::open(path)?;
    Ok(Box::new(storage))
}

/// Create a SessionStore with the default file-backed storage.
pub fn create_session_store() -> StorageResult<SessionStore> {
    let storage = create_storage()?;
    Ok(SessionStore::new(storage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_roundtrip() {
        let storage = MemoryStorage::new();

        storage.set("test_key", "test_value").unwrap();
        assert_eq!(
            storage.get("test_key").unwrap(),
            Some("test_value".to_string())
        );

        assert!(storage.has("test_key").unwrap());
        assert!(!storage.has("nonexistent").unwrap());

        assert!(storage.delete("test_key").unwrap());
        assert!(!storage.delete("test_key").unwrap());
        assert_eq!(storage.get("test_key").unwrap(), None);
    }

    #[test]
    fn session_store_set_and_clear() {
        let store = SessionStore::new(Box::new(MemoryStorage::new()));

        assert!(!store.has_session().unwrap());

        store.set_session("tok123", "42").unwrap();
        assert!(store.has_session().unwrap());
        assert_eq!(store.jwt().unwrap(), Some("tok123".to_string()));
        assert_eq!(store.user_id().unwrap(), Some("42".to_string()));

        store.clear_session().unwrap();
        assert!(!store.has_session().unwrap());
        assert_eq!(store.jwt().unwrap(), None);
        assert_eq!(store.user_id().unwrap(), None);
    }

    #[test]
    fn storage_keys_are_unique_and_non_empty() {
        assert!(!StorageKeys::JWT.is_empty());
        assert!(!StorageKeys::USER_ID.is_empty());
        assert_ne!(StorageKeys::JWT, StorageKeys::USER_ID);
    }
}
