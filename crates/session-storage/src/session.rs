//! High-level API for the stored session pair.

use crate::{SessionStorage, StorageKeys, StorageResult};

/// Facade over a storage backend that owns the session pair invariant:
/// after any operation completes, storage holds either both the session
/// token and the user identity, or neither.
pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
}

impl SessionStore {
    /// Create a new session store with the given storage backend.
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Persist the session token together with the user identity.
    ///
    /// If the identity write fails, the token write is rolled back so the
    /// pair invariant holds.
    pub fn set_session(&self, jwt: &str, user_id: &str) -> StorageResult<()> {
        self.storage.set(StorageKeys::JWT, jwt)?;
        if let Err(e) = self.storage.set(StorageKeys::USER_ID, user_id) {
            tracing::warn!(error = %e, "Identity write failed, rolling back session token");
            let _ = self.storage.delete(StorageKeys::JWT);
            return Err(e);
        }
        Ok(())
    }

    /// Retrieve the stored session token.
    pub fn jwt(&self) -> StorageResult<Option<String>> {
        self.storage.get(StorageKeys::JWT)
    }

    /// Retrieve the stored user identity.
    pub fn user_id(&self) -> StorageResult<Option<String>> {
        self.storage.get(StorageKeys::USER_ID)
    }

    /// Whether a session token is present in storage.
    pub fn has_session(&self) -> StorageResult<bool> {
        self.storage.has(StorageKeys::JWT)
    }

    /// Remove both storage keys.
    ///
    /// Both deletions are attempted even when the first fails; the first
    /// error wins.
    pub fn clear_session(&self) -> StorageResult<()> {
        let jwt = self.storage.delete(StorageKeys::JWT);
        let user_id = self.storage.delete(StorageKeys::USER_ID);
        jwt?;
        user_id?;
        Ok(())
    }
}
