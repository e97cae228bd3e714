//! Storage key constants.

/// Storage keys used by the handshake engine.
///
/// The key names are part of the backend protocol: an existing session
/// written by another client of the same backend must be readable here.
pub struct StorageKeys;

impl StorageKeys {
    /// Session token (JWT), stored verbatim as received from the backend
    pub const JWT: &'static str = "ihp_jwt";

    /// User identity, stored alongside the session token
    pub const USER_ID: &'static str = "ihp_user_id";
}
