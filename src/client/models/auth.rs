//! Authentication models

use serde::{Deserialize, Serialize};

/// Credentials submitted to the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// User identifier
    pub id: String,

    /// Clear-text password, sent over the wire once at login
    pub password: String,
}

/// Session token issued by the server on successful authentication.
///
/// The token is opaque to the client: no expiry is decoded from it, a 401
/// on a later call is the only signal that it is no longer valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// The token string presented as `Bearer <value>` on authenticated calls
    pub value: String,
}
