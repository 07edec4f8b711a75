//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

/// Session-stored user identity.
///
/// The minimal record a protected view needs: the display identity plus the
/// opaque backend token. Presence of this record is what makes a session
/// authenticated; nothing here checks token validity or expiry - a stale
/// token fails later at the remote-call boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Display name shown in the navigation and dashboard greeting.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Opaque backend session credential.
    pub token: String,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the one-shot form submission token.
    pub const SUBMIT_TOKEN: &str = "submit_token";
}
