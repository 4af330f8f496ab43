//! API key model for authentication.
//!
//! Each administrator of the dashboard authenticates with an API key,
//! stored in the database as a SHA-256 hash.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Represents an API key record from the database.
///
/// # Database Table
///
/// Maps to the `api_keys` table:
/// - `id`: Unique identifier (UUID); also the user id for tenancy membership
/// - `key_hash`: SHA-256 hash of the actual API key
/// - `user_name`: Display name of the administrator
/// - `created_at`: When the key was created
/// - `is_active`: Whether the key is currently valid
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKey {
    /// Unique identifier for this API key / user
    pub id: Uuid,

    /// SHA-256 hash of the actual API key (64 hex characters)
    pub key_hash: String,

    /// Display name of the administrator using this key
    pub user_name: String,

    /// Timestamp when this API key was created
    pub created_at: DateTime<Utc>,

    /// Whether this key is currently active
    ///
    /// Inactive keys are rejected during authentication, which allows
    /// revoking access without deleting the record.
    pub is_active: bool,
}
