//! Condominium data models and API request/response types.
//!
//! A condominium is the tenancy root: membership in `condominium_members`
//! is what grants an administrator access to everything under it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a condominium record from the database.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Condominium {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a condominium.
///
/// The creating user is automatically enrolled as a member, so the
/// condominium is never orphaned from the tenancy guard's point of view.
#[derive(Debug, Deserialize)]
pub struct CreateCondominiumRequest {
    pub name: String,
    pub address: String,
}

/// Request body for updating a condominium.
#[derive(Debug, Deserialize)]
pub struct UpdateCondominiumRequest {
    pub name: String,
    pub address: String,
}
