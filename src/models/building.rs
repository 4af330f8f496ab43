//! Building data models and API request/response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a building record from the database.
///
/// Every building belongs to exactly one condominium; tenancy checks for
/// anything under a building resolve through `condominium_id`.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Building {
    pub id: Uuid,
    pub condominium_id: Uuid,
    pub name: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a building.
#[derive(Debug, Deserialize)]
pub struct CreateBuildingRequest {
    pub condominium_id: Uuid,
    pub name: String,
    pub address: String,
}

/// Request body for updating a building.
#[derive(Debug, Deserialize)]
pub struct UpdateBuildingRequest {
    pub name: String,
    pub address: String,
}

/// Query parameters for listing buildings.
#[derive(Debug, Deserialize)]
pub struct ListBuildingsQuery {
    pub condominium_id: Uuid,
}
