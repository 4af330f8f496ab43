//! Parking spot data models and API request/response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a parking spot record from the database.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ParkingSpot {
    pub id: Uuid,
    pub building_id: Uuid,
    pub number: String,

    /// Department the spot is assigned to, if any
    pub department_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a parking spot.
#[derive(Debug, Deserialize)]
pub struct CreateParkingSpotRequest {
    pub building_id: Uuid,
    pub number: String,
    pub department_id: Option<Uuid>,
}

/// Request body for updating a parking spot.
#[derive(Debug, Deserialize)]
pub struct UpdateParkingSpotRequest {
    pub number: String,
    pub department_id: Option<Uuid>,
}

/// Query parameters for listing parking spots.
#[derive(Debug, Deserialize)]
pub struct ListParkingSpotsQuery {
    pub building_id: Uuid,
}
