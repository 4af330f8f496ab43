//! Department data models and API request/response types.
//!
//! Departments are the billing unit: charge generation issues one row per
//! department of the building, and payments are recorded against them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a department record from the database.
///
/// # Fee Storage
///
/// `base_fee` is stored as `i64` Chilean pesos. Amounts in this service
/// never use floats.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Department {
    pub id: Uuid,

    /// Building this department belongs to
    pub building_id: Uuid,

    /// Display number shown in reports (e.g. "101", "A-23")
    pub number: String,

    pub floor: i32,

    /// Monthly base fee in pesos
    pub base_fee: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a department.
///
/// # JSON Example
///
/// ```json
/// {
///   "building_id": "550e8400-e29b-41d4-a716-446655440000",
///   "number": "101",
///   "floor": 1,
///   "base_fee": 60000
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateDepartmentRequest {
    pub building_id: Uuid,
    pub number: String,
    pub floor: i32,
    #[serde(default)]
    pub base_fee: i64,
}

/// Request body for updating a department.
#[derive(Debug, Deserialize)]
pub struct UpdateDepartmentRequest {
    pub number: String,
    pub floor: i32,
    pub base_fee: i64,
}

/// Query parameters for listing departments.
#[derive(Debug, Deserialize)]
pub struct ListDepartmentsQuery {
    pub building_id: Uuid,
}
