//! Parking spot management HTTP handlers.
//!
//! - POST /api/v1/parking-spots - Create parking spot
//! - GET /api/v1/parking-spots?building_id= - List spots of a building
//! - GET /api/v1/parking-spots/:id - Get one spot
//! - PUT /api/v1/parking-spots/:id - Update
//! - DELETE /api/v1/parking-spots/:id - Delete

use crate::{
    db::DbPool,
    error::AppError,
    middleware::auth::AuthContext,
    models::parking_spot::{
        CreateParkingSpotRequest, ListParkingSpotsQuery, ParkingSpot, UpdateParkingSpotRequest,
    },
    services::tenancy,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

/// Create a parking spot, optionally assigned to a department.
pub async fn create_parking_spot(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateParkingSpotRequest>,
) -> Result<Json<ParkingSpot>, AppError> {
    tenancy::require_building_access(&pool, auth.user_id, request.building_id).await?;

    let spot = sqlx::query_as::<_, ParkingSpot>(
        "INSERT INTO parking_spots (building_id, number, department_id)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(request.building_id)
    .bind(&request.number)
    .bind(request.department_id)
    .fetch_one(&pool)
    .await?;

    Ok(Json(spot))
}

/// List the parking spots of one building.
pub async fn list_parking_spots(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ListParkingSpotsQuery>,
) -> Result<Json<Vec<ParkingSpot>>, AppError> {
    tenancy::require_building_access(&pool, auth.user_id, query.building_id).await?;

    let spots = sqlx::query_as::<_, ParkingSpot>(
        "SELECT * FROM parking_spots WHERE building_id = $1 ORDER BY number ASC",
    )
    .bind(query.building_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(spots))
}

/// Get a parking spot by id.
pub async fn get_parking_spot(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(spot_id): Path<Uuid>,
) -> Result<Json<ParkingSpot>, AppError> {
    let spot = sqlx::query_as::<_, ParkingSpot>("SELECT * FROM parking_spots WHERE id = $1")
        .bind(spot_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::ParkingSpotNotFound)?;

    tenancy::require_building_access(&pool, auth.user_id, spot.building_id).await?;

    Ok(Json(spot))
}

/// Update a parking spot's number or department assignment.
pub async fn update_parking_spot(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(spot_id): Path<Uuid>,
    Json(request): Json<UpdateParkingSpotRequest>,
) -> Result<Json<ParkingSpot>, AppError> {
    let existing = sqlx::query_as::<_, ParkingSpot>("SELECT * FROM parking_spots WHERE id = $1")
        .bind(spot_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::ParkingSpotNotFound)?;

    tenancy::require_building_access(&pool, auth.user_id, existing.building_id).await?;

    let spot = sqlx::query_as::<_, ParkingSpot>(
        "UPDATE parking_spots SET number = $1, department_id = $2, updated_at = NOW()
         WHERE id = $3 RETURNING *",
    )
    .bind(&request.number)
    .bind(request.department_id)
    .bind(spot_id)
    .fetch_one(&pool)
    .await?;

    Ok(Json(spot))
}

/// Delete a parking spot.
pub async fn delete_parking_spot(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(spot_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let existing = sqlx::query_as::<_, ParkingSpot>("SELECT * FROM parking_spots WHERE id = $1")
        .bind(spot_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::ParkingSpotNotFound)?;

    tenancy::require_building_access(&pool, auth.user_id, existing.building_id).await?;

    sqlx::query("DELETE FROM parking_spots WHERE id = $1")
        .bind(spot_id)
        .execute(&pool)
        .await?;

    Ok(Json(serde_json::json!({ "deleted": true })))
}
