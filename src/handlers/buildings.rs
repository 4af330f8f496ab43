//! Building management HTTP handlers.
//!
//! - POST /api/v1/buildings - Create building
//! - GET /api/v1/buildings?condominium_id= - List buildings of a condominium
//! - GET /api/v1/buildings/:id - Get one building
//! - PUT /api/v1/buildings/:id - Update
//! - DELETE /api/v1/buildings/:id - Delete

use crate::{
    db::DbPool,
    error::AppError,
    middleware::auth::AuthContext,
    models::building::{
        Building, CreateBuildingRequest, ListBuildingsQuery, UpdateBuildingRequest,
    },
    services::tenancy,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

/// Create a building inside a condominium the caller belongs to.
pub async fn create_building(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateBuildingRequest>,
) -> Result<Json<Building>, AppError> {
    tenancy::require_condominium_access(&pool, auth.user_id, request.condominium_id).await?;

    let building = sqlx::query_as::<_, Building>(
        "INSERT INTO buildings (condominium_id, name, address)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(request.condominium_id)
    .bind(&request.name)
    .bind(&request.address)
    .fetch_one(&pool)
    .await?;

    Ok(Json(building))
}

/// List the buildings of one condominium.
pub async fn list_buildings(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ListBuildingsQuery>,
) -> Result<Json<Vec<Building>>, AppError> {
    tenancy::require_condominium_access(&pool, auth.user_id, query.condominium_id).await?;

    let buildings = sqlx::query_as::<_, Building>(
        "SELECT * FROM buildings WHERE condominium_id = $1 ORDER BY name ASC",
    )
    .bind(query.condominium_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(buildings))
}

/// Get a building by id.
pub async fn get_building(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(building_id): Path<Uuid>,
) -> Result<Json<Building>, AppError> {
    let building = tenancy::require_building_access(&pool, auth.user_id, building_id).await?;

    Ok(Json(building))
}

/// Update a building's name and address.
pub async fn update_building(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(building_id): Path<Uuid>,
    Json(request): Json<UpdateBuildingRequest>,
) -> Result<Json<Building>, AppError> {
    tenancy::require_building_access(&pool, auth.user_id, building_id).await?;

    let building = sqlx::query_as::<_, Building>(
        "UPDATE buildings SET name = $1, address = $2, updated_at = NOW()
         WHERE id = $3 RETURNING *",
    )
    .bind(&request.name)
    .bind(&request.address)
    .bind(building_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::BuildingNotFound)?;

    Ok(Json(building))
}

/// Delete a building.
pub async fn delete_building(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(building_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    tenancy::require_building_access(&pool, auth.user_id, building_id).await?;

    let result = sqlx::query("DELETE FROM buildings WHERE id = $1")
        .bind(building_id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::BuildingNotFound);
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
