//! Condominium management HTTP handlers.
//!
//! - POST /api/v1/condominiums - Create condominium (creator auto-enrolled)
//! - GET /api/v1/condominiums - List condominiums the caller belongs to
//! - GET /api/v1/condominiums/:id - Get one condominium
//! - PUT /api/v1/condominiums/:id - Update
//! - DELETE /api/v1/condominiums/:id - Delete

use crate::{
    db::DbPool,
    error::AppError,
    middleware::auth::AuthContext,
    models::condominium::{Condominium, CreateCondominiumRequest, UpdateCondominiumRequest},
    services::tenancy,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use uuid::Uuid;

/// Create a new condominium.
///
/// The creating user is enrolled as a member in the same database
/// transaction, so the tenancy guard immediately admits them.
pub async fn create_condominium(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateCondominiumRequest>,
) -> Result<Json<Condominium>, AppError> {
    let mut tx = pool.begin().await?;

    let condominium = sqlx::query_as::<_, Condominium>(
        "INSERT INTO condominiums (name, address) VALUES ($1, $2) RETURNING *",
    )
    .bind(&request.name)
    .bind(&request.address)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO condominium_members (condominium_id, user_id) VALUES ($1, $2)")
        .bind(condominium.id)
        .bind(auth.user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(Json(condominium))
}

/// List condominiums the authenticated user is a member of.
pub async fn list_condominiums(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<Condominium>>, AppError> {
    let condominiums = sqlx::query_as::<_, Condominium>(
        r#"
        SELECT c.*
        FROM condominiums c
        JOIN condominium_members m ON m.condominium_id = c.id
        WHERE m.user_id = $1
        ORDER BY c.created_at DESC
        "#,
    )
    .bind(auth.user_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(condominiums))
}

/// Get a condominium by id.
pub async fn get_condominium(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(condominium_id): Path<Uuid>,
) -> Result<Json<Condominium>, AppError> {
    tenancy::require_condominium_access(&pool, auth.user_id, condominium_id).await?;

    let condominium = sqlx::query_as::<_, Condominium>("SELECT * FROM condominiums WHERE id = $1")
        .bind(condominium_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::CondominiumNotFound)?;

    Ok(Json(condominium))
}

/// Update a condominium's name and address.
pub async fn update_condominium(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(condominium_id): Path<Uuid>,
    Json(request): Json<UpdateCondominiumRequest>,
) -> Result<Json<Condominium>, AppError> {
    tenancy::require_condominium_access(&pool, auth.user_id, condominium_id).await?;

    let condominium = sqlx::query_as::<_, Condominium>(
        "UPDATE condominiums SET name = $1, address = $2, updated_at = NOW()
         WHERE id = $3 RETURNING *",
    )
    .bind(&request.name)
    .bind(&request.address)
    .bind(condominium_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::CondominiumNotFound)?;

    Ok(Json(condominium))
}

/// Delete a condominium and, via cascade, everything under it.
pub async fn delete_condominium(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(condominium_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    tenancy::require_condominium_access(&pool, auth.user_id, condominium_id).await?;

    let result = sqlx::query("DELETE FROM condominiums WHERE id = $1")
        .bind(condominium_id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::CondominiumNotFound);
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
