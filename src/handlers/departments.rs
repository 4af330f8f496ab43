//! Department management HTTP handlers.
//!
//! - POST /api/v1/departments - Create department
//! - GET /api/v1/departments?building_id= - List departments of a building
//! - GET /api/v1/departments/:id - Get one department
//! - PUT /api/v1/departments/:id - Update
//! - DELETE /api/v1/departments/:id - Delete
//!
//! The billing engine references departments but never mutates them; all
//! writes go through here. Deleting a department keeps any charges already
//! issued to it (they render with a placeholder number in summaries).

use crate::{
    db::DbPool,
    error::AppError,
    middleware::auth::AuthContext,
    models::department::{
        CreateDepartmentRequest, Department, ListDepartmentsQuery, UpdateDepartmentRequest,
    },
    services::tenancy,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

/// Create a department in a building the caller may act on.
pub async fn create_department(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateDepartmentRequest>,
) -> Result<Json<Department>, AppError> {
    if request.base_fee < 0 {
        return Err(AppError::InvalidRequest("base_fee must be >= 0".to_string()));
    }
    tenancy::require_building_access(&pool, auth.user_id, request.building_id).await?;

    let department = sqlx::query_as::<_, Department>(
        r#"
        INSERT INTO departments (building_id, number, floor, base_fee)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(request.building_id)
    .bind(&request.number)
    .bind(request.floor)
    .bind(request.base_fee)
    .fetch_one(&pool)
    .await?;

    Ok(Json(department))
}

/// List the departments of one building, ordered by display number.
pub async fn list_departments(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ListDepartmentsQuery>,
) -> Result<Json<Vec<Department>>, AppError> {
    tenancy::require_building_access(&pool, auth.user_id, query.building_id).await?;

    let departments = sqlx::query_as::<_, Department>(
        "SELECT * FROM departments WHERE building_id = $1 ORDER BY number ASC",
    )
    .bind(query.building_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(departments))
}

/// Get a department by id.
pub async fn get_department(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(department_id): Path<Uuid>,
) -> Result<Json<Department>, AppError> {
    let department = sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = $1")
        .bind(department_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::DepartmentNotFound)?;

    tenancy::require_building_access(&pool, auth.user_id, department.building_id).await?;

    Ok(Json(department))
}

/// Update a department.
pub async fn update_department(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(department_id): Path<Uuid>,
    Json(request): Json<UpdateDepartmentRequest>,
) -> Result<Json<Department>, AppError> {
    if request.base_fee < 0 {
        return Err(AppError::InvalidRequest("base_fee must be >= 0".to_string()));
    }

    let existing = sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = $1")
        .bind(department_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::DepartmentNotFound)?;

    tenancy::require_building_access(&pool, auth.user_id, existing.building_id).await?;

    let department = sqlx::query_as::<_, Department>(
        r#"
        UPDATE departments
        SET number = $1, floor = $2, base_fee = $3, updated_at = NOW()
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(&request.number)
    .bind(request.floor)
    .bind(request.base_fee)
    .bind(department_id)
    .fetch_one(&pool)
    .await?;

    Ok(Json(department))
}

/// Delete a department. Charges already issued to it are kept.
pub async fn delete_department(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(department_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let existing = sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = $1")
        .bind(department_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::DepartmentNotFound)?;

    tenancy::require_building_access(&pool, auth.user_id, existing.building_id).await?;

    sqlx::query("DELETE FROM departments WHERE id = $1")
        .bind(department_id)
        .execute(&pool)
        .await?;

    Ok(Json(serde_json::json!({ "deleted": true })))
}
