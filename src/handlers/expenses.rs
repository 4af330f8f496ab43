//! Expense recording HTTP handlers.
//!
//! - POST /api/v1/expenses - Record an expense
//! - GET /api/v1/expenses?building_id=&... - List with optional date filters
//! - GET /api/v1/expenses/:id - Get one expense
//! - PUT /api/v1/expenses/:id - Update
//! - DELETE /api/v1/expenses/:id - Delete

use crate::{
    db::DbPool,
    error::AppError,
    middleware::auth::AuthContext,
    models::expense::{
        CreateExpenseRequest, Expense, ListExpensesQuery, UpdateExpenseRequest,
    },
    services::tenancy,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

/// Record an expense for a building.
pub async fn create_expense(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<Json<Expense>, AppError> {
    request.validate().map_err(AppError::InvalidRequest)?;
    tenancy::require_building_access(&pool, auth.user_id, request.building_id).await?;

    let expense = sqlx::query_as::<_, Expense>(
        r#"
        INSERT INTO expenses (building_id, date, amount, expense_type, description)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(request.building_id)
    .bind(request.date)
    .bind(request.amount)
    .bind(&request.expense_type)
    .bind(&request.description)
    .fetch_one(&pool)
    .await?;

    Ok(Json(expense))
}

/// List expenses of a building, optionally within an inclusive date range.
pub async fn list_expenses(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ListExpensesQuery>,
) -> Result<Json<Vec<Expense>>, AppError> {
    tenancy::require_building_access(&pool, auth.user_id, query.building_id).await?;

    let expenses = sqlx::query_as::<_, Expense>(
        r#"
        SELECT * FROM expenses
        WHERE building_id = $1
          AND ($2::date IS NULL OR date >= $2)
          AND ($3::date IS NULL OR date <= $3)
        ORDER BY date DESC, created_at DESC
        "#,
    )
    .bind(query.building_id)
    .bind(query.date_from)
    .bind(query.date_to)
    .fetch_all(&pool)
    .await?;

    Ok(Json(expenses))
}

/// Get an expense by id.
pub async fn get_expense(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(expense_id): Path<Uuid>,
) -> Result<Json<Expense>, AppError> {
    let expense = sqlx::query_as::<_, Expense>("SELECT * FROM expenses WHERE id = $1")
        .bind(expense_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::ExpenseNotFound)?;

    tenancy::require_building_access(&pool, auth.user_id, expense.building_id).await?;

    Ok(Json(expense))
}

/// Update an expense.
pub async fn update_expense(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(expense_id): Path<Uuid>,
    Json(request): Json<UpdateExpenseRequest>,
) -> Result<Json<Expense>, AppError> {
    request.validate().map_err(AppError::InvalidRequest)?;

    let existing = sqlx::query_as::<_, Expense>("SELECT * FROM expenses WHERE id = $1")
        .bind(expense_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::ExpenseNotFound)?;

    tenancy::require_building_access(&pool, auth.user_id, existing.building_id).await?;

    let expense = sqlx::query_as::<_, Expense>(
        r#"
        UPDATE expenses
        SET date = $1, amount = $2, expense_type = $3, description = $4, updated_at = NOW()
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(request.date)
    .bind(request.amount)
    .bind(&request.expense_type)
    .bind(&request.description)
    .bind(expense_id)
    .fetch_one(&pool)
    .await?;

    Ok(Json(expense))
}

/// Delete an expense.
pub async fn delete_expense(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(expense_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let existing = sqlx::query_as::<_, Expense>("SELECT * FROM expenses WHERE id = $1")
        .bind(expense_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::ExpenseNotFound)?;

    tenancy::require_building_access(&pool, auth.user_id, existing.building_id).await?;

    sqlx::query("DELETE FROM expenses WHERE id = $1")
        .bind(expense_id)
        .execute(&pool)
        .await?;

    Ok(Json(serde_json::json!({ "deleted": true })))
}
