//! Payment recording HTTP handlers.
//!
//! - POST /api/v1/payments - Record a payment
//! - GET /api/v1/payments?building_id=&... - List with optional filters
//! - GET /api/v1/payments/:id - Get one payment
//! - PUT /api/v1/payments/:id - Update
//! - DELETE /api/v1/payments/:id - Delete
//!
//! The arrears engine only ever reads payments; every write enters here.
//! A payment offsets a department charge only when its income tag equals
//! the common-fee tag AND its date falls inside the charge's month.

use crate::{
    db::DbPool,
    error::AppError,
    middleware::auth::AuthContext,
    models::payment::{
        CreatePaymentRequest, ListPaymentsQuery, Payment, UpdatePaymentRequest,
    },
    services::tenancy,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

/// Record a payment against a department.
///
/// The department must belong to the stated building; mismatched pairs are
/// rejected so the arrears and balance queries can trust both columns.
pub async fn create_payment(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<Json<Payment>, AppError> {
    request.validate().map_err(AppError::InvalidRequest)?;
    tenancy::require_building_access(&pool, auth.user_id, request.building_id).await?;

    let belongs: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM departments WHERE id = $1 AND building_id = $2)",
    )
    .bind(request.department_id)
    .bind(request.building_id)
    .fetch_one(&pool)
    .await?;

    if !belongs {
        return Err(AppError::DepartmentNotFound);
    }

    let payment = sqlx::query_as::<_, Payment>(
        r#"
        INSERT INTO payments (
            building_id, department_id, date, amount,
            income_type, description, payment_method, document_number
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(request.building_id)
    .bind(request.department_id)
    .bind(request.date)
    .bind(request.amount)
    .bind(&request.income_type)
    .bind(&request.description)
    .bind(&request.payment_method)
    .bind(&request.document_number)
    .fetch_one(&pool)
    .await?;

    Ok(Json(payment))
}

/// List payments of a building, optionally narrowed by department and an
/// inclusive date range. Newest first.
pub async fn list_payments(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ListPaymentsQuery>,
) -> Result<Json<Vec<Payment>>, AppError> {
    tenancy::require_building_access(&pool, auth.user_id, query.building_id).await?;

    let payments = sqlx::query_as::<_, Payment>(
        r#"
        SELECT * FROM payments
        WHERE building_id = $1
          AND ($2::uuid IS NULL OR department_id = $2)
          AND ($3::date IS NULL OR date >= $3)
          AND ($4::date IS NULL OR date <= $4)
        ORDER BY date DESC, created_at DESC
        "#,
    )
    .bind(query.building_id)
    .bind(query.department_id)
    .bind(query.date_from)
    .bind(query.date_to)
    .fetch_all(&pool)
    .await?;

    Ok(Json(payments))
}

/// Get a payment by id.
pub async fn get_payment(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(payment_id): Path<Uuid>,
) -> Result<Json<Payment>, AppError> {
    let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
        .bind(payment_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::PaymentNotFound)?;

    tenancy::require_building_access(&pool, auth.user_id, payment.building_id).await?;

    Ok(Json(payment))
}

/// Update a payment.
///
/// Building and department attribution are fixed at creation; only the
/// transaction details can change.
pub async fn update_payment(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(payment_id): Path<Uuid>,
    Json(request): Json<UpdatePaymentRequest>,
) -> Result<Json<Payment>, AppError> {
    request.validate().map_err(AppError::InvalidRequest)?;

    let existing = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
        .bind(payment_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::PaymentNotFound)?;

    tenancy::require_building_access(&pool, auth.user_id, existing.building_id).await?;

    let payment = sqlx::query_as::<_, Payment>(
        r#"
        UPDATE payments
        SET date = $1, amount = $2, income_type = $3, description = $4,
            payment_method = $5, document_number = $6, updated_at = NOW()
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(request.date)
    .bind(request.amount)
    .bind(&request.income_type)
    .bind(&request.description)
    .bind(&request.payment_method)
    .bind(&request.document_number)
    .bind(payment_id)
    .fetch_one(&pool)
    .await?;

    Ok(Json(payment))
}

/// Delete a payment.
pub async fn delete_payment(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(payment_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let existing = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
        .bind(payment_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::PaymentNotFound)?;

    tenancy::require_building_access(&pool, auth.user_id, existing.building_id).await?;

    sqlx::query("DELETE FROM payments WHERE id = $1")
        .bind(payment_id)
        .execute(&pool)
        .await?;

    Ok(Json(serde_json::json!({ "deleted": true })))
}
