//! Billing period and arrears HTTP handlers.
//!
//! - POST /api/v1/billing-periods - Open (or reopen) a monthly cycle
//! - PUT /api/v1/billing-periods/:id/status - Flip open/closed
//! - GET /api/v1/billing-periods/:id/charges - Raw generated charge rows
//! - GET /api/v1/billing-periods/:id/summary - Reconciled period summary
//! - GET /api/v1/billing-periods/summary?building_id=&year=&month= - Same,
//!   by natural key
//! - GET /api/v1/billing-periods/:id/summary.csv - CSV export
//! - GET /api/v1/buildings/:id/departments/:department_id/history -
//!   Month-by-month arrears trend
//! - GET /api/v1/buildings/:id/balance?year=&month= - Cash-basis balance
//!
//! Range validation (year >= 2000, month 1-12, amount >= 0) happens here,
//! at the DTO layer; the engines below assume validated input and never
//! coerce.

use crate::{
    db::DbPool,
    error::AppError,
    middleware::auth::AuthContext,
    models::billing_period::{
        BillingPeriod, DepartmentCharge, OpenPeriodRequest, OpenPeriodResponse, PeriodSummary,
        SetPeriodStatusRequest, SummaryByMonthQuery,
    },
    services::{arrears_service, balance_service, billing_service, report_service, tenancy},
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

/// Open (or reopen) a billing period and generate its charges.
///
/// # Request Body
///
/// ```json
/// {
///   "building_id": "550e8400-...",
///   "year": 2025,
///   "month": 3,
///   "amount": 60000
/// }
/// ```
///
/// # Response (200)
///
/// ```json
/// {
///   "period": { "id": "770e8400-...", "year": 2025, "month": 3, "status": "open", ... },
///   "generated": 2
/// }
/// ```
pub async fn open_period(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<OpenPeriodRequest>,
) -> Result<Json<OpenPeriodResponse>, AppError> {
    request.validate().map_err(AppError::InvalidRequest)?;

    let response = billing_service::open_period(
        &pool,
        &auth,
        request.building_id,
        request.year,
        request.month,
        request.amount,
    )
    .await?;

    Ok(Json(response))
}

/// Flip a period's status between "open" and "closed".
pub async fn set_period_status(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(period_id): Path<Uuid>,
    Json(request): Json<SetPeriodStatusRequest>,
) -> Result<Json<BillingPeriod>, AppError> {
    request.validate().map_err(AppError::InvalidRequest)?;

    let period =
        billing_service::set_period_status(&pool, &auth, period_id, &request.status).await?;

    Ok(Json(period))
}

/// Raw charge rows of one billing period, as generated.
///
/// Unreconciled ledger view: no payment matching, one row per department
/// charged when the period was (re)opened.
pub async fn list_period_charges(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(period_id): Path<Uuid>,
) -> Result<Json<Vec<DepartmentCharge>>, AppError> {
    let period = billing_service::find_period(&pool, period_id).await?;
    tenancy::require_building_access(&pool, auth.user_id, period.building_id).await?;

    let charges = sqlx::query_as::<_, DepartmentCharge>(
        "SELECT * FROM department_charges WHERE billing_period_id = $1 ORDER BY created_at ASC",
    )
    .bind(period_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(charges))
}

/// Reconciled summary of one billing period.
pub async fn get_period_summary(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(period_id): Path<Uuid>,
) -> Result<Json<PeriodSummary>, AppError> {
    let summary = arrears_service::get_period_summary(&pool, &auth, period_id).await?;

    Ok(Json(summary))
}

/// Reconciled summary looked up by (building, year, month).
///
/// 404 when no period was ever opened for that month - distinct from an
/// existing period with zero charges.
pub async fn get_summary_by_month(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<SummaryByMonthQuery>,
) -> Result<Json<PeriodSummary>, AppError> {
    if !(1..=12).contains(&query.month) {
        return Err(AppError::InvalidRequest(
            "month must be between 1 and 12".to_string(),
        ));
    }

    let summary = arrears_service::get_summary_by_building_and_month(
        &pool,
        &auth,
        query.building_id,
        query.year,
        query.month,
    )
    .await?;

    Ok(Json(summary))
}

/// CSV export of a period summary.
///
/// Columns `department_number, charge_amount, paid_amount, status`, every
/// field double-quoted; served as an attachment named
/// `gastos_comunes_<year>_<month>.csv`.
pub async fn export_period_summary_csv(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(period_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let summary = arrears_service::get_period_summary(&pool, &auth, period_id).await?;

    let filename = report_service::csv_filename(summary.year, summary.month);
    let body = report_service::period_summary_csv(&summary)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    ))
}

/// Month-by-month arrears trend of one department.
pub async fn get_department_history(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path((building_id, department_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let rows =
        arrears_service::get_department_history(&pool, &auth, building_id, department_id).await?;

    Ok(Json(rows))
}

/// Query parameters for the monthly balance.
#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    pub year: i32,
    pub month: i32,
}

/// Cash-basis income-vs-expense balance of a building for one month.
pub async fn get_monthly_balance(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(building_id): Path<Uuid>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<balance_service::MonthlyBalance>, AppError> {
    if !(1..=12).contains(&query.month) {
        return Err(AppError::InvalidRequest(
            "month must be between 1 and 12".to_string(),
        ));
    }

    let balance =
        balance_service::get_monthly_balance(&pool, &auth, building_id, query.year, query.month)
            .await?;

    Ok(Json(balance))
}
