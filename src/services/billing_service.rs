//! Billing period engine - opening/closing monthly cycles and generating
//! per-department charges.
//!
//! This service handles:
//! - Natural-key upsert of billing periods (open doubles as reopen)
//! - Bulk idempotent charge generation, one row per current department
//! - Advisory open/closed status flips
//!
//! # Atomicity
//!
//! Period upsert and charge generation run inside a single PostgreSQL
//! transaction, so a summary read never observes a partially generated
//! charge set. Concurrent opens for the same (building, year, month) are
//! absorbed by the unique constraints the upserts target.

use crate::{
    db::DbPool,
    error::AppError,
    middleware::auth::AuthContext,
    models::billing_period::{BillingPeriod, OpenPeriodResponse},
    services::tenancy,
};
use uuid::Uuid;

/// Open (or reopen) the billing period for a building and month, and
/// generate its department charges.
///
/// # Process
///
/// 1. Resolve the building and tenancy-check its condominium
/// 2. Upsert the period on its natural key `(building_id, year, month)`:
///    a new period is created open; an existing one gets the new amount
///    and is forced back to open
/// 3. Upsert one charge per department currently in the building, keyed on
///    `(billing_period_id, department_id)`, amount copied from this call
///
/// Calling this twice with identical arguments is idempotent with respect
/// to charge rows: exactly one row per department, final amount equal to
/// the second call's amount, and the reported `generated` count still
/// equals the department count (updates count as affected rows).
///
/// Already-issued charges belonging to OTHER periods are never touched.
///
/// # Arguments
///
/// Field ranges (year >= 2000, month 1-12, amount >= 0) are the handler's
/// responsibility; this function only signals `BuildingNotFound` /
/// `Forbidden` and store errors.
///
/// # Returns
///
/// The upserted period plus the number of charge rows written. A building
/// with no departments returns `generated = 0` and an advisory message -
/// a success, not an error.
pub async fn open_period(
    pool: &DbPool,
    auth: &AuthContext,
    building_id: Uuid,
    year: i32,
    month: i32,
    amount: i64,
) -> Result<OpenPeriodResponse, AppError> {
    // Tenancy is checked before any write; Forbidden aborts the whole call.
    tenancy::require_building_access(pool, auth.user_id, building_id).await?;

    let mut tx = pool.begin().await?;

    // Natural-key upsert: create open, or replace the amount and force the
    // status back to open. One statement covers "open" and "reopen with a
    // new amount"; the unique constraint resolves concurrent opens.
    let period = sqlx::query_as::<_, BillingPeriod>(
        r#"
        INSERT INTO billing_periods (building_id, year, month, amount, status)
        VALUES ($1, $2, $3, $4, 'open')
        ON CONFLICT (building_id, year, month)
        DO UPDATE SET amount = EXCLUDED.amount,
                      status = 'open',
                      updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(building_id)
    .bind(year)
    .bind(month)
    .bind(amount)
    .fetch_one(&mut *tx)
    .await?;

    // One charge per department currently in the building. The
    // (period, department) unique constraint makes this a true upsert:
    // regeneration updates amounts instead of duplicating rows, and rows
    // for departments no longer in the building are left alone.
    let generated = sqlx::query(
        r#"
        INSERT INTO department_charges (billing_period_id, department_id, amount)
        SELECT $1, d.id, $2
        FROM departments d
        WHERE d.building_id = $3
        ON CONFLICT (billing_period_id, department_id)
        DO UPDATE SET amount = EXCLUDED.amount,
                      updated_at = NOW()
        "#,
    )
    .bind(period.id)
    .bind(amount)
    .bind(building_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    tx.commit().await?;

    tracing::info!(
        building_id = %building_id,
        year,
        month,
        generated,
        "billing period opened"
    );

    let message = if generated == 0 {
        Some("building has no departments; no charges were generated".to_string())
    } else {
        None
    };

    Ok(OpenPeriodResponse {
        period,
        generated,
        message,
    })
}

/// Flip a period's status between "open" and "closed".
///
/// A pure status update: no side effects on charges or payments. "closed"
/// is advisory state - nothing in the engine currently rejects edits after
/// close.
///
/// # Errors
///
/// - `PeriodNotFound` if the period does not exist
/// - `Forbidden` if the tenancy check on its building fails
pub async fn set_period_status(
    pool: &DbPool,
    auth: &AuthContext,
    period_id: Uuid,
    status: &str,
) -> Result<BillingPeriod, AppError> {
    let period = find_period(pool, period_id).await?;
    tenancy::require_building_access(pool, auth.user_id, period.building_id).await?;

    let updated = sqlx::query_as::<_, BillingPeriod>(
        "UPDATE billing_periods SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(status)
    .bind(period_id)
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

/// Fetch a period by id, signalling `PeriodNotFound` if absent.
pub async fn find_period(pool: &DbPool, period_id: Uuid) -> Result<BillingPeriod, AppError> {
    sqlx::query_as::<_, BillingPeriod>("SELECT * FROM billing_periods WHERE id = $1")
        .bind(period_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::PeriodNotFound)
}

/// Fetch a period by its natural key, signalling `PeriodNotFound` if no
/// cycle was ever opened for that building and month.
pub async fn find_period_by_month(
    pool: &DbPool,
    building_id: Uuid,
    year: i32,
    month: i32,
) -> Result<BillingPeriod, AppError> {
    sqlx::query_as::<_, BillingPeriod>(
        "SELECT * FROM billing_periods WHERE building_id = $1 AND year = $2 AND month = $3",
    )
    .bind(building_id)
    .bind(year)
    .bind(month)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::PeriodNotFound)
}
