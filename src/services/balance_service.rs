//! Monthly cash-basis balance for a building.
//!
//! Sums what actually came in (all payments, regardless of income tag)
//! against what went out (all expenses) inside one calendar month. This
//! view deliberately never consults billing periods or department charges:
//! "billed" and "collected" are different things, and this is the
//! collected side only. The month range is built with the same helper the
//! arrears engine uses, so the two conventions cannot drift apart.

use serde::Serialize;
use uuid::Uuid;

use crate::{
    dates::month_range, db::DbPool, error::AppError, middleware::auth::AuthContext,
    services::tenancy,
};

/// Cash-basis result for one building and month.
#[derive(Debug, Serialize)]
pub struct MonthlyBalance {
    pub building_id: Uuid,
    pub year: i32,
    pub month: i32,

    /// Sum of all payments received for the building's departments
    pub total_payments: i64,

    /// Sum of all expenses of the building
    pub total_expenses: i64,

    /// total_payments - total_expenses
    pub balance: i64,
}

/// Compute the income-vs-expense balance of a building for one month,
/// both date bounds inclusive.
pub async fn get_monthly_balance(
    pool: &DbPool,
    auth: &AuthContext,
    building_id: Uuid,
    year: i32,
    month: i32,
) -> Result<MonthlyBalance, AppError> {
    tenancy::require_building_access(pool, auth.user_id, building_id).await?;

    let (from, to) = month_range(year, month as u32)?;

    let total_payments: i64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(amount), 0)::BIGINT
        FROM payments
        WHERE building_id = $1 AND date BETWEEN $2 AND $3
        "#,
    )
    .bind(building_id)
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;

    let total_expenses: i64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(amount), 0)::BIGINT
        FROM expenses
        WHERE building_id = $1 AND date BETWEEN $2 AND $3
        "#,
    )
    .bind(building_id)
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;

    Ok(MonthlyBalance {
        building_id,
        year,
        month,
        total_payments,
        total_expenses,
        balance: total_payments - total_expenses,
    })
}
