//! Arrears reconciliation engine - matching common-fee payments against
//! department charges and classifying each department's standing.
//!
//! Three read paths, all side-effect free and safe to call concurrently
//! with the billing engine's writes:
//! - point-in-time summary of one period
//! - the same summary looked up by (building, year, month)
//! - month-by-month history of one department across every period
//!
//! Only payments whose income tag equals [`COMMON_FEE_INCOME_TYPE`] and
//! whose date falls inside the period's calendar month (both bounds
//! inclusive) offset a charge.

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    dates::month_range,
    db::DbPool,
    error::AppError,
    middleware::auth::AuthContext,
    models::billing_period::{
        BillingPeriod, ChargeStatus, DepartmentHistoryRow, MISSING_DEPARTMENT_NUMBER,
        PeriodSummary, PeriodSummaryItem,
    },
    models::payment::COMMON_FEE_INCOME_TYPE,
    services::{billing_service, tenancy},
};

/// A charge row joined with its department's display number.
///
/// The join is LEFT: charges outlive their department, so `number` is an
/// explicit `Option` here and normalized to a placeholder at the boundary -
/// never a union of shapes.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ChargedDepartment {
    department_id: Uuid,
    number: Option<String>,
    amount: i64,
}

/// Reconciled view of one billing period: every charge with its paid total
/// and status.
///
/// # Process
///
/// 1. Resolve the period; tenancy-check via its building
/// 2. Compute the inclusive [first, last] day range of its month
/// 3. Load charges joined with department numbers
/// 4. Sum eligible payments per charged department inside the range
/// 5. Classify each charge with [`ChargeStatus::classify`]
pub async fn get_period_summary(
    pool: &DbPool,
    auth: &AuthContext,
    period_id: Uuid,
) -> Result<PeriodSummary, AppError> {
    let period = billing_service::find_period(pool, period_id).await?;
    tenancy::require_building_access(pool, auth.user_id, period.building_id).await?;

    let (from, to) = month_range(period.year, period.month as u32)?;

    let charges = sqlx::query_as::<_, ChargedDepartment>(
        r#"
        SELECT c.department_id, d.number, c.amount
        FROM department_charges c
        LEFT JOIN departments d ON d.id = c.department_id
        WHERE c.billing_period_id = $1
        ORDER BY d.number ASC NULLS LAST, c.department_id ASC
        "#,
    )
    .bind(period.id)
    .fetch_all(pool)
    .await?;

    let department_ids: Vec<Uuid> = charges.iter().map(|c| c.department_id).collect();
    let paid_by_department = sum_paid_by_department(pool, &department_ids, from, to).await?;

    let items = build_summary_items(&charges, &paid_by_department);

    Ok(PeriodSummary {
        id: period.id,
        building_id: period.building_id,
        year: period.year,
        month: period.month,
        status: period.status,
        amount: period.amount,
        items,
    })
}

/// Summary looked up by natural key instead of period id.
///
/// `PeriodNotFound` when no cycle was ever opened for that building and
/// month - distinct from an existing period with zero charges, which is a
/// normal summary with an empty item list.
pub async fn get_summary_by_building_and_month(
    pool: &DbPool,
    auth: &AuthContext,
    building_id: Uuid,
    year: i32,
    month: i32,
) -> Result<PeriodSummary, AppError> {
    tenancy::require_building_access(pool, auth.user_id, building_id).await?;

    let period = billing_service::find_period_by_month(pool, building_id, year, month).await?;

    get_period_summary(pool, auth, period.id).await
}

/// Month-by-month arrears trend of one department across every billing
/// period of its building, ascending by (year, month).
///
/// Each period is reconciled independently: the single optional charge for
/// the pair (amount 0 if the department had none that month) against that
/// month's eligible payments. One row per period, gapless - a period
/// without a charge still yields a row with charge_amount 0 and status
/// unpaid.
pub async fn get_department_history(
    pool: &DbPool,
    auth: &AuthContext,
    building_id: Uuid,
    department_id: Uuid,
) -> Result<Vec<DepartmentHistoryRow>, AppError> {
    tenancy::require_building_access(pool, auth.user_id, building_id).await?;

    // Ascending (year, month) is the only ordering guarantee; the natural
    // key makes ties impossible.
    let periods = sqlx::query_as::<_, BillingPeriod>(
        "SELECT * FROM billing_periods WHERE building_id = $1 ORDER BY year ASC, month ASC",
    )
    .bind(building_id)
    .fetch_all(pool)
    .await?;

    let mut rows = Vec::with_capacity(periods.len());
    for period in periods {
        let charge_amount: i64 = sqlx::query_scalar(
            "SELECT amount FROM department_charges
             WHERE billing_period_id = $1 AND department_id = $2",
        )
        .bind(period.id)
        .bind(department_id)
        .fetch_optional(pool)
        .await?
        .unwrap_or(0);

        let (from, to) = month_range(period.year, period.month as u32)?;

        let paid_amount: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount), 0)::BIGINT
            FROM payments
            WHERE building_id = $1
              AND department_id = $2
              AND income_type = $3
              AND date BETWEEN $4 AND $5
            "#,
        )
        .bind(building_id)
        .bind(department_id)
        .bind(COMMON_FEE_INCOME_TYPE)
        .bind(from)
        .bind(to)
        .fetch_one(pool)
        .await?;

        rows.push(DepartmentHistoryRow {
            billing_period_id: period.id,
            year: period.year,
            month: period.month,
            period_status: period.status,
            charge_amount,
            paid_amount,
            status: ChargeStatus::classify(charge_amount, paid_amount),
        });
    }

    Ok(rows)
}

/// Sum eligible payments per department inside an inclusive date range.
///
/// Departments with no eligible payments are simply absent from the map;
/// readers default them to 0.
async fn sum_paid_by_department(
    pool: &DbPool,
    department_ids: &[Uuid],
    from: NaiveDate,
    to: NaiveDate,
) -> Result<HashMap<Uuid, i64>, AppError> {
    if department_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(Uuid, i64)> = sqlx::query_as(
        r#"
        SELECT department_id, COALESCE(SUM(amount), 0)::BIGINT
        FROM payments
        WHERE department_id = ANY($1)
          AND income_type = $2
          AND date BETWEEN $3 AND $4
        GROUP BY department_id
        "#,
    )
    .bind(department_ids)
    .bind(COMMON_FEE_INCOME_TYPE)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().collect())
}

/// Assemble summary items from charge rows and per-department paid totals.
///
/// Pure: all classification and placeholder normalization happens here, so
/// the reconciliation rules are testable without a database.
fn build_summary_items(
    charges: &[ChargedDepartment],
    paid_by_department: &HashMap<Uuid, i64>,
) -> Vec<PeriodSummaryItem> {
    charges
        .iter()
        .map(|charge| {
            let paid_amount = paid_by_department
                .get(&charge.department_id)
                .copied()
                .unwrap_or(0);

            PeriodSummaryItem {
                department_id: charge.department_id,
                department_number: charge
                    .number
                    .clone()
                    .unwrap_or_else(|| MISSING_DEPARTMENT_NUMBER.to_string()),
                charge_amount: charge.amount,
                paid_amount,
                status: ChargeStatus::classify(charge.amount, paid_amount),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charge(department_id: Uuid, number: &str, amount: i64) -> ChargedDepartment {
        ChargedDepartment {
            department_id,
            number: Some(number.to_string()),
            amount,
        }
    }

    #[test]
    fn one_paid_one_unpaid() {
        // Two departments charged 60000; only the first paid in full.
        let d1 = Uuid::new_v4();
        let d2 = Uuid::new_v4();
        let charges = vec![charge(d1, "101", 60000), charge(d2, "102", 60000)];
        let paid = HashMap::from([(d1, 60000)]);

        let items = build_summary_items(&charges, &paid);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].paid_amount, 60000);
        assert_eq!(items[0].status, ChargeStatus::Paid);
        assert_eq!(items[1].paid_amount, 0);
        assert_eq!(items[1].status, ChargeStatus::Unpaid);
    }

    #[test]
    fn half_payment_is_partial() {
        let d2 = Uuid::new_v4();
        let charges = vec![charge(d2, "102", 60000)];
        let paid = HashMap::from([(d2, 30000)]);

        let items = build_summary_items(&charges, &paid);

        assert_eq!(items[0].paid_amount, 30000);
        assert_eq!(items[0].status, ChargeStatus::Partial);
    }

    #[test]
    fn missing_paid_entry_defaults_to_zero() {
        let d1 = Uuid::new_v4();
        let charges = vec![charge(d1, "101", 45000)];

        let items = build_summary_items(&charges, &HashMap::new());

        assert_eq!(items[0].paid_amount, 0);
        assert_eq!(items[0].status, ChargeStatus::Unpaid);
    }

    #[test]
    fn orphan_charge_gets_placeholder_number() {
        // The department was deleted after the charge was issued.
        let d1 = Uuid::new_v4();
        let charges = vec![ChargedDepartment {
            department_id: d1,
            number: None,
            amount: 50000,
        }];

        let items = build_summary_items(&charges, &HashMap::new());

        assert_eq!(items[0].department_number, MISSING_DEPARTMENT_NUMBER);
    }

    #[test]
    fn overpayment_still_classifies_as_paid() {
        let d1 = Uuid::new_v4();
        let charges = vec![charge(d1, "101", 60000)];
        let paid = HashMap::from([(d1, 90000)]);

        let items = build_summary_items(&charges, &paid);

        assert_eq!(items[0].status, ChargeStatus::Paid);
    }

    #[test]
    fn zero_charge_row_is_unpaid() {
        let d1 = Uuid::new_v4();
        let charges = vec![charge(d1, "101", 0)];

        let items = build_summary_items(&charges, &HashMap::new());

        assert_eq!(items[0].status, ChargeStatus::Unpaid);
    }
}
