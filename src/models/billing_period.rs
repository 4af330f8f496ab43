//! Billing period and department charge models, plus the derived arrears
//! types produced by reconciliation.
//!
//! This module defines:
//! - `BillingPeriod`: one common-fee cycle for one building and month
//! - `DepartmentCharge`: the debt issued to one department for one period
//! - `ChargeStatus`: the derived paid/partial/unpaid classification
//! - Request types for opening a period and flipping its status
//! - `PeriodSummary` / `DepartmentHistoryRow`: the read-model shapes the
//!   reporting layer consumes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display number used for summary rows whose department no longer exists.
///
/// Charges deliberately survive department deletion, so the join back to
/// `departments` can come up empty; the boundary normalizes that to this
/// single placeholder instead of leaking an optional field upward.
pub const MISSING_DEPARTMENT_NUMBER: &str = "N/A";

/// Represents a billing period record from the database.
///
/// # Database Table
///
/// Maps to the `billing_periods` table. The `(building_id, year, month)`
/// tuple is the natural key, backed by a unique constraint; the engine
/// always upserts against it, never blindly inserts.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct BillingPeriod {
    /// Unique identifier for this period
    pub id: Uuid,

    /// Building this cycle belongs to
    pub building_id: Uuid,

    /// Calendar year (>= 2000, enforced at the DTO layer and by CHECK)
    pub year: i32,

    /// Calendar month (1-12)
    pub month: i32,

    /// Per-department common-fee amount set at open time, in pesos
    ///
    /// Reopening a period replaces this value; charges already issued for
    /// OTHER periods are never touched retroactively.
    pub amount: i64,

    /// "open" or "closed"
    ///
    /// Advisory state only: closing a period does not freeze its charges
    /// or the payments that offset them.
    pub status: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Represents a department charge record from the database.
///
/// One row per `(billing_period_id, department_id)` pair, backed by a
/// unique constraint; charge generation is an upsert keyed on that pair.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct DepartmentCharge {
    pub id: Uuid,
    pub billing_period_id: Uuid,
    pub department_id: Uuid,

    /// Amount owed in pesos, copied from the period's amount at generation
    pub amount: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Derived payment status of a charge. Computed, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeStatus {
    Paid,
    Partial,
    Unpaid,
}

impl ChargeStatus {
    /// Classify a charge against the total paid toward it.
    ///
    /// - `Paid` iff the charge is positive and fully covered
    /// - `Partial` iff something was paid but less than the charge
    /// - `Unpaid` otherwise, including the zero-charge/zero-paid edge
    ///
    /// Equality (paid == charge) always resolves to `Paid`, never
    /// `Partial`.
    pub fn classify(charge_amount: i64, paid_amount: i64) -> Self {
        if charge_amount > 0 && paid_amount >= charge_amount {
            ChargeStatus::Paid
        } else if paid_amount > 0 && paid_amount < charge_amount {
            ChargeStatus::Partial
        } else {
            ChargeStatus::Unpaid
        }
    }

    /// Lowercase label, matching the serialized JSON form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargeStatus::Paid => "paid",
            ChargeStatus::Partial => "partial",
            ChargeStatus::Unpaid => "unpaid",
        }
    }
}

/// Request to open (or reopen) a billing period.
///
/// # JSON Example
///
/// ```json
/// {
///   "building_id": "550e8400-e29b-41d4-a716-446655440000",
///   "year": 2025,
///   "month": 3,
///   "amount": 60000
/// }
/// ```
///
/// # Semantics
///
/// One operation covers both cases: if no period exists for
/// `(building_id, year, month)` it is created open with this amount; if one
/// exists (open or closed) its amount is replaced and its status forced
/// back to open. There is no separate "edit amount" operation.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenPeriodRequest {
    pub building_id: Uuid,
    pub year: i32,
    pub month: i32,
    pub amount: i64,
}

impl OpenPeriodRequest {
    /// Validate field ranges before the engine is invoked.
    ///
    /// The engine itself never re-validates or silently coerces these.
    pub fn validate(&self) -> Result<(), String> {
        if self.year < 2000 {
            return Err("year must be >= 2000".to_string());
        }
        if !(1..=12).contains(&self.month) {
            return Err("month must be between 1 and 12".to_string());
        }
        if self.amount < 0 {
            return Err("amount must be >= 0".to_string());
        }
        Ok(())
    }
}

/// Response for the open-period operation.
///
/// `generated` is the number of charge rows upserted (one per current
/// department of the building). A building with no departments yields
/// `generated = 0` plus an advisory `message`; that is a success, not an
/// error.
#[derive(Debug, Serialize)]
pub struct OpenPeriodResponse {
    pub period: BillingPeriod,
    pub generated: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Request to flip a period's status.
#[derive(Debug, Deserialize)]
pub struct SetPeriodStatusRequest {
    /// "open" or "closed"
    pub status: String,
}

impl SetPeriodStatusRequest {
    pub fn validate(&self) -> Result<(), String> {
        match self.status.as_str() {
            "open" | "closed" => Ok(()),
            other => Err(format!("status must be \"open\" or \"closed\", got \"{other}\"")),
        }
    }
}

/// Query parameters for looking a summary up by natural key.
#[derive(Debug, Deserialize)]
pub struct SummaryByMonthQuery {
    pub building_id: Uuid,
    pub year: i32,
    pub month: i32,
}

/// One reconciled charge inside a period summary.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodSummaryItem {
    pub department_id: Uuid,

    /// Display number, or [`MISSING_DEPARTMENT_NUMBER`] if the department
    /// was deleted after the charge was issued
    pub department_number: String,

    pub charge_amount: i64,

    /// Total of common-fee payments inside the period's month, 0 if none
    pub paid_amount: i64,

    pub status: ChargeStatus,
}

/// Reconciled view of one billing period.
///
/// This shape is the stable contract consumed by the CSV projector; field
/// additions are fine, renames and removals are not.
#[derive(Debug, Serialize)]
pub struct PeriodSummary {
    pub id: Uuid,
    pub building_id: Uuid,
    pub year: i32,
    pub month: i32,
    pub status: String,
    pub amount: i64,
    pub items: Vec<PeriodSummaryItem>,
}

/// One (department, period) row of the multi-month arrears trend.
///
/// Produced for every period of the building, even those where the
/// department had no charge (charge_amount 0, status unpaid), so the trend
/// is gapless month over month.
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentHistoryRow {
    pub billing_period_id: Uuid,
    pub year: i32,
    pub month: i32,
    pub period_status: String,
    pub charge_amount: i64,
    pub paid_amount: i64,
    pub status: ChargeStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_covered_charge_is_paid() {
        assert_eq!(ChargeStatus::classify(1000, 1000), ChargeStatus::Paid);
        assert_eq!(ChargeStatus::classify(1000, 1500), ChargeStatus::Paid);
    }

    #[test]
    fn equality_resolves_to_paid_never_partial() {
        // The tie-break rule: exact coverage is paid.
        assert_eq!(ChargeStatus::classify(60000, 60000), ChargeStatus::Paid);
    }

    #[test]
    fn partial_coverage_is_partial() {
        assert_eq!(ChargeStatus::classify(1000, 500), ChargeStatus::Partial);
        assert_eq!(ChargeStatus::classify(1000, 1), ChargeStatus::Partial);
        assert_eq!(ChargeStatus::classify(1000, 999), ChargeStatus::Partial);
    }

    #[test]
    fn nothing_paid_is_unpaid() {
        assert_eq!(ChargeStatus::classify(1000, 0), ChargeStatus::Unpaid);
    }

    #[test]
    fn zero_charge_zero_paid_is_unpaid() {
        assert_eq!(ChargeStatus::classify(0, 0), ChargeStatus::Unpaid);
    }

    #[test]
    fn zero_charge_with_payment_is_unpaid() {
        // paid >= charge but charge is not positive, and paid is not below
        // charge, so neither paid nor partial applies.
        assert_eq!(ChargeStatus::classify(0, 500), ChargeStatus::Unpaid);
    }

    #[test]
    fn open_period_request_bounds() {
        let valid = OpenPeriodRequest {
            building_id: Uuid::new_v4(),
            year: 2025,
            month: 3,
            amount: 60000,
        };
        assert!(valid.validate().is_ok());

        let bad_year = OpenPeriodRequest { year: 1999, ..valid.clone() };
        assert!(bad_year.validate().is_err());

        let bad_month = OpenPeriodRequest { month: 0, ..valid.clone() };
        assert!(bad_month.validate().is_err());

        let bad_month_high = OpenPeriodRequest { month: 13, ..valid.clone() };
        assert!(bad_month_high.validate().is_err());

        let bad_amount = OpenPeriodRequest { amount: -1, ..valid };
        assert!(bad_amount.validate().is_err());
    }

    #[test]
    fn status_request_accepts_only_open_and_closed() {
        assert!(SetPeriodStatusRequest { status: "open".into() }.validate().is_ok());
        assert!(SetPeriodStatusRequest { status: "closed".into() }.validate().is_ok());
        assert!(SetPeriodStatusRequest { status: "frozen".into() }.validate().is_err());
        assert!(SetPeriodStatusRequest { status: "".into() }.validate().is_err());
    }
}
