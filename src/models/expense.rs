//! Expense data models and API request/response types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents an expense record from the database.
///
/// Expenses are outflows of a building (maintenance, utilities, staff).
/// They participate only in the cash-basis monthly balance, never in
/// arrears reconciliation.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Expense {
    pub id: Uuid,
    pub building_id: Uuid,
    pub date: NaiveDate,

    /// Amount in pesos
    pub amount: i64,

    /// Free-text expense tag (e.g. "mantencion", "luz", "agua")
    pub expense_type: String,

    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for recording an expense.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub building_id: Uuid,
    pub date: NaiveDate,
    pub amount: i64,
    pub expense_type: String,
    #[serde(default)]
    pub description: String,
}

impl CreateExpenseRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.amount < 0 {
            return Err("amount must be >= 0".to_string());
        }
        Ok(())
    }
}

/// Request body for updating an expense.
#[derive(Debug, Deserialize)]
pub struct UpdateExpenseRequest {
    pub date: NaiveDate,
    pub amount: i64,
    pub expense_type: String,
    #[serde(default)]
    pub description: String,
}

impl UpdateExpenseRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.amount < 0 {
            return Err("amount must be >= 0".to_string());
        }
        Ok(())
    }
}

/// Query parameters for listing expenses.
#[derive(Debug, Deserialize)]
pub struct ListExpensesQuery {
    pub building_id: Uuid,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}
