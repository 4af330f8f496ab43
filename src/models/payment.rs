//! Payment data models and API request/response types.
//!
//! A payment is an income transaction recorded against one department of a
//! building. Only payments tagged with [`COMMON_FEE_INCOME_TYPE`] offset a
//! department charge during arrears reconciliation; the match is an exact
//! string comparison on the tag, not a foreign key.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Income-type tag that makes a payment eligible to offset a department
/// charge. Payments carrying any other tag are ignored by the arrears
/// reconciliation and only show up in the cash-basis balance.
pub const COMMON_FEE_INCOME_TYPE: &str = "gasto_comun";

/// Represents a payment record from the database.
///
/// # Amount Storage
///
/// `amount` is stored as `i64` Chilean pesos to avoid floating-point
/// precision issues.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Payment {
    pub id: Uuid,

    /// Building the payment was received in
    pub building_id: Uuid,

    /// Department the payment is attributed to
    pub department_id: Uuid,

    /// Date the payment was made (not the date it was recorded)
    pub date: NaiveDate,

    /// Amount in pesos
    pub amount: i64,

    /// Free-text income tag (e.g. "gasto_comun", "multa", "arriendo_espacio")
    pub income_type: String,

    pub description: String,

    /// How the payment was made (e.g. "transferencia", "efectivo", "cheque")
    pub payment_method: String,

    /// Receipt or transfer document number, if any
    pub document_number: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for recording a payment.
///
/// # JSON Example
///
/// ```json
/// {
///   "building_id": "550e8400-e29b-41d4-a716-446655440000",
///   "department_id": "660e8400-e29b-41d4-a716-446655440001",
///   "date": "2025-03-15",
///   "amount": 60000,
///   "income_type": "gasto_comun",
///   "description": "Gasto común marzo",
///   "payment_method": "transferencia",
///   "document_number": "TRX-8841"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub building_id: Uuid,
    pub department_id: Uuid,
    pub date: NaiveDate,
    pub amount: i64,
    pub income_type: String,
    #[serde(default)]
    pub description: String,
    pub payment_method: String,
    pub document_number: Option<String>,
}

impl CreatePaymentRequest {
    /// Validate amount bounds before the row is written.
    pub fn validate(&self) -> Result<(), String> {
        if self.amount < 0 {
            return Err("amount must be >= 0".to_string());
        }
        if self.income_type.trim().is_empty() {
            return Err("income_type must not be empty".to_string());
        }
        Ok(())
    }
}

/// Request body for updating a payment.
#[derive(Debug, Deserialize)]
pub struct UpdatePaymentRequest {
    pub date: NaiveDate,
    pub amount: i64,
    pub income_type: String,
    #[serde(default)]
    pub description: String,
    pub payment_method: String,
    pub document_number: Option<String>,
}

impl UpdatePaymentRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.amount < 0 {
            return Err("amount must be >= 0".to_string());
        }
        if self.income_type.trim().is_empty() {
            return Err("income_type must not be empty".to_string());
        }
        Ok(())
    }
}

/// Query parameters for listing payments.
#[derive(Debug, Deserialize)]
pub struct ListPaymentsQuery {
    pub building_id: Uuid,

    /// Restrict to one department
    pub department_id: Option<Uuid>,

    /// Inclusive lower date bound
    pub date_from: Option<NaiveDate>,

    /// Inclusive upper date bound
    pub date_to: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_rejects_negative_amount() {
        let request = CreatePaymentRequest {
            building_id: Uuid::new_v4(),
            department_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            amount: -1,
            income_type: COMMON_FEE_INCOME_TYPE.to_string(),
            description: String::new(),
            payment_method: "transferencia".to_string(),
            document_number: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn create_request_rejects_blank_income_type() {
        let request = CreatePaymentRequest {
            building_id: Uuid::new_v4(),
            department_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            amount: 60000,
            income_type: "  ".to_string(),
            description: String::new(),
            payment_method: "transferencia".to_string(),
            document_number: None,
        };
        assert!(request.validate().is_err());
    }
}
