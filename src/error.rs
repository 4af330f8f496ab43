//! Error types and HTTP error response handling.
//!
//! All application errors live in one enum and convert into HTTP responses
//! with an appropriate status code and a JSON body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Database errors**: any `sqlx::Error` from store operations; these
///   propagate unchanged to this boundary (no retries, no swallowing) and
///   are hidden behind a generic message in the response body
/// - **Authentication errors**: missing or invalid API key
/// - **Tenancy errors**: the authenticated user is not a member of the
///   condominium that owns the touched record
/// - **Resource errors**: the requested record does not exist
/// - **Validation errors**: malformed request data, rejected before any
///   service is invoked
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Store operation failed (connection error, constraint violation, ...).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// API key is missing, invalid, or inactive.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid API key")]
    InvalidApiKey,

    /// The tenancy check failed: the user may not act on this condominium.
    ///
    /// Returns HTTP 403 Forbidden.
    #[error("Access to this condominium is forbidden")]
    Forbidden,

    /// Requested condominium does not exist.
    #[error("Condominium not found")]
    CondominiumNotFound,

    /// Requested building does not exist.
    #[error("Building not found")]
    BuildingNotFound,

    /// Requested department does not exist.
    #[error("Department not found")]
    DepartmentNotFound,

    /// Requested parking spot does not exist.
    #[error("Parking spot not found")]
    ParkingSpotNotFound,

    /// Requested payment does not exist.
    #[error("Payment not found")]
    PaymentNotFound,

    /// Requested expense does not exist.
    #[error("Expense not found")]
    ExpenseNotFound,

    /// No billing period exists for the requested id or (building, year,
    /// month) tuple.
    ///
    /// Distinct from a period that exists with zero charges, which is a
    /// normal 200 response.
    #[error("Billing period not found")]
    PeriodNotFound,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request with details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),
}

/// Convert `AppError` into an HTTP response.
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::InvalidApiKey => (
                StatusCode::UNAUTHORIZED,
                "invalid_api_key",
                self.to_string(),
            ),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden", self.to_string()),
            AppError::CondominiumNotFound => (
                StatusCode::NOT_FOUND,
                "condominium_not_found",
                self.to_string(),
            ),
            AppError::BuildingNotFound => (
                StatusCode::NOT_FOUND,
                "building_not_found",
                self.to_string(),
            ),
            AppError::DepartmentNotFound => (
                StatusCode::NOT_FOUND,
                "department_not_found",
                self.to_string(),
            ),
            AppError::ParkingSpotNotFound => (
                StatusCode::NOT_FOUND,
                "parking_spot_not_found",
                self.to_string(),
            ),
            AppError::PaymentNotFound => {
                (StatusCode::NOT_FOUND, "payment_not_found", self.to_string())
            }
            AppError::ExpenseNotFound => {
                (StatusCode::NOT_FOUND, "expense_not_found", self.to_string())
            }
            AppError::PeriodNotFound => (
                StatusCode::NOT_FOUND,
                "billing_period_not_found",
                self.to_string(),
            ),
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
