//! Data models representing database entities and API request/response
//! types.

/// API key authentication model
pub mod api_key;
/// Billing period, department charge, and derived arrears models
pub mod billing_period;
/// Building model
pub mod building;
/// Condominium (tenancy root) model
pub mod condominium;
/// Department model
pub mod department;
/// Expense model
pub mod expense;
/// Parking spot model
pub mod parking_spot;
/// Payment (income transaction) model
pub mod payment;
