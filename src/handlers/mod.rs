//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Performs tenancy checks and business logic
//! 3. Returns an HTTP response (JSON, status code)

/// Billing period, arrears, balance, and CSV export endpoints
pub mod billing;
/// Building CRUD endpoints
pub mod buildings;
/// Condominium CRUD endpoints
pub mod condominiums;
/// Department CRUD endpoints
pub mod departments;
/// Expense CRUD endpoints
pub mod expenses;
/// Health check endpoint
pub mod health;
/// Parking spot CRUD endpoints
pub mod parking_spots;
/// Payment CRUD endpoints
pub mod payments;
