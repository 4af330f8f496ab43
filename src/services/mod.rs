//! Business logic services.
//!
//! Services contain the domain logic separated from HTTP handlers: the
//! billing period engine, arrears reconciliation, the cash-basis balance,
//! the CSV projector, and the tenancy guard they all consult.

pub mod arrears_service;
pub mod balance_service;
pub mod billing_service;
pub mod report_service;
pub mod tenancy;
