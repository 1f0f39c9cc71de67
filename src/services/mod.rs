//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They own the SQL, the transactions and the state transitions.

pub mod admin_service;
pub mod report_service;
pub mod scan_service;
pub mod session_service;
