//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables.

/// Per-day attendance record and the scan state machine
pub mod attendance;
/// Employee identity model
pub mod employee;
/// Kiosk session model
pub mod session;
