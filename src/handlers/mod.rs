//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (query string, form body, URL params)
//! 2. Calls into the services for database work
//! 3. Returns an HTML page, a file, or an error response

/// Read-only employee and session listings
pub mod admin;
/// Attendance dashboard and CSV export
pub mod dashboard;
/// Service health endpoint
pub mod health;
/// Kiosk QR pages
pub mod kiosk;
/// Employee scan page
pub mod scan;
