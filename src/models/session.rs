//! Kiosk session model.
//!
//! One session exists per calendar date. Its token is embedded in the QR code
//! shown on the kiosk and authorizes scan submissions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Represents a row of the `attendance_sessions` table.
///
/// `date` is unique, so at most one session (and one token) exists per day.
/// Sessions are never deleted; `active = false` is set by an administrator
/// outside the application and stops the token from authorizing scans.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct AttendanceSession {
    pub id: Uuid,

    /// Opaque token embedded in the scan URL
    pub token: Uuid,

    /// Calendar date this session covers (in the configured time zone)
    pub date: NaiveDate,

    pub active: bool,

    pub created_at: DateTime<Utc>,
}

impl AttendanceSession {
    /// Path of the scan page for this session, relative to the site root.
    pub fn scan_path(&self) -> String {
        format!("s/{}/", self.token)
    }
}
