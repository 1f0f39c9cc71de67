//! Attendance records and the check-in/check-out state machine.
//!
//! # States
//!
//! - `NotStarted`: no record for (employee, date) yet, or a record without check-in
//! - `CheckedIn`: `check_in` set, `check_out` null
//! - `Completed`: both timestamps set
//!
//! A scan moves `NotStarted → CheckedIn → Completed`; scanning a completed
//! record changes nothing.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Represents a row of the `attendance_records` table.
///
/// `hours_worked_us` is derived: it is recomputed by [`recompute_hours`]
/// before every write and never set on its own.
///
/// [`recompute_hours`]: AttendanceRecord::recompute_hours
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct AttendanceRecord {
    pub id: Uuid,

    /// Owning employee (`employees.id`)
    pub employee: Uuid,

    pub date: NaiveDate,

    pub check_in: Option<DateTime<Utc>>,

    pub check_out: Option<DateTime<Utc>>,

    /// Worked duration in microseconds
    pub hours_worked_us: i64,

    /// Session that last wrote this record; nulled if the session is deleted
    pub session: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceState {
    NotStarted,
    CheckedIn,
    Completed,
}

/// What a single scan did to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanAction {
    #[serde(rename = "check-in")]
    CheckIn,
    #[serde(rename = "check-out")]
    CheckOut,
    #[serde(rename = "already-finalized")]
    AlreadyFinalized,
}

impl ScanAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanAction::CheckIn => "check-in",
            ScanAction::CheckOut => "check-out",
            ScanAction::AlreadyFinalized => "already-finalized",
        }
    }
}

/// Worked duration for a pair of timestamps; zero unless both are present.
///
/// Negative when `check_out` precedes `check_in`.
pub fn worked_between(check_in: Option<DateTime<Utc>>, check_out: Option<DateTime<Utc>>) -> TimeDelta {
    match (check_in, check_out) {
        (Some(start), Some(end)) => end - start,
        _ => TimeDelta::zero(),
    }
}

impl AttendanceRecord {
    pub fn state(&self) -> AttendanceState {
        match (self.check_in, self.check_out) {
            (None, _) => AttendanceState::NotStarted,
            (Some(_), None) => AttendanceState::CheckedIn,
            (Some(_), Some(_)) => AttendanceState::Completed,
        }
    }

    pub fn hours_worked(&self) -> TimeDelta {
        TimeDelta::microseconds(self.hours_worked_us)
    }

    /// Re-derive `hours_worked_us` from the timestamps.
    pub fn recompute_hours(&mut self) {
        self.hours_worked_us = worked_between(self.check_in, self.check_out)
            .num_microseconds()
            .unwrap_or(i64::MAX);
    }

    /// Apply one scan at `now` on behalf of `session`.
    ///
    /// The session reference is overwritten on every scan, including the
    /// no-op on a completed record, and the worked duration is recomputed.
    pub fn apply_scan(&mut self, now: DateTime<Utc>, session: Uuid) -> ScanAction {
        let action = match self.state() {
            AttendanceState::NotStarted => {
                self.check_in = Some(now);
                ScanAction::CheckIn
            }
            AttendanceState::CheckedIn => {
                self.check_out = Some(now);
                ScanAction::CheckOut
            }
            AttendanceState::Completed => ScanAction::AlreadyFinalized,
        };

        self.session = Some(session);
        self.recompute_hours();
        action
    }
}

/// An attendance record joined with its employee, as listed by reports.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct AttendanceRow {
    pub employee_name: String,
    pub employee_id: String,
    pub national_id: String,
    pub date: NaiveDate,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub hours_worked_us: i64,
}

impl AttendanceRow {
    pub fn hours_worked(&self) -> TimeDelta {
        TimeDelta::microseconds(self.hours_worked_us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fresh_record() -> AttendanceRecord {
        AttendanceRecord {
            id: Uuid::new_v4(),
            employee: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            check_in: None,
            check_out: None,
            hours_worked_us: 0,
            session: None,
        }
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, h, m, s).unwrap()
    }

    #[test]
    fn three_scans_walk_the_state_machine() {
        let session = Uuid::new_v4();
        let mut record = fresh_record();
        assert_eq!(record.state(), AttendanceState::NotStarted);

        assert_eq!(record.apply_scan(at(8, 0, 0), session), ScanAction::CheckIn);
        assert_eq!(record.state(), AttendanceState::CheckedIn);
        assert_eq!(record.check_in, Some(at(8, 0, 0)));
        assert_eq!(record.check_out, None);
        assert_eq!(record.hours_worked(), TimeDelta::zero());

        assert_eq!(record.apply_scan(at(17, 30, 15), session), ScanAction::CheckOut);
        assert_eq!(record.state(), AttendanceState::Completed);
        assert_eq!(record.check_out, Some(at(17, 30, 15)));
        assert_eq!(
            record.hours_worked(),
            TimeDelta::hours(9) + TimeDelta::minutes(30) + TimeDelta::seconds(15)
        );

        let before = record.clone();
        assert_eq!(
            record.apply_scan(at(18, 0, 0), session),
            ScanAction::AlreadyFinalized
        );
        assert_eq!(record, before);
    }

    #[test]
    fn every_scan_overwrites_the_session() {
        let mut record = fresh_record();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        record.apply_scan(at(8, 0, 0), first);
        assert_eq!(record.session, Some(first));
        record.apply_scan(at(9, 0, 0), second);
        assert_eq!(record.session, Some(second));
    }

    #[test]
    fn hours_worked_is_zero_unless_both_timestamps_present() {
        let mut record = fresh_record();
        record.hours_worked_us = 42;
        record.recompute_hours();
        assert_eq!(record.hours_worked_us, 0);

        record.check_out = Some(at(12, 0, 0));
        record.recompute_hours();
        assert_eq!(record.hours_worked_us, 0);

        record.check_in = Some(at(11, 0, 0));
        record.recompute_hours();
        assert_eq!(record.hours_worked(), TimeDelta::hours(1));
    }

    #[test]
    fn check_out_before_check_in_is_negative() {
        let mut record = fresh_record();
        record.apply_scan(at(11, 0, 0), Uuid::new_v4());
        assert_eq!(
            record.apply_scan(at(10, 59, 59), Uuid::new_v4()),
            ScanAction::CheckOut
        );
        assert_eq!(record.state(), AttendanceState::Completed);
        assert_eq!(record.hours_worked(), TimeDelta::seconds(-1));
    }

    #[test]
    fn action_labels() {
        assert_eq!(ScanAction::CheckIn.as_str(), "check-in");
        assert_eq!(ScanAction::CheckOut.as_str(), "check-out");
        assert_eq!(ScanAction::AlreadyFinalized.as_str(), "already-finalized");
        assert_eq!(
            serde_json::to_string(&ScanAction::AlreadyFinalized).unwrap(),
            "\"already-finalized\""
        );
    }
}
