//! Scan handling - core attendance logic.
//!
//! A scan resolves (or creates) the employee by CPF, resolves (or creates)
//! the employee's record for the session date, and advances the record's
//! check-in/check-out state.
//!
//! # Atomicity Guarantees
//!
//! The employee upsert, the record upsert and the transition run in one
//! PostgreSQL transaction. Both rows are read with `FOR UPDATE`, so two
//! simultaneous scans of the same badge are serialized: the second one sees
//! the first one's check-in and records a check-out instead of a second
//! check-in.

use chrono::{DateTime, SubsecRound, Utc};
use sqlx::{Postgres, Transaction};

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        attendance::{AttendanceRecord, ScanAction},
        employee::{self, Employee},
        session::AttendanceSession,
    },
    validation::NationalId,
};

/// Result of a committed scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub action: ScanAction,
    pub employee: Employee,
    pub record: AttendanceRecord,
}

/// Execute a scan for `national_id` against `session` at instant `now`.
///
/// # Process
///
/// 1. Start database transaction
/// 2. Re-check that the session is still active, holding a share lock on it
/// 3. Upsert and lock the employee, repairing drifted fields
/// 4. Upsert and lock the record for (employee, session date)
/// 5. Apply the transition and persist the record
/// 6. Commit (or rollback on error)
///
/// `now` is truncated to microseconds, the precision PostgreSQL stores, so
/// the persisted worked duration matches the persisted timestamps exactly.
///
/// # Errors
///
/// - `SessionInvalid`: the session was deactivated or deleted after the
///   caller resolved it; nothing is written
pub async fn record_scan(
    pool: &DbPool,
    session: &AttendanceSession,
    national_id: &NationalId,
    name: Option<&str>,
    now: DateTime<Utc>,
) -> Result<ScanOutcome, AppError> {
    let now = now.trunc_subsecs(6);

    let mut tx = pool.begin().await?;

    lock_active_session(&mut tx, session).await?;

    let employee = upsert_employee(&mut tx, national_id, name).await?;
    let mut record = lock_record(&mut tx, &employee, session).await?;

    let action = record.apply_scan(now, session.id);

    sqlx::query(
        r#"
        UPDATE attendance_records
        SET check_in = $1,
            check_out = $2,
            hours_worked_us = $3,
            session = $4
        WHERE id = $5
        "#,
    )
    .bind(record.check_in)
    .bind(record.check_out)
    .bind(record.hours_worked_us)
    .bind(record.session)
    .bind(record.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        employee_id = %employee.employee_id,
        date = %record.date,
        action = action.as_str(),
        "Scan recorded"
    );

    Ok(ScanOutcome {
        action,
        employee,
        record,
    })
}

/// Share-lock the session row so a concurrent deactivation waits for this
/// scan to commit, and fail if it is no longer active.
async fn lock_active_session(
    tx: &mut Transaction<'_, Postgres>,
    session: &AttendanceSession,
) -> Result<(), AppError> {
    let active: Option<bool> = sqlx::query_scalar(
        r#"
        SELECT active
        FROM attendance_sessions
        WHERE id = $1
        FOR SHARE
        "#,
    )
    .bind(session.id)
    .fetch_optional(&mut **tx)
    .await?;

    match active {
        Some(true) => Ok(()),
        _ => {
            tracing::warn!(session = %session.id, "Scan rejected: session no longer active");
            Err(AppError::SessionInvalid)
        }
    }
}

/// Fetch the employee with this CPF, creating it if needed, and lock the row.
async fn upsert_employee(
    tx: &mut Transaction<'_, Postgres>,
    national_id: &NationalId,
    name: Option<&str>,
) -> Result<Employee, AppError> {
    let inserted = sqlx::query(
        r#"
        INSERT INTO employees (name, employee_id, national_id)
        VALUES ($1, $2, $3)
        ON CONFLICT (national_id) DO NOTHING
        "#,
    )
    .bind(employee::initial_name(name))
    .bind(national_id.employee_id())
    .bind(national_id.as_str())
    .execute(&mut **tx)
    .await?
    .rows_affected();

    let mut employee = sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, name, employee_id, national_id
        FROM employees
        WHERE national_id = $1
        FOR UPDATE
        "#,
    )
    .bind(national_id.as_str())
    .fetch_one(&mut **tx)
    .await?;

    if inserted == 1 {
        tracing::info!(employee_id = %employee.employee_id, "Employee created");
        return Ok(employee);
    }

    if let Some(update) = employee::reconcile(&employee, name) {
        sqlx::query("UPDATE employees SET name = $1, employee_id = $2 WHERE id = $3")
            .bind(&update.name)
            .bind(&update.employee_id)
            .bind(employee.id)
            .execute(&mut **tx)
            .await?;

        employee.name = update.name;
        employee.employee_id = update.employee_id;
    }

    Ok(employee)
}

/// Fetch the employee's record for the session date, creating it linked to
/// the session if needed, and lock the row.
async fn lock_record(
    tx: &mut Transaction<'_, Postgres>,
    employee: &Employee,
    session: &AttendanceSession,
) -> Result<AttendanceRecord, AppError> {
    sqlx::query(
        r#"
        INSERT INTO attendance_records (employee, date, session)
        VALUES ($1, $2, $3)
        ON CONFLICT (employee, date) DO NOTHING
        "#,
    )
    .bind(employee.id)
    .bind(session.date)
    .bind(session.id)
    .execute(&mut **tx)
    .await?;

    let record = sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT id, employee, date, check_in, check_out, hours_worked_us, session
        FROM attendance_records
        WHERE employee = $1 AND date = $2
        FOR UPDATE
        "#,
    )
    .bind(employee.id)
    .bind(session.date)
    .fetch_one(&mut **tx)
    .await?;

    Ok(record)
}
