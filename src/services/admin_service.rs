//! Read-only administrative listings of employees and kiosk sessions.

use crate::{
    db::DbPool,
    error::AppError,
    models::{employee::Employee, session::AttendanceSession},
    services::report_service::escape_like,
    validation::only_digits,
};

/// Employees whose name or employee ID contains `query` (case-insensitive),
/// or whose CPF contains the digits of `query`. Ordered by name.
pub async fn search_employees(
    pool: &DbPool,
    query: Option<&str>,
) -> Result<Vec<Employee>, AppError> {
    let query = query.map(str::trim).filter(|q| !q.is_empty());
    let pattern = query.map(|q| format!("%{}%", escape_like(q)));
    // A CPF typed with separators still matches the stored digits
    let digits = query
        .map(only_digits)
        .filter(|d| !d.is_empty())
        .map(|d| format!("%{d}%"));

    let employees = sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, name, employee_id, national_id
        FROM employees
        WHERE $1::TEXT IS NULL
           OR name ILIKE $1
           OR employee_id ILIKE $1
           OR national_id LIKE $2
        ORDER BY name, national_id
        "#,
    )
    .bind(pattern)
    .bind(digits)
    .fetch_all(pool)
    .await?;

    Ok(employees)
}

/// Kiosk sessions, newest date first, optionally only active or inactive ones.
pub async fn list_sessions(
    pool: &DbPool,
    active: Option<bool>,
) -> Result<Vec<AttendanceSession>, AppError> {
    let sessions = sqlx::query_as::<_, AttendanceSession>(
        r#"
        SELECT id, token, date, active, created_at
        FROM attendance_sessions
        WHERE $1::BOOLEAN IS NULL OR active = $1
        ORDER BY date DESC
        "#,
    )
    .bind(active)
    .fetch_all(pool)
    .await?;

    Ok(sessions)
}
