//! Session registry: one kiosk session per calendar date.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{db::DbPool, error::AppError, models::session::AttendanceSession};

/// Fetch the session for `date`, creating it with a fresh token if missing.
///
/// A single upsert statement: when two requests race, the unique constraint
/// on `date` turns the loser's insert into a no-op update of the existing row,
/// so both receive the same session and token.
pub async fn get_or_create_session(
    pool: &DbPool,
    date: NaiveDate,
) -> Result<AttendanceSession, AppError> {
    let token = Uuid::new_v4();

    let session = sqlx::query_as::<_, AttendanceSession>(
        r#"
        INSERT INTO attendance_sessions (token, date, active)
        VALUES ($1, $2, true)
        ON CONFLICT (date) DO UPDATE SET date = EXCLUDED.date
        RETURNING id, token, date, active, created_at
        "#,
    )
    .bind(token)
    .bind(date)
    .fetch_one(pool)
    .await?;

    if session.token == token {
        tracing::info!("Created attendance session for {}", date);
    }

    Ok(session)
}

/// Look up an active session by its token.
///
/// # Errors
///
/// - `SessionInvalid`: no session has this token, or it has been deactivated
pub async fn resolve_session_by_token(
    pool: &DbPool,
    token: Uuid,
) -> Result<AttendanceSession, AppError> {
    sqlx::query_as::<_, AttendanceSession>(
        r#"
        SELECT id, token, date, active, created_at
        FROM attendance_sessions
        WHERE token = $1 AND active = true
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::SessionInvalid)
}

/// Parse a token taken from a URL path. Malformed tokens are treated like
/// unknown ones.
pub fn parse_token(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::SessionInvalid)
}
