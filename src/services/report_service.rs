//! Read-only projections over the attendance ledger for a single day.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::{
    db::DbPool,
    error::AppError,
    format,
    models::attendance::AttendanceRow,
    validation::{employee_id_for, mask_national_id},
};

/// Header row of the CSV export.
pub const CSV_HEADER: [&str; 7] = [
    "Name",
    "ID (last 5)",
    "CPF",
    "Date",
    "Check-in",
    "Check-out",
    "Worked (min)",
];

/// Dashboard data for one date.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub date: NaiveDate,
    /// Trimmed name filter, empty when unfiltered
    pub query: String,
    pub records: Vec<AttendanceRow>,
    pub total_label: String,
}

/// Records of `date`, joined with their employees and ordered by name.
///
/// `name_filter` is a case-insensitive substring match on the employee name;
/// `%` and `_` in the filter are matched literally.
pub async fn list_records(
    pool: &DbPool,
    date: NaiveDate,
    name_filter: Option<&str>,
) -> Result<Vec<AttendanceRow>, AppError> {
    let pattern = name_filter
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(|q| format!("%{}%", escape_like(q)));

    let rows = sqlx::query_as::<_, AttendanceRow>(
        r#"
        SELECT e.name AS employee_name,
               e.employee_id,
               e.national_id,
               r.date,
               r.check_in,
               r.check_out,
               r.hours_worked_us
        FROM attendance_records r
        JOIN employees e ON e.id = r.employee
        WHERE r.date = $1
          AND ($2::TEXT IS NULL OR e.name ILIKE $2)
        ORDER BY e.name, e.national_id
        "#,
    )
    .bind(date)
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Build the dashboard for `date`, optionally filtered by employee name.
pub async fn dashboard(
    pool: &DbPool,
    date: NaiveDate,
    query: Option<&str>,
) -> Result<Dashboard, AppError> {
    let query = query.map(str::trim).unwrap_or_default().to_string();
    let records = list_records(pool, date, Some(&query)).await?;
    let total_label = format::total_label(records.iter().map(AttendanceRow::hours_worked));

    Ok(Dashboard {
        date,
        query,
        records,
        total_label,
    })
}

/// CSV export of every record of `date`.
pub async fn export_csv(pool: &DbPool, date: NaiveDate, tz: Tz) -> Result<Vec<u8>, AppError> {
    let records = list_records(pool, date, None).await?;
    render_csv(&records, tz)
}

/// Attachment file name for the export of `date`.
pub fn csv_file_name(date: NaiveDate) -> String {
    format!("attendance_{}.csv", date.format("%Y-%m-%d"))
}

/// Render rows as CSV with local `HH:MM` clock times in `tz`.
pub fn render_csv(records: &[AttendanceRow], tz: Tz) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for row in records {
        writer.write_record([
            row.employee_name.clone(),
            employee_id_for(&row.national_id),
            mask_national_id(&row.national_id),
            row.date.format("%Y-%m-%d").to_string(),
            local_hhmm(row.check_in, tz),
            local_hhmm(row.check_out, tz),
            format::whole_minutes(row.hours_worked()).to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Csv(csv::Error::from(e.into_error())))
}

/// `HH:MM` in `tz`, or an empty string when the instant is missing.
pub fn local_hhmm(instant: Option<DateTime<Utc>>, tz: Tz) -> String {
    instant
        .map(|t| t.with_timezone(&tz).format("%H:%M").to_string())
        .unwrap_or_default()
}

pub(crate) fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
