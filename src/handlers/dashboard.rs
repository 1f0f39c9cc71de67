//! Attendance dashboard and CSV export handlers.
//!
//! - GET / and GET /dashboard/ - Today's records, optional `q` name filter
//! - GET /export/csv/ - Today's records as a CSV attachment

use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::AppError,
    services::report_service::{self, local_hhmm},
    state::AppState,
    templates,
};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub q: Option<String>,
}

/// Render today's attendance, filtered by a case-insensitive name substring.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardQuery>,
) -> Result<Html<String>, AppError> {
    let date = state.today();
    let dashboard = report_service::dashboard(&state.pool, date, params.q.as_deref()).await?;

    // Clock times are shown in the configured zone, not UTC
    let records: Vec<_> = dashboard
        .records
        .iter()
        .map(|r| {
            json!({
                "employee_name": r.employee_name,
                "employee_id": r.employee_id,
                "national_id": r.national_id,
                "check_in": local_hhmm(r.check_in, state.tz),
                "check_out": local_hhmm(r.check_out, state.tz),
                "hours_worked_us": r.hours_worked_us,
            })
        })
        .collect();

    state.render(
        templates::DASHBOARD,
        &json!({
            "date": dashboard.date,
            "query": dashboard.query,
            "records": records,
            "total_label": dashboard.total_label,
        }),
    )
}

/// Stream today's records as `attendance_<date>.csv`.
pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let date = state.today();
    let body = report_service::export_csv(&state.pool, date, state.tz).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename={}",
                    report_service::csv_file_name(date)
                ),
            ),
        ],
        body,
    ))
}
