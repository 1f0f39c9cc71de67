//! Read-only administrative listings.
//!
//! - GET /admin/employees/ - Employees, optional `q` search over name, ID and CPF
//! - GET /admin/sessions/ - Kiosk sessions, optional `active=true|false` filter
//!
//! Nothing here writes. Deactivating a session stays a direct update of its
//! `active` column.

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use serde_json::json;

use crate::{error::AppError, services::admin_service, state::AppState, templates};

#[derive(Debug, Deserialize)]
pub struct EmployeeSearch {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SessionFilter {
    pub active: Option<bool>,
}

pub async fn employees(
    State(state): State<AppState>,
    Query(params): Query<EmployeeSearch>,
) -> Result<Html<String>, AppError> {
    let employees = admin_service::search_employees(&state.pool, params.q.as_deref()).await?;

    state.render(
        templates::ADMIN_EMPLOYEES,
        &json!({
            "query": params.q.as_deref().map(str::trim).unwrap_or_default(),
            "employees": employees,
        }),
    )
}

pub async fn sessions(
    State(state): State<AppState>,
    Query(params): Query<SessionFilter>,
) -> Result<Html<String>, AppError> {
    let sessions = admin_service::list_sessions(&state.pool, params.active).await?;

    state.render(
        templates::ADMIN_SESSIONS,
        &json!({
            "active": params.active,
            "sessions": sessions,
        }),
    )
}
