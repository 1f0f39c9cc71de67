//! Scan page reached from the kiosk QR code.
//!
//! - GET /s/{token}/ - Empty scan form
//! - POST /s/{token}/ - Register a check-in or check-out
//!
//! Unknown, malformed and inactive tokens all answer 404 before the form is
//! looked at. A CPF that does not reduce to 11 digits re-renders the form
//! with the error and writes nothing.

use axum::{
    Form,
    extract::{Path, State},
    response::Html,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::AppError,
    models::attendance::ScanAction,
    services::{report_service::local_hhmm, scan_service, session_service},
    state::AppState,
    templates,
    validation::NationalId,
};

/// Longest accepted employee name.
pub const MAX_NAME_LEN: usize = 120;

/// Submitted scan form. Missing fields deserialize as empty.
#[derive(Debug, Default, Deserialize)]
pub struct ScanForm {
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub name: String,
}

/// A scan form that passed validation.
#[derive(Debug, PartialEq, Eq)]
pub struct ValidScan {
    pub national_id: NationalId,
    /// Trimmed name, `None` when blank
    pub name: Option<String>,
}

impl ScanForm {
    pub fn validate(&self) -> Result<ValidScan, AppError> {
        let national_id = NationalId::parse(&self.cpf)?;

        let name = self.name.trim();
        if name.chars().count() > MAX_NAME_LEN {
            return Err(AppError::InvalidInput(format!(
                "Name must be at most {MAX_NAME_LEN} characters."
            )));
        }

        Ok(ValidScan {
            national_id,
            name: (!name.is_empty()).then(|| name.to_string()),
        })
    }
}

fn action_message(action: ScanAction) -> &'static str {
    match action {
        ScanAction::CheckIn => "Check-in recorded",
        ScanAction::CheckOut => "Check-out recorded",
        ScanAction::AlreadyFinalized => "Attendance already completed today",
    }
}

pub async fn scan_page(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Html<String>, AppError> {
    let token = session_service::parse_token(&token)?;
    let session = session_service::resolve_session_by_token(&state.pool, token).await?;

    state.render(templates::SCAN, &json!({ "date": session.date }))
}

pub async fn submit_scan(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Form(form): Form<ScanForm>,
) -> Result<Html<String>, AppError> {
    let token = session_service::parse_token(&token)?;
    let session = session_service::resolve_session_by_token(&state.pool, token).await?;

    let scan = match form.validate() {
        Ok(scan) => scan,
        Err(AppError::InvalidInput(message)) => {
            return state.render(
                templates::SCAN,
                &json!({
                    "date": session.date,
                    "error": message,
                    "cpf": form.cpf,
                    "name": form.name,
                }),
            );
        }
        Err(e) => return Err(e),
    };

    let outcome = scan_service::record_scan(
        &state.pool,
        &session,
        &scan.national_id,
        scan.name.as_deref(),
        chrono::Utc::now(),
    )
    .await?;

    state.render(
        templates::SCAN,
        &json!({
            "date": session.date,
            "success": true,
            "action": outcome.action,
            "action_message": action_message(outcome.action),
            "employee_name": outcome.employee.name,
            "employee_id": outcome.employee.employee_id,
            "check_in": local_hhmm(outcome.record.check_in, state.tz),
            "check_out": local_hhmm(outcome.record.check_out, state.tz),
            "hours_worked_us": outcome.record.hours_worked_us,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(cpf: &str, name: &str) -> ScanForm {
        ScanForm {
            cpf: cpf.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn valid_form_normalizes_cpf_and_trims_name() {
        let scan = form("123.456.789-01", "  Ana ").validate().unwrap();
        assert_eq!(scan.national_id.as_str(), "12345678901");
        assert_eq!(scan.name.as_deref(), Some("Ana"));

        let scan = form("12345678901", "   ").validate().unwrap();
        assert_eq!(scan.name, None);
    }

    #[test]
    fn short_cpf_is_rejected_with_message() {
        match form("123", "Ana").validate() {
            Err(AppError::InvalidInput(msg)) => assert_eq!(msg, "CPF must contain 11 digits."),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(ScanForm::default().validate().is_err());
    }

    #[test]
    fn overlong_name_is_rejected() {
        let name = "a".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            form("12345678901", &name).validate(),
            Err(AppError::InvalidInput(_))
        ));
        let name = "é".repeat(MAX_NAME_LEN);
        assert!(form("12345678901", &name).validate().is_ok());
    }
}
