//! Kiosk handlers: the page showing today's QR code and its raw forms.
//!
//! Every handler makes sure today's session exists first, so opening the
//! kiosk is what mints the day's token.

use axum::{
    extract::State,
    http::{HeaderMap, header},
    response::{Html, IntoResponse},
};
use serde_json::json;

use crate::{error::AppError, qr, services::session_service, state::AppState, templates};

/// `GET /session/new/` - kiosk page with the QR inlined as base64.
pub async fn kiosk_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let session = session_service::get_or_create_session(&state.pool, state.today()).await?;
    let url = state.scan_url(&headers, &session)?;
    let qr_base64 = qr::qr_png_base64(url.as_str())?;

    state.render(
        templates::KIOSK,
        &json!({
            "date": session.date,
            "token": session.token,
            "url": url.as_str(),
            "qr_base64": qr_base64,
        }),
    )
}

/// `GET /session/qr.png` - the QR code as a PNG image.
pub async fn qr_png(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let session = session_service::get_or_create_session(&state.pool, state.today()).await?;
    let url = state.scan_url(&headers, &session)?;
    let png = qr::qr_png(url.as_str())?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

/// `GET /session/qr-url` - the URL encoded in the QR code, as plain text.
pub async fn qr_url(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<String, AppError> {
    let session = session_service::get_or_create_session(&state.pool, state.today()).await?;
    Ok(state.scan_url(&headers, &session)?.to_string())
}
