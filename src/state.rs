//! Shared application state handed to every handler.

use std::sync::Arc;

use axum::{
    http::{HeaderMap, header},
    response::Html,
};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use handlebars::Handlebars;
use serde::Serialize;
use url::Url;

use crate::{db::DbPool, error::AppError, models::session::AttendanceSession};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub templates: Arc<Handlebars<'static>>,
    /// Zone that defines "today" and local clock times
    pub tz: Tz,
    /// Base for scan URLs; derived from the `Host` header when `None`
    pub public_url: Option<Url>,
}

impl AppState {
    /// Current calendar date in the configured zone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }

    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<Html<String>, AppError> {
        Ok(Html(self.templates.render(template, data)?))
    }

    /// Absolute URL of the scan page for `session`.
    pub fn scan_url(&self, headers: &HeaderMap, session: &AttendanceSession) -> Result<Url, AppError> {
        let base = match &self.public_url {
            Some(base) => base.clone(),
            None => base_from_host(headers)?,
        };
        Ok(base.join(&session.scan_path())?)
    }
}

/// `http://<Host>/`, falling back to `localhost` when the header is absent.
fn base_from_host(headers: &HeaderMap) -> Result<Url, AppError> {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");

    Url::parse(&format!("http://{host}/"))
        .map_err(|_| AppError::InvalidInput(format!("Invalid Host header: {host}")))
}
