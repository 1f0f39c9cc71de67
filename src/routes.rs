//! Route table.

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{error::AppError, handlers, state::AppState};

/// Build the HTTP router. Paths keep their trailing slashes.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Reporting
        .route("/", get(handlers::dashboard::dashboard))
        .route("/dashboard/", get(handlers::dashboard::dashboard))
        .route("/export/csv/", get(handlers::dashboard::export_csv))
        // Kiosk
        .route("/session/new/", get(handlers::kiosk::kiosk_page))
        .route("/session/qr.png", get(handlers::kiosk::qr_png))
        .route("/session/qr-url", get(handlers::kiosk::qr_url))
        // Scanning
        .route(
            "/s/{token}/",
            get(handlers::scan::scan_page).post(handlers::scan::submit_scan),
        )
        // Administration (read-only)
        .route("/admin/employees/", get(handlers::admin::employees))
        .route("/admin/sessions/", get(handlers::admin::sessions))
        .route("/health", get(handlers::health::health_check))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::DbPool, services::session_service, templates};
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state(pool: DbPool) -> AppState {
        AppState {
            pool,
            templates: Arc::new(templates::registry().unwrap()),
            tz: chrono_tz::America::Sao_Paulo,
            public_url: None,
        }
    }

    /// A pool that never connects; only usable for paths that fail before
    /// touching the database.
    fn offline_state() -> AppState {
        state(
            sqlx::postgres::PgPoolOptions::new()
                .connect_lazy("postgres://localhost/unused")
                .unwrap(),
        )
    }

    fn scan_post(token: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/s/{token}/"))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn malformed_token_is_not_found() {
        let app = router(offline_state());

        let response = app
            .clone()
            .oneshot(Request::get("/s/not-a-token/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("session_invalid"));

        let response = app
            .oneshot(scan_post("not-a-token", "cpf=12345678901&name=Ana"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let response = router(offline_state())
            .oneshot(Request::get("/admin/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("not_found"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn short_cpf_rerenders_form_and_writes_nothing(pool: DbPool) {
        let app = state(pool.clone());
        let session = session_service::get_or_create_session(&pool, app.today())
            .await
            .unwrap();

        let response = router(app)
            .oneshot(scan_post(&session.token.to_string(), "cpf=123&name=Ana"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("CPF must contain 11 digits."));

        let employees: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&pool)
            .await
            .unwrap();
        let records: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance_records")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!((employees, records), (0, 0));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn scan_then_export(pool: DbPool) {
        let app = router(state(pool.clone()));

        let response = app
            .clone()
            .oneshot(
                Request::get("/session/qr-url")
                    .header(header::HOST, "kiosk.local")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let url = body_text(response).await;
        let token = url
            .strip_prefix("http://kiosk.local/s/")
            .and_then(|rest| rest.strip_suffix('/'))
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(scan_post(&token, "cpf=123.456.789-01&name=Ana"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("data-action=\"check-in\""));

        let response = app
            .clone()
            .oneshot(Request::get("/export/csv/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=attendance_"));
        let csv = body_text(response).await;
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("Ana,78901,123.456.789-01,"));
        assert!(lines[1].ends_with(",,0"));

        let response = app
            .oneshot(Request::get("/dashboard/?q=an").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("<td>Ana</td>"));
        assert!(html.contains("0h 0min"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn admin_listings_show_scanned_employee_and_session(pool: DbPool) {
        let app = state(pool.clone());
        let session = session_service::get_or_create_session(&pool, app.today())
            .await
            .unwrap();
        let app = router(app);

        let response = app
            .clone()
            .oneshot(scan_post(&session.token.to_string(), "cpf=123.456.789-01&name=Ana"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(Request::get("/admin/employees/?q=789-01").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<td>Ana</td>"));
        assert!(html.contains("123.456.789-01"));

        let response = app
            .clone()
            .oneshot(Request::get("/admin/employees/?q=nobody").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(body_text(response).await.contains("No employees found."));

        let response = app
            .oneshot(Request::get("/admin/sessions/?active=true").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(&session.token.to_string()));
        assert!(html.contains("<td>active</td>"));
    }
}
