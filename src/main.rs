//! Attendance Kiosk - Main Application Entry Point
//!
//! Employees scan the day's QR code shown on a kiosk and submit their CPF to
//! register check-in and check-out. An administrator follows the day on a
//! dashboard and exports it as CSV.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries, migrations)
//! - **Pages**: Handlebars templates compiled into the binary
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

mod config;
mod db;
mod error;
mod format;
mod handlers;
mod models;
mod qr;
mod routes;
mod services;
mod state;
mod templates;
mod validation;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG (defaults to "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    let tz = config.tz()?;
    tracing::info!("Configuration loaded (time zone {})", tz);

    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let state = state::AppState {
        pool,
        templates: Arc::new(templates::registry()?),
        tz,
        public_url: config.public_base()?,
    };

    let app = routes::router(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
