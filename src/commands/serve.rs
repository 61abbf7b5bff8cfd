//! Serve command implementation.
//!
//! Loads and renders the dashboard once, then serves the immutable page
//! and summary over HTTP. Every worker reads the same shared state, so
//! handlers need no locking.

use super::models::ServeArgs;
use super::render::{load_summary, validate_dashboard_config};
use crate::aggregator::DashboardSummary;
use crate::dashboard::render_dashboard;
use crate::output::summary_to_string;
use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use anyhow::{Context, Result};
use log::info;
use serde_json::json;
use std::net::IpAddr;

/// Shared application state, built once before the server starts
pub struct AppState {
    /// Rendered dashboard page
    pub page: String,
    /// Summary behind the page
    pub summary: DashboardSummary,
    /// Pre-serialized summary for `/api/summary`
    pub summary_json: String,
}

impl AppState {
    /// Pair the rendered page with its serialized summary
    pub fn new(summary: DashboardSummary, page: String) -> Result<Self> {
        let summary_json = summary_to_string(&summary).context("Failed to serialize summary")?;
        Ok(Self {
            page,
            summary,
            summary_json,
        })
    }
}

/// Execute the serve command
///
/// **Public** - main entry point called from main.rs
///
/// Blocks until the server shuts down.
pub fn execute_serve(args: ServeArgs) -> Result<()> {
    validate_dashboard_config(&args.dashboard_config)?;

    let summary = load_summary(&args.input)?;

    info!("Step 4/5: Rendering {:?} layout...", args.dashboard_config.variant);
    let page = render_dashboard(&summary, &args.dashboard_config);
    let state = web::Data::new(AppState::new(summary, page)?);

    let (host, port) = args.bind_address();
    info!("Step 5/5: Starting server on {}:{}", host, port);

    actix_web::rt::System::new()
        .block_on(run_server(state, host, port))
        .with_context(|| format!("Dashboard server on {}:{} failed", host, port))?;

    Ok(())
}

/// Start the HTTP server
///
/// **Public** - the caller provides the async runtime
pub async fn run_server(
    state: web::Data<AppState>,
    host: IpAddr,
    port: u16,
) -> std::io::Result<()> {
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(routes)
    })
    .bind((host, port))?
    .run()
    .await
}

/// Register the dashboard routes
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index)).service(
        web::scope("/api")
            .route("/health", web::get().to(health))
            .route("/summary", web::get().to(summary)),
    );
}

/// `GET /`
async fn index(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(state.page.clone())
}

/// `GET /api/health`
async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "healthy": true,
        "version": env!("CARGO_PKG_VERSION"),
        "events": state.summary.counts.total,
    }))
}

/// `GET /api/summary`
async fn summary(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/json")
        .body(state.summary_json.clone())
}
