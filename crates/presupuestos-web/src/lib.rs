//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::budgets: budget page, list panel, form and delete dialogs
//! - components: HTML fragments shared by the routes

pub mod components;
pub mod error;
pub mod routes;

use anyhow::Context;
use axum::{
    routing::{delete, get, post},
    Router,
};
use presupuestos_config::Config;
use presupuestos_core::PageController;
use tokio::net::TcpListener;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub controller: PageController,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::budgets::{
        api_state, htmx_create_form, htmx_create_submit, htmx_delete, htmx_delete_cancel, htmx_delete_confirm,
        htmx_edit_form, htmx_edit_submit, htmx_field_edit, htmx_modal_close, htmx_panel, htmx_reload, page_index,
    };

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/state", get(api_state))
        // HTMX page routes
        .route("/", get(page_index))
        // HTMX partial routes
        .route("/presupuestos/panel", get(htmx_panel))
        .route("/presupuestos/reload", post(htmx_reload))
        .route("/presupuestos/new", get(htmx_create_form).post(htmx_create_submit))
        .route("/presupuestos/form/field", post(htmx_field_edit))
        .route("/presupuestos/modal/close", post(htmx_modal_close))
        .route("/presupuestos/delete/cancel", post(htmx_delete_cancel))
        .route("/presupuestos/:id/edit", get(htmx_edit_form).post(htmx_edit_submit))
        .route("/presupuestos/:id/delete", get(htmx_delete_confirm))
        .route("/presupuestos/:id", delete(htmx_delete))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Presupuestos</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="min-h-screen bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Start the HTTP server
///
/// Binds to the configured host and port and serves until the process stops.
pub async fn start_server(config: Config, controller: PageController) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { controller, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("could not bind {}", addr))?;
    log::info!(target: "presupuestos::web", "Starting presupuestos server on http://{}", addr);
    log::info!(target: "presupuestos::web", "Available routes:");
    log::info!(target: "presupuestos::web", "  - / (Budget page)");
    log::info!(target: "presupuestos::web", "  - /presupuestos/* (HTMX fragments)");
    log::info!(target: "presupuestos::web", "  - /api/health, /api/state (JSON)");

    axum::serve(listener, router).await.context("server error")?;
    log::info!(target: "presupuestos::web", "Server stopped gracefully");
    Ok(())
}

// ==================== Tests ====================
