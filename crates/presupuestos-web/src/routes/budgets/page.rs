//! Budget page rendering - full page and read-mostly HTMX fragments
//!
//! Endpoints:
//! - page_index: Full page; the panel loads itself on arrival
//! - htmx_panel: List panel for a page/size (HTML fragment)
//! - htmx_create_form: Empty create dialog (HTML fragment)
//! - htmx_edit_form: Prefilled edit dialog (HTML fragment)
//! - htmx_delete_confirm: Delete confirmation dialog (HTML fragment)

use crate::components::{budget_panel, budget_panel_oob, confirm_dialog, form_modal, loading_indicator, MODAL_ID, PANEL_ID};
use crate::{ApiError, AppState};
use axum::extract::{Path, Query, State};
use axum::response::Html;
use std::collections::HashMap;

/// Budget page
pub async fn page_index(state: State<AppState>) -> Html<String> {
    let snapshot = state.controller.snapshot().await;
    let modal = snapshot
        .modal
        .as_ref()
        .map(|m| form_modal(m, &state.config.currency, snapshot.action_in_progress, snapshot.error.as_deref()))
        .unwrap_or_default();

    let content = format!(
        r#"<div class='max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8'>
    <div class='mb-8'>
        <h1 class='text-3xl font-bold text-gray-900 mb-2'>Gestión de Presupuestos</h1>
        <p class='text-gray-600'>Administra los presupuestos de tu organización</p>
    </div>
    <div id='{panel}'>{loading}</div>
    <div hx-post='/presupuestos/reload' hx-trigger='load' hx-target='#{panel}' hx-swap='outerHTML'></div>
    <div id='{modal_id}'>{modal}</div>
</div>"#,
        panel = PANEL_ID,
        loading = loading_indicator(),
        modal_id = MODAL_ID,
        modal = modal
    );

    Html(crate::base_html("Presupuestos", &content))
}

/// HTMX: list panel for `?page=&size=`
pub async fn htmx_panel(state: State<AppState>, params: Query<HashMap<String, String>>) -> Html<String> {
    let page = params.get("page").and_then(|s| s.parse().ok()).unwrap_or(1);
    let size = params
        .get("size")
        .and_then(|s| s.parse().ok())
        .unwrap_or(state.config.pagination.page_size);

    let snapshot = state.controller.snapshot().await;
    Html(budget_panel(&snapshot, &state.config, page, size))
}

/// HTMX: open the create dialog
pub async fn htmx_create_form(state: State<AppState>) -> Html<String> {
    state.controller.open_create().await;
    let snapshot = state.controller.snapshot().await;
    let html = snapshot
        .modal
        .as_ref()
        .map(|m| form_modal(m, &state.config.currency, snapshot.action_in_progress, None))
        .unwrap_or_default();
    Html(html)
}

/// HTMX: open the edit dialog; on failure the dialog stays closed and the
/// panel shows the error
pub async fn htmx_edit_form(state: State<AppState>, path: Path<String>) -> Html<String> {
    let id = path.0;
    let opened = state.controller.open_edit(&id).await;
    let snapshot = state.controller.snapshot().await;

    match (opened, snapshot.modal.as_ref()) {
        (Ok(()), Some(modal)) => Html(form_modal(modal, &state.config.currency, snapshot.action_in_progress, None)),
        _ => Html(budget_panel_oob(&snapshot, &state.config)),
    }
}

/// HTMX: ask for delete confirmation
pub async fn htmx_delete_confirm(state: State<AppState>, path: Path<String>) -> Result<Html<String>, ApiError> {
    let id = path.0;
    let budget = state.controller.request_delete(&id).await?;
    let busy = state.controller.snapshot().await.action_in_progress;
    Ok(Html(confirm_dialog(&budget, busy)))
}
