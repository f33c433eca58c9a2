//! Budget API endpoints - JSON state and HTMX actions
//!
//! Endpoints:
//! - api_state: Controller state snapshot (JSON)
//! - htmx_reload: Re-fetch the list, return the panel
//! - htmx_field_edit: Apply one field edit, return that field
//! - htmx_create_submit: Save the open create form
//! - htmx_edit_submit: Save the open edit form of one record
//! - htmx_modal_close: Discard the open form
//! - htmx_delete_cancel: Drop the pending delete
//! - htmx_delete: Run the confirmed delete

use crate::components::{budget_panel, budget_panel_oob, form_field, form_modal};
use crate::{ApiError, AppState};
use axum::extract::{Form, Path, State};
use axum::response::Html;
use axum::Json;
use presupuestos_core::{BudgetForm, CoreError, FormField, PageState};
use std::collections::HashMap;
use std::str::FromStr;

/// Get the controller state (JSON API)
pub async fn api_state(state: State<AppState>) -> Json<PageState> {
    Json(state.controller.snapshot().await)
}

/// HTMX: mount load and retry
pub async fn htmx_reload(state: State<AppState>) -> Html<String> {
    if let Err(e) = state.controller.load().await {
        log::debug!(target: "presupuestos::web", "reload finished with error: {}", e);
    }
    let snapshot = state.controller.snapshot().await;
    Html(budget_panel(&snapshot, &state.config, 1, state.config.pagination.page_size))
}

/// HTMX: single field edit
///
/// The request carries the whole form plus `field`, naming the input that
/// changed.
pub async fn htmx_field_edit(
    state: State<AppState>,
    params: Form<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let name = params.get("field").map(String::as_str).unwrap_or("");
    let field = FormField::from_str(name).map_err(|message| ApiError::BadRequest { message })?;
    let value = params.get(field.as_str()).map(String::as_str).unwrap_or("");

    state.controller.edit_field(field, value).await;

    let snapshot = state.controller.snapshot().await;
    let modal = snapshot.modal.as_ref().ok_or(CoreError::NoOpenForm)?;
    Ok(Html(form_field(field, modal, &state.config.currency, snapshot.action_in_progress)))
}

/// HTMX: submit the create form
pub async fn htmx_create_submit(state: State<AppState>, form: Form<BudgetForm>) -> Result<Html<String>, ApiError> {
    submit(&state.0, None, form.0).await
}

/// HTMX: submit the edit form of `id`
///
/// Refused with 409 when the open form edits another record.
pub async fn htmx_edit_submit(
    state: State<AppState>,
    path: Path<String>,
    form: Form<BudgetForm>,
) -> Result<Html<String>, ApiError> {
    submit(&state.0, Some(&path.0), form.0).await
}

/// Success closes the dialog and refreshes the panel out of band; a failed
/// save re-renders the dialog with its errors.
async fn submit(state: &AppState, target: Option<&str>, form: BudgetForm) -> Result<Html<String>, ApiError> {
    let result = state.controller.submit_form(target, form).await;
    let snapshot = state.controller.snapshot().await;

    match result {
        Ok(()) => Ok(Html(budget_panel_oob(&snapshot, &state.config))),
        Err(CoreError::NoOpenForm) => Ok(Html(String::new())),
        Err(CoreError::Validation { .. }) | Err(CoreError::Service(_)) | Err(CoreError::Busy) => {
            let html = snapshot
                .modal
                .as_ref()
                .map(|m| form_modal(m, &state.config.currency, snapshot.action_in_progress, snapshot.error.as_deref()))
                .unwrap_or_default();
            Ok(Html(html))
        }
        Err(e) => Err(e.into()),
    }
}

/// HTMX: close the form dialog
pub async fn htmx_modal_close(state: State<AppState>) -> Html<String> {
    state.controller.close_modal().await;
    Html(String::new())
}

/// HTMX: cancel the delete confirmation
pub async fn htmx_delete_cancel(state: State<AppState>) -> Html<String> {
    state.controller.cancel_delete().await;
    Html(String::new())
}

/// HTMX: confirmed delete
///
/// Only the id awaiting confirmation can be deleted. The dialog closes
/// either way; the refreshed panel carries the result or the error.
pub async fn htmx_delete(state: State<AppState>, path: Path<String>) -> Result<Html<String>, ApiError> {
    match state.controller.confirm_delete(&path.0).await {
        Ok(_) | Err(CoreError::Service(_)) => {
            let snapshot = state.controller.snapshot().await;
            Ok(Html(budget_panel_oob(&snapshot, &state.config)))
        }
        Err(e) => Err(e.into()),
    }
}
