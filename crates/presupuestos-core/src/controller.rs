//! Page controller: explicit page state, its transition function, and the
//! async flows (load, create/edit, delete) that drive it.
//!
//! `PageState::apply` is the only place state changes. `PageController`
//! wraps the state in a lock and never holds it across a service call.

use chrono::{Local, NaiveDate};
use presupuestos_client::{Budget, BudgetRequest, ServiceError, ServiceRef};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::validation::{BudgetForm, FormErrors, FormField};

// ==================== State ====================

/// The open create/edit dialog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormModal {
    /// Budget being edited; `None` when creating
    pub editing: Option<Budget>,
    pub form: BudgetForm,
    pub errors: FormErrors,
}

impl FormModal {
    pub fn create(today: NaiveDate) -> Self {
        Self {
            editing: None,
            form: BudgetForm::new(today),
            errors: FormErrors::new(),
        }
    }

    pub fn edit(budget: Budget, today: NaiveDate) -> Self {
        Self {
            form: BudgetForm::from_budget(&budget, today),
            editing: Some(budget),
            errors: FormErrors::new(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }
}

/// Everything the budget page renders from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageState {
    pub records: Vec<Budget>,
    pub loading: bool,
    /// A create, update or delete is running
    pub action_in_progress: bool,
    /// Last failure message, cleared on the next attempt
    pub error: Option<String>,
    pub modal: Option<FormModal>,
    /// Id awaiting delete confirmation
    pub pending_delete: Option<String>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            loading: true,
            action_in_progress: false,
            error: None,
            modal: None,
            pending_delete: None,
        }
    }
}

/// State transitions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadStarted,
    Loaded(Vec<Budget>),
    LoadFailed(String),
    OpenCreate { today: NaiveDate },
    OpenEdit { budget: Budget, today: NaiveDate },
    FieldEdited { field: FormField, value: String },
    FormReplaced(BudgetForm),
    ValidationFailed(FormErrors),
    SubmitStarted,
    SubmitSucceeded,
    SubmitFailed(String),
    CloseModal,
    DeleteRequested(String),
    DeleteCancelled,
    DeleteStarted,
    Deleted(String),
    DeleteFailed(String),
    /// A failure outside the load/submit/delete flows (e.g. opening an edit)
    Failed(String),
}

impl PageState {
    /// Apply one transition in place
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::LoadStarted => {
                self.loading = true;
                self.error = None;
            }
            Action::Loaded(records) => {
                self.records = records;
                self.loading = false;
            }
            Action::LoadFailed(message) => {
                self.error = Some(message);
                self.loading = false;
            }
            Action::OpenCreate { today } => {
                self.modal = Some(FormModal::create(today));
            }
            Action::OpenEdit { budget, today } => {
                self.modal = Some(FormModal::edit(budget, today));
            }
            Action::FieldEdited { field, value } => {
                if let Some(modal) = self.modal.as_mut() {
                    if modal.form.set_field(field, &value) {
                        modal.errors.clear(field);
                    }
                }
            }
            Action::FormReplaced(form) => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.form = form;
                }
            }
            Action::ValidationFailed(errors) => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.errors = errors;
                }
            }
            Action::SubmitStarted => {
                self.action_in_progress = true;
                self.error = None;
                if let Some(modal) = self.modal.as_mut() {
                    modal.errors = FormErrors::new();
                }
            }
            Action::SubmitSucceeded => {
                self.action_in_progress = false;
                self.modal = None;
            }
            Action::SubmitFailed(message) => {
                self.action_in_progress = false;
                self.error = Some(message);
            }
            Action::CloseModal => {
                self.modal = None;
            }
            Action::DeleteRequested(id) => {
                self.pending_delete = Some(id);
            }
            Action::DeleteCancelled => {
                self.pending_delete = None;
            }
            Action::DeleteStarted => {
                self.action_in_progress = true;
                self.error = None;
                self.pending_delete = None;
            }
            Action::Deleted(id) => {
                self.records.retain(|budget| budget.id != id);
                self.action_in_progress = false;
            }
            Action::DeleteFailed(message) | Action::Failed(message) => {
                self.action_in_progress = false;
                self.error = Some(message);
            }
        }
    }

    /// Reducer form of `apply`
    pub fn reduce(mut self, action: Action) -> Self {
        self.apply(action);
        self
    }

    pub fn find(&self, id: &str) -> Option<&Budget> {
        self.records.iter().find(|budget| budget.id == id)
    }
}

// ==================== Controller ====================

/// Shared handle that runs the page flows against a `BudgetService`
#[derive(Clone)]
pub struct PageController {
    state: Arc<RwLock<PageState>>,
    service: ServiceRef,
}

impl PageController {
    pub fn new(service: ServiceRef) -> Self {
        Self {
            state: Arc::new(RwLock::new(PageState::default())),
            service,
        }
    }

    /// Copy of the current state for rendering
    pub async fn snapshot(&self) -> PageState {
        self.state.read().await.clone()
    }

    async fn dispatch(&self, action: Action) {
        self.state.write().await.apply(action);
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Fetch every record; the mount and retry flow
    pub async fn load(&self) -> CoreResult<usize> {
        self.dispatch(Action::LoadStarted).await;
        match self.service.list_all().await {
            Ok(records) => {
                let count = records.len();
                self.dispatch(Action::Loaded(records)).await;
                log::info!(target: "presupuestos::controller", "loaded {} budgets", count);
                Ok(count)
            }
            Err(e) => {
                self.dispatch(Action::LoadFailed(e.to_string())).await;
                Err(self.fail("load", e))
            }
        }
    }

    /// Open an empty create form
    pub async fn open_create(&self) {
        self.dispatch(Action::OpenCreate { today: Self::today() }).await;
    }

    /// Open the edit form for `id`, fetching the record when it is not listed
    pub async fn open_edit(&self, id: &str) -> CoreResult<()> {
        let listed = self.state.read().await.find(id).cloned();
        let budget = match listed {
            Some(budget) => budget,
            None => match self.service.get_by_id(id).await {
                Ok(budget) => budget,
                Err(e) => {
                    self.dispatch(Action::Failed(e.to_string())).await;
                    return Err(self.fail("open edit", e));
                }
            },
        };
        self.dispatch(Action::OpenEdit { budget, today: Self::today() }).await;
        Ok(())
    }

    /// Apply a single field edit to the open form
    pub async fn edit_field(&self, field: FormField, value: &str) {
        self.dispatch(Action::FieldEdited {
            field,
            value: value.to_string(),
        })
        .await;
    }

    /// Replace the open form with a full post, then submit it
    ///
    /// `target` is the record the post was rendered for (`None` for a
    /// create form); a post for any other form is refused untouched.
    pub async fn submit_form(&self, target: Option<&str>, form: BudgetForm) -> CoreResult<()> {
        let (editing_id, request) = {
            let mut state = self.state.write().await;
            Self::ensure_idle(&state, "submit")?;
            let modal = state.modal.as_ref().ok_or(CoreError::NoOpenForm)?;
            let editing_id = modal.editing.as_ref().map(|budget| budget.id.as_str());
            if editing_id != target {
                let err = CoreError::StaleForm {
                    target: target.map(str::to_string),
                };
                err.log("submit");
                return Err(err);
            }
            state.apply(Action::FormReplaced(form));
            Self::start_submit(&mut state)?
        };
        self.save(editing_id, request).await
    }

    /// Validate and save the open form; re-fetches the list on success
    pub async fn submit(&self) -> CoreResult<()> {
        let (editing_id, request) = {
            let mut state = self.state.write().await;
            Self::ensure_idle(&state, "submit")?;
            Self::start_submit(&mut state)?
        };
        self.save(editing_id, request).await
    }

    fn ensure_idle(state: &PageState, operation: &str) -> CoreResult<()> {
        if state.action_in_progress {
            let err = CoreError::Busy;
            err.log(operation);
            return Err(err);
        }
        Ok(())
    }

    fn start_submit(state: &mut PageState) -> CoreResult<(Option<String>, BudgetRequest)> {
        let modal = state.modal.as_ref().ok_or(CoreError::NoOpenForm)?;
        let editing_id = modal.editing.as_ref().map(|budget| budget.id.clone());
        match modal.form.to_request() {
            Ok(request) => {
                state.apply(Action::SubmitStarted);
                Ok((editing_id, request))
            }
            Err(errors) => {
                state.apply(Action::ValidationFailed(errors.clone()));
                let err = CoreError::Validation { errors };
                err.log("submit");
                Err(err)
            }
        }
    }

    async fn save(&self, editing_id: Option<String>, request: BudgetRequest) -> CoreResult<()> {
        let result = match editing_id.as_deref() {
            Some(id) => self.service.update(id, &request).await,
            None => self.service.create(&request).await,
        };

        match result {
            Ok(_) => {
                self.dispatch(Action::SubmitSucceeded).await;
                log::info!(
                    target: "presupuestos::controller",
                    "{} budget {:?}",
                    if editing_id.is_some() { "updated" } else { "created" },
                    request.name
                );
                if self.load().await.is_err() {
                    log::warn!(target: "presupuestos::controller", "list refresh after save failed");
                }
                Ok(())
            }
            Err(e) => {
                self.dispatch(Action::SubmitFailed(e.to_string())).await;
                Err(self.fail("submit", e))
            }
        }
    }

    /// Discard the open form
    pub async fn close_modal(&self) {
        self.dispatch(Action::CloseModal).await;
    }

    /// Ask for confirmation before deleting `id`
    pub async fn request_delete(&self, id: &str) -> CoreResult<Budget> {
        let budget = self.state.read().await.find(id).cloned();
        match budget {
            Some(budget) => {
                self.dispatch(Action::DeleteRequested(id.to_string())).await;
                Ok(budget)
            }
            None => {
                let err = CoreError::RecordNotFound { id: id.to_string() };
                err.log("request delete");
                Err(err)
            }
        }
    }

    pub async fn cancel_delete(&self) {
        self.dispatch(Action::DeleteCancelled).await;
    }

    /// Delete `id` if it is the record awaiting confirmation; it leaves the
    /// local list only after the server confirms
    pub async fn confirm_delete(&self, id: &str) -> CoreResult<()> {
        {
            let mut state = self.state.write().await;
            Self::ensure_idle(&state, "delete")?;
            if state.pending_delete.as_deref() != Some(id) {
                let err = CoreError::NoPendingDelete;
                err.log("delete");
                return Err(err);
            }
            state.apply(Action::DeleteStarted);
        }

        match self.service.delete(id).await {
            Ok(()) => {
                self.dispatch(Action::Deleted(id.to_string())).await;
                log::info!(target: "presupuestos::controller", "deleted budget {}", id);
                Ok(())
            }
            Err(e) => {
                self.dispatch(Action::DeleteFailed(e.to_string())).await;
                Err(self.fail("delete", e))
            }
        }
    }

    fn fail(&self, operation: &str, error: ServiceError) -> CoreError {
        let err = CoreError::from(error);
        err.log(operation);
        err
    }
}

// ==================== Tests ====================
