//! Core logic for the budget admin page
//!
//! Pagination, form validation, display formatting and the page controller.
//! Nothing here renders HTML; the web crate reads `PageState` snapshots.

pub mod controller;
pub mod display;
pub mod error;
pub mod pagination;
pub mod validation;

pub use controller::{Action, FormModal, PageController, PageState};
pub use display::{format_amount, format_date};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorSeverity};
pub use pagination::{PageLink, Paginator, DEFAULT_PAGE_SIZE};
pub use validation::{amount_input_accepts, BudgetForm, FormErrors, FormField};

pub use presupuestos_client::{
    Budget, BudgetRequest, BudgetService, BudgetStatus, ErrorKind, ServiceError, ServiceRef, ServiceResult,
};
