//! Error types for presupuestos-core
//!
//! Controller operations report why an action did not go through. The
//! user-facing message is also stored in the page state, so callers mostly
//! use these to pick what to render.

use presupuestos_client::ServiceError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::FormErrors;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Remote API call failed
    ServiceError,
    /// Form did not pass validation
    ValidationError,
    /// Another create/update/delete is running
    Busy,
    /// Submit without an open form
    NoOpenForm,
    /// Delete confirmed without a pending request
    NoPendingDelete,
    /// Record id unknown locally and remotely
    RecordNotFound,
    /// Form post for a record other than the one the open form edits
    StaleForm,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::ServiceError => write!(f, "SERVICE_ERROR"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::Busy => write!(f, "BUSY"),
            ErrorCode::NoOpenForm => write!(f, "NO_OPEN_FORM"),
            ErrorCode::NoPendingDelete => write!(f, "NO_PENDING_DELETE"),
            ErrorCode::RecordNotFound => write!(f, "RECORD_NOT_FOUND"),
            ErrorCode::StaleForm => write!(f, "STALE_FORM"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for presupuestos-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("Validation error: {errors}")]
    Validation { errors: FormErrors },

    #[error("Another operation is in progress")]
    Busy,

    #[error("No form is open")]
    NoOpenForm,

    #[error("No delete is awaiting confirmation")]
    NoPendingDelete,

    #[error("Presupuesto no encontrado: {id}")]
    RecordNotFound { id: String },

    #[error("The open form does not edit {}", .target.as_deref().unwrap_or("a new budget"))]
    StaleForm { target: Option<String> },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Service(_) => ErrorCode::ServiceError,
            CoreError::Validation { .. } => ErrorCode::ValidationError,
            CoreError::Busy => ErrorCode::Busy,
            CoreError::NoOpenForm => ErrorCode::NoOpenForm,
            CoreError::NoPendingDelete => ErrorCode::NoPendingDelete,
            CoreError::RecordNotFound { .. } => ErrorCode::RecordNotFound,
            CoreError::StaleForm { .. } => ErrorCode::StaleForm,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::Service(_) => ErrorSeverity::Error,
            CoreError::Validation { .. } => ErrorSeverity::Info,
            CoreError::Busy => ErrorSeverity::Info,
            CoreError::NoOpenForm => ErrorSeverity::Warning,
            CoreError::NoPendingDelete => ErrorSeverity::Warning,
            CoreError::RecordNotFound { .. } => ErrorSeverity::Warning,
            CoreError::StaleForm { .. } => ErrorSeverity::Warning,
        }
    }

    /// Log through the `log` facade at a level matching the severity
    pub fn log(&self, operation: &str) {
        match self.severity() {
            ErrorSeverity::Info => log::debug!(
                target: "presupuestos::controller",
                "{} not applied [{}]: {}", operation, self.code(), self
            ),
            ErrorSeverity::Warning => log::warn!(
                target: "presupuestos::controller",
                "{} rejected [{}]: {}", operation, self.code(), self
            ),
            ErrorSeverity::Error => log::error!(
                target: "presupuestos::controller",
                "{} failed [{}]: {}", operation, self.code(), self
            ),
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

// ==================== Tests ====================
