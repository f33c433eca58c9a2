//! Error types for presupuestos-web

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use presupuestos_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Upstream error: {message}")]
    Upstream { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::RecordNotFound { id } => ApiError::NotFound {
                resource: format!("presupuesto {}", id),
            },
            CoreError::Validation { errors } => ApiError::BadRequest {
                message: errors.to_string(),
            },
            CoreError::Busy | CoreError::NoOpenForm | CoreError::NoPendingDelete | CoreError::StaleForm { .. } => {
                ApiError::Conflict {
                    message: error.to_string(),
                }
            }
            CoreError::Service(e) => ApiError::Upstream { message: e.to_string() },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log::warn!(target: "presupuestos::web", "{}", self);
        let body = format!(
            "<div class='p-4 text-sm text-red-700 bg-red-50 rounded-lg'>{}</div>",
            presupuestos_utils::escape_html(&self.to_string())
        );
        (self.status(), axum::response::Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use presupuestos_core::ServiceError;

    #[test]
    fn test_core_error_mapping() {
        let e = ApiError::from(CoreError::RecordNotFound { id: "x1".to_string() });
        assert_eq!(e.status(), StatusCode::NOT_FOUND);
        assert_eq!(e.to_string(), "Not found: presupuesto x1");

        assert_eq!(ApiError::from(CoreError::Busy).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::from(CoreError::StaleForm { target: Some("a".to_string()) }).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(ApiError::from(CoreError::Service(ServiceError::Timeout)).status(), StatusCode::BAD_GATEWAY);
    }
}
