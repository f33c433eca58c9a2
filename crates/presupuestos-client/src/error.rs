//! Error types for presupuestos-client
//!
//! Every failure of a budget API call is normalized into one
//! `ServiceError` variant before it leaves this crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BAD_REQUEST_FALLBACK: &str = "Datos inválidos. Por favor, verifica la información ingresada.";
const UNKNOWN_FALLBACK: &str = "Error desconocido. Por favor, intenta nuevamente.";

/// Kind of a service failure, for programmatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Request exceeded the client timeout
    Timeout,
    /// No response received
    ConnectionError,
    /// HTTP 400
    BadRequest,
    /// HTTP 404
    NotFound,
    /// HTTP 500
    ServerError,
    /// Anything else
    Unknown,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Timeout => write!(f, "TIMEOUT"),
            ErrorKind::ConnectionError => write!(f, "CONNECTION_ERROR"),
            ErrorKind::BadRequest => write!(f, "BAD_REQUEST"),
            ErrorKind::NotFound => write!(f, "NOT_FOUND"),
            ErrorKind::ServerError => write!(f, "SERVER_ERROR"),
            ErrorKind::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Normalized budget API error; `Display` is the message shown to the user
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("Tiempo de espera agotado. Por favor, intenta nuevamente.")]
    Timeout,

    #[error("Error de conexión. Verifica que el servidor esté funcionando.")]
    Connection,

    #[error("{}", .message.as_deref().unwrap_or(BAD_REQUEST_FALLBACK))]
    BadRequest { message: Option<String> },

    #[error("Presupuesto no encontrado.")]
    NotFound,

    #[error("Error interno del servidor. Por favor, contacta al administrador.")]
    ServerError,

    #[error("{}", .message.as_deref().unwrap_or(UNKNOWN_FALLBACK))]
    Unknown {
        status: Option<u16>,
        message: Option<String>,
    },
}

impl ServiceError {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Timeout => ErrorKind::Timeout,
            ServiceError::Connection => ErrorKind::ConnectionError,
            ServiceError::BadRequest { .. } => ErrorKind::BadRequest,
            ServiceError::NotFound => ErrorKind::NotFound,
            ServiceError::ServerError => ErrorKind::ServerError,
            ServiceError::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    /// Map an unsuccessful HTTP status and its body
    ///
    /// The server message is taken from a JSON object's `message` field.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            400 => ServiceError::BadRequest {
                message: server_message(body),
            },
            404 => ServiceError::NotFound,
            500 => ServiceError::ServerError,
            _ => ServiceError::Unknown {
                status: Some(status),
                message: server_message(body),
            },
        }
    }
}

fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

impl From<reqwest::Error> for ServiceError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ServiceError::Timeout
        } else if error.is_connect() {
            ServiceError::Connection
        } else if let Some(status) = error.status() {
            ServiceError::from_status(status.as_u16(), "")
        } else {
            ServiceError::Unknown {
                status: None,
                message: Some(error.to_string()),
            }
        }
    }
}

/// Result type with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::Timeout.to_string(), "TIMEOUT");
        assert_eq!(ErrorKind::ConnectionError.to_string(), "CONNECTION_ERROR");
        assert_eq!(ErrorKind::NotFound.to_string(), "NOT_FOUND");
    }

    #[test]
    fn test_from_status_maps_each_class() {
        assert_eq!(ServiceError::from_status(404, "").kind(), ErrorKind::NotFound);
        assert_eq!(ServiceError::from_status(500, "boom").kind(), ErrorKind::ServerError);
        assert_eq!(ServiceError::from_status(400, "").kind(), ErrorKind::BadRequest);
        assert_eq!(ServiceError::from_status(418, "").kind(), ErrorKind::Unknown);
        assert_eq!(ServiceError::from_status(503, "").kind(), ErrorKind::Unknown);
    }

    #[test]
    fn test_bad_request_passes_server_message_through() {
        let err = ServiceError::from_status(400, r#"{"message": "El nombre es obligatorio"}"#);
        assert_eq!(err.to_string(), "El nombre es obligatorio");

        let err = ServiceError::from_status(400, "Error al crear presupuesto");
        assert_eq!(err.to_string(), BAD_REQUEST_FALLBACK);

        let err = ServiceError::from_status(400, r#"{"message": "  "}"#);
        assert_eq!(err.to_string(), BAD_REQUEST_FALLBACK);
    }

    #[test]
    fn test_not_found_is_not_generic() {
        let err = ServiceError::from_status(404, r#"{"message": "whatever"}"#);
        assert_eq!(err, ServiceError::NotFound);
        assert_eq!(err.to_string(), "Presupuesto no encontrado.");
    }

    #[test]
    fn test_unknown_status_message() {
        let err = ServiceError::from_status(409, r#"{"message": "Conflicto"}"#);
        assert_eq!(err.to_string(), "Conflicto");
        assert_eq!(
            err,
            ServiceError::Unknown { status: Some(409), message: Some("Conflicto".to_string()) }
        );
        assert_eq!(ServiceError::from_status(409, "").to_string(), UNKNOWN_FALLBACK);
    }
}
