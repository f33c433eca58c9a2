//! REST client for the budget API
//!
//! `BudgetService` is the seam between the page controller and the remote
//! store; `HttpBudgetService` is the reqwest implementation.

use async_trait::async_trait;
use std::sync::Arc;

pub mod error;
pub mod http;
pub mod types;

pub use error::{ErrorKind, ServiceError, ServiceResult};
pub use http::HttpBudgetService;
pub use types::{parse_iso_date, Budget, BudgetRequest, BudgetStatus};

// ==================== Service Trait ====================

/// Service reference type
pub type ServiceRef = Arc<dyn BudgetService>;

/// CRUD operations against the budget store
///
/// Each call is a single request/response round trip; failures are
/// already normalized into `ServiceError`.
#[async_trait]
pub trait BudgetService: Send + Sync {
    /// Fetch every budget
    async fn list_all(&self) -> ServiceResult<Vec<Budget>>;

    /// Fetch one budget by id
    async fn get_by_id(&self, id: &str) -> ServiceResult<Budget>;

    /// Create a budget; returns the stored record when the server echoes it
    async fn create(&self, draft: &BudgetRequest) -> ServiceResult<Option<Budget>>;

    /// Replace a budget; returns the stored record when the server echoes it
    async fn update(&self, id: &str, draft: &BudgetRequest) -> ServiceResult<Option<Budget>>;

    /// Delete a budget
    async fn delete(&self, id: &str) -> ServiceResult<()>;
}
