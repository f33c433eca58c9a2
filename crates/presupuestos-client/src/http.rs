//! reqwest implementation of `BudgetService`

use async_trait::async_trait;
use presupuestos_config::ApiConfig;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, Url};
use std::time::Duration;

use crate::error::{ServiceError, ServiceResult};
use crate::types::{Budget, BudgetRequest};
use crate::BudgetService;

/// Budget API client over HTTP/JSON
#[derive(Debug, Clone)]
pub struct HttpBudgetService {
    client: Client,
    collection_url: Url,
}

impl HttpBudgetService {
    /// Build a client for `{base_url}/api/presupuestos`
    pub fn new(config: &ApiConfig) -> ServiceResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        let collection_url = Url::parse(&format!("{}/api/presupuestos", config.base_url.trim_end_matches('/')))
            .map_err(|e| ServiceError::Unknown {
                status: None,
                message: Some(format!("invalid API URL {}: {}", config.base_url, e)),
            })?;

        Ok(Self { client, collection_url })
    }

    /// Collection endpoint this client talks to
    pub fn collection_url(&self) -> &str {
        self.collection_url.as_str()
    }

    /// `{collection}/{id}` with the id percent-encoded as one path segment
    fn item_url(&self, id: &str) -> Url {
        let mut url = self.collection_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }

    /// Send a request and turn any failure into a `ServiceError`
    async fn send(&self, request: RequestBuilder, operation: &str) -> ServiceResult<Response> {
        let result = match request.send().await {
            Ok(response) if response.status().is_success() => Ok(response),
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                Err(ServiceError::from_status(status, &body))
            }
            Err(e) => Err(ServiceError::from(e)),
        };

        result.map_err(|e| {
            log::error!(
                target: "presupuestos::client",
                "API error [{}] during {}: {}",
                e.kind(),
                operation,
                e
            );
            e
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response, operation: &str) -> ServiceResult<T> {
        response.json::<T>().await.map_err(|e| {
            log::error!(
                target: "presupuestos::client",
                "could not decode response for {}: {}",
                operation,
                e
            );
            ServiceError::from(e)
        })
    }

    /// Decode an echoed record; plain-text confirmations yield `None`
    async fn decode_echo(response: Response, operation: &str) -> Option<Budget> {
        let body = response.text().await.ok()?;
        match serde_json::from_str::<Budget>(&body) {
            Ok(budget) => Some(budget),
            Err(_) => {
                log::debug!(
                    target: "presupuestos::client",
                    "{} returned a non-record body: {:?}",
                    operation,
                    body
                );
                None
            }
        }
    }
}

#[async_trait]
impl BudgetService for HttpBudgetService {
    async fn list_all(&self) -> ServiceResult<Vec<Budget>> {
        let response = self.send(self.client.get(self.collection_url.as_str()), "list").await?;
        let budgets: Vec<Budget> = Self::decode(response, "list").await?;
        log::info!(target: "presupuestos::client", "fetched {} budgets", budgets.len());
        Ok(budgets)
    }

    async fn get_by_id(&self, id: &str) -> ServiceResult<Budget> {
        let response = self.send(self.client.get(self.item_url(id)), "get").await?;
        Self::decode(response, "get").await
    }

    async fn create(&self, draft: &BudgetRequest) -> ServiceResult<Option<Budget>> {
        let request = self.client.post(self.collection_url.as_str()).json(draft);
        let response = self.send(request, "create").await?;
        log::info!(target: "presupuestos::client", "created budget {:?}", draft.name);
        Ok(Self::decode_echo(response, "create").await)
    }

    async fn update(&self, id: &str, draft: &BudgetRequest) -> ServiceResult<Option<Budget>> {
        let request = self.client.put(self.item_url(id)).json(draft);
        let response = self.send(request, "update").await?;
        log::info!(target: "presupuestos::client", "updated budget {}", id);
        Ok(Self::decode_echo(response, "update").await)
    }

    async fn delete(&self, id: &str) -> ServiceResult<()> {
        self.send(self.client.delete(self.item_url(id)), "delete").await?;
        log::info!(target: "presupuestos::client", "deleted budget {}", id);
        Ok(())
    }
}

// ==================== Tests ====================
