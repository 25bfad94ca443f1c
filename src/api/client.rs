

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use super::models::{ForecastResult, MetricsSnapshot, Ticket, TicketFilter};
use super::{DashboardApi, Endpoint};
use crate::core::config::DashboardConfig;
use crate::core::error::{DashboardError, FetchError, Result};


#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::build(base_url.into(), Client::builder())
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Self::build(config.api_base_url.clone(), builder)
    }

    fn build(base_url: String, builder: reqwest::ClientBuilder) -> Result<Self> {
        let parsed = Url::parse(&base_url)
            .map_err(|e| DashboardError::invalid_base_url(&base_url, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DashboardError::invalid_base_url(
                &base_url,
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }

        let client = builder
            .build()
            .map_err(|e| DashboardError::Config(format!("failed to build HTTP client: {e}")))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        info!("ApiClient created for {}", base_url);
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    pub async fn fetch_tickets_filtered(&self, filter: &TicketFilter) -> Result<Vec<Ticket>> {
        self.get_json(Endpoint::Tickets, &filter.query_pairs()).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.endpoint_url(endpoint);
        debug!("GET {} (query params: {})", url, query.len());

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DashboardError::fetch(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::fetch(endpoint, FetchError::Status { status }));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DashboardError::fetch(endpoint, e))?;

        serde_json::from_slice(&body).map_err(|e| DashboardError::fetch(endpoint, e))
    }
}

#[async_trait]
impl DashboardApi for ApiClient {
    async fn fetch_tickets(&self) -> Result<Vec<Ticket>> {
        self.get_json(Endpoint::Tickets, &[]).await
    }

    async fn fetch_metrics(&self) -> Result<MetricsSnapshot> {
        self.get_json(Endpoint::Metrics, &[]).await
    }

    async fn fetch_forecast(&self) -> Result<ForecastResult> {
        self.get_json(Endpoint::Forecast, &[]).await
    }
}
