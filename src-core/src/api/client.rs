use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::endpoints;
use super::types::{
    AnalysisResult, AnalyzeRequest, DashboardAggregate, HealthStatus, OptimizationResult,
    OptimizeRequest, RoiProjection, RoiRequest, Validate,
};
use super::SustainabilityApi;
use crate::config::Config;
use crate::error::ApiError;

/// JSON-over-HTTP client for the analysis service.
///
/// Works in the browser (fetch) and natively; the base URL must be absolute.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Build a client for `base_url` with the request timeout from `config`.
    /// The timeout only applies on native targets; browsers manage their own.
    pub fn new(base_url: &str, config: &Config) -> Result<Self, ApiError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .user_agent(concat!("greenlint/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout);
        #[cfg(target_arch = "wasm32")]
        let _ = config;

        let client = builder.build().map_err(|e| ApiError::Transport {
            endpoint: base_url.to_string(),
            message: format!("Failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn get<T>(&self, endpoint: &'static str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Validate,
    {
        debug!("GET {}", endpoint);
        let request = self.client.get(self.endpoint_url(endpoint));
        self.send(endpoint, request).await
    }

    async fn post<B, T>(&self, endpoint: &'static str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Validate,
    {
        debug!("POST {}", endpoint);
        let request = self.client.post(self.endpoint_url(endpoint)).json(body);
        self.send(endpoint, request).await
    }

    async fn send<T>(&self, endpoint: &'static str, request: reqwest::RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Validate,
    {
        let response = request.send().await.map_err(|e| {
            warn!("Request to {} failed: {}", endpoint, e);
            ApiError::Transport {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            }
        })?;

        check_status(response.status().as_u16(), endpoint)?;

        let value: T = response.json().await.map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;

        value.validate().map_err(|message| {
            warn!("Rejected response from {}: {}", endpoint, message);
            ApiError::Decode {
                endpoint: endpoint.to_string(),
                message,
            }
        })?;

        Ok(value)
    }
}

/// Map a non-2xx status to [`ApiError::Status`]. The body is never read.
pub fn check_status(status: u16, endpoint: &str) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        warn!("{} returned HTTP {}", endpoint, status);
        Err(ApiError::Status {
            status,
            endpoint: endpoint.to_string(),
        })
    }
}

impl SustainabilityApi for HttpApi {
    async fn dashboard(&self) -> Result<DashboardAggregate, ApiError> {
        self.get(endpoints::DASHBOARD).await
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, ApiError> {
        self.post(endpoints::ANALYZE, request).await
    }

    async fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizationResult, ApiError> {
        self.post(endpoints::OPTIMIZE, request).await
    }

    async fn roi(&self, request: &RoiRequest) -> Result<RoiProjection, ApiError> {
        self.post(endpoints::ROI, request).await
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get(endpoints::HEALTH).await
    }
}
