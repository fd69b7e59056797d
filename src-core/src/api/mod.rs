//! Typed boundary to the remote analysis service.

pub mod client;
pub mod types;

pub use client::HttpApi;
pub use types::*;

use crate::error::ApiError;

/// Endpoint paths, relative to the configured base URL.
pub mod endpoints {
    pub const DASHBOARD: &str = "/api/dashboard";
    pub const ANALYZE: &str = "/api/analyze";
    pub const OPTIMIZE: &str = "/api/optimize";
    pub const ROI: &str = "/api/roi";
    pub const HEALTH: &str = "/api/health";
}

/// Operations the dashboard needs from the analysis service.
///
/// Implemented over HTTP by [`HttpApi`]; tests substitute in-memory fakes.
/// The futures are not required to be `Send`: everything runs on one
/// cooperative thread, in the browser or in a current-thread runtime.
#[allow(async_fn_in_trait)]
pub trait SustainabilityApi {
    async fn dashboard(&self) -> Result<DashboardAggregate, ApiError>;

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, ApiError>;

    async fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizationResult, ApiError>;

    async fn roi(&self, request: &RoiRequest) -> Result<RoiProjection, ApiError>;

    async fn health(&self) -> Result<HealthStatus, ApiError>;
}
