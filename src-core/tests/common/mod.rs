//! Scripted in-memory stand-in for the analysis service.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use greenlint_core::api::{
    AnalysisResult, AnalyzeRequest, DashboardAggregate, DetectedPattern, HealthStatus,
    OptimizationRecord, OptimizationResult, OptimizeRequest, RoiProjection, RoiRequest, Severity,
    SustainabilityApi,
};
use greenlint_core::ApiError;
use tokio::sync::Notify;

type Script<T> = RefCell<VecDeque<Result<T, ApiError>>>;

/// Responses are consumed in the order they were scripted. A call with
/// nothing scripted fails with a transport error.
#[derive(Default)]
pub struct FakeApi {
    dashboard: Script<DashboardAggregate>,
    analyze: Script<AnalysisResult>,
    optimize: Script<OptimizationResult>,
    roi: Script<RoiProjection>,
    hold: RefCell<Option<Rc<Notify>>>,
    pub calls: RefCell<Vec<&'static str>>,
    pub analyze_requests: RefCell<Vec<AnalyzeRequest>>,
    pub optimize_requests: RefCell<Vec<OptimizeRequest>>,
    pub roi_requests: RefCell<Vec<RoiRequest>>,
}

impl FakeApi {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn push_dashboard(&self, response: Result<DashboardAggregate, ApiError>) {
        self.dashboard.borrow_mut().push_back(response);
    }

    pub fn push_analyze(&self, response: Result<AnalysisResult, ApiError>) {
        self.analyze.borrow_mut().push_back(response);
    }

    pub fn push_optimize(&self, response: Result<OptimizationResult, ApiError>) {
        self.optimize.borrow_mut().push_back(response);
    }

    pub fn push_roi(&self, response: Result<RoiProjection, ApiError>) {
        self.roi.borrow_mut().push_back(response);
    }

    /// Make the next call (to any endpoint) wait until the returned
    /// `Notify` is signalled.
    pub fn hold_next_call(&self) -> Rc<Notify> {
        let notify = Rc::new(Notify::new());
        self.hold.replace(Some(notify.clone()));
        notify
    }

    pub fn call_count(&self, endpoint: &str) -> usize {
        self.calls.borrow().iter().filter(|c| **c == endpoint).count()
    }

    async fn respond<T>(&self, endpoint: &'static str, script: &Script<T>) -> Result<T, ApiError> {
        self.calls.borrow_mut().push(endpoint);
        let response = script.borrow_mut().pop_front().unwrap_or_else(|| {
            Err(ApiError::Transport {
                endpoint: endpoint.to_string(),
                message: "no scripted response".to_string(),
            })
        });
        let hold = self.hold.borrow_mut().take();
        if let Some(notify) = hold {
            notify.notified().await;
        }
        response
    }
}

impl SustainabilityApi for FakeApi {
    async fn dashboard(&self) -> Result<DashboardAggregate, ApiError> {
        self.respond("dashboard", &self.dashboard).await
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, ApiError> {
        self.analyze_requests.borrow_mut().push(request.clone());
        self.respond("analyze", &self.analyze).await
    }

    async fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizationResult, ApiError> {
        self.optimize_requests.borrow_mut().push(request.clone());
        self.respond("optimize", &self.optimize).await
    }

    async fn roi(&self, request: &RoiRequest) -> Result<RoiProjection, ApiError> {
        self.roi_requests.borrow_mut().push(*request);
        self.respond("roi", &self.roi).await
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.calls.borrow_mut().push("health");
        Ok(HealthStatus {
            status: "ok".to_string(),
        })
    }
}

pub fn server_error(endpoint: &str) -> ApiError {
    ApiError::Status {
        status: 500,
        endpoint: endpoint.to_string(),
    }
}

pub fn pattern(id: &str, severity: Severity) -> DetectedPattern {
    DetectedPattern {
        pattern_id: id.to_string(),
        name: "Bubble Sort".to_string(),
        severity,
        line_start: 4,
        line_end: 14,
        description: "Quadratic sort".to_string(),
        suggestion: "Use std::sort".to_string(),
        estimated_energy_cost: 8.0,
        estimated_energy_saved: 7.0,
    }
}

pub fn analysis(score: f64, patterns: usize) -> AnalysisResult {
    AnalysisResult {
        filename: "input.cpp".to_string(),
        patterns: (0..patterns)
            .map(|i| pattern(&format!("p{}", i), Severity::High))
            .collect(),
        total_energy_score: score,
        optimized_energy_score: 95.0,
        estimated_kwh: 0.012,
        estimated_co2_kg: 0.0046,
        estimated_cost_eur: 0.003,
        carbon_intensity_gco2_kwh: 385.0,
    }
}

pub fn optimization(code: &str) -> OptimizationResult {
    OptimizationResult {
        filename: "input.cpp".to_string(),
        original_code: code.to_string(),
        optimized_code: "std::sort(arr.begin(), arr.end());".to_string(),
        changes_summary: "Replaced bubble sort with std::sort".to_string(),
        chain_of_thought: "The nested loop is O(n^2).".to_string(),
        energy_before: 35.0,
        energy_after: 0.0,
        savings_kwh: 0.012,
        savings_co2_kg: 0.0046,
        savings_eur: 0.003,
    }
}

pub fn record(id: i64, filename: &str) -> OptimizationRecord {
    OptimizationRecord {
        id,
        timestamp: "2026-03-01 10:15:00".to_string(),
        filename: filename.to_string(),
        language: Some("cpp".to_string()),
        patterns_found: 1,
        energy_before: 35.0,
        energy_after: 0.0,
        savings_kwh: 0.012,
        savings_co2_kg: 0.0046,
        savings_eur: 0.003,
        original_code: None,
        optimized_code: None,
        chain_of_thought: None,
    }
}

pub fn aggregate(optimizations: u64, score: f64) -> DashboardAggregate {
    DashboardAggregate {
        total_optimizations: optimizations,
        total_kwh_saved: 0.012 * optimizations as f64,
        total_co2_saved: 0.0046 * optimizations as f64,
        total_eur_saved: 0.003 * optimizations as f64,
        sustainability_score: score,
        history: (0..optimizations as i64)
            .rev()
            .map(|i| record(i, &format!("src/file{}.cpp", i)))
            .collect(),
    }
}

pub fn projection(kwh: f64) -> RoiProjection {
    RoiProjection {
        annual_kwh_saved: kwh,
        annual_co2_saved: kwh * 0.385,
        annual_eur_saved: kwh * 0.25,
    }
}
