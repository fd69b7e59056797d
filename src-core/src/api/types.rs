//! Wire types for the analysis service.
//!
//! Field names match the JSON the service sends and expects. Response types
//! carry a `validate` check that the client runs before handing a value to
//! the rest of the crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Source languages the service can analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Cpp,
    Python,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Cpp, Language::Python];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::Python => "python",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::Cpp => "C++",
            Language::Python => "Python",
        }
    }

    /// Filename used when submitting code typed into the editor.
    pub fn default_filename(&self) -> &'static str {
        match self {
            Language::Cpp => "input.cpp",
            Language::Python => "input.py",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cpp" | "c++" => Ok(Language::Cpp),
            "python" | "py" => Ok(Language::Python),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

/// AI backend the service should use for optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Ollama,
    Claude,
    Gemini,
}

impl AiProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiProvider::Ollama => "ollama",
            AiProvider::Claude => "claude",
            AiProvider::Gemini => "gemini",
        }
    }
}

impl FromStr for AiProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(AiProvider::Ollama),
            "claude" => Ok(AiProvider::Claude),
            "gemini" => Ok(AiProvider::Gemini),
            other => Err(format!("Unknown AI provider: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn is_high(&self) -> bool {
        matches!(self, Severity::High)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

/// One energy anti-pattern found in the submitted code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedPattern {
    pub pattern_id: String,
    pub name: String,
    pub severity: Severity,
    /// First line of the finding (inclusive)
    pub line_start: u32,
    /// Last line of the finding (inclusive)
    pub line_end: u32,
    pub description: String,
    pub suggestion: String,
    pub estimated_energy_cost: f64,
    pub estimated_energy_saved: f64,
}

impl DetectedPattern {
    pub fn line_range_label(&self) -> String {
        if self.line_start == self.line_end {
            format!("Line {}", self.line_start)
        } else {
            format!("Lines {}\u{2013}{}", self.line_start, self.line_end)
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.line_start > self.line_end {
            return Err(format!(
                "pattern {} has line_start {} after line_end {}",
                self.pattern_id, self.line_start, self.line_end
            ));
        }
        finite("estimated_energy_cost", self.estimated_energy_cost)?;
        finite("estimated_energy_saved", self.estimated_energy_saved)
    }
}

/// Response of `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub filename: String,
    pub patterns: Vec<DetectedPattern>,
    pub total_energy_score: f64,
    pub optimized_energy_score: f64,
    pub estimated_kwh: f64,
    pub estimated_co2_kg: f64,
    pub estimated_cost_eur: f64,
    #[serde(default)]
    pub carbon_intensity_gco2_kwh: f64,
}

impl AnalysisResult {
    pub fn has_patterns(&self) -> bool {
        !self.patterns.is_empty()
    }

    pub fn high_severity_count(&self) -> usize {
        self.patterns.iter().filter(|p| p.severity.is_high()).count()
    }
}

impl Validate for AnalysisResult {
    fn validate(&self) -> Result<(), String> {
        for p in &self.patterns {
            p.validate()?;
        }
        finite("total_energy_score", self.total_energy_score)?;
        finite("optimized_energy_score", self.optimized_energy_score)?;
        finite("estimated_kwh", self.estimated_kwh)?;
        finite("estimated_co2_kg", self.estimated_co2_kg)?;
        finite("estimated_cost_eur", self.estimated_cost_eur)
    }
}

/// Response of `POST /api/optimize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub filename: String,
    pub original_code: String,
    pub optimized_code: String,
    pub changes_summary: String,
    pub chain_of_thought: String,
    pub energy_before: f64,
    pub energy_after: f64,
    pub savings_kwh: f64,
    pub savings_co2_kg: f64,
    pub savings_eur: f64,
}

impl Validate for OptimizationResult {
    fn validate(&self) -> Result<(), String> {
        finite("energy_before", self.energy_before)?;
        finite("energy_after", self.energy_after)?;
        finite("savings_kwh", self.savings_kwh)?;
        finite("savings_co2_kg", self.savings_co2_kg)?;
        finite("savings_eur", self.savings_eur)
    }
}

/// One persisted optimization, as listed in the dashboard history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRecord {
    pub id: i64,
    pub timestamp: String,
    pub filename: String,
    #[serde(default)]
    pub language: Option<String>,
    pub patterns_found: u32,
    pub energy_before: f64,
    pub energy_after: f64,
    pub savings_kwh: f64,
    pub savings_co2_kg: f64,
    pub savings_eur: f64,
    #[serde(default)]
    pub original_code: Option<String>,
    #[serde(default)]
    pub optimized_code: Option<String>,
    #[serde(default)]
    pub chain_of_thought: Option<String>,
}

impl OptimizationRecord {
    pub fn original_code(&self) -> Option<&str> {
        non_empty(&self.original_code)
    }

    pub fn optimized_code(&self) -> Option<&str> {
        non_empty(&self.optimized_code)
    }

    pub fn chain_of_thought(&self) -> Option<&str> {
        non_empty(&self.chain_of_thought)
    }
}

/// Response of `GET /api/dashboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardAggregate {
    pub total_optimizations: u64,
    pub total_kwh_saved: f64,
    pub total_co2_saved: f64,
    pub total_eur_saved: f64,
    pub sustainability_score: f64,
    pub history: Vec<OptimizationRecord>,
}

impl Validate for DashboardAggregate {
    fn validate(&self) -> Result<(), String> {
        finite("total_kwh_saved", self.total_kwh_saved)?;
        finite("total_co2_saved", self.total_co2_saved)?;
        finite("total_eur_saved", self.total_eur_saved)?;
        finite("sustainability_score", self.sustainability_score)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeRequest {
    pub filename: String,
    pub code: String,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizeRequest {
    pub filename: String,
    pub code: String,
    pub patterns: Vec<DetectedPattern>,
    pub language: Language,
    pub provider: AiProvider,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiRequest {
    pub kwh_price_eur: f64,
    pub runs_per_day: u32,
}

/// Response of `POST /api/roi`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiProjection {
    pub annual_kwh_saved: f64,
    pub annual_co2_saved: f64,
    pub annual_eur_saved: f64,
}

impl Validate for RoiProjection {
    fn validate(&self) -> Result<(), String> {
        finite("annual_kwh_saved", self.annual_kwh_saved)?;
        finite("annual_co2_saved", self.annual_co2_saved)?;
        finite("annual_eur_saved", self.annual_eur_saved)
    }
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl Validate for HealthStatus {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Invariants checked on every decoded response before it leaves the client.
pub(crate) trait Validate {
    fn validate(&self) -> Result<(), String>;
}

fn finite(field: &str, value: f64) -> Result<(), String> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(format!("{} is not a finite number", field))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
