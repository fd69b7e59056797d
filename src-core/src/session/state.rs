//! Analyze/optimize state machine.
//!
//! One enum holds everything the workflow knows, so combinations such as
//! "optimizing without an analysis" cannot be represented. Transitions are
//! plain methods on the enum; the controller adds network calls around them.

use crate::api::{AnalysisResult, AnalyzeRequest, DetectedPattern, OptimizationResult};
use crate::error::SessionError;

/// An analysis together with the submission that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeldAnalysis {
    pub request: AnalyzeRequest,
    pub result: AnalysisResult,
}

/// What an optimize call should send.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeTarget {
    pub request: AnalyzeRequest,
    pub patterns: Vec<DetectedPattern>,
}

impl From<&HeldAnalysis> for OptimizeTarget {
    fn from(held: &HeldAnalysis) -> Self {
        Self {
            request: held.request.clone(),
            patterns: held.result.patterns.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Nothing current. `stale` is the last good analysis after a failed
    /// re-analysis; it is shown but is not an optimize target.
    Idle { stale: Option<AnalysisResult> },
    Analyzing { previous: Option<AnalysisResult> },
    Analyzed(HeldAnalysis),
    /// `previous` is the result of an earlier optimize of the same analysis,
    /// shown until the new one lands.
    Optimizing {
        analysis: HeldAnalysis,
        previous: Option<OptimizationResult>,
    },
    Optimized {
        analysis: HeldAnalysis,
        optimization: OptimizationResult,
    },
}

/// Fieldless view of [`SessionState`] for display and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Analyzing,
    Analyzed,
    Optimizing,
    Optimized,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Idle { stale: None }
    }
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        match self {
            SessionState::Idle { .. } => Phase::Idle,
            SessionState::Analyzing { .. } => Phase::Analyzing,
            SessionState::Analyzed(_) => Phase::Analyzed,
            SessionState::Optimizing { .. } => Phase::Optimizing,
            SessionState::Optimized { .. } => Phase::Optimized,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::Analyzing { .. } | SessionState::Optimizing { .. })
    }

    /// The analysis optimize would act on, if any.
    pub fn current_analysis(&self) -> Option<&HeldAnalysis> {
        match self {
            SessionState::Analyzed(held) => Some(held),
            SessionState::Optimizing { analysis, .. } | SessionState::Optimized { analysis, .. } => {
                Some(analysis)
            }
            _ => None,
        }
    }

    /// The analysis to show, current or stale.
    pub fn displayed_analysis(&self) -> Option<&AnalysisResult> {
        match self {
            SessionState::Idle { stale } => stale.as_ref(),
            SessionState::Analyzing { previous } => previous.as_ref(),
            _ => self.current_analysis().map(|held| &held.result),
        }
    }

    pub fn optimization(&self) -> Option<&OptimizationResult> {
        match self {
            SessionState::Optimized { optimization, .. } => Some(optimization),
            SessionState::Optimizing { previous, .. } => previous.as_ref(),
            _ => None,
        }
    }

    pub fn can_optimize(&self) -> bool {
        match self {
            SessionState::Analyzed(held) | SessionState::Optimized { analysis: held, .. } => {
                held.result.has_patterns()
            }
            _ => false,
        }
    }

    /// Enter `Analyzing`. Any optimization result is dropped; the current
    /// analysis is kept only as a stale display value.
    pub(crate) fn begin_analysis(&mut self) -> Result<(), SessionError> {
        let (next, outcome) = match std::mem::take(self) {
            busy @ (SessionState::Analyzing { .. } | SessionState::Optimizing { .. }) => {
                (busy, Err(SessionError::Busy))
            }
            SessionState::Idle { stale } => (SessionState::Analyzing { previous: stale }, Ok(())),
            SessionState::Analyzed(held) | SessionState::Optimized { analysis: held, .. } => (
                SessionState::Analyzing {
                    previous: Some(held.result),
                },
                Ok(()),
            ),
        };
        *self = next;
        outcome
    }

    pub(crate) fn complete_analysis(&mut self, held: HeldAnalysis) {
        if matches!(self, SessionState::Analyzing { .. }) {
            *self = SessionState::Analyzed(held);
        }
    }

    pub(crate) fn fail_analysis(&mut self) {
        if let SessionState::Analyzing { previous } = self {
            *self = SessionState::Idle {
                stale: previous.take(),
            };
        }
    }

    /// Enter `Optimizing`, from `Analyzed` or again from `Optimized`.
    /// Returns `Ok(None)` when the analysis found no patterns; the state is
    /// left unchanged in that case.
    pub(crate) fn begin_optimization(&mut self) -> Result<Option<OptimizeTarget>, SessionError> {
        let (next, outcome) = match std::mem::take(self) {
            SessionState::Analyzed(held) if held.result.has_patterns() => {
                let target = OptimizeTarget::from(&held);
                (
                    SessionState::Optimizing {
                        analysis: held,
                        previous: None,
                    },
                    Ok(Some(target)),
                )
            }
            SessionState::Optimized {
                analysis,
                optimization,
            } if analysis.result.has_patterns() => {
                let target = OptimizeTarget::from(&analysis);
                (
                    SessionState::Optimizing {
                        analysis,
                        previous: Some(optimization),
                    },
                    Ok(Some(target)),
                )
            }
            unchanged @ (SessionState::Analyzed(_) | SessionState::Optimized { .. }) => {
                (unchanged, Ok(None))
            }
            idle @ SessionState::Idle { .. } => (idle, Err(SessionError::NoAnalysis)),
            busy @ (SessionState::Analyzing { .. } | SessionState::Optimizing { .. }) => {
                (busy, Err(SessionError::Busy))
            }
        };
        *self = next;
        outcome
    }

    pub(crate) fn complete_optimization(&mut self, optimization: OptimizationResult) {
        *self = match std::mem::take(self) {
            SessionState::Optimizing { analysis, .. } => SessionState::Optimized {
                analysis,
                optimization,
            },
            other => other,
        };
    }

    /// Leave `Optimizing`, back to the previous result if there was one.
    pub(crate) fn fail_optimization(&mut self) {
        *self = match std::mem::take(self) {
            SessionState::Optimizing {
                analysis,
                previous: Some(optimization),
            } => SessionState::Optimized {
                analysis,
                optimization,
            },
            SessionState::Optimizing {
                analysis,
                previous: None,
            } => SessionState::Analyzed(analysis),
            other => other,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Language, Severity};

    fn request() -> AnalyzeRequest {
        AnalyzeRequest {
            filename: "input.cpp".to_string(),
            code: "int main() {}".to_string(),
            language: Language::Cpp,
        }
    }

    fn result(patterns: usize) -> AnalysisResult {
        AnalysisResult {
            filename: "input.cpp".to_string(),
            patterns: (0..patterns)
                .map(|i| DetectedPattern {
                    pattern_id: format!("p{}", i),
                    name: "Bubble Sort".to_string(),
                    severity: Severity::High,
                    line_start: 1,
                    line_end: 2,
                    description: String::new(),
                    suggestion: String::new(),
                    estimated_energy_cost: 1.0,
                    estimated_energy_saved: 1.0,
                })
                .collect(),
            total_energy_score: 40.0,
            optimized_energy_score: 80.0,
            estimated_kwh: 0.1,
            estimated_co2_kg: 0.04,
            estimated_cost_eur: 0.025,
            carbon_intensity_gco2_kwh: 0.0,
        }
    }

    fn optimization() -> OptimizationResult {
        OptimizationResult {
            filename: "input.cpp".to_string(),
            original_code: "a".to_string(),
            optimized_code: "b".to_string(),
            changes_summary: String::new(),
            chain_of_thought: String::new(),
            energy_before: 40.0,
            energy_after: 5.0,
            savings_kwh: 0.1,
            savings_co2_kg: 0.04,
            savings_eur: 0.025,
        }
    }

    fn analyzed(patterns: usize) -> SessionState {
        SessionState::Analyzed(HeldAnalysis {
            request: request(),
            result: result(patterns),
        })
    }

    #[test]
    fn test_full_cycle() {
        let mut state = SessionState::default();
        state.begin_analysis().unwrap();
        assert_eq!(state.phase(), Phase::Analyzing);

        state.complete_analysis(HeldAnalysis {
            request: request(),
            result: result(2),
        });
        assert!(state.can_optimize());

        let target = state.begin_optimization().unwrap().unwrap();
        assert_eq!(target.patterns.len(), 2);
        assert_eq!(state.phase(), Phase::Optimizing);

        state.complete_optimization(optimization());
        assert_eq!(state.phase(), Phase::Optimized);
        assert!(state.optimization().is_some());
        assert!(state.can_optimize());
    }

    #[test]
    fn test_reanalysis_drops_optimization() {
        let mut state = analyzed(1);
        state.begin_optimization().unwrap();
        state.complete_optimization(optimization());

        state.begin_analysis().unwrap();
        assert_eq!(state.phase(), Phase::Analyzing);
        assert!(state.optimization().is_none());
        assert!(state.current_analysis().is_none());
        assert_eq!(state.displayed_analysis(), Some(&result(1)));
    }

    #[test]
    fn test_failed_analysis_keeps_stale_result() {
        let mut state = analyzed(1);
        state.begin_analysis().unwrap();
        state.fail_analysis();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.displayed_analysis(), Some(&result(1)));
        assert_eq!(state.begin_optimization(), Err(SessionError::NoAnalysis));
    }

    #[test]
    fn test_busy_states_reject_new_work() {
        let mut state = SessionState::default();
        state.begin_analysis().unwrap();
        assert_eq!(state.begin_analysis(), Err(SessionError::Busy));
        assert_eq!(state.begin_optimization(), Err(SessionError::Busy));
        assert_eq!(state.phase(), Phase::Analyzing);
    }

    #[test]
    fn test_empty_pattern_list_is_noop() {
        let mut state = analyzed(0);
        assert!(!state.can_optimize());
        assert_eq!(state.begin_optimization(), Ok(None));
        assert_eq!(state.phase(), Phase::Analyzed);
    }

    #[test]
    fn test_failed_optimization_returns_to_analyzed() {
        let mut state = analyzed(3);
        state.begin_optimization().unwrap();
        state.fail_optimization();
        assert_eq!(state.phase(), Phase::Analyzed);
        assert!(state.can_optimize());
    }

    #[test]
    fn test_reoptimize_shows_previous_result_until_replaced() {
        let mut state = analyzed(1);
        state.begin_optimization().unwrap();
        state.complete_optimization(optimization());

        let target = state.begin_optimization().unwrap().unwrap();
        assert_eq!(target.request, request());
        assert_eq!(state.phase(), Phase::Optimizing);
        assert!(!state.can_optimize());
        assert_eq!(state.optimization(), Some(&optimization()));

        let mut second = optimization();
        second.optimized_code = "c".to_string();
        state.complete_optimization(second.clone());
        assert_eq!(state.phase(), Phase::Optimized);
        assert_eq!(state.optimization(), Some(&second));
    }

    #[test]
    fn test_failed_reoptimize_returns_to_previous_result() {
        let mut state = analyzed(2);
        state.begin_optimization().unwrap();
        state.complete_optimization(optimization());
        state.begin_optimization().unwrap();

        state.fail_optimization();
        assert_eq!(state.phase(), Phase::Optimized);
        assert_eq!(state.optimization(), Some(&optimization()));
        assert!(state.can_optimize());
    }
}
