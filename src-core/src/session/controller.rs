use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, info, warn};

use super::sample::SAMPLE_CODE;
use super::state::{HeldAnalysis, Phase, SessionState};
use crate::api::{
    AiProvider, AnalysisResult, AnalyzeRequest, Language, OptimizationResult, OptimizeRequest,
    SustainabilityApi,
};
use crate::error::{ErrorKind, SessionError};

/// The code buffer behind the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeDraft {
    pub code: String,
    pub language: Language,
}

impl Default for CodeDraft {
    fn default() -> Self {
        Self {
            code: SAMPLE_CODE.to_string(),
            language: Language::Cpp,
        }
    }
}

impl CodeDraft {
    pub fn filename(&self) -> &'static str {
        self.language.default_filename()
    }
}

/// Owned view of the session handed to observers and the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub phase: Phase,
    /// Current analysis, or the last good one while it is stale
    pub analysis: Option<AnalysisResult>,
    pub analysis_is_stale: bool,
    pub optimization: Option<OptimizationResult>,
    pub error: Option<String>,
    pub error_kind: Option<ErrorKind>,
    pub draft: CodeDraft,
    pub can_analyze: bool,
    pub can_optimize: bool,
}

/// Result of a successful `submit_for_optimization` call.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizeOutcome {
    Optimized(OptimizationResult),
    /// The held analysis found no patterns; no request was sent.
    NothingToOptimize,
}

type Observer = Box<dyn Fn(&SessionSnapshot)>;
type OptimizedHook = Box<dyn Fn(&OptimizationResult)>;

/// Drives one code submission through analyze and optimize.
///
/// Only one request is in flight per controller: a second analyze or an
/// optimize issued while a request is outstanding fails with
/// [`SessionError::Busy`]. All state lives in single-threaded cells; no
/// borrow is held across an await.
pub struct SessionController<A> {
    api: Rc<A>,
    provider: AiProvider,
    state: RefCell<SessionState>,
    error: RefCell<Option<SessionError>>,
    draft: RefCell<CodeDraft>,
    closed: Cell<bool>,
    observers: RefCell<Vec<Observer>>,
    optimized_hooks: RefCell<Vec<OptimizedHook>>,
}

impl<A: SustainabilityApi> SessionController<A> {
    pub fn new(api: Rc<A>, provider: AiProvider) -> Self {
        Self {
            api,
            provider,
            state: RefCell::new(SessionState::default()),
            error: RefCell::new(None),
            draft: RefCell::new(CodeDraft::default()),
            closed: Cell::new(false),
            observers: RefCell::new(Vec::new()),
            optimized_hooks: RefCell::new(Vec::new()),
        }
    }

    /// Call `observer` after every state change.
    pub fn subscribe(&self, observer: impl Fn(&SessionSnapshot) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    /// Call `hook` after each successful optimization. The dashboard uses
    /// this to refresh, since the service records a history entry per run.
    pub fn on_optimized(&self, hook: impl Fn(&OptimizationResult) + 'static) {
        self.optimized_hooks.borrow_mut().push(Box::new(hook));
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.borrow();
        let error = self.error.borrow();
        let draft = self.draft.borrow().clone();
        let closed = self.closed.get();

        SessionSnapshot {
            phase: state.phase(),
            analysis: state.displayed_analysis().cloned(),
            analysis_is_stale: state.current_analysis().is_none()
                && state.displayed_analysis().is_some(),
            optimization: state.optimization().cloned(),
            error: error.as_ref().map(|e| e.to_string()),
            error_kind: error.as_ref().map(|e| e.kind()),
            can_analyze: !closed && !state.is_busy() && !draft.code.trim().is_empty(),
            can_optimize: !closed && state.can_optimize(),
            draft,
        }
    }

    pub fn draft(&self) -> CodeDraft {
        self.draft.borrow().clone()
    }

    pub fn set_code(&self, code: impl Into<String>) {
        self.draft.borrow_mut().code = code.into();
        self.notify();
    }

    pub fn set_language(&self, language: Language) {
        self.draft.borrow_mut().language = language;
        self.notify();
    }

    /// Replace the code buffer with the built-in bubble-sort example. The
    /// selected language, analysis and optimization state are left alone.
    pub fn load_sample(&self) {
        self.draft.borrow_mut().code = SAMPLE_CODE.to_string();
        self.notify();
    }

    /// Analyze the code buffer under its language's default filename.
    pub async fn submit_draft_for_analysis(&self) -> Result<AnalysisResult, SessionError> {
        let draft = self.draft();
        self.submit_for_analysis(draft.filename(), &draft.code, draft.language)
            .await
    }

    pub async fn submit_for_analysis(
        &self,
        filename: &str,
        code: &str,
        language: Language,
    ) -> Result<AnalysisResult, SessionError> {
        if self.closed.get() {
            return Err(SessionError::Closed);
        }
        if code.trim().is_empty() {
            return Err(SessionError::EmptyCode);
        }

        self.state.borrow_mut().begin_analysis()?;
        self.error.replace(None);
        self.notify();

        info!("Analyzing {} ({} bytes of {})", filename, code.len(), language);
        let request = AnalyzeRequest {
            filename: filename.to_string(),
            code: code.to_string(),
            language,
        };
        let outcome = self.api.analyze(&request).await;

        if self.closed.get() {
            debug!("Discarding analysis of {} for a closed session", filename);
            return Err(SessionError::Closed);
        }

        match outcome {
            Ok(result) => {
                info!(
                    "Analysis of {} found {} patterns (score {})",
                    filename,
                    result.patterns.len(),
                    result.total_energy_score
                );
                self.state.borrow_mut().complete_analysis(HeldAnalysis {
                    request,
                    result: result.clone(),
                });
                self.notify();
                Ok(result)
            }
            Err(e) => {
                warn!("Analysis of {} failed: {}", filename, e);
                let err = SessionError::AnalysisFailed(e);
                self.state.borrow_mut().fail_analysis();
                self.error.replace(Some(err.clone()));
                self.notify();
                Err(err)
            }
        }
    }

    /// Optimize the held analysis. With zero detected patterns this does
    /// nothing and sends no request.
    pub async fn submit_for_optimization(&self) -> Result<OptimizeOutcome, SessionError> {
        if self.closed.get() {
            return Err(SessionError::Closed);
        }

        let target = self.state.borrow_mut().begin_optimization()?;
        let Some(target) = target else {
            debug!("No patterns detected; nothing to optimize");
            return Ok(OptimizeOutcome::NothingToOptimize);
        };
        self.error.replace(None);
        self.notify();

        info!(
            "Optimizing {} ({} patterns) with {}",
            target.request.filename,
            target.patterns.len(),
            self.provider.as_str()
        );
        let request = OptimizeRequest {
            filename: target.request.filename,
            code: target.request.code,
            patterns: target.patterns,
            language: target.request.language,
            provider: self.provider,
        };
        let outcome = self.api.optimize(&request).await;

        if self.closed.get() {
            debug!("Discarding optimization of {} for a closed session", request.filename);
            return Err(SessionError::Closed);
        }

        match outcome {
            Ok(result) => {
                info!(
                    "Optimized {}: energy {} -> {}",
                    request.filename, result.energy_before, result.energy_after
                );
                self.state.borrow_mut().complete_optimization(result.clone());
                self.notify();
                for hook in self.optimized_hooks.borrow().iter() {
                    hook(&result);
                }
                Ok(OptimizeOutcome::Optimized(result))
            }
            Err(e) => {
                warn!("Optimization of {} failed: {}", request.filename, e);
                let err = SessionError::OptimizationFailed(e);
                self.state.borrow_mut().fail_optimization();
                self.error.replace(Some(err.clone()));
                self.notify();
                Err(err)
            }
        }
    }

    pub fn clear_error(&self) {
        self.error.replace(None);
        self.notify();
    }

    /// Tear the session down. Responses that arrive afterwards are dropped
    /// and observers are no longer called.
    pub fn close(&self) {
        if !self.closed.replace(true) {
            debug!("Session closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    fn notify(&self) {
        if self.closed.get() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in self.observers.borrow().iter() {
            observer(&snapshot);
        }
    }
}
