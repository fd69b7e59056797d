use thiserror::Error;

/// Failure talking to the analysis service.
///
/// Non-2xx responses only carry the status and endpoint; the body of an
/// error response is never read.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("API error ({status}): failed to fetch {endpoint}")]
    Status { status: u16, endpoint: String },

    #[error("Request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("Malformed response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl ApiError {
    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::Status { endpoint, .. }
            | ApiError::Transport { endpoint, .. }
            | ApiError::Decode { endpoint, .. } => endpoint,
        }
    }

    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Coarse classification used by the UI to pick how an error is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Validation,
    StaleState,
    Busy,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("Code must not be empty")]
    EmptyCode,

    #[error("No current analysis; analyze the code first")]
    NoAnalysis,

    #[error("Another request is still in progress")]
    Busy,

    #[error("Analysis failed. Is the backend running?")]
    AnalysisFailed(#[source] ApiError),

    #[error("Optimization failed. Check AI provider availability.")]
    OptimizationFailed(#[source] ApiError),

    #[error("Session was closed")]
    Closed,
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::EmptyCode => ErrorKind::Validation,
            SessionError::NoAnalysis => ErrorKind::StaleState,
            SessionError::Busy => ErrorKind::Busy,
            SessionError::AnalysisFailed(_) | SessionError::OptimizationFailed(_) => {
                ErrorKind::Network
            }
            SessionError::Closed => ErrorKind::Closed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("Invalid ROI input: {0}")]
    InvalidInput(String),

    #[error("ROI calculation failed: {0}")]
    Failed(#[source] ApiError),

    #[error("ROI request was superseded by a newer one")]
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl From<SessionError> for String {
    fn from(err: SessionError) -> Self {
        err.to_string()
    }
}
