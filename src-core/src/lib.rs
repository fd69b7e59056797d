//! Core of the greenlint dashboard.
//!
//! Everything here is independent of the UI toolkit and runs the same in the
//! browser and natively: the typed API client, score grading, the analyze and
//! optimize session, the polled dashboard store and the ROI projector.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod grade;
pub mod roi;
pub mod session;

pub use api::{HttpApi, SustainabilityApi};
pub use config::Config;
pub use dashboard::{DashboardSnapshot, DashboardStore, RefreshOutcome};
pub use error::{ApiError, ConfigError, ErrorKind, ProjectionError, SessionError};
pub use grade::{grade, Grade, ScoreRing};
pub use roi::{RoiInput, RoiProjector};
pub use session::{OptimizeOutcome, Phase, SessionController, SessionSnapshot};
