//! The "try it" workflow: analyze submitted code, then optimize it.

pub mod controller;
pub mod sample;
pub mod state;

pub use controller::{CodeDraft, OptimizeOutcome, SessionController, SessionSnapshot};
pub use sample::SAMPLE_CODE;
pub use state::{HeldAnalysis, OptimizeTarget, Phase, SessionState};
