//! Heuristic résumé scoring: signal extraction plus the weighted rule engine.

pub mod constants;
pub mod engine;
pub mod handlers;
pub mod models;
pub mod signals;

pub use engine::score_resume;
pub use models::{ResumeTrack, ScanResult};
