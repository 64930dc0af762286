//! Dialog sessions: per-session orchestration of dialog, scans and scene.

pub mod handlers;
pub mod orchestrator;
pub mod registry;

pub use orchestrator::{DialogSession, SessionSettings};
pub use registry::SessionRegistry;
