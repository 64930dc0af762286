//! Review: turns a `ScanResult` into human-facing feedback, plus the sample corpus.

pub mod assembler;
pub mod handlers;
pub mod samples;
pub mod service;

pub use assembler::ReviewResult;
pub use service::{HeuristicReviewer, ResumeReviewer, ReviewError, ReviewRequest, ReviewSource};
