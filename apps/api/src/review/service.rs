//! Review service: resolves the text to review, then scores and assembles it.
//!
//! `AppState` and every dialog session hold an `Arc<dyn ResumeReviewer>`, so
//! tests can swap in reviewers that fail or stall.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::review::assembler::{assemble, ReviewResult};
use crate::review::samples::sample_resume_text;
use crate::scoring::{score_resume, ResumeTrack};

/// Where the text under review came from: `upload` or a sample id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSource {
    pub id: String,
    pub label: String,
}

impl ReviewSource {
    pub fn upload() -> Self {
        Self {
            id: "upload".to_string(),
            label: "Uploaded resume".to_string(),
        }
    }

    pub fn sample(id: &str) -> Self {
        Self {
            id: id.to_string(),
            label: "Sample resume".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    pub source: ReviewSource,
    /// Takes precedence over the sample text for `source.id`.
    pub resume_text: Option<String>,
    pub track: Option<ResumeTrack>,
}

#[derive(Debug, Error)]
pub enum ReviewError {
    /// Raised by reviewers other than `HeuristicReviewer`, which never fails.
    #[cfg_attr(not(test), allow(dead_code))]
    #[error("{0}")]
    Failed(String),
}

#[async_trait]
pub trait ResumeReviewer: Send + Sync {
    async fn review(&self, request: ReviewRequest) -> Result<ReviewResult, ReviewError>;
}

/// Default reviewer: the rule-based scorer plus the review assembler.
pub struct HeuristicReviewer;

#[async_trait]
impl ResumeReviewer for HeuristicReviewer {
    async fn review(&self, request: ReviewRequest) -> Result<ReviewResult, ReviewError> {
        let text = request
            .resume_text
            .unwrap_or_else(|| {
                sample_resume_text(&request.source.id)
                    .unwrap_or_default()
                    .to_string()
            });

        let scan = score_resume(&text, request.track);
        debug!(
            "Reviewed {} ({} words): score {} {:?}",
            request.source.id, scan.signals.word_count, scan.overall.score, scan.overall.band
        );
        Ok(assemble(&scan))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESUME: &str = "
Taylor Finch
Summary
Full-stack engineer focused on delivery.
Experience
Software Engineer (2018-2024) Led delivery of a React + Node platform, improved performance by 35%.
Projects
Customer analytics dashboard built with React, TypeScript, Node, Postgres.
Skills
JavaScript, TypeScript, React, Node, SQL, Testing, CI/CD, AWS
Education
B.S. Computer Science
Contact
hello@finch.dev | Seattle, WA | github.com/tfinch
";

    fn request(source: ReviewSource, text: Option<&str>) -> ReviewRequest {
        ReviewRequest {
            source,
            resume_text: text.map(str::to_string),
            track: None,
        }
    }

    #[tokio::test]
    async fn test_reviews_uploaded_text() {
        let result = HeuristicReviewer
            .review(request(ReviewSource::upload(), Some(SAMPLE_RESUME)))
            .await
            .unwrap();

        assert!(result.score > 0);
        assert!(result.summary.contains("confidence scan"));
        assert!((1..=3).contains(&result.highlights.len()));
        assert!((1..=3).contains(&result.improvements.len()));
        assert!(result.humor.starts_with("Verdict:"));
    }

    #[tokio::test]
    async fn test_falls_back_to_sample_text() {
        let result = HeuristicReviewer
            .review(request(ReviewSource::sample("sample-frontend"), None))
            .await
            .unwrap();
        assert!(result.score > 0);
        assert!(!result.highlights.is_empty());
    }

    #[tokio::test]
    async fn test_explicit_empty_text_beats_sample_fallback() {
        let result = HeuristicReviewer
            .review(request(ReviewSource::sample("sample-backend"), Some("")))
            .await
            .unwrap();
        assert_eq!(result.score, 0);
        assert!(result.summary.contains("signals"));
    }

    #[tokio::test]
    async fn test_unknown_source_without_text_reviews_nothing() {
        let result = HeuristicReviewer
            .review(request(ReviewSource::sample("unknown"), None))
            .await
            .unwrap();
        assert_eq!(result.score, 0);
        assert!(!result.highlights.is_empty());
        assert!(!result.improvements.is_empty());
    }

    #[tokio::test]
    async fn test_track_is_forwarded_to_scoring() {
        let text = "Skills\nCSS, Accessibility";
        let frontend = HeuristicReviewer
            .review(ReviewRequest {
                track: Some(ResumeTrack::Frontend),
                ..request(ReviewSource::upload(), Some(text))
            })
            .await
            .unwrap();
        assert!(frontend.highlights.iter().any(|h| h == "2 core skills matched"));
    }
}
