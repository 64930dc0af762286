//! Review assembler: summary, highlights, improvements and the humor line.

use serde::{Deserialize, Serialize};

use crate::scoring::models::{ScanResult, ScoreBand};

const MAX_ITEMS: usize = 3;
const HIGHLIGHT_FALLBACK: &str = "Resume structure detected; add more detail to strengthen signals.";
const IMPROVEMENT_FALLBACK: &str = "Add more measurable outcomes to increase impact.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResult {
    pub score: u32,
    pub summary: String,
    pub highlights: Vec<String>,
    pub improvements: Vec<String>,
    pub humor: String,
}

pub fn build_summary(scan: &ScanResult) -> String {
    let tone = match scan.overall.band {
        ScoreBand::Strong => "Strong signals",
        ScoreBand::Medium => "Solid foundation",
        ScoreBand::Weak => "Early signals",
    };
    let note = match scan.overall.confidence {
        c if c >= 0.8 => "High confidence scan",
        c if c >= 0.6 => "Moderate confidence scan",
        _ => "Limited confidence scan",
    };
    format!("{tone} with a {} and clear areas to refine.", note.to_lowercase())
}

/// Top positive reasons, heaviest first. Ties keep their scoring order.
pub fn build_highlights(scan: &ScanResult) -> Vec<String> {
    let mut positive: Vec<_> = scan.reasons.iter().filter(|r| r.weight > 0).collect();
    positive.sort_by(|a, b| b.weight.cmp(&a.weight));
    positive
        .into_iter()
        .take(MAX_ITEMS)
        .map(|r| r.detail.clone())
        .collect()
}

/// Penalties (most negative first) followed by warnings, capped at three.
pub fn build_improvements(scan: &ScanResult) -> Vec<String> {
    let mut negative: Vec<_> = scan.reasons.iter().filter(|r| r.weight < 0).collect();
    negative.sort_by_key(|r| r.weight);
    negative
        .into_iter()
        .map(|r| r.detail.clone())
        .chain(scan.warnings.iter().map(|w| w.detail.clone()))
        .take(MAX_ITEMS)
        .collect()
}

// Thresholds here are not the band thresholds.
pub fn build_humor(score: u32) -> String {
    let verdict = match score {
        s if s >= 85 => "Verdict: 5 out of 5 servo whirs. The bot is impressed.",
        s if s >= 70 => "Verdict: 4 out of 5 servo whirs. Solid circuitry detected.",
        s if s >= 40 => "Verdict: 3 out of 5 servo whirs. A few tuning bolts needed.",
        _ => "Verdict: 2 out of 5 servo whirs. Needs a full recalibration.",
    };
    verdict.to_string()
}

pub fn assemble(scan: &ScanResult) -> ReviewResult {
    let highlights = build_highlights(scan);
    let improvements = build_improvements(scan);

    ReviewResult {
        score: scan.overall.score,
        summary: build_summary(scan),
        highlights: if highlights.is_empty() {
            vec![HIGHLIGHT_FALLBACK.to_string()]
        } else {
            highlights
        },
        improvements: if improvements.is_empty() {
            vec![IMPROVEMENT_FALLBACK.to_string()]
        } else {
            improvements
        },
        humor: build_humor(scan.overall.score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::score_resume;
    use crate::scoring::models::{ResumeSection, ScanReason, ScanWarning};

    const FULL_RESUME: &str = "Morgan Reyes
Summary
Full-stack engineer who enjoys turning messy product ideas into reliable, well-tested software. Comfortable owning features from the first sketch to production monitoring, and happiest on small teams that ship often and measure what they ship. Based in Colorado and open to hybrid or remote roles.
Experience
Senior Software Engineer, Lumen Health (2019-2024)
Led a team of four engineers rebuilding the patient scheduling platform with React, TypeScript and Node.
Designed a GraphQL API layer that reduced page load time by 45% and cut support tickets by 30%.
Owned the migration from a legacy monolith to containerised services on AWS with Docker and Postgres.
Implemented end-to-end testing in CI/CD pipelines, raising release frequency from monthly to twice a week.
Mentored two junior developers through code review, pairing sessions and a weekly reading group.
Improved availability to 99.95% uptime by adding health checks, alerting and clear runbooks.
Software Engineer, Brightline Logistics (2016-2019)
Built internal dashboards in React that tracked 12,000 daily shipments across three regions.
Optimized SQL queries behind the reporting service, bringing p95 latency down from 900ms to 150ms.
Shipped a Redis caching layer that handled 3x holiday traffic without new hardware.
Collaborated with product and operations to launch a driver mobile web app used by 800 drivers.
Junior Developer, Cobalt Studio (2014-2016)
Developed marketing sites and small e-commerce stores for local businesses using JavaScript and a handful of PHP templates.
Implemented a reusable component library that let designers assemble new landing pages in hours instead of days.
Reduced image payloads by 60% with an automated build step, which improved search rankings for several clients.
Collaborated directly with clients to gather requirements, estimate work and present weekly demos of progress.
Projects
Open-source scheduling toolkit: a small Node library for recurring calendar rules with thorough tests and clear documentation, used by several community projects and maintained with regular releases, a changelog and friendly contribution guidelines for newcomers.
Personal finance tracker built with Next.js, Tailwind and Postgres, deployed at https://ledger.morgan.dev with live demo accounts.
Weekend hackathon winner for a volunteer matching app delivered in 36 hours with a team of three.
Skills
JavaScript, TypeScript, React, Node, API design, SQL, Testing, CI/CD, Next.js, Postgres, GraphQL, AWS, Docker, Redis, Tailwind
Education
B.S. Computer Science, Northbridge University
Relevant coursework in distributed systems, databases and human computer interaction. Senior capstone project built a real-time transit arrival board for the campus shuttle network, later adopted by the university transportation office and still running today.
Contact
morgan@reyes.dev | Denver, CO | (303) 555-0142 | github.com/mreyes | linkedin.com/in/morgan-reyes
";

    fn reason(weight: i32, detail: &str) -> ScanReason {
        ScanReason {
            code: "TEST".to_string(),
            weight,
            detail: detail.to_string(),
        }
    }

    fn fixture() -> ScanResult {
        let mut scan = score_resume("", None);
        scan.overall.score = 82;
        scan.overall.band = ScoreBand::Strong;
        scan.overall.confidence = 0.82;
        scan.reasons = vec![
            reason(8, "Primary strength"),
            reason(5, "Secondary strength"),
            reason(-6, "Missing details"),
            reason(2, "Bonus"),
        ];
        scan.warnings = vec![ScanWarning {
            code: "NO_PHONE".to_string(),
            detail: "No phone".to_string(),
        }];
        scan
    }

    #[test]
    fn test_summary_uses_band_and_confidence() {
        assert_eq!(
            build_summary(&fixture()),
            "Strong signals with a high confidence scan and clear areas to refine."
        );

        let mut scan = fixture();
        scan.overall.band = ScoreBand::Medium;
        scan.overall.confidence = 0.6;
        assert_eq!(
            build_summary(&scan),
            "Solid foundation with a moderate confidence scan and clear areas to refine."
        );

        scan.overall.band = ScoreBand::Weak;
        scan.overall.confidence = 0.4;
        assert_eq!(
            build_summary(&scan),
            "Early signals with a limited confidence scan and clear areas to refine."
        );
    }

    #[test]
    fn test_highlights_sorted_by_weight() {
        assert_eq!(
            build_highlights(&fixture()),
            ["Primary strength", "Secondary strength", "Bonus"]
        );
    }

    #[test]
    fn test_highlights_keep_order_on_ties() {
        let mut scan = fixture();
        scan.reasons = vec![
            reason(4, "first"),
            reason(8, "top"),
            reason(4, "second"),
            reason(4, "third"),
        ];
        assert_eq!(build_highlights(&scan), ["top", "first", "second"]);
    }

    #[test]
    fn test_improvements_put_penalties_before_warnings() {
        assert_eq!(build_improvements(&fixture()), ["Missing details", "No phone"]);

        let mut scan = fixture();
        scan.reasons.push(reason(-20, "Worst"));
        scan.reasons.push(reason(-10, "Bad"));
        assert_eq!(build_improvements(&scan), ["Worst", "Bad", "Missing details"]);
    }

    #[test]
    fn test_humor_thresholds() {
        assert!(build_humor(85).contains("5 out of 5"));
        assert!(build_humor(84).contains("4 out of 5"));
        assert!(build_humor(70).contains("4 out of 5"));
        assert!(build_humor(69).contains("3 out of 5"));
        assert!(build_humor(40).contains("3 out of 5"));
        assert!(build_humor(39).contains("2 out of 5"));
        assert!(build_humor(0).contains("2 out of 5"));
    }

    #[test]
    fn test_assemble_falls_back_when_lists_are_empty() {
        let mut scan = fixture();
        scan.reasons.clear();
        scan.warnings.clear();

        let review = assemble(&scan);
        assert_eq!(review.score, 82);
        assert_eq!(review.highlights, [HIGHLIGHT_FALLBACK]);
        assert_eq!(review.improvements, [IMPROVEMENT_FALLBACK]);
    }

    #[test]
    fn test_assemble_weak_text() {
        let review = assemble(&score_resume("No email or skills listed.", None));
        assert!(review.summary.starts_with("Early signals"));
        assert_eq!(review.humor, "Verdict: 2 out of 5 servo whirs. Needs a full recalibration.");
        assert_eq!(review.improvements.len(), 3);
        assert!(review.highlights.len() <= 3);
    }

    #[test]
    fn test_full_resume_is_strong_with_few_highlights() {
        let scan = score_resume(FULL_RESUME, None);
        assert!((400..=440).contains(&scan.signals.word_count));
        for section in [
            ResumeSection::Experience,
            ResumeSection::Projects,
            ResumeSection::Skills,
            ResumeSection::Education,
        ] {
            assert!(scan.signals.sections_present.contains(&section));
        }
        assert!(scan.signals.contact.email);
        assert!(scan.signals.links.github);
        assert_eq!(scan.overall.band, ScoreBand::Strong);

        let review = assemble(&scan);
        assert!((1..=3).contains(&review.highlights.len()));
        assert!(review.summary.starts_with("Strong signals"));
        assert_eq!(review.score, scan.overall.score);
    }
}
