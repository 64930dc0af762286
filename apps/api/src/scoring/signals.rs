//! Signal extractors: independent analyzers consumed by the scoring engine.

use regex::Regex;

use crate::scoring::constants::{
    track_skills, EMAIL_PATTERN, GITHUB_PATTERN, LINKEDIN_PATTERN, LIVE_PROJECT_PATTERN,
    LOCATION_PATTERN, PHONE_PATTERN, PORTFOLIO_PATTERN, SCALE_TERMS, SECTION_MATCHERS,
    YEAR_PATTERN,
};
use crate::scoring::models::{
    ContactSignals, LinkSignals, ResumeSection, ResumeTrack, ScanReason, ScanWarning, Seniority,
};

/// Longest plausible career span; wider ranges are usually decade mentions.
const MAX_YEAR_SPAN: u32 = 45;

pub fn count_matches(text: &str, pattern: &Regex) -> usize {
    pattern.find_iter(text).count()
}

/// Sections present anywhere in the text, in declaration order.
pub fn detect_sections(text: &str) -> Vec<ResumeSection> {
    SECTION_MATCHERS
        .iter()
        .filter(|(_, matchers)| matchers.iter().any(|m| m.is_match(text)))
        .map(|(section, _)| *section)
        .collect()
}

pub fn detect_contact(text: &str) -> ContactSignals {
    ContactSignals {
        email: EMAIL_PATTERN.is_match(text),
        phone: PHONE_PATTERN.is_match(text),
        location: LOCATION_PATTERN.is_match(text),
    }
}

pub fn detect_links(text: &str) -> LinkSignals {
    LinkSignals {
        github: GITHUB_PATTERN.is_match(text),
        linkedin: LINKEDIN_PATTERN.is_match(text),
        portfolio: PORTFOLIO_PATTERN.is_match(text),
        live_project: LIVE_PROJECT_PATTERN.is_match(text),
    }
}

/// Span between the earliest and latest 19xx/20xx year mentioned.
///
/// Returns `None` with fewer than two year mentions, a zero span, or a span
/// over 45 years.
pub fn estimate_years(text: &str) -> Option<u32> {
    let years: Vec<u32> = YEAR_PATTERN
        .captures_iter(text)
        .filter_map(|c| c[1].parse().ok())
        .collect();
    if years.len() < 2 {
        return None;
    }

    let min = years.iter().min()?;
    let max = years.iter().max()?;
    let span = max - min;
    if span == 0 || span > MAX_YEAR_SPAN {
        return None;
    }
    Some(span)
}

/// Under one year and one-to-three years both read as junior, even though
/// they score differently.
pub fn determine_seniority(years: Option<u32>) -> Seniority {
    match years {
        None | Some(0) => Seniority::Unknown,
        Some(y) if y < 3 => Seniority::Junior,
        Some(y) if y < 6 => Seniority::Mid,
        Some(_) => Seniority::Senior,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillExtraction {
    pub matched: Vec<String>,
    pub missing_core: Vec<String>,
    pub matched_core_count: usize,
    pub matched_bonus_count: usize,
}

/// Case-insensitive substring match of the track's core and bonus skills.
pub fn extract_skills(text: &str, track: ResumeTrack) -> SkillExtraction {
    let bank = track_skills(track);
    let normalized = text.to_lowercase();
    let has = |skill: &str| normalized.contains(&skill.to_lowercase());

    let matched_core: Vec<&str> = bank.core.iter().copied().filter(|s| has(s)).collect();
    let matched_bonus: Vec<&str> = bank.bonus.iter().copied().filter(|s| has(s)).collect();
    let missing_core = bank
        .core
        .iter()
        .copied()
        .filter(|skill| !matched_core.contains(skill))
        .map(|skill| skill.to_string())
        .collect();

    SkillExtraction {
        matched_core_count: matched_core.len(),
        matched_bonus_count: matched_bonus.len(),
        matched: matched_core
            .iter()
            .chain(matched_bonus.iter())
            .map(|skill| skill.to_string())
            .collect(),
        missing_core,
    }
}

/// Expects lower-cased text.
pub fn mentions_scale(lower_text: &str) -> bool {
    SCALE_TERMS.iter().any(|term| lower_text.contains(term))
}

/// Accumulates the reasons and warnings of one scoring run.
#[derive(Debug, Default)]
pub struct ReasonLog {
    pub reasons: Vec<ScanReason>,
    pub warnings: Vec<ScanWarning>,
}

impl ReasonLog {
    pub fn add_reason(&mut self, code: &str, weight: i32, detail: impl Into<String>) {
        self.reasons.push(ScanReason {
            code: code.to_string(),
            weight,
            detail: detail.into(),
        });
    }

    pub fn add_warning(&mut self, code: &str, detail: impl Into<String>) {
        self.warnings.push(ScanWarning {
            code: code.to_string(),
            detail: detail.into(),
        });
    }

    /// Sum of every recorded reason weight.
    pub fn raw_score(&self) -> i32 {
        self.reasons.iter().map(|r| r.weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_TEXT: &str = "
Summary
Engineer
Experience
Software Engineer (2019-2024)
Projects
Skills
JavaScript, TypeScript, React, Node, SQL, Testing, CI/CD, Docker
Education
";

    #[test]
    fn test_count_matches() {
        let percent = Regex::new("%").unwrap();
        assert_eq!(count_matches("value 10% and 20%", &percent), 2);
        assert_eq!(count_matches("no matches", &percent), 0);
    }

    #[test]
    fn test_detect_sections_finds_headers_and_synonyms() {
        assert_eq!(
            detect_sections(SAMPLE_TEXT),
            vec![
                ResumeSection::Experience,
                ResumeSection::Projects,
                ResumeSection::Skills,
                ResumeSection::Education,
                ResumeSection::Summary,
            ]
        );
        assert!(detect_sections("no headers here").is_empty());

        let synonyms = detect_sections("Profile\nWork History\nEmployment Overview");
        assert!(synonyms.contains(&ResumeSection::Summary));
        assert!(synonyms.contains(&ResumeSection::Experience));
    }

    #[test]
    fn test_section_detection_is_looser_than_the_parser() {
        let text = "Technical skills include Rust";
        assert_eq!(detect_sections(text), vec![ResumeSection::Skills]);
        assert!(crate::parsing::parse_resume_text(text).sections.is_empty());
    }

    #[test]
    fn test_estimate_years() {
        assert_eq!(estimate_years("2018 2024"), Some(6));
        assert_eq!(estimate_years("2024"), None);
        assert_eq!(estimate_years("2024 2024"), None);
        assert_eq!(estimate_years("1970 2024"), None);
        assert_eq!(estimate_years("Engineer (2019-2024), intern 2018"), Some(6));
        assert_eq!(estimate_years("ID 12018 and 20245"), None);
    }

    #[test]
    fn test_determine_seniority() {
        assert_eq!(determine_seniority(None), Seniority::Unknown);
        assert_eq!(determine_seniority(Some(1)), Seniority::Junior);
        assert_eq!(determine_seniority(Some(2)), Seniority::Junior);
        assert_eq!(determine_seniority(Some(3)), Seniority::Mid);
        assert_eq!(determine_seniority(Some(5)), Seniority::Mid);
        assert_eq!(determine_seniority(Some(6)), Seniority::Senior);
    }

    #[test]
    fn test_extract_skills_matched_and_missing() {
        let result = extract_skills(
            "React, TypeScript, Node, SQL, Testing, CI/CD",
            ResumeTrack::FullStack,
        );
        for skill in ["React", "TypeScript", "Node", "SQL"] {
            assert!(result.matched.iter().any(|s| s == skill), "missing {skill}");
        }
        assert!(result.missing_core.iter().any(|s| s == "JavaScript"));
        assert!(result.missing_core.iter().any(|s| s == "API"));
        assert_eq!(result.matched_core_count, 6);

        let bonus = extract_skills("react next.js", ResumeTrack::FullStack);
        assert_eq!(bonus.matched, vec!["React".to_string(), "Next.js".to_string()]);
        assert_eq!(bonus.matched_bonus_count, 1);
    }

    #[test]
    fn test_extract_skills_depends_on_track() {
        let text = "CSS and Accessibility";
        assert_eq!(extract_skills(text, ResumeTrack::Frontend).matched_core_count, 2);
        assert_eq!(extract_skills(text, ResumeTrack::Backend).matched_core_count, 0);
    }

    #[test]
    fn test_contact_and_links() {
        let contact = detect_contact("hello@finch.dev | Seattle, WA | (206) 555-0100");
        assert!(contact.email && contact.location && contact.phone);

        let none = detect_contact("react, node");
        assert!(!none.email && !none.location);

        let links = detect_links("github.com/tfinch linkedin.com/in/t-finch https://finch.io");
        assert!(links.github && links.linkedin && links.portfolio && links.live_project);
    }

    #[test]
    fn test_reason_log_appends() {
        let mut log = ReasonLog::default();
        log.add_reason("TEST_REASON", 5, "Reason added");
        log.add_reason("TEST_PENALTY", -2, "Penalty added");
        log.add_warning("TEST_WARNING", "Warning added");

        assert_eq!(log.reasons.len(), 2);
        assert_eq!(log.raw_score(), 3);
        assert_eq!(
            log.warnings,
            vec![ScanWarning {
                code: "TEST_WARNING".to_string(),
                detail: "Warning added".to_string(),
            }]
        );
    }
}
