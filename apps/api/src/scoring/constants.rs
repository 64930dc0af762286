//! Keyword tables and compiled patterns for the heuristic scorer.

use std::sync::LazyLock;

use regex::Regex;

use crate::scoring::models::{ResumeSection, ResumeTrack};

pub const VERSION: &str = "dev-resume-v1";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("scoring pattern is valid")
}

fn word_alternation(words: &[&str]) -> Regex {
    compile(&format!(r"\b(?:{})\b", words.join("|")))
}

/// Loose section detection: any synonym anywhere in the text.
pub static SECTION_MATCHERS: LazyLock<Vec<(ResumeSection, Vec<Regex>)>> = LazyLock::new(|| {
    vec![
        (
            ResumeSection::Experience,
            vec![
                compile(r"(?i)\bexperience\b"),
                compile(r"(?i)\bwork history\b"),
                compile(r"(?i)\bemployment\b"),
            ],
        ),
        (
            ResumeSection::Projects,
            vec![
                compile(r"(?i)\bprojects?\b"),
                compile(r"(?i)\bportfolio\b"),
                compile(r"(?i)\bcase stud(?:y|ies)\b"),
            ],
        ),
        (
            ResumeSection::Skills,
            vec![
                compile(r"(?i)\bskills?\b"),
                compile(r"(?i)\btechnologies\b"),
                compile(r"(?i)\btoolbox\b"),
            ],
        ),
        (
            ResumeSection::Education,
            vec![
                compile(r"(?i)\beducation\b"),
                compile(r"(?i)\bdegree\b"),
                compile(r"(?i)\buniversity\b"),
            ],
        ),
        (
            ResumeSection::Summary,
            vec![
                compile(r"(?i)\bsummary\b"),
                compile(r"(?i)\bprofile\b"),
                compile(r"(?i)\babout\b"),
            ],
        ),
    ]
});

pub static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}"));

pub static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\b(\+?\d{1,2}\s?)?(\(?\d{3}\)?[\s.-]?)?\d{3}[\s.-]?\d{4}\b")
});

// Case-sensitive on purpose: "Seattle, WA" but not "react, node".
pub static LOCATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\b([A-Z][a-z]+,\s?[A-Z]{2}|Remote|Hybrid|On-site|Onsite)\b")
});

pub static GITHUB_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)github\.com/\w+"));

pub static LINKEDIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)linkedin\.com/in/[\w-]+"));

pub static PORTFOLIO_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)(portfolio|\.dev|\.design|\.me|\.io)\b"));

pub static LIVE_PROJECT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)(https?://[^\s]+|www\.[^\s]+)\b"));

/// Percentages, comma-grouped numbers and `Nx` multipliers.
pub static METRICS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)\b\d+(?:\.\d+)?%|\b\d{1,3}(?:,\d{3})+|\b\d+x\b")
});

pub static YEAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| compile(r"\b(19\d{2}|20\d{2})\b"));

pub const ACTION_VERBS: &[&str] = &[
    "built",
    "designed",
    "led",
    "owned",
    "launched",
    "implemented",
    "optimized",
    "improved",
    "reduced",
    "scaled",
    "delivered",
    "architected",
    "developed",
    "shipped",
    "collaborated",
];

pub const LEADERSHIP_KEYWORDS: &[&str] = &[
    "led",
    "managed",
    "mentored",
    "owner",
    "owned",
    "strategy",
    "initiative",
    "principal",
    "head",
];

pub const SCALE_TERMS: &[&str] = &[
    "scale",
    "performance",
    "latency",
    "throughput",
    "availability",
    "uptime",
    "reliability",
];

/// Matched against lower-cased text.
pub static ACTION_VERB_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| word_alternation(ACTION_VERBS));

/// Matched against lower-cased text.
pub static LEADERSHIP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| word_alternation(LEADERSHIP_KEYWORDS));

pub struct TrackSkills {
    pub core: &'static [&'static str],
    pub bonus: &'static [&'static str],
}

pub fn track_skills(track: ResumeTrack) -> TrackSkills {
    match track {
        ResumeTrack::FullStack => TrackSkills {
            core: &[
                "JavaScript",
                "TypeScript",
                "React",
                "Node",
                "API",
                "SQL",
                "Testing",
                "CI/CD",
            ],
            bonus: &[
                "Next.js", "Postgres", "GraphQL", "AWS", "Docker", "Redis", "Tailwind",
            ],
        },
        ResumeTrack::Frontend => TrackSkills {
            core: &[
                "JavaScript",
                "TypeScript",
                "React",
                "CSS",
                "Accessibility",
                "Testing",
            ],
            bonus: &["Next.js", "Tailwind", "Animations", "Design Systems"],
        },
        ResumeTrack::Backend => TrackSkills {
            core: &["Node", "SQL", "API", "Testing", "CI/CD", "Security"],
            bonus: &["Postgres", "Redis", "Docker", "AWS", "Queues"],
        },
    }
}
