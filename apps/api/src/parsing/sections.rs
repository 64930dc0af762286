//! Section parser: splits plain résumé text into a name and ordered sections.
//!
//! Header matching here is exact (whole line, case-insensitive). The scorer's
//! section detection is deliberately looser and lives in `scoring::signals`.

use serde::{Deserialize, Serialize};

/// Header vocabulary recognised by the parser, in canonical lower-case form.
pub const SECTION_HEADERS: &[&str] = &[
    "summary",
    "experience",
    "projects",
    "skills",
    "education",
    "contact",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResumeSection {
    pub header: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResume {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub sections: Vec<ParsedResumeSection>,
}

/// Parses résumé text into `ParsedResume`. Never fails; the worst case is a
/// name with no sections.
pub fn parse_resume_text(resume_text: &str) -> ParsedResume {
    if resume_text.trim().is_empty() {
        return ParsedResume::default();
    }

    let lines = resume_text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let mut sections = Vec::new();
    let mut current: Option<ParsedResumeSection> = None;
    let mut name: Option<String> = None;

    for (index, line) in lines.enumerate() {
        let lower = line.to_lowercase();

        if index == 0 && !SECTION_HEADERS.iter().any(|h| lower.contains(h)) {
            name = Some(line.to_string());
            continue;
        }

        if let Some(header) = SECTION_HEADERS.iter().find(|h| lower == **h) {
            if let Some(section) = current.take() {
                sections.push(section);
            }
            current = Some(ParsedResumeSection {
                header: capitalize(header),
                content: String::new(),
            });
        } else if let Some(section) = current.as_mut() {
            if !section.content.is_empty() {
                section.content.push('\n');
            }
            section.content.push_str(line);
        } else if name.is_none() {
            name = Some(line.to_string());
        }
    }

    if let Some(section) = current {
        sections.push(section);
    }

    ParsedResume { name, sections }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parses_complete_resume() {
        let text = "John Doe\nSummary\nExperienced developer.\nExperience\nSoftware Engineer (2020-2024)\nProjects\nProject A\nSkills\nJavaScript, TypeScript\nEducation\nB.S. Computer Science\nContact\njohn@example.com";
        let parsed = parse_resume_text(text);

        assert_eq!(parsed.name.as_deref(), Some("John Doe"));
        let headers: Vec<_> = parsed.sections.iter().map(|s| s.header.as_str()).collect();
        assert_eq!(
            headers,
            ["Summary", "Experience", "Projects", "Skills", "Education", "Contact"]
        );
        assert_eq!(parsed.sections[1].content, "Software Engineer (2020-2024)");
        assert_eq!(parsed.sections[5].content, "john@example.com");
    }

    #[test]
    fn test_missing_sections_are_skipped() {
        let parsed =
            parse_resume_text("Jane Smith\nSummary\nFrontend developer.\nSkills\nReact, Vue");
        assert_eq!(parsed.name.as_deref(), Some("Jane Smith"));
        assert_eq!(parsed.sections.len(), 2);
        assert_eq!(parsed.sections[1].header, "Skills");
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert_eq!(parse_resume_text(""), ParsedResume::default());
        assert_eq!(parse_resume_text("   \n\n  "), ParsedResume::default());
    }

    #[test]
    fn test_no_name_when_first_line_is_header() {
        let parsed = parse_resume_text("Summary\nExperienced developer.\nSkills\nJavaScript");
        assert!(parsed.name.is_none());
        assert_eq!(parsed.sections.len(), 2);
    }

    #[test]
    fn test_multiline_content_is_preserved() {
        let parsed = parse_resume_text(
            "John Doe\nExperience\nSoftware Engineer (2020-2024)\nWorked on multiple projects.\n\nLed a team of 5 developers.",
        );
        assert_eq!(
            parsed.sections[0].content,
            "Software Engineer (2020-2024)\nWorked on multiple projects.\nLed a team of 5 developers."
        );
    }

    #[test]
    fn test_headers_are_case_insensitive_and_canonicalised() {
        let parsed =
            parse_resume_text("John Doe\nSUMMARY\nExperienced developer.\nsKiLlS\nJavaScript");
        assert_eq!(parsed.sections[0].header, "Summary");
        assert_eq!(parsed.sections[1].header, "Skills");
    }

    #[test]
    fn test_header_inside_longer_line_does_not_split() {
        let parsed = parse_resume_text("Ada\nExperience\nWork experience at Initech\nTechnical skills: Rust");
        assert_eq!(parsed.sections.len(), 1);
        assert_eq!(
            parsed.sections[0].content,
            "Work experience at Initech\nTechnical skills: Rust"
        );
    }

    #[test]
    fn test_first_line_containing_header_word_still_becomes_name() {
        let parsed = parse_resume_text("Skills Person\nExperience\nBuilt things");
        assert_eq!(parsed.name.as_deref(), Some("Skills Person"));
        assert_eq!(parsed.sections.len(), 1);
    }

    #[test]
    fn test_lines_before_first_header_after_name_are_dropped() {
        let parsed = parse_resume_text("Ada Lovelace\nLondon\nSkills\nMath");
        assert_eq!(parsed.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(parsed.sections.len(), 1);
        assert_eq!(parsed.sections[0].content, "Math");
    }

    #[test]
    fn test_duplicate_headers_open_new_sections() {
        let parsed = parse_resume_text("Ada\nSkills\nRust\nSkills\nGo");
        assert_eq!(parsed.sections.len(), 2);
        assert_eq!(parsed.sections[0].content, "Rust");
        assert_eq!(parsed.sections[1].content, "Go");
    }

    fn content_line() -> impl Strategy<Value = String> {
        "[a-z]{1,10}( [a-z]{1,10}){0,3}"
            .prop_filter("must not be a header", |line| {
                !SECTION_HEADERS.contains(&line.as_str())
            })
    }

    proptest! {
        #[test]
        fn prop_reparsing_a_section_reproduces_it(
            header_index in 0..SECTION_HEADERS.len(),
            lines in prop::collection::vec(content_line(), 0..6),
        ) {
            let header = capitalize(SECTION_HEADERS[header_index]);
            let text = format!("{header}\n{}", lines.join("\n"));
            let parsed = parse_resume_text(&text);

            prop_assert_eq!(parsed.sections.len(), 1);
            let section = &parsed.sections[0];
            let reparsed = parse_resume_text(&format!("{}\n{}", section.header, section.content));
            prop_assert_eq!(&reparsed.sections, &parsed.sections);
        }

        #[test]
        fn prop_text_without_headers_has_no_sections(
            lines in prop::collection::vec("[0-9a-z ,.]{0,30}", 0..10),
        ) {
            let text = lines.join("\n");
            prop_assume!(!text.lines().any(|l| SECTION_HEADERS.contains(&l.trim())));
            let parsed = parse_resume_text(&text);
            prop_assert!(parsed.sections.is_empty());
        }
    }
}
