use serde::Serialize;

pub const CHAOS_SAMPLE_ID: &str = "sample-chaos";
pub const CHAOS_SAMPLE_ERROR: &str =
    "Hmm... looks like the scanner couldn't handle that many buzzwords. Maybe try a different resume?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleResume {
    pub id: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
}

pub const SAMPLE_RESUMES: &[SampleResume] = &[
    SampleResume {
        id: "sample-frontend",
        name: "Frontend Builder",
        summary: "UI polish with strong React fundamentals.",
    },
    SampleResume {
        id: "sample-backend",
        name: "Backend Systems",
        summary: "API-first builder with queues, data, and observability.",
    },
    SampleResume {
        id: "sample-fullstack",
        name: "Full-stack Generalist",
        summary: "End-to-end delivery with balanced impact.",
    },
    SampleResume {
        id: "sample-newgrad",
        name: "New Grad",
        summary: "Strong projects, lighter experience timeline.",
    },
    SampleResume {
        id: CHAOS_SAMPLE_ID,
        name: "Chaos Resume",
        summary: "Buzzwords, missing sections, and minimal proof.",
    },
];

pub fn find_sample(id: &str) -> Option<&'static SampleResume> {
    SAMPLE_RESUMES.iter().find(|sample| sample.id == id)
}

pub fn sample_resume_text(id: &str) -> Option<&'static str> {
    let text = match id {
        "sample-frontend" => "Nova Lin\nSummary\nFrontend-leaning builder crafting luminous UI experiences.\nExperience\nUI Engineer (2021-2024) Improved accessibility scores by 32% and reduced UI bugs by 18%.\nProjects\nNebula design system built with React, TypeScript, Tailwind, and Storybook.\nSkills\nJavaScript, TypeScript, React, CSS, Accessibility, Testing, Tailwind\nEducation\nB.S. Interaction Design, Orbit Academy\nContact\nnova@starlight.dev | Remote | github.com/novalin",
        "sample-backend" => "Atlas Kade\nSummary\nBackend systems engineer orchestrating resilient data flows.\nExperience\nPlatform Engineer (2016-2024) Reduced API latency by 40% and handled 3x traffic spikes.\nProjects\nQueue-driven order processor using Node, Postgres, Redis, Docker, and AWS.\nSkills\nNode, SQL, API, Testing, CI/CD, Security, Redis, Docker, AWS\nEducation\nB.S. Systems Engineering, Lunar Institute\nContact\natlas@singularity.io | Chicago, IL | github.com/atlaskade",
        "sample-fullstack" => "Rhea Sol\nSummary\nFull-stack generalist shipping end-to-end product missions.\nExperience\nProduct Engineer (2019-2024) Launched 4 customer-facing features with 25% activation lift.\nProjects\nMission control dashboard built with React, TypeScript, Node, GraphQL, Postgres.\nSkills\nJavaScript, TypeScript, React, Node, SQL, Testing, CI/CD, GraphQL\nEducation\nB.S. Computer Science, Solar City University\nContact\nrhea@starlane.dev | Austin, TX | github.com/rheasol",
        "sample-newgrad" => "Juno Vega\nSummary\nNew grad pilot eager to join a product crew.\nExperience\nIntern (2023) Assisted with frontend QA and bug triage.\nProjects\nCapstone: Orbital itinerary planner built with React, Node, and Postgres.\nSkills\nJavaScript, TypeScript, React, Node, SQL, Testing\nEducation\nB.S. Computer Science, Launchpad College\nContact\njuno@launch.dev | Seattle, WA | github.com/junovega",
        "sample-chaos" => "Zed Quasar\nSummary\nSynergy-driven hypergrowth wizard of infinite velocity.\nSkills\nBlockchain, Web3, AI, Metaverse, Quantum, VR, AR, NFT\nContact\nzed@galaxy.biz",
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_resume_text;

    #[test]
    fn test_every_sample_has_text() {
        for sample in SAMPLE_RESUMES {
            assert!(sample_resume_text(sample.id).is_some(), "{} has no text", sample.id);
        }
        assert!(sample_resume_text("sample-unknown").is_none());
    }

    #[test]
    fn test_find_sample() {
        assert_eq!(find_sample("sample-newgrad").map(|s| s.name), Some("New Grad"));
        assert!(find_sample("upload").is_none());
    }

    #[test]
    fn test_sample_texts_parse_into_named_sections() {
        let parsed = parse_resume_text(sample_resume_text("sample-backend").unwrap());
        assert_eq!(parsed.name.as_deref(), Some("Atlas Kade"));
        assert_eq!(parsed.sections.len(), 6);

        let chaos = parse_resume_text(sample_resume_text(CHAOS_SAMPLE_ID).unwrap());
        let headers: Vec<_> = chaos.sections.iter().map(|s| s.header.as_str()).collect();
        assert_eq!(headers, ["Summary", "Skills", "Contact"]);
    }
}
