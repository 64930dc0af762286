//! Scoring engine: turns résumé text into a deterministic `ScanResult`.
//!
//! Every rule that fires records a `ScanReason`; the score is the clamped sum
//! of those weights, so the reasons always explain the number.

use crate::scoring::constants::{
    ACTION_VERB_PATTERN, LEADERSHIP_PATTERN, METRICS_PATTERN, VERSION,
};
use crate::scoring::models::{
    ExperienceSignals, ImpactSignals, OverallScore, ResumeSection, ResumeTrack, ScanResult,
    ScanSignals, ScoreBand, SkillSignals,
};
use crate::scoring::signals::{
    count_matches, detect_contact, detect_links, detect_sections, determine_seniority,
    estimate_years, extract_skills, mentions_scale, ReasonLog,
};

const SHORT_RESUME_WORDS: usize = 200;
const LONG_RESUME_WORDS: usize = 1200;

/// Scores résumé text against a track (full-stack when `None`).
///
/// Pure and infallible: empty text still produces a result, flagged with an
/// `EMPTY_RESUME` warning.
pub fn score_resume(resume_text: &str, track: Option<ResumeTrack>) -> ScanResult {
    let track = track.unwrap_or_default();
    let word_count = resume_text.split_whitespace().count();
    let lower = resume_text.to_lowercase();

    let sections = detect_sections(resume_text);
    let contact = detect_contact(resume_text);
    let links = detect_links(resume_text);
    let years = estimate_years(resume_text);
    let metrics = count_matches(resume_text, &METRICS_PATTERN);
    let action_verbs = count_matches(&lower, &ACTION_VERB_PATTERN);
    let leadership = count_matches(&lower, &LEADERSHIP_PATTERN);
    let scale = mentions_scale(&lower);
    let skills = extract_skills(resume_text, track);

    let has = |section: ResumeSection| sections.contains(&section);
    let mut log = ReasonLog::default();

    // Sections
    if has(ResumeSection::Experience) {
        log.add_reason("SEC_EXPERIENCE_PRESENT", 8, "Experience section detected");
    }
    if has(ResumeSection::Projects) {
        log.add_reason("SEC_PROJECTS_PRESENT", 8, "Projects section detected");
    }
    if has(ResumeSection::Skills) {
        log.add_reason("SEC_SKILLS_PRESENT", 4, "Skills section detected");
    } else {
        log.add_reason("PENALTY_NO_SKILLS", -6, "No skills section detected");
    }
    if has(ResumeSection::Education) {
        log.add_reason("SEC_EDUCATION_PRESENT", 2, "Education section detected");
    }
    if has(ResumeSection::Summary) {
        log.add_reason("SEC_SUMMARY_PRESENT", 3, "Summary/profile section detected");
    }

    // Contact
    if contact.email {
        log.add_reason("CONTACT_EMAIL", 2, "Email address detected");
    } else {
        log.add_reason("PENALTY_NO_EMAIL", -20, "No email address detected");
    }
    if contact.location {
        log.add_reason("CONTACT_LOCATION", 1, "Location detected");
    } else {
        log.add_warning("NO_LOCATION", "No location detected");
    }
    if contact.phone {
        log.add_reason("CONTACT_PHONE", 1, "Phone number detected");
    } else {
        log.add_warning("NO_PHONE", "No phone number detected");
    }

    // Links
    if links.github {
        log.add_reason("LINK_GITHUB", 8, "GitHub profile found");
    }
    if links.portfolio {
        log.add_reason("LINK_PORTFOLIO", 6, "Portfolio link found");
    }
    if links.linkedin {
        log.add_reason("LINK_LINKEDIN", 4, "LinkedIn profile found");
    }
    if links.live_project {
        log.add_reason("LINK_LIVE_PROJECT", 2, "Live project link found");
    }

    // Skills
    let core_points = (skills.matched_core_count * 3).min(18) as i32;
    if core_points > 0 {
        log.add_reason(
            "SKILL_CORE_MATCH",
            core_points,
            format!("{} core skills matched", skills.matched_core_count),
        );
    } else {
        log.add_reason("PENALTY_NO_CORE_SKILLS", -8, "No core skills detected");
    }
    let bonus_points = skills.matched_bonus_count.min(7) as i32;
    if bonus_points > 0 {
        log.add_reason(
            "SKILL_BONUS_MATCH",
            bonus_points,
            format!("{} bonus skills matched", skills.matched_bonus_count),
        );
    }

    // Experience
    match years {
        Some(0) => log.add_reason("EXP_YEARS_0_1", 2, "Estimated 0–1 years experience"),
        Some(y) if y < 3 => log.add_reason("EXP_YEARS_1_3", 6, "Estimated 1–3 years experience"),
        Some(y) if y < 6 => log.add_reason("EXP_YEARS_3_6", 10, "Estimated 3–6 years experience"),
        Some(_) => log.add_reason("EXP_YEARS_6_PLUS", 12, "Estimated 6+ years experience"),
        None => {
            log.add_reason("EXP_UNKNOWN", 4, "Experience timeframe unclear");
            log.add_warning("EXP_UNCERTAIN", "Could not estimate years of experience");
        }
    }
    if leadership > 0 {
        log.add_reason("EXP_LEADERSHIP", 3, "Leadership or ownership keywords detected");
    }

    // Impact
    if metrics > 0 {
        let points = (metrics * 2).min(8) as i32;
        log.add_reason("IMPACT_METRICS", points, "Metrics and KPIs referenced");
    }
    let verb_points = (action_verbs / 3).min(5) as i32;
    if verb_points > 0 {
        log.add_reason("IMPACT_ACTION_VERBS", verb_points, "Strong action verbs used");
    }
    if scale {
        log.add_reason("IMPACT_SCALE", 2, "Performance or scale mentioned");
    }

    // Penalties
    if word_count < SHORT_RESUME_WORDS {
        log.add_reason("PENALTY_SHORT", -10, "Resume is under 200 words");
    }
    if word_count > LONG_RESUME_WORDS {
        log.add_reason("PENALTY_LONG", -5, "Resume exceeds 1200 words");
    }
    if !has(ResumeSection::Projects) && !links.github {
        log.add_reason(
            "PENALTY_NO_PROJECTS",
            -10,
            "No projects section or GitHub detected",
        );
    }

    let score = log.raw_score().clamp(0, 100) as u32;

    let mut confidence: f64 = 0.6;
    if sections.len() >= 3 {
        confidence += 0.1;
    }
    if years.is_some() {
        confidence += 0.1;
    }
    if links.github {
        confidence += 0.1;
    }
    if word_count < SHORT_RESUME_WORDS {
        confidence -= 0.2;
    }
    let confidence = confidence.clamp(0.3, 0.95);

    let impact_score = (metrics as f64 / 5.0
        + action_verbs as f64 / 20.0
        + if scale { 0.2 } else { 0.0 })
    .clamp(0.0, 1.0);

    if word_count == 0 {
        log.add_warning("EMPTY_RESUME", "No readable text detected");
    }

    ScanResult {
        overall: OverallScore {
            score,
            band: ScoreBand::for_score(score),
            confidence,
        },
        signals: ScanSignals {
            word_count,
            sections_present: sections,
            contact,
            links,
            skills: SkillSignals {
                count_matched: skills.matched.len(),
                matched: skills.matched,
                missing_core: skills.missing_core,
            },
            experience: ExperienceSignals {
                years_estimate: years,
                seniority_guess: determine_seniority(years),
            },
            impact: ImpactSignals {
                metrics_mentions: metrics,
                action_verbs,
                impact_score,
            },
        },
        reasons: log.reasons,
        warnings: log.warnings,
        version: VERSION.to_string(),
        track,
    }
}
