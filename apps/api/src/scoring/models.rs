use serde::{Deserialize, Serialize};

/// Skill-matching profile used to pick core/bonus keyword lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResumeTrack {
    #[default]
    FullStack,
    Frontend,
    Backend,
}

impl std::str::FromStr for ResumeTrack {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full-stack" | "fullstack" => Ok(Self::FullStack),
            "frontend" => Ok(Self::Frontend),
            "backend" => Ok(Self::Backend),
            other => Err(format!("unknown resume track '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Weak,
    Medium,
    Strong,
}

impl ScoreBand {
    /// Highest band whose threshold is at or below `score`.
    pub fn for_score(score: u32) -> Self {
        match score {
            s if s >= 70 => Self::Strong,
            s if s >= 40 => Self::Medium,
            _ => Self::Weak,
        }
    }
}

/// Section kinds recognised by the loose detector (contact is not scored as a section).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeSection {
    Experience,
    Projects,
    Skills,
    Education,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Junior,
    Mid,
    Senior,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReason {
    pub code: String,
    pub weight: i32,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanWarning {
    pub code: String,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSignals {
    pub email: bool,
    pub phone: bool,
    pub location: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSignals {
    pub github: bool,
    pub linkedin: bool,
    pub portfolio: bool,
    pub live_project: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSignals {
    pub matched: Vec<String>,
    pub missing_core: Vec<String>,
    pub count_matched: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceSignals {
    pub years_estimate: Option<u32>,
    pub seniority_guess: Seniority,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactSignals {
    pub metrics_mentions: usize,
    pub action_verbs: usize,
    /// Display-only, 0.0 – 1.0
    pub impact_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSignals {
    pub word_count: usize,
    pub sections_present: Vec<ResumeSection>,
    pub contact: ContactSignals,
    pub links: LinkSignals,
    pub skills: SkillSignals,
    pub experience: ExperienceSignals,
    pub impact: ImpactSignals,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    /// Clamped to 0..=100.
    pub score: u32,
    pub band: ScoreBand,
    /// Between 0.3 and 0.95.
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub overall: OverallScore,
    pub signals: ScanSignals,
    pub reasons: Vec<ScanReason>,
    pub warnings: Vec<ScanWarning>,
    pub version: String,
    pub track: ResumeTrack,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_thresholds() {
        assert_eq!(ScoreBand::for_score(0), ScoreBand::Weak);
        assert_eq!(ScoreBand::for_score(39), ScoreBand::Weak);
        assert_eq!(ScoreBand::for_score(40), ScoreBand::Medium);
        assert_eq!(ScoreBand::for_score(69), ScoreBand::Medium);
        assert_eq!(ScoreBand::for_score(70), ScoreBand::Strong);
        assert_eq!(ScoreBand::for_score(100), ScoreBand::Strong);
    }

    #[test]
    fn test_track_serde_is_kebab_case() {
        let json = serde_json::to_string(&ResumeTrack::FullStack).unwrap();
        assert_eq!(json, r#""full-stack""#);
        let track: ResumeTrack = serde_json::from_str(r#""backend""#).unwrap();
        assert_eq!(track, ResumeTrack::Backend);
    }

    #[test]
    fn test_track_from_str() {
        assert_eq!("Frontend".parse::<ResumeTrack>(), Ok(ResumeTrack::Frontend));
        assert_eq!("full-stack".parse::<ResumeTrack>(), Ok(ResumeTrack::FullStack));
        assert!("mobile".parse::<ResumeTrack>().is_err());
    }
}
