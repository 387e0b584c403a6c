//! Job analyzer: compares a profile against a pasted job description.
//!
//! Default: `KeywordJobAnalyzer` (pure-Rust, deterministic, fully testable).
//! `AppState` holds an `Arc<dyn JobAnalyzer>`, chosen at startup via config.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::profile::{char_len, Profile};

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Job description cannot be empty")]
    EmptyJobDescription,
}

/// Result of analyzing one job description against a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAnalysis {
    pub required_skills: Vec<String>,
    pub preferred_qualifications: Vec<String>,
    pub experience_level: String,
    pub suggestions: Vec<String>,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub analyzer_backend: String, // "keyword"
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap analysis backends without touching the handlers.
///
/// Carried in `AppState` as `Arc<dyn JobAnalyzer>`.
#[async_trait]
pub trait JobAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        job_description: &str,
        profile: &Profile,
    ) -> Result<JobAnalysis, AnalyzerError>;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordJobAnalyzer (default)
// ────────────────────────────────────────────────────────────────────────────

/// Skills recognised in job descriptions, in reporting order.
const COMMON_SKILLS: &[&str] = &[
    "JavaScript",
    "React",
    "Node.js",
    "Python",
    "Java",
    "SQL",
    "MongoDB",
    "AWS",
    "Docker",
    "Git",
    "Agile",
    "Scrum",
    "Leadership",
    "Communication",
    "Project Management",
    "Data Analysis",
    "Machine Learning",
    "UI/UX",
];

const MAX_REQUIRED_SKILLS: usize = 8;

const PREFERRED_QUALIFICATIONS: &[&str] =
    &["Bachelor's degree", "2+ years experience", "Team leadership"];

const DEFAULT_EXPERIENCE_LEVEL: &str = "Mid-level";

const SHORT_SUMMARY_CHARS: usize = 100;
const FEW_SKILLS: usize = 5;
const SHORT_DESCRIPTION_CHARS: usize = 50;

pub const EXPAND_SUMMARY_TIP: &str =
    "Expand your professional summary to 2-3 sentences highlighting your key achievements";
pub const ADD_TECHNICAL_SKILLS_TIP: &str =
    "Add more relevant technical skills to match the job requirements";
pub const ADD_EXPERIENCE_TIP: &str =
    "Add work experience or internships, even if they're not directly related";
pub const DETAIL_EXPERIENCE_TIP: &str =
    "Provide more detailed descriptions of your work experience with quantifiable achievements";
pub const ACTION_VERBS_TIP: &str =
    "Use action verbs like 'developed', 'implemented', 'managed' in your experience descriptions";
pub const QUANTIFY_TIP: &str =
    "Quantify your achievements with numbers, percentages, or metrics where possible";

/// Keyword-matching analyzer. No network calls; identical input gives identical output.
pub struct KeywordJobAnalyzer;

#[async_trait]
impl JobAnalyzer for KeywordJobAnalyzer {
    async fn analyze(
        &self,
        job_description: &str,
        profile: &Profile,
    ) -> Result<JobAnalysis, AnalyzerError> {
        analyze_keywords(job_description, profile)
    }
}

fn analyze_keywords(job_description: &str, profile: &Profile) -> Result<JobAnalysis, AnalyzerError> {
    if job_description.trim().is_empty() {
        return Err(AnalyzerError::EmptyJobDescription);
    }

    let required_skills = extract_required_skills(job_description);
    let profile_skills: Vec<&str> = profile.skills.filled().collect();

    Ok(JobAnalysis {
        matching_skills: matching_skills(&profile_skills, &required_skills),
        missing_skills: missing_skills(&profile_skills, &required_skills),
        required_skills,
        preferred_qualifications: PREFERRED_QUALIFICATIONS
            .iter()
            .map(|q| q.to_string())
            .collect(),
        experience_level: DEFAULT_EXPERIENCE_LEVEL.to_string(),
        suggestions: profile_suggestions(profile),
        analyzer_backend: "keyword".to_string(),
    })
}

/// Vocabulary skills mentioned anywhere in the text, case-insensitive.
fn extract_required_skills(job_description: &str) -> Vec<String> {
    let text = job_description.to_lowercase();
    COMMON_SKILLS
        .iter()
        .filter(|skill| text.contains(&skill.to_lowercase()))
        .take(MAX_REQUIRED_SKILLS)
        .map(|skill| skill.to_string())
        .collect()
}

/// Loose match: either string contains the other, ignoring case.
fn skills_overlap(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// Profile skills that cover at least one required skill, in profile order.
fn matching_skills(profile_skills: &[&str], required: &[String]) -> Vec<String> {
    profile_skills
        .iter()
        .filter(|skill| required.iter().any(|r| skills_overlap(skill, r)))
        .map(|skill| skill.to_string())
        .collect()
}

/// Required skills no profile skill covers, in vocabulary order.
fn missing_skills(profile_skills: &[&str], required: &[String]) -> Vec<String> {
    required
        .iter()
        .filter(|r| !profile_skills.iter().any(|skill| skills_overlap(skill, r)))
        .cloned()
        .collect()
}

fn profile_suggestions(profile: &Profile) -> Vec<String> {
    let mut suggestions = Vec::new();

    if char_len(&profile.summary) < SHORT_SUMMARY_CHARS {
        suggestions.push(EXPAND_SUMMARY_TIP.to_string());
    }
    if profile.skills.total() < FEW_SKILLS {
        suggestions.push(ADD_TECHNICAL_SKILLS_TIP.to_string());
    }
    if profile.experience.is_empty() {
        suggestions.push(ADD_EXPERIENCE_TIP.to_string());
    }
    if profile
        .experience
        .iter()
        .any(|e| char_len(&e.description) < SHORT_DESCRIPTION_CHARS)
    {
        suggestions.push(DETAIL_EXPERIENCE_TIP.to_string());
    }

    suggestions.push(ACTION_VERBS_TIP.to_string());
    suggestions.push(QUANTIFY_TIP.to_string());
    suggestions
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
