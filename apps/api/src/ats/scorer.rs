//! ATS compatibility scorer.
//!
//! Six fixed categories with integer points that sum to 100. The scorer is a
//! pure function of the profile snapshot: no state, no I/O, never fails.

use serde::{Deserialize, Serialize};

use crate::models::profile::{char_len, is_present, is_present_opt, Profile};

// ────────────────────────────────────────────────────────────────────────────
// Report data model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtsCategory {
    ContactInformation,
    KeywordsAndSkills,
    FormattingAndStructure,
    RequiredSections,
    CvLength,
    FileFormat,
}

impl AtsCategory {
    /// Report order.
    pub const ALL: [AtsCategory; 6] = [
        AtsCategory::ContactInformation,
        AtsCategory::KeywordsAndSkills,
        AtsCategory::FormattingAndStructure,
        AtsCategory::RequiredSections,
        AtsCategory::CvLength,
        AtsCategory::FileFormat,
    ];

    pub fn max_score(&self) -> u32 {
        match self {
            AtsCategory::ContactInformation => 20,
            AtsCategory::KeywordsAndSkills => 25,
            AtsCategory::FormattingAndStructure => 20,
            AtsCategory::RequiredSections => 20,
            AtsCategory::CvLength => 10,
            AtsCategory::FileFormat => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AtsCategory::ContactInformation => "Contact Information",
            AtsCategory::KeywordsAndSkills => "Keywords & Skills",
            AtsCategory::FormattingAndStructure => "Formatting & Structure",
            AtsCategory::RequiredSections => "Required Sections",
            AtsCategory::CvLength => "CV Length",
            AtsCategory::FileFormat => "File Format",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AtsCategory::ContactInformation => {
                "Essential contact details are present and properly formatted"
            }
            AtsCategory::KeywordsAndSkills => {
                "Relevant keywords and skills are included for ATS scanning"
            }
            AtsCategory::FormattingAndStructure => {
                "Clean, simple formatting that ATS systems can parse"
            }
            AtsCategory::RequiredSections => "All important CV sections are included",
            AtsCategory::CvLength => "Appropriate length for your experience level",
            AtsCategory::FileFormat => "CV is in ATS-friendly format",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusTier {
    Excellent,
    Good,
    NeedsImprovement,
    Poor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub category: AtsCategory,
    pub name: String,
    pub score: u32,
    pub max_score: u32,
    pub status: StatusTier,
    pub description: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsReport {
    pub overall_score: u32, // 0-100
    pub status: StatusTier,
    pub categories: Vec<CategoryResult>,
}

impl AtsReport {
    pub fn category(&self, category: AtsCategory) -> Option<&CategoryResult> {
        self.categories.iter().find(|c| c.category == category)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Suggestions
// ────────────────────────────────────────────────────────────────────────────

pub const ADD_FULL_NAME: &str = "Add your full name";
pub const ADD_EMAIL: &str = "Add a professional email address";
pub const ADD_PHONE: &str = "Include your phone number";
pub const ADD_LINKEDIN: &str = "Add your LinkedIn profile";
pub const ADD_MORE_SKILLS: &str = "Add more relevant skills (aim for 5-10)";
pub const EXPAND_SUMMARY: &str = "Expand your professional summary";
pub const ADD_EXPERIENCE_OR_INTERNSHIP: &str = "Add work experience or internships";
pub const ADD_SUMMARY_SECTION: &str = "Add a professional summary section";
pub const ADD_EDUCATION_BACKGROUND: &str = "Include your educational background";
pub const ADD_SUMMARY: &str = "Add a professional summary";
pub const ADD_EDUCATION_SECTION: &str = "Include education section";
pub const ADD_EXPERIENCE: &str = "Add work experience";
pub const LIST_SKILLS: &str = "List your skills";
pub const EXPAND_CONTENT: &str = "Add more details to your experience and summary";
pub const CONDENSE_CONTENT: &str = "Consider condensing your content for better readability";

// ────────────────────────────────────────────────────────────────────────────
// Thresholds
// ────────────────────────────────────────────────────────────────────────────

const SKILLS_FOR_KEYWORDS: usize = 5;
const SKILLS_FOR_KEYWORDS_BONUS: usize = 8;
const SUMMARY_KEYWORD_CHARS: usize = 100;

/// Formatting is not inspected; a digital CV is assumed to parse cleanly.
const FORMATTING_BASE: u32 = 15;

const IDEAL_LENGTH: (usize, usize) = (500, 2000);
const ACCEPTABLE_LENGTH: (usize, usize) = (300, 2500);
const MINIMUM_LENGTH: usize = 200;

/// Summary length needed before the score is worth showing to the user.
const READY_SUMMARY_CHARS: usize = 50;
const READY_MIN_SKILLS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Maps a score to its status tier by percentage of `max`.
///
/// ≥90% excellent, ≥70% good, ≥50% needs-improvement, otherwise poor.
/// Compared in integers so exact boundaries are never lost to rounding.
pub fn status_for(score: u32, max: u32) -> StatusTier {
    if max == 0 {
        return StatusTier::Poor;
    }
    let scaled = u64::from(score) * 100;
    let max = u64::from(max);
    if scaled >= max * 90 {
        StatusTier::Excellent
    } else if scaled >= max * 70 {
        StatusTier::Good
    } else if scaled >= max * 50 {
        StatusTier::NeedsImprovement
    } else {
        StatusTier::Poor
    }
}

/// Summary length plus every experience description length, in characters.
pub fn content_length(profile: &Profile) -> usize {
    char_len(&profile.summary)
        + profile
            .experience
            .iter()
            .map(|e| char_len(&e.description))
            .sum::<usize>()
}

/// Computes the full ATS report for a profile snapshot.
pub fn score(profile: &Profile) -> AtsReport {
    let categories: Vec<CategoryResult> = AtsCategory::ALL
        .iter()
        .map(|&category| {
            let (score, suggestions) = match category {
                AtsCategory::ContactInformation => contact_information(profile),
                AtsCategory::KeywordsAndSkills => keywords_and_skills(profile),
                AtsCategory::FormattingAndStructure => formatting_and_structure(profile),
                AtsCategory::RequiredSections => required_sections(profile),
                AtsCategory::CvLength => cv_length(content_length(profile)),
                AtsCategory::FileFormat => (AtsCategory::FileFormat.max_score(), vec![]),
            };
            let max_score = category.max_score();
            let score = score.min(max_score);
            CategoryResult {
                category,
                name: category.name().to_string(),
                score,
                max_score,
                status: status_for(score, max_score),
                description: category.description().to_string(),
                suggestions,
            }
        })
        .collect();

    let overall_score = categories.iter().map(|c| c.score).sum::<u32>().min(100);

    AtsReport {
        overall_score,
        status: status_for(overall_score, 100),
        categories,
    }
}

/// Whether the profile is complete enough for the score to be meaningful.
/// Used as a display hint only; `score` accepts any profile.
pub fn is_score_ready(profile: &Profile) -> bool {
    let info = &profile.personal_info;
    is_present(&info.full_name)
        && is_present(&info.email)
        && char_len(&profile.summary) > READY_SUMMARY_CHARS
        && !profile.education.is_empty()
        && profile.skills.total() >= READY_MIN_SKILLS
}

fn contact_information(profile: &Profile) -> (u32, Vec<String>) {
    let info = &profile.personal_info;
    let has_name = is_present(&info.full_name);
    let has_email = is_present(&info.email);
    let has_phone = is_present(&info.phone);
    let has_address = info.present_address.has_any_field() || info.permanent_address.has_any_field();
    let has_linkedin = is_present_opt(&info.linkedin);

    let score = points(has_name, 5)
        + points(has_email, 5)
        + points(has_phone, 5)
        + points(has_address, 3)
        + points(has_linkedin, 2);

    let suggestions = suggest(&[
        (!has_name, ADD_FULL_NAME),
        (!has_email, ADD_EMAIL),
        (!has_phone, ADD_PHONE),
        (!has_linkedin, ADD_LINKEDIN),
    ]);

    (score, suggestions)
}

fn keywords_and_skills(profile: &Profile) -> (u32, Vec<String>) {
    let skills = profile.skills.total();
    let summary_len = char_len(&profile.summary);
    let has_experience = !profile.experience.is_empty();

    let score = points(skills >= SKILLS_FOR_KEYWORDS, 10)
        + points(skills >= SKILLS_FOR_KEYWORDS_BONUS, 5)
        + points(summary_len > SUMMARY_KEYWORD_CHARS, 5)
        + points(has_experience, 5);

    // A summary of exactly 100 chars earns no points and gets no suggestion.
    let suggestions = suggest(&[
        (skills < SKILLS_FOR_KEYWORDS, ADD_MORE_SKILLS),
        (summary_len < SUMMARY_KEYWORD_CHARS, EXPAND_SUMMARY),
        (!has_experience, ADD_EXPERIENCE_OR_INTERNSHIP),
    ]);

    (score, suggestions)
}

fn formatting_and_structure(profile: &Profile) -> (u32, Vec<String>) {
    let has_summary = is_present(&profile.summary);
    let has_education = !profile.education.is_empty();

    let score = FORMATTING_BASE + points(has_summary, 3) + points(has_education, 2);
    let suggestions = suggest(&[
        (!has_summary, ADD_SUMMARY_SECTION),
        (!has_education, ADD_EDUCATION_BACKGROUND),
    ]);

    (score, suggestions)
}

fn required_sections(profile: &Profile) -> (u32, Vec<String>) {
    let has_name = is_present(&profile.personal_info.full_name);
    let has_summary = is_present(&profile.summary);
    let has_education = !profile.education.is_empty();
    let has_experience = !profile.experience.is_empty();
    let has_skills = profile.skills.total() > 0;

    let score = points(has_name, 4)
        + points(has_summary, 4)
        + points(has_education, 4)
        + points(has_experience, 4)
        + points(has_skills, 4);

    // Name has no suggestion here; contact information already asks for it.
    let suggestions = suggest(&[
        (!has_summary, ADD_SUMMARY),
        (!has_education, ADD_EDUCATION_SECTION),
        (!has_experience, ADD_EXPERIENCE),
        (!has_skills, LIST_SKILLS),
    ]);

    (score, suggestions)
}

fn cv_length(total: usize) -> (u32, Vec<String>) {
    let in_range = |(lo, hi): (usize, usize)| total >= lo && total <= hi;

    let score = if total == 0 {
        0
    } else if in_range(IDEAL_LENGTH) {
        10
    } else if in_range(ACCEPTABLE_LENGTH) {
        7
    } else if total >= MINIMUM_LENGTH {
        5
    } else {
        2
    };

    let suggestions = if total < ACCEPTABLE_LENGTH.0 {
        vec![EXPAND_CONTENT.to_string()]
    } else if total > ACCEPTABLE_LENGTH.1 {
        vec![CONDENSE_CONTENT.to_string()]
    } else {
        vec![]
    };

    (score, suggestions)
}

fn points(condition: bool, value: u32) -> u32 {
    if condition {
        value
    } else {
        0
    }
}

fn suggest(checks: &[(bool, &str)]) -> Vec<String> {
    checks
        .iter()
        .filter(|(missing, _)| *missing)
        .map(|(_, text)| text.to_string())
        .collect()
}
