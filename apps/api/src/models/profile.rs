use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Postal address. Every field is free text; an all-empty address is the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub area: String,
    pub district: String,
    pub division: String,
    pub post_code: String,
    pub country: String,
}

impl Address {
    /// True when at least one field carries non-blank text.
    pub fn has_any_field(&self) -> bool {
        [
            &self.street,
            &self.area,
            &self.district,
            &self.division,
            &self.post_code,
            &self.country,
        ]
        .iter()
        .any(|f| is_present(f))
    }

    /// Non-blank fields in display order.
    pub fn parts(&self) -> Vec<&str> {
        [
            &self.street,
            &self.area,
            &self.district,
            &self.division,
            &self.post_code,
            &self.country,
        ]
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub present_address: Address,
    pub permanent_address: Address,
    pub same_as_present_address: bool,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub national_id: Option<String>,
    pub birth_certificate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub grade: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub is_current_job: bool,
    /// Derived from the dates; see `profile::duration`.
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub journal: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub authors: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub proficiency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Technical,
    Software,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 2] = [SkillCategory::Technical, SkillCategory::Software];

    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::Technical => "Technical Skills",
            SkillCategory::Software => "Software Skills",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub technical: Vec<String>,
    pub software: Vec<String>,
}

impl Skills {
    pub fn get(&self, category: SkillCategory) -> &[String] {
        match category {
            SkillCategory::Technical => &self.technical,
            SkillCategory::Software => &self.software,
        }
    }

    pub fn get_mut(&mut self, category: SkillCategory) -> &mut Vec<String> {
        match category {
            SkillCategory::Technical => &mut self.technical,
            SkillCategory::Software => &mut self.software,
        }
    }

    /// Non-blank skills across every category, in category order.
    pub fn filled(&self) -> impl Iterator<Item = &str> {
        SkillCategory::ALL
            .into_iter()
            .flat_map(move |c| self.get(c).iter())
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    pub fn total(&self) -> usize {
        self.filled().count()
    }
}

/// The complete structured record being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub publications: Vec<Publication>,
    pub awards: Vec<Award>,
    pub languages: Vec<Language>,
    pub skills: Skills,
    pub references: Vec<Reference>,
}

/// Text counts as present when it is non-blank.
pub fn is_present(text: &str) -> bool {
    !text.trim().is_empty()
}

pub fn is_present_opt(text: &Option<String>) -> bool {
    text.as_deref().map(is_present).unwrap_or(false)
}

/// Length in characters, not bytes.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
