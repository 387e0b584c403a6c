//! Field-level profile edits.
//!
//! Every edit takes the current snapshot by reference and returns a new one;
//! a failed edit leaves the caller's snapshot untouched.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::profile::{
    Address, Award, Education, Experience, Language, Profile, Publication, Reference,
    SkillCategory,
};
use crate::profile::duration::calculate_duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Education,
    Experience,
    Publications,
    Awards,
    Languages,
    References,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Education => "education",
            Section::Experience => "experience",
            Section::Publications => "publications",
            Section::Awards => "awards",
            Section::Languages => "languages",
            Section::References => "references",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalField {
    FullName,
    Email,
    Phone,
    Website,
    Linkedin,
    NationalId,
    BirthCertificate,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("No {section} entry with id {id}")]
    EntryNotFound { section: Section, id: Uuid },

    #[error("No {category:?} skill at index {index}")]
    SkillIndexOutOfRange {
        category: SkillCategory,
        index: usize,
    },

    #[error("Permanent address mirrors the present address; clear the same-address flag first")]
    PermanentAddressMirrored,
}

// ────────────────────────────────────────────────────────────────────────────
// Partial updates: only the supplied fields change
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationPatch {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub year: Option<String>,
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperiencePatch {
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_current_job: Option<bool>,
    pub description: Option<String>,
}

impl ExperiencePatch {
    fn touches_dates(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some() || self.is_current_job.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicationPatch {
    pub title: Option<String>,
    pub journal: Option<String>,
    pub year: Option<String>,
    pub authors: Option<String>,
    pub doi: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AwardPatch {
    pub title: Option<String>,
    pub organization: Option<String>,
    pub year: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguagePatch {
    pub name: Option<String>,
    pub proficiency: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferencePatch {
    pub name: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// One discrete edit. Serialized with an `op` tag, e.g.
/// `{"op": "set_summary", "summary": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ProfileEdit {
    SetPersonalField { field: PersonalField, value: String },
    SetPresentAddress { address: Address },
    SetPermanentAddress { address: Address },
    SetSameAsPresentAddress { same: bool },
    SetSummary { summary: String },
    AddEntry { section: Section },
    RemoveEntry { section: Section, id: Uuid },
    UpdateEducation { id: Uuid, patch: EducationPatch },
    UpdateExperience { id: Uuid, patch: ExperiencePatch },
    UpdatePublication { id: Uuid, patch: PublicationPatch },
    UpdateAward { id: Uuid, patch: AwardPatch },
    UpdateLanguage { id: Uuid, patch: LanguagePatch },
    UpdateReference { id: Uuid, patch: ReferencePatch },
    AddSkill { category: SkillCategory },
    UpdateSkill {
        category: SkillCategory,
        index: usize,
        value: String,
    },
    RemoveSkill { category: SkillCategory, index: usize },
}

#[derive(Debug, Clone)]
pub struct EditOutcome {
    pub profile: Profile,
    /// Id of the entry created by an `AddEntry` edit.
    pub created_id: Option<Uuid>,
}

// ────────────────────────────────────────────────────────────────────────────
// List entries
// ────────────────────────────────────────────────────────────────────────────

trait Entry {
    const SECTION: Section;
    fn id(&self) -> Uuid;
    fn blank(id: Uuid) -> Self;
}

impl Entry for Education {
    const SECTION: Section = Section::Education;
    fn id(&self) -> Uuid {
        self.id
    }
    fn blank(id: Uuid) -> Self {
        Education {
            id,
            degree: String::new(),
            institution: String::new(),
            year: String::new(),
            grade: None,
        }
    }
}

impl Entry for Experience {
    const SECTION: Section = Section::Experience;
    fn id(&self) -> Uuid {
        self.id
    }
    fn blank(id: Uuid) -> Self {
        Experience {
            id,
            job_title: String::new(),
            company: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            is_current_job: false,
            duration: String::new(),
            description: String::new(),
        }
    }
}

impl Entry for Publication {
    const SECTION: Section = Section::Publications;
    fn id(&self) -> Uuid {
        self.id
    }
    fn blank(id: Uuid) -> Self {
        Publication {
            id,
            title: String::new(),
            journal: String::new(),
            year: String::new(),
            authors: None,
            doi: None,
            description: None,
        }
    }
}

impl Entry for Award {
    const SECTION: Section = Section::Awards;
    fn id(&self) -> Uuid {
        self.id
    }
    fn blank(id: Uuid) -> Self {
        Award {
            id,
            title: String::new(),
            organization: String::new(),
            year: String::new(),
            description: None,
        }
    }
}

impl Entry for Language {
    const SECTION: Section = Section::Languages;
    fn id(&self) -> Uuid {
        self.id
    }
    fn blank(id: Uuid) -> Self {
        Language {
            id,
            name: String::new(),
            proficiency: String::new(),
        }
    }
}

impl Entry for Reference {
    const SECTION: Section = Section::References;
    fn id(&self) -> Uuid {
        self.id
    }
    fn blank(id: Uuid) -> Self {
        Reference {
            id,
            name: String::new(),
            title: String::new(),
            company: String::new(),
            phone: String::new(),
            email: String::new(),
        }
    }
}

fn push_blank<T: Entry>(list: &mut Vec<T>) -> Uuid {
    let id = Uuid::new_v4();
    list.push(T::blank(id));
    id
}

fn remove_by_id<T: Entry>(list: &mut Vec<T>, id: Uuid) -> Result<(), ProfileError> {
    let before = list.len();
    list.retain(|e| e.id() != id);
    if list.len() == before {
        return Err(ProfileError::EntryNotFound {
            section: T::SECTION,
            id,
        });
    }
    Ok(())
}

fn find_mut<T: Entry>(list: &mut [T], id: Uuid) -> Result<&mut T, ProfileError> {
    list.iter_mut()
        .find(|e| e.id() == id)
        .ok_or(ProfileError::EntryNotFound {
            section: T::SECTION,
            id,
        })
}

fn set(target: &mut String, value: Option<String>) {
    if let Some(v) = value {
        *target = v;
    }
}

/// Optional text fields: an empty value clears the field.
fn set_opt(target: &mut Option<String>, value: Option<String>) {
    if let Some(v) = value {
        *target = if v.is_empty() { None } else { Some(v) };
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Apply
// ────────────────────────────────────────────────────────────────────────────

/// Applies one edit to a snapshot and returns the resulting snapshot.
///
/// `today` anchors the duration of current jobs.
pub fn apply_edit(
    current: &Profile,
    edit: ProfileEdit,
    today: NaiveDate,
) -> Result<EditOutcome, ProfileError> {
    let mut profile = current.clone();
    let mut created_id = None;

    match edit {
        ProfileEdit::SetPersonalField { field, value } => {
            let info = &mut profile.personal_info;
            match field {
                PersonalField::FullName => info.full_name = value,
                PersonalField::Email => info.email = value,
                PersonalField::Phone => info.phone = value,
                PersonalField::Website => set_opt(&mut info.website, Some(value)),
                PersonalField::Linkedin => set_opt(&mut info.linkedin, Some(value)),
                PersonalField::NationalId => set_opt(&mut info.national_id, Some(value)),
                PersonalField::BirthCertificate => {
                    set_opt(&mut info.birth_certificate, Some(value))
                }
            }
        }
        ProfileEdit::SetPresentAddress { address } => {
            let info = &mut profile.personal_info;
            if info.same_as_present_address {
                info.permanent_address = address.clone();
            }
            info.present_address = address;
        }
        ProfileEdit::SetPermanentAddress { address } => {
            if profile.personal_info.same_as_present_address {
                return Err(ProfileError::PermanentAddressMirrored);
            }
            profile.personal_info.permanent_address = address;
        }
        ProfileEdit::SetSameAsPresentAddress { same } => {
            let info = &mut profile.personal_info;
            info.same_as_present_address = same;
            if same {
                info.permanent_address = info.present_address.clone();
            }
        }
        ProfileEdit::SetSummary { summary } => profile.summary = summary,
        ProfileEdit::AddEntry { section } => {
            let id = match section {
                Section::Education => push_blank(&mut profile.education),
                Section::Experience => push_blank(&mut profile.experience),
                Section::Publications => push_blank(&mut profile.publications),
                Section::Awards => push_blank(&mut profile.awards),
                Section::Languages => push_blank(&mut profile.languages),
                Section::References => push_blank(&mut profile.references),
            };
            created_id = Some(id);
        }
        ProfileEdit::RemoveEntry { section, id } => match section {
            Section::Education => remove_by_id(&mut profile.education, id)?,
            Section::Experience => remove_by_id(&mut profile.experience, id)?,
            Section::Publications => remove_by_id(&mut profile.publications, id)?,
            Section::Awards => remove_by_id(&mut profile.awards, id)?,
            Section::Languages => remove_by_id(&mut profile.languages, id)?,
            Section::References => remove_by_id(&mut profile.references, id)?,
        },
        ProfileEdit::UpdateEducation { id, patch } => {
            let entry = find_mut(&mut profile.education, id)?;
            set(&mut entry.degree, patch.degree);
            set(&mut entry.institution, patch.institution);
            set(&mut entry.year, patch.year);
            set_opt(&mut entry.grade, patch.grade);
        }
        ProfileEdit::UpdateExperience { id, patch } => {
            let entry = find_mut(&mut profile.experience, id)?;
            let recompute = patch.touches_dates();
            set(&mut entry.job_title, patch.job_title);
            set(&mut entry.company, patch.company);
            set(&mut entry.start_date, patch.start_date);
            set(&mut entry.end_date, patch.end_date);
            if let Some(current) = patch.is_current_job {
                entry.is_current_job = current;
            }
            set(&mut entry.description, patch.description);
            if recompute {
                entry.duration = calculate_duration(
                    &entry.start_date,
                    &entry.end_date,
                    entry.is_current_job,
                    today,
                );
            }
        }
        ProfileEdit::UpdatePublication { id, patch } => {
            let entry = find_mut(&mut profile.publications, id)?;
            set(&mut entry.title, patch.title);
            set(&mut entry.journal, patch.journal);
            set(&mut entry.year, patch.year);
            set_opt(&mut entry.authors, patch.authors);
            set_opt(&mut entry.doi, patch.doi);
            set_opt(&mut entry.description, patch.description);
        }
        ProfileEdit::UpdateAward { id, patch } => {
            let entry = find_mut(&mut profile.awards, id)?;
            set(&mut entry.title, patch.title);
            set(&mut entry.organization, patch.organization);
            set(&mut entry.year, patch.year);
            set_opt(&mut entry.description, patch.description);
        }
        ProfileEdit::UpdateLanguage { id, patch } => {
            let entry = find_mut(&mut profile.languages, id)?;
            set(&mut entry.name, patch.name);
            set(&mut entry.proficiency, patch.proficiency);
        }
        ProfileEdit::UpdateReference { id, patch } => {
            let entry = find_mut(&mut profile.references, id)?;
            set(&mut entry.name, patch.name);
            set(&mut entry.title, patch.title);
            set(&mut entry.company, patch.company);
            set(&mut entry.phone, patch.phone);
            set(&mut entry.email, patch.email);
        }
        ProfileEdit::AddSkill { category } => {
            profile.skills.get_mut(category).push(String::new());
        }
        ProfileEdit::UpdateSkill {
            category,
            index,
            value,
        } => {
            let slot = profile
                .skills
                .get_mut(category)
                .get_mut(index)
                .ok_or(ProfileError::SkillIndexOutOfRange { category, index })?;
            *slot = value;
        }
        ProfileEdit::RemoveSkill { category, index } => {
            let list = profile.skills.get_mut(category);
            if index >= list.len() {
                return Err(ProfileError::SkillIndexOutOfRange { category, index });
            }
            list.remove(index);
        }
    }

    Ok(EditOutcome {
        profile,
        created_id,
    })
}
