use crate::models::profile::{is_present, is_present_opt, Address, Profile, SkillCategory};

/// Renders a profile as a markdown document for preview.
/// Sections without content are skipped.
pub fn render_profile_markdown(profile: &Profile) -> String {
    let info = &profile.personal_info;
    let name = if is_present(&info.full_name) {
        info.full_name.trim()
    } else {
        "Untitled CV"
    };
    let mut md = format!("# {name}\n\n");

    let contact: Vec<&str> = [
        Some(info.email.as_str()),
        Some(info.phone.as_str()),
        info.website.as_deref(),
        info.linkedin.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .collect();
    if !contact.is_empty() {
        md.push_str(&contact.join(" | "));
        md.push_str("\n\n");
    }

    push_address(&mut md, "Present Address", &info.present_address);
    if !info.same_as_present_address {
        push_address(&mut md, "Permanent Address", &info.permanent_address);
    }

    if is_present(&profile.summary) {
        md.push_str("## Professional Summary\n\n");
        md.push_str(profile.summary.trim());
        md.push_str("\n\n");
    }

    if !profile.experience.is_empty() {
        md.push_str("## Experience\n\n");
        for exp in &profile.experience {
            md.push_str(&format!("### {} - {}\n", exp.job_title, exp.company));
            let end = if exp.is_current_job {
                "Present"
            } else {
                exp.end_date.as_str()
            };
            if is_present(&exp.start_date) {
                md.push_str(&format!("- **Period:** {} to {}", exp.start_date, end));
                if is_present(&exp.duration) {
                    md.push_str(&format!(" ({})", exp.duration));
                }
                md.push('\n');
            }
            if is_present(&exp.description) {
                md.push('\n');
                md.push_str(exp.description.trim());
                md.push('\n');
            }
            md.push('\n');
        }
    }

    if !profile.education.is_empty() {
        md.push_str("## Education\n\n");
        for edu in &profile.education {
            md.push_str(&format!("- **{}**, {} ({})", edu.degree, edu.institution, edu.year));
            if let Some(grade) = edu.grade.as_deref().filter(|g| is_present(g)) {
                md.push_str(&format!(" - {grade}"));
            }
            md.push('\n');
        }
        md.push('\n');
    }

    if profile.skills.total() > 0 {
        md.push_str("## Skills\n\n");
        for category in SkillCategory::ALL {
            let items: Vec<&str> = profile
                .skills
                .get(category)
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect();
            if !items.is_empty() {
                md.push_str(&format!("- **{}:** {}\n", category.label(), items.join(", ")));
            }
        }
        md.push('\n');
    }

    if !profile.publications.is_empty() {
        md.push_str("## Publications\n\n");
        for publication in &profile.publications {
            md.push_str(&format!(
                "- {}. *{}*, {}",
                publication.title, publication.journal, publication.year
            ));
            if let Some(doi) = publication.doi.as_deref().filter(|d| is_present(d)) {
                md.push_str(&format!(". DOI: {doi}"));
            }
            md.push('\n');
        }
        md.push('\n');
    }

    if !profile.awards.is_empty() {
        md.push_str("## Awards\n\n");
        for award in &profile.awards {
            md.push_str(&format!(
                "- **{}**, {} ({})\n",
                award.title, award.organization, award.year
            ));
            if is_present_opt(&award.description) {
                md.push_str(&format!(
                    "  {}\n",
                    award.description.as_deref().unwrap_or_default().trim()
                ));
            }
        }
        md.push('\n');
    }

    if !profile.languages.is_empty() {
        md.push_str("## Languages\n\n");
        for language in &profile.languages {
            md.push_str(&format!("- {} ({})\n", language.name, language.proficiency));
        }
        md.push('\n');
    }

    if !profile.references.is_empty() {
        md.push_str("## References\n\n");
        for reference in &profile.references {
            md.push_str(&format!(
                "- **{}**, {} at {} - {} | {}\n",
                reference.name, reference.title, reference.company, reference.phone, reference.email
            ));
        }
        md.push('\n');
    }

    md
}

fn push_address(md: &mut String, title: &str, address: &Address) {
    let parts = address.parts();
    if parts.is_empty() {
        return;
    }
    md.push_str(&format!("**{title}:** {}\n\n", parts.join(", ")));
}
