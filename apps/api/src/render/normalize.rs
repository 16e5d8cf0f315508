//! Normalizes generated resume content into a canonical document.
//!
//! The generator's output is stored as loose JSON and the model does not
//! always honor the requested field names (entries may come back with
//! `institution` or `school` instead of `institution_name`). All of that
//! tolerance lives here, at the ingestion boundary; the PDF layout only ever
//! sees the canonical structs.

use serde_json::Value;

use crate::models::profile::StudentProfileRow;

#[derive(Debug, Clone, PartialEq)]
pub struct EducationEntry {
    /// Degree when present, falling back to the institution.
    pub title: String,
    pub subtitle: Option<String>,
    pub date_line: Option<String>,
    pub cgpa: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectEntry {
    pub title: String,
    pub description: Option<String>,
    pub technologies: Option<String>,
    pub contributions: Vec<String>,
    pub date_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    pub title: String,
    pub description: Option<String>,
}

/// Canonical single-page resume, ready for layout.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub name: String,
    pub contact_line: String,
    pub links_line: Option<String>,
    pub summary: Option<String>,
    pub education: Vec<EducationEntry>,
    /// `(CATEGORY, "skill, skill, skill")` pairs.
    pub skills: Vec<(String, String)>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<String>,
    pub achievements: Vec<String>,
    pub extracurricular: Vec<ActivityEntry>,
    pub hobbies: Option<String>,
}

/// First non-empty string among the candidate keys.
fn first_str(obj: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn first_bool(obj: &Value, keys: &[&str]) -> Option<bool> {
    keys.iter().filter_map(|k| obj.get(*k)).find_map(Value::as_bool)
}

/// A string array, or a comma-separated single string.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => vec![],
    }
}

fn as_array(value: Option<&Value>) -> &[Value] {
    value.and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}

pub fn normalize_education(entry: &Value) -> Option<EducationEntry> {
    let institution = first_str(
        entry,
        &["institution_name", "institution", "school", "university", "college"],
    );
    let degree = first_str(entry, &["degree", "degree_title", "title"]);
    let field = first_str(entry, &["field_of_study", "major", "specialization"]);

    let title = degree.clone().or_else(|| institution.clone())?;
    // Avoid repeating the title when degree was absent.
    let subtitle = if degree.is_some() {
        institution.or(field)
    } else {
        field
    };

    let start = first_str(entry, &["start_date", "start", "startDate"]);
    let end_raw = first_str(entry, &["end_date", "end", "endDate"]);
    let is_current = first_bool(entry, &["is_current", "current"]).unwrap_or_else(|| {
        end_raw
            .as_deref()
            .is_some_and(|e| e.to_lowercase().contains("present"))
    });
    let end = if is_current {
        Some("Present".to_string())
    } else {
        end_raw
    };
    let date_line = match (start, end) {
        (None, None) => None,
        (start, end) => Some(format!(
            "{} - {}",
            start.unwrap_or_default(),
            end.unwrap_or_default()
        )),
    };

    let cgpa = first_str(entry, &["cgpa_percentage", "cgpa", "gpa", "score"]);

    Some(EducationEntry {
        title,
        subtitle,
        date_line,
        cgpa,
    })
}

pub fn normalize_project(entry: &Value) -> Option<ProjectEntry> {
    let title = first_str(entry, &["project_title", "title"])?;
    let description = first_str(entry, &["description"]);
    let technologies = {
        let list = string_list(entry.get("technologies_used"));
        if list.is_empty() {
            None
        } else {
            Some(list.join(", "))
        }
    };
    let contributions = string_list(entry.get("contributions"));

    let start = first_str(entry, &["duration_start"]);
    let end = first_str(entry, &["duration_end"]);
    // Both ends required, matching the preview.
    let date_line = match (start, end) {
        (Some(s), Some(e)) => Some(format!("{s} - {e}")),
        _ => None,
    };

    Some(ProjectEntry {
        title,
        description,
        technologies,
        contributions,
        date_line,
    })
}

/// Skills arrive either as an object keyed by category or as an array of
/// stored skill rows.
pub fn normalize_skills(value: Option<&Value>) -> Vec<(String, String)> {
    match value {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(category, skills)| {
                let joined = match skills {
                    Value::Array(_) => string_list(Some(skills)).join(", "),
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (category.to_uppercase(), joined)
            })
            .collect(),
        Some(Value::Array(rows)) => rows
            .iter()
            .filter_map(|row| {
                let category = first_str(row, &["category"])?;
                let joined = string_list(row.get("skills")).join(", ");
                Some((category.to_uppercase(), joined))
            })
            .collect(),
        _ => vec![],
    }
}

fn normalize_certification(entry: &Value) -> Option<String> {
    let name = first_str(entry, &["certification_name", "name", "title"])?;
    let org = first_str(entry, &["issuing_organization", "issuer", "organization"]);
    let date = first_str(entry, &["issue_date", "date_issued", "date"]);

    let mut line = name;
    if let Some(org) = org {
        line = format!("{line} - {org}");
    }
    if let Some(date) = date {
        line = format!("{line} ({date})");
    }
    Some(line)
}

fn normalize_achievement(entry: &Value) -> Option<String> {
    let title = first_str(entry, &["achievement_title", "title", "name"])?;
    match first_str(entry, &["description"]) {
        Some(desc) => Some(format!("{title}: {desc}")),
        None => Some(title),
    }
}

fn normalize_activity(entry: &Value) -> Option<ActivityEntry> {
    let organization = first_str(entry, &["activity_organization", "activity_name", "organization"])?;
    let title = match first_str(entry, &["role"]) {
        Some(role) => format!("{organization} - {role}"),
        None => organization,
    };
    Some(ActivityEntry {
        title,
        description: first_str(entry, &["description"]),
    })
}

fn normalize_hobbies(value: Option<&Value>) -> Option<String> {
    let names: Vec<String> = as_array(value)
        .iter()
        .filter_map(|hobby| match hobby {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            obj => first_str(obj, &["hobby_name", "name", "title"]),
        })
        .collect();
    if names.is_empty() {
        None
    } else {
        Some(names.join(" • "))
    }
}

/// Builds the canonical document from stored resume content plus the profile
/// row that supplies the header.
pub fn normalize_resume(content: &Value, profile: &StudentProfileRow) -> ResumeDocument {
    let name = profile.full_name.clone().unwrap_or_default();
    let contact_line = [profile.email.as_deref(), profile.phone_number.as_deref()]
        .iter()
        .flatten()
        .copied()
        .collect::<Vec<_>>()
        .join(" | ");

    let links: Vec<String> = [
        profile
            .linkedin_profile
            .as_deref()
            .map(|l| format!("LinkedIn: {l}")),
        profile
            .github_portfolio
            .as_deref()
            .map(|g| format!("GitHub: {g}")),
    ]
    .into_iter()
    .flatten()
    .collect();
    let links_line = if links.is_empty() {
        None
    } else {
        Some(links.join(" | "))
    };

    let summary = content
        .get("summary")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    ResumeDocument {
        name,
        contact_line,
        links_line,
        summary,
        education: as_array(content.get("formattedEducation"))
            .iter()
            .filter_map(normalize_education)
            .collect(),
        skills: normalize_skills(content.get("formattedSkills")),
        projects: as_array(content.get("formattedProjects"))
            .iter()
            .filter_map(normalize_project)
            .collect(),
        certifications: as_array(content.get("formattedCertifications"))
            .iter()
            .filter_map(normalize_certification)
            .collect(),
        achievements: as_array(content.get("formattedAchievements"))
            .iter()
            .filter_map(normalize_achievement)
            .collect(),
        extracurricular: as_array(content.get("formattedExtracurricular"))
            .iter()
            .filter_map(normalize_activity)
            .collect(),
        hobbies: normalize_hobbies(content.get("formattedHobbies")),
    }
}

/// Download filename: whitespace collapses to underscores, and a role-based
/// resume carries the role between the name and the suffix.
pub fn pdf_filename(full_name: &str, target_role: Option<&str>) -> String {
    let underscored = |s: &str| s.split_whitespace().collect::<Vec<_>>().join("_");
    match target_role.filter(|r| !r.trim().is_empty()) {
        Some(role) => format!("{}_{}_Resume.pdf", underscored(full_name), underscored(role)),
        None => format!("{}_Resume.pdf", underscored(full_name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_education_alternate_keys() {
        let entry = json!({
            "school": "IIT Madras",
            "degree_title": "B.Tech",
            "major": "Computer Science",
            "startDate": "2021-08",
            "endDate": "2025-05",
            "gpa": "9.1"
        });
        let normalized = normalize_education(&entry).unwrap();
        assert_eq!(normalized.title, "B.Tech");
        assert_eq!(normalized.subtitle.as_deref(), Some("IIT Madras"));
        assert_eq!(normalized.date_line.as_deref(), Some("2021-08 - 2025-05"));
        assert_eq!(normalized.cgpa.as_deref(), Some("9.1"));
    }

    #[test]
    fn test_education_present_in_end_date_means_current() {
        let entry = json!({
            "institution_name": "State University",
            "degree": "MCA",
            "start_date": "2024-08",
            "end_date": "Present (expected 2026)"
        });
        let normalized = normalize_education(&entry).unwrap();
        assert_eq!(normalized.date_line.as_deref(), Some("2024-08 - Present"));
    }

    #[test]
    fn test_education_explicit_current_flag_wins() {
        let entry = json!({
            "institution_name": "State University",
            "degree": "MCA",
            "is_current": true,
            "end_date": "2026-05"
        });
        let normalized = normalize_education(&entry).unwrap();
        assert_eq!(normalized.date_line.as_deref(), Some(" - Present"));
    }

    #[test]
    fn test_education_without_any_name_is_dropped() {
        assert_eq!(normalize_education(&json!({ "gpa": "8.0" })), None);
    }

    #[test]
    fn test_project_technologies_accept_string_or_array() {
        let array_form = json!({
            "project_title": "Chat App",
            "technologies_used": ["Rust", "WebSockets"]
        });
        assert_eq!(
            normalize_project(&array_form).unwrap().technologies.as_deref(),
            Some("Rust, WebSockets")
        );

        let string_form = json!({
            "project_title": "Chat App",
            "technologies_used": "Rust, WebSockets"
        });
        assert_eq!(
            normalize_project(&string_form).unwrap().technologies.as_deref(),
            Some("Rust, WebSockets")
        );
    }

    #[test]
    fn test_project_date_needs_both_ends() {
        let entry = json!({
            "project_title": "Chat App",
            "duration_start": "Jan 2025"
        });
        assert_eq!(normalize_project(&entry).unwrap().date_line, None);
    }

    #[test]
    fn test_skills_object_and_array_forms() {
        let object_form = json!({ "Languages": ["Rust", "Python"] });
        let from_object = normalize_skills(Some(&object_form));
        assert_eq!(
            from_object,
            vec![("LANGUAGES".to_string(), "Rust, Python".to_string())]
        );

        let array_form = json!([{ "category": "Languages", "skills": ["Rust", "Python"] }]);
        assert_eq!(normalize_skills(Some(&array_form)), from_object);
    }

    #[test]
    fn test_skills_object_keeps_model_order() {
        // Categories render in the order the model emitted them, not sorted.
        let value = json!({
            "Programming": ["Rust"],
            "Databases": ["Postgres"],
            "Cloud": ["AWS"]
        });
        let categories: Vec<String> = normalize_skills(Some(&value))
            .into_iter()
            .map(|(category, _)| category)
            .collect();
        assert_eq!(categories, ["PROGRAMMING", "DATABASES", "CLOUD"]);
    }

    #[test]
    fn test_hobbies_mix_of_strings_and_objects() {
        let value = json!(["Chess", { "hobby_name": "Photography" }, { "name": "" }]);
        assert_eq!(
            normalize_hobbies(Some(&value)).as_deref(),
            Some("Chess • Photography")
        );
    }

    #[test]
    fn test_pdf_filename_collapses_whitespace() {
        assert_eq!(pdf_filename("Asha  Rao", None), "Asha_Rao_Resume.pdf");
        assert_eq!(
            pdf_filename("Asha Rao", Some("Backend Engineer")),
            "Asha_Rao_Backend_Engineer_Resume.pdf"
        );
        assert_eq!(pdf_filename("Asha Rao", Some("  ")), "Asha_Rao_Resume.pdf");
    }
}
