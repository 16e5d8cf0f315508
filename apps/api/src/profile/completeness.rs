//! Profile completeness — the gate that unlocks resume generation in the UI.

use serde::{Deserialize, Serialize};

use crate::models::profile::StudentProfileRow;

/// Four required sections; optional sections (certifications, achievements,
/// extracurricular, hobbies) never count towards the percentage.
const REQUIRED_SECTIONS: u32 = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessReport {
    /// Exactly `25 × completed` — no partial credit within a section.
    pub percent: u32,
    pub personal_info: bool,
    pub education: bool,
    pub projects: bool,
    pub skills: bool,
    pub missing_sections: Vec<String>,
}

/// A profile counts as complete only when name, email, and phone are all set.
fn profile_complete(profile: Option<&StudentProfileRow>) -> bool {
    profile.is_some_and(|p| {
        [&p.full_name, &p.email, &p.phone_number]
            .iter()
            .all(|f| f.as_deref().is_some_and(|s| !s.trim().is_empty()))
    })
}

pub fn compute_completeness(
    profile: Option<&StudentProfileRow>,
    education_count: usize,
    projects_count: usize,
    skills_count: usize,
) -> CompletenessReport {
    let personal_info = profile_complete(profile);
    let education = education_count > 0;
    let projects = projects_count > 0;
    let skills = skills_count > 0;

    let sections = [
        ("personal_info", personal_info),
        ("education", education),
        ("projects", projects),
        ("skills", skills),
    ];
    let completed = sections.iter().filter(|(_, done)| *done).count() as u32;
    let missing_sections = sections
        .iter()
        .filter(|(_, done)| !done)
        .map(|(name, _)| name.to_string())
        .collect();

    CompletenessReport {
        percent: completed * (100 / REQUIRED_SECTIONS),
        personal_info,
        education,
        projects,
        skills,
        missing_sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_profile(name: &str, email: &str, phone: &str) -> StudentProfileRow {
        StudentProfileRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            full_name: Some(name.to_string()),
            email: Some(email.to_string()),
            phone_number: Some(phone.to_string()),
            linkedin_profile: None,
            github_portfolio: None,
            address_city: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_profile_is_zero() {
        let report = compute_completeness(None, 0, 0, 0);
        assert_eq!(report.percent, 0);
        assert_eq!(report.missing_sections.len(), 4);
    }

    #[test]
    fn test_percent_is_25_per_section() {
        let profile = make_profile("Asha Rao", "asha@example.edu", "555-0100");
        assert_eq!(compute_completeness(Some(&profile), 0, 0, 0).percent, 25);
        assert_eq!(compute_completeness(Some(&profile), 1, 0, 0).percent, 50);
        assert_eq!(compute_completeness(Some(&profile), 1, 1, 0).percent, 75);
        assert_eq!(compute_completeness(Some(&profile), 1, 1, 1).percent, 100);
    }

    #[test]
    fn test_adding_a_section_never_decreases_percent() {
        let profile = make_profile("Asha Rao", "asha@example.edu", "555-0100");
        let mut last = 0;
        for (edu, proj, skill) in [(0, 0, 0), (1, 0, 0), (1, 1, 0), (1, 1, 1)] {
            let percent = compute_completeness(Some(&profile), edu, proj, skill).percent;
            assert!(percent >= last);
            last = percent;
        }
    }

    #[test]
    fn test_partial_personal_info_does_not_count() {
        let mut profile = make_profile("Asha Rao", "asha@example.edu", "555-0100");
        profile.phone_number = None;
        let report = compute_completeness(Some(&profile), 0, 0, 0);
        assert!(!report.personal_info);
        assert_eq!(report.percent, 0);

        profile.phone_number = Some("   ".to_string());
        assert!(!compute_completeness(Some(&profile), 0, 0, 0).personal_info);
    }

    #[test]
    fn test_optional_sections_are_not_counted() {
        // Only the four required sections exist as inputs; a half-filled
        // profile with education alone sits at exactly 25.
        let report = compute_completeness(None, 3, 0, 0);
        assert_eq!(report.percent, 25);
        assert!(report.education);
    }
}
