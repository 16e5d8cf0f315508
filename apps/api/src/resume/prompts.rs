// All LLM prompt constants and builders for the resume features.
// Cross-cutting fragments live in llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// System prompt for full resume generation. `{role_focus}` is replaced with
/// the target role, or a generic phrase for a general resume.
const GENERATION_SYSTEM_TEMPLATE: &str = r#"You are an expert resume writer and ATS optimization specialist.
Your task is to create an ATS-friendly resume in a structured format that can be easily converted to PDF.

CRITICAL INSTRUCTIONS FOR PROJECTS:
1. For EVERY project, generate a professional, detailed description even if the student didn't provide one
2. Based on the project title and technologies, infer the likely features and create 3-5 compelling bullet points
3. Use strong action verbs (Developed, Implemented, Architected, Optimized, Engineered, Built)
4. Add quantifiable metrics where logical (e.g., "Improved performance by 40%", "Reduced load time by 2 seconds")
5. Highlight technical skills and technologies used
6. Make the description sound professional and impressive while remaining truthful to the project scope
7. If technologies are missing, infer them based on the project title and common tech stacks
8. Format each project with:
   - project_title: Keep original
   - description: 2-3 sentence compelling overview
   - technologies_used: Array of relevant technologies (infer if not provided)
   - contributions: Array of 3-5 bullet points describing what was built/achieved
   - duration_start and duration_end: Keep original
   - github_demo_link: Keep original

Focus on:
- Clear, concise bullet points with action verbs
- Quantifiable achievements
- Keywords relevant to {role_focus}
- Professional formatting
- ATS-compatible structure
- Making projects sound impressive and professional

Return a JSON object with the following structure:
{
  "summary": "Professional summary paragraph",
  "formattedEducation": [enhanced education entries],
  "formattedProjects": [
    {
      "project_title": "original title",
      "description": "compelling 2-3 sentence overview",
      "technologies_used": ["tech1", "tech2", ...],
      "contributions": ["bullet point 1", "bullet point 2", ...],
      "duration_start": "original date",
      "duration_end": "original date",
      "github_demo_link": "original link"
    }
  ],
  "formattedSkills": {organized skills by category},
  "formattedCertifications": [formatted certifications],
  "formattedAchievements": [formatted achievements],
  "formattedExtracurricular": [formatted activities],
  "formattedHobbies": [formatted hobbies as strings - only include if provided],
  "atsScore": estimated ATS score (0-100),
  "recommendations": [list of improvement suggestions]
}
"#;

pub fn generation_system(target_role: Option<&str>) -> String {
    let focus = target_role.unwrap_or("the student's field");
    format!(
        "{}\n{JSON_ONLY_INSTRUCTION}",
        GENERATION_SYSTEM_TEMPLATE.replace("{role_focus}", focus)
    )
}

pub fn generation_user(
    target_role: Option<&str>,
    job_description: Option<&str>,
    resume_data: &str,
) -> String {
    let tailoring = target_role
        .map(|role| format!("tailored for {role} role "))
        .unwrap_or_default();
    let mut prompt =
        format!("Create an ATS-optimized resume {tailoring}using this data:\n\n{resume_data}");
    if let Some(jd) = job_description.filter(|jd| !jd.trim().is_empty()) {
        prompt.push_str(&format!("\n\nTailor the content to this job description:\n{jd}"));
    }
    prompt
}

/// System prompt for ATS compatibility analysis. The six category weights sum
/// to 100 and match the score breakdown shown in the UI.
const ATS_SYSTEM_BASE: &str = r#"You are an ATS (Applicant Tracking System) analyzer expert.
Analyze resumes for ATS compatibility and provide detailed scoring and recommendations.

Evaluate the resume on these criteria:
1. Format & Structure (20 points)
2. Keyword Optimization (25 points)
3. Experience & Achievements (20 points)
4. Skills & Certifications (15 points)
5. Contact Information (10 points)
6. Readability & Clarity (10 points)

Return a JSON object with:
{
  "overallScore": number (0-100),
  "categoryScores": {
    "format": number,
    "keywords": number,
    "experience": number,
    "skills": number,
    "contact": number,
    "readability": number
  },
  "strengths": [list of strong points],
  "improvements": [list of specific improvements with priorities],
  "missingKeywords": [important keywords not found],
  "recommendations": [actionable suggestions]
}
"#;

pub fn ats_system(job_description: Option<&str>) -> String {
    match job_description.filter(|jd| !jd.trim().is_empty()) {
        Some(jd) => format!(
            "{ATS_SYSTEM_BASE}\nCompare against this job description:\n{jd}\n\n{JSON_ONLY_INSTRUCTION}"
        ),
        None => format!("{ATS_SYSTEM_BASE}\n{JSON_ONLY_INSTRUCTION}"),
    }
}

pub fn ats_user(resume_text: &str) -> String {
    format!("Analyze this resume for ATS compatibility:\n\n{resume_text}")
}

const COVER_LETTER_SYSTEM_BASE: &str = r#"You are a professional cover letter writer. Create compelling, personalized cover letters that:
- Are concise (3-4 paragraphs, ~300 words)
- Show genuine interest and research about the company
- Highlight relevant skills and experiences
- Demonstrate value proposition
- Include a strong call to action
- Use professional yet personable tone
- Are ATS-friendly

Return a JSON object with:
{
  "coverLetter": "The complete cover letter text with proper formatting",
  "subject": "Suggested email subject line",
  "highlights": ["Key points emphasized in the letter"]
}
"#;

pub fn cover_letter_system() -> String {
    format!("{COVER_LETTER_SYSTEM_BASE}\n{JSON_ONLY_INSTRUCTION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_system_injects_role() {
        let with_role = generation_system(Some("Backend Engineer"));
        assert!(with_role.contains("Keywords relevant to Backend Engineer"));

        let general = generation_system(None);
        assert!(general.contains("Keywords relevant to the student's field"));
    }

    #[test]
    fn test_generation_user_mentions_role_only_when_targeted() {
        assert!(generation_user(Some("Data Analyst"), None, "{}")
            .contains("tailored for Data Analyst"));
        assert!(!generation_user(None, None, "{}").contains("tailored for"));
    }

    #[test]
    fn test_generation_user_appends_job_description() {
        let prompt = generation_user(None, Some("Must know SQL"), "{}");
        assert!(prompt.contains("Must know SQL"));
        assert!(!generation_user(None, Some(" "), "{}").contains("job description"));
    }

    #[test]
    fn test_ats_system_embeds_job_description() {
        let with_jd = ats_system(Some("Looking for a Rust engineer"));
        assert!(with_jd.contains("Looking for a Rust engineer"));

        let without = ats_system(Some("   "));
        assert!(!without.contains("Compare against"));
    }
}
