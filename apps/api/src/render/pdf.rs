//! Renders a canonical `ResumeDocument` to PDF bytes.
//!
//! The layout mirrors the resume preview: centered header, ruled section
//! titles in caps, bulleted contributions under each project.

use genpdf::elements::{Break, Paragraph};
use genpdf::style::Style;
use genpdf::{Alignment, Document, Element, SimplePageDecorator};

use crate::errors::AppError;
use crate::render::normalize::ResumeDocument;

const BODY_SIZE: u8 = 10;
const TITLE_SIZE: u8 = 11;
const SECTION_SIZE: u8 = 14;
const NAME_SIZE: u8 = 24;
const CONTACT_SIZE: u8 = 9;

fn load_fonts(font_dir: &str) -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>, AppError> {
    genpdf::fonts::from_files(font_dir, "LiberationSans", None)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to load PDF fonts from {font_dir}: {e}")))
}

fn configure_document(font_dir: &str, title: &str) -> Result<Document, AppError> {
    let mut doc = Document::new(load_fonts(font_dir)?);
    doc.set_title(title);
    doc.set_font_size(BODY_SIZE);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(14);
    doc.set_page_decorator(decorator);
    Ok(doc)
}

fn section_title(doc: &mut Document, text: &str) {
    doc.push(Break::new(1));
    doc.push(
        Paragraph::new(text).styled(Style::new().bold().with_font_size(SECTION_SIZE)),
    );
}

fn bullet(doc: &mut Document, text: &str) {
    doc.push(Paragraph::new(format!("• {text}")));
}

pub fn render_pdf(resume: &ResumeDocument, font_dir: &str) -> Result<Vec<u8>, AppError> {
    let mut doc = configure_document(font_dir, &format!("{} - Resume", resume.name))?;

    // Header
    doc.push(
        Paragraph::new(resume.name.as_str())
            .aligned(Alignment::Center)
            .styled(Style::new().bold().with_font_size(NAME_SIZE)),
    );
    if !resume.contact_line.is_empty() {
        doc.push(
            Paragraph::new(resume.contact_line.as_str())
                .aligned(Alignment::Center)
                .styled(Style::new().with_font_size(CONTACT_SIZE)),
        );
    }
    if let Some(links) = &resume.links_line {
        doc.push(
            Paragraph::new(links.as_str())
                .aligned(Alignment::Center)
                .styled(Style::new().with_font_size(CONTACT_SIZE)),
        );
    }

    if let Some(summary) = &resume.summary {
        section_title(&mut doc, "PROFESSIONAL SUMMARY");
        doc.push(Paragraph::new(summary.as_str()));
    }

    if !resume.education.is_empty() {
        section_title(&mut doc, "EDUCATION");
        for entry in &resume.education {
            doc.push(
                Paragraph::new(entry.title.as_str())
                    .styled(Style::new().bold().with_font_size(TITLE_SIZE)),
            );
            if let Some(subtitle) = &entry.subtitle {
                doc.push(Paragraph::new(subtitle.as_str()));
            }
            if let Some(dates) = &entry.date_line {
                doc.push(Paragraph::new(dates.as_str()).styled(Style::new().italic().with_font_size(CONTACT_SIZE)));
            }
            if let Some(cgpa) = &entry.cgpa {
                doc.push(Paragraph::new(format!("CGPA: {cgpa}")));
            }
            doc.push(Break::new(1));
        }
    }

    if !resume.skills.is_empty() {
        section_title(&mut doc, "SKILLS");
        for (category, skills) in &resume.skills {
            let mut line = Paragraph::new("");
            line.push_styled(format!("{category}: "), Style::new().bold());
            line.push(skills.clone());
            doc.push(line);
        }
    }

    if !resume.projects.is_empty() {
        section_title(&mut doc, "PROJECTS");
        for project in &resume.projects {
            doc.push(
                Paragraph::new(project.title.as_str())
                    .styled(Style::new().bold().with_font_size(TITLE_SIZE)),
            );
            if let Some(description) = &project.description {
                doc.push(Paragraph::new(description.as_str()));
            }
            if let Some(technologies) = &project.technologies {
                doc.push(Paragraph::new(format!("Technologies: {technologies}")));
            }
            for contribution in &project.contributions {
                bullet(&mut doc, contribution);
            }
            if let Some(dates) = &project.date_line {
                doc.push(Paragraph::new(dates.as_str()).styled(Style::new().italic().with_font_size(CONTACT_SIZE)));
            }
            doc.push(Break::new(1));
        }
    }

    if !resume.certifications.is_empty() {
        section_title(&mut doc, "CERTIFICATIONS");
        for line in &resume.certifications {
            bullet(&mut doc, line);
        }
    }

    if !resume.achievements.is_empty() {
        section_title(&mut doc, "ACHIEVEMENTS");
        for line in &resume.achievements {
            bullet(&mut doc, line);
        }
    }

    if !resume.extracurricular.is_empty() {
        section_title(&mut doc, "EXTRACURRICULAR ACTIVITIES");
        for activity in &resume.extracurricular {
            doc.push(
                Paragraph::new(activity.title.as_str())
                    .styled(Style::new().bold().with_font_size(TITLE_SIZE)),
            );
            if let Some(description) = &activity.description {
                doc.push(Paragraph::new(description.as_str()));
            }
        }
    }

    if let Some(hobbies) = &resume.hobbies {
        section_title(&mut doc, "HOBBIES & INTERESTS");
        doc.push(Paragraph::new(hobbies.as_str()));
    }

    let mut buf = Vec::new();
    doc.render(&mut buf)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF rendering failed: {e}")))?;
    Ok(buf)
}
