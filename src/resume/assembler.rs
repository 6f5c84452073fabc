// src/resume/assembler.rs
//! Runs the renderers in template order and writes the document

use anyhow::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::docx_writer::DocxWriter;
use super::document::{DocumentBuilder, RenderedDocument};
use super::normalizer::Normalizer;
use super::record::*;
use super::renderer::{render_entries, render_header, render_section, render_skills};

pub const SUMMARY_TITLE: &str = "Professional Summary";
pub const PROJECTS_TITLE: &str = "Projects";
pub const EXPERIENCE_TITLE: &str = "Work Experience";
pub const CERTIFICATIONS_TITLE: &str = "Certifications";
pub const EDUCATION_TITLE: &str = "Education";
pub const TECHNICAL_SKILLS_TITLE: &str = "Technical Skills";
pub const SOFT_SKILLS_TITLE: &str = "Soft Skills";

/// Section titles in the order they appear in every document
pub const SECTION_ORDER: [&str; 7] = [
    SUMMARY_TITLE,
    PROJECTS_TITLE,
    EXPERIENCE_TITLE,
    CERTIFICATIONS_TITLE,
    EDUCATION_TITLE,
    TECHNICAL_SKILLS_TITLE,
    SOFT_SKILLS_TITLE,
];

pub struct DocumentAssembler;

impl DocumentAssembler {
    pub fn assemble(record: &ResumeRecord) -> RenderedDocument {
        let mut doc = DocumentBuilder::new();

        render_header(&mut doc, record);
        render_section(&mut doc, SUMMARY_TITLE, &record.professional_summary);
        render_entries(&mut doc, PROJECTS_TITLE, &record.projects, PROJECT_FIELDS);
        render_entries(&mut doc, EXPERIENCE_TITLE, &record.experiences, EXPERIENCE_FIELDS);
        render_entries(
            &mut doc,
            CERTIFICATIONS_TITLE,
            &record.certifications,
            CERTIFICATION_FIELDS,
        );
        render_entries(&mut doc, EDUCATION_TITLE, &record.education, EDUCATION_FIELDS);
        render_skills(&mut doc, TECHNICAL_SKILLS_TITLE, &record.technical_skills);
        render_skills(&mut doc, SOFT_SKILLS_TITLE, &record.soft_skills);

        doc.finish()
    }

    /// Assemble `record` and write it to `output_path`, replacing any existing file
    pub fn write(record: &ResumeRecord, output_path: &Path) -> Result<PathBuf> {
        let doc = Self::assemble(record);
        debug!(
            "Assembled {} blocks, sections: {:?}",
            doc.blocks().len(),
            doc.headings()
        );

        DocxWriter::write_to_path(&doc, output_path)?;
        info!("Resume written to {}", output_path.display());
        Ok(output_path.to_path_buf())
    }
}

/// Normalize a raw payload, render it and write the document to `output_path`
pub fn generate_resume(raw: &Value, output_path: &Path) -> Result<PathBuf> {
    let record = Normalizer::normalize(raw);
    DocumentAssembler::write(&record, output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::document::BlockKind;
    use serde_json::json;

    fn assemble(raw: Value) -> RenderedDocument {
        DocumentAssembler::assemble(&Normalizer::normalize(&raw))
    }

    fn full_payload() -> Value {
        // Keys deliberately out of template order
        json!({
            "SoftSkills": ["Mentoring"],
            "TechnicalSkills": ["Rust"],
            "Education": [{"degree": "BSc"}],
            "Certifications": [{"title": "CKA"}],
            "Experiences": [{"companyName": "Acme"}],
            "Projects": [{"title": "Compiler"}],
            "Professional Summary": "Systems engineer.",
            "Full Name": "Jane Roe",
            "Email": "jane@example.com"
        })
    }

    #[test]
    fn test_section_order_is_fixed() {
        let doc = assemble(full_payload());
        assert_eq!(doc.headings(), SECTION_ORDER.to_vec());
    }

    #[test]
    fn test_every_heading_has_content() {
        let doc = assemble(json!({
            "Professional Summary": "   ",
            "Projects": [],
            "Experiences": [{}],
            "TechnicalSkills": [""],
            "SoftSkills": ["Listening"]
        }));

        assert_eq!(doc.headings(), vec![EXPERIENCE_TITLE, SOFT_SKILLS_TITLE]);
        for title in doc.headings() {
            assert!(!doc.section(&title).unwrap().is_empty());
        }
    }

    #[test]
    fn test_empty_projects_section_is_omitted() {
        let doc = assemble(json!({"Full Name": "A", "Projects": []}));
        assert!(doc.headings().is_empty());
        assert_eq!(doc.blocks()[0].text(), "A");
    }

    #[test]
    fn test_skill_sections() {
        let doc = assemble(json!({"TechnicalSkills": ["Go", "Rust"], "SoftSkills": []}));

        assert_eq!(doc.headings(), vec![TECHNICAL_SKILLS_TITLE]);
        let section = doc.section(TECHNICAL_SKILLS_TITLE).unwrap();
        assert_eq!(section.len(), 1);
        assert_eq!(section[0].text(), "Go, Rust");
    }

    #[test]
    fn test_experience_entry_skips_empty_fields() {
        let doc = assemble(json!({
            "Experiences": [{
                "companyName": "Acme",
                "jobTitle": "",
                "duration": "2020",
                "description": ""
            }]
        }));

        let section = doc.section(EXPERIENCE_TITLE).unwrap();
        let bullets: Vec<String> = section
            .iter()
            .filter(|b| b.kind == BlockKind::Bullet)
            .map(|b| b.text())
            .collect();
        assert_eq!(bullets, vec!["Company Name: Acme", "Duration: 2020"]);
    }

    #[test]
    fn test_empty_record_has_no_headings() {
        let doc = assemble(json!({}));
        assert!(doc.headings().is_empty());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_spacer_count_matches_entry_count() {
        let doc = assemble(json!({
            "Projects": [{"title": "A"}, {}, {"link": "https://x.dev"}]
        }));

        let spacers = doc
            .section(PROJECTS_TITLE)
            .unwrap()
            .iter()
            .filter(|b| b.kind == BlockKind::Spacer)
            .count();
        assert_eq!(spacers, 3);
    }

    #[test]
    fn test_generate_resume_writes_docx() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");

        let written = generate_resume(&full_payload(), &path).unwrap();

        assert_eq!(written, path);
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
