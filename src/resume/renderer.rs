// src/resume/renderer.rs
//! Block renderers for the fixed resume template

use super::document::*;
use super::record::{Entry, FieldSchema, ResumeRecord};

/// Appends a bold `"{label}: "` run and the plain value to `block`
pub fn format_field(block: &mut Block, label: &str, value: &str) {
    block.push_run(Run::plain(format!("{}: ", label), BODY_SIZE_PT).bold());
    block.push_run(Run::plain(value, BODY_SIZE_PT));
}

/// Name and contact line; not a section, so no heading is emitted
pub fn render_header(doc: &mut DocumentBuilder, record: &ResumeRecord) {
    let name = record.full_name.trim();
    if !name.is_empty() {
        doc.push(
            Block::new(BlockKind::Title)
                .centered()
                .with_run(Run::plain(name, TITLE_SIZE_PT).bold()),
        );
    }

    let contact_parts = record.contact_parts();
    if contact_parts.is_empty() {
        return;
    }

    let mut contact = Block::new(BlockKind::Contact).centered();
    for (i, value) in contact_parts.iter().enumerate() {
        contact.push_run(
            Run::plain(*value, CONTACT_SIZE_PT)
                .underline()
                .color(LINK_COLOR),
        );
        if i < contact_parts.len() - 1 {
            contact.push_run(Run::plain(", ", CONTACT_SIZE_PT));
        }
    }
    doc.push(contact);
    doc.spacer();
}

/// Free-text section; skipped when the text is blank
pub fn render_section(doc: &mut DocumentBuilder, title: &str, content: &str) {
    if content.trim().is_empty() {
        return;
    }
    doc.heading(title);
    doc.paragraph(content);
}

/// One bullet per present field, one spacer per entry
pub fn render_entries(
    doc: &mut DocumentBuilder,
    title: &str,
    entries: &[Entry],
    fields: FieldSchema,
) {
    if entries.is_empty() {
        return;
    }
    doc.heading(title);

    for entry in entries {
        for (label, key) in fields {
            if let Some(value) = entry.present(key) {
                let mut bullet = Block::new(BlockKind::Bullet);
                format_field(&mut bullet, label, value);
                doc.push(bullet);
            }
        }
        doc.spacer();
    }
}

pub fn render_skills(doc: &mut DocumentBuilder, title: &str, skills: &[String]) {
    if skills.is_empty() {
        return;
    }
    doc.heading(title);
    doc.paragraph(&skills.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::record::EXPERIENCE_FIELDS;

    #[test]
    fn test_format_field_runs() {
        let mut block = Block::new(BlockKind::Bullet);
        format_field(&mut block, "Issuer", "AWS");

        assert_eq!(block.runs.len(), 2);
        assert!(block.runs[0].bold);
        assert_eq!(block.runs[0].text, "Issuer: ");
        assert!(!block.runs[1].bold);
        assert_eq!(block.text(), "Issuer: AWS");
    }

    #[test]
    fn test_blank_section_is_skipped() {
        let mut doc = DocumentBuilder::new();
        render_section(&mut doc, "Professional Summary", "  \n\t ");
        assert!(doc.finish().is_empty());
    }

    #[test]
    fn test_section_keeps_content_verbatim() {
        let mut doc = DocumentBuilder::new();
        render_section(&mut doc, "Professional Summary", "  Line one\nLine two ");
        let doc = doc.finish();
        assert_eq!(doc.headings(), vec!["Professional Summary"]);
        assert_eq!(doc.blocks()[1].text(), "  Line one\nLine two ");
    }

    #[test]
    fn test_blank_entries_still_get_spacers() {
        let mut doc = DocumentBuilder::new();
        let entries = vec![Entry::new(), Entry::new().with_field("jobTitle", " ")];
        render_entries(&mut doc, "Work Experience", &entries, EXPERIENCE_FIELDS);

        let doc = doc.finish();
        let section = doc.section("Work Experience").unwrap();
        assert_eq!(section.len(), 2);
        assert!(section.iter().all(|b| b.kind == BlockKind::Spacer));
    }

    #[test]
    fn test_entry_fields_follow_schema_order() {
        let mut doc = DocumentBuilder::new();
        let entry = Entry::new()
            .with_field("description", "Built things")
            .with_field("companyName", "Acme");
        render_entries(&mut doc, "Work Experience", &[entry], EXPERIENCE_FIELDS);

        let doc = doc.finish();
        let bullets: Vec<String> = doc
            .blocks()
            .iter()
            .filter(|b| b.kind == BlockKind::Bullet)
            .map(Block::text)
            .collect();
        assert_eq!(
            bullets,
            vec!["Company Name: Acme", "Job Responsibilities: Built things"]
        );
    }

    #[test]
    fn test_header_without_contact_has_no_spacer() {
        let mut doc = DocumentBuilder::new();
        let record = ResumeRecord {
            full_name: "Jane Roe".to_string(),
            ..Default::default()
        };
        render_header(&mut doc, &record);

        let doc = doc.finish();
        assert_eq!(doc.blocks().len(), 1);
        assert_eq!(doc.blocks()[0].kind, BlockKind::Title);
        assert_eq!(doc.blocks()[0].alignment, Alignment::Center);
    }

    #[test]
    fn test_contact_line_is_comma_separated_links() {
        let mut doc = DocumentBuilder::new();
        let record = ResumeRecord {
            email: "jane@example.com".to_string(),
            linkedin: "linkedin.com/in/jane".to_string(),
            ..Default::default()
        };
        render_header(&mut doc, &record);

        let doc = doc.finish();
        let contact = &doc.blocks()[0];
        assert_eq!(contact.kind, BlockKind::Contact);
        assert_eq!(contact.text(), "jane@example.com, linkedin.com/in/jane");
        assert_eq!(contact.runs[0].color, Some(LINK_COLOR));
        assert!(contact.runs[1].color.is_none());
        assert_eq!(doc.blocks()[1].kind, BlockKind::Spacer);
    }
}
