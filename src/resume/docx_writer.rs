// src/resume/docx_writer.rs
//! Serializes a `RenderedDocument` to Office Open XML (.docx)

use anyhow::{Context, Result};
use docx_rs::{
    AbstractNumbering, AlignmentType, BreakType, Docx, IndentLevel, Level, LevelJc, LevelText,
    NumberFormat, Numbering, NumberingId, SpecialIndentType, Start,
};
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use super::document::{Alignment, Block, BlockKind, RenderedDocument, Run};

pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const BULLET_NUMBERING_ID: usize = 1;

pub struct DocxWriter;

impl DocxWriter {
    /// Create or overwrite the file at `path`
    pub fn write_to_path(doc: &RenderedDocument, path: &Path) -> Result<()> {
        let bytes = Self::to_bytes(doc)
            .with_context(|| format!("Failed to build document: {}", path.display()))?;
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write document file: {}", path.display()))
    }

    pub fn to_bytes(doc: &RenderedDocument) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        Self::write(doc, &mut cursor)?;
        Ok(cursor.into_inner())
    }

    fn write<W: Write + Seek>(doc: &RenderedDocument, writer: W) -> Result<()> {
        let docx = doc
            .blocks()
            .iter()
            .fold(Self::base_document(), |docx, block| {
                docx.add_paragraph(Self::paragraph(block))
            });

        docx.build()
            .pack(writer)
            .context("Failed to pack docx archive")?;
        Ok(())
    }

    fn base_document() -> Docx {
        let bullet_level = Level::new(
            0,
            Start::new(1),
            NumberFormat::new("bullet"),
            LevelText::new("•"),
            LevelJc::new("left"),
        )
        .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None);

        Docx::new()
            .add_abstract_numbering(
                AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(bullet_level),
            )
            .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID))
    }

    fn paragraph(block: &Block) -> docx_rs::Paragraph {
        let mut paragraph = block
            .runs
            .iter()
            .fold(docx_rs::Paragraph::new(), |p, run| p.add_run(Self::run(run)));

        if block.alignment == Alignment::Center {
            paragraph = paragraph.align(AlignmentType::Center);
        }
        if block.kind == BlockKind::Bullet {
            paragraph = paragraph.numbering(
                NumberingId::new(BULLET_NUMBERING_ID),
                IndentLevel::new(0),
            );
        }
        paragraph
    }

    fn run(run: &Run) -> docx_rs::Run {
        let mut out = docx_rs::Run::new().size(run.size_pt as usize * 2);

        for (i, line) in run.text.split('\n').enumerate() {
            if i > 0 {
                out = out.add_break(BreakType::TextWrapping);
            }
            out = out.add_text(line);
        }

        if run.bold {
            out = out.bold();
        }
        if run.underline {
            out = out.underline("single");
        }
        if let Some(color) = run.color {
            out = out.color(color);
        }
        out
    }
}
