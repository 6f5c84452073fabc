// src/resume/document.rs
//! In-memory content model of a rendered resume

pub const TITLE_SIZE_PT: u8 = 18;
pub const HEADING_SIZE_PT: u8 = 14;
pub const BODY_SIZE_PT: u8 = 12;
pub const CONTACT_SIZE_PT: u8 = 10;
pub const LINK_COLOR: &str = "0000FF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Title,
    Contact,
    Heading,
    Paragraph,
    Bullet,
    Spacer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub underline: bool,
    pub size_pt: u8,
    pub color: Option<&'static str>,
}

impl Run {
    pub fn plain(text: impl Into<String>, size_pt: u8) -> Self {
        Self {
            text: text.into(),
            bold: false,
            underline: false,
            size_pt,
            color: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn color(mut self, color: &'static str) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub alignment: Alignment,
    pub runs: Vec<Run>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            alignment: Alignment::Left,
            runs: Vec::new(),
        }
    }

    pub fn centered(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }

    pub fn push_run(&mut self, run: Run) {
        self.runs.push(run);
    }

    pub fn with_run(mut self, run: Run) -> Self {
        self.push_run(run);
        self
    }

    /// Concatenated text of all runs
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Accumulates blocks while the renderers run
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    blocks: Vec<Block>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn heading(&mut self, title: &str) {
        self.push(
            Block::new(BlockKind::Heading)
                .with_run(Run::plain(title, HEADING_SIZE_PT).bold().underline()),
        );
    }

    pub fn paragraph(&mut self, text: &str) {
        self.push(Block::new(BlockKind::Paragraph).with_run(Run::plain(text, BODY_SIZE_PT)));
    }

    pub fn spacer(&mut self) {
        self.push(Block::new(BlockKind::Spacer));
    }

    pub fn finish(self) -> RenderedDocument {
        RenderedDocument {
            blocks: self.blocks,
        }
    }
}

/// Finished, read-only block sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    blocks: Vec<Block>,
}

impl RenderedDocument {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn headings(&self) -> Vec<String> {
        self.blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Heading)
            .map(Block::text)
            .collect()
    }

    /// Blocks between the heading `title` and the next heading
    pub fn section(&self, title: &str) -> Option<&[Block]> {
        let start = self
            .blocks
            .iter()
            .position(|b| b.kind == BlockKind::Heading && b.text() == title)?
            + 1;
        let end = self.blocks[start..]
            .iter()
            .position(|b| b.kind == BlockKind::Heading)
            .map(|offset| start + offset)
            .unwrap_or(self.blocks.len());
        Some(&self.blocks[start..end])
    }

    /// Plain-text rendition, one line per block
    pub fn to_plain_text(&self) -> String {
        let lines: Vec<String> = self
            .blocks
            .iter()
            .map(|block| match block.kind {
                BlockKind::Bullet => format!("- {}", block.text()),
                _ => block.text(),
            })
            .collect();
        lines.join("\n").trim().to_string()
    }
}
