// src/document/mod.rs
//! Document model: the ordered blocks that make up a CV, independent of the
//! container format they are written to.

pub mod assembler;
pub mod docx_writer;

pub use assembler::DocumentAssembler;
pub use docx_writer::DocxWriter;

pub const HEADING_PROFILE: &str = "Profile";
pub const HEADING_EXPERIENCE: &str = "Experience";
pub const HEADING_EDUCATION: &str = "Education";
pub const HEADING_SKILLS: &str = "Skills & Abilities";
pub const HEADING_ACTIVITIES: &str = "Activities and Interests";

pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// One paragraph-level element of the CV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Centered, bold, large name line
    Title(String),
    Heading(String),
    Paragraph(String),
    /// Bold "{role} - {place}" line opening an entry
    BoldLine(String),
    /// Bulleted list paragraph
    Bullet(String),
    /// Empty paragraph used for vertical spacing
    Spacer,
}

/// Page margins in twentieths of a point (1 inch = 1440).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMargins {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl Default for PageMargins {
    fn default() -> Self {
        Self {
            top: 720,
            bottom: 720,
            left: 1080,
            right: 1080,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CvDocument {
    pub margins: PageMargins,
    pub blocks: Vec<Block>,
}

impl CvDocument {
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn headings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Heading(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_heading(&self, heading: &str) -> bool {
        self.headings().contains(&heading)
    }

    /// Blocks between `heading` and the next heading (exclusive).
    pub fn section(&self, heading: &str) -> Option<&[Block]> {
        let start = self
            .blocks
            .iter()
            .position(|block| matches!(block, Block::Heading(text) if text == heading))?
            + 1;
        let len = self.blocks[start..]
            .iter()
            .position(|block| matches!(block, Block::Heading(_)))
            .unwrap_or(self.blocks.len() - start);
        Some(&self.blocks[start..start + len])
    }
}
