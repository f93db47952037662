// src/document/docx_writer.rs
//! Serialises a `CvDocument` into an Office Open XML (.docx) package

use super::{Block, CvDocument};
use anyhow::{Context, Result};
use docx_rs::{
    AbstractNumbering, AlignmentType, BreakType, Docx, IndentLevel, Level, LevelJc, LevelText,
    NumberFormat, Numbering, NumberingId, PageMargin, Paragraph, Run, Start, Style, StyleType,
};
use std::io::Cursor;
use tracing::debug;

const HEADING_STYLE_ID: &str = "Heading1";
const LIST_BULLET_STYLE_ID: &str = "ListBullet";
const BULLET_NUMBERING_ID: usize = 1;

// Sizes are in half-points
const TITLE_SIZE: usize = 43;
const HEADING_SIZE: usize = 28;
const HEADING_COLOR: &str = "2E74B5";

pub struct DocxWriter;

impl DocxWriter {
    pub fn write(doc: &CvDocument) -> Result<Vec<u8>> {
        let mut docx = Self::base_document(doc);

        for block in &doc.blocks {
            docx = docx.add_paragraph(Self::paragraph(block));
        }

        let mut buffer = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buffer)
            .context("Failed to pack DOCX archive")?;

        let bytes = buffer.into_inner();
        debug!(
            "Wrote DOCX with {} blocks ({} bytes)",
            doc.blocks.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    fn base_document(doc: &CvDocument) -> Docx {
        let margins = PageMargin::new()
            .top(doc.margins.top)
            .bottom(doc.margins.bottom)
            .left(doc.margins.left)
            .right(doc.margins.right);

        let heading = Style::new(HEADING_STYLE_ID, StyleType::Paragraph)
            .name("Heading 1")
            .bold()
            .size(HEADING_SIZE)
            .color(HEADING_COLOR);

        let list_bullet = Style::new(LIST_BULLET_STYLE_ID, StyleType::Paragraph).name("List Bullet");

        let bullet_level = Level::new(
            0,
            Start::new(1),
            NumberFormat::new("bullet"),
            LevelText::new("•"),
            LevelJc::new("left"),
        );

        Docx::new()
            .page_margin(margins)
            .add_style(heading)
            .add_style(list_bullet)
            .add_abstract_numbering(AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(bullet_level))
            .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID))
    }

    fn paragraph(block: &Block) -> Paragraph {
        match block {
            Block::Title(text) => Paragraph::new()
                .add_run(text_run(text).bold().size(TITLE_SIZE))
                .align(AlignmentType::Center),
            Block::Heading(text) => Paragraph::new()
                .add_run(text_run(text))
                .style(HEADING_STYLE_ID),
            Block::Paragraph(text) => Paragraph::new().add_run(text_run(text)),
            Block::BoldLine(text) => Paragraph::new().add_run(text_run(text).bold()),
            Block::Bullet(text) => Paragraph::new()
                .add_run(text_run(text))
                .style(LIST_BULLET_STYLE_ID)
                .numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0)),
            Block::Spacer => Paragraph::new(),
        }
    }
}

/// Builds a run from free text.
///
/// Line feeds, and the vertical tab / form feed Word uses for manual breaks,
/// become `<w:br/>`; tabs become `<w:tab/>`. Any other character that XML 1.0
/// does not allow is dropped so the package always parses.
fn text_run(text: &str) -> Run {
    let mut run = Run::new();
    let mut pending = String::new();

    for c in text.chars() {
        match c {
            '\n' | '\u{000B}' | '\u{000C}' => {
                run = flush_text(run, &mut pending).add_break(BreakType::TextWrapping);
            }
            '\t' => {
                run = flush_text(run, &mut pending).add_tab();
            }
            c if is_xml_char(c) => pending.push(c),
            _ => {}
        }
    }

    flush_text(run, &mut pending)
}

fn flush_text(run: Run, pending: &mut String) -> Run {
    if pending.is_empty() {
        run
    } else {
        run.add_text(std::mem::take(pending))
    }
}

// `\r` is legal XML but parsers fold it into `\n`; line breaks are explicit here
fn is_xml_char(c: char) -> bool {
    !matches!(c, '\u{0000}'..='\u{001F}' | '\u{FFFE}' | '\u{FFFF}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentAssembler, PageMargins, HEADING_PROFILE};
    use crate::types::cv_record::{CvRecord, ExperienceEntry};
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    fn sample() -> CvDocument {
        CvDocument {
            margins: PageMargins::default(),
            blocks: vec![
                Block::Title("Jane Doe".into()),
                Block::Spacer,
                Block::Heading(HEADING_PROFILE.into()),
                Block::Paragraph("Engineer.".into()),
                Block::BoldLine("Dev - Acme".into()),
                Block::Bullet("2020-2021".into()),
            ],
        }
    }

    fn single(block: Block) -> CvDocument {
        CvDocument {
            margins: PageMargins::default(),
            blocks: vec![block],
        }
    }

    fn read_paragraphs(bytes: &[u8]) -> Vec<docx_rs::Paragraph> {
        docx_rs::read_docx(bytes)
            .unwrap()
            .document
            .children
            .into_iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    fn runs(paragraph: &docx_rs::Paragraph) -> Vec<&Run> {
        paragraph
            .children
            .iter()
            .filter_map(|child| match child {
                ParagraphChild::Run(run) => Some(run.as_ref()),
                _ => None,
            })
            .collect()
    }

    /// Run content flattened to text, with `<br>` and `<tab>` markers.
    fn content(paragraph: &docx_rs::Paragraph) -> String {
        let mut out = String::new();
        for run in runs(paragraph) {
            for child in &run.children {
                match child {
                    RunChild::Text(t) => out.push_str(&t.text),
                    RunChild::Break(_) => out.push_str("<br>"),
                    RunChild::Tab(_) => out.push_str("<tab>"),
                    _ => {}
                }
            }
        }
        out
    }

    fn style(paragraph: &docx_rs::Paragraph) -> Option<&str> {
        paragraph.property.style.as_ref().map(|s| s.val.as_str())
    }

    /// One line per paragraph: its kind as the reader sees it, then its text.
    fn describe(paragraph: &docx_rs::Paragraph) -> String {
        let text = content(paragraph);
        if text.is_empty() {
            return "spacer".to_string();
        }
        let bold = runs(paragraph)
            .iter()
            .all(|run| run.run_property.bold.is_some());
        let centered = paragraph
            .property
            .alignment
            .as_ref()
            .is_some_and(|j| j.val == "center");

        let kind = match style(paragraph) {
            Some(HEADING_STYLE_ID) => "heading",
            Some(LIST_BULLET_STYLE_ID) => "bullet",
            _ if centered && bold => "title",
            _ if bold => "bold",
            _ => "text",
        };
        format!("{}: {}", kind, text)
    }

    #[test]
    fn test_writes_zip_package() {
        let bytes = DocxWriter::write(&sample()).unwrap();

        assert!(bytes.starts_with(b"PK"));
        // Entry names are stored uncompressed in the zip headers
        let haystack = String::from_utf8_lossy(&bytes);
        assert!(haystack.contains("word/document.xml"));
        assert!(haystack.contains("[Content_Types].xml"));
    }

    #[test]
    fn test_page_margins() {
        let bytes = DocxWriter::write(&sample()).unwrap();
        let docx = docx_rs::read_docx(&bytes).unwrap();
        let margin = docx.document.section_property.page_margin;

        assert_eq!(margin.top, 720);
        assert_eq!(margin.bottom, 720);
        assert_eq!(margin.left, 1080);
        assert_eq!(margin.right, 1080);
    }

    #[test]
    fn test_title_formatting() {
        let bytes = DocxWriter::write(&sample()).unwrap();
        let paragraphs = read_paragraphs(&bytes);
        let title = &paragraphs[0];

        assert_eq!(content(title), "Jane Doe");
        assert_eq!(
            title.property.alignment.as_ref().map(|j| j.val.as_str()),
            Some("center")
        );
        let run = runs(title)[0];
        assert!(run.run_property.bold.is_some());
        assert_eq!(run.run_property.sz, Some(docx_rs::Sz::new(TITLE_SIZE)));
    }

    #[test]
    fn test_heading_bullet_and_spacer_paragraphs() {
        let bytes = DocxWriter::write(&sample()).unwrap();
        let paragraphs = read_paragraphs(&bytes);
        assert_eq!(paragraphs.len(), 6);

        assert_eq!(describe(&paragraphs[1]), "spacer");
        assert_eq!(style(&paragraphs[2]), Some("Heading1"));
        assert_eq!(content(&paragraphs[2]), HEADING_PROFILE);
        assert_eq!(style(&paragraphs[3]), None);

        let bold_line = &paragraphs[4];
        assert!(runs(bold_line)[0].run_property.bold.is_some());

        let bullet = &paragraphs[5];
        assert_eq!(style(bullet), Some("ListBullet"));
        let numbering = bullet.property.numbering_property.as_ref().unwrap();
        assert_eq!(numbering.id.as_ref().map(|n| n.id), Some(BULLET_NUMBERING_ID));
        assert_eq!(content(bullet), "2020-2021");
    }

    #[test]
    fn test_line_breaks_and_tabs_are_kept() {
        let doc = single(Block::Paragraph(
            "Line one\nLine two\tindented\r\nLine three".into(),
        ));
        let bytes = DocxWriter::write(&doc).unwrap();
        let paragraphs = read_paragraphs(&bytes);

        assert_eq!(
            content(&paragraphs[0]),
            "Line one<br>Line two<tab>indented<br>Line three"
        );
    }

    #[test]
    fn test_pasted_control_characters() {
        let doc = single(Block::Paragraph(
            "Built APIs\u{000B}Led team\u{0007} of\u{0000} five".into(),
        ));
        let bytes = DocxWriter::write(&doc).unwrap();
        let paragraphs = read_paragraphs(&bytes);

        assert_eq!(content(&paragraphs[0]), "Built APIs<br>Led team of five");
    }

    #[test]
    fn test_text_run_skips_illegal_characters() {
        let run = text_run("a\u{0001}b\u{FFFF}");
        assert_eq!(run.children.len(), 1);
        match &run.children[0] {
            RunChild::Text(t) => assert_eq!(t.text, "ab"),
            other => panic!("unexpected run child: {:?}", other),
        }
        assert!(text_run("\u{0002}").children.is_empty());
    }

    #[tokio::test]
    async fn test_written_document_follows_section_order() {
        let record = CvRecord {
            name: "Jane Doe".to_string(),
            profile: "Engineer.".to_string(),
            skills: "Go, SQL".to_string(),
            experience: vec![ExperienceEntry {
                position: "Dev".to_string(),
                company: "Acme".to_string(),
                duration: "2020-2021".to_string(),
                description: String::new(),
            }],
            ..Default::default()
        };

        let document = DocumentAssembler::plain().assemble(&record).await;
        let bytes = DocxWriter::write(&document).unwrap();
        let described: Vec<String> = read_paragraphs(&bytes).iter().map(describe).collect();

        assert_eq!(
            described[..9],
            [
                "title: Jane Doe",
                "spacer",
                "heading: Profile",
                "text: Engineer.",
                "spacer",
                "heading: Experience",
                "bold: Dev - Acme",
                "bullet: 2020-2021",
                "spacer",
            ]
        );
        assert!(described[9].starts_with("heading: Skills"));
        assert_eq!(described[10..], ["text: Go, SQL", "spacer"]);
    }

    #[test]
    fn test_empty_document() {
        let bytes = DocxWriter::write(&CvDocument::default()).unwrap();
        assert!(bytes.starts_with(b"PK"));
        assert!(read_paragraphs(&bytes).is_empty());
    }
}
