// src/document/assembler.rs
use super::{
    Block, CvDocument, PageMargins, HEADING_ACTIVITIES, HEADING_EDUCATION, HEADING_EXPERIENCE,
    HEADING_PROFILE, HEADING_SKILLS,
};
use crate::enhancer::{ContentEnhancer, SectionKind};
use crate::types::cv_record::{is_present, CvRecord};
use tracing::debug;

/// Maps a `CvRecord` to document blocks in the fixed section order.
///
/// Sections and entries whose source fields are blank are skipped entirely.
/// When built with an enhancer, each section body is routed through it first,
/// one call at a time.
pub struct DocumentAssembler<'a> {
    enhancement: Option<(&'a mut ContentEnhancer, &'a str)>,
}

impl<'a> DocumentAssembler<'a> {
    pub fn plain() -> Self {
        Self { enhancement: None }
    }

    pub fn with_enhancer(enhancer: &'a mut ContentEnhancer, credential: &'a str) -> Self {
        Self {
            enhancement: Some((enhancer, credential)),
        }
    }

    async fn body_text(&mut self, text: &str, kind: SectionKind) -> String {
        let text = text.trim();
        match self.enhancement.as_mut() {
            Some((enhancer, credential)) => enhancer.enhance(text, &kind, Some(*credential)).await,
            None => text.to_string(),
        }
    }

    pub async fn assemble(mut self, record: &CvRecord) -> CvDocument {
        let mut doc = CvDocument {
            margins: PageMargins::default(),
            blocks: Vec::new(),
        };

        if is_present(&record.name) {
            doc.push(Block::Title(record.name.trim().to_string()));
            doc.push(Block::Spacer);
        }

        if is_present(&record.profile) {
            doc.push(Block::Heading(HEADING_PROFILE.to_string()));
            let text = self.body_text(&record.profile, SectionKind::Profile).await;
            doc.push(Block::Paragraph(text));
            doc.push(Block::Spacer);
        }

        let experience = record.renderable_experience();
        debug!(
            "Experience: {} of {} entries renderable",
            experience.len(),
            record.experience.len()
        );
        if !experience.is_empty() {
            doc.push(Block::Heading(HEADING_EXPERIENCE.to_string()));
            let last = experience.len() - 1;
            for (i, entry) in experience.into_iter().enumerate() {
                if let Some(title) = entry.title_line() {
                    doc.push(Block::BoldLine(title));
                }
                if is_present(&entry.duration) {
                    doc.push(Block::Bullet(entry.duration.trim().to_string()));
                }
                if is_present(&entry.description) {
                    let text = self
                        .body_text(&entry.description, SectionKind::Experience)
                        .await;
                    doc.push(Block::Paragraph(text));
                }
                if i < last {
                    doc.push(Block::Spacer);
                }
            }
            doc.push(Block::Spacer);
        }

        let education = record.renderable_education();
        if !education.is_empty() {
            doc.push(Block::Heading(HEADING_EDUCATION.to_string()));
            let last = education.len() - 1;
            for (i, entry) in education.into_iter().enumerate() {
                if let Some(title) = entry.title_line() {
                    doc.push(Block::BoldLine(title));
                }
                if is_present(&entry.year) {
                    doc.push(Block::Paragraph(entry.year.trim().to_string()));
                }
                if is_present(&entry.details) {
                    let text = self.body_text(&entry.details, SectionKind::Education).await;
                    doc.push(Block::Paragraph(text));
                }
                if i < last {
                    doc.push(Block::Spacer);
                }
            }
            doc.push(Block::Spacer);
        }

        if is_present(&record.skills) {
            doc.push(Block::Heading(HEADING_SKILLS.to_string()));
            let text = self.body_text(&record.skills, SectionKind::Skills).await;
            doc.push(Block::Paragraph(text));
            doc.push(Block::Spacer);
        }

        // Last possible section, no trailing spacer
        if is_present(&record.activities) {
            doc.push(Block::Heading(HEADING_ACTIVITIES.to_string()));
            let text = self
                .body_text(&record.activities, SectionKind::Activities)
                .await;
            doc.push(Block::Paragraph(text));
        }

        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnhancerConfig;
    use crate::enhancer::testing::FakeBackend;
    use crate::types::{EducationEntry, ExperienceEntry};

    fn jane() -> CvRecord {
        CvRecord {
            name: "Jane Doe".to_string(),
            profile: "Engineer.".to_string(),
            skills: "Go, SQL".to_string(),
            ..Default::default()
        }
    }

    fn experience(position: &str, company: &str, duration: &str, description: &str) -> ExperienceEntry {
        ExperienceEntry {
            position: position.to_string(),
            company: company.to_string(),
            duration: duration.to_string(),
            description: description.to_string(),
        }
    }

    fn spacers(blocks: &[Block]) -> usize {
        blocks.iter().filter(|b| **b == Block::Spacer).count()
    }

    #[tokio::test]
    async fn test_minimal_record() {
        let doc = DocumentAssembler::plain().assemble(&jane()).await;

        assert_eq!(
            doc.blocks,
            vec![
                Block::Title("Jane Doe".into()),
                Block::Spacer,
                Block::Heading(HEADING_PROFILE.into()),
                Block::Paragraph("Engineer.".into()),
                Block::Spacer,
                Block::Heading(HEADING_SKILLS.into()),
                Block::Paragraph("Go, SQL".into()),
                Block::Spacer,
            ]
        );
        assert!(!doc.has_heading(HEADING_EXPERIENCE));
        assert!(!doc.has_heading(HEADING_EDUCATION));
        assert!(!doc.has_heading(HEADING_ACTIVITIES));
    }

    #[tokio::test]
    async fn test_experience_without_description() {
        let mut record = jane();
        record.experience = vec![experience("Dev", "Acme", "2020-2021", "")];

        let doc = DocumentAssembler::plain().assemble(&record).await;
        assert_eq!(
            doc.section(HEADING_EXPERIENCE).unwrap(),
            &[
                Block::BoldLine("Dev - Acme".into()),
                Block::Bullet("2020-2021".into()),
                Block::Spacer,
            ]
        );
    }

    #[tokio::test]
    async fn test_spacing_between_entries() {
        let mut record = jane();
        record.experience = vec![
            experience("Dev", "Acme", "2020-2021", "Built APIs"),
            experience("Lead", "Globex", "2021-2024", "Led a team"),
        ];

        let doc = DocumentAssembler::plain().assemble(&record).await;
        let section = doc.section(HEADING_EXPERIENCE).unwrap();
        assert_eq!(
            section,
            &[
                Block::BoldLine("Dev - Acme".into()),
                Block::Bullet("2020-2021".into()),
                Block::Paragraph("Built APIs".into()),
                Block::Spacer,
                Block::BoldLine("Lead - Globex".into()),
                Block::Bullet("2021-2024".into()),
                Block::Paragraph("Led a team".into()),
                Block::Spacer,
            ]
        );
        assert_eq!(spacers(section), 2);
    }

    #[tokio::test]
    async fn test_skipped_entries_leave_no_spacing() {
        let mut record = jane();
        record.experience = vec![
            experience("", "", "2019", ""),
            experience("Dev", "Acme", "", ""),
            experience("   ", "", "", "  "),
        ];

        let doc = DocumentAssembler::plain().assemble(&record).await;
        assert_eq!(
            doc.section(HEADING_EXPERIENCE).unwrap(),
            &[Block::BoldLine("Dev - Acme".into()), Block::Spacer]
        );
    }

    #[tokio::test]
    async fn test_all_entries_blank_omits_heading() {
        let mut record = jane();
        record.experience = vec![ExperienceEntry::default(), experience("", "", "2020", "")];
        record.education = vec![EducationEntry {
            year: "2015".into(),
            ..Default::default()
        }];

        let doc = DocumentAssembler::plain().assemble(&record).await;
        assert!(!doc.has_heading(HEADING_EXPERIENCE));
        assert!(!doc.has_heading(HEADING_EDUCATION));
    }

    #[tokio::test]
    async fn test_education_and_activities() {
        let mut record = jane();
        record.education = vec![
            EducationEntry {
                degree: "BSc".into(),
                institution: "MIT".into(),
                year: "2015".into(),
                details: "Honors".into(),
            },
            EducationEntry {
                details: "Exchange semester".into(),
                ..Default::default()
            },
        ];
        record.activities = "Chess".to_string();

        let doc = DocumentAssembler::plain().assemble(&record).await;
        assert_eq!(
            doc.headings(),
            vec![
                HEADING_PROFILE,
                HEADING_EDUCATION,
                HEADING_SKILLS,
                HEADING_ACTIVITIES
            ]
        );
        assert_eq!(
            doc.section(HEADING_EDUCATION).unwrap(),
            &[
                Block::BoldLine("BSc - MIT".into()),
                Block::Paragraph("2015".into()),
                Block::Paragraph("Honors".into()),
                Block::Spacer,
                Block::Paragraph("Exchange semester".into()),
                Block::Spacer,
            ]
        );
        assert_eq!(doc.blocks.last(), Some(&Block::Paragraph("Chess".into())));
    }

    #[tokio::test]
    async fn test_enhancement_routes_every_body() {
        let backend = FakeBackend::ok("Polished");
        let mut enhancer = ContentEnhancer::new(backend.clone(), &EnhancerConfig::default());
        let mut record = jane();
        record.experience = vec![experience("Dev", "Acme", "2020", "Built APIs")];
        record.education = vec![EducationEntry {
            degree: "BSc".into(),
            details: "Honors".into(),
            ..Default::default()
        }];
        record.activities = "Chess".to_string();

        let doc = DocumentAssembler::with_enhancer(&mut enhancer, "key")
            .assemble(&record)
            .await;

        // profile, experience, education, skills, activities
        assert_eq!(backend.calls(), 5);
        assert_eq!(doc.blocks[0], Block::Title("Jane Doe".into()));
        assert_eq!(
            doc.section(HEADING_EXPERIENCE).unwrap(),
            &[
                Block::BoldLine("Dev - Acme".into()),
                Block::Bullet("2020".into()),
                Block::Paragraph("Polished".into()),
                Block::Spacer,
            ]
        );
        assert_eq!(doc.blocks.last(), Some(&Block::Paragraph("Polished".into())));
    }

    #[tokio::test]
    async fn test_enhancement_failure_keeps_text() {
        let backend = FakeBackend::failing("timeout");
        let mut enhancer = ContentEnhancer::new(backend.clone(), &EnhancerConfig::default());

        let doc = DocumentAssembler::with_enhancer(&mut enhancer, "key")
            .assemble(&jane())
            .await;

        assert_eq!(backend.calls(), 2);
        assert_eq!(
            doc.section(HEADING_PROFILE).unwrap(),
            &[Block::Paragraph("Engineer.".into()), Block::Spacer]
        );
        assert_eq!(enhancer.warnings().len(), 2);
    }
}
