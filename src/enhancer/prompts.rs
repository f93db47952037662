// src/enhancer/prompts.rs
use std::fmt;

/// Which CV section a piece of text belongs to; selects the prompt template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionKind {
    Profile,
    Experience,
    Education,
    Skills,
    Activities,
    /// Any other section; uses the generic prompt
    Other(String),
}

impl SectionKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Profile => "profile",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Skills => "skills",
            Self::Activities => "activities",
            Self::Other(label) => label,
        }
    }

    /// Section-specific instruction with the text appended.
    pub fn prompt_for(&self, text: &str) -> String {
        match self {
            Self::Profile => format!(
                "Enhance this professional profile/summary for a CV to make it more compelling and ATS-friendly while keeping it concise (2-3 sentences): {}",
                text
            ),
            Self::Experience => format!(
                "Enhance this work experience description for a CV using action verbs, quantifiable achievements, and professional language: {}",
                text
            ),
            Self::Education => format!(
                "Enhance this education information for a CV, making it more professional and comprehensive: {}",
                text
            ),
            Self::Skills => format!(
                "Enhance and organize these skills for a CV, grouping them professionally and using industry-standard terminology: {}",
                text
            ),
            Self::Activities => format!(
                "Enhance these activities and interests for a CV, focusing on professional relevance and leadership qualities: {}",
                text
            ),
            Self::Other(_) => format!("Enhance this text for a professional CV: {}", text),
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
