// src/preview.rs
//! Summary of what a record contains, shown before generating

use crate::types::cv_record::{is_present, CvRecord};
use crate::utils::excerpt;
use serde::Serialize;

const PROFILE_EXCERPT_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CvPreview {
    pub name: Option<String>,
    pub profile_excerpt: Option<String>,
    /// Entries with a company or position
    pub experience_entries: usize,
    /// Entries with a degree or institution
    pub education_entries: usize,
    pub skills_count: Option<usize>,
    pub has_activities: bool,
}

impl CvPreview {
    pub fn from_record(record: &CvRecord) -> Self {
        let experience_entries = record
            .experience
            .iter()
            .filter(|e| is_present(&e.company) || is_present(&e.position))
            .count();
        let education_entries = record
            .education
            .iter()
            .filter(|e| is_present(&e.degree) || is_present(&e.institution))
            .count();

        Self {
            name: is_present(&record.name).then(|| record.name.trim().to_string()),
            profile_excerpt: is_present(&record.profile)
                .then(|| excerpt(&record.profile, PROFILE_EXCERPT_CHARS)),
            experience_entries,
            education_entries,
            skills_count: is_present(&record.skills).then(|| record.skills.split(',').count()),
            has_activities: is_present(&record.activities),
        }
    }

    /// Human-readable lines, one per populated item
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(name) = &self.name {
            lines.push(format!("Name: {}", name));
        }
        if let Some(profile) = &self.profile_excerpt {
            lines.push(format!("Profile: {}", profile));
        }
        if self.experience_entries > 0 {
            lines.push(format!("Experience: {} entries", self.experience_entries));
        }
        if self.education_entries > 0 {
            lines.push(format!("Education: {} entries", self.education_entries));
        }
        if let Some(count) = self.skills_count {
            lines.push(format!("Skills: {} skills listed", count));
        }
        if self.has_activities {
            lines.push("Activities: Listed".to_string());
        }
        lines
    }
}
