// src/types/cv_record.rs
//! Input record for a single CV generation request

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// `true` when the field carries visible content once trimmed.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

// ===== CV Record =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CvRecord {
    pub name: String,
    pub profile: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: String,
    pub activities: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub position: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub details: String,
}

impl ExperienceEntry {
    /// Duration alone does not make an entry worth rendering.
    pub fn is_renderable(&self) -> bool {
        is_present(&self.company) || is_present(&self.position) || is_present(&self.description)
    }

    /// "{position} - {company}" when both are filled in.
    pub fn title_line(&self) -> Option<String> {
        if is_present(&self.position) && is_present(&self.company) {
            Some(format!(
                "{} - {}",
                self.position.trim(),
                self.company.trim()
            ))
        } else {
            None
        }
    }
}

impl EducationEntry {
    /// Year alone does not make an entry worth rendering.
    pub fn is_renderable(&self) -> bool {
        is_present(&self.degree) || is_present(&self.institution) || is_present(&self.details)
    }

    pub fn title_line(&self) -> Option<String> {
        if is_present(&self.degree) && is_present(&self.institution) {
            Some(format!(
                "{} - {}",
                self.degree.trim(),
                self.institution.trim()
            ))
        } else {
            None
        }
    }
}

impl CvRecord {
    /// Required fields that are empty after trimming, in form order.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !is_present(&self.name) {
            missing.push("name");
        }
        if !is_present(&self.profile) {
            missing.push("profile");
        }
        if !is_present(&self.skills) {
            missing.push("skills");
        }
        missing
    }

    pub fn renderable_experience(&self) -> Vec<&ExperienceEntry> {
        self.experience.iter().filter(|e| e.is_renderable()).collect()
    }

    pub fn renderable_education(&self) -> Vec<&EducationEntry> {
        self.education.iter().filter(|e| e.is_renderable()).collect()
    }

    /// Load a record from a JSON, YAML or TOML file, picked by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read record file: {}", path.display()))?;

        let ext = crate::utils::get_file_extension(&path.to_string_lossy())
            .ok_or_else(|| anyhow::anyhow!("Record file has no extension: {}", path.display()))?;

        Self::parse(&content, &ext)
            .with_context(|| format!("Failed to parse record file: {}", path.display()))
    }

    pub fn parse(content: &str, format: &str) -> Result<Self> {
        match format {
            "json" => serde_json::from_str(content).context("Invalid JSON record"),
            "yaml" | "yml" => serde_yaml::from_str(content).context("Invalid YAML record"),
            "toml" => toml::from_str(content).context("Invalid TOML record"),
            other => anyhow::bail!(
                "Unsupported record format: {}. Use json, yaml or toml",
                other
            ),
        }
    }
}
