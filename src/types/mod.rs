// src/types/mod.rs
pub mod cv_record;
pub mod response;

pub use cv_record::{CvRecord, EducationEntry, ExperienceEntry};
