// src/extractors/mod.rs
pub mod profile;
pub mod rules;

// Re-export key extraction types for convenience
pub use profile::{EducationEntry, ExperienceEntry, ProfileExtractor, ProfileRecord};
