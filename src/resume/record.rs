// src/resume/record.rs
//! Canonical resume record produced by the normalizer

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ===== Input key names =====

pub const FULL_NAME_KEY: &str = "Full Name";
pub const EMAIL_KEY: &str = "Email";
pub const LINKEDIN_KEY: &str = "LinkedIn";
pub const GITHUB_KEY: &str = "GitHub";
pub const SUMMARY_KEY: &str = "Professional Summary";
pub const PROJECTS_KEY: &str = "Projects";
pub const EXPERIENCES_KEY: &str = "Experiences";
pub const EXPERIENCES_ALT_KEY: &str = "Experience";
pub const CERTIFICATIONS_KEY: &str = "Certifications";
pub const CERTIFICATIONS_ALT_KEY: &str = "Certification";
pub const EDUCATION_KEY: &str = "Education";
pub const TECHNICAL_SKILLS_KEY: &str = "TechnicalSkills";
pub const TECHNICAL_SKILLS_ALT_KEY: &str = "technicalSkills";
pub const SOFT_SKILLS_KEY: &str = "SoftSkills";
pub const SOFT_SKILLS_ALT_KEY: &str = "softSkills";

// ===== Field schemas (label, entry key) =====

pub type FieldSchema = &'static [(&'static str, &'static str)];

pub const PROJECT_FIELDS: FieldSchema = &[
    ("Project Title", "title"),
    ("Project Description", "description"),
    ("Technologies Used", "techStack"),
    ("Project URL", "link"),
];

pub const EXPERIENCE_FIELDS: FieldSchema = &[
    ("Company Name", "companyName"),
    ("Job Title", "jobTitle"),
    ("Duration", "duration"),
    ("Job Responsibilities", "description"),
];

pub const CERTIFICATION_FIELDS: FieldSchema = &[
    ("Certification Title", "title"),
    ("Issuer", "issuer"),
    ("Date", "date"),
];

pub const EDUCATION_FIELDS: FieldSchema = &[
    ("Degree", "degree"),
    ("Institution Name", "institution"),
    ("Duration", "duration"),
];

/// One structured item of a repeated-entry section (a job, a project...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entry {
    fields: BTreeMap<String, String>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.fields.insert(key.to_string(), value.to_string());
    }

    /// Value for `key`, empty when the field is missing
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    /// Value for `key` only when it carries visible text
    pub fn present(&self, key: &str) -> Option<&str> {
        let value = self.get(key);
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

/// Resume after normalization: fixed key names, every collection present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(rename = "Full Name", default)]
    pub full_name: String,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "LinkedIn", default)]
    pub linkedin: String,
    #[serde(rename = "GitHub", default)]
    pub github: String,
    #[serde(rename = "Professional Summary", default)]
    pub professional_summary: String,
    #[serde(rename = "Projects", default)]
    pub projects: Vec<Entry>,
    #[serde(rename = "Experiences", default)]
    pub experiences: Vec<Entry>,
    #[serde(rename = "Certifications", default)]
    pub certifications: Vec<Entry>,
    #[serde(rename = "Education", default)]
    pub education: Vec<Entry>,
    #[serde(rename = "TechnicalSkills", default)]
    pub technical_skills: Vec<String>,
    #[serde(rename = "SoftSkills", default)]
    pub soft_skills: Vec<String>,
}

impl ResumeRecord {
    /// Contact values in display order, blanks removed
    pub fn contact_parts(&self) -> Vec<&str> {
        [&self.email, &self.linkedin, &self.github]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
