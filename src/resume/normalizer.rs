// src/resume/normalizer.rs
//! Turns loosely-shaped resume payloads into a canonical `ResumeRecord`

use serde_json::{Map, Value};

use super::record::*;

/// Shape of a raw field before conversion
#[derive(Debug)]
enum RawField<'a> {
    Missing,
    Text(String),
    List(&'a [Value]),
    Object(&'a Map<String, Value>),
}

impl<'a> RawField<'a> {
    fn classify(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => RawField::Missing,
            Some(Value::String(s)) => RawField::Text(s.clone()),
            Some(Value::Number(n)) => RawField::Text(n.to_string()),
            Some(Value::Bool(b)) => RawField::Text(b.to_string()),
            Some(Value::Array(items)) => RawField::List(items),
            Some(Value::Object(map)) => RawField::Object(map),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            RawField::Missing => true,
            RawField::Text(s) => s.is_empty(),
            RawField::List(items) => items.is_empty(),
            RawField::Object(map) => map.is_empty(),
        }
    }

    fn into_text(self) -> String {
        match self {
            RawField::Text(s) => s,
            _ => String::new(),
        }
    }

    fn into_list(self) -> &'a [Value] {
        match self {
            RawField::List(items) => items,
            _ => &[],
        }
    }
}

pub struct Normalizer;

impl Normalizer {
    /// Normalize any JSON value; non-objects yield an empty record
    pub fn normalize(raw: &Value) -> ResumeRecord {
        match raw.as_object() {
            Some(map) => Self::normalize_map(map),
            None => ResumeRecord::default(),
        }
    }

    pub fn normalize_map(map: &Map<String, Value>) -> ResumeRecord {
        ResumeRecord {
            full_name: Self::text(map, FULL_NAME_KEY),
            email: Self::text(map, EMAIL_KEY),
            linkedin: Self::text(map, LINKEDIN_KEY),
            github: Self::text(map, GITHUB_KEY),
            professional_summary: Self::text(map, SUMMARY_KEY),
            projects: Self::entries(Self::lookup(map, PROJECTS_KEY, None)),
            experiences: Self::entries(Self::lookup(
                map,
                EXPERIENCES_KEY,
                Some(EXPERIENCES_ALT_KEY),
            )),
            certifications: Self::entries(Self::lookup(
                map,
                CERTIFICATIONS_KEY,
                Some(CERTIFICATIONS_ALT_KEY),
            )),
            education: Self::entries(Self::lookup(map, EDUCATION_KEY, None)),
            technical_skills: Self::skills(Self::lookup(
                map,
                TECHNICAL_SKILLS_KEY,
                Some(TECHNICAL_SKILLS_ALT_KEY),
            )),
            soft_skills: Self::skills(Self::lookup(
                map,
                SOFT_SKILLS_KEY,
                Some(SOFT_SKILLS_ALT_KEY),
            )),
        }
    }

    /// Primary key first; the alternate only when the primary is absent or empty
    fn lookup<'a>(
        map: &'a Map<String, Value>,
        primary: &str,
        alternate: Option<&str>,
    ) -> RawField<'a> {
        let field = RawField::classify(map.get(primary));
        match alternate {
            Some(alt) if field.is_empty() => RawField::classify(map.get(alt)),
            _ => field,
        }
    }

    fn text(map: &Map<String, Value>, key: &str) -> String {
        Self::lookup(map, key, None).into_text()
    }

    fn entries(field: RawField<'_>) -> Vec<Entry> {
        field.into_list().iter().map(Self::entry).collect()
    }

    fn entry(item: &Value) -> Entry {
        let mut entry = Entry::new();
        if let Some(fields) = item.as_object() {
            for (key, value) in fields {
                if let RawField::Text(text) = RawField::classify(Some(value)) {
                    entry.insert(key, &text);
                }
            }
        }
        entry
    }

    fn skills(field: RawField<'_>) -> Vec<String> {
        field
            .into_list()
            .iter()
            .filter_map(|item| match RawField::classify(Some(item)) {
                RawField::Text(s) => Some(s.trim().to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect()
    }
}
