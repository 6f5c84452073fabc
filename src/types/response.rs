use serde::{Deserialize, Serialize};

// ===== Gemini generateContent wire types =====

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        }
    }
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        Some(text.trim().to_string())
    }
}

// ===== Scoring result =====

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AtsScore {
    /// Best-effort 0-100 score pulled from the model text
    pub score: Option<u8>,
    pub analysis: String,
}
