// src/core/scoring_client.rs
//! HTTP client for the Gemini generateContent API used for ATS scoring

use anyhow::{Context, Result};
use tracing::{info, trace};

use crate::core::config_manager::ScoringConfig;
use crate::types::response::{AtsScore, GenerateContentRequest, GenerateContentResponse};

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct ScoringClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl ScoringClient {
    pub fn new(
        base_url: String,
        model: String,
        api_key: String,
        timeout_seconds: u64,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
        })
    }

    /// `None` when no API key is configured
    pub fn from_config(config: &ScoringConfig) -> Result<Option<Self>> {
        match &config.api_key {
            Some(key) => Ok(Some(Self::new(
                config.base_url.clone(),
                config.model.clone(),
                key.clone(),
                config.timeout_seconds,
            )?)),
            None => Ok(None),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Rate `resume_text` against `job_description`
    pub async fn score(&self, resume_text: &str, job_description: &str) -> Result<AtsScore> {
        let analysis = self
            .generate(build_prompt(resume_text, job_description))
            .await?;

        Ok(AtsScore {
            score: extract_score(&analysis),
            analysis,
        })
    }

    async fn generate(&self, prompt: String) -> Result<String> {
        let url = self.endpoint();
        info!("Calling scoring service: {}", url);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .context("Failed to call scoring service")?;

        let status = response.status();
        trace!("Response status: {}", status);

        if status.is_success() {
            let body: GenerateContentResponse = response
                .json()
                .await
                .context("Failed to parse scoring response")?;

            body.text()
                .ok_or_else(|| anyhow::anyhow!("Scoring service returned no candidates"))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Scoring failed with status {}: {}", status, error_text)
        }
    }
}

pub fn build_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        r#"
You are an ATS system. Given the following resume and job description, rate the resume's relevance to the job on a scale from 0 to 100. Suggest changes in the resume to improve its relevance.

Job Description:
{}

Resume:
{}

Return only the score as a number and a brief explanation of the match.
"#,
        job_description, resume_text
    )
}

/// First whole number in 0..=100 found in the model's answer
pub fn extract_score(text: &str) -> Option<u8> {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|token| !token.is_empty() && token.len() <= 3)
        .filter_map(|token| token.parse::<u8>().ok())
        .find(|score| *score <= 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::response::GenerateContentResponse;

    #[test]
    fn test_prompt_contains_both_texts() {
        let prompt = build_prompt("Rust developer", "Backend role");
        let job_at = prompt.find("Backend role").unwrap();
        let resume_at = prompt.find("Rust developer").unwrap();
        assert!(job_at < resume_at);
        assert!(prompt.contains("scale from 0 to 100"));
    }

    #[test]
    fn test_extract_score() {
        assert_eq!(extract_score("Score: 85/100. Strong match."), Some(85));
        assert_eq!(extract_score("72\nGood overlap"), Some(72));
        assert_eq!(extract_score("Relevance 100%"), Some(100));
        assert_eq!(extract_score("Over 2000 applicants; score 40"), Some(40));
        assert_eq!(extract_score("No numeric answer"), None);
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "80\n"}, {"text": "Good fit. "}], "role": "model"},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(body.text().as_deref(), Some("80\nGood fit."));
    }

    #[test]
    fn test_empty_candidates() {
        let body: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({"promptFeedback": {}})).unwrap();
        assert!(body.text().is_none());
    }

    #[test]
    fn test_from_config_without_key_is_disabled() {
        let config = ScoringConfig {
            api_key: None,
            model: "gemini-pro".to_string(),
            base_url: "http://localhost".to_string(),
            timeout_seconds: 5,
        };
        assert!(ScoringClient::from_config(&config).unwrap().is_none());

        let config = ScoringConfig {
            api_key: Some("k".to_string()),
            base_url: "http://localhost:9/".to_string(),
            ..config
        };
        let client = ScoringClient::from_config(&config).unwrap().unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9/v1beta/models/gemini-pro:generateContent"
        );
    }
}
