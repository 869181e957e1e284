//! OpenAI-compatible chat-completions profile adapter.
//!
//! Asks the configured model for a personalization profile derived from the
//! user's birth details. The model is instructed to answer with bare JSON,
//! but replies wrapped in Markdown fences or prose are tolerated.

use crate::domain::error::MuhurtaError;
use crate::domain::profile::{BirthDetails, Profile};
use crate::ports::astro_port::AstroPort;
use crate::ports::config_port::ConfigPort;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TIMEOUT_SECS: i64 = 60;

const SYSTEM_PROMPT: &str = "You are a Vedic astrology expert. Based on the following \
user info, return a JSON with luckyRoots (1-9), unluckyRoots (1-9), and luckyDays \
(Mon-Sun). Only output the JSON.";

pub struct OpenAiAdapter {
    http: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiAdapter {
    /// Builds a client from the `[api]` config section. The key falls back
    /// to the `OPENAI_API_KEY` environment variable.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, MuhurtaError> {
        let api_key = config
            .get_string("api", "api_key")
            .filter(|s| !s.trim().is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| MuhurtaError::ConfigMissing {
                section: "api".to_string(),
                key: "api_key".to_string(),
            })?;
        let base_url = config
            .get_string("api", "base_url")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = config
            .get_string("api", "model")
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let timeout = config.get_int("api", "timeout_secs", DEFAULT_TIMEOUT_SECS);

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout.max(1) as u64))
            .build()
            .map_err(|e| MuhurtaError::ApiRequest {
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            api_key,
            base_url,
            model,
        })
    }

    fn user_prompt(birth: &BirthDetails) -> String {
        format!(
            "Name: {}, DOB: {}, Time: {}, Location: {}",
            birth.name, birth.dob, birth.birth_time, birth.location
        )
    }
}

impl AstroPort for OpenAiAdapter {
    fn fetch_profile(&self, birth: &BirthDetails) -> Result<Profile, MuhurtaError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        );
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: Self::user_prompt(birth),
                },
            ],
        };

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| MuhurtaError::ApiRequest {
                reason: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| MuhurtaError::ApiRequest {
            reason: e.to_string(),
        })?;
        if !status.is_success() {
            return Err(MuhurtaError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| MuhurtaError::ApiResponse {
                reason: format!("malformed completion response: {e}"),
            })?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| MuhurtaError::ApiResponse {
                reason: "no response content".to_string(),
            })?;

        parse_profile(&content)
    }
}

/// Best-effort extraction of a JSON object from model output: strips
/// Markdown fences, otherwise takes the first `{` through the last `}`.
fn extract_json(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.starts_with("```") {
        let mut inner = trimmed;
        if let Some(after_first) = inner.splitn(2, '\n').nth(1) {
            inner = after_first;
        }
        if let Some(end) = inner.rfind("```") {
            inner = &inner[..end];
        }
        return Some(inner.trim().to_string());
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(trimmed[start..=end].trim().to_string())
}

/// Decodes and validates a profile from raw model output.
fn parse_profile(text: &str) -> Result<Profile, MuhurtaError> {
    let json = extract_json(text).ok_or_else(|| MuhurtaError::ApiResponse {
        reason: format!("no JSON object in model output: {text}"),
    })?;
    serde_json::from_str(&json).map_err(|e| MuhurtaError::ApiResponse {
        reason: format!("model output is not a valid profile: {e}"),
    })
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
