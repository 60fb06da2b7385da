//! AI provider gateway: chat-completion calls against an OpenAI-compatible
//! endpoint, requesting strict JSON. Every failure mode (missing key,
//! network, non-2xx, empty content, schema mismatch) surfaces as an
//! `AiError` so callers can fall back to the deterministic generators.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::PlanRequest;

const SYSTEM_PROMPT: &str =
    "You are a professional fitness and nutrition assistant. Return pure JSON only.";

const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Error, Debug)]
pub enum AiError {
    #[error("AI provider not configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {0}")]
    Status(u16),

    #[error("provider returned no content")]
    EmptyResponse,

    #[error("provider returned malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct AiGateway {
    client: Client,
    config: AiConfig,
}

impl AiGateway {
    pub fn new(config: AiConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Whether calls should be attempted at all. When false, callers go
    /// straight to the fallback path.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled && self.config.api_key.is_some()
    }

    /// Send a prompt and deserialize the reply content into `T`.
    ///
    /// Validating against the typed schema happens here so callers never
    /// have to trust optimistic field access on provider output.
    pub async fn request_json<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, AiError> {
        let api_key = self.config.api_key.as_deref().ok_or(AiError::NotConfigured)?;

        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("AI provider returned status {}", status);
            return Err(AiError::Status(status.as_u16()));
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AiError::EmptyResponse)?;

        Ok(serde_json::from_str(content.trim())?)
    }
}

/// Prompt asking for the full 8-week plan shape.
pub fn workout_prompt(request: &PlanRequest) -> String {
    let goal = serde_json::to_string(&request.goal).unwrap_or_default();
    let experience = serde_json::to_string(&request.experience).unwrap_or_default();
    format!(
        r#"You are a professional strength and conditioning coach.
Generate a realistic 8-week workout program for a {experience} lifter whose goal is {goal}.
They train {days} days per week, each session lasts {minutes} minutes.

Return pure JSON in this structure:
{{
  "split": string,
  "splitReason": string,
  "weeks": [
    {{
      "weekNumber": number,
      "type": "build"|"deload"|"test",
      "days": [
        {{
          "name": string,
          "exercises": [
            {{ "name": string, "sets": string, "reps": string, "rpe": string, "rest": string, "notes": string }}
          ]
        }}
      ]
    }}
  ],
  "progression": string[],
  "deload": string[],
  "substitutions": {{ "exercise": string[] }},
  "safetyNotes": string[]
}}

Return ONLY pure JSON, no text or explanations."#,
        experience = experience.trim_matches('"'),
        goal = goal.trim_matches('"'),
        days = request.days_per_week,
        minutes = request.session_length_minutes,
    )
}

/// Prompt asking for a macro breakdown of a single food description.
pub fn nutrition_prompt(food: &str) -> String {
    format!(
        r#"You are a certified nutrition expert.

Analyze ONLY the following food: "{food}"

Return strictly JSON in this structure:
{{
  "targetCalories": number,
  "macros": {{
    "protein": number,
    "carbs": number,
    "fat": number
  }}
}}

Rules:
- All numbers must be realistic and based on typical nutritional data.
- Values represent the TOTAL for the food quantity described.
- Do NOT include any explanations or text - return pure JSON only."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Experience, Goal};

    #[test]
    fn test_disabled_without_api_key() {
        let gateway = AiGateway::new(AiConfig {
            enabled: true,
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-5-nano".to_string(),
            timeout: Duration::from_secs(30),
        })
        .unwrap();
        assert!(!gateway.is_enabled());
    }

    #[test]
    fn test_workout_prompt_carries_request_fields() {
        let prompt = workout_prompt(&PlanRequest {
            goal: Goal::Strength,
            experience: Experience::Advanced,
            days_per_week: 4,
            session_length_minutes: 45,
        });
        assert!(prompt.contains("advanced"));
        assert!(prompt.contains("strength"));
        assert!(prompt.contains("4 days per week"));
        assert!(prompt.contains("45 minutes"));
        assert!(prompt.contains("weekNumber"));
    }

    #[test]
    fn test_nutrition_prompt_quotes_the_food() {
        let prompt = nutrition_prompt("2 eggs and toast");
        assert!(prompt.contains("\"2 eggs and toast\""));
        assert!(prompt.contains("targetCalories"));
    }
}
