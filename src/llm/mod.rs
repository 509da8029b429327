//! LLM gateway client
//!
//! Chat completions against an OpenRouter-compatible gateway. Model failures
//! are recovered through an explicit, ordered fallback chain configured in
//! `[llm] fallback_models` - each candidate is tried in order until one
//! succeeds.

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::info;
use tracing::warn;

use crate::Result;
use crate::TubePulseError;

pub mod prompts;

pub use prompts::PromptTemplate;

/// Sampling parameters for one completion
#[derive(Debug, Clone, Copy)]
pub struct CompletionParams {
    pub temperature: f32,
    pub max_tokens: usize,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1500,
        }
    }
}

/// A completed chat response and the model that served it
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: usize,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Chat-completion client with ordered model fallback
pub struct LlmService {
    client: Client,
    endpoint: String,
    api_key: String,
    referer: String,
    model: String,
    fallback_models: Vec<String>,
}

impl LlmService {
    pub fn new(config: &crate::AppConfig) -> Result<Self> {
        if config.llm_api_key().is_empty() {
            return Err(TubePulseError::Config(
                "LLM gateway API key is missing".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.llm_endpoint().trim_end_matches('/').to_string(),
            api_key: config.llm_api_key().to_string(),
            referer: config.llm.referer.clone(),
            model: config.llm_model().to_string(),
            fallback_models: config.llm_fallback_models().to_vec(),
        })
    }

    /// Complete against the primary model, falling back through the
    /// configured chain until one model answers
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: CompletionParams,
    ) -> Result<Completion> {
        let mut last_error = None;

        for model in std::iter::once(self.model.as_str())
            .chain(self.fallback_models.iter().map(String::as_str))
        {
            match self
                .complete_with_model(model, system_prompt, user_prompt, params)
                .await
            {
                Ok(completion) => {
                    info!("✅ Completion served by model {}", model);
                    return Ok(completion);
                }
                Err(err) => {
                    warn!("⚠️ Model {} failed: {}, trying next option", model, err);
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            TubePulseError::Llm("no models configured for completion".to_string())
        }))
    }

    /// Complete against one specific model, no fallback
    pub async fn complete_with_model(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
        params: CompletionParams,
    ) -> Result<Completion> {
        let url = format!("{}/chat/completions", self.endpoint);
        let request = ChatCompletionRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", "TubePulse")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TubePulseError::Llm(format!(
                "model {model} failed: HTTP {status} - {body}"
            )));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                TubePulseError::Llm(format!("model {model} returned no choices"))
            })?;

        Ok(Completion {
            text,
            model: model.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_deserialization() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"positive"}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].message.content, "positive");
    }

    #[test]
    fn test_empty_choices() {
        let json = r#"{"choices":[]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert!(response.choices.is_empty());
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let config = crate::AppConfig::default();
        assert!(matches!(
            LlmService::new(&config),
            Err(TubePulseError::Config(_))
        ));
    }
}
