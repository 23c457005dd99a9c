//! OpenAiCoach implementation using the hosted completion endpoint.

use coach_core::{
    async_trait, prompt_fingerprint, ChatMessage, CoachError, CompletionBackend,
};
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::api_types::{ApiMessage, ChatCompletionRequest, ChatCompletionResponse};
use crate::config::OpenAiCoachConfig;

/// A completion backend that talks to an OpenAI-compatible chat API.
///
/// Stateless: the caller owns the transcript and passes it in on every call.
/// One request per call, no retries, no timeout.
pub struct OpenAiCoach {
    client: Client,
    config: OpenAiCoachConfig,
}

impl OpenAiCoach {
    /// Create a new OpenAiCoach with the given configuration.
    pub fn new(config: OpenAiCoachConfig) -> Result<Self, CoachError> {
        let client = Client::builder().build().map_err(|e| {
            CoachError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        info!(
            "OpenAiCoach initialized with model: {}, prompt fingerprint: {}, key configured: {}",
            config.model,
            prompt_fingerprint(&config.system_prompt),
            config.api_key.is_some()
        );

        Ok(Self { client, config })
    }

    /// Create an OpenAiCoach from environment variables.
    ///
    /// See [`OpenAiCoachConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, CoachError> {
        Self::new(OpenAiCoachConfig::from_env())
    }

    /// Get the configuration.
    pub fn config(&self) -> &OpenAiCoachConfig {
        &self.config
    }

    /// Build the messages array: preamble, prior transcript, new message.
    fn build_messages(&self, history: &[ChatMessage], new_message: &str) -> Vec<ApiMessage> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ApiMessage::new("system", self.config.system_prompt.clone()));
        messages.extend(
            history
                .iter()
                .map(|msg| ApiMessage::new(msg.role.as_str(), msg.text.clone())),
        );
        messages.push(ApiMessage::new("user", new_message));
        messages
    }
}

#[async_trait]
impl CompletionBackend for OpenAiCoach {
    async fn complete(
        &self,
        history: &[ChatMessage],
        new_message: &str,
    ) -> Result<String, CoachError> {
        self.check_configured()?;
        let api_key = self.config.api_key.as_deref().unwrap_or_default();

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: self.build_messages(history, new_message),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!(
            "Sending completion request: model={}, messages={}",
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CoachError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoachError::Network(format!("Failed to read response: {}", e)))?;

        extract_reply(status, &body)
    }

    fn name(&self) -> &str {
        "OpenAiCoach"
    }

    fn check_configured(&self) -> Result<(), CoachError> {
        match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(()),
            _ => Err(CoachError::Configuration(
                "Please set OPENAI_API_KEY in your .env file".to_string(),
            )),
        }
    }
}

/// Pull the assistant text out of a response body.
///
/// An `error` field wins over everything else, then the status code, then
/// the first choice's content.
fn extract_reply(status: StatusCode, body: &str) -> Result<String, CoachError> {
    let completion: ChatCompletionResponse = match serde_json::from_str(body) {
        Ok(completion) => completion,
        Err(e) if status.is_success() => {
            return Err(CoachError::MalformedResponse(format!(
                "Failed to parse response: {}",
                e
            )))
        }
        Err(_) => {
            return Err(CoachError::Api(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body
            )))
        }
    };

    if let Some(error) = completion.error {
        return Err(CoachError::Api(error.message));
    }

    if !status.is_success() {
        return Err(CoachError::Api(format!("HTTP {}", status.as_u16())));
    }

    if let Some(usage) = &completion.usage {
        debug!(
            "Token usage - prompt: {}, completion: {}, total: {}",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        );
    }

    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| CoachError::MalformedResponse("no choice content in response".to_string()))
}
