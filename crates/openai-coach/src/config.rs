//! Configuration for OpenAiCoach.

use coach_core::DEFAULT_SYSTEM_PROMPT;
use std::env;
use std::path::Path;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://api.openai.com";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for OpenAiCoach.
#[derive(Debug, Clone)]
pub struct OpenAiCoachConfig {
    /// API base URL (without the `/v1/...` path).
    pub api_url: String,

    /// API key for authentication. `None` means chat is not configured.
    pub api_key: Option<String>,

    /// Model name to use.
    pub model: String,

    /// System preamble sent ahead of every transcript.
    pub system_prompt: String,

    /// Maximum tokens for response. Omitted from the request when unset.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0). Omitted when unset.
    pub temperature: Option<f32>,
}

impl Default for OpenAiCoachConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: None,
            temperature: None,
        }
    }
}

impl OpenAiCoachConfig {
    /// Create configuration from environment variables.
    ///
    /// A missing key is not an error here: the coach reports it as a
    /// configuration error when the user first tries to chat.
    ///
    /// Environment variables:
    /// - `OPENAI_API_KEY` - API key for authentication
    /// - `OPENAI_API_URL` - API URL (default: https://api.openai.com)
    /// - `OPENAI_MODEL` - Model name (default: gpt-4o-mini)
    /// - `OPENAI_SYSTEM_PROMPT` - System preamble (overrides prompt file)
    /// - `OPENAI_PROMPT_FILE` - Path to a system preamble file
    /// - `OPENAI_MAX_TOKENS` - Max tokens (default: unset)
    /// - `OPENAI_TEMPERATURE` - Temperature (default: unset)
    pub fn from_env() -> Self {
        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let api_url = env::var("OPENAI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let system_prompt = env::var("OPENAI_SYSTEM_PROMPT")
            .ok()
            .or_else(|| env::var("OPENAI_PROMPT_FILE").ok().and_then(load_prompt_file))
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

        let max_tokens = env::var("OPENAI_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok());

        let temperature = env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok());

        Self {
            api_url,
            api_key,
            model,
            system_prompt,
            max_tokens,
            temperature,
        }
    }

    /// Create a new config builder.
    pub fn builder() -> OpenAiCoachConfigBuilder {
        OpenAiCoachConfigBuilder::default()
    }

    /// Full URL of the chat-completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.api_url.trim_end_matches('/'))
    }
}

/// Builder for OpenAiCoachConfig.
#[derive(Debug, Default)]
pub struct OpenAiCoachConfigBuilder {
    config: OpenAiCoachConfig,
}

impl OpenAiCoachConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system preamble.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> OpenAiCoachConfig {
        self.config
    }
}

/// Load a prompt file, returning None if not found or empty.
fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OpenAiCoachConfig::default();

        assert_eq!(config.api_url, "https://api.openai.com");
        assert!(config.api_key.is_none());
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert!(config.max_tokens.is_none());
        assert!(config.temperature.is_none());
    }

    #[test]
    fn test_builder_all_options() {
        let config = OpenAiCoachConfig::builder()
            .api_key("sk-test")
            .api_url("http://localhost:9999/")
            .model("gpt-4o")
            .system_prompt("You are terse.")
            .max_tokens(256)
            .temperature(0.3)
            .build();

        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.system_prompt, "You are terse.");
        assert_eq!(config.max_tokens, Some(256));
        assert_eq!(config.temperature, Some(0.3));
        assert_eq!(
            config.completions_url(),
            "http://localhost:9999/v1/chat/completions"
        );
    }

    // Env vars are process-global, so every scenario lives in one test.
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_openai_vars() {
            for var in [
                "OPENAI_API_KEY",
                "OPENAI_API_URL",
                "OPENAI_MODEL",
                "OPENAI_SYSTEM_PROMPT",
                "OPENAI_PROMPT_FILE",
                "OPENAI_MAX_TOKENS",
                "OPENAI_TEMPERATURE",
            ] {
                std::env::remove_var(var);
            }
        }

        // Nothing set: defaults, no key
        clear_all_openai_vars();
        let config = OpenAiCoachConfig::from_env();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);

        // Blank key counts as missing
        clear_all_openai_vars();
        std::env::set_var("OPENAI_API_KEY", "   ");
        assert!(OpenAiCoachConfig::from_env().api_key.is_none());

        // Everything set
        clear_all_openai_vars();
        std::env::set_var("OPENAI_API_KEY", "sk-env");
        std::env::set_var("OPENAI_API_URL", "https://proxy.example.com");
        std::env::set_var("OPENAI_MODEL", "gpt-4o");
        std::env::set_var("OPENAI_SYSTEM_PROMPT", "Coach me");
        std::env::set_var("OPENAI_MAX_TOKENS", "512");
        std::env::set_var("OPENAI_TEMPERATURE", "0.9");

        let config = OpenAiCoachConfig::from_env();
        assert_eq!(config.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.api_url, "https://proxy.example.com");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.system_prompt, "Coach me");
        assert_eq!(config.max_tokens, Some(512));
        assert_eq!(config.temperature, Some(0.9));

        // Unparseable numbers fall back to unset
        clear_all_openai_vars();
        std::env::set_var("OPENAI_MAX_TOKENS", "lots");
        assert!(OpenAiCoachConfig::from_env().max_tokens.is_none());

        clear_all_openai_vars();
    }
}
