use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_SUMMARY_MODEL: &str = "gpt-4o-mini";
const DEFAULT_SUMMARY_TEMPERATURE: f32 = 0.3;
const DEFAULT_SUMMARY_MAX_TOKENS: u32 = 400;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API credential was supplied on the command line or in the environment.
    #[error("OpenAI API key is required: set OPENAI_API_KEY (or .env) or pass --api-key")]
    MissingCredential,
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the summarizer.
///
/// Built once at startup and handed to the summarization client; nothing else reads the
/// environment after this point.
#[derive(Clone)]
pub struct Config {
    /// Credential sent as a bearer token to the chat-completions endpoint.
    pub openai_api_key: String,
    /// Base URL of the OpenAI-compatible API.
    pub openai_base_url: String,
    /// Chat model used for every summarization request.
    pub summary_model: String,
    /// Sampling temperature passed to the model.
    pub summary_temperature: f32,
    /// Upper bound on generated tokens per request.
    pub summary_max_tokens: u32,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A non-blank `api_key_override` (the `--api-key` flag) wins over `OPENAI_API_KEY`.
    pub fn from_env(api_key_override: Option<String>) -> Result<Self, ConfigError> {
        Self::from_lookup(api_key_override, |key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(api_key_override: Option<String>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let load_optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let openai_api_key = api_key_override
            .filter(|value| !value.trim().is_empty())
            .or_else(|| load_optional("OPENAI_API_KEY"))
            .map(|value| value.trim().to_string())
            .ok_or(ConfigError::MissingCredential)?;

        Ok(Self {
            openai_api_key,
            openai_base_url: load_optional("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            summary_model: load_optional("SUMMARY_MODEL")
                .unwrap_or_else(|| DEFAULT_SUMMARY_MODEL.to_string()),
            summary_temperature: load_optional("SUMMARY_TEMPERATURE")
                .map(|value| {
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SUMMARY_TEMPERATURE".into()))
                })
                .transpose()?
                .unwrap_or(DEFAULT_SUMMARY_TEMPERATURE),
            summary_max_tokens: load_optional("SUMMARY_MAX_TOKENS")
                .map(|value| {
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SUMMARY_MAX_TOKENS".into()))
                })
                .transpose()?
                .unwrap_or(DEFAULT_SUMMARY_MAX_TOKENS),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &"<redacted>")
            .field("openai_base_url", &self.openai_base_url)
            .field("summary_model", &self.summary_model)
            .field("summary_temperature", &self.summary_temperature)
            .field("summary_max_tokens", &self.summary_max_tokens)
            .finish()
    }
}

/// Load `.env` from the working directory, letting it override inherited variables.
///
/// A missing `.env` file is not an error.
pub fn load_dotenv() -> Result<(), dotenvy::Error> {
    match dotenvy::dotenv_override() {
        Ok(_) => Ok(()),
        Err(error) if error.not_found() => Ok(()),
        Err(error) => Err(error),
    }
}
