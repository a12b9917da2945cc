use anyhow::{Context, Result};
use serde::Serialize;

const DEFAULT_MODEL: &str = "gemini-1.5-pro";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Sampling parameters forwarded to Gemini on every exchange.
/// These are pass-through values; nothing in the service interprets them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub response_mime_type: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 64,
            max_output_tokens: 8192,
            response_mime_type: "text/plain".to_string(),
        }
    }
}

/// Application configuration loaded from environment variables once at startup.
#[derive(Clone)]
pub struct Config {
    /// Missing key is tolerated at startup; exchanges fail until it is set.
    pub google_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub generation: GenerationConfig,
    pub port: u16,
    pub rust_log: String,
}

// Hand-written so the API key never reaches the logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_base", &self.gemini_api_base)
            .field("generation", &self.generation)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = GenerationConfig::default();

        let google_api_key = lookup("GOOGLE_API_KEY")
            .or_else(|| lookup("google_api_key"))
            .filter(|key| !key.trim().is_empty());

        let generation = GenerationConfig {
            temperature: parse_or(&lookup, "GEMINI_TEMPERATURE", defaults.temperature)?,
            top_p: parse_or(&lookup, "GEMINI_TOP_P", defaults.top_p)?,
            top_k: parse_or(&lookup, "GEMINI_TOP_K", defaults.top_k)?,
            max_output_tokens: parse_or(
                &lookup,
                "GEMINI_MAX_OUTPUT_TOKENS",
                defaults.max_output_tokens,
            )?,
            response_mime_type: defaults.response_mime_type,
        };

        Ok(Config {
            google_api_key,
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_base: lookup("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            generation,
            port: parse_or(&lookup, "PORT", 8080u16)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
