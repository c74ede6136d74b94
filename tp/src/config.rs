//! Trip planner configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level used when `--log-level` is not given
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Flight aggregator
    pub flights: FlightsConfig,

    /// Hotel aggregator
    pub hotels: HotelsConfig,

    /// Fixed search assumptions shared by the lookups
    pub search: SearchConfig,

    /// Chat loop limits
    pub chat: ChatConfig,
}

impl Config {
    /// Validate configuration before talking to the model
    ///
    /// Only the LLM credential is required up front. A missing aggregator key
    /// surfaces later, inside that tool's result.
    pub fn validate(&self) -> Result<()> {
        let llm = self.llm.resolve()?;
        if llm.get_api_key().is_none() {
            return Err(eyre::eyre!(
                "{} not found. Please set it in your environment or .env file.",
                llm.api_key_env
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .tripplanner.yml
        let local_config = PathBuf::from(".tripplanner.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/tripplanner/tripplanner.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("tripplanner").join("tripplanner.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Read a credential from the environment; empty values count as unset
fn read_key(env: &str) -> Option<String> {
    std::env::var(env).ok().filter(|v| !v.trim().is_empty())
}

/// LLM provider configuration
///
/// `model`, `api-key-env` and `base-url` default per provider when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name: gemini, openai or anthropic
    pub provider: String,

    /// Model identifier
    pub model: Option<String>,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: Option<String>,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds; unset keeps the HTTP client's default
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: None,
            api_key_env: None,
            base_url: None,
            max_tokens: 4096,
            timeout_ms: None,
        }
    }
}

impl LlmConfig {
    /// Fill in provider defaults
    pub fn resolve(&self) -> Result<ResolvedLlmConfig> {
        let (model, api_key_env, base_url) = match self.provider.as_str() {
            "gemini" => (
                "gemini-1.5-flash",
                "GEMINI_API_KEY",
                "https://generativelanguage.googleapis.com",
            ),
            "openai" => ("gpt-4o-mini", "OPENAI_API_KEY", "https://api.openai.com"),
            "anthropic" => ("claude-3-5-haiku-latest", "ANTHROPIC_API_KEY", "https://api.anthropic.com"),
            other => {
                return Err(eyre::eyre!(
                    "Unknown LLM provider: '{}'. Supported: gemini, openai, anthropic",
                    other
                ));
            }
        };

        Ok(ResolvedLlmConfig {
            provider: self.provider.clone(),
            model: self.model.clone().unwrap_or_else(|| model.to_string()),
            api_key_env: self.api_key_env.clone().unwrap_or_else(|| api_key_env.to_string()),
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| base_url.to_string())
                .trim_end_matches('/')
                .to_string(),
            max_tokens: self.max_tokens,
            timeout_ms: self.timeout_ms,
        })
    }
}

/// LLM settings with every provider default applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key_env: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub timeout_ms: Option<u64>,
}

impl ResolvedLlmConfig {
    /// The API key, if its environment variable is set
    pub fn get_api_key(&self) -> Option<String> {
        read_key(&self.api_key_env)
    }
}

/// Flight aggregator (Kiwi.com cheap flights on RapidAPI)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightsConfig {
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Value of the X-RapidAPI-Host header
    pub host: String,
}

impl Default for FlightsConfig {
    fn default() -> Self {
        Self {
            api_key_env: "FLIGHT_API_KEY".to_string(),
            base_url: "https://kiwi.com-cheap-flights.p.rapidapi.com".to_string(),
            host: "kiwi.com-cheap-flights.p.rapidapi.com".to_string(),
        }
    }
}

impl FlightsConfig {
    pub fn api_key(&self) -> Option<String> {
        read_key(&self.api_key_env)
    }
}

/// Hotel aggregator (Hotels.com provider on RapidAPI)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelsConfig {
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Value of the X-RapidAPI-Host header
    pub host: String,

    /// Market domain sent with every request
    pub domain: String,

    pub locale: String,
}

impl Default for HotelsConfig {
    fn default() -> Self {
        Self {
            api_key_env: "HOTEL_API_KEY".to_string(),
            base_url: "https://hotels-com-provider.p.rapidapi.com".to_string(),
            host: "hotels-com-provider.p.rapidapi.com".to_string(),
            domain: "IN".to_string(),
            locale: "en_GB".to_string(),
        }
    }
}

impl HotelsConfig {
    pub fn api_key(&self) -> Option<String> {
        read_key(&self.api_key_env)
    }
}

/// Search assumptions that are not taken from the user's request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Adult travellers for both flights and hotels
    pub adults: u32,

    /// ISO currency code sent to the flight aggregator
    pub currency: String,

    /// Symbol prefixed to flight prices
    #[serde(rename = "currency-symbol")]
    pub currency_symbol: String,

    /// Hotel check-in is this many days after today
    #[serde(rename = "checkin-offset-days")]
    pub checkin_offset_days: u32,

    /// Hotel result ordering
    #[serde(rename = "sort-order")]
    pub sort_order: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            adults: 2,
            currency: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            checkin_offset_days: 30,
            sort_order: "RECOMMENDED".to_string(),
        }
    }
}

/// Chat loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Model calls allowed per user message before giving up
    #[serde(rename = "max-turns")]
    pub max_turns: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { max_turns: 10 }
    }
}
