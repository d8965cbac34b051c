use std::collections::HashMap;
use std::ffi::OsString;

use crate::infrastructure::external_services::AzureClientConfig;

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "Missing required environment variable {}", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "Invalid value for {}: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_APP_NAME: &str = "Medical RAG Service";
const DEFAULT_API_VERSION: &str = "2023-05-15";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-large";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_RETRIES: u32 = 0;

#[derive(Debug, Clone)]
pub struct Settings {
    pub app_name: String,
    pub port: u16,
    pub database_url: String,
    /// Shared secret for mutating document routes. Empty means every such
    /// request is rejected.
    pub api_key: String,
    pub chat: AzureClientConfig,
    pub embeddings: AzureClientConfig,
}

impl Settings {
    /// Reads `.env` (when present) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_vars(utf8_vars(std::env::vars_os()))
    }

    fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            vars.get(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;
        let timeout_secs = parse_or(get("LLM_TIMEOUT_SECS"), "LLM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let max_retries = parse_or(get("LLM_MAX_RETRIES"), "LLM_MAX_RETRIES", DEFAULT_MAX_RETRIES)?;

        let api_version =
            get("AZURE_OPENAI_API_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
        let chat_key = require("AZURE_OPENAI_API_KEY")?;
        let chat_endpoint = require("AZURE_OPENAI_ENDPOINT")?;

        let chat_deployment = get("AZURE_OPENAI_DEPLOYMENT")
            .or_else(|| get("AZURE_OPENAI_MODEL"))
            .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string());
        let embedding_deployment = get("AZURE_OPENAI_EMBEDDING_DEPLOYMENT")
            .or_else(|| get("AZURE_OPENAI_EMBEDDING_MODEL"))
            .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string());

        let mut chat = AzureClientConfig::new(
            chat_endpoint.clone(),
            chat_key.clone(),
            api_version.clone(),
            chat_deployment,
        );
        chat.timeout_secs = timeout_secs;
        chat.max_retries = max_retries;

        let mut embeddings = AzureClientConfig::new(
            get("AZURE_OPENAI_EMBEDDING_ENDPOINT").unwrap_or(chat_endpoint),
            get("AZURE_OPENAI_EMBEDDINGS_API_KEY").unwrap_or(chat_key),
            api_version,
            embedding_deployment,
        );
        embeddings.timeout_secs = timeout_secs;
        embeddings.max_retries = max_retries;

        Ok(Self {
            app_name: get("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            port,
            database_url: require("DATABASE_URL")?,
            api_key: get("API_KEY").unwrap_or_default(),
            chat,
            embeddings,
        })
    }
}

/// Entries whose key or value is not valid UTF-8 are skipped.
fn utf8_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> HashMap<String, String> {
    vars.into_iter()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
