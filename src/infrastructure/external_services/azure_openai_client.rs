use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct AzureClientConfig {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    pub deployment: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_factor: f64,
}

impl AzureClientConfig {
    pub fn new(endpoint: String, api_key: String, api_version: String, deployment: String) -> Self {
        Self {
            endpoint,
            api_key,
            api_version,
            deployment,
            timeout_secs: 60,
            max_retries: 0,
            backoff_factor: 1.5,
        }
    }
}

#[derive(Debug)]
pub enum AzureClientError {
    InvalidEndpoint(String),
    Network(String),
    Timeout,
    RateLimited,
    Unavailable,
    Http { status: u16, body: String },
    Parse(String),
}

impl AzureClientError {
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            AzureClientError::Network(_)
                | AzureClientError::Timeout
                | AzureClientError::RateLimited
                | AzureClientError::Unavailable
        )
    }

    fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::TOO_MANY_REQUESTS => AzureClientError::RateLimited,
            StatusCode::SERVICE_UNAVAILABLE => AzureClientError::Unavailable,
            _ => AzureClientError::Http {
                status: status.as_u16(),
                body,
            },
        }
    }

    fn from_reqwest(error: ReqwestError) -> Self {
        if error.is_timeout() {
            AzureClientError::Timeout
        } else {
            AzureClientError::Network(error.without_url().to_string())
        }
    }
}

impl std::fmt::Display for AzureClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AzureClientError::InvalidEndpoint(msg) => write!(f, "Invalid endpoint: {}", msg),
            AzureClientError::Network(msg) => write!(f, "Network error: {}", msg),
            AzureClientError::Timeout => write!(f, "Request timed out"),
            AzureClientError::RateLimited => write!(f, "Rate limit exceeded"),
            AzureClientError::Unavailable => write!(f, "Service unavailable"),
            AzureClientError::Http { status, body } => write!(f, "HTTP {}: {}", status, body),
            AzureClientError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for AzureClientError {}

/// Thin HTTP client for one Azure OpenAI deployment.
#[derive(Debug, Clone)]
pub struct AzureOpenAIClient {
    client: Client,
    config: AzureClientConfig,
}

impl AzureOpenAIClient {
    pub fn new(config: AzureClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn deployment(&self) -> &str {
        &self.config.deployment
    }

    /// `{endpoint}/openai/deployments/{deployment}/{operation}?api-version=...`
    pub fn operation_url(&self, operation: &str) -> Result<Url, AzureClientError> {
        let mut endpoint = self.config.endpoint.trim().to_string();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }

        let base =
            Url::parse(&endpoint).map_err(|e| AzureClientError::InvalidEndpoint(e.to_string()))?;
        let mut url = base
            .join(&format!(
                "openai/deployments/{}/{}",
                self.config.deployment, operation
            ))
            .map_err(|e| AzureClientError::InvalidEndpoint(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("api-version", &self.config.api_version);

        Ok(url)
    }

    /// POSTs `body` to the deployment operation. Transient failures are
    /// retried up to `max_retries` times with exponential backoff.
    pub async fn post<B, R>(&self, operation: &str, body: &B) -> Result<R, AzureClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.operation_url(operation)?;
        let mut attempts = 0;

        loop {
            attempts += 1;

            match self.execute_request(url.clone(), body).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempts <= self.config.max_retries => {
                    let backoff_time = Duration::from_millis(
                        (self.config.backoff_factor.powi(attempts as i32 - 1) * 1000.0) as u64,
                    );
                    tracing::warn!(
                        "Azure OpenAI {} attempt {} failed: {}; retrying in {:?}",
                        operation,
                        attempts,
                        e,
                        backoff_time
                    );
                    tokio::time::sleep(backoff_time).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn execute_request<B, R>(&self, url: Url, body: &B) -> Result<R, AzureClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .header("api-key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(AzureClientError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AzureClientError::from_status(status, body));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| AzureClientError::Parse(e.to_string()))
    }
}
