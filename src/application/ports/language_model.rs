use async_trait::async_trait;

#[derive(Debug)]
pub enum LanguageModelError {
    NetworkError(String),
    ApiError(String),
    InvalidInput(String),
    RateLimitExceeded,
    ServiceUnavailable,
    Timeout,
    EmptyResponse,
}

impl std::fmt::Display for LanguageModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LanguageModelError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            LanguageModelError::ApiError(msg) => write!(f, "API error: {}", msg),
            LanguageModelError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            LanguageModelError::RateLimitExceeded => write!(f, "Rate limit exceeded"),
            LanguageModelError::ServiceUnavailable => write!(f, "Service unavailable"),
            LanguageModelError::Timeout => write!(f, "Request timed out"),
            LanguageModelError::EmptyResponse => write!(f, "Model returned no choices"),
        }
    }
}

impl std::error::Error for LanguageModelError {}

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub system_prompt: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            temperature: 0.7,
            max_tokens: 1000,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn system_prompt_or_default(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub text: String,
    pub model_name: String,
    pub usage: Option<TokenUsage>,
}

/// Chat-completion capability. One prompt in, one text out.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate_text(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, LanguageModelError>;

    fn model_info(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = CompletionRequest::new("Summarise this");

        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.max_tokens, 1000);
        assert_eq!(request.system_prompt_or_default(), DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_request_builder() {
        let request = CompletionRequest::new("q")
            .with_system_prompt("You are a FHIR expert.")
            .with_temperature(0.0)
            .with_max_tokens(100);

        assert_eq!(request.system_prompt_or_default(), "You are a FHIR expert.");
        assert_eq!(request.temperature, 0.0);
        assert_eq!(request.max_tokens, 100);
    }
}
