use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::azure_openai_client::{AzureClientError, AzureOpenAIClient};
use crate::application::ports::language_model::{
    CompletionRequest, CompletionResponse, LanguageModel, LanguageModelError, TokenUsage,
};

const CHAT_COMPLETIONS: &str = "chat/completions";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

impl<'a> ChatCompletionBody<'a> {
    fn from_request(request: &'a CompletionRequest) -> Self {
        Self {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system_prompt_or_default(),
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionPayload {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

impl From<AzureClientError> for LanguageModelError {
    fn from(error: AzureClientError) -> Self {
        match error {
            AzureClientError::Timeout => LanguageModelError::Timeout,
            AzureClientError::RateLimited => LanguageModelError::RateLimitExceeded,
            AzureClientError::Unavailable => LanguageModelError::ServiceUnavailable,
            AzureClientError::Network(msg) => LanguageModelError::NetworkError(msg),
            AzureClientError::InvalidEndpoint(msg) => LanguageModelError::InvalidInput(msg),
            other => LanguageModelError::ApiError(other.to_string()),
        }
    }
}

/// Chat deployment on Azure OpenAI.
pub struct AzureOpenAIChatProvider {
    client: AzureOpenAIClient,
}

impl AzureOpenAIChatProvider {
    pub fn new(client: AzureOpenAIClient) -> Self {
        Self { client }
    }

    fn into_response(
        &self,
        payload: ChatCompletionPayload,
    ) -> Result<CompletionResponse, LanguageModelError> {
        let choice = payload
            .choices
            .into_iter()
            .next()
            .ok_or(LanguageModelError::EmptyResponse)?;

        Ok(CompletionResponse {
            text: choice.message.content.unwrap_or_default(),
            model_name: payload
                .model
                .unwrap_or_else(|| self.client.deployment().to_string()),
            usage: payload.usage.map(|usage| TokenUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            }),
        })
    }
}

#[async_trait]
impl LanguageModel for AzureOpenAIChatProvider {
    async fn generate_text(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, LanguageModelError> {
        if request.prompt.trim().is_empty() {
            return Err(LanguageModelError::InvalidInput(
                "Prompt cannot be empty".to_string(),
            ));
        }

        let body = ChatCompletionBody::from_request(&request);
        let payload: ChatCompletionPayload = self.client.post(CHAT_COMPLETIONS, &body).await?;

        let response = self.into_response(payload)?;
        if let Some(usage) = &response.usage {
            tracing::debug!(
                "Chat completion used {} tokens ({} prompt, {} completion)",
                usage.total_tokens,
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        Ok(response)
    }

    fn model_info(&self) -> String {
        format!("azure-openai:{}", self.client.deployment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::external_services::azure_openai_client::AzureClientConfig;
    use serde_json::json;

    fn provider() -> AzureOpenAIChatProvider {
        let client = AzureOpenAIClient::new(AzureClientConfig::new(
            "https://example.openai.azure.com".to_string(),
            "key".to_string(),
            "2023-05-15".to_string(),
            "gpt-4o-mini".to_string(),
        ))
        .unwrap();
        AzureOpenAIChatProvider::new(client)
    }

    #[test]
    fn test_body_uses_default_system_prompt() {
        let request = CompletionRequest::new("Summarize").with_temperature(0.0);
        let body = serde_json::to_value(ChatCompletionBody::from_request(&request)).unwrap();

        assert_eq!(
            body,
            json!({
                "messages": [
                    {"role": "system", "content": "You are a helpful assistant."},
                    {"role": "user", "content": "Summarize"}
                ],
                "temperature": 0.0,
                "max_tokens": 1000
            })
        );
    }

    #[test]
    fn test_first_choice_is_returned() {
        let payload: ChatCompletionPayload = serde_json::from_value(json!({
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Patient, Condition"}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ],
            "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
        }))
        .unwrap();

        let response = provider().into_response(payload).unwrap();

        assert_eq!(response.text, "Patient, Condition");
        assert_eq!(response.model_name, "gpt-4o-mini-2024-07-18");
        assert_eq!(response.usage.unwrap().total_tokens, 16);
    }

    #[test]
    fn test_no_choices_is_empty_response() {
        let payload: ChatCompletionPayload =
            serde_json::from_value(json!({"choices": []})).unwrap();

        assert!(matches!(
            provider().into_response(payload),
            Err(LanguageModelError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn test_blank_prompt_is_rejected_before_sending() {
        let result = provider()
            .generate_text(CompletionRequest::new("   "))
            .await;

        assert!(matches!(result, Err(LanguageModelError::InvalidInput(_))));
    }

    #[test]
    fn test_client_errors_map_to_port_errors() {
        assert!(matches!(
            LanguageModelError::from(AzureClientError::Timeout),
            LanguageModelError::Timeout
        ));
        assert!(matches!(
            LanguageModelError::from(AzureClientError::RateLimited),
            LanguageModelError::RateLimitExceeded
        ));
        assert!(matches!(
            LanguageModelError::from(AzureClientError::Http {
                status: 400,
                body: "bad".to_string()
            }),
            LanguageModelError::ApiError(_)
        ));
    }
}
