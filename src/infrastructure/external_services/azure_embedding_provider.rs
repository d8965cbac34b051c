use async_trait::async_trait;
use pgvector::Vector;
use serde::{Deserialize, Serialize};

use super::azure_openai_client::{AzureClientError, AzureOpenAIClient};
use crate::application::ports::embedding_provider::{EmbeddingProvider, EmbeddingProviderError};

const EMBEDDINGS: &str = "embeddings";

#[derive(Debug, Serialize)]
struct EmbeddingBody<'a> {
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingPayload {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

impl From<AzureClientError> for EmbeddingProviderError {
    fn from(error: AzureClientError) -> Self {
        match error {
            AzureClientError::Timeout => EmbeddingProviderError::Timeout,
            AzureClientError::RateLimited => EmbeddingProviderError::RateLimitExceeded,
            AzureClientError::Unavailable => EmbeddingProviderError::ServiceUnavailable,
            AzureClientError::Network(msg) => EmbeddingProviderError::NetworkError(msg),
            AzureClientError::InvalidEndpoint(msg) => EmbeddingProviderError::InvalidInput(msg),
            other => EmbeddingProviderError::ApiError(other.to_string()),
        }
    }
}

/// Embedding deployment on Azure OpenAI.
pub struct AzureOpenAIEmbeddingProvider {
    client: AzureOpenAIClient,
}

impl AzureOpenAIEmbeddingProvider {
    pub fn new(client: AzureOpenAIClient) -> Self {
        Self { client }
    }

    /// Vectors come back tagged with their input index, not necessarily in
    /// input order.
    fn into_vectors(
        mut payload: EmbeddingPayload,
        expected: usize,
    ) -> Result<Vec<Vector>, EmbeddingProviderError> {
        if payload.data.len() != expected {
            return Err(EmbeddingProviderError::ApiError(format!(
                "Expected {} embeddings, received {}",
                expected,
                payload.data.len()
            )));
        }

        payload.data.sort_by_key(|item| item.index);

        Ok(payload
            .data
            .into_iter()
            .map(|item| Vector::from(item.embedding))
            .collect())
    }
}

#[async_trait]
impl EmbeddingProvider for AzureOpenAIEmbeddingProvider {
    async fn embed_query(&self, text: &str) -> Result<Vector, EmbeddingProviderError> {
        self.embed_texts(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingProviderError::ApiError("No embedding returned".to_string()))
    }

    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vector>, EmbeddingProviderError> {
        if texts.is_empty() {
            return Err(EmbeddingProviderError::InvalidInput(
                "No texts to embed".to_string(),
            ));
        }

        let payload: EmbeddingPayload = self
            .client
            .post(EMBEDDINGS, &EmbeddingBody { input: texts })
            .await?;

        Self::into_vectors(payload, texts.len())
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

    fn provider() -> AzureOpenAIEmbeddingProvider {
        let client = AzureOpenAIClient::new(AzureClientConfig::new(
            "https://example.openai.azure.com".to_string(),
            "key".to_string(),
            "2023-05-15".to_string(),
            "text-embedding-3-large".to_string(),
        ))
        .unwrap();
        AzureOpenAIEmbeddingProvider::new(client)
    }

    #[test]
    fn test_vectors_follow_input_order() {
        let payload: EmbeddingPayload = serde_json::from_value(json!({
            "data": [
                {"object": "embedding", "index": 1, "embedding": [0.0, 1.0]},
                {"object": "embedding", "index": 0, "embedding": [1.0, 0.0]}
            ],
            "usage": {"prompt_tokens": 6, "total_tokens": 6}
        }))
        .unwrap();

        let vectors = AzureOpenAIEmbeddingProvider::into_vectors(payload, 2).unwrap();

        assert_eq!(vectors[0].as_slice(), &[1.0, 0.0]);
        assert_eq!(vectors[1].as_slice(), &[0.0, 1.0]);
    }

    #[test]
    fn test_count_mismatch_is_an_error() {
        let payload: EmbeddingPayload = serde_json::from_value(json!({
            "data": [{"index": 0, "embedding": [1.0]}]
        }))
        .unwrap();

        assert!(matches!(
            AzureOpenAIEmbeddingProvider::into_vectors(payload, 2),
            Err(EmbeddingProviderError::ApiError(_))
        ));
    }

    #[test]
    fn test_body_shape() {
        let texts = vec!["first".to_string(), "second".to_string()];
        let body = serde_json::to_value(EmbeddingBody { input: &texts }).unwrap();

        assert_eq!(body, json!({"input": ["first", "second"]}));
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected() {
        let result = provider().embed_texts(&[]).await;

        assert!(matches!(result, Err(EmbeddingProviderError::InvalidInput(_))));
    }
}
