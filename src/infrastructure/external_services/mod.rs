pub mod azure_chat_provider;
pub mod azure_embedding_provider;
pub mod azure_openai_client;

pub use azure_chat_provider::AzureOpenAIChatProvider;
pub use azure_embedding_provider::AzureOpenAIEmbeddingProvider;
pub use azure_openai_client::{AzureClientConfig, AzureOpenAIClient};
