pub mod embedding_provider;
pub mod language_model;

pub use embedding_provider::EmbeddingProvider;
pub use language_model::LanguageModel;
