pub mod chunk_metadata;

pub use chunk_metadata::ChunkMetadata;
