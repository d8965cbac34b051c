pub mod extraction_service;
pub mod fhir_service;
pub mod model_output;
pub mod question_answering;
pub mod summarization_service;
pub mod text_splitter;
pub mod vector_store;

pub use extraction_service::ExtractionService;
pub use fhir_service::FhirService;
pub use question_answering::QuestionAnsweringService;
pub use summarization_service::SummarizationService;
pub use text_splitter::RecursiveCharacterSplitter;
pub use vector_store::VectorStoreService;
