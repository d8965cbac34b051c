pub mod document_handler;
pub mod extraction_handler;
pub mod fhir_handler;
pub mod medical_handler;
pub mod qa_handler;

pub use document_handler::DocumentHandler;
pub use extraction_handler::ExtractionHandler;
pub use fhir_handler::FhirHandler;
pub use medical_handler::MedicalHandler;
pub use qa_handler::QaHandler;
