pub mod document_dto;
pub mod extraction_dto;
pub mod fhir_dto;
pub mod medical_dto;
pub mod qa_dto;
pub mod response_dto;

pub use document_dto::*;
pub use extraction_dto::*;
pub use fhir_dto::*;
pub use medical_dto::*;
pub use qa_dto::*;
pub use response_dto::*;
