pub mod code_mapping;
pub mod document;
pub mod document_chunk;
pub mod fhir_resource;
pub(crate) mod lenient;
pub mod medical_record;

pub use code_mapping::{CodeCandidates, CodeMappings};
pub use document::{Document, NewDocument};
pub use document_chunk::{DocumentChunk, RetrievedChunk};
pub use fhir_resource::FhirResource;
pub use medical_record::StructuredMedicalData;
