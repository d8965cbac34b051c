pub mod document_routes;
pub mod extraction_routes;
pub mod fhir_routes;
pub mod health_routes;
pub mod medical_routes;
pub mod qa_routes;

pub use document_routes::*;
pub use extraction_routes::*;
pub use fhir_routes::*;
pub use health_routes::*;
pub use medical_routes::*;
pub use qa_routes::*;
