use serde::Deserialize;

use crate::domain::entities::StructuredMedicalData;

#[derive(Debug, Deserialize)]
pub struct ToFhirRequestDto {
    pub structured_data: StructuredMedicalData,
}
