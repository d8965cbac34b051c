use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ExtractionRequestDto {
    pub text: String,
}
