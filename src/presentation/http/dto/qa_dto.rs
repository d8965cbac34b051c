use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct QuestionRequestDto {
    pub question: String,
}
