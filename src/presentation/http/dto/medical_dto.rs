use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct MedicalNoteRequestDto {
    pub note_text: String,
}
