use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schemas::quiz::QuizType;

/// Opaque handle to an uploaded file. The engine checks presence and, when
/// the caller supplies a size, the configured size bound; content and MIME
/// validation stay with the upload service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRef {
    pub handle: String,
    #[serde(default)]
    pub size_bytes: Option<u64>,
}

impl UploadRef {
    pub fn new(handle: impl Into<String>) -> Self {
        Self { handle: handle.into(), size_bytes: None }
    }

    pub fn with_size(handle: impl Into<String>, size_bytes: u64) -> Self {
        Self { handle: handle.into(), size_bytes: Some(size_bytes) }
    }
}

/// Raw submission shape as sent by clients. Field aliases match the legacy
/// frontend payloads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnswer {
    #[serde(default)]
    pub answer_text: Option<String>,
    #[serde(default, alias = "selected_choice_indices")]
    pub selected_choices: Option<Vec<usize>>,
    #[serde(default, alias = "uploaded_file_ref")]
    pub uploaded_file: Option<UploadRef>,
}

impl RawAnswer {
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self { answer_text: Some(text.into()), ..Self::default() }
    }

    pub fn choices(selected: impl Into<Vec<usize>>) -> Self {
        Self { selected_choices: Some(selected.into()), ..Self::default() }
    }

    pub fn upload(upload: UploadRef) -> Self {
        Self { uploaded_file: Some(upload), ..Self::default() }
    }
}

/// Canonical, validated answer content; one variant per quiz type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "quiz_type", rename_all = "snake_case")]
pub enum AnswerPayload {
    MultipleChoice {
        /// Sorted, duplicate-free indices into the quiz's choices.
        selected_indices: Vec<usize>,
    },
    ShortAnswer {
        answer_text: String,
    },
    WordCloud {
        answer_text: String,
        words: Vec<String>,
        word_count: usize,
    },
    Drawing,
    ImageUpload,
}

impl AnswerPayload {
    pub fn quiz_type(&self) -> QuizType {
        match self {
            AnswerPayload::MultipleChoice { .. } => QuizType::MultipleChoice,
            AnswerPayload::ShortAnswer { .. } => QuizType::ShortAnswer,
            AnswerPayload::WordCloud { .. } => QuizType::WordCloud,
            AnswerPayload::Drawing => QuizType::Drawing,
            AnswerPayload::ImageUpload => QuizType::ImageUpload,
        }
    }
}

/// One student's accepted answer to one quiz. At most one record may exist
/// per (student, quiz) pair; the storage boundary enforces that atomically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub quiz_id: Uuid,
    pub student_id: Uuid,
    pub payload: AnswerPayload,
    #[serde(default)]
    pub uploaded_file: Option<UploadRef>,
    pub submitted_at: OffsetDateTime,
    #[serde(default)]
    pub is_late: bool,
}
