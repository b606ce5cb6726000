use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;
use validator::Validate;

use crate::core::limits;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizType {
    MultipleChoice,
    ShortAnswer,
    WordCloud,
    Drawing,
    ImageUpload,
}

impl QuizType {
    pub fn code(self) -> &'static str {
        match self {
            QuizType::MultipleChoice => "multiple_choice",
            QuizType::ShortAnswer => "short_answer",
            QuizType::WordCloud => "word_cloud",
            QuizType::Drawing => "drawing",
            QuizType::ImageUpload => "image_upload",
        }
    }
}

impl std::fmt::Display for QuizType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MultipleChoiceProperties {
    pub question_text: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub allow_multiple_choices: bool,
    /// Cap on simultaneous selections. Only effective when
    /// `allow_multiple_choices` is set; single-select quizzes always cap at 1.
    #[serde(default = "default_one")]
    #[validate(range(min = 1, message = "max_choices must be at least 1"))]
    pub max_choices: u32,
    #[serde(default = "default_one")]
    #[validate(range(min = 1, message = "min_choices must be at least 1"))]
    pub min_choices: u32,
    #[serde(default = "default_points_per_correct")]
    #[validate(range(min = 1, message = "points_per_correct must be positive"))]
    pub points_per_correct: i32,
    /// Usually zero or negative; the grader only uses its magnitude.
    #[serde(default)]
    pub penalty_per_wrong: i32,
    #[serde(default)]
    pub competition_mode: bool,
}

impl MultipleChoiceProperties {
    pub fn correct_indices(&self) -> Vec<usize> {
        self.choices
            .iter()
            .enumerate()
            .filter(|(_, choice)| choice.is_correct)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn effective_max_choices(&self) -> u32 {
        if self.allow_multiple_choices {
            self.max_choices
        } else {
            1
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ShortAnswerProperties {
    pub question_text: String,
    #[serde(default)]
    pub correct_answer: Option<String>,
    /// Comma-separated rubric keywords.
    #[serde(default)]
    pub expected_keywords: Option<String>,
    #[serde(default)]
    pub case_sensitive: bool,
    /// Advisory length bound; never a hard submission failure.
    #[serde(default = "default_max_length")]
    #[validate(range(min = 1, message = "max_length must be at least 1"))]
    pub max_length: u32,
}

impl ShortAnswerProperties {
    /// The exact-match answer key, with blank strings treated as absent.
    pub fn correct_answer(&self) -> Option<&str> {
        self.correct_answer.as_deref().map(str::trim).filter(|text| !text.is_empty())
    }

    /// Parsed keyword list; lower-cased unless the quiz is case sensitive.
    pub fn keyword_list(&self) -> Vec<String> {
        let raw = self.expected_keywords.as_deref().unwrap_or("");
        raw.split(',')
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(|keyword| {
                if self.case_sensitive {
                    keyword.to_string()
                } else {
                    keyword.to_lowercase()
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WordCloudProperties {
    pub question_text: String,
    #[serde(default = "default_max_words")]
    #[validate(range(min = 1, max = 10, message = "max_words_per_student must be between 1 and 10"))]
    pub max_words_per_student: u32,
    #[serde(default)]
    pub min_words_per_student: Option<u32>,
    #[serde(default)]
    pub allow_duplicates: bool,
    /// Fold case before duplicate detection and frequency counting.
    #[serde(default = "default_true")]
    pub normalize_case: bool,
    #[serde(default)]
    pub min_word_length: Option<u32>,
    #[serde(default)]
    pub max_word_length: Option<u32>,
}

impl WordCloudProperties {
    pub fn min_words(&self) -> u32 {
        self.min_words_per_student.unwrap_or(limits::MIN_WORDS_PER_STUDENT)
    }

    pub fn word_length_bounds(&self) -> (u32, u32) {
        (
            self.min_word_length.unwrap_or(limits::DEFAULT_MIN_WORD_LENGTH),
            self.max_word_length.unwrap_or(limits::DEFAULT_MAX_WORD_LENGTH),
        )
    }

    pub fn fold_word(&self, word: &str) -> String {
        if self.normalize_case {
            word.to_lowercase()
        } else {
            word.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DrawingProperties {
    pub question_text: String,
    #[serde(default = "default_canvas_width")]
    #[validate(range(min = 100, max = 2000, message = "canvas_width must be between 100 and 2000"))]
    pub canvas_width: u32,
    #[serde(default = "default_canvas_height")]
    #[validate(range(min = 100, max = 2000, message = "canvas_height must be between 100 and 2000"))]
    pub canvas_height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ImageUploadProperties {
    pub question_text: String,
    #[serde(default = "default_max_file_size_mb")]
    #[validate(range(min = 1, message = "max_file_size_mb must be positive"))]
    pub max_file_size_mb: u32,
    /// Comma-separated file extensions, e.g. "jpg,png,jpeg".
    #[serde(default = "default_allowed_formats")]
    pub allowed_formats: String,
}

impl ImageUploadProperties {
    pub fn formats(&self) -> Vec<String> {
        self.allowed_formats
            .split(',')
            .map(str::trim)
            .filter(|format| !format.is_empty())
            .map(str::to_lowercase)
            .collect()
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb as u64 * 1024 * 1024
    }
}

/// Type-specific configuration; the tag doubles as the quiz type on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "quiz_type", rename_all = "snake_case")]
pub enum QuizProperties {
    MultipleChoice(MultipleChoiceProperties),
    ShortAnswer(ShortAnswerProperties),
    WordCloud(WordCloudProperties),
    Drawing(DrawingProperties),
    ImageUpload(ImageUploadProperties),
}

impl QuizProperties {
    pub fn quiz_type(&self) -> QuizType {
        match self {
            QuizProperties::MultipleChoice(_) => QuizType::MultipleChoice,
            QuizProperties::ShortAnswer(_) => QuizType::ShortAnswer,
            QuizProperties::WordCloud(_) => QuizType::WordCloud,
            QuizProperties::Drawing(_) => QuizType::Drawing,
            QuizProperties::ImageUpload(_) => QuizType::ImageUpload,
        }
    }

    pub fn question_text(&self) -> &str {
        match self {
            QuizProperties::MultipleChoice(props) => &props.question_text,
            QuizProperties::ShortAnswer(props) => &props.question_text,
            QuizProperties::WordCloud(props) => &props.question_text,
            QuizProperties::Drawing(props) => &props.question_text,
            QuizProperties::ImageUpload(props) => &props.question_text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionTiming {
    OnTime,
    Late,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalOptions {
    #[serde(default = "default_true")]
    pub show_timer: bool,
    #[serde(default)]
    pub allow_late_submissions: bool,
    /// If set, submissions close N seconds after the quiz is started.
    #[serde(default)]
    pub auto_close_after_seconds: Option<u32>,
    #[serde(default = "default_true")]
    pub show_results_to_students: bool,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            show_timer: true,
            allow_late_submissions: false,
            auto_close_after_seconds: None,
            show_results_to_students: true,
        }
    }
}

impl GlobalOptions {
    /// Classify a submission against the auto-close deadline. Without an
    /// auto-close window every submission is on time.
    pub fn submission_timing(
        &self,
        started_at: OffsetDateTime,
        submitted_at: OffsetDateTime,
    ) -> SubmissionTiming {
        let Some(seconds) = self.auto_close_after_seconds else {
            return SubmissionTiming::OnTime;
        };
        let deadline = started_at + Duration::seconds(seconds as i64);
        if submitted_at <= deadline {
            SubmissionTiming::OnTime
        } else if self.allow_late_submissions {
            SubmissionTiming::Late
        } else {
            SubmissionTiming::Closed
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizDefinition {
    pub id: Uuid,
    pub title: String,
    #[serde(flatten)]
    pub properties: QuizProperties,
    #[serde(default)]
    pub global_options: GlobalOptions,
}

impl QuizDefinition {
    pub fn new(title: impl Into<String>, properties: QuizProperties) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            properties,
            global_options: GlobalOptions::default(),
        }
    }

    pub fn quiz_type(&self) -> QuizType {
        self.properties.quiz_type()
    }
}

fn default_one() -> u32 {
    1
}

fn default_points_per_correct() -> i32 {
    1
}

fn default_max_length() -> u32 {
    200
}

fn default_max_words() -> u32 {
    3
}

fn default_true() -> bool {
    true
}

fn default_canvas_width() -> u32 {
    800
}

fn default_canvas_height() -> u32 {
    600
}

fn default_max_file_size_mb() -> u32 {
    5
}

fn default_allowed_formats() -> String {
    "jpg,png,jpeg".to_string()
}
