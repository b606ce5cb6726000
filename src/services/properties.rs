use thiserror::Error;
use validator::Validate;

use crate::core::limits;
use crate::schemas::quiz::{
    GlobalOptions, ImageUploadProperties, MultipleChoiceProperties, QuizDefinition,
    QuizProperties, ShortAnswerProperties, WordCloudProperties,
};

/// Malformed or out-of-bounds quiz configuration. Always caller-fixable;
/// the first offending rule short-circuits validation.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaViolation {
    #[error("{0}")]
    InvalidField(String),
    #[error("quiz title is required")]
    EmptyTitle,
    #[error("quiz title cannot exceed 255 characters (got {length})")]
    TitleTooLong { length: usize },
    #[error("question text is required")]
    EmptyQuestionText,
    #[error("question text cannot exceed 2000 characters (got {length})")]
    QuestionTextTooLong { length: usize },
    #[error("multiple choice quizzes need at least 2 choices (got {count})")]
    TooFewChoices { count: usize },
    #[error("multiple choice quizzes cannot have more than 10 choices (got {count})")]
    TooManyChoices { count: usize },
    #[error("choice {index} cannot be empty")]
    EmptyChoiceText { index: usize },
    #[error("choice {index} text cannot exceed 500 characters")]
    ChoiceTextTooLong { index: usize },
    #[error("at least one choice must be marked as correct")]
    NoCorrectChoice,
    #[error("min_choices {min} exceeds the effective selection cap {max}")]
    MinChoicesAboveMax { min: u32, max: u32 },
    #[error("short answer quizzes need a correct answer or expected keywords")]
    AnswerKeyMissing,
    #[error("correct answer cannot exceed 500 characters (got {length})")]
    CorrectAnswerTooLong { length: usize },
    #[error("expected keywords cannot exceed 1000 characters (got {length})")]
    KeywordsTooLong { length: usize },
    #[error("min_words_per_student {min} exceeds max_words_per_student {max}")]
    WordCountBoundsInverted { min: u32, max: u32 },
    #[error("word length bounds {min}..{max} are invalid")]
    WordLengthBoundsInvalid { min: u32, max: u32 },
    #[error("allowed_formats must list at least one file extension")]
    EmptyAllowedFormats,
    #[error("'{format}' is not an allowed image format")]
    UnsupportedImageFormat { format: String },
    #[error("auto_close_after_seconds must be between 30 and 7200 (got {seconds})")]
    AutoCloseOutOfRange { seconds: u32 },
}

/// Validate a full quiz definition: title, type-specific properties and
/// global option bounds. Run at creation and at every update, never lazily.
pub fn validate_definition(quiz: &QuizDefinition) -> Result<(), SchemaViolation> {
    let title = quiz.title.trim();
    if title.is_empty() {
        return Err(SchemaViolation::EmptyTitle);
    }
    let length = title.chars().count();
    if length > limits::MAX_TITLE_LENGTH {
        return Err(SchemaViolation::TitleTooLong { length });
    }
    validate_properties(&quiz.properties)?;
    validate_global_options(&quiz.global_options)
}

/// Per-type structural and content validation of quiz properties.
pub fn validate_properties(properties: &QuizProperties) -> Result<(), SchemaViolation> {
    validate_question_text(properties.question_text())?;
    match properties {
        QuizProperties::MultipleChoice(props) => validate_multiple_choice(props),
        QuizProperties::ShortAnswer(props) => validate_short_answer(props),
        QuizProperties::WordCloud(props) => validate_word_cloud(props),
        QuizProperties::Drawing(props) => check_fields(props),
        QuizProperties::ImageUpload(props) => validate_image_upload(props),
    }
}

/// Global options are orthogonal to quiz type; only sane bounds are checked.
pub fn validate_global_options(options: &GlobalOptions) -> Result<(), SchemaViolation> {
    if let Some(seconds) = options.auto_close_after_seconds {
        if !(limits::MIN_AUTO_CLOSE_SECONDS..=limits::MAX_AUTO_CLOSE_SECONDS).contains(&seconds) {
            return Err(SchemaViolation::AutoCloseOutOfRange { seconds });
        }
    }
    Ok(())
}

fn validate_question_text(text: &str) -> Result<(), SchemaViolation> {
    if text.trim().is_empty() {
        return Err(SchemaViolation::EmptyQuestionText);
    }
    let length = text.chars().count();
    if length > limits::MAX_QUESTION_TEXT_LENGTH {
        return Err(SchemaViolation::QuestionTextTooLong { length });
    }
    Ok(())
}

fn check_fields(props: &impl Validate) -> Result<(), SchemaViolation> {
    props.validate().map_err(|e| SchemaViolation::InvalidField(e.to_string()))
}

fn validate_multiple_choice(props: &MultipleChoiceProperties) -> Result<(), SchemaViolation> {
    check_fields(props)?;

    let count = props.choices.len();
    if count < limits::MIN_CHOICES {
        return Err(SchemaViolation::TooFewChoices { count });
    }
    if count > limits::MAX_CHOICES {
        return Err(SchemaViolation::TooManyChoices { count });
    }
    for (index, choice) in props.choices.iter().enumerate() {
        if choice.text.trim().is_empty() {
            return Err(SchemaViolation::EmptyChoiceText { index });
        }
        if choice.text.chars().count() > limits::MAX_CHOICE_TEXT_LENGTH {
            return Err(SchemaViolation::ChoiceTextTooLong { index });
        }
    }
    if !props.choices.iter().any(|choice| choice.is_correct) {
        return Err(SchemaViolation::NoCorrectChoice);
    }

    let max = props.effective_max_choices();
    if props.min_choices > max {
        return Err(SchemaViolation::MinChoicesAboveMax { min: props.min_choices, max });
    }
    Ok(())
}

fn validate_short_answer(props: &ShortAnswerProperties) -> Result<(), SchemaViolation> {
    check_fields(props)?;

    if let Some(answer) = props.correct_answer.as_deref() {
        let length = answer.chars().count();
        if length > limits::MAX_CORRECT_ANSWER_LENGTH {
            return Err(SchemaViolation::CorrectAnswerTooLong { length });
        }
    }
    if let Some(keywords) = props.expected_keywords.as_deref() {
        let length = keywords.chars().count();
        if length > limits::MAX_KEYWORDS_LENGTH {
            return Err(SchemaViolation::KeywordsTooLong { length });
        }
    }
    // Blank strings count as absent: a quiz with neither an answer key nor
    // keywords has nothing to grade against.
    if props.correct_answer().is_none() && props.keyword_list().is_empty() {
        return Err(SchemaViolation::AnswerKeyMissing);
    }
    Ok(())
}

fn validate_word_cloud(props: &WordCloudProperties) -> Result<(), SchemaViolation> {
    check_fields(props)?;

    let min_words = props.min_words();
    if min_words < limits::MIN_WORDS_PER_STUDENT || min_words > props.max_words_per_student {
        return Err(SchemaViolation::WordCountBoundsInverted {
            min: min_words,
            max: props.max_words_per_student,
        });
    }
    let (min_len, max_len) = props.word_length_bounds();
    if min_len < 1 || min_len > max_len {
        return Err(SchemaViolation::WordLengthBoundsInvalid { min: min_len, max: max_len });
    }
    Ok(())
}

fn validate_image_upload(props: &ImageUploadProperties) -> Result<(), SchemaViolation> {
    check_fields(props)?;

    let formats = props.formats();
    if formats.is_empty() {
        return Err(SchemaViolation::EmptyAllowedFormats);
    }
    for format in formats {
        if !limits::ALLOWED_IMAGE_FORMATS.contains(&format.as_str()) {
            return Err(SchemaViolation::UnsupportedImageFormat { format });
        }
    }
    Ok(())
}
