use std::collections::HashSet;

use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::repositories::answers::AnswerStore;
use crate::schemas::answer::{AnswerPayload, AnswerRecord, RawAnswer};
use crate::schemas::quiz::{
    ImageUploadProperties, MultipleChoiceProperties, QuizDefinition, QuizProperties,
    SubmissionTiming, WordCloudProperties,
};

/// Malformed or out-of-policy student answer. Surfaced to the student as a
/// rejected submission; never retried automatically.
#[derive(Debug, Error, PartialEq)]
pub enum AnswerRejected {
    #[error("malformed answer payload: {0}")]
    Malformed(String),
    #[error("at least one choice must be selected")]
    NoSelection,
    #[error("choice index {index} is out of range for {choice_count} choices")]
    ChoiceOutOfRange { index: usize, choice_count: usize },
    #[error("choice index {index} was selected more than once")]
    DuplicateSelection { index: usize },
    #[error("no more than {max} choice(s) may be selected (got {selected})")]
    TooManySelections { selected: usize, max: u32 },
    #[error("at least {min} choice(s) must be selected (got {selected})")]
    TooFewSelections { selected: usize, min: u32 },
    #[error("answer text is required")]
    EmptyAnswerText,
    #[error("at least {min} word(s) are required (got {count})")]
    TooFewWords { count: usize, min: u32 },
    #[error("no more than {max} word(s) may be submitted (got {count})")]
    TooManyWords { count: usize, max: u32 },
    #[error("word '{word}' is shorter than {min} characters")]
    WordTooShort { word: String, min: u32 },
    #[error("word '{word}' is longer than {max} characters")]
    WordTooLong { word: String, max: u32 },
    #[error("duplicate word '{word}' is not allowed for this quiz")]
    DuplicateWord { word: String },
    #[error("an uploaded file is required for this quiz")]
    MissingUpload,
    #[error("uploaded file exceeds the {max_mb} MB limit")]
    UploadTooLarge { size_bytes: u64, max_mb: u32 },
    #[error("submissions for this quiz are closed")]
    QuizClosed,
}

#[derive(Debug, Error, PartialEq)]
pub enum SubmissionError {
    #[error(transparent)]
    Rejected(#[from] AnswerRejected),
    /// Distinct from a rejection so callers can show a different message.
    #[error("student has already answered this quiz")]
    AlreadyAnswered,
}

/// Soft, opt-in violations that never fail a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    AnswerTooLong { length: usize, max_length: u32 },
}

/// Parse the wire shape of a submission, mapping parse failures into the
/// rejection taxonomy.
pub fn parse_raw_answer(value: serde_json::Value) -> Result<RawAnswer, AnswerRejected> {
    RawAnswer::from_value(value).map_err(|err| AnswerRejected::Malformed(err.to_string()))
}

/// Validate a raw submission against the owning quiz and produce the
/// canonical payload. Pure; duplicate and timing policy live in
/// [`accept_submission`].
pub fn validate_answer(
    quiz: &QuizDefinition,
    raw: &RawAnswer,
) -> Result<AnswerPayload, AnswerRejected> {
    match &quiz.properties {
        QuizProperties::MultipleChoice(props) => validate_multiple_choice(props, raw),
        QuizProperties::ShortAnswer(_) => {
            let answer_text = require_text(raw)?;
            Ok(AnswerPayload::ShortAnswer { answer_text })
        }
        QuizProperties::WordCloud(props) => validate_word_cloud(props, raw),
        QuizProperties::Drawing(_) => {
            require_upload(raw, None)?;
            Ok(AnswerPayload::Drawing)
        }
        QuizProperties::ImageUpload(props) => {
            require_upload(raw, Some(props))?;
            Ok(AnswerPayload::ImageUpload)
        }
    }
}

/// Full submission acceptance: duplicate precondition, late/closed policy,
/// then validation and normalization into an [`AnswerRecord`]. Timestamps
/// are caller-supplied; the engine never reads the clock.
pub fn accept_submission(
    quiz: &QuizDefinition,
    store: &dyn AnswerStore,
    student_id: Uuid,
    submitted_at: OffsetDateTime,
    started_at: Option<OffsetDateTime>,
    raw: &RawAnswer,
) -> Result<AnswerRecord, SubmissionError> {
    if store.has_answered(quiz.id, student_id) {
        tracing::debug!(quiz_id = %quiz.id, student_id = %student_id, "duplicate submission rejected");
        return Err(SubmissionError::AlreadyAnswered);
    }

    let is_late = match started_at {
        Some(started_at) => {
            match quiz.global_options.submission_timing(started_at, submitted_at) {
                SubmissionTiming::OnTime => false,
                SubmissionTiming::Late => true,
                SubmissionTiming::Closed => return Err(AnswerRejected::QuizClosed.into()),
            }
        }
        None => false,
    };

    let payload = validate_answer(quiz, raw)?;
    tracing::debug!(
        quiz_id = %quiz.id,
        student_id = %student_id,
        quiz_type = %quiz.quiz_type(),
        is_late,
        "submission accepted"
    );

    Ok(AnswerRecord {
        quiz_id: quiz.id,
        student_id,
        payload,
        uploaded_file: raw.uploaded_file.clone(),
        submitted_at,
        is_late,
    })
}

/// Soft checks the caller may surface without rejecting the submission.
/// Currently only the advisory short-answer length bound.
pub fn advisory_violations(quiz: &QuizDefinition, payload: &AnswerPayload) -> Vec<Advisory> {
    let mut advisories = Vec::new();
    if let (QuizProperties::ShortAnswer(props), AnswerPayload::ShortAnswer { answer_text }) =
        (&quiz.properties, payload)
    {
        let length = answer_text.chars().count();
        if length > props.max_length as usize {
            advisories.push(Advisory::AnswerTooLong { length, max_length: props.max_length });
        }
    }
    advisories
}

fn validate_multiple_choice(
    props: &MultipleChoiceProperties,
    raw: &RawAnswer,
) -> Result<AnswerPayload, AnswerRejected> {
    let selected = raw.selected_choices.clone().unwrap_or_default();
    if selected.is_empty() {
        return Err(AnswerRejected::NoSelection);
    }

    let choice_count = props.choices.len();
    let mut seen = HashSet::new();
    for &index in &selected {
        if index >= choice_count {
            return Err(AnswerRejected::ChoiceOutOfRange { index, choice_count });
        }
        if !seen.insert(index) {
            return Err(AnswerRejected::DuplicateSelection { index });
        }
    }

    let max = props.effective_max_choices();
    if selected.len() > max as usize {
        return Err(AnswerRejected::TooManySelections { selected: selected.len(), max });
    }
    if selected.len() < props.min_choices as usize {
        return Err(AnswerRejected::TooFewSelections {
            selected: selected.len(),
            min: props.min_choices,
        });
    }

    let mut selected_indices = selected;
    selected_indices.sort_unstable();
    Ok(AnswerPayload::MultipleChoice { selected_indices })
}

fn validate_word_cloud(
    props: &WordCloudProperties,
    raw: &RawAnswer,
) -> Result<AnswerPayload, AnswerRejected> {
    let answer_text = require_text(raw)?;
    let words: Vec<String> = answer_text
        .split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect();

    let (min_len, max_len) = props.word_length_bounds();
    for word in &words {
        let length = word.chars().count() as u32;
        if length < min_len {
            return Err(AnswerRejected::WordTooShort { word: word.clone(), min: min_len });
        }
        if length > max_len {
            return Err(AnswerRejected::WordTooLong { word: word.clone(), max: max_len });
        }
    }

    let count = words.len();
    let min_words = props.min_words();
    if count < min_words as usize {
        return Err(AnswerRejected::TooFewWords { count, min: min_words });
    }
    if count > props.max_words_per_student as usize {
        return Err(AnswerRejected::TooManyWords { count, max: props.max_words_per_student });
    }

    if !props.allow_duplicates {
        let mut seen = HashSet::new();
        for word in &words {
            if !seen.insert(props.fold_word(word)) {
                return Err(AnswerRejected::DuplicateWord { word: word.clone() });
            }
        }
    }

    let word_count = words.len();
    Ok(AnswerPayload::WordCloud { answer_text, words, word_count })
}

fn require_text(raw: &RawAnswer) -> Result<String, AnswerRejected> {
    let text = raw.answer_text.as_deref().unwrap_or("").trim();
    if text.is_empty() {
        return Err(AnswerRejected::EmptyAnswerText);
    }
    Ok(text.to_string())
}

fn require_upload(
    raw: &RawAnswer,
    props: Option<&ImageUploadProperties>,
) -> Result<(), AnswerRejected> {
    let upload = raw.uploaded_file.as_ref().ok_or(AnswerRejected::MissingUpload)?;
    if let (Some(props), Some(size_bytes)) = (props, upload.size_bytes) {
        if size_bytes > props.max_file_size_bytes() {
            return Err(AnswerRejected::UploadTooLarge {
                size_bytes,
                max_mb: props.max_file_size_mb,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::answer::UploadRef;
    use crate::test_support::{
        drawing_quiz, image_quiz, mc_quiz, multi_mc_quiz, sa_quiz, wc_quiz,
    };

    #[test]
    fn choice_selection_must_be_present_and_in_range() {
        let quiz = mc_quiz(&[("Red", true), ("Blue", false)]);

        assert_eq!(
            validate_answer(&quiz, &RawAnswer::default()),
            Err(AnswerRejected::NoSelection)
        );
        assert_eq!(
            validate_answer(&quiz, &RawAnswer::choices(vec![2])),
            Err(AnswerRejected::ChoiceOutOfRange { index: 2, choice_count: 2 })
        );
    }

    #[test]
    fn duplicate_selection_is_rejected() {
        let quiz = multi_mc_quiz(&[("a", true), ("b", true), ("c", false)], 3);
        assert_eq!(
            validate_answer(&quiz, &RawAnswer::choices(vec![1, 1])),
            Err(AnswerRejected::DuplicateSelection { index: 1 })
        );
    }

    #[test]
    fn single_select_caps_selection_at_one_regardless_of_max_choices() {
        let mut quiz = mc_quiz(&[("Red", true), ("Blue", false)]);
        match &mut quiz.properties {
            QuizProperties::MultipleChoice(props) => props.max_choices = 5,
            _ => unreachable!(),
        }
        assert_eq!(
            validate_answer(&quiz, &RawAnswer::choices(vec![0, 1])),
            Err(AnswerRejected::TooManySelections { selected: 2, max: 1 })
        );
    }

    #[test]
    fn multi_select_normalizes_to_sorted_indices() {
        let quiz = multi_mc_quiz(&[("a", true), ("b", true), ("c", false)], 3);
        let payload = validate_answer(&quiz, &RawAnswer::choices(vec![2, 0])).expect("valid");
        assert_eq!(payload, AnswerPayload::MultipleChoice { selected_indices: vec![0, 2] });
    }

    #[test]
    fn short_answer_requires_non_blank_text() {
        let quiz = sa_quiz(Some("Paris"), None, false);
        assert_eq!(
            validate_answer(&quiz, &RawAnswer::text("   ")),
            Err(AnswerRejected::EmptyAnswerText)
        );

        let payload = validate_answer(&quiz, &RawAnswer::text("  Paris  ")).expect("valid");
        assert_eq!(payload, AnswerPayload::ShortAnswer { answer_text: "Paris".to_string() });
    }

    #[test]
    fn short_answer_max_length_is_advisory_only() {
        let quiz = sa_quiz(Some("Paris"), None, false);
        let long = "x".repeat(300);
        let payload = validate_answer(&quiz, &RawAnswer::text(long.as_str())).expect("accepted");
        assert_eq!(
            advisory_violations(&quiz, &payload),
            vec![Advisory::AnswerTooLong { length: 300, max_length: 200 }]
        );
    }

    #[test]
    fn word_cloud_splits_trims_and_counts() {
        let quiz = wc_quiz(3, true);
        let payload =
            validate_answer(&quiz, &RawAnswer::text("cat , dog,, cat ")).expect("accepted");
        assert_eq!(
            payload,
            AnswerPayload::WordCloud {
                answer_text: "cat , dog,, cat".to_string(),
                words: vec!["cat".to_string(), "dog".to_string(), "cat".to_string()],
                word_count: 3,
            }
        );
    }

    #[test]
    fn word_cloud_rejects_duplicates_when_configured() {
        let quiz = wc_quiz(3, false);
        assert_eq!(
            validate_answer(&quiz, &RawAnswer::text("cat, dog, cat")),
            Err(AnswerRejected::DuplicateWord { word: "cat".to_string() })
        );
        // Dedup folds case by default.
        assert_eq!(
            validate_answer(&quiz, &RawAnswer::text("Cat, cat")),
            Err(AnswerRejected::DuplicateWord { word: "cat".to_string() })
        );
    }

    #[test]
    fn word_cloud_case_sensitive_dedup_when_normalize_case_off() {
        let mut quiz = wc_quiz(3, false);
        match &mut quiz.properties {
            QuizProperties::WordCloud(props) => props.normalize_case = false,
            _ => unreachable!(),
        }
        let payload = validate_answer(&quiz, &RawAnswer::text("Cat, cat")).expect("accepted");
        assert_eq!(
            payload,
            AnswerPayload::WordCloud {
                answer_text: "Cat, cat".to_string(),
                words: vec!["Cat".to_string(), "cat".to_string()],
                word_count: 2,
            }
        );
    }

    #[test]
    fn word_cloud_enforces_word_count_bounds() {
        let quiz = wc_quiz(2, true);
        assert_eq!(
            validate_answer(&quiz, &RawAnswer::text("a, b, c")),
            Err(AnswerRejected::TooManyWords { count: 3, max: 2 })
        );

        let mut quiz = wc_quiz(5, true);
        match &mut quiz.properties {
            QuizProperties::WordCloud(props) => props.min_words_per_student = Some(2),
            _ => unreachable!(),
        }
        assert_eq!(
            validate_answer(&quiz, &RawAnswer::text("solo")),
            Err(AnswerRejected::TooFewWords { count: 1, min: 2 })
        );
    }

    #[test]
    fn word_cloud_enforces_word_length_bounds() {
        let mut quiz = wc_quiz(5, true);
        match &mut quiz.properties {
            QuizProperties::WordCloud(props) => {
                props.min_word_length = Some(2);
                props.max_word_length = Some(5);
            }
            _ => unreachable!(),
        }
        assert_eq!(
            validate_answer(&quiz, &RawAnswer::text("a, bee")),
            Err(AnswerRejected::WordTooShort { word: "a".to_string(), min: 2 })
        );
        assert_eq!(
            validate_answer(&quiz, &RawAnswer::text("bee, monstrous")),
            Err(AnswerRejected::WordTooLong { word: "monstrous".to_string(), max: 5 })
        );
    }

    #[test]
    fn drawing_requires_an_upload_reference() {
        let quiz = drawing_quiz();
        assert_eq!(
            validate_answer(&quiz, &RawAnswer::default()),
            Err(AnswerRejected::MissingUpload)
        );

        let raw = RawAnswer::upload(UploadRef::new("uploads/sketch.png"));
        assert_eq!(validate_answer(&quiz, &raw), Ok(AnswerPayload::Drawing));
    }

    #[test]
    fn image_upload_checks_size_bound_when_known() {
        let quiz = image_quiz(5);

        let raw = RawAnswer::upload(UploadRef::with_size("uploads/photo.jpg", 6 * 1024 * 1024));
        assert_eq!(
            validate_answer(&quiz, &raw),
            Err(AnswerRejected::UploadTooLarge { size_bytes: 6 * 1024 * 1024, max_mb: 5 })
        );

        // Unknown size is delegated to the upload service.
        let raw = RawAnswer::upload(UploadRef::new("uploads/photo.jpg"));
        assert_eq!(validate_answer(&quiz, &raw), Ok(AnswerPayload::ImageUpload));
    }

    #[test]
    fn raw_answer_parses_legacy_field_names() {
        let raw = parse_raw_answer(serde_json::json!({
            "selected_choice_indices": [0, 2]
        }))
        .expect("parsed");
        assert_eq!(raw.selected_choices, Some(vec![0, 2]));
    }

    #[test]
    fn malformed_wire_payload_is_rejected() {
        let result = parse_raw_answer(serde_json::json!({"selected_choices": "zero"}));
        assert!(matches!(result, Err(AnswerRejected::Malformed(_))));
    }
}
