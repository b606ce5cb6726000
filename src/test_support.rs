use crate::schemas::quiz::{
    Choice, DrawingProperties, ImageUploadProperties, MultipleChoiceProperties, QuizDefinition,
    QuizProperties, ShortAnswerProperties, WordCloudProperties,
};

pub(crate) fn choice(text: &str, is_correct: bool) -> Choice {
    Choice { text: text.to_string(), is_correct }
}

pub(crate) fn mc_props(choices: &[(&str, bool)]) -> MultipleChoiceProperties {
    MultipleChoiceProperties {
        question_text: "Which color is on the flag?".to_string(),
        choices: choices.iter().map(|(text, is_correct)| choice(text, *is_correct)).collect(),
        allow_multiple_choices: false,
        max_choices: 1,
        min_choices: 1,
        points_per_correct: 1,
        penalty_per_wrong: 0,
        competition_mode: false,
    }
}

pub(crate) fn sa_props(
    correct_answer: Option<&str>,
    expected_keywords: Option<&str>,
    case_sensitive: bool,
) -> ShortAnswerProperties {
    ShortAnswerProperties {
        question_text: "What is the capital of France?".to_string(),
        correct_answer: correct_answer.map(str::to_string),
        expected_keywords: expected_keywords.map(str::to_string),
        case_sensitive,
        max_length: 200,
    }
}

pub(crate) fn wc_props(max_words: u32, allow_duplicates: bool) -> WordCloudProperties {
    WordCloudProperties {
        question_text: "Name an animal".to_string(),
        max_words_per_student: max_words,
        min_words_per_student: None,
        allow_duplicates,
        normalize_case: true,
        min_word_length: None,
        max_word_length: None,
    }
}

/// Single-select multiple choice quiz.
pub(crate) fn mc_quiz(choices: &[(&str, bool)]) -> QuizDefinition {
    QuizDefinition::new("Colors", QuizProperties::MultipleChoice(mc_props(choices)))
}

/// Multi-select multiple choice quiz with the given selection cap.
pub(crate) fn multi_mc_quiz(choices: &[(&str, bool)], max_choices: u32) -> QuizDefinition {
    let mut props = mc_props(choices);
    props.allow_multiple_choices = true;
    props.max_choices = max_choices;
    QuizDefinition::new("Colors", QuizProperties::MultipleChoice(props))
}

pub(crate) fn sa_quiz(
    correct_answer: Option<&str>,
    expected_keywords: Option<&str>,
    case_sensitive: bool,
) -> QuizDefinition {
    QuizDefinition::new(
        "Capitals",
        QuizProperties::ShortAnswer(sa_props(correct_answer, expected_keywords, case_sensitive)),
    )
}

pub(crate) fn wc_quiz(max_words: u32, allow_duplicates: bool) -> QuizDefinition {
    QuizDefinition::new("Animals", QuizProperties::WordCloud(wc_props(max_words, allow_duplicates)))
}

pub(crate) fn drawing_quiz() -> QuizDefinition {
    QuizDefinition::new(
        "Sketch",
        QuizProperties::Drawing(DrawingProperties {
            question_text: "Draw the water cycle".to_string(),
            canvas_width: 800,
            canvas_height: 600,
        }),
    )
}

pub(crate) fn image_quiz(max_file_size_mb: u32) -> QuizDefinition {
    QuizDefinition::new(
        "Homework photo",
        QuizProperties::ImageUpload(ImageUploadProperties {
            question_text: "Upload a photo of your work".to_string(),
            max_file_size_mb,
            allowed_formats: "jpg,png,jpeg".to_string(),
        }),
    )
}
