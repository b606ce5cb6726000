use crate::schemas::quiz::QuizType;

/// Static descriptor for one quiz type. Replaces the migration-seeded quiz
/// type table of the legacy system with a compile-time constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizTypeEntry {
    pub quiz_type: QuizType,
    pub code: &'static str,
    pub display_name: &'static str,
    /// Whether the grading engine produces a score for this type.
    pub gradable: bool,
    /// Whether answers carry an uploaded-file reference instead of content.
    pub requires_upload: bool,
}

pub const QUIZ_TYPES: [QuizTypeEntry; 5] = [
    QuizTypeEntry {
        quiz_type: QuizType::MultipleChoice,
        code: "multiple_choice",
        display_name: "Multiple Choice",
        gradable: true,
        requires_upload: false,
    },
    QuizTypeEntry {
        quiz_type: QuizType::ShortAnswer,
        code: "short_answer",
        display_name: "Short Answer",
        gradable: true,
        requires_upload: false,
    },
    QuizTypeEntry {
        quiz_type: QuizType::WordCloud,
        code: "word_cloud",
        display_name: "Word Cloud",
        gradable: false,
        requires_upload: false,
    },
    QuizTypeEntry {
        quiz_type: QuizType::Drawing,
        code: "drawing",
        display_name: "Drawing",
        gradable: false,
        requires_upload: true,
    },
    QuizTypeEntry {
        quiz_type: QuizType::ImageUpload,
        code: "image_upload",
        display_name: "Image Upload",
        gradable: false,
        requires_upload: true,
    },
];

pub fn quiz_type_entry(quiz_type: QuizType) -> &'static QuizTypeEntry {
    QUIZ_TYPES
        .iter()
        .find(|entry| entry.quiz_type == quiz_type)
        .unwrap_or_else(|| unreachable!("every quiz type has a registry entry"))
}

pub fn quiz_type_by_code(code: &str) -> Option<&'static QuizTypeEntry> {
    QUIZ_TYPES.iter().find(|entry| entry.code == code)
}
