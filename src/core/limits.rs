//! Validation limits and defaults shared across the engine.

// Question text (all quiz types)
pub const MAX_QUESTION_TEXT_LENGTH: usize = 2000;

// Multiple choice
pub const MIN_CHOICES: usize = 2;
pub const MAX_CHOICES: usize = 10;
pub const MAX_CHOICE_TEXT_LENGTH: usize = 500;

// Short answer
pub const MAX_CORRECT_ANSWER_LENGTH: usize = 500;
pub const MAX_KEYWORDS_LENGTH: usize = 1000;
/// Fraction of expected keywords that must appear in a short answer for it
/// to count as correct. Fixed by design, not configurable per quiz.
pub const KEYWORD_MATCH_THRESHOLD: f64 = 0.5;

// Word cloud
pub const MIN_WORDS_PER_STUDENT: u32 = 1;
pub const MAX_WORDS_PER_STUDENT: u32 = 10;
pub const DEFAULT_MIN_WORD_LENGTH: u32 = 1;
pub const DEFAULT_MAX_WORD_LENGTH: u32 = 50;

// Drawing canvas
pub const MIN_CANVAS_SIZE: u32 = 100;
pub const MAX_CANVAS_SIZE: u32 = 2000;

// Image upload
pub const ALLOWED_IMAGE_FORMATS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

// Auto-close window (global options)
pub const MIN_AUTO_CLOSE_SECONDS: u32 = 30;
pub const MAX_AUTO_CLOSE_SECONDS: u32 = 7200;

// Quiz title
pub const MAX_TITLE_LENGTH: usize = 255;
