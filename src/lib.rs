//! Quiz definition & grading engine for live in-class quizzes.
//!
//! The crate owns the polymorphic quiz-type model (multiple choice, short
//! answer, word cloud, drawing, image upload), the per-type property and
//! answer validation rules, the grading algorithms for the two gradable
//! types, and the statistics aggregation over submitted answers. Everything
//! around it (rostering, transport, storage of uploads) belongs to the
//! calling application: quizzes and answer records always arrive as
//! arguments, timestamps are caller-supplied, and nothing here performs I/O.

pub mod core;
pub mod repositories;
pub mod schemas;
pub mod services;

#[cfg(test)]
mod test_support;

pub use repositories::answers::{AnswerStore, InMemoryAnswerStore};
pub use schemas::answer::{AnswerPayload, AnswerRecord, RawAnswer, UploadRef};
pub use schemas::grade::{GradeDetail, GradeResult};
pub use schemas::quiz::{
    Choice, DrawingProperties, GlobalOptions, ImageUploadProperties, MultipleChoiceProperties,
    QuizDefinition, QuizProperties, QuizType, ShortAnswerProperties, SubmissionTiming,
    WordCloudProperties,
};
pub use schemas::stats::{
    ChoiceBreakdown, ChoiceTally, QuizBreakdown, ScoreSummary, ShortAnswerEntry, UploadEntry,
    WordCloudBreakdown, WordFrequency, SCORE_BAND_LABELS,
};
pub use services::answers::{
    accept_submission, advisory_violations, parse_raw_answer, validate_answer, Advisory,
    AnswerRejected, SubmissionError,
};
pub use services::grading::{grade, max_points, score_fraction, GradeError};
pub use services::properties::{
    validate_definition, validate_global_options, validate_properties, SchemaViolation,
};
pub use services::registry::{quiz_type_by_code, quiz_type_entry, QuizTypeEntry, QUIZ_TYPES};
pub use services::statistics::{aggregate, score_summary};
