use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schemas::answer::UploadRef;

/// Tally for a single multiple-choice option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceTally {
    pub choice_index: usize,
    pub text: String,
    pub count: usize,
    /// Percentage of submissions that picked this choice, rounded.
    pub percentage: u32,
    /// Students who picked this choice, in submission order.
    pub students: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceBreakdown {
    pub total_submissions: usize,
    pub choices: Vec<ChoiceTally>,
}

/// One short-answer response for manual teacher review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortAnswerEntry {
    pub student_id: Uuid,
    pub answer_text: String,
    pub submitted_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCloudBreakdown {
    pub total_submissions: usize,
    pub total_words: usize,
    /// Ordered by count descending, then first appearance.
    pub words: Vec<WordFrequency>,
}

/// One uploaded drawing/image, in submission order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadEntry {
    pub student_id: Uuid,
    pub upload: UploadRef,
    pub submitted_at: OffsetDateTime,
}

/// Per-type aggregation over a quiz's answer records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "quiz_type", rename_all = "snake_case")]
pub enum QuizBreakdown {
    MultipleChoice(ChoiceBreakdown),
    ShortAnswer { answers: Vec<ShortAnswerEntry> },
    WordCloud(WordCloudBreakdown),
    Drawing { uploads: Vec<UploadEntry> },
    ImageUpload { uploads: Vec<UploadEntry> },
}

/// Labels for the five fixed score bands, lowest first.
pub const SCORE_BAND_LABELS: [&str; 5] = ["0-20%", "21-40%", "41-60%", "61-80%", "81-100%"];

/// Distribution summary over graded score fractions in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub graded_count: usize,
    pub average_score: f64,
    /// graded / total enrolled; zero when nobody is enrolled.
    pub completion_rate: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
    /// Counts per band, aligned with [`SCORE_BAND_LABELS`].
    pub distribution: [usize; 5],
}

impl ScoreSummary {
    pub fn empty() -> Self {
        Self {
            graded_count: 0,
            average_score: 0.0,
            completion_rate: 0.0,
            highest_score: 0.0,
            lowest_score: 0.0,
            distribution: [0; 5],
        }
    }
}
