use serde::{Deserialize, Serialize};

/// Per-branch grading evidence surfaced alongside the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GradeDetail {
    /// Multiple choice breakdown: what was hit, what was missed, and the
    /// full answer key for teacher review.
    Choice {
        correct_selections: Vec<usize>,
        incorrect_selections: Vec<usize>,
        expected_correct: Vec<usize>,
    },
    /// Short answer matched the answer key exactly.
    ExactMatch,
    /// Short answer matched some of the expected keywords.
    Keywords { matched: Vec<String>, coverage: f64 },
    /// Nothing matched.
    NoMatch,
}

/// Result of grading one answer against its quiz. Computed on demand and
/// never stored by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeResult {
    pub is_correct: bool,
    pub score: f64,
    pub detail: GradeDetail,
}
