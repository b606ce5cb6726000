use thiserror::Error;

use crate::core::limits;
use crate::schemas::answer::AnswerPayload;
use crate::schemas::grade::{GradeDetail, GradeResult};
use crate::schemas::quiz::{
    MultipleChoiceProperties, QuizDefinition, QuizProperties, QuizType, ShortAnswerProperties,
};

/// Programming errors when grading is requested for the wrong inputs; these
/// never reach students.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GradeError {
    #[error("{0} quizzes have no automatic grading")]
    UnsupportedQuizType(QuizType),
    #[error("answer payload is for {got} but the quiz is {expected}")]
    PayloadMismatch { expected: QuizType, got: QuizType },
}

/// Grade a normalized answer against its quiz. Only multiple choice and
/// short answer produce a score; the other types have no automatic grade.
pub fn grade(quiz: &QuizDefinition, payload: &AnswerPayload) -> Result<GradeResult, GradeError> {
    match (&quiz.properties, payload) {
        (
            QuizProperties::MultipleChoice(props),
            AnswerPayload::MultipleChoice { selected_indices },
        ) => Ok(grade_multiple_choice(props, selected_indices)),
        (QuizProperties::ShortAnswer(props), AnswerPayload::ShortAnswer { answer_text }) => {
            Ok(grade_short_answer(props, answer_text))
        }
        _ => match quiz.quiz_type() {
            expected @ (QuizType::MultipleChoice | QuizType::ShortAnswer) => {
                Err(GradeError::PayloadMismatch { expected, got: payload.quiz_type() })
            }
            other => Err(GradeError::UnsupportedQuizType(other)),
        },
    }
}

/// Highest score reachable on a gradable quiz. Used to turn raw points into
/// the `[0, 1]` fraction the score distribution consumes.
pub fn max_points(quiz: &QuizDefinition) -> Result<f64, GradeError> {
    match &quiz.properties {
        QuizProperties::MultipleChoice(props) => {
            if !props.allow_multiple_choices {
                return Ok(1.0);
            }
            let correct = props.correct_indices().len();
            Ok((props.points_per_correct as f64 * correct as f64).max(1.0))
        }
        QuizProperties::ShortAnswer(_) => Ok(1.0),
        _ => Err(GradeError::UnsupportedQuizType(quiz.quiz_type())),
    }
}

/// Score as a fraction of the quiz's maximum, clamped to `[0, 1]`.
pub fn score_fraction(quiz: &QuizDefinition, result: &GradeResult) -> Result<f64, GradeError> {
    let max = max_points(quiz)?;
    Ok((result.score / max).clamp(0.0, 1.0))
}

fn grade_multiple_choice(
    props: &MultipleChoiceProperties,
    selected_indices: &[usize],
) -> GradeResult {
    let expected_correct = props.correct_indices();
    let correct_selections: Vec<usize> =
        selected_indices.iter().copied().filter(|index| expected_correct.contains(index)).collect();
    let incorrect_selections: Vec<usize> =
        selected_indices.iter().copied().filter(|index| !expected_correct.contains(index)).collect();

    let (is_correct, score) = if !props.allow_multiple_choices {
        // Single select: exactly one selection and it must be correct.
        let is_correct =
            selected_indices.len() == 1 && expected_correct.contains(&selected_indices[0]);
        (is_correct, if is_correct { 1.0 } else { 0.0 })
    } else {
        // Partial credit with a floor at zero; only the penalty magnitude
        // matters, whatever sign the teacher configured.
        let raw = props.points_per_correct as i64 * correct_selections.len() as i64
            - (props.penalty_per_wrong as i64).abs() * incorrect_selections.len() as i64;
        let score = raw.max(0) as f64;
        (score > 0.0, score)
    };

    GradeResult {
        is_correct,
        score,
        detail: GradeDetail::Choice { correct_selections, incorrect_selections, expected_correct },
    }
}

fn grade_short_answer(props: &ShortAnswerProperties, answer_text: &str) -> GradeResult {
    let trimmed = answer_text.trim();
    if trimmed.is_empty() {
        return GradeResult { is_correct: false, score: 0.0, detail: GradeDetail::NoMatch };
    }

    let student_text =
        if props.case_sensitive { trimmed.to_string() } else { trimmed.to_lowercase() };

    if let Some(correct_answer) = props.correct_answer() {
        let expected = if props.case_sensitive {
            correct_answer.to_string()
        } else {
            correct_answer.to_lowercase()
        };
        if student_text == expected {
            return GradeResult { is_correct: true, score: 1.0, detail: GradeDetail::ExactMatch };
        }
    }

    let keywords = props.keyword_list();
    if !keywords.is_empty() {
        let matched: Vec<String> = keywords
            .iter()
            .filter(|keyword| student_text.contains(keyword.as_str()))
            .cloned()
            .collect();
        let coverage = matched.len() as f64 / keywords.len() as f64;
        return GradeResult {
            is_correct: coverage >= limits::KEYWORD_MATCH_THRESHOLD,
            score: coverage,
            detail: GradeDetail::Keywords { matched, coverage },
        };
    }

    GradeResult { is_correct: false, score: 0.0, detail: GradeDetail::NoMatch }
}
