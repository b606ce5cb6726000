use crate::schemas::answer::{AnswerPayload, AnswerRecord};
use crate::schemas::quiz::{Choice, QuizDefinition, QuizProperties, WordCloudProperties};
use crate::schemas::stats::{
    ChoiceBreakdown, ChoiceTally, QuizBreakdown, ScoreSummary, ShortAnswerEntry, UploadEntry,
    WordCloudBreakdown, WordFrequency,
};

/// Aggregate a quiz's answer records into its per-type summary. Pure
/// function of the inputs; records are never mutated. Ordering follows the
/// caller-supplied `submitted_at` timestamps, ties broken by input order.
pub fn aggregate(quiz: &QuizDefinition, records: &[AnswerRecord]) -> QuizBreakdown {
    match &quiz.properties {
        QuizProperties::MultipleChoice(props) => {
            QuizBreakdown::MultipleChoice(aggregate_choices(&props.choices, records))
        }
        QuizProperties::ShortAnswer(_) => {
            QuizBreakdown::ShortAnswer { answers: aggregate_short_answers(records) }
        }
        QuizProperties::WordCloud(props) => {
            QuizBreakdown::WordCloud(aggregate_words(props, records))
        }
        QuizProperties::Drawing(_) => QuizBreakdown::Drawing { uploads: aggregate_uploads(records) },
        QuizProperties::ImageUpload(_) => {
            QuizBreakdown::ImageUpload { uploads: aggregate_uploads(records) }
        }
    }
}

/// Distribution summary over graded score fractions in `[0, 1]`. Empty
/// input yields all zeros rather than an error.
pub fn score_summary(score_fractions: &[f64], total_enrolled: u64) -> ScoreSummary {
    if score_fractions.is_empty() {
        return ScoreSummary::empty();
    }

    let graded_count = score_fractions.len();
    let sum: f64 = score_fractions.iter().sum();
    let average_score = round2(sum / graded_count as f64);
    let highest_score = score_fractions.iter().copied().fold(f64::MIN, f64::max);
    let lowest_score = score_fractions.iter().copied().fold(f64::MAX, f64::min);

    let mut distribution = [0usize; 5];
    for &score in score_fractions {
        distribution[band_index(score)] += 1;
    }

    let completion_rate = if total_enrolled == 0 {
        0.0
    } else {
        graded_count as f64 / total_enrolled as f64
    };

    ScoreSummary {
        graded_count,
        average_score,
        completion_rate,
        highest_score,
        lowest_score,
        distribution,
    }
}

fn band_index(score: f64) -> usize {
    // Bands [0,0.2],(0.2,0.4],(0.4,0.6],(0.6,0.8],(0.8,1.0]; out-of-range
    // fractions land in the nearest band.
    if score <= 0.2 {
        0
    } else if score <= 0.4 {
        1
    } else if score <= 0.6 {
        2
    } else if score <= 0.8 {
        3
    } else {
        4
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn by_submission_order(records: &[AnswerRecord]) -> Vec<&AnswerRecord> {
    let mut ordered: Vec<&AnswerRecord> = records.iter().collect();
    // Stable sort keeps input order for equal timestamps.
    ordered.sort_by_key(|record| record.submitted_at);
    ordered
}

fn aggregate_choices(choices: &[Choice], records: &[AnswerRecord]) -> ChoiceBreakdown {
    let ordered = by_submission_order(records);
    let selections: Vec<(&AnswerRecord, &Vec<usize>)> = ordered
        .iter()
        .filter_map(|record| match &record.payload {
            AnswerPayload::MultipleChoice { selected_indices } => Some((*record, selected_indices)),
            _ => None,
        })
        .collect();

    let total_submissions = selections.len();
    let tallies = choices
        .iter()
        .enumerate()
        .map(|(choice_index, choice)| {
            let students: Vec<_> = selections
                .iter()
                .filter(|(_, selected)| selected.contains(&choice_index))
                .map(|(record, _)| record.student_id)
                .collect();
            let count = students.len();
            let percentage = if total_submissions == 0 {
                0
            } else {
                (100.0 * count as f64 / total_submissions as f64).round() as u32
            };
            ChoiceTally { choice_index, text: choice.text.clone(), count, percentage, students }
        })
        .collect();

    ChoiceBreakdown { total_submissions, choices: tallies }
}

fn aggregate_short_answers(records: &[AnswerRecord]) -> Vec<ShortAnswerEntry> {
    let mut entries: Vec<ShortAnswerEntry> = records
        .iter()
        .filter_map(|record| match &record.payload {
            AnswerPayload::ShortAnswer { answer_text } => Some(ShortAnswerEntry {
                student_id: record.student_id,
                answer_text: answer_text.clone(),
                submitted_at: record.submitted_at,
            }),
            _ => None,
        })
        .collect();
    // Most recent first for teacher review; stable, so ties keep input order.
    entries.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    entries
}

fn aggregate_words(props: &WordCloudProperties, records: &[AnswerRecord]) -> WordCloudBreakdown {
    let ordered = by_submission_order(records);

    let mut total_submissions = 0usize;
    let mut total_words = 0usize;
    // Keyed by folded form, displaying the first spelling seen; linear scan
    // keeps first-appearance order for the final tie-break.
    let mut frequencies: Vec<(String, WordFrequency)> = Vec::new();

    for record in ordered {
        let AnswerPayload::WordCloud { words, .. } = &record.payload else {
            continue;
        };
        total_submissions += 1;
        for word in words {
            total_words += 1;
            let key = props.fold_word(word);
            match frequencies.iter_mut().find(|(existing, _)| *existing == key) {
                Some((_, frequency)) => frequency.count += 1,
                None => {
                    frequencies.push((key, WordFrequency { word: word.clone(), count: 1 }))
                }
            }
        }
    }

    let mut words: Vec<WordFrequency> =
        frequencies.into_iter().map(|(_, frequency)| frequency).collect();
    words.sort_by(|a, b| b.count.cmp(&a.count));

    WordCloudBreakdown { total_submissions, total_words, words }
}

fn aggregate_uploads(records: &[AnswerRecord]) -> Vec<UploadEntry> {
    by_submission_order(records)
        .into_iter()
        .filter(|record| {
            matches!(record.payload, AnswerPayload::Drawing | AnswerPayload::ImageUpload)
        })
        .filter_map(|record| {
            record.uploaded_file.as_ref().map(|upload| UploadEntry {
                student_id: record.student_id,
                upload: upload.clone(),
                submitted_at: record.submitted_at,
            })
        })
        .collect()
}
