use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use uuid::Uuid;

use crate::schemas::answer::AnswerRecord;

/// Read-only view of existing answers, supplied by the storage layer.
///
/// The engine only needs the existence check for the one-answer-per-
/// (student, quiz) precondition; the atomic check-and-insert itself belongs
/// to the implementation.
pub trait AnswerStore {
    fn has_answered(&self, quiz_id: Uuid, student_id: Uuid) -> bool;
}

#[derive(Debug, Default)]
struct StoreInner {
    seen: HashSet<(Uuid, Uuid)>,
    records: Vec<AnswerRecord>,
}

/// Reference in-memory store with at-most-once insert semantics. Backs the
/// crate's own tests and small single-process deployments.
#[derive(Debug, Default)]
pub struct InMemoryAnswerStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryAnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomic check-and-insert. Returns `false` without storing anything
    /// when the (student, quiz) pair has already answered.
    pub fn try_record(&self, record: AnswerRecord) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if !inner.seen.insert((record.quiz_id, record.student_id)) {
            return false;
        }
        inner.records.push(record);
        true
    }

    /// All records for a quiz, in insertion order.
    pub fn records_for(&self, quiz_id: Uuid) -> Vec<AnswerRecord> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.records.iter().filter(|record| record.quiz_id == quiz_id).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AnswerStore for InMemoryAnswerStore {
    fn has_answered(&self, quiz_id: Uuid, student_id: Uuid) -> bool {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.seen.contains(&(quiz_id, student_id))
    }
}
