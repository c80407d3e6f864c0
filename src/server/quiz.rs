use crate::db::Question;

/// Picks the next quiz question: the first candidate (candidates are ordered
/// by ascending id) whose id is not in the already-seen list. Selection is
/// deterministic, not a random draw.
pub fn next_question<'a>(candidates: &'a [Question], previous: &[i64]) -> Option<&'a Question> {
    candidates.iter().find(|q| !previous.contains(&q.id))
}
