use crate::types::WorkoutSession;

/// What counts as history is recomputed from raw session records: the
/// store's own completion flag is never set by any exposed mutation, so a
/// session belongs to history exactly when it has at least one recorded
/// exercise. Most recent first.
pub fn derive_history(mut sessions: Vec<WorkoutSession>) -> Vec<WorkoutSession> {
    sessions.retain(|s| !s.exercises.is_empty());
    sessions.sort_by(|a, b| b.date.cmp(&a.date));
    sessions
}
