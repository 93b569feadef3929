use anyhow::Result;

use crate::types::{ExerciseTemplate, WorkoutSession};

pub mod http;

#[cfg(test)]
pub mod mem;

pub use http::HttpStore;

/// The remote record store: CRUD over exercise templates and workout
/// sessions plus the two list queries. Reads are fully consistent after
/// writes; everything else about the backend is opaque.
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    async fn add_exercise(&self, name: &str) -> Result<u64>;

    /// Only the name can be edited server-side.
    async fn edit_exercise(&self, id: u64, new_name: &str) -> Result<()>;

    async fn delete_exercise(&self, id: u64) -> Result<()>;

    async fn get_all_exercises(&self) -> Result<Vec<ExerciseTemplate>>;

    async fn create_workout_session(&self, name: &str, date: i64) -> Result<u64>;

    /// Append one averaged exercise result to a session. The store copies
    /// the template's current name into the record at this point.
    async fn add_exercise_to_session(
        &self,
        session_id: u64,
        exercise_id: u64,
        weight: f64,
        reps: u32,
        sets: u32,
        comments: &str,
    ) -> Result<()>;

    /// Remove a recorded exercise by zero-based position.
    async fn remove_exercise_from_session(&self, session_id: u64, index: usize) -> Result<()>;

    async fn get_workout_sessions_by_date(&self) -> Result<Vec<WorkoutSession>>;

    /// The store's own notion of history. Found unreliable in practice;
    /// the history view recomputes from `get_workout_sessions_by_date`
    /// instead and only `history --raw` reaches this.
    async fn get_workout_history(&self) -> Result<Vec<WorkoutSession>>;
}
