use std::sync::Mutex;

use anyhow::{Result, bail};

use super::RecordStore;
use crate::types::{ExerciseTemplate, SetValues, WorkoutExercise, WorkoutSession};

/// In-memory store double mirroring the remote backend's observable
/// behavior: sequential ids, three zeroed default sets per new template,
/// name denormalized into the record at append time.
pub struct MemStore {
    state: Mutex<State>,
    /// Fail the Nth append call (zero-based) with a store error.
    fail_append_at: Option<usize>,
}

#[derive(Default)]
struct State {
    exercises: Vec<ExerciseTemplate>,
    sessions: Vec<WorkoutSession>,
    next_exercise_id: u64,
    next_session_id: u64,
    appends_seen: usize,
}

impl MemStore {
    pub fn new() -> Self {
        Self { state: Mutex::new(State::default()), fail_append_at: None }
    }

    pub fn failing_append_at(index: usize) -> Self {
        Self { state: Mutex::new(State::default()), fail_append_at: Some(index) }
    }

    pub fn session(&self, id: u64) -> Option<WorkoutSession> {
        self.state.lock().unwrap().sessions.iter().find(|s| s.id == id).cloned()
    }
}

impl RecordStore for MemStore {
    async fn add_exercise(&self, name: &str) -> Result<u64> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_exercise_id;
        state.next_exercise_id += 1;
        state.exercises.push(ExerciseTemplate {
            id,
            name: name.to_string(),
            sets: vec![SetValues { weight: 0, reps: 0 }; 3],
            comments: String::new(),
        });
        Ok(id)
    }

    async fn edit_exercise(&self, id: u64, new_name: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        match state.exercises.iter_mut().find(|e| e.id == id) {
            Some(e) => {
                e.name = new_name.to_string();
                Ok(())
            }
            None => bail!("no exercise with id {id}"),
        }
    }

    async fn delete_exercise(&self, id: u64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.exercises.retain(|e| e.id != id);
        Ok(())
    }

    async fn get_all_exercises(&self) -> Result<Vec<ExerciseTemplate>> {
        Ok(self.state.lock().unwrap().exercises.clone())
    }

    async fn create_workout_session(&self, name: &str, date: i64) -> Result<u64> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_session_id;
        state.next_session_id += 1;
        state.sessions.push(WorkoutSession {
            id,
            name: name.to_string(),
            date,
            is_completed: false,
            exercises: Vec::new(),
        });
        Ok(id)
    }

    async fn add_exercise_to_session(
        &self,
        session_id: u64,
        exercise_id: u64,
        weight: f64,
        reps: u32,
        sets: u32,
        comments: &str,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();

        let seen = state.appends_seen;
        state.appends_seen += 1;
        if self.fail_append_at == Some(seen) {
            bail!("store unavailable");
        }

        // Snapshot the name now; the record must outlive the template.
        let exercise_name = state
            .exercises
            .iter()
            .find(|e| e.id == exercise_id)
            .map(|e| e.name.clone())
            .unwrap_or_default();

        match state.sessions.iter_mut().find(|s| s.id == session_id) {
            Some(session) => {
                session.exercises.push(WorkoutExercise {
                    exercise_id,
                    exercise_name,
                    weight,
                    reps,
                    sets,
                    comments: comments.to_string(),
                });
                Ok(())
            }
            None => bail!("no session with id {session_id}"),
        }
    }

    async fn remove_exercise_from_session(&self, session_id: u64, index: usize) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        match state.sessions.iter_mut().find(|s| s.id == session_id) {
            Some(session) if index < session.exercises.len() => {
                session.exercises.remove(index);
                Ok(())
            }
            Some(_) => bail!("no recorded exercise at index {index}"),
            None => bail!("no session with id {session_id}"),
        }
    }

    async fn get_workout_sessions_by_date(&self) -> Result<Vec<WorkoutSession>> {
        let mut sessions = self.state.lock().unwrap().sessions.clone();
        sessions.sort_by_key(|s| s.date);
        Ok(sessions)
    }

    async fn get_workout_history(&self) -> Result<Vec<WorkoutSession>> {
        // Mirrors the backend quirk: filters on the stored flag, which no
        // exposed mutation ever sets.
        let sessions = self.state.lock().unwrap().sessions.clone();
        Ok(sessions.into_iter().filter(|s| s.is_completed).collect())
    }
}
