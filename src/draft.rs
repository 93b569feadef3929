use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::ExerciseTemplate;

const DRAFT_FILE: &str = "active_workout.json";

/// The unsaved, editable snapshot of the workout in progress. One slot for
/// the whole app; which session it belongs to lives inside the payload, so
/// opening a different session simply overwrites it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedDraft {
    pub session_id: String,
    pub exercise_ids: Vec<String>,
    pub exercises_data: Vec<DraftExercise>,
}

/// One editable entry: the template it came from plus per-set values kept
/// as raw text until submission parses them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftExercise {
    pub exercise: ExerciseTemplate,
    pub sets: Vec<DraftSet>,
    pub comments: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftSet {
    pub weight: String,
    pub reps: String,
}

impl PersistedDraft {
    pub fn new(session_id: u64, exercises_data: Vec<DraftExercise>) -> Self {
        let exercise_ids = exercises_data.iter().map(|e| e.exercise.id.to_string()).collect();
        Self { session_id: session_id.to_string(), exercise_ids, exercises_data }
    }
}

/// Reads and writes the single draft slot on disk. Callers treat every
/// failure here as survivable: the workout keeps going in memory.
pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    pub fn new(dir: &Path) -> Self {
        Self { path: dir.join(DRAFT_FILE) }
    }

    pub fn at_default_location() -> Result<Self> {
        let dir = dirs::data_dir()
            .context("Could not determine data directory")?
            .join("swole");
        Ok(Self::new(&dir))
    }

    /// `None` when no draft has been persisted yet.
    pub fn load(&self) -> Result<Option<PersistedDraft>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read draft file: {}", self.path.display()))?;

        let draft = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse draft file: {}", self.path.display()))?;

        Ok(Some(draft))
    }

    pub fn save(&self, draft: &PersistedDraft) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }

        let raw = serde_json::to_string_pretty(draft)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to save draft to {}", self.path.display()))
    }

    /// Clearing an already-empty slot is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| {
                format!("Failed to clear draft file: {}", self.path.display())
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SetValues;

    fn sample_draft() -> PersistedDraft {
        PersistedDraft::new(
            7,
            vec![DraftExercise {
                exercise: ExerciseTemplate {
                    id: 3,
                    name: "Squat".to_string(),
                    sets: vec![SetValues { weight: 100, reps: 5 }; 3],
                    comments: String::new(),
                },
                sets: vec![
                    DraftSet { weight: "100".to_string(), reps: "5".to_string() },
                    DraftSet { weight: "102.5".to_string(), reps: "5".to_string() },
                    DraftSet { weight: "".to_string(), reps: "".to_string() },
                ],
                comments: "felt heavy".to_string(),
            }],
        )
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = DraftStore::new(dir.path());

        store.save(&sample_draft()).unwrap();
        let loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded.session_id, "7");
        assert_eq!(loaded.exercise_ids, vec!["3"]);
        assert_eq!(loaded.exercises_data[0].sets[1].weight, "102.5");
        assert_eq!(loaded.exercises_data[0].comments, "felt heavy");
    }

    #[test]
    fn load_without_slot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = DraftStore::new(dir.path());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = DraftStore::new(dir.path());

        store.save(&sample_draft()).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());

        // Second clear hits a missing file and still succeeds.
        store.clear().unwrap();
    }

    #[test]
    fn save_into_unwritable_location_errors_without_panicking() {
        // A path under a regular file cannot be created.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        let store = DraftStore::new(&blocker.join("nested"));
        assert!(store.save(&sample_draft()).is_err());
    }

    #[test]
    fn corrupt_slot_surfaces_as_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DRAFT_FILE), b"not json").unwrap();

        let store = DraftStore::new(dir.path());
        assert!(store.load().is_err());
    }

    #[test]
    fn slot_payload_uses_camel_case_keys() {
        let raw = serde_json::to_string(&sample_draft()).unwrap();
        assert!(raw.contains("\"sessionId\""));
        assert!(raw.contains("\"exerciseIds\""));
        assert!(raw.contains("\"exercisesData\""));
    }
}
