use anyhow::{Context, Result};

use crate::draft::{DraftExercise, DraftSet, PersistedDraft};
use crate::store::RecordStore;
use crate::types::ExerciseTemplate;

/// Which source of truth won when the active workout was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftOrigin {
    /// Unsaved work for this session was restored from the local slot.
    Restored,
    /// Entries were seeded from the selection list and template defaults.
    Seeded,
    /// Nothing to show.
    Empty,
}

pub struct Reconciled {
    pub origin: DraftOrigin,
    pub exercises: Vec<DraftExercise>,
}

/// Seed a fresh editable entry from a template's defaults.
pub fn seed_entry(template: &ExerciseTemplate) -> DraftExercise {
    DraftExercise {
        sets: template
            .sets
            .iter()
            .map(|s| DraftSet { weight: s.weight.to_string(), reps: s.reps.to_string() })
            .collect(),
        comments: template.comments.clone(),
        exercise: template.clone(),
    }
}

/// Assemble the editable list for the session being opened, in priority
/// order: unsaved local work for the same session, then the caller's
/// selection list, then nothing.
///
/// A restored entry keeps its edited sets and comments but re-resolves its
/// template against the freshly loaded library so renames show up; if the
/// template is gone the stale persisted copy is kept untouched. Selection
/// ids with no matching template are dropped silently, in order.
pub fn reconcile(
    session_id: u64,
    seed_ids: &[u64],
    templates: &[ExerciseTemplate],
    persisted: Option<&PersistedDraft>,
) -> Reconciled {
    if let Some(draft) = persisted {
        if draft.session_id == session_id.to_string() {
            let exercises = draft
                .exercises_data
                .iter()
                .map(|entry| {
                    match templates.iter().find(|t| t.id == entry.exercise.id) {
                        Some(current) => DraftExercise {
                            exercise: current.clone(),
                            sets: entry.sets.clone(),
                            comments: entry.comments.clone(),
                        },
                        None => entry.clone(),
                    }
                })
                .collect();

            return Reconciled { origin: DraftOrigin::Restored, exercises };
        }
    }

    if !seed_ids.is_empty() {
        let exercises: Vec<DraftExercise> = seed_ids
            .iter()
            .filter_map(|id| templates.iter().find(|t| t.id == *id))
            .map(seed_entry)
            .collect();

        if !exercises.is_empty() {
            return Reconciled { origin: DraftOrigin::Seeded, exercises };
        }
    }

    Reconciled { origin: DraftOrigin::Empty, exercises: Vec::new() }
}

//
// Submission
//

/// The single tuple the store accepts per exercise.
#[derive(Debug, PartialEq)]
pub struct SetSummary {
    pub weight: f64,
    pub reps: u32,
    pub sets: u32,
}

/// True when any entry carries something worth saving: a non-empty weight
/// or reps value on any set, or a comment.
pub fn has_any_data(entries: &[DraftExercise]) -> bool {
    entries.iter().any(|e| {
        !e.comments.is_empty() || e.sets.iter().any(|s| !s.weight.is_empty() || !s.reps.is_empty())
    })
}

/// Average one entry's sets. Unparseable or empty values count as zero.
/// The divisor is the number of sets actually present.
pub fn summarize_sets(sets: &[DraftSet]) -> SetSummary {
    if sets.is_empty() {
        return SetSummary { weight: 0.0, reps: 0, sets: 0 };
    }

    let n = sets.len() as f64;
    let weight_sum: f64 = sets.iter().map(|s| s.weight.trim().parse::<f64>().unwrap_or(0.0)).sum();
    let reps_sum: i64 = sets.iter().map(|s| s.reps.trim().parse::<i64>().unwrap_or(0)).sum();

    SetSummary {
        weight: weight_sum / n,
        reps: (reps_sum as f64 / n).round() as u32,
        sets: sets.len() as u32,
    }
}

/// Record every entry to the store, one awaited call at a time, in list
/// order. A failure partway through stops the loop and reports how many
/// entries made it; those stay recorded, there is no rollback.
pub async fn submit_workout<S: RecordStore>(
    store: &S,
    session_id: u64,
    entries: &[DraftExercise],
) -> Result<()> {
    for (i, entry) in entries.iter().enumerate() {
        let summary = summarize_sets(&entry.sets);
        store
            .add_exercise_to_session(
                session_id,
                entry.exercise.id,
                summary.weight,
                summary.reps,
                summary.sets,
                &entry.comments,
            )
            .await
            .with_context(|| {
                format!(
                    "Failed to record `{}` ({} of {} exercises were already saved)",
                    entry.exercise.name,
                    i,
                    entries.len()
                )
            })?;
    }

    Ok(())
}
