use anyhow::Result;
use colored::Colorize;

use crate::{
    history::derive_history,
    store::RecordStore,
    types::{OutputFmt, WorkoutSession, emit, fmt_date},
};

/// The history view. By default it is derived from the raw session list,
/// since the store's own history query filters on a completion flag that
/// nothing ever sets; `--raw` asks the store anyway.
pub async fn handle<S: RecordStore>(store: &S, raw: bool, fmt: OutputFmt) -> Result<()> {
    let history: Vec<WorkoutSession> = if raw {
        store.get_workout_history().await?
    } else {
        derive_history(store.get_workout_sessions_by_date().await?)
    };

    emit(fmt, &history, || {
        println!("{}", "Workout history:".cyan().bold());

        for s in &history {
            println!(
                " {} • {} — {} | {}",
                format!("{}", s.id).yellow(),
                s.name.bold(),
                fmt_date(s.date),
                format!("{} exercises", s.exercises.len()).dimmed()
            );

            for ex in &s.exercises {
                println!(
                    "     {} — {}kg × {} ({} sets)",
                    ex.exercise_name,
                    ex.weight,
                    ex.reps,
                    ex.sets
                );
            }
        }

        if history.is_empty() {
            println!("{}", "  (no completed workouts yet)".dimmed());
        }
    });

    Ok(())
}
