use anyhow::Result;
use chrono::{Datelike, Local};
use colored::Colorize;

use crate::{
    cli::SessionCmd,
    draft::{DraftStore, PersistedDraft},
    store::RecordStore,
    types::{OutputFmt, WorkoutSession, best_template_suggestion, emit, fmt_date},
    workout::{DraftOrigin, has_any_data, reconcile, submit_workout, summarize_sets},
};

fn parse_session_id(input: &str) -> Option<u64> {
    match input.parse::<u64>() {
        Ok(id) => Some(id),
        Err(_) => {
            println!("{} invalid session id: `{}`", "error:".red().bold(), input);
            None
        }
    }
}

/// Selection lists carry raw template ids; anything that is not an id of a
/// known template gets dropped later, so unparseable tokens are dropped
/// here for the same reason.
fn parse_seed_ids(raw: &str) -> Vec<u64> {
    raw.split(',').filter_map(|tok| tok.trim().parse::<u64>().ok()).collect()
}

/// The session record is looked up in the full list; the store's dedicated
/// lookup paths are not trusted for this.
async fn find_session<S: RecordStore>(store: &S, id: u64) -> Result<Option<WorkoutSession>> {
    let sessions = store.get_workout_sessions_by_date().await?;
    Ok(sessions.into_iter().find(|s| s.id == id))
}

fn load_draft_or_warn(drafts: &DraftStore) -> Option<PersistedDraft> {
    match drafts.load() {
        Ok(draft) => draft,
        Err(e) => {
            eprintln!("{} could not read draft slot: {e:#}", "warning:".yellow().bold());
            None
        }
    }
}

fn save_draft_or_warn(drafts: &DraftStore, draft: &PersistedDraft) {
    if let Err(e) = drafts.save(draft) {
        eprintln!("{} could not persist draft: {e:#}", "warning:".yellow().bold());
    }
}

fn print_workout(title: &str, draft: &PersistedDraft) {
    println!("{} {}", "Session:".cyan().bold(), title.bold());
    println!("{}", "Exercises:".cyan().bold());

    for (i, entry) in draft.exercises_data.iter().enumerate() {
        let idx = format!("{}", i + 1).yellow();
        println!(" {} • {}", idx, entry.exercise.name.bold());

        for (j, set) in entry.sets.iter().enumerate() {
            let set_idx = format!("{}", j + 1).yellow();
            let weight = if set.weight.is_empty() { "-" } else { set.weight.as_str() };
            let reps = if set.reps.is_empty() { "-" } else { set.reps.as_str() };
            println!("     {set_idx} • {weight}kg × {reps}");
        }

        if !entry.comments.is_empty() {
            println!("     {}", format!("note: {}", entry.comments).dimmed());
        }
    }
}

/// Mount the active workout: load templates, look the session up, merge
/// draft/selection/defaults into the editable list and persist it.
async fn open_workout<S: RecordStore>(
    store: &S,
    drafts: &DraftStore,
    session_id: u64,
    seed_ids: &[u64],
    fmt: OutputFmt,
) -> Result<()> {
    // Templates have to be in hand before the merge runs.
    let templates = store.get_all_exercises().await?;

    let Some(session) = find_session(store, session_id).await? else {
        println!("{} session {} not found", "error:".red().bold(), session_id);
        return Ok(());
    };

    let persisted = load_draft_or_warn(drafts);
    let reconciled = reconcile(session_id, seed_ids, &templates, persisted.as_ref());

    if reconciled.exercises.is_empty() {
        println!(
            "{} {} — {}",
            "Session:".cyan().bold(),
            session.name.bold(),
            fmt_date(session.date).dimmed()
        );
        println!("{}", "  (no exercises in this workout yet — nothing to save)".dimmed());
        return Ok(());
    }

    if matches!(reconciled.origin, DraftOrigin::Restored) {
        println!("{} restored unsaved work for this session", "info:".blue().bold());
    }

    let draft = PersistedDraft::new(session_id, reconciled.exercises);
    save_draft_or_warn(drafts, &draft);

    emit(fmt, &draft, || print_workout(&session.name, &draft));
    Ok(())
}

pub async fn handle<S: RecordStore>(
    cmd: SessionCmd,
    store: &S,
    drafts: &DraftStore,
    fmt: OutputFmt,
) -> Result<()> {
    match cmd {
        SessionCmd::Create { name, exercises } => {
            let today = Local::now();
            let name = match name {
                Some(n) => n.trim().to_string(),
                None => {
                    format!("Gym Day {}/{}/{}", today.month(), today.day(), today.year())
                }
            };

            if name.is_empty() {
                println!("{} session name must not be empty", "error:".red().bold());
                return Ok(());
            }

            // Resolve the selection before creating anything so a typo has
            // no side effects.
            let mut seed_ids = Vec::new();
            if let Some(raw) = &exercises {
                let templates = store.get_all_exercises().await?;

                for tok in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                    let found = if let Ok(id) = tok.parse::<u64>() {
                        templates.iter().find(|t| t.id == id)
                    } else {
                        templates.iter().find(|t| t.name == tok)
                    };

                    match found {
                        Some(t) => seed_ids.push(t.id),
                        None => {
                            match best_template_suggestion(tok, &templates) {
                                Some(sug) => println!(
                                    "{} no exercise `{}` -- did you mean: `{}`?",
                                    "error:".red().bold(),
                                    tok,
                                    sug.green()
                                ),
                                None => {
                                    println!("{} no exercise `{}`", "error:".red().bold(), tok)
                                }
                            }
                            return Ok(());
                        }
                    }
                }
            }

            let session_id =
                store.create_workout_session(&name, today.timestamp_millis()).await?;
            println!("{} session created (id: {})", "ok:".green().bold(), session_id);

            if seed_ids.is_empty() {
                println!(
                    "{} open it with `swole session open {}`",
                    "info:".blue().bold(),
                    session_id
                );
                return Ok(());
            }

            open_workout(store, drafts, session_id, &seed_ids, fmt).await
        }

        SessionCmd::Open { session, exercises } => {
            let Some(session_id) = parse_session_id(&session) else {
                return Ok(());
            };

            let seed_ids = exercises.as_deref().map(parse_seed_ids).unwrap_or_default();
            open_workout(store, drafts, session_id, &seed_ids, fmt).await
        }

        SessionCmd::Show => {
            let Some(draft) = load_draft_or_warn(drafts) else {
                println!("{} no active workout", "error:".red().bold());
                return Ok(());
            };

            let title = format!("session {}", draft.session_id);
            emit(fmt, &draft, || print_workout(&title, &draft));
            Ok(())
        }

        SessionCmd::Edit { exercise, set, weight, reps } => {
            let Some(mut draft) = load_draft_or_warn(drafts) else {
                println!("{} no active workout", "error:".red().bold());
                return Ok(());
            };

            let Some(ex_index) = exercise.checked_sub(1) else {
                println!("{} exercise index must be ≥ 1", "error:".red().bold());
                return Ok(());
            };
            let Some(set_index) = set.checked_sub(1) else {
                println!("{} set index must be ≥ 1", "error:".red().bold());
                return Ok(());
            };

            let Some(entry) = draft.exercises_data.get_mut(ex_index) else {
                println!("{} no exercise at index {}", "error:".red().bold(), exercise);
                return Ok(());
            };
            let Some(target) = entry.sets.get_mut(set_index) else {
                println!("{} no set at index {}", "error:".red().bold(), set);
                return Ok(());
            };

            // Values stay text until submission, but refuse anything that
            // could never be submitted as entered.
            if let Some(w) = &weight {
                let w = w.trim();
                if !w.is_empty() && !w.parse::<f64>().map(|v| v >= 0.0).unwrap_or(false) {
                    println!("{} invalid weight: {}", "error:".red().bold(), w);
                    return Ok(());
                }
                target.weight = w.to_string();
            }

            if let Some(r) = &reps {
                let r = r.trim();
                if !r.is_empty() && r.parse::<u32>().is_err() {
                    println!("{} invalid reps: {}", "error:".red().bold(), r);
                    return Ok(());
                }
                target.reps = r.to_string();
            }

            if weight.is_none() && reps.is_none() {
                println!("{} nothing to change (pass --weight or --reps)", "warning:".yellow().bold());
                return Ok(());
            }

            save_draft_or_warn(drafts, &draft);
            println!("{} updated set {}-{}", "ok:".green().bold(), exercise, set);
            Ok(())
        }

        SessionCmd::Note { exercise, note } => {
            let Some(mut draft) = load_draft_or_warn(drafts) else {
                println!("{} no active workout", "error:".red().bold());
                return Ok(());
            };

            let Some(entry) =
                exercise.checked_sub(1).and_then(|i| draft.exercises_data.get_mut(i))
            else {
                println!("{} no exercise at index {}", "error:".red().bold(), exercise);
                return Ok(());
            };

            entry.comments = note;
            let name = entry.exercise.name.clone();
            save_draft_or_warn(drafts, &draft);
            println!("{} note saved for `{}`", "ok:".green().bold(), name);
            Ok(())
        }

        SessionCmd::Save => {
            let Some(draft) = load_draft_or_warn(drafts) else {
                println!("{} no active workout to save", "error:".red().bold());
                return Ok(());
            };

            if !has_any_data(&draft.exercises_data) {
                println!(
                    "{} enter data for at least one exercise before saving",
                    "error:".red().bold()
                );
                return Ok(());
            }

            let Some(session_id) = parse_session_id(&draft.session_id) else {
                return Ok(());
            };

            if let Err(e) = submit_workout(store, session_id, &draft.exercises_data).await {
                println!("{} {:#}", "error:".red().bold(), e);
                return Ok(());
            }

            for entry in &draft.exercises_data {
                let s = summarize_sets(&entry.sets);
                println!(
                    "{} `{}` — {}kg × {} ({} sets)",
                    "ok:".green().bold(),
                    entry.exercise.name,
                    s.weight,
                    s.reps,
                    s.sets
                );
            }

            // The slot is spent regardless of whether the file goes away.
            if let Err(e) = drafts.clear() {
                eprintln!("{} could not clear draft slot: {e:#}", "warning:".yellow().bold());
            }

            println!(
                "{} workout saved — see it with `swole history`",
                "ok:".green().bold()
            );
            Ok(())
        }

        SessionCmd::List => {
            let sessions = store.get_workout_sessions_by_date().await?;

            emit(fmt, &sessions, || {
                println!("{}", "Sessions:".cyan().bold());

                for s in &sessions {
                    let status = if s.exercises.is_empty() {
                        "in progress".dimmed()
                    } else {
                        format!("{} recorded", s.exercises.len()).dimmed()
                    };
                    println!(
                        " {} • {} — {} | {}",
                        format!("{}", s.id).yellow(),
                        s.name.bold(),
                        fmt_date(s.date),
                        status
                    );
                }

                if sessions.is_empty() {
                    println!("{}", "  (no sessions found)".dimmed());
                }
            });
            Ok(())
        }

        SessionCmd::Log { session } => {
            let Some(session_id) = parse_session_id(&session) else {
                return Ok(());
            };

            let Some(found) = find_session(store, session_id).await? else {
                println!("{} session {} not found", "error:".red().bold(), session_id);
                return Ok(());
            };

            emit(fmt, &found, || {
                println!(
                    "{} {} — {}",
                    "Session:".cyan().bold(),
                    found.name.bold(),
                    fmt_date(found.date).dimmed()
                );

                for (i, ex) in found.exercises.iter().enumerate() {
                    let comments = if ex.comments.is_empty() {
                        String::new()
                    } else {
                        format!(" – {}", ex.comments).dimmed().to_string()
                    };
                    println!(
                        " {} • {} — {}kg × {} ({} sets){}",
                        format!("{}", i + 1).yellow(),
                        ex.exercise_name.bold(),
                        ex.weight,
                        ex.reps,
                        ex.sets,
                        comments
                    );
                }

                if found.exercises.is_empty() {
                    println!("{}", "  (no exercises recorded)".dimmed());
                }
            });
            Ok(())
        }

        SessionCmd::Drop { session, index } => {
            let Some(session_id) = parse_session_id(&session) else {
                return Ok(());
            };
            let Some(zero_index) = index.checked_sub(1) else {
                println!("{} index must be ≥ 1", "error:".red().bold());
                return Ok(());
            };

            store.remove_exercise_from_session(session_id, zero_index).await?;
            println!(
                "{} removed exercise {} from session {}",
                "ok:".green().bold(),
                index,
                session_id
            );
            Ok(())
        }
    }
}
