use anyhow::Result;
use colored::Colorize;
use itertools::Itertools;

use crate::{
    cli::ExerciseCmd,
    store::RecordStore,
    types::{ExerciseTemplate, OutputFmt, best_template_suggestion, emit},
};

/// Resolve user input (an id or an exact name) against the loaded library.
/// Prints its own error, with a "did you mean" when a close name exists.
fn resolve<'a>(input: &str, templates: &'a [ExerciseTemplate]) -> Option<&'a ExerciseTemplate> {
    let found = if let Ok(id) = input.parse::<u64>() {
        templates.iter().find(|t| t.id == id)
    } else {
        templates.iter().find(|t| t.name == input)
    };

    if found.is_none() {
        match best_template_suggestion(input, templates) {
            Some(sug) => println!(
                "{} no exercise `{}` -- did you mean: `{}`?",
                "error:".red().bold(),
                input,
                sug.green()
            ),
            None => println!("{} no exercise `{}`", "error:".red().bold(), input),
        }
    }

    found
}

pub async fn handle<S: RecordStore>(cmd: ExerciseCmd, store: &S, fmt: OutputFmt) -> Result<()> {
    match cmd {
        ExerciseCmd::Add { name } => {
            let name = name.trim();
            if name.is_empty() {
                println!("{} exercise name must not be empty", "error:".red().bold());
                return Ok(());
            }

            let id = store.add_exercise(name).await?;
            println!("{} Exercise \"{}\" added (id: {})", "info:".blue().bold(), name, id);
        }

        ExerciseCmd::List => {
            let templates = store.get_all_exercises().await?;

            emit(fmt, &templates, || {
                println!("{}", "Exercises:".cyan().bold());

                let id_w = templates.iter().map(|t| t.id.to_string().len()).max().unwrap_or(1);

                for t in &templates {
                    let idx = format!("{:>width$}", t.id, width = id_w).yellow();
                    let defaults = t
                        .sets
                        .iter()
                        .map(|s| format!("{}kg × {}", s.weight, s.reps))
                        .join(", ");
                    let comments = if t.comments.is_empty() {
                        String::new()
                    } else {
                        format!(" – {}", t.comments).dimmed().to_string()
                    };
                    println!(" {} • {} [{}]{}", idx, t.name.bold(), defaults.dimmed(), comments);
                }

                if templates.is_empty() {
                    println!("{}", "  (no exercises found)".dimmed());
                }
            });
        }

        ExerciseCmd::Rename { exercise, new_name } => {
            let new_name = new_name.trim();
            if new_name.is_empty() {
                println!("{} exercise name must not be empty", "error:".red().bold());
                return Ok(());
            }

            let templates = store.get_all_exercises().await?;
            let Some(found) = resolve(&exercise, &templates) else {
                return Ok(());
            };

            let old_name = found.name.clone();
            store.edit_exercise(found.id, new_name).await?;
            println!("{} renamed `{}` to `{}`", "ok:".green().bold(), old_name, new_name);
        }

        ExerciseCmd::Delete { exercise } => {
            let templates = store.get_all_exercises().await?;
            let Some(found) = resolve(&exercise, &templates) else {
                return Ok(());
            };

            let name = found.name.clone();
            store.delete_exercise(found.id).await?;
            println!("{} deleted exercise `{}`", "ok:".green().bold(), name);
        }
    }

    Ok(())
}
