use std::{collections::BTreeMap, path::Path};

use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

/// A reusable exercise definition owned by the user's library.
/// The store assigns the id; the client only ever holds transient copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseTemplate {
    pub id: u64,
    pub name: String,
    pub sets: Vec<SetValues>,
    pub comments: String,
}

/// Whole-number default values for one set of a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetValues {
    pub weight: u32,
    pub reps: u32,
}

/// One workout occasion. Starts with zero exercises; recorded exercises are
/// appended one at a time. `is_completed` is carried on the wire but nothing
/// here reads or writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub id: u64,
    pub name: String,
    pub date: i64,
    pub is_completed: bool,
    pub exercises: Vec<WorkoutExercise>,
}

/// A recorded exercise instance inside a session. `exercise_name` is a copy
/// the store takes at append time so history stays readable after the
/// template is renamed or deleted; `exercise_id` may dangle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub exercise_id: u64,
    pub exercise_name: String,
    pub weight: f64,
    pub reps: u32,
    pub sets: u32,
    pub comments: String,
}

//
// Output
//

#[derive(Clone, Copy)]
pub enum OutputFmt {
    Text,
    Json,
}

/// Print `payload` as JSON, or run the text renderer.
pub fn emit<T: Serialize>(fmt: OutputFmt, payload: &T, text: impl FnOnce()) {
    match fmt {
        OutputFmt::Json => match serde_json::to_string_pretty(payload) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("could not serialize output: {e}"),
        },
        OutputFmt::Text => text(),
    }
}

/// Millisecond epoch timestamp to local display form.
pub fn fmt_date(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms).single() {
        Some(t) => t.format("%d-%m-%Y %H:%M").to_string(),
        None => format!("@{ms}"),
    }
}

/// Return the closest library name for `input`
/// if similarity ≥ 0.80 *and* clearly better than the runner-up.
/// Otherwise return `None` (no suggestion shown).
pub fn best_template_suggestion<'a>(
    input: &str,
    templates: &'a [ExerciseTemplate],
) -> Option<&'a str> {
    let inp = input.to_ascii_lowercase();
    if inp.trim().is_empty() {
        return None;
    }

    // Collect (name, score) pairs.
    let mut scores: Vec<(&str, f64)> = templates
        .iter()
        .map(|t| (t.name.as_str(), jaro_winkler(&inp, &t.name.to_ascii_lowercase())))
        .collect();

    // Highest score first.
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());

    let (best_name, best_score) = *scores.first()?;
    let second_score = scores.get(1).map(|(_, s)| *s).unwrap_or(0.0);

    // Tune these two constants to taste.
    const MIN_SCORE: f64 = 0.80;
    const GAP: f64 = 0.02;

    if best_score >= MIN_SCORE && best_score - second_score >= GAP {
        Some(best_name)
    } else {
        None
    }
}

//
// Config
//

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub map: BTreeMap<String, String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file: {}", path.display()))?;

        toml::from_str(&raw).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Could not create config directory: {}", dir.display()))?;
        }

        let raw = toml::to_string(self).context("Could not serialize config")?;
        std::fs::write(path, raw)
            .with_context(|| format!("Could not write config file: {}", path.display()))
    }
}
