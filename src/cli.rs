use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "swole", version, about = "CLI workout tracker")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Emit machine-readable JSON instead of colorful text.
    #[arg(global = true, long)]
    pub json: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Session-scoped commands
    #[command(subcommand, visible_alias = "s")]
    Session(SessionCmd),

    /// Exercise template library
    #[command(subcommand, visible_alias = "ex")]
    Exercise(ExerciseCmd),

    /// Show completed workout sessions, most recent first
    #[command(visible_alias = "h")]
    History {
        /// Query the store's own history view instead of deriving it locally
        #[arg(long)]
        raw: bool,
    },

    /// View or edit swole config
    #[command(subcommand)]
    Config(ConfigCmd),
}

//
// Commands
//

#[derive(Subcommand)]
pub enum SessionCmd {
    /// Create a new workout session
    #[command(visible_alias = "c")]
    Create {
        /// Session name (defaults to "Gym Day M/D/YYYY")
        #[arg(short, long)]
        name: Option<String>,

        /// Comma-separated exercise ids or names to start the workout with
        #[arg(short, long)]
        exercises: Option<String>,
    },

    /// Open a session as the active workout
    #[command(visible_alias = "o")]
    Open {
        /// Session id
        session: String,

        /// Comma-separated exercise template ids to seed the workout with
        /// when no unsaved work exists for this session
        #[arg(short, long)]
        exercises: Option<String>,
    },

    /// Show the active workout without touching the network
    #[command(visible_alias = "i")]
    Show,

    /// Edit a set in the active workout - Usage: session edit EXERCISE SET
    #[command(visible_alias = "e")]
    #[command(override_usage = "session edit <EXERCISE> <SET> [--weight W] [--reps R]")]
    Edit {
        /// Exercise index (same order shown in `session show`)
        #[arg(value_name = "EXERCISE")]
        exercise: usize,

        /// Set index
        #[arg(value_name = "SET")]
        set: usize,

        /// Weight in kg (empty string clears the value)
        #[arg(long, short = 'w')]
        weight: Option<String>,

        /// Number of reps (empty string clears the value)
        #[arg(long, short = 'r')]
        reps: Option<String>,
    },

    /// Attach a comment to an exercise in the active workout
    #[command(visible_alias = "n")]
    #[command(override_usage = "session note <EX_IDX> <NOTE_STRING>")]
    Note {
        /// 1-based index of the exercise (same order shown in `session show`)
        #[arg(value_name = "EX_IDX")]
        exercise: usize,

        /// Free-form text
        #[arg(value_name = "NOTE_STRING")]
        note: String,
    },

    /// Average the active workout's sets and record them to the store
    Save,

    /// List all sessions on the store
    #[command(visible_alias = "l")]
    List,

    /// Show the recorded exercises of one session
    Log {
        /// Session id
        session: String,
    },

    /// Remove a recorded exercise from a session by position
    Drop {
        /// Session id
        session: String,

        /// 1-based position of the recorded exercise
        index: usize,
    },
}

#[derive(Debug, Subcommand)]
pub enum ExerciseCmd {
    /// Add a new exercise template
    #[command(visible_alias = "a")]
    Add {
        /// Exercise name
        name: String,
    },

    /// List all exercise templates
    #[command(visible_alias = "l")]
    List,

    /// Rename an exercise template
    #[command(visible_alias = "r")]
    Rename {
        /// Exercise id or name
        exercise: String,

        /// New name
        new_name: String,
    },

    /// Delete an exercise template
    #[command(visible_alias = "d")]
    Delete {
        /// Exercise id or name
        exercise: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Show all config keys
    List,

    /// Get the value of a key
    Get { key: String },

    /// Set or override a key
    Set { key: String, val: String },

    /// Remove a key
    Unset { key: String },
}
