use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "roster",
    bin_name = "roster",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Filter a list of people with togglable rules", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Record field to sort by (overrides config)
    #[arg(long, global = true, value_name = "FIELD", help_heading = "Options")]
    pub sort_field: Option<String>,

    /// Disable styled output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,

    /// Verbose logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the filter list and the visible records
    #[command(alias = "ls", display_order = 1)]
    Show {
        /// Bootstrap data file (JSON with `persons` and `filters`)
        file: PathBuf,

        /// Toggle these filter rules after loading (repeatable)
        #[arg(long = "toggle", short = 't', value_name = "ID")]
        toggles: Vec<String>,

        /// Merge more data after loading, without removing anything (repeatable)
        #[arg(long, value_name = "FILE")]
        extend: Vec<PathBuf>,
    },

    /// List the filter rules
    #[command(display_order = 2)]
    Filters {
        /// Bootstrap data file
        file: PathBuf,
    },

    /// Print the criteria the enabled rules add up to
    #[command(display_order = 3)]
    Criteria {
        /// Bootstrap data file
        file: PathBuf,

        /// Toggle these filter rules after loading (repeatable)
        #[arg(long = "toggle", short = 't', value_name = "ID")]
        toggles: Vec<String>,
    },

    /// Interactive session: read commands from stdin, re-render on every change
    #[command(display_order = 4)]
    Session {
        /// Bootstrap data file
        file: PathBuf,
    },

    /// Print the effective configuration
    #[command(display_order = 10)]
    Config,
}

/// One line of `roster session` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Toggle(String),
    Load(PathBuf),
    Extend(PathBuf),
    Criteria,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match (word, rest) {
            ("", _) => Self::Empty,
            ("toggle" | "t", id) if !id.is_empty() => Self::Toggle(id.to_string()),
            ("load", path) if !path.is_empty() => Self::Load(PathBuf::from(path)),
            ("extend", path) if !path.is_empty() => Self::Extend(PathBuf::from(path)),
            ("criteria", "") => Self::Criteria,
            ("help" | "?", "") => Self::Help,
            ("quit" | "exit" | "q", "") => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

pub const SESSION_HELP: &str = "\
Commands:
  toggle <id>     Enable or disable a filter rule
  load <file>     Replace data from a file (missing ids are removed)
  extend <file>   Merge data from a file
  criteria        Print the current criteria
  help            Show this help
  quit            Leave the session";
