//! # Roster CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, while this file
//! only invokes `cli::run()` and handles process termination. Everything the
//! CLI calls into is the UI-agnostic `roster` library.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/roster/cli/)                                │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal rendering via outstanding templates (render.rs) │
//! │  - tracing subscriber on stderr (logging.rs)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Library (roster)                                           │
//! │  - Roster context, stores, event bus, view coordinator      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! - **Library**: unit tests next to each module, property tests in `tests/`.
//! - **CLI**: argument parsing and template output are unit tested in `cli/`;
//!   `tests/cli.rs` drives the built binary over temporary data files.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
