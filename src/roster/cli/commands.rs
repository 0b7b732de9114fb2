//! # CLI Layer
//!
//! This module is **one possible UI client** for roster, not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Load configuration, apply flag overrides, build the `Roster`
//! 3. **API Dispatch**: Call the appropriate `Roster` method
//! 4. **Output Formatting**: Print the renderer's frames and `CmdResult` messages
//! 5. **Error Handling**: Fatal errors bubble up to `main.rs` (exit code 1)
//!
//! ## Output Channels
//!
//! Views go to stdout. Messages (skipped items, toggle results) and logs go to
//! stderr.

use super::logging::{init_logging, LogConfig};
use super::render::{
    print_messages, render_criteria, render_filters, render_pairs, render_records,
    TerminalRenderer,
};
use super::setup::{Cli, Commands, SessionCommand, SESSION_HELP};
use clap::Parser;
use roster::api::{LoadMode, Roster};
use roster::config::{global_config_dir, RosterConfig};
use roster::error::Result;
use std::cell::RefCell;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

struct AppContext {
    roster: Roster,
    renderer: Rc<RefCell<TerminalRenderer>>,
    use_color: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&LogConfig::from_verbosity(cli.verbose).with_ansi(io::stderr().is_terminal()));

    let config = init_config(&cli)?;
    debug!(?config, "effective configuration");

    match cli.command {
        Commands::Show {
            file,
            toggles,
            extend,
        } => handle_show(&config, &file, &toggles, &extend),
        Commands::Filters { file } => handle_filters(&config, &file),
        Commands::Criteria { file, toggles } => handle_criteria(&config, &file, &toggles),
        Commands::Session { file } => handle_session(&config, &file),
        Commands::Config => handle_config(&config),
    }
}

/// Loads layered configuration and applies command-line overrides on top.
fn init_config(cli: &Cli) -> Result<RosterConfig> {
    let cwd = std::env::current_dir()?;
    let global_dir = global_config_dir();
    let mut config = RosterConfig::load(&cwd, global_dir.as_deref())?;

    if let Some(field) = &cli.sort_field {
        config.sort_field = field.clone();
    }
    if cli.no_color {
        config.color = false;
    }
    Ok(config)
}

fn init_context(config: &RosterConfig, file: &Path) -> Result<AppContext> {
    let use_color = config.color && console::Term::stdout().features().colors_supported();
    colored::control::set_override(config.color && io::stderr().is_terminal());

    let renderer = Rc::new(RefCell::new(TerminalRenderer::new(use_color)));
    let mut roster = Roster::new(config, Rc::clone(&renderer));
    let result = roster.load(file, LoadMode::Replace)?;
    print_messages(&result.messages);

    Ok(AppContext {
        roster,
        renderer,
        use_color,
    })
}

impl AppContext {
    fn apply_toggles(&mut self, toggles: &[String]) {
        for id in toggles {
            let result = self.roster.toggle_filter(id);
            print_messages(&result.messages);
        }
    }

    fn discard_frames(&self) {
        self.renderer.borrow_mut().take_frames();
    }

    fn print_frames(&self) {
        for frame in self.renderer.borrow_mut().take_frames() {
            print!("{frame}");
        }
    }
}

fn handle_show(
    config: &RosterConfig,
    file: &Path,
    toggles: &[String],
    extend: &[PathBuf],
) -> Result<()> {
    let mut ctx = init_context(config, file)?;
    ctx.apply_toggles(toggles);
    for path in extend {
        let result = ctx.roster.load(path, LoadMode::Extend)?;
        print_messages(&result.messages);
    }
    ctx.discard_frames();

    // A toggle never re-renders the filter list, so the final state is drawn here.
    print!("{}", render_filters(&ctx.roster.filters(), ctx.use_color)?);
    println!();
    print!("{}", render_records(&ctx.roster.visible(), ctx.use_color)?);
    Ok(())
}

fn handle_filters(config: &RosterConfig, file: &Path) -> Result<()> {
    let ctx = init_context(config, file)?;
    ctx.discard_frames();
    print!("{}", render_filters(&ctx.roster.filters(), ctx.use_color)?);
    Ok(())
}

fn handle_criteria(config: &RosterConfig, file: &Path, toggles: &[String]) -> Result<()> {
    let mut ctx = init_context(config, file)?;
    ctx.apply_toggles(toggles);
    ctx.discard_frames();
    print!("{}", render_criteria(&ctx.roster.criteria(), ctx.use_color)?);
    Ok(())
}

fn handle_session(config: &RosterConfig, file: &Path) -> Result<()> {
    let mut ctx = init_context(config, file)?;
    ctx.print_frames();

    let interactive = io::stdin().is_terminal();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match SessionCommand::parse(&line) {
            SessionCommand::Toggle(id) => {
                let result = ctx.roster.toggle_filter(&id);
                print_messages(&result.messages);
            }
            SessionCommand::Load(path) => session_load(&mut ctx, &path, LoadMode::Replace),
            SessionCommand::Extend(path) => session_load(&mut ctx, &path, LoadMode::Extend),
            SessionCommand::Criteria => {
                print!("{}", render_criteria(&ctx.roster.criteria(), ctx.use_color)?);
            }
            SessionCommand::Help => println!("{SESSION_HELP}"),
            SessionCommand::Quit => break,
            SessionCommand::Empty => {}
            SessionCommand::Unknown(input) => {
                eprintln!("Unknown command: {input} (try `help`)");
            }
        }
        ctx.print_frames();
    }
    Ok(())
}

/// A bad file inside a session is reported and the session goes on.
fn session_load(ctx: &mut AppContext, path: &Path, mode: LoadMode) {
    match ctx.roster.load(path, mode) {
        Ok(result) => print_messages(&result.messages),
        Err(e) => eprintln!("Error: {e}"),
    }
}

fn handle_config(config: &RosterConfig) -> Result<()> {
    let use_color = config.color && console::Term::stdout().features().colors_supported();
    print!("{}", render_pairs(&config.entries(), "", use_color)?);
    Ok(())
}
