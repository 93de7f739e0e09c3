//! jot - notes scoped to your git project and branch

pub mod cli;
pub mod domain;
pub mod infra;
pub mod session;
pub mod store;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::fs::OpenOptions;
use std::path::Path;

use cli::{
    Cli, Command,
    config::{Config, LOG_FILE},
    handlers::{
        Delivery, handle_branch, handle_completions, handle_editor, handle_list, handle_open,
        handle_proj, handle_rm, handle_session, handle_tag,
    },
};
use infra::{GitContext, ensure_parent};
use session::StartMode;
use store::NoteFilter;

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let data_dir = config.data_dir(cli.dir.as_deref());

    // Commands that may take over the terminal log to a file instead
    let interactive = matches!(
        cli.command,
        None | Some(Command::Branch(_)) | Some(Command::Proj(_))
    );
    let log_file = data_dir.join(LOG_FILE);
    init_logging(cli.verbose, interactive.then_some(log_file.as_path()));

    let delivery = Delivery {
        print_path: cli.print_path,
        start: if cli.search || config.start_in_search {
            StartMode::Search
        } else {
            StartMode::Normal
        },
    };

    match &cli.command {
        Some(Command::Completions(args)) => return handle_completions(args),
        Some(Command::Editor(args)) => return handle_editor(args, config),
        _ => {}
    }

    let mut store = config.open_store(&data_dir)?;
    let context = GitContext::new();

    match &cli.command {
        None => handle_session(&mut store, &context, NoteFilter::All, delivery.start),
        Some(Command::Open(args)) => handle_open(args, &mut store, &context, delivery),
        Some(Command::Branch(args)) => handle_branch(args, &mut store, &context, delivery),
        Some(Command::Proj(args)) => handle_proj(args, &mut store, &context, delivery),
        Some(Command::List(args)) => handle_list(args, &store),
        Some(Command::Tag(args)) => handle_tag(args, &mut store),
        Some(Command::Rm(args)) => handle_rm(args, &mut store),
        Some(Command::Editor(_)) | Some(Command::Completions(_)) => Ok(()),
    }
}

/// Sets up `env_logger`. Each `-v` raises the level one step from `warn`;
/// `RUST_LOG` still wins.
fn init_logging(verbosity: u8, log_file: Option<&Path>) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();

    if let Some(path) = log_file {
        let file = ensure_parent(path)
            .ok()
            .and_then(|()| OpenOptions::new().create(true).append(true).open(path).ok());
        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }

    // A logger may already be installed when embedded
    let _ = builder.try_init();
}
