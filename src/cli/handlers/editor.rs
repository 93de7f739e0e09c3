//! Editor and completions handlers.

use anyhow::Result;
use clap::CommandFactory;
use std::io;
use std::path::Path;

use crate::cli::config::Config;
use crate::cli::{Cli, CompletionsArgs, EditorArgs};

pub fn handle_editor(args: &EditorArgs, config: Config) -> Result<()> {
    let path = Config::config_path();
    let config = set_editor(config, &args.command, &path)?;
    match &config.editor {
        Some(editor) => println!("Editor set to '{}'", editor),
        None => println!("Editor cleared; notes open with the system opener"),
    }
    Ok(())
}

/// Stores `command` as the editor (blank clears it) and saves to `path`.
pub(crate) fn set_editor(mut config: Config, command: &str, path: &Path) -> Result<Config> {
    let command = command.trim();
    config.editor = (!command.is_empty()).then(|| command.to_string());
    config.save_to(path)?;
    log::info!("saved editor setting to {}", path.display());
    Ok(config)
}

pub fn handle_completions(args: &CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "jot", &mut io::stdout());
    Ok(())
}
