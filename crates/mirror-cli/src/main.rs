//! leaf-mirror CLI
//!
//! Backs up Overleaf projects to one or more git servers.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::{CommandFactory, Parser};
use colored::Colorize;

use cli::{Cli, Commands, ConfigAction};
use context::Context;
use error::Result;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Returns `false` when the command ran but did not fully succeed.
fn run() -> Result<bool> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    tracing::debug!("Verbose mode enabled");

    let Some(command) = cli.command else {
        println!("{} Overleaf backup tool", "leafmirror".green().bold());
        println!();
        println!("Run {} for available commands.", "leafmirror --help".cyan());
        return Ok(true);
    };

    if let Commands::Completions { shell } = command {
        clap_complete::generate(shell, &mut Cli::command(), "leafmirror", &mut std::io::stdout());
        return Ok(true);
    }

    let ctx = Context::new(cli.config, cli.cache_dir, cli.clean)?;
    execute_command(&ctx, command)
}

fn execute_command(ctx: &Context, command: Commands) -> Result<bool> {
    match command {
        Commands::Backup { project, json } => commands::run_backup(ctx, &project, json),
        Commands::BackupAll { json } => commands::run_backup_all(ctx, json),
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => commands::run_config_show(ctx, json).map(|_| true),
            ConfigAction::Validate => commands::run_config_validate(ctx),
            ConfigAction::Add { id, destinations } => {
                commands::run_config_add(ctx, &id, &destinations).map(|_| true)
            }
            ConfigAction::Remove { id } => commands::run_config_remove(ctx, &id).map(|_| true),
            ConfigAction::Path => commands::run_config_path(ctx).map(|_| true),
        },
        Commands::Completions { .. } => Ok(true),
    }
}
