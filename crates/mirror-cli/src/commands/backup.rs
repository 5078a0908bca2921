//! backup and backup-all command implementations

use colored::Colorize;
use mirror_core::{
    DestinationStatus, Error, MirrorConfig, Project, SyncEngine, SyncError, SyncResult,
    SyncStatus,
};
use mirror_git::GitCommand;

use crate::context::Context;
use crate::error::{CliError, Result};

/// Back up one project. Returns whether it fully succeeded.
pub fn run_backup(ctx: &Context, id: &str, json: bool) -> Result<bool> {
    let config = ctx.load_config()?;
    let project = config.project(id).map_err(|e| match e {
        Error::UnknownProject { id } => unknown_project(&config, &id),
        other => other.into(),
    })?;
    let engine = engine(&config)?;
    let cache_root = ctx.cache_root(&config)?;

    if !json {
        announce(&project);
    }
    let result = engine.sync_one(&project.id, &cache_root, &project.destinations, ctx.clean);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }
    Ok(result.is_success())
}

/// Back up every configured project. Returns whether all fully succeeded.
pub fn run_backup_all(ctx: &Context, json: bool) -> Result<bool> {
    let config = ctx.load_config()?;
    let projects = config.projects()?;
    let engine = engine(&config)?;
    let cache_root = ctx.cache_root(&config)?;

    if projects.is_empty() && !json {
        println!(
            "{} No projects configured. Add one with {}.",
            "=>".blue().bold(),
            "leafmirror config add".cyan()
        );
        return Ok(true);
    }

    if !json {
        println!(
            "{} Backing up {} project(s)",
            "=>".blue().bold(),
            projects.len()
        );
    }
    let report = engine.sync_all(&projects, &cache_root, ctx.clean);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(report.all_succeeded());
    }

    for project in &projects {
        if let Some(result) = report.get(&project.id) {
            println!();
            print_result(result);
        }
    }
    println!();
    let succeeded = report.succeeded().len();
    let summary = format!("{succeeded}/{} projects succeeded", report.len());
    if report.all_succeeded() {
        println!("{}", summary.green().bold());
    } else {
        println!("{}", summary.red().bold());
    }
    Ok(report.all_succeeded())
}

fn engine(config: &MirrorConfig) -> Result<SyncEngine<GitCommand>> {
    Ok(SyncEngine::new(GitCommand::new(), config.sync_options()?))
}

fn unknown_project(config: &MirrorConfig, id: &str) -> CliError {
    let known = config.project_ids();
    if known.is_empty() {
        CliError::user(format!("Unknown project '{id}'. No projects are configured."))
    } else {
        CliError::user(format!(
            "Unknown project '{id}'. Configured projects: {}",
            known.join(", ")
        ))
    }
}

fn announce(project: &Project) {
    println!(
        "{} Backing up {} to {} destination(s)",
        "=>".blue().bold(),
        project.id.as_str().cyan(),
        project.destinations.len()
    );
}

fn print_result(result: &SyncResult) {
    let label = match result.status {
        SyncStatus::Success => "OK".green().bold(),
        SyncStatus::PartialFailure => "PARTIAL".yellow().bold(),
        SyncStatus::TotalFailure => "FAILED".red().bold(),
    };
    match &result.primary_branch {
        Some(branch) => println!(
            "{label} {} ({})",
            result.project.as_str().cyan(),
            branch.dimmed()
        ),
        None => println!("{label} {}", result.project.as_str().cyan()),
    }

    if let Some(error) = &result.error {
        println!("   {} {}", "x".red(), error);
    }

    for outcome in &result.destinations {
        match &outcome.status {
            DestinationStatus::Succeeded { tags_warning } => {
                println!("   {} {} {}", "+".green(), outcome.remote, outcome.address.dimmed());
                if let Some(warning) = tags_warning {
                    println!("     {} tags not pushed: {}", "!".yellow(), warning);
                }
            }
            DestinationStatus::Failed { category, message } => {
                println!(
                    "   {} {} {} [{}]: {}",
                    "x".red(),
                    outcome.remote,
                    outcome.address.dimmed(),
                    category,
                    first_line(message)
                );
            }
        }
    }

    if result.status == SyncStatus::Success && result.destinations.is_empty() {
        println!("   {} no destinations configured", "!".yellow());
    }
    for warning in &result.warnings {
        print_warning(warning);
    }
    if result.cleaned {
        println!("   {} local mirror removed", "-".dimmed());
    }
}

fn print_warning(warning: &SyncError) {
    println!("   {} {}", "!".yellow(), first_line(&warning.to_string()));
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or(message)
}
