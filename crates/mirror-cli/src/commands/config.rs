//! Config inspection and editing commands

use colored::Colorize;
use mirror_core::Error;

use crate::context::Context;
use crate::error::Result;

/// Print the configuration as TOML, or JSON with `--json`.
pub fn run_config_show(ctx: &Context, json: bool) -> Result<()> {
    let config = ctx.load_config()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", toml::to_string_pretty(&config)?);
    }
    Ok(())
}

/// Validate the configuration. Returns whether it is valid.
pub fn run_config_validate(ctx: &Context) -> Result<bool> {
    let config = ctx.load_config()?;
    match config.validate() {
        Ok(()) => {
            println!(
                "{} {} is valid ({} project(s))",
                "OK".green().bold(),
                ctx.config_path().display(),
                config.projects.len()
            );
            Ok(true)
        }
        Err(Error::InvalidConfig { problems }) => {
            println!(
                "{} {} has {} problem(s):",
                "INVALID".red().bold(),
                ctx.config_path().display(),
                problems.len()
            );
            for problem in &problems {
                println!("   {} {}", "x".red(), problem);
            }
            Ok(false)
        }
        Err(other) => Err(other.into()),
    }
}

/// Add a project or replace its destinations.
pub fn run_config_add(ctx: &Context, id: &str, destinations: &[String]) -> Result<()> {
    let mut config = ctx.load_config()?;
    let replaced = config.upsert(id, destinations.to_vec())?;
    ctx.save_config(&config)?;

    let verb = if replaced { "Updated" } else { "Added" };
    println!(
        "{} {} project {} with {} destination(s)",
        "OK".green().bold(),
        verb,
        id.cyan(),
        destinations.len()
    );
    Ok(())
}

/// Remove a project.
pub fn run_config_remove(ctx: &Context, id: &str) -> Result<()> {
    let mut config = ctx.load_config()?;
    config.remove(id)?;
    ctx.save_config(&config)?;
    println!("{} Removed project {}", "OK".green().bold(), id.cyan());
    Ok(())
}

/// Print the config file path, whether or not it exists yet.
pub fn run_config_path(ctx: &Context) -> Result<()> {
    println!("{}", ctx.config_path().display());
    Ok(())
}
