//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// leaf-mirror - Back up Overleaf projects to your own git servers
#[derive(Parser, Debug)]
#[command(name = "leafmirror")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "LEAFMIRROR_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding local mirrors, overriding the config
    #[arg(long, global = true, env = "LEAFMIRROR_CACHE_DIR", value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// Delete each local mirror after it was backed up successfully
    #[arg(long, global = true)]
    pub clean: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Back up one configured project
    ///
    /// Examples:
    ///   leafmirror backup 662a5ab30650c57e5355029b
    ///   leafmirror --clean backup 662a5ab30650c57e5355029b --json
    Backup {
        /// Project id as it appears in the config
        project: String,

        /// Output the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Back up every configured project
    BackupAll {
        /// Output the batch report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or edit the configuration
    Config {
        /// Config action to perform
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   leafmirror completions bash > ~/.local/share/bash-completion/completions/leafmirror
    ///   leafmirror completions zsh > ~/.zfunc/_leafmirror
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the configuration and list every problem
    Validate,

    /// Add a project, or replace the destinations of an existing one
    Add {
        /// Project id
        id: String,

        /// Destinations, e.g. gitlab-host/group/paper.git
        destinations: Vec<String>,
    },

    /// Remove a project
    Remove {
        /// Project id
        id: String,
    },

    /// Print the path of the config file in use
    Path,
}
